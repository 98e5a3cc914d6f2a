//! # 数据模型模块
//!
//! 定义筛分、比重计、曲线和分析文件的数据模型。
//!
//! ## 依赖关系
//! - 被 `gradation/`, `classify/`, `parsers/`, `commands/` 使用
//! - 子模块: sieve, hydrometer, curve, sample

pub mod curve;
pub mod hydrometer;
pub mod sample;
pub mod sieve;

pub use curve::{AlignedTable, ChartPoint, SampleCurve};
pub use hydrometer::{HydrometerPoint, TemperatureContext};
pub use sample::{AnalysisFile, SampleInfo};
pub use sieve::{AnalysisResult, GradationRow, SieveMeasurement};
