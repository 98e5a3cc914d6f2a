//! # 级配分析模块
//!
//! 筛分/比重计分析引擎：由原始筛余质量得到级配曲线和特征粒径。
//!
//! ## 子模块
//! - `calculator`: 累计百分比、特征粒径插值、Cu/Cc、砾/砂/细料划分
//! - `hydrometer`: Stokes 定律粒径换算与 #200 筛衔接
//! - `curve`: 单样品曲线组装与多样品共享粒径轴对齐
//!
//! 所有函数都是纯函数，不持有状态，可在多个样品间并行调用。
//!
//! ## 依赖关系
//! - 被 `commands/`, `batch/` 使用
//! - 使用 `models/`

pub mod calculator;
pub mod curve;
pub mod hydrometer;

pub use calculator::{compute_gradation, Gradation};
pub use curve::{align_samples, assemble_curve, MAX_COMPARE_SAMPLES};
pub use hydrometer::compute_hydrometer_points;
