//! # 解析器模块
//!
//! 读取测量数据 CSV、筛号名称和 `.gsa` 分析文件。
//!
//! ## 依赖关系
//! - 被 `commands/`, `batch/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: designation, measurements, gsa

pub mod designation;
pub mod gsa;
pub mod measurements;
