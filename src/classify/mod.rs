//! # 土壤分类模块
//!
//! 由级配结果给出 USCS 和 AASHTO 分类。两个分类函数对任何输入都返回结果，
//! 不产生错误。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 子模块: uscs, aashto, report

pub mod aashto;
pub mod report;
pub mod uscs;

pub use report::{Classification, ClassificationReport};
