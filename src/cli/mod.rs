//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `analyze`: 由筛分 (及比重计) CSV 计算级配并分类
//! - `classify`: 读取 `.gsa` 文件并输出分类报告
//! - `compare`: 多个 `.gsa` 文件的级配对比
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: analyze, classify, compare

pub mod analyze;
pub mod classify;
pub mod compare;

use clap::{Parser, Subcommand};

/// sievekit - 筛分/比重计颗粒分析工具
#[derive(Parser)]
#[command(name = "sievekit")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Sieve and hydrometer grain-size analysis with USCS/AASHTO soil classification",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Compute a gradation from sieve (and hydrometer) measurements and classify the soil
    Analyze(analyze::AnalyzeArgs),

    /// Print the classification report of a saved analysis file (.gsa)
    Classify(classify::ClassifyArgs),

    /// Compare grain-size curves of several analysis files
    Compare(compare::CompareArgs),
}
