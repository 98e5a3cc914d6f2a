//! # classify 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/classify.rs`

use clap::Args;
use std::path::PathBuf;

/// classify 子命令参数
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Analysis file (.gsa)
    pub input: PathBuf,

    /// Recompute the gradation from the stored sieve data instead of trusting stored results
    #[arg(long, default_value_t = false)]
    pub recompute: bool,
}
