//! # compare 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/compare.rs`

use clap::Args;
use std::path::PathBuf;

/// compare 子命令参数
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Analysis files (.gsa) or directories containing them
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Glob pattern for files inside directories (comma separated, e.g. "*.gsa,*.json")
    #[arg(long, default_value = "*.gsa")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0, env = "SIEVEKIT_JOBS")]
    pub jobs: usize,

    /// Recompute each gradation from its stored sieve data
    #[arg(long, default_value_t = false)]
    pub recompute: bool,
}
