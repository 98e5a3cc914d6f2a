//! # sievekit - 颗粒分析与土壤分类工具
//!
//! 筛分/比重计颗粒分析引擎，输出级配曲线、特征粒径和 USCS/AASHTO 分类。
//!
//! ## 子命令
//! - `analyze`  - 由测量数据计算级配并分类，可保存为 `.gsa`
//! - `classify` - 读取 `.gsa` 文件输出分类报告
//! - `compare`  - 多个样品的级配对比
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (CSV 输入、筛号、.gsa 文件)
//!   │     ├── gradation/ (级配、比重计、曲线)
//!   │     ├── classify/  (USCS / AASHTO)
//!   │     ├── batch/     (批量读取)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod classify;
mod cli;
mod commands;
mod error;
mod gradation;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
