//! # 美化输出工具
//!
//! 提供统一的终端输出样式。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块和 `main.rs` 使用
//! - 使用 `colored` crate，`console` 获取终端宽度

use colored::Colorize;

/// 标题栏最大宽度
const MAX_RULE_WIDTH: usize = 72;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印跳过消息
pub fn print_skip(msg: &str) {
    println!("{} {}", "[SKIP]".dimmed(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印键值对（参数摘要用）
pub fn print_key_value(key: &str, value: &str) {
    let label = format!("{:<34}", format!("{}:", key));
    println!("  {} {}", label.dimmed(), value);
}

/// 分隔线宽度：终端宽度与上限取小
fn rule_width() -> usize {
    let (_, cols) = console::Term::stdout().size();
    (cols as usize).clamp(20, MAX_RULE_WIDTH)
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(rule_width());
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}
