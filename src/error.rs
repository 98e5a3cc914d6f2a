//! # 统一错误处理模块
//!
//! 定义 sievekit 的所有错误类型，使用 `thiserror` 派生。
//!
//! 计算核心（`gradation/`, `classify/`）不返回错误：退化数据一律归一化为 0。
//! 这里的错误只出现在输入解析、表单级校验和分析文件读写等边界上。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `batch/`, `commands/` 使用
//! - 无外部模块依赖

use thiserror::Error;

/// sievekit 统一错误类型
#[derive(Error, Debug)]
pub enum SievekitError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Output file already exists: {path} (use --overwrite)")]
    OutputExists { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Malformed analysis file: {path}\nReason: {reason}")]
    MalformedAnalysisFile { path: String, reason: String },

    #[error("Unknown sieve designation: {0}")]
    UnknownSieve(String),

    // ─────────────────────────────────────────────────────────────
    // 输入校验错误（表单级）
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid input: {0}")]
    ValidationError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV / JSON 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, SievekitError>;
