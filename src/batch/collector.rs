//! # 文件收集器
//!
//! 根据输入路径和模式收集待处理的分析文件。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - glob 模式匹配（逗号分隔多个模式）
//! - 递归目录搜索
//!
//! ## 依赖关系
//! - 被 `commands/compare.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{Result, SievekitError};
use crate::parsers::gsa::GSA_EXTENSION;

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 匹配模式列表，为空时匹配 `.gsa` 扩展名
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器（默认匹配 `*.gsa`）
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: Vec::new(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s).map_err(|e| {
                    SievekitError::InvalidArgument(format!("Invalid pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.patterns = patterns;
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件（目录内按路径排序）
    ///
    /// 单文件输入不做模式过滤；不存在的路径返回 `FileNotFound`。
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if self.input.is_file() {
            return Ok(vec![self.input.clone()]);
        }

        if !self.input.is_dir() {
            return Err(SievekitError::FileNotFound {
                path: self.input.display().to_string(),
            });
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|entry| self.matches_patterns(entry.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        Ok(files)
    }

    /// 检查文件是否匹配任一模式
    fn matches_patterns(&self, path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        if self.patterns.is_empty() {
            return path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(GSA_EXTENSION));
        }
        self.patterns.iter().any(|p| p.matches(filename))
    }
}
