//! # 批量执行器
//!
//! 并行读取和处理分析文件，单个文件失败不影响其他文件。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代（结果保持输入顺序）
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/compare.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{Result, SievekitError};
use crate::utils::progress;

use rayon::prelude::*;
use std::path::PathBuf;

/// 单个文件处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult<T> {
    /// 处理成功
    Success(String, T),
    /// 跳过（如文件中没有筛分数据）
    Skipped(String, String), // (文件路径, 原因)
    /// 处理失败
    Failed(String, String), // (文件路径, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug)]
pub struct BatchResult<T> {
    /// 成功项，按输入顺序
    pub items: Vec<(String, T)>,
    /// 跳过详情
    pub skipped: Vec<(String, String)>,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl<T> Default for BatchResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> BatchResult<T> {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult<T>) {
        match result {
            ProcessResult::Success(path, item) => self.items.push((path, item)),
            ProcessResult::Skipped(path, reason) => self.skipped.push((path, reason)),
            ProcessResult::Failed(path, err) => self.failures.push((path, err)),
        }
    }

    /// 成功数量
    pub fn success(&self) -> usize {
        self.items.len()
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.items.len() + self.skipped.len() + self.failures.len()
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器（0 表示使用全部 CPU 核心）
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理文件列表
    pub fn run<T, F>(&self, files: &[PathBuf], processor: F) -> Result<BatchResult<T>>
    where
        T: Send,
        F: Fn(&PathBuf) -> ProcessResult<T> + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, "Loading");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| SievekitError::Other(format!("Failed to start worker pool: {}", e)))?;

        let results: Vec<ProcessResult<T>> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let result = processor(file);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_keeps_order_and_collects_failures() {
        let files: Vec<PathBuf> = (0..8).map(|i| PathBuf::from(format!("{}.gsa", i))).collect();
        let result = BatchRunner::new(3)
            .run(&files, |path| {
                let name = path.display().to_string();
                match name.as_str() {
                    "3.gsa" => ProcessResult::Failed(name, "broken".to_string()),
                    "5.gsa" => ProcessResult::Skipped(name, "empty".to_string()),
                    _ => ProcessResult::Success(name.clone(), name.len()),
                }
            })
            .unwrap();

        assert_eq!(result.total(), 8);
        assert_eq!(result.success(), 6);
        let order: Vec<&str> = result.items.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(order, vec!["0.gsa", "1.gsa", "2.gsa", "4.gsa", "6.gsa", "7.gsa"]);
        assert_eq!(result.failures, vec![("3.gsa".to_string(), "broken".to_string())]);
        assert_eq!(result.skipped.len(), 1);
    }

    #[test]
    fn test_zero_jobs_uses_all_cores() {
        assert_eq!(BatchRunner::new(0).jobs(), num_cpus::get());
        assert_eq!(BatchRunner::new(2).jobs(), 2);
    }
}
