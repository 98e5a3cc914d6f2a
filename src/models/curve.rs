//! # 级配曲线数据模型
//!
//! 曲线点、带标识的样品曲线以及多样品对齐表。
//!
//! ## 依赖关系
//! - 被 `gradation/curve.rs` 构造
//! - 被 `commands/compare.rs`, `commands/analyze.rs` 显示

use serde::{Deserialize, Serialize};

/// 曲线点的数据来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Sieve,
    Hydrometer,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Sieve => write!(f, "sieve"),
            SourceKind::Hydrometer => write!(f, "hydrometer"),
        }
    }
}

/// 曲线上的一个点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    #[serde(rename = "particleSize")]
    pub particle_size_mm: f64,
    pub percent_passing: f64,
    pub source: SourceKind,
}

/// 带稳定标识的样品曲线（按粒径降序）
#[derive(Debug, Clone, PartialEq)]
pub struct SampleCurve {
    pub id: String,
    pub points: Vec<ChartPoint>,
}

impl SampleCurve {
    pub fn new(id: impl Into<String>, points: Vec<ChartPoint>) -> Self {
        Self {
            id: id.into(),
            points,
        }
    }
}

/// 对齐表的一行：共享粒径轴上的一个点
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRow {
    pub particle_size_mm: f64,
    /// 与 `AlignedTable::sample_ids` 一一对应；无数据的样品为 None
    pub values: Vec<Option<f64>>,
}

/// 多样品对齐表
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedTable {
    pub sample_ids: Vec<String>,
    pub rows: Vec<AlignedRow>,
}

impl AlignedTable {
    /// 按样品标识取某一行的值
    pub fn value(&self, row: usize, sample_id: &str) -> Option<f64> {
        let col = self.sample_ids.iter().position(|id| id == sample_id)?;
        self.rows.get(row).and_then(|r| r.values.get(col).copied().flatten())
    }
}
