//! # 分类报告
//!
//! 汇总 USCS、AASHTO、级配评价和粒组含量，生成终端输出用的文本行。
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs`, `commands/classify.rs` 使用
//! - 使用 `classify/uscs.rs`, `classify/aashto.rs`

use super::aashto::{classify_aashto, AashtoClassification, GROUP_INDEX_NOTE};
use super::uscs::{classify_uscs, UscsClassification};
use crate::models::sieve::{AnalysisResult, Grading};

/// 统一显示用的分类结果
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Uscs(UscsClassification),
    Aashto(AashtoClassification),
}

impl Classification {
    /// 分类体系名称
    pub fn system(&self) -> &'static str {
        match self {
            Classification::Uscs(_) => "USCS",
            Classification::Aashto(_) => "AASHTO",
        }
    }

    /// 符号，AASHTO 附带群指数
    pub fn code(&self) -> String {
        match self {
            Classification::Uscs(c) => c.symbol.clone(),
            Classification::Aashto(c) => c.designation(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Classification::Uscs(c) => &c.name,
            Classification::Aashto(c) => &c.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Classification::Uscs(c) => &c.description,
            Classification::Aashto(c) => &c.description,
        }
    }

    /// USCS 的工程性质或 AASHTO 的适用性
    pub fn notes(&self) -> &[String] {
        match self {
            Classification::Uscs(c) => &c.properties,
            Classification::Aashto(c) => &c.suitability,
        }
    }
}

/// 分类报告
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub uscs: UscsClassification,
    pub aashto: AashtoClassification,
    pub grading: Grading,
    pub uniformity_coefficient: f64,
    pub coefficient_of_curvature: f64,
    pub gravel_percent: f64,
    pub sand_percent: f64,
    pub fines_percent: f64,
}

impl ClassificationReport {
    pub fn from_results(results: &AnalysisResult) -> Self {
        Self {
            uscs: classify_uscs(results),
            aashto: classify_aashto(results),
            grading: results.grading(),
            uniformity_coefficient: results.uniformity_coefficient,
            coefficient_of_curvature: results.coefficient_of_curvature,
            gravel_percent: results.gravel_percent,
            sand_percent: results.sand_percent,
            fines_percent: results.fines_percent,
        }
    }

    /// 两种分类，按 USCS、AASHTO 顺序
    pub fn classifications(&self) -> [Classification; 2] {
        [
            Classification::Uscs(self.uscs.clone()),
            Classification::Aashto(self.aashto.clone()),
        ]
    }

    /// 摘要文本行
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("USCS Classification: {} - {}", self.uscs.symbol, self.uscs.name),
            format!(
                "AASHTO Classification: {} (GI = {}) - {}",
                self.aashto.group, self.aashto.group_index, self.aashto.name
            ),
            format!("Grading: {}", self.grading),
            format!("Uniformity Coefficient (Cu): {:.2}", self.uniformity_coefficient),
            format!("Coefficient of Curvature (Cc): {:.2}", self.coefficient_of_curvature),
            format!(
                "Gravel: {:.1}%, Sand: {:.1}%, Fines: {:.1}%",
                self.gravel_percent, self.sand_percent, self.fines_percent
            ),
        ]
    }

    /// 判定依据与附注
    pub fn detail_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .uscs
            .criteria
            .iter()
            .map(|c| format!("USCS: {}", c))
            .collect();
        if self.aashto.group_index > 0 {
            lines.push(format!("AASHTO: {}", GROUP_INDEX_NOTE));
        }
        lines
    }
}
