//! # AASHTO 土壤分类 (M 145)
//!
//! 依据细料、砾石含量判定 A-1-a / A-1-b / A-2-4 / A-3 / A-4 / A-6 分组。
//!
//! 群指数使用简化公式 GI = round((F - 35) × 0.2)，仅在 F > 35 时非零，
//! 并按分组截断到 4 / 8 / 20。标准公式中的液限和塑性指数项没有计入，
//! 结果的说明中会注明这一点。
//!
//! ## 依赖关系
//! - 被 `classify/report.rs`, `commands/` 使用
//! - 使用 `models/sieve.rs` 的 AnalysisResult

use crate::models::sieve::AnalysisResult;

use serde::{Deserialize, Serialize};

/// 粒状材料细料上限 (%)
pub const GRANULAR_FINES_LIMIT: f64 = 35.0;

/// 群指数近似说明
pub const GROUP_INDEX_NOTE: &str =
    "Group index approximated from fines content only (LL/PI terms not included)";

/// AASHTO 分类结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AashtoClassification {
    pub group: String,
    pub name: String,
    pub description: String,
    pub group_index: u32,
    /// 路基/基层适用性
    pub suitability: Vec<String>,
}

impl AashtoClassification {
    fn new(
        group: &str,
        name: &str,
        description: &str,
        group_index: u32,
        suitability: &[&str],
    ) -> Self {
        Self {
            group: group.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            group_index,
            suitability: suitability.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// 分组与群指数，如 "A-4 (3)"
    pub fn designation(&self) -> String {
        format!("{} ({})", self.group, self.group_index)
    }
}

/// 简化群指数（未截断）
pub fn group_index(fines_percent: f64) -> u32 {
    if fines_percent > GRANULAR_FINES_LIMIT {
        // round 到非负整数；NaN 在比较时已被排除
        ((fines_percent - GRANULAR_FINES_LIMIT) * 0.2).round().max(0.0) as u32
    } else {
        0
    }
}

/// AASHTO 分类（对任意输入都返回唯一结果）
pub fn classify_aashto(results: &AnalysisResult) -> AashtoClassification {
    let fines = results.fines_percent;
    let gi = group_index(fines);

    if fines > GRANULAR_FINES_LIMIT {
        return if fines <= 50.0 {
            AashtoClassification::new(
                "A-4",
                "Silty soils",
                "Silty soil of low plasticity",
                gi.min(8),
                &[
                    "Fair to poor subgrade material",
                    "Not suitable for base",
                    "Poor drainage",
                ],
            )
        } else {
            AashtoClassification::new(
                "A-6",
                "Clayey soils",
                "Clayey soil of medium plasticity",
                gi.min(20),
                &[
                    "Poor subgrade material",
                    "Not suitable for base",
                    "Very poor drainage",
                ],
            )
        };
    }

    // 粒状材料（含 NaN 等无法比较的输入）
    if results.gravel_percent > 50.0 {
        if fines <= 15.0 {
            AashtoClassification::new(
                "A-1-a",
                "Stone fragments, gravel and sand",
                "Well-graded granular material",
                0,
                &[
                    "Excellent subgrade material",
                    "Good base material",
                    "Excellent drainage",
                ],
            )
        } else {
            AashtoClassification::new(
                "A-2-4",
                "Silty or clayey gravel and sand",
                "Granular material containing silty fines",
                gi.min(4),
                &[
                    "Good to fair subgrade material",
                    "Fair base material",
                    "Good drainage",
                ],
            )
        }
    } else if fines <= 10.0 {
        AashtoClassification::new(
            "A-1-b",
            "Stone fragments, gravel and sand",
            "Well-graded granular material",
            0,
            &[
                "Excellent subgrade material",
                "Good base material",
                "Excellent drainage",
            ],
        )
    } else {
        AashtoClassification::new(
            "A-3",
            "Fine sand",
            "Poorly graded fine sand",
            0,
            &[
                "Fair subgrade material",
                "Poor base material",
                "Good drainage",
            ],
        )
    }
}
