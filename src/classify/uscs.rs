//! # USCS 统一土壤分类 (ASTM D2487)
//!
//! 依据细料、砾石、砂含量和 Cu/Cc 判定土类符号。
//!
//! ## 判定流程
//! ```text
//! fines ≥ 50 ──────────────────────────────> ML (细粒土，未计塑性)
//! fines < 50 ─┬─ gravel > sand ─┬─ fines < 5   ─> GW / GP
//!             │                 ├─ 5 ≤ f ≤ 12  ─> GW-GM
//!             │                 └─ fines > 12  ─> GM
//!             └─ 否则 ──────────┬─ fines < 5   ─> SW / SP
//!                               ├─ 5 ≤ f ≤ 12  ─> SW-SM
//!                               └─ fines > 12  ─> SM
//! ```
//!
//! 细粒土分支固定返回 ML：液限/塑性指数未参与判定（没有塑性图），
//! 这一点在判定依据中明确列出。
//!
//! ## 依赖关系
//! - 被 `classify/report.rs`, `commands/` 使用
//! - 使用 `models/sieve.rs` 的 AnalysisResult

use crate::models::sieve::AnalysisResult;

use serde::{Deserialize, Serialize};

/// 细粒土与粗粒土分界 (%)
pub const FINE_GRAINED_FINES: f64 = 50.0;
/// 洁净土细料上限 (%)
pub const CLEAN_FINES_LIMIT: f64 = 5.0;
/// 双符号区间细料上限 (%)
pub const DUAL_SYMBOL_FINES_LIMIT: f64 = 12.0;
/// 级配良好砾石的 Cu 下限
pub const GRAVEL_MIN_CU: f64 = 4.0;
/// 级配良好砂的 Cu 下限
pub const SAND_MIN_CU: f64 = 6.0;
/// 级配良好的 Cc 区间
pub const CC_RANGE: (f64, f64) = (1.0, 3.0);

/// USCS 分类结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UscsClassification {
    pub symbol: String,
    pub name: String,
    pub description: String,
    /// 判定时实际检查的条件（含数值）
    pub criteria: Vec<String>,
    /// 典型工程性质
    pub properties: Vec<String>,
}

impl UscsClassification {
    fn new(
        symbol: &str,
        name: &str,
        description: &str,
        criteria: Vec<String>,
        properties: &[&str],
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            criteria,
            properties: properties.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// 砾石或砂
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CoarseFamily {
    Gravel,
    Sand,
}

impl CoarseFamily {
    fn min_cu(self) -> f64 {
        match self {
            CoarseFamily::Gravel => GRAVEL_MIN_CU,
            CoarseFamily::Sand => SAND_MIN_CU,
        }
    }
}

fn is_well_graded(family: CoarseFamily, cu: f64, cc: f64) -> bool {
    cu >= family.min_cu() && cc >= CC_RANGE.0 && cc <= CC_RANGE.1
}

/// USCS 分类（对任意输入都返回唯一结果）
pub fn classify_uscs(results: &AnalysisResult) -> UscsClassification {
    let fines = results.fines_percent;

    if !(fines < FINE_GRAINED_FINES) {
        return UscsClassification::new(
            "ML",
            "Silt",
            "Inorganic silt of low plasticity",
            vec![
                format!("Fines = {:.1}% ≥ 50%", fines),
                "Low plasticity assumed (plasticity not evaluated)".to_string(),
            ],
            &["Poor drainage", "Low strength", "High compressibility"],
        );
    }

    let family = if results.gravel_percent > results.sand_percent {
        CoarseFamily::Gravel
    } else {
        CoarseFamily::Sand
    };
    let fraction_criterion = match family {
        CoarseFamily::Gravel => format!(
            "Gravel {:.1}% > Sand {:.1}%",
            results.gravel_percent, results.sand_percent
        ),
        CoarseFamily::Sand => format!(
            "Sand {:.1}% ≥ Gravel {:.1}%",
            results.sand_percent, results.gravel_percent
        ),
    };

    if fines < CLEAN_FINES_LIMIT {
        classify_clean(family, results, fraction_criterion)
    } else if fines <= DUAL_SYMBOL_FINES_LIMIT {
        classify_dual(family, results, fraction_criterion)
    } else {
        classify_with_fines(family, results, fraction_criterion)
    }
}

/// 洁净粗粒土：按级配判定
fn classify_clean(
    family: CoarseFamily,
    results: &AnalysisResult,
    fraction_criterion: String,
) -> UscsClassification {
    let cu = results.uniformity_coefficient;
    let cc = results.coefficient_of_curvature;
    let fines_criterion = format!("Fines = {:.1}% < 5%", results.fines_percent);

    if is_well_graded(family, cu, cc) {
        let criteria = vec![
            fraction_criterion,
            format!("Cu = {:.2} ≥ {}", cu, family.min_cu()),
            format!("1 ≤ Cc = {:.2} ≤ 3", cc),
            fines_criterion,
        ];
        return match family {
            CoarseFamily::Gravel => UscsClassification::new(
                "GW",
                "Well-graded gravel",
                "Well-graded gravel with little or no fines",
                criteria,
                &["Excellent drainage", "High strength", "Low compressibility"],
            ),
            CoarseFamily::Sand => UscsClassification::new(
                "SW",
                "Well-graded sand",
                "Well-graded sand with little or no fines",
                criteria,
                &["Good drainage", "Medium strength", "Low compressibility"],
            ),
        };
    }

    let (well_symbol, symbol, name, description, properties): (_, _, _, _, &[&str]) = match family
    {
        CoarseFamily::Gravel => (
            "GW",
            "GP",
            "Poorly graded gravel",
            "Poorly graded gravel with little or no fines",
            &["Good drainage", "Medium strength", "Low compressibility"],
        ),
        CoarseFamily::Sand => (
            "SW",
            "SP",
            "Poorly graded sand",
            "Poorly graded sand with little or no fines",
            &["Good drainage", "Low to medium strength", "Low compressibility"],
        ),
    };
    UscsClassification::new(
        symbol,
        name,
        description,
        vec![
            fraction_criterion,
            format!(
                "Does not meet {} criteria (Cu = {:.2}, Cc = {:.2})",
                well_symbol, cu, cc
            ),
            fines_criterion,
        ],
        properties,
    )
}

/// 5–12% 细料：双符号
fn classify_dual(
    family: CoarseFamily,
    results: &AnalysisResult,
    fraction_criterion: String,
) -> UscsClassification {
    let criteria = vec![
        fraction_criterion,
        format!("5% ≤ Fines = {:.1}% ≤ 12%", results.fines_percent),
        "Dual symbol, silty fines assumed".to_string(),
    ];
    match family {
        CoarseFamily::Gravel => UscsClassification::new(
            "GW-GM",
            "Well-graded gravel with silt",
            "Well-graded gravel containing silty fines",
            criteria,
            &["Good drainage", "High strength", "Low compressibility"],
        ),
        CoarseFamily::Sand => UscsClassification::new(
            "SW-SM",
            "Well-graded sand with silt",
            "Well-graded sand containing silty fines",
            criteria,
            &["Good drainage", "Medium strength", "Low compressibility"],
        ),
    }
}

/// 细料 > 12%
fn classify_with_fines(
    family: CoarseFamily,
    results: &AnalysisResult,
    fraction_criterion: String,
) -> UscsClassification {
    let criteria = vec![
        fraction_criterion,
        format!("Fines = {:.1}% > 12%", results.fines_percent),
        "Silty fines assumed".to_string(),
    ];
    match family {
        CoarseFamily::Gravel => UscsClassification::new(
            "GM",
            "Silty gravel",
            "Gravel containing silty fines",
            criteria,
            &["Fair drainage", "Medium strength", "Medium compressibility"],
        ),
        CoarseFamily::Sand => UscsClassification::new(
            "SM",
            "Silty sand",
            "Sand containing silty fines",
            criteria,
            &["Fair drainage", "Medium strength", "Medium compressibility"],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(gravel: f64, sand: f64, fines: f64, cu: f64, cc: f64) -> AnalysisResult {
        let mut r = AnalysisResult::zeroed();
        r.gravel_percent = gravel;
        r.sand_percent = sand;
        r.fines_percent = fines;
        r.uniformity_coefficient = cu;
        r.coefficient_of_curvature = cc;
        r
    }

    #[test]
    fn test_clean_well_graded_gravel() {
        let c = classify_uscs(&result(70.0, 28.0, 2.0, 5.0, 2.0));
        assert_eq!(c.symbol, "GW");
        assert!(c.criteria.iter().any(|s| s.contains("Cu = 5.00")));
        assert_eq!(c.properties.len(), 3);
    }

    #[test]
    fn test_poorly_graded_gravel_and_sand() {
        assert_eq!(classify_uscs(&result(70.0, 28.0, 2.0, 3.0, 2.0)).symbol, "GP");
        assert_eq!(classify_uscs(&result(70.0, 28.0, 2.0, 5.0, 3.5)).symbol, "GP");
        // 砂要求 Cu ≥ 6
        assert_eq!(classify_uscs(&result(20.0, 78.0, 2.0, 5.0, 2.0)).symbol, "SP");
        assert_eq!(classify_uscs(&result(20.0, 78.0, 2.0, 6.0, 1.0)).symbol, "SW");
    }

    #[test]
    fn test_fines_thresholds() {
        assert_eq!(classify_uscs(&result(60.0, 35.1, 4.9, 1.0, 1.0)).symbol, "GP");
        assert_eq!(classify_uscs(&result(60.0, 35.0, 5.0, 1.0, 1.0)).symbol, "GW-GM");
        assert_eq!(classify_uscs(&result(60.0, 28.0, 12.0, 1.0, 1.0)).symbol, "GW-GM");
        assert_eq!(classify_uscs(&result(60.0, 27.9, 12.1, 1.0, 1.0)).symbol, "GM");
        assert_eq!(classify_uscs(&result(30.0, 58.0, 12.0, 1.0, 1.0)).symbol, "SW-SM");
        assert_eq!(classify_uscs(&result(30.0, 57.9, 12.1, 1.0, 1.0)).symbol, "SM");
        assert_eq!(classify_uscs(&result(20.1, 30.0, 49.9, 0.0, 0.0)).symbol, "SM");
        // 砾石多于砂时按砾石类
        assert_eq!(classify_uscs(&result(30.0, 20.1, 49.9, 0.0, 0.0)).symbol, "GM");
    }

    #[test]
    fn test_equal_gravel_and_sand_is_sand_family() {
        assert_eq!(classify_uscs(&result(48.0, 48.0, 4.0, 8.0, 2.0)).symbol, "SW");
    }

    #[test]
    fn test_fine_grained_stub() {
        let c = classify_uscs(&result(0.0, 50.0, 50.0, 0.0, 0.0));
        assert_eq!(c.symbol, "ML");
        assert!(c.criteria.iter().any(|s| s.contains("plasticity not evaluated")));
        assert_eq!(classify_uscs(&result(0.0, 0.0, 100.0, 0.0, 0.0)).symbol, "ML");
    }

    #[test]
    fn test_totality_over_fines_grid() {
        for fines in [0.0, 4.9, 5.0, 12.0, 12.1, 49.9, 50.0, 100.0] {
            for gravel_share in [0.0, 0.3, 0.5, 0.7, 1.0] {
                let coarse = 100.0 - fines;
                let gravel = coarse * gravel_share;
                let c = classify_uscs(&result(gravel, coarse - gravel, fines, 0.0, 0.0));
                assert!(!c.symbol.is_empty());
                assert!(!c.criteria.is_empty());
            }
        }
    }

    #[test]
    fn test_nan_fines_falls_into_fine_grained() {
        let c = classify_uscs(&result(0.0, 0.0, f64::NAN, 0.0, 0.0));
        assert_eq!(c.symbol, "ML");
    }
}
