//! # 筛分数据模型
//!
//! 单个筛子的测量值、派生的级配行以及级配计算结果。
//!
//! 字段在 JSON 中使用 .gsa 文件的 camelCase 命名（`sieveSize`, `sieveOpening`,
//! `massRetained` ...），以便与已有 `.gsa` 文件互通。
//!
//! ## 依赖关系
//! - 被 `gradation/`, `classify/`, `parsers/` 使用

use serde::{Deserialize, Serialize};

/// 标准筛组：(孔径 mm, 标号)，按孔径降序
pub const STANDARD_SIEVES: [(f64, &str); 10] = [
    (25.4, "1 in."),
    (19.05, "3/4 in."),
    (9.525, "3/8 in."),
    (4.75, "No. 4"),
    (2.0, "No. 10"),
    (0.85, "No. 20"),
    (0.425, "No. 40"),
    (0.25, "No. 60"),
    (0.15, "No. 100"),
    (0.075, "No. 200"),
];

/// 砾石/砂分界筛孔径 (No. 4)
pub const GRAVEL_SAND_BOUNDARY_MM: f64 = 4.75;

/// 砂/细料分界筛孔径 (No. 200)
pub const SAND_FINES_BOUNDARY_MM: f64 = 0.075;

/// 按孔径查找筛子时的容差 (mm)
pub const SIEVE_SIZE_TOLERANCE_MM: f64 = 0.001;

/// 单个筛子的测量值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SieveMeasurement {
    /// 孔径 (mm)
    pub sieve_size_mm: f64,
    /// 标号，如 "No. 200", "3/8 in."
    pub label: String,
    /// 筛余质量 (g)
    pub mass_retained_g: f64,
}

impl SieveMeasurement {
    pub fn new(sieve_size_mm: f64, label: impl Into<String>, mass_retained_g: f64) -> Self {
        Self {
            sieve_size_mm,
            label: label.into(),
            mass_retained_g,
        }
    }
}

/// 标准筛组，筛余质量为 0
pub fn standard_stack() -> Vec<SieveMeasurement> {
    STANDARD_SIEVES
        .iter()
        .map(|(size, label)| SieveMeasurement::new(*size, *label, 0.0))
        .collect()
}

/// 补齐测量中缺少的标准筛（筛余为 0），已有的筛子保持不变
pub fn fill_standard_sieves(measurements: &[SieveMeasurement]) -> Vec<SieveMeasurement> {
    let mut filled = measurements.to_vec();
    filled.extend(standard_stack().into_iter().filter(|standard| {
        !measurements
            .iter()
            .any(|m| (m.sieve_size_mm - standard.sieve_size_mm).abs() < SIEVE_SIZE_TOLERANCE_MM)
    }));
    filled
}

/// 级配行：测量值加上累计量与百分比
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradationRow {
    #[serde(rename = "sieveSize")]
    pub sieve_size_mm: f64,
    #[serde(rename = "sieveOpening")]
    pub label: String,
    #[serde(rename = "massRetained")]
    pub mass_retained_g: f64,
    #[serde(rename = "cumulativeMassRetained")]
    pub cumulative_mass_retained_g: f64,
    pub percent_retained: f64,
    pub cumulative_percent_retained: f64,
    pub percent_passing: f64,
}

impl GradationRow {
    /// 还原为原始测量值（用于重新计算）
    pub fn measurement(&self) -> SieveMeasurement {
        SieveMeasurement::new(self.sieve_size_mm, self.label.clone(), self.mass_retained_g)
    }
}

/// 在级配行中按孔径查找
pub fn find_row(rows: &[GradationRow], sieve_size_mm: f64) -> Option<&GradationRow> {
    rows.iter()
        .find(|r| (r.sieve_size_mm - sieve_size_mm).abs() < SIEVE_SIZE_TOLERANCE_MM)
}

/// 级配评价
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grading {
    WellGraded,
    PoorlyGraded,
}

impl std::fmt::Display for Grading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grading::WellGraded => write!(f, "Well graded"),
            Grading::PoorlyGraded => write!(f, "Poorly graded"),
        }
    }
}

/// 级配计算结果
///
/// 每次完成筛分输入后生成一次，之后不再修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub d10: f64,
    pub d30: f64,
    pub d60: f64,
    /// 旧文件中没有以下三个粒径
    #[serde(default)]
    pub d15: f64,
    #[serde(default)]
    pub d50: f64,
    #[serde(default)]
    pub d85: f64,
    pub effective_size: f64,
    pub uniformity_coefficient: f64,
    pub coefficient_of_curvature: f64,
    pub gravel_percent: f64,
    pub sand_percent: f64,
    pub fines_percent: f64,
    #[serde(rename = "totalMassRetained")]
    pub total_mass_retained_g: f64,
    #[serde(rename = "panMass")]
    pub pan_mass_g: f64,
}

impl AnalysisResult {
    /// 全零结果（空输入或总质量无效时使用）
    pub fn zeroed() -> Self {
        Self {
            d10: 0.0,
            d30: 0.0,
            d60: 0.0,
            d15: 0.0,
            d50: 0.0,
            d85: 0.0,
            effective_size: 0.0,
            uniformity_coefficient: 0.0,
            coefficient_of_curvature: 0.0,
            gravel_percent: 0.0,
            sand_percent: 0.0,
            fines_percent: 0.0,
            total_mass_retained_g: 0.0,
            pan_mass_g: 0.0,
        }
    }

    /// 级配评价：Cu > 4 且 1 < Cc < 3 为级配良好
    pub fn grading(&self) -> Grading {
        let cc = self.coefficient_of_curvature;
        if self.uniformity_coefficient > 4.0 && cc > 1.0 && cc < 3.0 {
            Grading::WellGraded
        } else {
            Grading::PoorlyGraded
        }
    }

    /// 盘中质量占筛余总质量的百分比
    pub fn pan_percent_of_retained(&self) -> f64 {
        if self.total_mass_retained_g > 0.0 {
            self.pan_mass_g / self.total_mass_retained_g * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_sieves_are_descending() {
        assert!(STANDARD_SIEVES.windows(2).all(|w| w[0].0 > w[1].0));
        assert_eq!(STANDARD_SIEVES[3], (GRAVEL_SAND_BOUNDARY_MM, "No. 4"));
        assert_eq!(STANDARD_SIEVES[9], (SAND_FINES_BOUNDARY_MM, "No. 200"));
    }

    #[test]
    fn test_standard_stack_has_zero_mass() {
        let stack = standard_stack();
        assert_eq!(stack.len(), STANDARD_SIEVES.len());
        assert!(stack.iter().all(|m| m.mass_retained_g == 0.0));
        assert_eq!(stack[9], SieveMeasurement::new(0.075, "No. 200", 0.0));
    }

    #[test]
    fn test_fill_standard_sieves_keeps_measured_masses() {
        let measured = vec![
            SieveMeasurement::new(4.75, "No. 4", 120.0),
            SieveMeasurement::new(0.0751, "#200", 30.0),
            SieveMeasurement::new(1.18, "No. 16", 40.0),
        ];
        let filled = fill_standard_sieves(&measured);
        assert_eq!(filled.len(), 11);
        assert_eq!(&filled[..3], measured.as_slice());
        assert!(!filled[3..].iter().any(|m| m.label == "No. 4" || m.label == "No. 200"));
        assert!(filled[3..].iter().all(|m| m.mass_retained_g == 0.0));
    }

    #[test]
    fn test_row_wire_names() {
        let row = GradationRow {
            sieve_size_mm: 0.075,
            label: "No. 200".to_string(),
            mass_retained_g: 12.0,
            cumulative_mass_retained_g: 480.0,
            percent_retained: 2.4,
            cumulative_percent_retained: 96.0,
            percent_passing: 4.0,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["sieveSize"], 0.075);
        assert_eq!(json["sieveOpening"], "No. 200");
        assert_eq!(json["cumulativeMassRetained"], 480.0);
        assert_eq!(json["percentPassing"], 4.0);
    }

    #[test]
    fn test_result_without_extra_diameters_loads() {
        let json = r#"{
            "d10": 0.1, "d30": 0.4, "d60": 2.0, "effectiveSize": 0.1,
            "uniformityCoefficient": 20.0, "coefficientOfCurvature": 0.8,
            "gravelPercent": 30.0, "sandPercent": 60.0, "finesPercent": 10.0,
            "totalMassRetained": 450.0, "panMass": 50.0
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.d85, 0.0);
        assert_eq!(result.pan_mass_g, 50.0);
    }

    #[test]
    fn test_grading() {
        let mut r = AnalysisResult::zeroed();
        r.uniformity_coefficient = 6.0;
        r.coefficient_of_curvature = 1.5;
        assert_eq!(r.grading(), Grading::WellGraded);
        r.coefficient_of_curvature = 3.0;
        assert_eq!(r.grading(), Grading::PoorlyGraded);
    }
}
