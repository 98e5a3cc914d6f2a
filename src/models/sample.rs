//! # 样品信息与分析文件模型
//!
//! `.gsa` 分析文件（JSON）的结构化表示。读写逻辑见 `parsers/gsa.rs`。
//!
//! ## 依赖关系
//! - 使用 `models/sieve.rs`, `models/hydrometer.rs`
//! - 被 `parsers/gsa.rs`, `commands/` 使用

use crate::models::hydrometer::TemperatureContext;
use crate::models::sieve::{AnalysisResult, GradationRow};

use serde::{Deserialize, Serialize};

/// 当前写出的文件版本
pub const GSA_VERSION: &str = "1.0";

/// 样品信息（文件中的 `fileInfo`）
///
/// 未填写的文本字段为空串，未填写的数值为 0。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SampleInfo {
    pub file_name: String,
    pub sample_id: String,
    pub location: String,
    pub depth: String,
    pub test_date: String,
    pub total_mass: f64,
    pub specific_gravity: f64,
    pub liquid_limit: f64,
    pub plastic_limit: f64,
}

impl SampleInfo {
    /// 比重（未填写时为 None）
    pub fn specific_gravity(&self) -> Option<f64> {
        (self.specific_gravity > 0.0).then_some(self.specific_gravity)
    }

    /// 塑性指数 PI = LL - PL（任一未填写时为 None）
    pub fn plasticity_index(&self) -> Option<f64> {
        if self.liquid_limit > 0.0 && self.plastic_limit > 0.0 {
            Some((self.liquid_limit - self.plastic_limit).max(0.0))
        } else {
            None
        }
    }
}

/// 试验方法说明
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestMethod {
    pub input_data_method: String,
    pub hydrometer_type: String,
}

impl Default for TestMethod {
    fn default() -> Self {
        Self {
            input_data_method: "Wt. retained".to_string(),
            hydrometer_type: "151H".to_string(),
        }
    }
}

fn default_version() -> String {
    GSA_VERSION.to_string()
}

/// 分析文件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisFile {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub file_info: SampleInfo,
    #[serde(default)]
    pub test_method: TestMethod,
    pub sieve_data: Vec<GradationRow>,
    pub analysis_results: AnalysisResult,
    #[serde(default)]
    pub temperature_data: Option<TemperatureContext>,
    #[serde(default)]
    pub export_date: String,
}

impl AnalysisFile {
    pub fn new(
        file_info: SampleInfo,
        sieve_data: Vec<GradationRow>,
        analysis_results: AnalysisResult,
        temperature_data: Option<TemperatureContext>,
    ) -> Self {
        Self {
            version: default_version(),
            file_info,
            test_method: TestMethod::default(),
            sieve_data,
            analysis_results,
            temperature_data,
            export_date: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// 显示名：优先 `fileInfo.fileName`，否则用给定的后备名（通常为文件名主干）
    pub fn display_name(&self, fallback: &str) -> String {
        if self.file_info.file_name.trim().is_empty() {
            fallback.to_string()
        } else {
            self.file_info.file_name.clone()
        }
    }
}
