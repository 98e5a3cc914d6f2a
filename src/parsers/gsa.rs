//! # 分析文件 (.gsa) 读写
//!
//! `.gsa` 是带缩进的 JSON 文件，结构见 `models/sample.rs`。
//!
//! ## 文件结构
//! ```text
//! {
//!   "version": "1.0",
//!   "fileInfo": { "fileName", "sampleId", "location", "depth", "testDate", ... },
//!   "testMethod": { "inputDataMethod": "Wt. retained", "hydrometerType": "151H" },
//!   "sieveData": [ { "sieveSize", "sieveOpening", "massRetained", ... } ],
//!   "analysisResults": { "d10", "d30", "d60", ... },
//!   "temperatureData": { ... } | null,
//!   "exportDate": "2024-05-01T08:00:00+00:00"
//! }
//! ```
//!
//! 缺少 `sieveData`（或不是数组）、缺少 `analysisResults` 的文件视为损坏。
//!
//! ## 依赖关系
//! - 被 `commands/`, `batch/` 使用
//! - 使用 `models/sample.rs`
//! - 使用 `serde_json`

use crate::error::{Result, SievekitError};
use crate::models::sample::AnalysisFile;

use serde_json::Value;
use std::fs;
use std::path::Path;

/// 分析文件扩展名
pub const GSA_EXTENSION: &str = "gsa";

/// 保存分析文件
pub fn save(path: &Path, file: &AnalysisFile) -> Result<()> {
    let json = serde_json::to_string_pretty(file)?;
    fs::write(path, json).map_err(|e| SievekitError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 读取分析文件
pub fn load(path: &Path) -> Result<AnalysisFile> {
    if !path.exists() {
        return Err(SievekitError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path).map_err(|e| SievekitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content, &path.display().to_string())
}

/// 从 JSON 字符串解析分析文件
pub fn parse(content: &str, source: &str) -> Result<AnalysisFile> {
    let malformed = |reason: String| SievekitError::MalformedAnalysisFile {
        path: source.to_string(),
        reason,
    };

    let value: Value =
        serde_json::from_str(content).map_err(|e| malformed(format!("Invalid JSON: {}", e)))?;
    let object = value
        .as_object()
        .ok_or_else(|| malformed("Top-level value is not an object".to_string()))?;

    match object.get("sieveData") {
        Some(Value::Array(_)) => {}
        Some(_) => return Err(malformed("'sieveData' is not an array".to_string())),
        None => return Err(malformed("Missing 'sieveData'".to_string())),
    }
    match object.get("analysisResults") {
        Some(Value::Object(_)) => {}
        Some(_) => return Err(malformed("'analysisResults' is not an object".to_string())),
        None => return Err(malformed("Missing 'analysisResults'".to_string())),
    }

    serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
}

/// 文件名主干，作为样品的后备显示名
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sample")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradation::compute_gradation;
    use crate::models::hydrometer::{HydrometerReading, TemperatureContext};
    use crate::models::sample::{SampleInfo, GSA_VERSION};
    use crate::models::sieve::SieveMeasurement;

    fn sample_file() -> AnalysisFile {
        let sieves = vec![
            SieveMeasurement::new(9.525, "3/8 in.", 31.7),
            SieveMeasurement::new(4.75, "No. 4", 88.1),
            SieveMeasurement::new(0.425, "No. 40", 170.3),
            SieveMeasurement::new(0.075, "No. 200", 140.9),
        ];
        let gradation = compute_gradation(&sieves, 511.3);
        let temperature = TemperatureContext::from_analysis(
            &gradation.result,
            511.3,
            22.0,
            0.5,
            4.0,
            vec![HydrometerReading::new(2, 21.3), HydrometerReading::new(60, 9.8)],
        );
        let info = SampleInfo {
            file_name: "BH-02 2.5m".to_string(),
            sample_id: "BH-02".to_string(),
            total_mass: 511.3,
            ..SampleInfo::default()
        };
        AnalysisFile::new(info, gradation.rows, gradation.result, Some(temperature))
    }

    #[test]
    fn test_round_trip_is_bit_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bh02.gsa");
        let original = sample_file();
        save(&path, &original).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, original);
        for (a, b) in loaded.sieve_data.iter().zip(&original.sieve_data) {
            assert_eq!(a.percent_passing.to_bits(), b.percent_passing.to_bits());
        }
        assert_eq!(
            loaded.analysis_results.d10.to_bits(),
            original.analysis_results.d10.to_bits()
        );
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_string(&sample_file()).unwrap();
        for key in [
            "\"version\":\"1.0\"",
            "\"fileInfo\"",
            "\"inputDataMethod\":\"Wt. retained\"",
            "\"hydrometerType\":\"151H\"",
            "\"sieveData\"",
            "\"analysisResults\"",
            "\"temperatureData\"",
            "\"exportDate\"",
        ] {
            assert!(json.contains(key), "missing {key}");
        }
    }

    #[test]
    fn test_missing_sections_are_malformed() {
        let no_sieves = r#"{"analysisResults": {}}"#;
        let not_array = r#"{"sieveData": {}, "analysisResults": {}}"#;
        let no_results = r#"{"sieveData": []}"#;
        for content in [no_sieves, not_array, no_results, "[]", "not json"] {
            assert!(matches!(
                parse(content, "bad.gsa"),
                Err(SievekitError::MalformedAnalysisFile { .. })
            ));
        }
    }

    #[test]
    fn test_null_number_is_malformed() {
        let mut value = serde_json::to_value(sample_file()).unwrap();
        value["analysisResults"]["d60"] = Value::Null;
        let content = value.to_string();
        assert!(matches!(
            parse(&content, "nan.gsa"),
            Err(SievekitError::MalformedAnalysisFile { .. })
        ));
    }

    #[test]
    fn test_optional_sections_default() {
        let mut value = serde_json::to_value(sample_file()).unwrap();
        let object = value.as_object_mut().unwrap();
        for key in ["version", "fileInfo", "testMethod", "temperatureData", "exportDate"] {
            object.remove(key);
        }
        let file = parse(&value.to_string(), "minimal.gsa").unwrap();
        assert_eq!(file.version, GSA_VERSION);
        assert_eq!(file.test_method.hydrometer_type, "151H");
        assert!(file.temperature_data.is_none());
        assert_eq!(file.display_name("minimal"), "minimal");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(&dir.path().join("absent.gsa")),
            Err(SievekitError::FileNotFound { .. })
        ));
        assert_eq!(file_stem(Path::new("/data/BH-01.gsa")), "BH-01");
    }
}
