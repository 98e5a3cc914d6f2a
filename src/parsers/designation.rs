//! # 筛号解析
//!
//! 把筛的标称名称换算为孔径 (mm)。
//!
//! ## 支持的写法
//! ```text
//! No. 200 / No.200 / #200      # 美标筛号
//! 3/8 in. / 3/8" / 3/4 inch    # 英寸分数
//! 1 in. / 1" / 1 1/2 in.       # 英寸整数或带分数
//! 0.075 / 0.075 mm             # 直接给出毫米
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/measurements.rs` 使用
//! - 使用 `regex` crate

use crate::error::{Result, SievekitError};

use regex::Regex;

/// 每英寸毫米数
pub const MM_PER_INCH: f64 = 25.4;

/// 美标筛号对应孔径 (mm)
const MESH_SIZES: [(u32, f64); 17] = [
    (4, 4.75),
    (6, 3.35),
    (8, 2.36),
    (10, 2.0),
    (12, 1.7),
    (16, 1.18),
    (20, 0.85),
    (30, 0.6),
    (40, 0.425),
    (50, 0.3),
    (60, 0.25),
    (80, 0.18),
    (100, 0.15),
    (140, 0.106),
    (170, 0.09),
    (200, 0.075),
    (270, 0.053),
];

/// 筛号解析器（正则只编译一次）
pub struct DesignationParser {
    mesh: Regex,
    inch: Regex,
    millimetre: Regex,
}

impl DesignationParser {
    pub fn new() -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| SievekitError::Other(format!("Invalid designation pattern: {}", e)))
        };
        Ok(Self {
            mesh: compile(r"(?i)^(?:no\.?\s*|#\s*)(\d+)$")?,
            inch: compile(r#"(?i)^(?:(\d+)\s+)?(\d+)(?:\s*/\s*(\d+))?\s*(?:in\.?|inch(?:es)?|")$"#)?,
            millimetre: compile(r"(?i)^(\d+(?:\.\d+)?)\s*(?:mm)?$")?,
        })
    }

    /// 解析筛号，返回孔径 (mm)
    pub fn parse(&self, designation: &str) -> Result<f64> {
        let text = designation.trim();
        let unknown = || SievekitError::UnknownSieve(designation.to_string());

        if let Some(caps) = self.mesh.captures(text) {
            let number: u32 = caps[1].parse().map_err(|_| unknown())?;
            return MESH_SIZES
                .iter()
                .find(|(n, _)| *n == number)
                .map(|(_, mm)| *mm)
                .ok_or_else(unknown);
        }

        if let Some(caps) = self.inch.captures(text) {
            let whole: f64 = match caps.get(1) {
                Some(m) => m.as_str().parse().map_err(|_| unknown())?,
                None => 0.0,
            };
            let numerator: f64 = caps[2].parse().map_err(|_| unknown())?;
            let inches = match caps.get(3) {
                Some(m) => {
                    let denominator: f64 = m.as_str().parse().map_err(|_| unknown())?;
                    if denominator == 0.0 {
                        return Err(unknown());
                    }
                    whole + numerator / denominator
                }
                // "1 2 in." 这种写法没有意义
                None if caps.get(1).is_some() => return Err(unknown()),
                None => numerator,
            };
            if inches <= 0.0 {
                return Err(unknown());
            }
            return Ok(inches * MM_PER_INCH);
        }

        if let Some(caps) = self.millimetre.captures(text) {
            let mm: f64 = caps[1].parse().map_err(|_| unknown())?;
            if mm > 0.0 {
                return Ok(mm);
            }
        }

        Err(unknown())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mesh_numbers() {
        let parser = DesignationParser::new().unwrap();
        assert_eq!(parser.parse("No. 200").unwrap(), 0.075);
        assert_eq!(parser.parse("No.4").unwrap(), 4.75);
        assert_eq!(parser.parse("#40").unwrap(), 0.425);
        assert_eq!(parser.parse("  no. 10 ").unwrap(), 2.0);
    }

    #[test]
    fn test_inch_sizes() {
        let parser = DesignationParser::new().unwrap();
        assert_relative_eq!(parser.parse("3/8 in.").unwrap(), 9.525, epsilon = 1e-9);
        assert_relative_eq!(parser.parse("3/4\"").unwrap(), 19.05, epsilon = 1e-9);
        assert_relative_eq!(parser.parse("1\"").unwrap(), 25.4, epsilon = 1e-9);
        assert_relative_eq!(parser.parse("1 in.").unwrap(), 25.4, epsilon = 1e-9);
        assert_relative_eq!(parser.parse("1 1/2 in.").unwrap(), 38.1, epsilon = 1e-9);
    }

    #[test]
    fn test_plain_millimetres() {
        let parser = DesignationParser::new().unwrap();
        assert_eq!(parser.parse("0.075").unwrap(), 0.075);
        assert_eq!(parser.parse("2 mm").unwrap(), 2.0);
    }

    #[test]
    fn test_unknown_designations() {
        let parser = DesignationParser::new().unwrap();
        for label in ["No. 7", "#", "pan", "3/0 in.", "0", "1 2 in.", ""] {
            assert!(
                matches!(parser.parse(label), Err(SievekitError::UnknownSieve(_))),
                "{label} should be rejected"
            );
        }
    }

    #[test]
    fn test_standard_labels_resolve() {
        use crate::models::sieve::STANDARD_SIEVES;
        let parser = DesignationParser::new().unwrap();
        for (size, label) in STANDARD_SIEVES {
            assert_relative_eq!(parser.parse(label).unwrap(), size, epsilon = 1e-3);
        }
    }
}
