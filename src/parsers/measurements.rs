//! # 测量数据输入 (CSV)
//!
//! 读取筛分和比重计原始数据，并做表单级校验。
//!
//! ## 文件格式
//! ```text
//! # 筛分
//! sieve_size_mm,label,mass_retained_g
//! 4.75,No. 4,120.5
//! ,No. 200,48.0          # 孔径留空时由筛号推出
//!
//! # 比重计
//! time_min,reading
//! 2,42.5
//! 5,38.0
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs` 调用
//! - 使用 `parsers/designation.rs`, `models/sieve.rs`, `models/hydrometer.rs`
//! - 使用 `csv`, `serde`

use super::designation::DesignationParser;
use crate::error::{Result, SievekitError};
use crate::models::hydrometer::{HydrometerReading, HYDROMETER_SCHEDULE};
use crate::models::sieve::{SieveMeasurement, SIEVE_SIZE_TOLERANCE_MM, STANDARD_SIEVES};

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 盘中最少应保留的质量 (g)
pub const DEFAULT_MIN_PAN_MASS_G: f64 = 4.2;

#[derive(Debug, Deserialize)]
struct SieveRecord {
    sieve_size_mm: Option<f64>,
    #[serde(default)]
    label: String,
    mass_retained_g: f64,
}

#[derive(Debug, Deserialize)]
struct HydrometerRecord {
    time_min: u32,
    reading: f64,
}

fn open(path: &Path) -> Result<File> {
    if !path.exists() {
        return Err(SievekitError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    File::open(path).map_err(|e| SievekitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader)
}

fn parse_error(source: &str, reason: String) -> SievekitError {
    SievekitError::ParseError {
        format: "csv".to_string(),
        path: source.to_string(),
        reason,
    }
}

/// 读取筛分 CSV 文件
pub fn read_sieve_csv(path: &Path) -> Result<Vec<SieveMeasurement>> {
    let file = open(path)?;
    parse_sieve_csv(file, &path.display().to_string())
}

/// 从任意输入流解析筛分数据
pub fn parse_sieve_csv<R: Read>(reader: R, source: &str) -> Result<Vec<SieveMeasurement>> {
    let designations = DesignationParser::new()?;
    let mut sieves = Vec::new();

    for (index, record) in csv_reader(reader).deserialize::<SieveRecord>().enumerate() {
        let record = record?;
        let line = index + 2;

        let size = match record.sieve_size_mm {
            Some(size) => size,
            None if !record.label.is_empty() => designations.parse(&record.label)?,
            None => {
                return Err(parse_error(
                    source,
                    format!("Line {}: sieve size and label are both empty", line),
                ))
            }
        };
        if !size.is_finite() || size <= 0.0 {
            return Err(parse_error(
                source,
                format!("Line {}: invalid sieve size {}", line, size),
            ));
        }

        let label = if record.label.is_empty() {
            standard_label(size)
        } else {
            record.label
        };
        sieves.push(SieveMeasurement::new(size, label, record.mass_retained_g));
    }

    if sieves.is_empty() {
        return Err(parse_error(source, "No sieve rows found".to_string()));
    }
    Ok(sieves)
}

/// 标准筛名称，非标准孔径写成 "x mm"
fn standard_label(size_mm: f64) -> String {
    STANDARD_SIEVES
        .iter()
        .find(|(s, _)| (s - size_mm).abs() < SIEVE_SIZE_TOLERANCE_MM)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| format!("{} mm", size_mm))
}

/// 读取比重计 CSV 文件
pub fn read_hydrometer_csv(path: &Path) -> Result<Vec<HydrometerReading>> {
    let file = open(path)?;
    parse_hydrometer_csv(file, &path.display().to_string())
}

/// 从任意输入流解析比重计读数，结果按时间升序
pub fn parse_hydrometer_csv<R: Read>(reader: R, source: &str) -> Result<Vec<HydrometerReading>> {
    let mut readings: Vec<HydrometerReading> = Vec::new();

    for (index, record) in csv_reader(reader)
        .deserialize::<HydrometerRecord>()
        .enumerate()
    {
        let record = record?;
        let line = index + 2;

        if !HYDROMETER_SCHEDULE.contains(&record.time_min) {
            return Err(parse_error(
                source,
                format!(
                    "Line {}: time {} min is not in the reading schedule {:?}",
                    line, record.time_min, HYDROMETER_SCHEDULE
                ),
            ));
        }
        if readings.iter().any(|r| r.time_minutes == record.time_min) {
            return Err(parse_error(
                source,
                format!("Line {}: duplicate reading at {} min", line, record.time_min),
            ));
        }
        if !record.reading.is_finite() {
            return Err(parse_error(
                source,
                format!("Line {}: reading must be a finite number", line),
            ));
        }
        readings.push(HydrometerReading::new(record.time_min, record.reading));
    }

    readings.sort_by_key(|r| r.time_minutes);
    Ok(readings)
}

/// 表单级校验
///
/// 总质量为正、筛余质量有限且非负、孔径不重复、盘中质量不少于 `min_pan_mass_g`。
/// 计算核心本身接受任意输入，这里的检查只在提交测量数据时进行。
pub fn validate_input(
    sieves: &[SieveMeasurement],
    total_mass_g: f64,
    min_pan_mass_g: f64,
) -> Result<()> {
    if !total_mass_g.is_finite() || total_mass_g <= 0.0 {
        return Err(SievekitError::ValidationError(format!(
            "Total mass must be a positive number (got {})",
            total_mass_g
        )));
    }

    for sieve in sieves {
        if !sieve.mass_retained_g.is_finite() || sieve.mass_retained_g < 0.0 {
            return Err(SievekitError::ValidationError(format!(
                "Mass retained on {} must be a non-negative number (got {})",
                sieve.label, sieve.mass_retained_g
            )));
        }
    }

    for (i, a) in sieves.iter().enumerate() {
        if let Some(b) = sieves[i + 1..]
            .iter()
            .find(|b| (a.sieve_size_mm - b.sieve_size_mm).abs() < SIEVE_SIZE_TOLERANCE_MM)
        {
            return Err(SievekitError::ValidationError(format!(
                "Duplicate sieve size {} mm ({} and {})",
                a.sieve_size_mm, a.label, b.label
            )));
        }
    }

    let retained: f64 = sieves.iter().map(|s| s.mass_retained_g).sum();
    let pan_mass = total_mass_g - retained;
    if pan_mass < min_pan_mass_g {
        return Err(SievekitError::ValidationError(format!(
            "Pan mass {:.2} g is below the minimum of {:.2} g (total {:.2} g, retained {:.2} g)",
            pan_mass, min_pan_mass_g, total_mass_g, retained
        )));
    }

    Ok(())
}
