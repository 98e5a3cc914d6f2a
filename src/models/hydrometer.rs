//! # 比重计数据模型
//!
//! 比重计读数、试验温度条件以及由 Stokes 定律换算得到的粒径点。
//!
//! ## 依赖关系
//! - 被 `gradation/hydrometer.rs`, `gradation/curve.rs` 使用
//! - 被 `parsers/gsa.rs` 序列化

use crate::models::sieve::AnalysisResult;

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// 读数时间表（分钟）
pub const HYDROMETER_SCHEDULE: [u32; 6] = [2, 5, 15, 30, 60, 250];

/// 实验室默认温度 (°C)
pub const DEFAULT_TEMPERATURE_C: f64 = 22.0;

/// 默认弯液面校正 Cm
pub const DEFAULT_MENISCUS_CORRECTION: f64 = 0.5;

/// 默认分散剂校正 Fz
pub const DEFAULT_DISPERSANT_CORRECTION: f64 = 4.0;

/// 单次比重计读数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrometerReading {
    pub time_minutes: u32,
    pub raw_reading: f64,
}

impl HydrometerReading {
    pub fn new(time_minutes: u32, raw_reading: f64) -> Self {
        Self {
            time_minutes,
            raw_reading,
        }
    }
}

/// 比重计试验条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureContext {
    /// 通过 #200 筛的试样质量 (g)
    #[serde(rename = "specimenWeight")]
    pub specimen_weight_g: f64,
    #[serde(rename = "temperature")]
    pub temperature_c: f64,
    pub meniscus_correction: f64,
    pub dispersant_correction: f64,
    /// 试样比重；缺省时使用 2.65
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_gravity: Option<f64>,
    #[serde(
        rename = "hydrometerReadings",
        default,
        deserialize_with = "deserialize_readings"
    )]
    pub readings: Vec<HydrometerReading>,
}

impl TemperatureContext {
    /// 由级配结果构造：试样质量 = 细料百分比 × 总质量
    pub fn from_analysis(
        result: &AnalysisResult,
        total_mass_g: f64,
        temperature_c: f64,
        meniscus_correction: f64,
        dispersant_correction: f64,
        readings: Vec<HydrometerReading>,
    ) -> Self {
        Self {
            specimen_weight_g: result.fines_percent / 100.0 * total_mass_g,
            temperature_c,
            meniscus_correction,
            dispersant_correction,
            specific_gravity: None,
            readings,
        }
    }

    pub fn with_specific_gravity(mut self, gs: Option<f64>) -> Self {
        self.specific_gravity = gs;
        self
    }
}

/// 读数既可以是列表，也可以是旧文件中的 `{"分钟": 读数}` 映射
#[derive(Deserialize)]
#[serde(untagged)]
enum ReadingsRepr {
    List(Vec<HydrometerReading>),
    Map(BTreeMap<String, f64>),
}

fn deserialize_readings<'de, D>(deserializer: D) -> Result<Vec<HydrometerReading>, D::Error>
where
    D: Deserializer<'de>,
{
    match ReadingsRepr::deserialize(deserializer)? {
        ReadingsRepr::List(list) => Ok(list),
        ReadingsRepr::Map(map) => {
            let mut readings = map
                .into_iter()
                .map(|(time, reading)| {
                    time.trim()
                        .parse::<u32>()
                        .map(|t| HydrometerReading::new(t, reading))
                        .map_err(|_| {
                            serde::de::Error::custom(format!("invalid reading time '{}'", time))
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            readings.sort_by_key(|r| r.time_minutes);
            Ok(readings)
        }
    }
}

/// 比重计换算得到的粒径点（按需计算，不单独持久化）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrometerPoint {
    pub time_minutes: u32,
    #[serde(rename = "particleSize")]
    pub particle_size_mm: f64,
    pub percent_finer: f64,
}
