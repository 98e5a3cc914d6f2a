//! # 比重计分析换算
//!
//! 把 (时间, 温度, 比重计读数) 换算为等效粒径和小于该粒径的百分比。
//!
//! ## 算法概述
//! 1. 按温度查水的动力黏度（15–25 °C 整数表，非整数或表外取 20 °C）
//! 2. 由比重计标定公式求有效深度 L = a - b·R
//! 3. Stokes 定律求粒径 d = sqrt(18ηL / ((Gs-1)·g·t))
//! 4. 校正读数 R - Cm - Fz，求未缩放的小于百分比
//! 5. 乘以 No. 200 筛通过率，使比重计曲线与筛分曲线在 0.075 mm 处衔接
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs` 调用
//! - 使用 `models/hydrometer.rs`, `models/sieve.rs`

use crate::models::hydrometer::{HydrometerPoint, TemperatureContext};
use crate::models::sieve::{find_row, GradationRow, SAND_FINES_BOUNDARY_MM};

/// 默认土粒比重
pub const DEFAULT_SPECIFIC_GRAVITY: f64 = 2.65;

/// 重力加速度 (m/s²)
pub const GRAVITY: f64 = 9.81;

/// 表外温度时使用的黏度 (20 °C, Pa·s)
pub const DEFAULT_VISCOSITY: f64 = 0.001002;

/// 水的动力黏度表 (°C, Pa·s)
const VISCOSITY_TABLE: [(i32, f64); 11] = [
    (15, 0.001139),
    (16, 0.001109),
    (17, 0.001081),
    (18, 0.001053),
    (19, 0.001027),
    (20, 0.001002),
    (21, 0.000978),
    (22, 0.000955),
    (23, 0.000933),
    (24, 0.000911),
    (25, 0.00089),
];

/// 比重计型号及标定常数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydrometerModel {
    pub name: &'static str,
    /// 有效深度截距 a (m)
    pub depth_intercept_m: f64,
    /// 有效深度斜率 b (m / 读数单位)
    pub depth_slope_m: f64,
    /// 读数换算常数
    pub constant: f64,
}

/// ASTM 151H 型比重计
pub const HYDROMETER_151H: HydrometerModel = HydrometerModel {
    name: "151H",
    depth_intercept_m: 0.164,
    depth_slope_m: 0.00264,
    constant: 0.013,
};

impl HydrometerModel {
    /// 有效深度 (m)
    pub fn effective_depth(&self, reading: f64) -> f64 {
        self.depth_intercept_m - self.depth_slope_m * reading
    }
}

impl Default for HydrometerModel {
    fn default() -> Self {
        HYDROMETER_151H
    }
}

/// 按温度查水的黏度
///
/// 只有整数度温度才查表；非整数、表外或非有限值返回 20 °C 的值。
pub fn water_viscosity(temperature_c: f64) -> f64 {
    if !temperature_c.is_finite() || temperature_c.fract() != 0.0 {
        return DEFAULT_VISCOSITY;
    }
    let key = temperature_c as i32;
    VISCOSITY_TABLE
        .iter()
        .find(|(t, _)| *t == key)
        .map(|(_, v)| *v)
        .unwrap_or(DEFAULT_VISCOSITY)
}

/// Stokes 定律粒径 (mm)
///
/// 深度或时间非正时返回 0，由曲线组装阶段过滤。
pub fn stokes_diameter_mm(
    viscosity: f64,
    depth_m: f64,
    specific_gravity: f64,
    time_minutes: u32,
) -> f64 {
    let seconds = f64::from(time_minutes) * 60.0;
    let denominator = (specific_gravity - 1.0) * GRAVITY * seconds;
    if depth_m <= 0.0 || denominator <= 0.0 {
        return 0.0;
    }
    (18.0 * viscosity * depth_m / denominator).sqrt() * 1000.0
}

/// 比重计换算器
pub struct HydrometerTranslator {
    model: HydrometerModel,
}

impl HydrometerTranslator {
    pub fn new(model: HydrometerModel) -> Self {
        Self { model }
    }

    /// 计算比重计点，结果按粒径降序
    pub fn translate(
        &self,
        ctx: &TemperatureContext,
        sieve_rows: &[GradationRow],
    ) -> Vec<HydrometerPoint> {
        let viscosity = water_viscosity(ctx.temperature_c);
        let specific_gravity = ctx
            .specific_gravity
            .filter(|gs| *gs > 1.0)
            .unwrap_or(DEFAULT_SPECIFIC_GRAVITY);

        // 比重计只反映已通过 #200 筛的部分
        let scaling = find_row(sieve_rows, SAND_FINES_BOUNDARY_MM)
            .map(|r| r.percent_passing / 100.0)
            .unwrap_or(1.0);

        let mut points: Vec<HydrometerPoint> = ctx
            .readings
            .iter()
            .map(|reading| {
                let depth = self.model.effective_depth(reading.raw_reading);
                let particle_size_mm =
                    stokes_diameter_mm(viscosity, depth, specific_gravity, reading.time_minutes);

                let corrected =
                    reading.raw_reading - ctx.meniscus_correction - ctx.dispersant_correction;
                let unscaled = if ctx.specimen_weight_g > 0.0 {
                    corrected * self.model.constant / ctx.specimen_weight_g * 100.0
                } else {
                    0.0
                };

                HydrometerPoint {
                    time_minutes: reading.time_minutes,
                    particle_size_mm,
                    percent_finer: unscaled * scaling,
                }
            })
            .collect();

        points.sort_by(|a, b| b.particle_size_mm.total_cmp(&a.particle_size_mm));
        points
    }
}

impl Default for HydrometerTranslator {
    fn default() -> Self {
        Self::new(HYDROMETER_151H)
    }
}

/// 使用 151H 比重计计算比重计点
pub fn compute_hydrometer_points(
    ctx: &TemperatureContext,
    sieve_rows: &[GradationRow],
) -> Vec<HydrometerPoint> {
    HydrometerTranslator::default().translate(ctx, sieve_rows)
}
