//! # 级配计算器
//!
//! 将 (孔径, 筛余质量) 列表和试样总质量换算为累计筛余/通过百分比，
//! 并在半对数坐标上插值得到特征粒径 D10/D30/D60 等。
//!
//! ## 算法概述
//! 1. 按孔径降序排序
//! 2. 累加筛余质量，计算分计/累计筛余百分比和通过百分比
//! 3. 在 log10(孔径) - 通过百分比 上线性插值特征粒径
//! 4. 计算不均匀系数 Cu 和曲率系数 Cc
//! 5. 按 No. 4 和 No. 200 筛划分砾石/砂/细料
//!
//! 特征粒径按 .gsa 文件既有的约定取值：D10/D30/D60 分别对应通过百分比 90/70/40，
//! D15/D50/D85 对应 85/50/15。
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `models/sieve.rs`

use crate::models::sieve::{
    find_row, AnalysisResult, GradationRow, SieveMeasurement, GRAVEL_SAND_BOUNDARY_MM,
    SAND_FINES_BOUNDARY_MM,
};

/// 特征粒径对应的目标通过百分比
pub const D10_TARGET: f64 = 90.0;
pub const D15_TARGET: f64 = 85.0;
pub const D30_TARGET: f64 = 70.0;
pub const D50_TARGET: f64 = 50.0;
pub const D60_TARGET: f64 = 40.0;
pub const D85_TARGET: f64 = 15.0;

/// 级配计算输出
#[derive(Debug, Clone, PartialEq)]
pub struct Gradation {
    pub rows: Vec<GradationRow>,
    pub result: AnalysisResult,
}

/// 计算级配
///
/// 调用方负责表单级校验（总质量 > 0、盘中质量 ≥ 4.2 g）。这里只保证在退化
/// 输入下不产生 NaN/Infinity：总质量非正时所有百分比为 0。
pub fn compute_gradation(sieves: &[SieveMeasurement], total_mass_g: f64) -> Gradation {
    let mut sorted: Vec<&SieveMeasurement> = sieves.iter().collect();
    sorted.sort_by(|a, b| b.sieve_size_mm.total_cmp(&a.sieve_size_mm));

    let valid_total = total_mass_g.is_finite() && total_mass_g > 0.0;
    let percent_of_total = |mass: f64| {
        if valid_total {
            mass / total_mass_g * 100.0
        } else {
            0.0
        }
    };

    let mut cumulative_mass = 0.0;
    let rows: Vec<GradationRow> = sorted
        .iter()
        .map(|sieve| {
            cumulative_mass += sieve.mass_retained_g;
            let cumulative_percent_retained = percent_of_total(cumulative_mass);
            let percent_passing = if valid_total {
                (100.0 - cumulative_percent_retained).clamp(0.0, 100.0)
            } else {
                0.0
            };

            GradationRow {
                sieve_size_mm: sieve.sieve_size_mm,
                label: sieve.label.clone(),
                mass_retained_g: sieve.mass_retained_g,
                cumulative_mass_retained_g: cumulative_mass,
                percent_retained: percent_of_total(sieve.mass_retained_g),
                cumulative_percent_retained,
                percent_passing,
            }
        })
        .collect();

    if rows.is_empty() || !valid_total {
        let mut result = AnalysisResult::zeroed();
        result.total_mass_retained_g = cumulative_mass;
        return Gradation { rows, result };
    }

    let d10 = interpolate_diameter(&rows, D10_TARGET);
    let d30 = interpolate_diameter(&rows, D30_TARGET);
    let d60 = interpolate_diameter(&rows, D60_TARGET);

    let uniformity_coefficient = if d10 > 0.0 { d60 / d10 } else { 0.0 };
    let coefficient_of_curvature = if d10 > 0.0 && d60 > 0.0 {
        d30 * d30 / (d10 * d60)
    } else {
        0.0
    };

    let gravel_percent = find_row(&rows, GRAVEL_SAND_BOUNDARY_MM)
        .map(|r| r.cumulative_percent_retained)
        .unwrap_or(0.0);
    let fines_percent = find_row(&rows, SAND_FINES_BOUNDARY_MM)
        .map(|r| r.percent_passing)
        .unwrap_or(100.0);
    let sand_percent = 100.0 - gravel_percent - fines_percent;

    let result = AnalysisResult {
        d10,
        d30,
        d60,
        d15: interpolate_diameter(&rows, D15_TARGET),
        d50: interpolate_diameter(&rows, D50_TARGET),
        d85: interpolate_diameter(&rows, D85_TARGET),
        effective_size: d10,
        uniformity_coefficient,
        coefficient_of_curvature,
        gravel_percent,
        sand_percent,
        fines_percent,
        total_mass_retained_g: cumulative_mass,
        pan_mass_g: total_mass_g - cumulative_mass,
    };

    Gradation { rows, result }
}

/// 在半对数坐标上插值目标通过百分比对应的粒径
///
/// `rows` 须按孔径降序。超出数据范围时取边界孔径，不做外推；
/// 空输入返回 0。
pub fn interpolate_diameter(rows: &[GradationRow], target_percent_passing: f64) -> f64 {
    let (first, last) = match (rows.first(), rows.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return 0.0,
    };

    for pair in rows.windows(2) {
        let (upper, lower) = (&pair[0], &pair[1]);

        if upper.percent_passing >= target_percent_passing
            && lower.percent_passing <= target_percent_passing
        {
            let p1 = upper.percent_passing;
            let p2 = lower.percent_passing;

            if p1 == p2 || p1 == target_percent_passing {
                return upper.sieve_size_mm;
            }
            if p2 == target_percent_passing {
                return lower.sieve_size_mm;
            }

            let log_d1 = upper.sieve_size_mm.log10();
            let log_d2 = lower.sieve_size_mm.log10();
            let log_d = log_d1 + (log_d2 - log_d1) * (p1 - target_percent_passing) / (p1 - p2);
            return 10f64.powf(log_d);
        }
    }

    if target_percent_passing > first.percent_passing {
        first.sieve_size_mm
    } else {
        last.sieve_size_mm
    }
}
