//! # 级配曲线组装
//!
//! 合并筛分点和比重计点为单样品曲线，并把多个样品插值到共享粒径轴上，
//! 供并排比较和表格输出。
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs`, `commands/compare.rs` 调用
//! - 使用 `models/curve.rs`, `models/sieve.rs`, `models/hydrometer.rs`

use crate::models::curve::{AlignedRow, AlignedTable, ChartPoint, SampleCurve, SourceKind};
use crate::models::hydrometer::HydrometerPoint;
use crate::models::sieve::{GradationRow, SAND_FINES_BOUNDARY_MM};

/// 绘图粒径下限 (mm)
pub const MIN_PARTICLE_SIZE_MM: f64 = 0.001;

/// 绘图粒径上限 (mm)
pub const MAX_PARTICLE_SIZE_MM: f64 = 100.0;

/// 粒径相等判定容差 (mm)
pub const SIZE_MATCH_TOLERANCE_MM: f64 = 0.0001;

/// 共享轴上始终包含的标准参考粒径 (mm)
pub const STANDARD_REFERENCE_SIZES: [f64; 21] = [
    100.0, 75.0, 50.0, 37.5, 25.0, 19.0, 12.5, 9.5, 4.75, 2.36, 1.18, 0.6, 0.3, 0.15, 0.075, 0.05,
    0.02, 0.01, 0.005, 0.002, 0.001,
];

/// 一次对比的最大样品数
pub const MAX_COMPARE_SAMPLES: usize = 10;

fn in_domain(size: f64) -> bool {
    (MIN_PARTICLE_SIZE_MM..=MAX_PARTICLE_SIZE_MM).contains(&size)
}

/// 组装单样品曲线（粒径降序）
///
/// 筛孔与比重计粒径重合时两点都保留，以来源区分。
pub fn assemble_curve(
    sieve_rows: &[GradationRow],
    hydrometer: Option<&[HydrometerPoint]>,
) -> Vec<ChartPoint> {
    let sieve_points = sieve_rows
        .iter()
        .filter(|r| r.sieve_size_mm > 0.0)
        .map(|r| ChartPoint {
            particle_size_mm: r.sieve_size_mm,
            percent_passing: r.percent_passing,
            source: SourceKind::Sieve,
        });

    let hydrometer_points = hydrometer
        .unwrap_or_default()
        .iter()
        .filter(|p| p.particle_size_mm > 0.0)
        .map(|p| ChartPoint {
            particle_size_mm: p.particle_size_mm,
            percent_passing: p.percent_finer,
            source: SourceKind::Hydrometer,
        });

    let mut points: Vec<ChartPoint> = sieve_points
        .chain(hydrometer_points)
        .filter(|p| in_domain(p.particle_size_mm))
        .collect();

    points.sort_by(|a, b| b.particle_size_mm.total_cmp(&a.particle_size_mm));
    points
}

/// 在样品曲线上按 log10(粒径) 线性插值通过百分比
///
/// `points` 须按粒径降序。超出样品数据范围时返回最近端点值；空曲线返回 None。
pub fn interpolate_percent_passing(points: &[ChartPoint], target_size_mm: f64) -> Option<f64> {
    if points.is_empty() {
        return None;
    }

    if let Some(exact) = points
        .iter()
        .find(|p| (p.particle_size_mm - target_size_mm).abs() < SIZE_MATCH_TOLERANCE_MM)
    {
        return Some(exact.percent_passing);
    }

    // 最后一个大于目标的点与第一个不大于目标的点
    let split = points
        .iter()
        .position(|p| p.particle_size_mm <= target_size_mm)
        .unwrap_or(points.len());
    let upper = split.checked_sub(1).map(|i| &points[i]);
    let lower = points.get(split);

    match (upper, lower) {
        (None, Some(lower)) => Some(lower.percent_passing),
        (Some(upper), None) => Some(upper.percent_passing),
        (Some(upper), Some(lower)) => {
            let log_target = target_size_mm.log10();
            let log_upper = upper.particle_size_mm.log10();
            let log_lower = lower.particle_size_mm.log10();

            if log_upper == log_lower {
                return Some(upper.percent_passing);
            }

            let ratio = (log_target - log_upper) / (log_lower - log_upper);
            Some(upper.percent_passing + ratio * (lower.percent_passing - upper.percent_passing))
        }
        (None, None) => None,
    }
}

/// 构造共享粒径轴：所有样品粒径与标准参考粒径的并集，限制在绘图范围内，降序
pub fn shared_axis(samples: &[SampleCurve]) -> Vec<f64> {
    let mut sizes: Vec<f64> = samples
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.particle_size_mm))
        .chain(STANDARD_REFERENCE_SIZES)
        .filter(|size| in_domain(*size))
        .collect();

    sizes.sort_by(|a, b| b.total_cmp(a));
    sizes.dedup_by(|a, b| (*a - *b).abs() < SIZE_MATCH_TOLERANCE_MM);
    sizes
}

/// 样品在共享轴某粒径处的取值
///
/// 没有比重计点的样品在 0.075 mm 以下没有覆盖，返回 None；其余位置按
/// `interpolate_percent_passing` 取值（超出范围取端点值）。
fn aligned_value(points: &[ChartPoint], size: f64) -> Option<f64> {
    let has_hydrometer = points.iter().any(|p| p.source == SourceKind::Hydrometer);
    if !has_hydrometer && size < SAND_FINES_BOUNDARY_MM - SIZE_MATCH_TOLERANCE_MM {
        return None;
    }
    interpolate_percent_passing(points, size)
}

/// 把多个样品对齐到共享粒径轴
pub fn align_samples(samples: &[SampleCurve]) -> AlignedTable {
    let sorted: Vec<Vec<ChartPoint>> = samples
        .iter()
        .map(|s| {
            let mut points = s.points.clone();
            points.sort_by(|a, b| b.particle_size_mm.total_cmp(&a.particle_size_mm));
            points
        })
        .collect();

    let rows = shared_axis(samples)
        .into_iter()
        .map(|size| AlignedRow {
            particle_size_mm: size,
            values: sorted
                .iter()
                .map(|points| aligned_value(points, size))
                .collect(),
        })
        .collect();

    AlignedTable {
        sample_ids: samples.iter().map(|s| s.id.clone()).collect(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sieve(size: f64, passing: f64) -> ChartPoint {
        ChartPoint {
            particle_size_mm: size,
            percent_passing: passing,
            source: SourceKind::Sieve,
        }
    }

    fn grad_row(size: f64, passing: f64) -> GradationRow {
        GradationRow {
            sieve_size_mm: size,
            label: String::new(),
            mass_retained_g: 0.0,
            cumulative_mass_retained_g: 0.0,
            percent_retained: 0.0,
            cumulative_percent_retained: 100.0 - passing,
            percent_passing: passing,
        }
    }

    #[test]
    fn test_assemble_merges_and_sorts() {
        let rows = vec![grad_row(0.075, 10.0), grad_row(4.75, 80.0), grad_row(0.0, 0.0)];
        let hydro = vec![
            HydrometerPoint {
                time_minutes: 2,
                particle_size_mm: 0.075,
                percent_finer: 9.0,
            },
            HydrometerPoint {
                time_minutes: 250,
                particle_size_mm: 0.0005,
                percent_finer: 1.0,
            },
            HydrometerPoint {
                time_minutes: 60,
                particle_size_mm: 0.01,
                percent_finer: 4.0,
            },
        ];
        let curve = assemble_curve(&rows, Some(hydro.as_slice()));

        // 0 mm 筛与 0.0005 mm 点被过滤，0.075 处两个来源都保留
        assert_eq!(curve.len(), 4);
        assert_eq!(curve[0].particle_size_mm, 4.75);
        let at_no200: Vec<SourceKind> = curve
            .iter()
            .filter(|p| p.particle_size_mm == 0.075)
            .map(|p| p.source)
            .collect();
        assert_eq!(at_no200.len(), 2);
        assert!(at_no200.contains(&SourceKind::Hydrometer));
        assert_eq!(curve[3].particle_size_mm, 0.01);
    }

    #[test]
    fn test_assemble_without_hydrometer() {
        let rows = vec![grad_row(0.075, 10.0), grad_row(150.0, 100.0)];
        let curve = assemble_curve(&rows, None);
        assert_eq!(curve.len(), 1);
        assert_eq!(curve[0].source, SourceKind::Sieve);
    }

    #[test]
    fn test_interpolate_exact_bracket_and_boundaries() {
        let points = vec![sieve(10.0, 100.0), sieve(1.0, 60.0), sieve(0.1, 20.0)];

        assert_eq!(interpolate_percent_passing(&points, 1.00005), Some(60.0));
        assert_relative_eq!(
            interpolate_percent_passing(&points, 10f64.powf(0.5)).unwrap(),
            80.0,
            epsilon = 1e-9
        );
        assert_eq!(interpolate_percent_passing(&points, 50.0), Some(100.0));
        assert_eq!(interpolate_percent_passing(&points, 0.01), Some(20.0));
        assert_eq!(interpolate_percent_passing(&[], 1.0), None);
    }

    #[test]
    fn test_shared_axis_contains_reference_sizes() {
        let samples = vec![SampleCurve::new("A", vec![sieve(9.525, 90.0), sieve(0.075, 5.0)])];
        let axis = shared_axis(&samples);
        assert!(axis.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(axis.first(), Some(&100.0));
        assert_eq!(axis.last(), Some(&0.001));
        assert!(axis.contains(&9.525));
        // 0.075 只出现一次
        assert_eq!(axis.iter().filter(|s| (**s - 0.075).abs() < 1e-9).count(), 1);
    }

    #[test]
    fn test_alignment_sieve_only_sample_has_no_fines_values() {
        let hydro = SampleCurve::new(
            "H",
            vec![
                sieve(2.0, 95.0),
                sieve(0.075, 45.0),
                ChartPoint {
                    particle_size_mm: 0.02,
                    percent_passing: 20.0,
                    source: SourceKind::Hydrometer,
                },
            ],
        );
        let sieve_only = SampleCurve::new("S", vec![sieve(2.0, 90.0), sieve(0.075, 12.0)]);
        let table = align_samples(&[hydro, sieve_only]);

        let at = |size: f64| {
            table
                .rows
                .iter()
                .find(|r| (r.particle_size_mm - size).abs() < 1e-9)
                .unwrap()
        };
        assert_eq!(at(0.02).values, vec![Some(20.0), None]);
        assert_eq!(at(0.005).values[1], None);
        assert_eq!(at(0.075).values, vec![Some(45.0), Some(12.0)]);
    }

    #[test]
    fn test_alignment_with_missing_sample_data() {
        let with_hydro = SampleCurve::new(
            "S1",
            vec![
                sieve(4.75, 90.0),
                sieve(0.075, 30.0),
                ChartPoint {
                    particle_size_mm: 0.005,
                    percent_passing: 8.0,
                    source: SourceKind::Hydrometer,
                },
            ],
        );
        let empty = SampleCurve::new("S2", vec![]);
        let table = align_samples(&[with_hydro, empty]);

        assert_eq!(table.sample_ids, vec!["S1".to_string(), "S2".to_string()]);
        let fine_rows: Vec<&AlignedRow> = table
            .rows
            .iter()
            .filter(|r| r.particle_size_mm < 0.075 && r.particle_size_mm >= 0.005)
            .collect();
        assert!(!fine_rows.is_empty());
        for row in fine_rows {
            assert!(row.values[0].is_some());
            assert_eq!(row.values[1], None);
        }
    }

    #[test]
    fn test_alignment_values_follow_each_sample() {
        let a = SampleCurve::new("A", vec![sieve(4.75, 80.0), sieve(0.075, 10.0)]);
        let b = SampleCurve::new("B", vec![sieve(0.075, 40.0), sieve(2.0, 70.0)]);
        let table = align_samples(&[a, b]);

        let idx = table
            .rows
            .iter()
            .position(|r| r.particle_size_mm == 0.075)
            .unwrap();
        assert_eq!(table.value(idx, "A"), Some(10.0));
        assert_eq!(table.value(idx, "B"), Some(40.0));

        // B 的数据范围之上取其最大粒径处的值
        let top = table.rows.first().unwrap();
        assert_eq!(top.values[1], Some(70.0));
        // A 只有筛分数据，0.075 mm 以下没有数据
        assert_eq!(table.rows.last().unwrap().values[0], None);
    }

    #[test]
    fn test_alignment_hydrometer_sample_clamps_below_finest_point() {
        let curve = SampleCurve::new(
            "H",
            vec![
                sieve(2.0, 95.0),
                sieve(0.075, 45.0),
                ChartPoint {
                    particle_size_mm: 0.0015,
                    percent_passing: 3.0,
                    source: SourceKind::Hydrometer,
                },
            ],
        );
        let coarse_only = SampleCurve::new("C", vec![sieve(4.75, 60.0), sieve(0.425, 20.0)]);
        let table = align_samples(&[curve, coarse_only]);

        let last = table.rows.last().unwrap();
        assert_eq!(last.particle_size_mm, 0.001);
        assert_eq!(last.values[0], Some(3.0));
        assert_eq!(last.values[1], None);

        // 筛分样品在 0.075 mm 以上、最细筛孔以下取端点值
        let idx = table
            .rows
            .iter()
            .position(|r| r.particle_size_mm == 0.15)
            .unwrap();
        assert_eq!(table.value(idx, "C"), Some(20.0));
    }
}
