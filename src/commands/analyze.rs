//! # analyze 子命令实现
//!
//! 由筛分 (及比重计) 测量数据计算级配、特征粒径和土壤分类。
//!
//! ## 功能
//! - 读取并校验筛分 CSV
//! - 级配表与特征粒径
//! - 可选比重计换算并与筛分曲线衔接
//! - USCS/AASHTO 分类报告
//! - 可选保存为 `.gsa` 分析文件
//!
//! ## 依赖关系
//! - 使用 `cli/analyze.rs` 定义的参数
//! - 使用 `parsers/measurements.rs`, `parsers/gsa.rs`
//! - 使用 `gradation/`, `classify/`
//! - 使用 `utils/output.rs`

use super::classify::{print_report, print_sample_info};
use crate::classify::ClassificationReport;
use crate::cli::analyze::AnalyzeArgs;
use crate::error::{Result, SievekitError};
use crate::gradation::{assemble_curve, compute_gradation, compute_hydrometer_points};
use crate::models::sieve::fill_standard_sieves;
use crate::models::{
    AnalysisFile, AnalysisResult, ChartPoint, GradationRow, HydrometerPoint, SampleInfo,
    TemperatureContext,
};
use crate::parsers::{gsa, measurements};
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 级配表行
#[derive(Debug, Clone, Tabled)]
struct GradationTableRow {
    #[tabled(rename = "Sieve")]
    label: String,
    #[tabled(rename = "Size (mm)")]
    size: String,
    #[tabled(rename = "Retained (g)")]
    retained: String,
    #[tabled(rename = "Cum. Retained (g)")]
    cumulative: String,
    #[tabled(rename = "% Retained")]
    percent_retained: String,
    #[tabled(rename = "Cum. % Retained")]
    cumulative_percent: String,
    #[tabled(rename = "% Passing")]
    passing: String,
}

impl From<&GradationRow> for GradationTableRow {
    fn from(row: &GradationRow) -> Self {
        Self {
            label: row.label.clone(),
            size: format!("{:.3}", row.sieve_size_mm),
            retained: format!("{:.2}", row.mass_retained_g),
            cumulative: format!("{:.2}", row.cumulative_mass_retained_g),
            percent_retained: format!("{:.2}", row.percent_retained),
            cumulative_percent: format!("{:.2}", row.cumulative_percent_retained),
            passing: format!("{:.2}", row.percent_passing),
        }
    }
}

/// 比重计表行
#[derive(Debug, Clone, Tabled)]
struct HydrometerTableRow {
    #[tabled(rename = "Time (min)")]
    time: u32,
    #[tabled(rename = "Particle Size (mm)")]
    size: String,
    #[tabled(rename = "% Finer")]
    finer: String,
}

/// 曲线点表行
#[derive(Debug, Clone, Tabled)]
struct CurveTableRow {
    #[tabled(rename = "Particle Size (mm)")]
    size: String,
    #[tabled(rename = "% Passing")]
    passing: String,
    #[tabled(rename = "Source")]
    source: String,
}

/// 执行 analyze
pub fn execute(args: AnalyzeArgs) -> Result<()> {
    output::print_header("Grain-Size Analysis");
    check_arguments(&args)?;

    // 筛分
    let mut sieves = measurements::read_sieve_csv(&args.sieve_csv)?;
    output::print_info(&format!(
        "Read {} sieves from '{}'",
        sieves.len(),
        args.sieve_csv.display()
    ));
    if args.standard_stack {
        let measured = sieves.len();
        sieves = fill_standard_sieves(&sieves);
        if sieves.len() > measured {
            output::print_info(&format!(
                "Added {} standard sieves with zero mass",
                sieves.len() - measured
            ));
        }
    }
    measurements::validate_input(&sieves, args.total_mass, args.min_pan_mass)?;

    let gradation = compute_gradation(&sieves, args.total_mass);

    output::print_header("Sieve Analysis");
    let rows: Vec<GradationTableRow> = gradation.rows.iter().map(Into::into).collect();
    println!("{}", Table::new(&rows));
    println!();
    print_parameters(&gradation.result);

    // 比重计
    let temperature = match &args.hydrometer {
        Some(path) => {
            let readings = measurements::read_hydrometer_csv(path)?;
            output::print_info(&format!(
                "Read {} hydrometer readings from '{}'",
                readings.len(),
                path.display()
            ));
            let ctx = TemperatureContext::from_analysis(
                &gradation.result,
                args.total_mass,
                args.temperature,
                args.meniscus,
                args.dispersant,
                readings,
            )
            .with_specific_gravity(args.specific_gravity);
            Some(ctx)
        }
        None => None,
    };

    let hydrometer_points: Option<Vec<HydrometerPoint>> = temperature.as_ref().map(|ctx| {
        if ctx.specimen_weight_g <= 0.0 {
            output::print_warning("No material passed the No. 200 sieve; hydrometer results are zero");
        }
        compute_hydrometer_points(ctx, &gradation.rows)
    });

    if let Some(points) = &hydrometer_points {
        output::print_header("Hydrometer Analysis");
        let rows: Vec<HydrometerTableRow> = points
            .iter()
            .map(|p| HydrometerTableRow {
                time: p.time_minutes,
                size: format!("{:.5}", p.particle_size_mm),
                finer: format!("{:.2}", p.percent_finer),
            })
            .collect();
        println!("{}", Table::new(&rows));
    }

    // 曲线
    let curve = assemble_curve(&gradation.rows, hydrometer_points.as_deref());
    output::print_header("Grain-Size Curve");
    print_curve(&curve);

    // 分类
    let info = sample_info(&args);
    output::print_header("Soil Classification");
    print_sample_info(&info);
    print_report(&ClassificationReport::from_results(&gradation.result));

    if let Some(path) = &args.save {
        let file = AnalysisFile::new(info, gradation.rows, gradation.result, temperature);
        save_analysis(path, &file, args.overwrite)?;
        output::print_success(&format!("Analysis saved to '{}'", path.display()));
    }

    output::print_done("Analysis complete");
    Ok(())
}

/// 检查数值参数
fn check_arguments(args: &AnalyzeArgs) -> Result<()> {
    if let Some(gs) = args.specific_gravity {
        if !gs.is_finite() || gs <= 1.0 {
            return Err(SievekitError::InvalidArgument(format!(
                "Specific gravity must be greater than 1 (got {})",
                gs
            )));
        }
    }
    if !args.temperature.is_finite() {
        return Err(SievekitError::InvalidArgument(
            "Temperature must be a finite number".to_string(),
        ));
    }
    if !args.min_pan_mass.is_finite() || args.min_pan_mass < 0.0 {
        return Err(SievekitError::InvalidArgument(format!(
            "Minimum pan mass must be non-negative (got {})",
            args.min_pan_mass
        )));
    }
    for (name, value) in [
        ("Liquid limit", args.liquid_limit),
        ("Plastic limit", args.plastic_limit),
    ] {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(SievekitError::InvalidArgument(format!(
                    "{} must be non-negative (got {})",
                    name, v
                )));
            }
        }
    }
    Ok(())
}

/// 打印特征粒径与粒组含量
fn print_parameters(result: &AnalysisResult) {
    let diameters = [
        ("D85", result.d85),
        ("D60", result.d60),
        ("D50", result.d50),
        ("D30", result.d30),
        ("D15", result.d15),
        ("D10 (effective size)", result.d10),
    ];
    for (key, value) in diameters {
        output::print_key_value(key, &format!("{:.4} mm", value));
    }
    output::print_key_value(
        "Uniformity coefficient (Cu)",
        &format!("{:.2}", result.uniformity_coefficient),
    );
    output::print_key_value(
        "Coefficient of curvature (Cc)",
        &format!("{:.2}", result.coefficient_of_curvature),
    );
    output::print_key_value("Gravel", &format!("{:.1}%", result.gravel_percent));
    output::print_key_value("Sand", &format!("{:.1}%", result.sand_percent));
    output::print_key_value("Fines", &format!("{:.1}%", result.fines_percent));
    output::print_key_value(
        "Pan mass",
        &format!(
            "{:.2} g ({:.1}% of retained)",
            result.pan_mass_g,
            result.pan_percent_of_retained()
        ),
    );
}

fn print_curve(curve: &[ChartPoint]) {
    if curve.is_empty() {
        output::print_warning("No points inside the 0.001-100 mm plotting range");
        return;
    }
    let rows: Vec<CurveTableRow> = curve
        .iter()
        .map(|p| CurveTableRow {
            size: format!("{:.5}", p.particle_size_mm),
            passing: format!("{:.2}", p.percent_passing),
            source: p.source.to_string(),
        })
        .collect();
    println!("{}", Table::new(&rows));
}

/// 由参数组装样品信息
fn sample_info(args: &AnalyzeArgs) -> SampleInfo {
    let file_name = args
        .file_name
        .clone()
        .unwrap_or_else(|| gsa::file_stem(&args.sieve_csv));
    let test_date = args
        .date
        .clone()
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());

    SampleInfo {
        file_name,
        sample_id: args.sample_id.clone(),
        location: args.location.clone(),
        depth: args.depth.clone(),
        test_date,
        total_mass: args.total_mass,
        specific_gravity: args.specific_gravity.unwrap_or(0.0),
        liquid_limit: args.liquid_limit.unwrap_or(0.0),
        plastic_limit: args.plastic_limit.unwrap_or(0.0),
    }
}

/// 保存分析文件（已存在且未指定覆盖时报错）
fn save_analysis(path: &Path, file: &AnalysisFile, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Err(SievekitError::OutputExists {
            path: path.display().to_string(),
        });
    }
    gsa::save(path, file)
}
