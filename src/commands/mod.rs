//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `gradation/`, `classify/`, `utils/`
//! - 子模块: analyze, classify, compare

pub mod analyze;
pub mod classify;
pub mod compare;

use crate::cli::Commands;
use crate::error::Result;
use crate::gradation::{compute_gradation, compute_hydrometer_points, Gradation};
use crate::models::{AnalysisFile, HydrometerPoint, SieveMeasurement};

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Analyze(args) => analyze::execute(args),
        Commands::Classify(args) => classify::execute(args),
        Commands::Compare(args) => compare::execute(args),
    }
}

/// 文件对应的总质量
///
/// 取 `fileInfo.totalMass`；旧文件没有该值时用筛余合计加盘中质量。
fn total_mass(file: &AnalysisFile) -> f64 {
    if file.file_info.total_mass > 0.0 {
        file.file_info.total_mass
    } else {
        file.analysis_results.total_mass_retained_g + file.analysis_results.pan_mass_g
    }
}

/// 由文件中保存的筛余质量重新计算级配
pub(crate) fn recompute_gradation(file: &AnalysisFile) -> Gradation {
    let sieves: Vec<SieveMeasurement> = file.sieve_data.iter().map(|r| r.measurement()).collect();
    compute_gradation(&sieves, total_mass(file))
}

/// 文件中有比重计数据时换算比重计点
///
/// 传入重新计算的级配时，No. 200 衔接和试样质量都按该级配取值；
/// 否则使用文件中保存的级配和试样质量。
pub(crate) fn hydrometer_points(
    file: &AnalysisFile,
    recomputed: Option<&Gradation>,
) -> Option<Vec<HydrometerPoint>> {
    let ctx = file
        .temperature_data
        .as_ref()
        .filter(|ctx| !ctx.readings.is_empty())?;
    let mut ctx = ctx
        .clone()
        .with_specific_gravity(ctx.specific_gravity.or(file.file_info.specific_gravity()));

    let rows = match recomputed {
        Some(gradation) => {
            ctx.specimen_weight_g = gradation.result.fines_percent / 100.0 * total_mass(file);
            &gradation.rows
        }
        None => &file.sieve_data,
    };
    Some(compute_hydrometer_points(&ctx, rows))
}
