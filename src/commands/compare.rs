//! # compare 子命令实现
//!
//! 并行读取多个 `.gsa` 文件，输出特征粒径、分类和共享粒径轴上的对齐表。
//!
//! ## 功能
//! - 文件/目录混合输入，目录内按模式收集
//! - 并行读取（rayon），单个文件失败继续处理其余文件
//! - 最多对比 10 个样品
//!
//! ## 依赖关系
//! - 使用 `cli/compare.rs` 定义的参数
//! - 使用 `batch/` 模块进行收集和并行读取
//! - 使用 `gradation/curve.rs` 对齐曲线
//! - 使用 `classify/`

use super::{hydrometer_points, recompute_gradation};
use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::classify::ClassificationReport;
use crate::cli::compare::CompareArgs;
use crate::error::{Result, SievekitError};
use crate::gradation::{align_samples, assemble_curve, MAX_COMPARE_SAMPLES};
use crate::models::{AlignedTable, AnalysisResult, SampleCurve, SampleInfo};
use crate::parsers::gsa;
use crate::utils::output;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tabled::builder::Builder;
use tabled::{Table, Tabled};

/// 读入的单个样品
#[derive(Debug, Clone)]
struct LoadedSample {
    name: String,
    info: SampleInfo,
    results: AnalysisResult,
    curve: SampleCurve,
}

/// 特征粒径汇总行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Sample")]
    sample: String,
    #[tabled(rename = "D85")]
    d85: String,
    #[tabled(rename = "D60")]
    d60: String,
    #[tabled(rename = "D50")]
    d50: String,
    #[tabled(rename = "D30")]
    d30: String,
    #[tabled(rename = "D15")]
    d15: String,
    #[tabled(rename = "D10")]
    d10: String,
    #[tabled(rename = "Cu")]
    cu: String,
    #[tabled(rename = "Cc")]
    cc: String,
    #[tabled(rename = "LL")]
    liquid_limit: String,
    #[tabled(rename = "PI")]
    plasticity_index: String,
    #[tabled(rename = "Gravel %")]
    gravel: String,
    #[tabled(rename = "Sand %")]
    sand: String,
}

/// 分类汇总行
#[derive(Debug, Clone, Tabled)]
struct ClassificationRow {
    #[tabled(rename = "Sample")]
    sample: String,
    #[tabled(rename = "USCS")]
    uscs: String,
    #[tabled(rename = "AASHTO")]
    aashto: String,
    #[tabled(rename = "Grading")]
    grading: String,
}

/// 执行 compare
pub fn execute(args: CompareArgs) -> Result<()> {
    output::print_header("Grain-Size Comparison");

    let files = collect_files(&args)?;
    if files.is_empty() {
        return Err(SievekitError::NoFilesFound {
            pattern: args.pattern.clone(),
        });
    }

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!(
        "Loading {} files using {} threads...",
        files.len(),
        runner.jobs()
    ));

    let recompute = args.recompute;
    let batch = runner.run(&files, |path| load_sample(path, recompute))?;

    output::print_info(&format!("Loaded {} of {} files", batch.success(), batch.total()));
    for (path, reason) in &batch.skipped {
        output::print_skip(&format!("{}: {}", path, reason));
    }
    for (path, err) in &batch.failures {
        output::print_error(&format!("{}: {}", path, err));
    }

    let total_files = batch.total();
    let mut samples: Vec<LoadedSample> = batch.items.into_iter().map(|(_, s)| s).collect();
    if samples.is_empty() {
        return Err(SievekitError::Other(
            "No analysis files could be loaded".to_string(),
        ));
    }
    if samples.len() > MAX_COMPARE_SAMPLES {
        output::print_warning(&format!(
            "{} samples loaded; only the first {} are compared",
            samples.len(),
            MAX_COMPARE_SAMPLES
        ));
        samples.truncate(MAX_COMPARE_SAMPLES);
    }
    make_names_unique(&mut samples);

    output::print_header("Characteristic Sizes (mm)");
    let summary: Vec<SummaryRow> = samples.iter().map(summary_row).collect();
    println!("{}", Table::new(&summary));

    output::print_header("Classification");
    let classes: Vec<ClassificationRow> = samples
        .iter()
        .map(|s| {
            let report = ClassificationReport::from_results(&s.results);
            ClassificationRow {
                sample: s.name.clone(),
                uscs: report.uscs.symbol.clone(),
                aashto: report.aashto.designation(),
                grading: report.grading.to_string(),
            }
        })
        .collect();
    println!("{}", Table::new(&classes));

    output::print_header("Percent Passing on Shared Size Axis");
    let curves: Vec<SampleCurve> = samples.iter().map(|s| s.curve.clone()).collect();
    println!("{}", aligned_table(&align_samples(&curves)));

    output::print_done(&format!(
        "Compared {} samples from {} files ({} skipped, {} failed)",
        samples.len(),
        total_files,
        batch.skipped.len(),
        batch.failures.len()
    ));
    Ok(())
}

/// 收集所有输入中的分析文件（去重，保持输入顺序）
fn collect_files(args: &CompareArgs) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for input in &args.inputs {
        let collector = FileCollector::new(input.clone())
            .with_pattern(&args.pattern)?
            .recursive(args.recursive);
        match collector.collect() {
            Ok(found) => {
                for file in found {
                    if seen.insert(file.clone()) {
                        files.push(file);
                    }
                }
            }
            Err(e) => output::print_warning(&e.to_string()),
        }
    }

    Ok(files)
}

/// 读取单个样品
fn load_sample(path: &Path, recompute: bool) -> ProcessResult<LoadedSample> {
    let display = path.display().to_string();
    let file = match gsa::load(path) {
        Ok(file) => file,
        Err(e) => return ProcessResult::Failed(display, e.to_string()),
    };
    if file.sieve_data.is_empty() {
        return ProcessResult::Skipped(display, "no sieve data".to_string());
    }

    let name = file.display_name(&gsa::file_stem(path));
    let (points, results) = if recompute {
        let gradation = recompute_gradation(&file);
        let hydrometer = hydrometer_points(&file, Some(&gradation));
        (
            assemble_curve(&gradation.rows, hydrometer.as_deref()),
            gradation.result,
        )
    } else {
        let hydrometer = hydrometer_points(&file, None);
        (
            assemble_curve(&file.sieve_data, hydrometer.as_deref()),
            file.analysis_results.clone(),
        )
    };

    ProcessResult::Success(
        display,
        LoadedSample {
            curve: SampleCurve::new(name.clone(), points),
            name,
            info: file.file_info,
            results,
        },
    )
}

/// 同名样品追加序号，保证曲线标识唯一
fn make_names_unique(samples: &mut [LoadedSample]) {
    let mut used: HashSet<String> = HashSet::new();
    for sample in samples.iter_mut() {
        let mut name = sample.name.clone();
        let mut n = 2;
        while !used.insert(name.clone()) {
            name = format!("{} ({})", sample.name, n);
            n += 1;
        }
        sample.name = name.clone();
        sample.curve.id = name;
    }
}

/// 特征粒径行；未填写液限显示 "NV"，无塑性指数显示 "NP"
fn summary_row(sample: &LoadedSample) -> SummaryRow {
    let r = &sample.results;
    let info = &sample.info;
    let size = |d: f64| format!("{:.4}", d);
    SummaryRow {
        sample: sample.name.clone(),
        d85: size(r.d85),
        d60: size(r.d60),
        d50: size(r.d50),
        d30: size(r.d30),
        d15: size(r.d15),
        d10: size(r.d10),
        cu: format!("{:.2}", r.uniformity_coefficient),
        cc: format!("{:.2}", r.coefficient_of_curvature),
        liquid_limit: if info.liquid_limit > 0.0 {
            format!("{:.0}", info.liquid_limit)
        } else {
            "NV".to_string()
        },
        plasticity_index: info
            .plasticity_index()
            .map_or_else(|| "NP".to_string(), |pi| format!("{:.0}", pi)),
        gravel: format!("{:.1}", r.gravel_percent),
        sand: format!("{:.1}", r.sand_percent),
    }
}

/// 对齐表：每个样品一列，无覆盖处显示 "-"
fn aligned_table(table: &AlignedTable) -> Table {
    let mut builder = Builder::default();

    let mut header = vec!["Size (mm)".to_string()];
    header.extend(table.sample_ids.iter().cloned());
    builder.push_record(header);

    for (index, row) in table.rows.iter().enumerate() {
        let mut record = vec![format!("{:.4}", row.particle_size_mm)];
        record.extend(table.sample_ids.iter().map(|id| match table.value(index, id) {
            Some(p) => format!("{:.1}", p),
            None => "-".to_string(),
        }));
        builder.push_record(record);
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradation::compute_gradation;
    use crate::models::{AnalysisFile, SieveMeasurement};
    use std::fs;

    fn write_sample(dir: &Path, stem: &str, file_name: &str, fines_mass: f64) -> PathBuf {
        let sieves = vec![
            SieveMeasurement::new(4.75, "No. 4", 100.0),
            SieveMeasurement::new(0.425, "No. 40", 300.0 - fines_mass),
            SieveMeasurement::new(0.075, "No. 200", 50.0),
        ];
        let gradation = compute_gradation(&sieves, 500.0);
        let info = SampleInfo {
            file_name: file_name.to_string(),
            total_mass: 500.0,
            ..SampleInfo::default()
        };
        let file = AnalysisFile::new(info, gradation.rows, gradation.result, None);
        let path = dir.join(format!("{}.gsa", stem));
        gsa::save(&path, &file).unwrap();
        path
    }

    fn compare_args(inputs: Vec<PathBuf>) -> CompareArgs {
        CompareArgs {
            inputs,
            pattern: "*.gsa".to_string(),
            recursive: false,
            jobs: 2,
            recompute: false,
        }
    }

    #[test]
    fn test_compare_continues_after_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        write_sample(dir.path(), "a", "BH-01", 0.0);
        write_sample(dir.path(), "b", "BH-02", 40.0);
        fs::write(dir.path().join("c.gsa"), r#"{"sieveData": []}"#).unwrap();

        assert!(execute(compare_args(vec![dir.path().to_path_buf()])).is_ok());
    }

    #[test]
    fn test_no_files_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            execute(compare_args(vec![dir.path().to_path_buf()])),
            Err(SievekitError::NoFilesFound { .. })
        ));
    }

    #[test]
    fn test_load_sample_results() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_sample(dir.path(), "a", "", 0.0);
        match load_sample(&good, true) {
            ProcessResult::Success(_, sample) => {
                assert_eq!(sample.name, "a");
                assert_eq!(sample.curve.points.len(), 3);
            }
            other => panic!("unexpected {:?}", other),
        }

        let empty = dir.path().join("empty.gsa");
        fs::write(&empty, r#"{"sieveData": [], "analysisResults": {}}"#).unwrap();
        assert!(matches!(load_sample(&empty, false), ProcessResult::Failed(..)));

        let no_rows = dir.path().join("no-rows.gsa");
        let file = AnalysisFile::new(
            SampleInfo::default(),
            vec![],
            AnalysisResult::zeroed(),
            None,
        );
        gsa::save(&no_rows, &file).unwrap();
        assert!(matches!(load_sample(&no_rows, false), ProcessResult::Skipped(..)));

        let missing = dir.path().join("missing.gsa");
        assert!(matches!(load_sample(&missing, false), ProcessResult::Failed(..)));
    }

    #[test]
    fn test_summary_row_plasticity_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path(), "a", "BH-01", 0.0);
        let mut sample = match load_sample(&path, false) {
            ProcessResult::Success(_, s) => s,
            other => panic!("unexpected {:?}", other),
        };

        let row = summary_row(&sample);
        assert_eq!(row.liquid_limit, "NV");
        assert_eq!(row.plasticity_index, "NP");

        sample.info.liquid_limit = 34.0;
        sample.info.plastic_limit = 21.0;
        let row = summary_row(&sample);
        assert_eq!(row.liquid_limit, "34");
        assert_eq!(row.plasticity_index, "13");
    }

    #[test]
    fn test_duplicate_names_are_numbered() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_sample(dir.path(), "a", "BH-01", 0.0);
        let b = write_sample(dir.path(), "b", "BH-01", 10.0);
        let mut samples: Vec<LoadedSample> = [a, b]
            .iter()
            .filter_map(|p| match load_sample(p, false) {
                ProcessResult::Success(_, s) => Some(s),
                _ => None,
            })
            .collect();
        make_names_unique(&mut samples);
        assert_eq!(samples[0].name, "BH-01");
        assert_eq!(samples[1].name, "BH-01 (2)");
        assert_eq!(samples[1].curve.id, "BH-01 (2)");
    }
}
