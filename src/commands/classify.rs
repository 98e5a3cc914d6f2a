//! # classify 子命令实现
//!
//! 读取 `.gsa` 分析文件并输出 USCS/AASHTO 分类报告。
//!
//! ## 依赖关系
//! - 使用 `cli/classify.rs` 定义的参数
//! - 使用 `parsers/gsa.rs`, `classify/`
//! - 使用 `utils/output.rs`

use super::recompute_gradation;
use crate::classify::{Classification, ClassificationReport};
use crate::cli::classify::ClassifyArgs;
use crate::error::Result;
use crate::models::SampleInfo;
use crate::parsers::gsa;
use crate::utils::output;

use colored::Colorize;
use tabled::{Table, Tabled};

/// 分类汇总行
#[derive(Debug, Clone, Tabled)]
struct ClassificationRow {
    #[tabled(rename = "System")]
    system: String,
    #[tabled(rename = "Symbol")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// 执行 classify
pub fn execute(args: ClassifyArgs) -> Result<()> {
    let file = gsa::load(&args.input)?;
    let name = file.display_name(&gsa::file_stem(&args.input));

    output::print_header(&format!("Soil Classification: {}", name));
    print_sample_info(&file.file_info);

    let results = if args.recompute {
        output::print_info("Recomputing gradation from stored sieve data...");
        let gradation = recompute_gradation(&file);
        if gradation.result != file.analysis_results {
            output::print_warning("Recomputed results differ from the values stored in the file");
        }
        gradation.result
    } else {
        file.analysis_results
    };

    print_report(&ClassificationReport::from_results(&results));
    Ok(())
}

/// 打印样品信息（只打印已填写的字段）
pub(crate) fn print_sample_info(info: &SampleInfo) {
    let fields = [
        ("Sample ID", info.sample_id.as_str()),
        ("Location", info.location.as_str()),
        ("Depth", info.depth.as_str()),
        ("Test date", info.test_date.as_str()),
    ];
    for (key, value) in fields.iter().filter(|(_, v)| !v.trim().is_empty()) {
        output::print_key_value(key, value);
    }
    if let Some(pi) = info.plasticity_index() {
        output::print_key_value(
            "Atterberg limits",
            &format!(
                "LL = {:.0}, PL = {:.0}, PI = {:.0}",
                info.liquid_limit, info.plastic_limit, pi
            ),
        );
    }
}

/// 打印分类报告
pub(crate) fn print_report(report: &ClassificationReport) {
    let rows: Vec<ClassificationRow> = report
        .classifications()
        .iter()
        .map(|c| ClassificationRow {
            system: c.system().to_string(),
            code: c.code(),
            name: c.name().to_string(),
            description: c.description().to_string(),
        })
        .collect();
    println!("{}", Table::new(&rows));
    println!();

    for line in report.summary_lines() {
        output::print_info(&line);
    }

    println!("\n  {}", "Criteria".bold());
    for line in report.detail_lines() {
        println!("    - {}", line);
    }

    for classification in report.classifications() {
        let title = match classification {
            Classification::Uscs(_) => "Typical properties",
            Classification::Aashto(_) => "Suitability",
        };
        println!("\n  {} ({})", title.bold(), classification.system());
        for note in classification.notes() {
            println!("    - {}", note);
        }
    }
    println!();
}
