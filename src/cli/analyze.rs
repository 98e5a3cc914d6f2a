//! # analyze 子命令 CLI 定义
//!
//! 测量数据输入、试验条件和样品信息。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/analyze.rs`

use crate::models::hydrometer::{
    DEFAULT_DISPERSANT_CORRECTION, DEFAULT_MENISCUS_CORRECTION, DEFAULT_TEMPERATURE_C,
};
use crate::parsers::measurements::DEFAULT_MIN_PAN_MASS_G;

use clap::Args;
use std::path::PathBuf;

/// analyze 子命令参数
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Sieve CSV file (columns: sieve_size_mm,label,mass_retained_g)
    pub sieve_csv: PathBuf,

    /// Total dry mass of the specimen in grams
    #[arg(long)]
    pub total_mass: f64,

    /// Add missing standard sieves (1 in. to No. 200) with zero mass retained
    #[arg(long, default_value_t = false)]
    pub standard_stack: bool,

    /// Minimum mass that must remain in the pan, in grams
    #[arg(long, default_value_t = DEFAULT_MIN_PAN_MASS_G, env = "SIEVEKIT_MIN_PAN_MASS")]
    pub min_pan_mass: f64,

    // ─────────────────────────────────────────────────────────────
    // 比重计参数
    // ─────────────────────────────────────────────────────────────
    /// Hydrometer CSV file (columns: time_min,reading)
    #[arg(long)]
    pub hydrometer: Option<PathBuf>,

    /// Suspension temperature in °C
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE_C)]
    pub temperature: f64,

    /// Meniscus correction Cm
    #[arg(long, default_value_t = DEFAULT_MENISCUS_CORRECTION)]
    pub meniscus: f64,

    /// Dispersant (zero) correction Fz
    #[arg(long, default_value_t = DEFAULT_DISPERSANT_CORRECTION)]
    pub dispersant: f64,

    // ─────────────────────────────────────────────────────────────
    // 样品信息
    // ─────────────────────────────────────────────────────────────
    /// Specific gravity of soil solids (default 2.65 when omitted)
    #[arg(long)]
    pub specific_gravity: Option<f64>,

    /// Liquid limit (%)
    #[arg(long)]
    pub liquid_limit: Option<f64>,

    /// Plastic limit (%)
    #[arg(long)]
    pub plastic_limit: Option<f64>,

    /// Sample identifier
    #[arg(long, default_value = "")]
    pub sample_id: String,

    /// Sampling location
    #[arg(long, default_value = "")]
    pub location: String,

    /// Sampling depth (e.g. "2.5-3.0 m")
    #[arg(long, default_value = "")]
    pub depth: String,

    /// Test date (default: today)
    #[arg(long)]
    pub date: Option<String>,

    /// Display name stored in the analysis file (default: sieve CSV file stem)
    #[arg(long)]
    pub file_name: Option<String>,

    // ─────────────────────────────────────────────────────────────
    // 输出
    // ─────────────────────────────────────────────────────────────
    /// Save the analysis to a .gsa file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Overwrite an existing analysis file
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
