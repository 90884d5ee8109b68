use crate::hoobari::config::{
    InferenceConfig, DEFAULT_ERR_RATE, DEFAULT_LENGTH_WINDOW, DEFAULT_MAX_FRAGMENT_LEN,
    DEFAULT_MIN_BIN_SUPPORT,
};
use crate::utils::{GenomicRegion, ModelKind, QualityMode, Result};
use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="hoobari",
          author="hoobari developers",
          version=&**FULL_VERSION,
          about="Fetal genotyping from maternal cell-free DNA",
          long_about = None,
          disable_help_subcommand = true,
          help_template = "{name} {version}\n{author}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Fetal genotype caller")]
    Call(CallArgs),
    #[clap(about = "Fetal fraction estimator")]
    Fraction(FractionArgs),
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("call")))]
#[command(arg_required_else_help(true))]
pub struct CallArgs {
    #[clap(required = true)]
    #[clap(short = 'l')]
    #[clap(long = "loci")]
    #[clap(help = "Loci table with parental genotypes (chrom, pos, ref, alt, maternal GT, paternal GT)")]
    #[clap(value_name = "LOCI")]
    #[arg(value_parser = check_file_exists)]
    pub loci_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'f')]
    #[clap(long = "fragments")]
    #[clap(help = "Fragment shard files (chrom, pos, allele, length, read name, [is_fetal])")]
    #[clap(value_name = "FRAGMENTS")]
    #[clap(num_args = 1..)]
    #[arg(value_parser = check_file_exists)]
    pub fragments_paths: Vec<PathBuf>,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-prefix")]
    #[clap(help = "Prefix for output files")]
    #[clap(value_name = "OUTPUT_PREFIX")]
    #[arg(value_parser = check_prefix_path)]
    pub output_prefix: String,

    #[clap(short = 'm')]
    #[clap(long = "model")]
    #[clap(value_name = "MODEL")]
    #[clap(help = "Fetal fraction model (simple, lengths or origin)")]
    #[clap(default_value = "simple")]
    pub model: ModelKind,

    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(help = "Number of threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[arg(value_parser = threads_in_range)]
    pub num_threads: usize,

    #[clap(short = 'r')]
    #[clap(long = "region")]
    #[clap(value_name = "REGION")]
    #[clap(help = "Only call loci in this region (chrom or chrom:start-end)")]
    #[arg(value_parser = region_from_string)]
    pub region: Option<GenomicRegion>,

    #[clap(long = "sample-name")]
    #[clap(value_name = "SAMPLE_NAME")]
    #[clap(help = "Sample name of the fetus")]
    #[clap(default_value = "FETUS")]
    #[arg(value_parser = check_sample_name_nonempty)]
    pub sample_name: String,

    #[clap(flatten)]
    pub fraction: FractionOptions,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "total-fetal-fraction")]
    #[clap(value_name = "FRACTION")]
    #[clap(help = "Use this total fetal fraction instead of estimating it")]
    #[arg(value_parser = ensure_unit_float)]
    pub total_fetal_fraction: Option<f64>,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "fraction-table")]
    #[clap(value_name = "TABLE")]
    #[clap(help = "Fetal fraction table written by the fraction command")]
    #[arg(value_parser = check_file_exists)]
    pub fraction_table: Option<PathBuf>,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "quality")]
    #[clap(value_name = "QUALITY")]
    #[clap(help = "Error probability reported as QUAL (hom-ref or called)")]
    #[clap(default_value = "hom-ref")]
    pub quality_mode: QualityMode,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("fraction")))]
#[command(arg_required_else_help(true))]
pub struct FractionArgs {
    #[clap(required = true)]
    #[clap(short = 'l')]
    #[clap(long = "loci")]
    #[clap(help = "Loci table with parental genotypes (chrom, pos, ref, alt, maternal GT, paternal GT)")]
    #[clap(value_name = "LOCI")]
    #[arg(value_parser = check_file_exists)]
    pub loci_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'f')]
    #[clap(long = "fragments")]
    #[clap(help = "Fragment shard files (chrom, pos, allele, length, read name, [is_fetal])")]
    #[clap(value_name = "FRAGMENTS")]
    #[clap(num_args = 1..)]
    #[arg(value_parser = check_file_exists)]
    pub fragments_paths: Vec<PathBuf>,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-prefix")]
    #[clap(help = "Prefix for output files")]
    #[clap(value_name = "OUTPUT_PREFIX")]
    #[arg(value_parser = check_prefix_path)]
    pub output_prefix: String,

    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(help = "Number of threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[arg(value_parser = threads_in_range)]
    pub num_threads: usize,

    #[clap(flatten)]
    pub fraction: FractionOptions,
}

/// Options shared by both subcommands for estimating the fetal fraction.
#[derive(Args, Debug, Clone)]
pub struct FractionOptions {
    #[clap(help_heading("Advanced"))]
    #[clap(long = "err-rate")]
    #[clap(value_name = "RATE")]
    #[clap(help = "Sequencing error rate")]
    #[clap(default_value_t = DEFAULT_ERR_RATE)]
    #[arg(value_parser = ensure_unit_float)]
    pub err_rate: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "length-window")]
    #[clap(value_name = "WINDOW")]
    #[clap(help = "Width of the fragment length bins")]
    #[clap(default_value_t = DEFAULT_LENGTH_WINDOW)]
    #[arg(value_parser = positive_u32)]
    pub length_window: u32,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "max-length")]
    #[clap(value_name = "LENGTH")]
    #[clap(help = "Maximum fragment length covered by the fetal fraction table")]
    #[clap(default_value_t = DEFAULT_MAX_FRAGMENT_LEN)]
    #[arg(value_parser = positive_u32)]
    pub max_fragment_len: u32,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "min-bin-support")]
    #[clap(value_name = "COUNT")]
    #[clap(help = "Fragments of each kind a length bin needs beyond this count to be used")]
    #[clap(default_value_t = DEFAULT_MIN_BIN_SUPPORT)]
    pub min_bin_support: usize,
}

impl CallArgs {
    pub fn inference_config(&self) -> InferenceConfig {
        InferenceConfig {
            model: self.model,
            quality_mode: self.quality_mode,
            ..self.fraction.inference_config()
        }
    }
}

impl FractionOptions {
    pub fn inference_config(&self) -> InferenceConfig {
        InferenceConfig {
            err_rate: self.err_rate,
            length_window: self.length_window,
            max_fragment_len: self.max_fragment_len,
            min_bin_support: self.min_bin_support,
            ..InferenceConfig::default()
        }
    }
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_prefix_path(s: &str) -> Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(s.to_string())
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid thread number", s))?;
    if thread >= 1 {
        Ok(thread)
    } else {
        Err("Number of threads must be at least 1".into())
    }
}

fn positive_u32(s: &str) -> Result<u32> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid positive integer", s))?;
    if value >= 1 {
        Ok(value)
    } else {
        Err("Value must be at least 1".into())
    }
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn check_sample_name_nonempty(s: &str) -> Result<String> {
    if s.trim().is_empty() {
        Err("Sample name cannot be an empty string".to_string())
    } else {
        Ok(s.to_string())
    }
}

fn ensure_unit_float(s: &str) -> Result<f64> {
    let value = s
        .parse::<f64>()
        .map_err(|e| format!("Could not parse float: {}", e))?;
    if !(0.0..=1.0).contains(&value) {
        Err(format!(
            "The value must be between 0.0 and 1.0, got: {}",
            value
        ))
    } else {
        Ok(value)
    }
}

fn region_from_string(s: &str) -> Result<GenomicRegion> {
    GenomicRegion::from_string(s)
}
