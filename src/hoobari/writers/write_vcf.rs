//! Defines the `VcfWriter` struct for writing fetal genotype calls as VCF text.
//!

use crate::hoobari::{
    locus::Locus,
    workflows::{FetalCall, LocusResult},
};
use crate::utils::{math::phred_scale_log_likelihoods, Result};
use itertools::Itertools;
use std::env;
use std::io::Write;

/// Header lines defining the INFO and FORMAT fields for the VCF file.
const VCF_LINES: [&str; 7] = [
    r#"##INFO=<ID=MGT,Number=1,Type=String,Description="Maternal genotype">"#,
    r#"##INFO=<ID=PGT,Number=1,Type=String,Description="Paternal genotype">"#,
    r#"##FORMAT=<ID=GT,Number=1,Type=String,Description="Fetal genotype">"#,
    r#"##FORMAT=<ID=GL,Number=G,Type=Float,Description="Phred-scaled genotype likelihoods normalized to the most likely genotype">"#,
    r#"##FORMAT=<ID=PG,Number=G,Type=Float,Description="Genotype prior probabilities">"#,
    r#"##FORMAT=<ID=PP,Number=G,Type=Float,Description="Genotype posterior probabilities">"#,
    r#"##FILTER=<ID=PASS,Description="All filters passed">"#,
];

const FORMAT: &str = "GT:GL:PG:PP";

/// Structure for writing VCF records from fetal genotyping results.
pub struct VcfWriter<W: Write> {
    writer: W,
}

impl<W: Write> VcfWriter<W> {
    /// Writes the VCF header and returns a writer ready for records.
    ///
    /// # Arguments
    /// * `writer` - Destination of the VCF text.
    /// * `sample_name` - Name of the fetal sample column.
    /// * `total_fetal_fraction` - Recorded in the header for reference.
    pub fn new(mut writer: W, sample_name: &str, total_fetal_fraction: f64) -> Result<Self> {
        let mut header = vec!["##fileformat=VCFv4.2".to_string()];
        header.extend(VCF_LINES.iter().map(|line| line.to_string()));
        header.push(format!(
            "##{}Version={}",
            env!("CARGO_PKG_NAME"),
            *crate::cli::FULL_VERSION
        ));
        let command_line = env::args().collect::<Vec<String>>().join(" ");
        header.push(format!("##{}Command={}", env!("CARGO_PKG_NAME"), command_line));
        header.push(format!("##totalFetalFraction={}", total_fetal_fraction));
        header.push(format!(
            "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\t{}",
            sample_name
        ));

        for line in header {
            writeln!(writer, "{}", line).map_err(|e| format!("Failed to write VCF header: {}", e))?;
        }
        Ok(VcfWriter { writer })
    }

    /// Writes a VCF record for a locus; loci without a call get missing values.
    pub fn write(&mut self, locus: &Locus, results: &LocusResult) -> Result<()> {
        let (qual, sample) = match &results.call {
            Some(call) => (call.posterior.quality.to_string(), Self::encode_sample(call)),
            None => (".".to_string(), "./.:.:.:.".to_string()),
        };
        let pos = locus.pos.to_string();
        let info = format!("MGT={};PGT={}", locus.maternal_gt, locus.paternal_gt);
        let record = [
            locus.chrom.as_str(),
            pos.as_str(),
            ".",
            locus.ref_allele.as_str(),
            locus.alt_allele.as_str(),
            qual.as_str(),
            ".",
            info.as_str(),
            FORMAT,
            sample.as_str(),
        ]
        .join("\t");

        writeln!(self.writer, "{}", record)
            .map_err(|e| format!("Failed to write VCF record for {}: {}", locus.id(), e))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| format!("Failed to flush VCF output: {}", e))
    }

    /// Encodes the GT, GL, PG and PP sample fields.
    fn encode_sample(call: &FetalCall) -> String {
        let gl = phred_scale_log_likelihoods(&call.log_likelihoods)
            .iter()
            .map(|v| round_to(*v, 2))
            .join(",");
        let pg = call.priors.iter().map(|v| round_to(*v, 5)).join(",");
        let pp = call
            .posterior
            .posteriors
            .iter()
            .map(|v| round_to(*v, 5))
            .join(",");
        format!("{}:{}:{}:{}", call.posterior.prediction, gl, pg, pp)
    }
}

fn round_to(value: f64, digits: i32) -> String {
    let factor = 10f64.powi(digits);
    let rounded = (value * factor).round() / factor;
    // -0.0 prints as "-0"
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}
