//! Fetal fraction estimation from fragments at parentally informative sites.
//!
//! Where the parents are homozygous for different alleles, every fragment
//! carrying the paternal allele comes from the fetus, while fragments carrying
//! the maternal allele come from either pool. Their counts give the total
//! fetal fraction, and their length distributions give a per-length estimate.

use crate::hoobari::{
    config::InferenceConfig,
    fragments::Fragment,
    genotype::{Genotype, ParentalGenotype},
    locus::Locus,
};
use crate::utils::{normalize_contig, parse_field, table_lines, Result};
use std::collections::{HashMap, HashSet};
use std::io::{BufRead, Read, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allele {
    Ref,
    Alt,
}

impl Allele {
    fn other(self) -> Self {
        match self {
            Allele::Ref => Allele::Alt,
            Allele::Alt => Allele::Ref,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteClass {
    /// Parents homozygous for different alleles; the paternal allele is fetal.
    FetalFraction { fetal: Allele },
    /// Mother homozygous, father heterozygous; the allele the mother lacks is fetal.
    KnownFetal { fetal: Allele },
    /// Both parents homozygous for the same allele; the other allele is an error.
    Error { expected: Allele },
}

#[derive(Debug, Clone, PartialEq)]
pub struct InformativeSite {
    ref_allele: String,
    alt_allele: String,
    pub class: SiteClass,
}

impl InformativeSite {
    /// Classifies a SNP by its parental genotypes. Indels and sites without a
    /// homozygous mother are not informative.
    pub fn classify(locus: &Locus) -> Option<Self> {
        use Genotype::*;
        use ParentalGenotype::Called;

        if !locus.is_snp() {
            return None;
        }
        let class = match (locus.maternal_gt, locus.paternal_gt) {
            (Called(HomRef), Called(HomAlt)) => SiteClass::FetalFraction { fetal: Allele::Alt },
            (Called(HomAlt), Called(HomRef)) => SiteClass::FetalFraction { fetal: Allele::Ref },
            (Called(HomRef), Called(Het)) => SiteClass::KnownFetal { fetal: Allele::Alt },
            (Called(HomAlt), Called(Het)) => SiteClass::KnownFetal { fetal: Allele::Ref },
            (Called(HomRef), Called(HomRef)) => SiteClass::Error { expected: Allele::Ref },
            (Called(HomAlt), Called(HomAlt)) => SiteClass::Error { expected: Allele::Alt },
            _ => return None,
        };
        Some(Self {
            ref_allele: locus.ref_allele.clone(),
            alt_allele: locus.alt_allele.clone(),
            class,
        })
    }

    fn allele_of(&self, observed: &str) -> Option<Allele> {
        if observed == self.ref_allele {
            Some(Allele::Ref)
        } else if observed == self.alt_allele {
            Some(Allele::Alt)
        } else {
            None
        }
    }
}

/// Informative sites indexed by normalized contig and position.
#[derive(Debug, Default)]
pub struct InformativeSites {
    sites: HashMap<String, HashMap<u32, InformativeSite>>,
    count: usize,
}

impl InformativeSites {
    pub fn from_loci<'a>(loci: impl IntoIterator<Item = &'a Locus>) -> Self {
        let mut informative = Self::default();
        for locus in loci {
            if let Some(site) = InformativeSite::classify(locus) {
                informative
                    .sites
                    .entry(normalize_contig(&locus.chrom).to_string())
                    .or_default()
                    .insert(locus.pos, site);
                informative.count += 1;
            }
        }
        informative
    }

    pub fn get(&self, chrom: &str, pos: u32) -> Option<&InformativeSite> {
        self.sites
            .get(normalize_contig(chrom))
            .and_then(|positions| positions.get(&pos))
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Fragments collected at informative sites. Shared and fetal fragments are
/// keyed by read name so both mates of a pair, or a read spanning several
/// sites, are counted once.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FetalFractionInputs {
    pub shared: HashMap<String, u32>,
    pub fetal: HashMap<String, u32>,
    pub known_fetal_reads: HashSet<String>,
    pub error_fragments: usize,
    pub error_site_fragments: usize,
}

impl FetalFractionInputs {
    pub fn observe(&mut self, site: &InformativeSite, fragment: &Fragment) {
        let Some(allele) = site.allele_of(&fragment.allele) else {
            return;
        };
        match site.class {
            SiteClass::FetalFraction { fetal } => {
                if allele == fetal {
                    self.fetal.insert(fragment.read_name.clone(), fragment.length);
                    self.known_fetal_reads.insert(fragment.read_name.clone());
                } else {
                    self.shared.insert(fragment.read_name.clone(), fragment.length);
                }
            }
            SiteClass::KnownFetal { fetal } => {
                if allele == fetal {
                    self.known_fetal_reads.insert(fragment.read_name.clone());
                }
            }
            SiteClass::Error { expected } => {
                self.error_site_fragments += 1;
                if allele == expected.other() {
                    self.error_fragments += 1;
                }
            }
        }
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.shared.extend(other.shared);
        self.fetal.extend(other.fetal);
        self.known_fetal_reads.extend(other.known_fetal_reads);
        self.error_fragments += other.error_fragments;
        self.error_site_fragments += other.error_site_fragments;
        self
    }

    pub fn total_fetal_fraction(&self) -> Option<f64> {
        total_fetal_fraction(self.shared.len(), self.fetal.len())
    }

    /// Fraction of fragments showing the allele neither parent carries.
    pub fn observed_error_rate(&self) -> Option<f64> {
        if self.error_site_fragments == 0 {
            None
        } else {
            Some(self.error_fragments as f64 / self.error_site_fragments as f64)
        }
    }

    fn sorted_lengths(lengths: &HashMap<String, u32>) -> Vec<u32> {
        let mut values: Vec<u32> = lengths.values().copied().collect();
        values.sort_unstable();
        values
    }
}

/// `2 * fetal / (shared + fetal)`: only one of the two fetal haplotypes is
/// seen at a site where the parents differ. `None` without any fragments.
pub fn total_fetal_fraction(shared_count: usize, fetal_count: usize) -> Option<f64> {
    let total = shared_count + fetal_count;
    if total == 0 {
        None
    } else {
        Some((2 * fetal_count) as f64 / total as f64)
    }
}

/// Fetal fraction per fragment length, over `0..=last_edge`.
///
/// Lengths are counted in right-closed windows (`[0, w]`, `(w, 2w]`, ...) whose
/// edges run from 0 up to the maximum length.
#[derive(Debug, Clone, PartialEq)]
pub struct FetalFractionTable {
    window: u32,
    values: Vec<f64>,
}

impl FetalFractionTable {
    pub fn from_lengths(
        shared_lengths: &[u32],
        fetal_lengths: &[u32],
        total_fetal_fraction: f64,
        config: &InferenceConfig,
    ) -> Self {
        let window = config.length_window.max(1);
        let last_edge = last_edge(window, config.max_fragment_len);
        let num_bins = (last_edge / window) as usize;
        let shared_counts = bin_counts(shared_lengths, window, last_edge, num_bins);
        let fetal_counts = bin_counts(fetal_lengths, window, last_edge, num_bins);
        Self::from_bin_counts(
            &shared_counts,
            &fetal_counts,
            total_fetal_fraction,
            window,
            config.min_bin_support,
            config.err_rate,
        )
    }

    /// Builds the table from per-bin counts. A bin is trusted when both
    /// counts exceed `min_support`; otherwise lengths inherit the value of the
    /// previous length, and length 0 inherits the total fetal fraction.
    pub fn from_bin_counts(
        shared_counts: &[usize],
        fetal_counts: &[usize],
        total_fetal_fraction: f64,
        window: u32,
        min_support: usize,
        err_rate: f64,
    ) -> Self {
        let num_bins = shared_counts.len().min(fetal_counts.len());
        let total_fetal_fraction = clamp_fetal_fraction(total_fetal_fraction, err_rate);
        if num_bins == 0 {
            return Self {
                window,
                values: vec![total_fetal_fraction],
            };
        }
        let last_edge = num_bins as u32 * window;
        let mut values = Vec::with_capacity(last_edge as usize + 1);
        let mut previous = total_fetal_fraction;

        for length in 0..=last_edge {
            let bin = bin_index(length, window);
            let (shared, fetal) = (shared_counts[bin], fetal_counts[bin]);
            let value = if shared > min_support && fetal > min_support {
                clamp_fetal_fraction((2 * fetal) as f64 / (shared + fetal) as f64, err_rate)
            } else {
                previous
            };
            values.push(value);
            previous = value;
        }

        Self { window, values }
    }

    pub fn get(&self, length: u32) -> Option<f64> {
        self.values.get(length as usize).copied()
    }

    pub fn window(&self) -> u32 {
        self.window
    }

    pub fn max_length(&self) -> u32 {
        self.values.len().saturating_sub(1) as u32
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Fractions above 1 come from counting one fetal haplotype twice; they are
/// replaced by `1 - err_rate`.
fn clamp_fetal_fraction(value: f64, err_rate: f64) -> f64 {
    if value > 1.0 {
        1.0 - err_rate
    } else {
        value
    }
}

fn last_edge(window: u32, max_len: u32) -> u32 {
    // Edges are 0, w, 2w, ... strictly below max_len
    let num_edges = max_len.div_ceil(window).max(1);
    (num_edges - 1) * window
}

fn bin_index(length: u32, window: u32) -> usize {
    if length == 0 {
        0
    } else {
        ((length - 1) / window) as usize
    }
}

fn bin_counts(lengths: &[u32], window: u32, last_edge: u32, num_bins: usize) -> Vec<usize> {
    let mut counts = vec![0; num_bins];
    for &length in lengths.iter().filter(|&&l| l <= last_edge) {
        if let Some(count) = counts.get_mut(bin_index(length, window)) {
            *count += 1;
        }
    }
    counts
}

/// Total fetal fraction together with its per-length refinement. Computed
/// once per run and shared read-only by all locus evaluations.
#[derive(Debug, Clone, PartialEq)]
pub struct FetalFractionModel {
    pub total: f64,
    pub table: FetalFractionTable,
}

impl FetalFractionModel {
    pub fn new(total: f64, table: FetalFractionTable, err_rate: f64) -> Self {
        Self {
            total: Self::checked_total(total, err_rate),
            table,
        }
    }

    fn checked_total(total: f64, err_rate: f64) -> f64 {
        if total > 1.0 {
            log::warn!(
                "Total fetal fraction {:.4} exceeds 1, using {}",
                total,
                1.0 - err_rate
            );
        }
        clamp_fetal_fraction(total, err_rate)
    }

    /// Estimates the model from collected fragments. `total_override` replaces
    /// the count-based total, which is then also the table's fallback value.
    pub fn from_inputs(
        inputs: &FetalFractionInputs,
        config: &InferenceConfig,
        total_override: Option<f64>,
    ) -> Result<Self> {
        let total = match total_override.or_else(|| inputs.total_fetal_fraction()) {
            Some(total) => total,
            None => {
                return Err(
                    "No fragments found at informative sites to estimate the fetal fraction"
                        .to_string(),
                )
            }
        };
        log::info!(
            "Fetal fraction inputs: {} shared fragments, {} fetal fragments, total fetal fraction {:.4}",
            inputs.shared.len(),
            inputs.fetal.len(),
            total
        );

        let shared_lengths = FetalFractionInputs::sorted_lengths(&inputs.shared);
        let fetal_lengths = FetalFractionInputs::sorted_lengths(&inputs.fetal);
        let total = Self::checked_total(total, config.err_rate);
        let table = FetalFractionTable::from_lengths(&shared_lengths, &fetal_lengths, total, config);
        Ok(Self { total, table })
    }

    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut write = || -> std::io::Result<()> {
            writeln!(writer, "#total_fetal_fraction={}", self.total)?;
            writeln!(writer, "#window={}", self.table.window)?;
            writeln!(writer, "#length\tfetal_fraction")?;
            for (length, value) in self.table.values.iter().enumerate() {
                writeln!(writer, "{}\t{}", length, value)?;
            }
            writer.flush()
        };
        write().map_err(|e| format!("Failed to write fetal fraction table: {}", e))
    }

    /// Reads a table written by [`FetalFractionModel::write_tsv`].
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| format!("Failed to read fetal fraction table: {}", e))?;

        let header_value = |key: &str| {
            content
                .lines()
                .find_map(|line| line.strip_prefix('#')?.strip_prefix(key)?.strip_prefix('='))
                .ok_or_else(|| format!("Fetal fraction table is missing the '{}' header", key))
        };
        let total: f64 = parse_field(header_value("total_fetal_fraction")?, "total_fetal_fraction")?;
        if !is_fraction(total) {
            return Err(format!("Total fetal fraction must be within [0, 1], found {}", total));
        }
        let window: u32 = parse_field(header_value("window")?, "window")?;
        if window == 0 {
            return Err("Fetal fraction table window must be positive".to_string());
        }

        let mut values = Vec::new();
        for result_line in table_lines(content.as_bytes()) {
            let (line_number, line) = result_line?;
            let (length, value) = line
                .split_once('\t')
                .ok_or_else(|| format!("Error at fetal fraction line {}: expected 2 fields", line_number))?;
            let length: usize = parse_field(length, "length")?;
            if length != values.len() {
                return Err(format!(
                    "Error at fetal fraction line {}: expected length {}, found {}",
                    line_number,
                    values.len(),
                    length
                ));
            }
            let value: f64 = parse_field(value, "fetal fraction")?;
            if !is_fraction(value) {
                return Err(format!(
                    "Error at fetal fraction line {}: fraction must be within [0, 1], found {}",
                    line_number, value
                ));
            }
            values.push(value);
        }

        Ok(Self {
            total,
            table: FetalFractionTable { window, values },
        })
    }
}

fn is_fraction(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn locus(maternal: &str, paternal: &str) -> Locus {
        Locus::new(&format!("chr1\t100\tA\tG\t{}\t{}", maternal, paternal)).unwrap()
    }

    #[test]
    fn test_classify_sites() {
        let class = |m, p| InformativeSite::classify(&locus(m, p)).map(|s| s.class);
        assert_eq!(class("0/0", "1/1"), Some(SiteClass::FetalFraction { fetal: Allele::Alt }));
        assert_eq!(class("1/1", "0/0"), Some(SiteClass::FetalFraction { fetal: Allele::Ref }));
        assert_eq!(class("0/0", "0/1"), Some(SiteClass::KnownFetal { fetal: Allele::Alt }));
        assert_eq!(class("1/1", "0/1"), Some(SiteClass::KnownFetal { fetal: Allele::Ref }));
        assert_eq!(class("0/0", "0/0"), Some(SiteClass::Error { expected: Allele::Ref }));
        assert_eq!(class("0/1", "1/1"), None);
        assert_eq!(class("0/0", "."), None);

        let indel = Locus::new("chr1\t100\tAT\tA\t0/0\t1/1").unwrap();
        assert_eq!(InformativeSite::classify(&indel), None);
    }

    #[test]
    fn test_informative_sites_lookup() {
        let loci = vec![locus("0/0", "1/1"), locus("0/1", "0/1")];
        let sites = InformativeSites::from_loci(&loci);
        assert_eq!(sites.len(), 1);
        assert!(sites.get("1", 100).is_some());
        assert!(sites.get("chr1", 101).is_none());
    }

    #[test]
    fn test_inputs_deduplicate_by_read_name() {
        let site = InformativeSite::classify(&locus("0/0", "1/1")).unwrap();
        let mut inputs = FetalFractionInputs::default();
        inputs.observe(&site, &Fragment::new("A", 170, false, "r1"));
        inputs.observe(&site, &Fragment::new("A", 170, false, "r1"));
        inputs.observe(&site, &Fragment::new("A", 165, false, "r2"));
        inputs.observe(&site, &Fragment::new("G", 140, false, "r3"));
        inputs.observe(&site, &Fragment::new("T", 140, false, "r4"));
        assert_eq!(inputs.shared.len(), 2);
        assert_eq!(inputs.fetal.len(), 1);
        assert!(inputs.known_fetal_reads.contains("r3"));
        assert_relative_eq!(inputs.total_fetal_fraction().unwrap(), 2.0 / 3.0);
    }

    #[test]
    fn test_inputs_known_fetal_and_error_sites() {
        let known = InformativeSite::classify(&locus("1/1", "0/1")).unwrap();
        let error = InformativeSite::classify(&locus("0/0", "0/0")).unwrap();
        let mut inputs = FetalFractionInputs::default();
        inputs.observe(&known, &Fragment::new("A", 150, false, "fetal"));
        inputs.observe(&known, &Fragment::new("G", 150, false, "maternal"));
        for i in 0..9 {
            inputs.observe(&error, &Fragment::new("A", 150, false, format!("ok{}", i)));
        }
        inputs.observe(&error, &Fragment::new("G", 150, false, "err"));

        assert!(inputs.known_fetal_reads.contains("fetal"));
        assert!(!inputs.known_fetal_reads.contains("maternal"));
        assert!(inputs.shared.is_empty() && inputs.fetal.is_empty());
        assert_eq!(inputs.total_fetal_fraction(), None);
        assert_relative_eq!(inputs.observed_error_rate().unwrap(), 0.1);
    }

    #[test]
    fn test_inputs_merge() {
        let site = InformativeSite::classify(&locus("0/0", "1/1")).unwrap();
        let mut left = FetalFractionInputs::default();
        left.observe(&site, &Fragment::new("A", 170, false, "r1"));
        let mut right = FetalFractionInputs::default();
        right.observe(&site, &Fragment::new("G", 140, false, "r2"));
        right.observe(&site, &Fragment::new("A", 171, false, "r1"));
        let merged = left.merge(right);
        assert_eq!(merged.shared.len(), 1);
        assert_eq!(merged.shared["r1"], 171);
        assert_eq!(merged.fetal.len(), 1);
    }

    #[test]
    fn test_total_fetal_fraction() {
        assert_eq!(total_fetal_fraction(0, 0), None);
        assert_relative_eq!(total_fetal_fraction(95, 5).unwrap(), 0.1);
    }

    #[test]
    fn test_table_binning_edges() {
        assert_eq!(last_edge(3, 500), 498);
        assert_eq!(last_edge(10, 500), 490);
        assert_eq!(bin_index(0, 3), 0);
        assert_eq!(bin_index(3, 3), 0);
        assert_eq!(bin_index(4, 3), 1);
        assert_eq!(bin_index(498, 3), 165);
    }

    #[test]
    fn test_table_without_support_is_total_everywhere() {
        let config = InferenceConfig::default();
        let shared: Vec<u32> = (100..120).collect();
        let fetal: Vec<u32> = (100..110).step_by(3).collect();
        let table = FetalFractionTable::from_lengths(&shared, &fetal, 0.12, &config);
        assert_eq!(table.max_length(), 498);
        assert!(table.values().iter().all(|&v| v == 0.12));
    }

    #[test]
    fn test_table_from_bin_counts_inherits_previous_bin() {
        // bins: [0,3], (3,6], (6,9]
        let shared = [10, 10, 2];
        let fetal = [10, 6, 20];
        let table = FetalFractionTable::from_bin_counts(&shared, &fetal, 0.1, 3, 5, 0.001);
        assert_eq!(table.max_length(), 9);
        // 2 * 10 / 20 = 1.0 is not above 1 and is kept
        assert_relative_eq!(table.get(0).unwrap(), 1.0);
        assert_relative_eq!(table.get(3).unwrap(), 1.0);
        assert_relative_eq!(table.get(4).unwrap(), 0.75);
        assert_relative_eq!(table.get(6).unwrap(), 0.75);
        assert_relative_eq!(table.get(7).unwrap(), 0.75);
        assert_relative_eq!(table.get(9).unwrap(), 0.75);
        assert_eq!(table.get(10), None);
    }

    #[test]
    fn test_table_clamps_fractions_above_one() {
        let table = FetalFractionTable::from_bin_counts(&[6], &[30], 0.1, 3, 5, 0.001);
        assert_relative_eq!(table.get(2).unwrap(), 0.999);
    }

    #[test]
    fn test_table_from_lengths_short_fragments_enriched() {
        let config = InferenceConfig::default();
        let mut shared = vec![150; 40];
        shared.extend(vec![170; 40]);
        let mut fetal = vec![150; 10];
        fetal.extend(vec![170; 6]);
        let table = FetalFractionTable::from_lengths(&shared, &fetal, 0.1, &config);
        // 150 falls in (147, 150], 170 in (168, 171]
        assert_relative_eq!(table.get(150).unwrap(), 20.0 / 50.0);
        assert_relative_eq!(table.get(170).unwrap(), 12.0 / 46.0);
        assert_relative_eq!(table.get(160).unwrap(), 20.0 / 50.0);
        assert_relative_eq!(table.get(100).unwrap(), 0.1);
    }

    #[test]
    fn test_model_from_inputs_requires_fragments() {
        let config = InferenceConfig::default();
        let inputs = FetalFractionInputs::default();
        assert!(FetalFractionModel::from_inputs(&inputs, &config, None).is_err());
        let model = FetalFractionModel::from_inputs(&inputs, &config, Some(0.08)).unwrap();
        assert_eq!(model.total, 0.08);
        assert_eq!(model.table.get(200), Some(0.08));
    }

    #[test]
    fn test_model_from_inputs_keeps_table_within_unit_range() {
        let config = InferenceConfig::default();
        let site = InformativeSite::classify(&locus("0/0", "1/1")).unwrap();
        let mut inputs = FetalFractionInputs::default();
        inputs.observe(&site, &Fragment::new("A", 160, false, "m1"));
        for i in 0..3 {
            inputs.observe(&site, &Fragment::new("G", 160, false, format!("f{}", i)));
        }
        assert_relative_eq!(inputs.total_fetal_fraction().unwrap(), 1.5);

        let model = FetalFractionModel::from_inputs(&inputs, &config, None).unwrap();
        assert_relative_eq!(model.total, 1.0 - config.err_rate);
        assert_relative_eq!(model.table.get(160).unwrap(), 1.0 - config.err_rate);
        assert!(model.table.values().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_table_clamps_inherited_total() {
        let table = FetalFractionTable::from_bin_counts(&[1, 1], &[3, 3], 1.5, 3, 5, 0.01);
        assert_eq!(table.max_length(), 6);
        assert!(table.values().iter().all(|&v| v == 1.0 - 0.01));
        let empty = FetalFractionTable::from_bin_counts(&[], &[], 1.5, 3, 5, 0.01);
        assert_eq!(empty.values(), &[1.0 - 0.01]);
    }

    #[test]
    fn test_model_clamps_total() {
        let config = InferenceConfig::default();
        let table = FetalFractionTable::from_lengths(&[], &[], 1.2, &config);
        let model = FetalFractionModel::new(1.2, table, 0.01);
        assert_relative_eq!(model.total, 0.99);
    }

    #[test]
    fn test_model_tsv_round_trip() {
        let table = FetalFractionTable::from_bin_counts(&[10, 2], &[10, 6], 0.1, 3, 5, 0.001);
        let model = FetalFractionModel::new(0.1, table, 0.001);
        let mut buffer = Vec::new();
        model.write_tsv(&mut buffer).unwrap();
        let parsed = FetalFractionModel::from_reader(buffer.as_slice()).unwrap();
        assert_eq!(parsed, model);
    }

    #[test]
    fn test_model_from_reader_rejects_gaps() {
        let data = "#total_fetal_fraction=0.1\n#window=3\n0\t0.1\n2\t0.1\n";
        assert!(FetalFractionModel::from_reader(data.as_bytes()).is_err());
        let data = "#window=3\n0\t0.1\n";
        assert!(FetalFractionModel::from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_model_from_reader_rejects_values_outside_unit_range() {
        for value in ["1.5", "-0.1", "NaN"] {
            let data = format!("#total_fetal_fraction=0.1\n#window=3\n0\t0.1\n1\t{}\n", value);
            let err = FetalFractionModel::from_reader(data.as_bytes()).unwrap_err();
            assert!(err.contains("line 4"), "{}", err);
        }
        let data = "#total_fetal_fraction=1.2\n#window=3\n0\t0.1\n";
        assert!(FetalFractionModel::from_reader(data.as_bytes()).is_err());
        let data = "#total_fetal_fraction=0.1\n#window=0\n0\t0.1\n";
        assert!(FetalFractionModel::from_reader(data.as_bytes()).is_err());
        let data = "#total_fetal_fraction=0.1\n#window=3\n0\t1\n";
        assert!(FetalFractionModel::from_reader(data.as_bytes()).is_ok());
    }
}
