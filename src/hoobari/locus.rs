use crate::hoobari::genotype::ParentalGenotype;
use crate::utils::{open_table_reader, parse_field, table_lines, GenomicRegion, Result};
use crossbeam_channel::Sender;
use std::{
    io::{BufRead, BufReader, Read as ioRead},
    path::Path,
};

/// Candidate site with the parental genotypes observed there.
#[derive(Debug, Clone, PartialEq)]
pub struct Locus {
    pub chrom: String,
    /// 1-based position.
    pub pos: u32,
    pub ref_allele: String,
    pub alt_allele: String,
    pub maternal_gt: ParentalGenotype,
    pub paternal_gt: ParentalGenotype,
}

impl Locus {
    /// Parses a loci table line: `chrom pos ref alt maternal_gt paternal_gt`.
    pub fn new(line: &str) -> Result<Self> {
        const EXPECTED_FIELD_COUNT: usize = 6;
        let split_line: Vec<&str> = line.split_whitespace().collect();
        if split_line.len() != EXPECTED_FIELD_COUNT {
            return Err(format!(
                "Expected {} fields in the format 'chrom pos ref alt maternal_gt paternal_gt', found {}: {}",
                EXPECTED_FIELD_COUNT,
                split_line.len(),
                line
            ));
        }

        let (chrom, pos, ref_allele, alt_alleles, maternal, paternal) = match &split_line[..] {
            [chrom, pos, ref_allele, alt_alleles, maternal, paternal] => {
                (*chrom, *pos, *ref_allele, *alt_alleles, *maternal, *paternal)
            }
            _ => unreachable!(),
        };

        let pos: u32 = parse_field(pos, "position")?;
        if pos == 0 {
            return Err("Position must be 1-based, found 0".to_string());
        }

        // Only the first alternate allele is modeled
        let alt_allele = alt_alleles.split(',').next().unwrap_or(alt_alleles);
        if ref_allele.is_empty() || alt_allele.is_empty() {
            return Err(format!("Empty allele at {}:{}", chrom, pos));
        }

        Ok(Locus {
            chrom: chrom.to_string(),
            pos,
            ref_allele: ref_allele.to_uppercase(),
            alt_allele: alt_allele.to_uppercase(),
            maternal_gt: ParentalGenotype::parse(maternal),
            paternal_gt: ParentalGenotype::parse(paternal),
        })
    }

    pub fn id(&self) -> String {
        format!(
            "{}:{}_{}/{}",
            self.chrom, self.pos, self.ref_allele, self.alt_allele
        )
    }

    /// Length difference between the reference and alternate alleles; positive
    /// for deletions, negative for insertions.
    pub fn indel_len(&self) -> i64 {
        self.ref_allele.len() as i64 - self.alt_allele.len() as i64
    }

    pub fn is_snp(&self) -> bool {
        self.ref_allele.len() == 1 && self.alt_allele.len() == 1
    }
}

pub fn stream_loci_into_channel(
    loci_path: &Path,
    region: Option<&GenomicRegion>,
    sender: Sender<Result<Locus>>,
) -> Result<()> {
    let loci_reader = open_table_reader(loci_path)?;

    for locus_result in get_loci(loci_reader) {
        if let Ok(locus) = &locus_result {
            if region.is_some_and(|r| !r.contains(&locus.chrom, locus.pos)) {
                continue;
            }
        }
        sender
            .send(locus_result)
            .map_err(|e| format!("Failed to send locus through channel: {}", e))?;
    }
    Ok(())
}

pub fn get_loci<R: BufRead>(loci_reader: R) -> impl Iterator<Item = Result<Locus>> {
    table_lines(loci_reader).map(|result_line| {
        result_line.and_then(|(line_number, line)| {
            Locus::new(&line).map_err(|e| format!("Error at loci line {}: {}", line_number, e))
        })
    })
}

pub fn read_loci(loci_path: &Path) -> Result<Vec<Locus>> {
    let loci_reader: BufReader<Box<dyn ioRead>> = open_table_reader(loci_path)?;
    get_loci(loci_reader).collect()
}
