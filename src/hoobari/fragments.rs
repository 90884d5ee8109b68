use crate::utils::{normalize_contig, parse_field, table_lines, Result};
use std::collections::{HashMap, HashSet};
use std::io::BufRead;

/// A sequenced cfDNA fragment overlapping a locus.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Allele observed on the fragment at the locus.
    pub allele: String,
    /// Insert size of the read pair.
    pub length: u32,
    /// Set when independent evidence places the fragment in the fetal pool.
    pub is_fetal: bool,
    pub read_name: String,
}

impl Fragment {
    pub fn new(allele: impl Into<String>, length: u32, is_fetal: bool, read_name: impl Into<String>) -> Self {
        Self {
            allele: allele.into(),
            length,
            is_fetal,
            read_name: read_name.into(),
        }
    }

    /// Fragment length with the length difference of an indel at the locus removed.
    pub fn corrected_length(&self, indel_len: i64) -> u32 {
        (self.length as i64 - indel_len).max(0) as u32
    }
}

/// Read access to the fragments observed at each locus.
///
/// Implementations guarantee well-formed fragments; the inference engine does
/// not validate them again.
pub trait FragmentStore: Send + Sync {
    fn fragments_at(&self, chrom: &str, pos: u32) -> Vec<Fragment>;
}

/// In-memory fragment store, keyed by normalized contig and 1-based position.
#[derive(Debug, Default)]
pub struct MemoryFragmentStore {
    fragments: HashMap<String, HashMap<u32, Vec<Fragment>>>,
    known_fetal_reads: HashSet<String>,
    fragment_count: usize,
}

impl MemoryFragmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, chrom: &str, pos: u32, fragment: Fragment) {
        self.fragments
            .entry(normalize_contig(chrom).to_string())
            .or_default()
            .entry(pos)
            .or_default()
            .push(fragment);
        self.fragment_count += 1;
    }

    /// Moves all fragments of `other` into `self`.
    pub fn merge(&mut self, other: MemoryFragmentStore) {
        for (chrom, positions) in other.fragments {
            let chrom_entry = self.fragments.entry(chrom).or_default();
            for (pos, fragments) in positions {
                chrom_entry.entry(pos).or_default().extend(fragments);
            }
        }
        self.known_fetal_reads.extend(other.known_fetal_reads);
        self.fragment_count += other.fragment_count;
    }

    /// Reads listed here are reported as fetal wherever they are observed.
    pub fn set_known_fetal_reads(&mut self, reads: HashSet<String>) {
        self.known_fetal_reads = reads;
    }

    pub fn len(&self) -> usize {
        self.fragment_count
    }

    pub fn is_empty(&self) -> bool {
        self.fragment_count == 0
    }
}

impl FragmentStore for MemoryFragmentStore {
    fn fragments_at(&self, chrom: &str, pos: u32) -> Vec<Fragment> {
        let Some(fragments) = self
            .fragments
            .get(normalize_contig(chrom))
            .and_then(|positions| positions.get(&pos))
        else {
            return Vec::new();
        };

        fragments
            .iter()
            .map(|fragment| {
                let mut fragment = fragment.clone();
                fragment.is_fetal |= self.known_fetal_reads.contains(&fragment.read_name);
                fragment
            })
            .collect()
    }
}

/// One row of a fragment shard: `chrom pos allele length read_name [is_fetal]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentRecord {
    pub chrom: String,
    pub pos: u32,
    pub fragment: Fragment,
}

impl FragmentRecord {
    pub fn new(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let (chrom, pos, allele, length, read_name, is_fetal) = match &fields[..] {
            [chrom, pos, allele, length, read_name] => (*chrom, *pos, *allele, *length, *read_name, "0"),
            [chrom, pos, allele, length, read_name, is_fetal] => {
                (*chrom, *pos, *allele, *length, *read_name, *is_fetal)
            }
            _ => {
                return Err(format!(
                    "Expected 5 or 6 fields in the format 'chrom pos allele length read_name [is_fetal]', found {}: {}",
                    fields.len(),
                    line
                ))
            }
        };

        let is_fetal = match is_fetal {
            "1" | "true" => true,
            "0" | "false" => false,
            _ => return Err(format!("Invalid is_fetal value: '{}'", is_fetal)),
        };

        Ok(FragmentRecord {
            chrom: chrom.to_string(),
            pos: parse_field(pos, "position")?,
            fragment: Fragment::new(
                allele.to_uppercase(),
                parse_field(length, "length")?,
                is_fetal,
                read_name,
            ),
        })
    }
}

pub fn get_fragment_records<R: BufRead>(reader: R) -> impl Iterator<Item = Result<FragmentRecord>> {
    table_lines(reader).map(|result_line| {
        result_line.and_then(|(line_number, line)| {
            FragmentRecord::new(&line)
                .map_err(|e| format!("Error at fragment line {}: {}", line_number, e))
        })
    })
}
