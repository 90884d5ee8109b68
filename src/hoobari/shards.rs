//! Parallel scan of fragment shard files.
//!
//! Each shard is read by one rayon task into a partial fragment store and
//! partial fetal fraction inputs; partial results are merged by extension.

use crate::hoobari::{
    fetal_fraction::{FetalFractionInputs, InformativeSites},
    fragments::{get_fragment_records, MemoryFragmentStore},
};
use crate::utils::{open_table_reader, GenomicRegion, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct ShardScan {
    pub store: MemoryFragmentStore,
    pub inputs: FetalFractionInputs,
}

impl ShardScan {
    pub fn merge(mut self, other: ShardScan) -> ShardScan {
        self.store.merge(other.store);
        self.inputs = self.inputs.merge(other.inputs);
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions<'a> {
    /// Fragments are kept in the store only when set; fetal fraction inputs
    /// are always collected.
    pub keep_fragments: bool,
    /// Restricts the fragments kept in the store.
    pub region: Option<&'a GenomicRegion>,
}

pub fn scan_shard(
    shard_path: &Path,
    sites: &InformativeSites,
    options: ScanOptions,
) -> Result<ShardScan> {
    let reader = open_table_reader(shard_path)?;
    let mut scan = ShardScan::default();

    for record in get_fragment_records(reader) {
        let record = record.map_err(|e| format!("{}: {}", shard_path.display(), e))?;
        if let Some(site) = sites.get(&record.chrom, record.pos) {
            scan.inputs.observe(site, &record.fragment);
        }
        if options.keep_fragments
            && options
                .region
                .map_or(true, |r| r.contains(&record.chrom, record.pos))
        {
            scan.store.insert(&record.chrom, record.pos, record.fragment);
        }
    }

    log::debug!(
        "{}: kept {} fragments",
        shard_path.display(),
        scan.store.len()
    );
    Ok(scan)
}

pub fn scan_shards(
    shard_paths: &[PathBuf],
    sites: &InformativeSites,
    options: ScanOptions,
) -> Result<ShardScan> {
    log::info!(
        "Scanning {} fragment shards ({} informative sites)",
        shard_paths.len(),
        sites.len()
    );
    let scan = shard_paths
        .par_iter()
        .map(|path| scan_shard(path, sites, options))
        .try_reduce(ShardScan::default, |a, b| Ok(a.merge(b)))?;
    log::info!(
        "Loaded {} fragments; {} shared and {} fetal fragments at informative sites",
        scan.store.len(),
        scan.inputs.shared.len(),
        scan.inputs.fetal.len()
    );
    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hoobari::{fragments::FragmentStore, locus::Locus};
    use std::io::Write;

    fn write_shard(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        path
    }

    fn sites() -> InformativeSites {
        let loci = vec![
            Locus::new("chr1\t100\tA\tG\t0/0\t1/1").unwrap(),
            Locus::new("chr1\t200\tC\tT\t0/1\t0/1").unwrap(),
        ];
        InformativeSites::from_loci(&loci)
    }

    #[test]
    fn test_scan_shards_merges_partial_results() {
        let dir = tempfile::tempdir().unwrap();
        let shards = vec![
            write_shard(
                dir.path(),
                "a.tsv",
                &["chr1\t100\tA\t170\tr1", "chr1\t200\tC\t160\tr2"],
            ),
            write_shard(
                dir.path(),
                "b.tsv",
                &["1\t100\tG\t140\tr3", "1\t100\tA\t168\tr4", "1\t200\tT\t150\tr3"],
            ),
        ];
        let options = ScanOptions {
            keep_fragments: true,
            region: None,
        };
        let scan = scan_shards(&shards, &sites(), options).unwrap();
        assert_eq!(scan.store.len(), 5);
        assert_eq!(scan.store.fragments_at("chr1", 100).len(), 3);
        assert_eq!(scan.inputs.shared.len(), 2);
        assert_eq!(scan.inputs.fetal.len(), 1);
        assert!(scan.inputs.known_fetal_reads.contains("r3"));
    }

    #[test]
    fn test_scan_without_fragments_and_with_region() {
        let dir = tempfile::tempdir().unwrap();
        let shard = write_shard(
            dir.path(),
            "a.tsv",
            &["chr1\t100\tA\t170\tr1", "chr1\t200\tC\t160\tr2"],
        );

        let scan = scan_shard(&shard, &sites(), ScanOptions::default()).unwrap();
        assert!(scan.store.is_empty());
        assert_eq!(scan.inputs.shared.len(), 1);

        let region = GenomicRegion::from_string("chr1:150-250").unwrap();
        let options = ScanOptions {
            keep_fragments: true,
            region: Some(&region),
        };
        let scan = scan_shard(&shard, &sites(), options).unwrap();
        assert_eq!(scan.store.len(), 1);
        assert_eq!(scan.inputs.shared.len(), 1);
    }

    #[test]
    fn test_scan_reports_malformed_shard() {
        let dir = tempfile::tempdir().unwrap();
        let shard = write_shard(dir.path(), "bad.tsv", &["chr1\t100\tA\tlong\tr1"]);
        let err = scan_shards(&[shard], &sites(), ScanOptions::default()).unwrap_err();
        assert!(err.contains("bad.tsv"));
        assert!(err.contains("Error at fragment line 1"));
    }
}
