pub mod call;
pub mod fraction;

use crate::hoobari::{
    fetal_fraction::InformativeSites,
    locus::read_loci,
    shards::{scan_shards, ScanOptions, ShardScan},
};
use crate::utils::Result;
use rayon::ThreadPoolBuilder;
use std::path::{Path, PathBuf};

fn initialize_thread_pool(num_threads: usize) -> Result<rayon::ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("hoobari-{}", i))
        .start_handler(|_thread_index| {
            log::trace!("Initialized thread {:?}", std::thread::current().id());
        })
        .build()
        .map_err(|e| format!("Failed to initialize thread pool: {}", e))
}

/// Collects informative sites from the loci table and scans the fragment
/// shards on `pool`.
fn scan_fragments(
    pool: &rayon::ThreadPool,
    loci_path: &Path,
    fragments_paths: &[PathBuf],
    options: ScanOptions,
) -> Result<ShardScan> {
    let sites = InformativeSites::from_loci(&read_loci(loci_path)?);
    if sites.is_empty() {
        log::warn!("No informative sites found in {}", loci_path.display());
    }
    pool.install(|| scan_shards(fragments_paths, &sites, options))
}
