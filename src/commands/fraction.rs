use super::{initialize_thread_pool, scan_fragments};
use crate::cli::FractionArgs;
use crate::hoobari::{fetal_fraction::FetalFractionModel, shards::ScanOptions};
use crate::utils::{create_writer, Result};

pub fn fraction(args: FractionArgs) -> Result<()> {
    let config = args.fraction.inference_config();
    let pool = initialize_thread_pool(args.num_threads)?;
    let scan = scan_fragments(
        &pool,
        &args.loci_path,
        &args.fragments_paths,
        ScanOptions::default(),
    )?;

    let model = FetalFractionModel::from_inputs(&scan.inputs, &config, None)?;
    log::info!(
        "Total fetal fraction: {:.4} ({} shared, {} fetal fragments); {} known fetal reads",
        model.total,
        scan.inputs.shared.len(),
        scan.inputs.fetal.len(),
        scan.inputs.known_fetal_reads.len()
    );
    if let Some(rate) = scan.inputs.observed_error_rate() {
        log::info!("Observed error rate at homozygous parental sites: {:.2e}", rate);
    }

    let mut writer = create_writer(&args.output_prefix, "fetal_fraction.tsv")?;
    model.write_tsv(&mut writer)?;
    log::info!(
        "Wrote fetal fraction table to {}.fetal_fraction.tsv",
        args.output_prefix
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use crate::utils::open_table_reader;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_fraction_writes_readable_table() {
        let dir = tempfile::tempdir().unwrap();
        let loci = dir.path().join("loci.tsv");
        std::fs::write(&loci, "chr1\t100\tA\tG\t1/1\t0/0\nchr1\t200\tA\tG\t0/0\t0/0\n").unwrap();

        let shard = dir.path().join("shard.tsv.gz");
        let file = std::fs::File::create(&shard).unwrap();
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        for i in 0..30 {
            writeln!(encoder, "chr1\t100\tG\t170\tm{}", i).unwrap();
        }
        for i in 0..10 {
            writeln!(encoder, "chr1\t100\tA\t145\tf{}", i).unwrap();
        }
        writeln!(encoder, "chr1\t200\tG\t160\te1").unwrap();
        writeln!(encoder, "chr1\t200\tA\t160\te2").unwrap();
        encoder.finish().unwrap();

        let prefix = dir.path().join("sample");
        let cli = Cli::try_parse_from([
            "hoobari",
            "fraction",
            "--loci",
            loci.to_str().unwrap(),
            "--fragments",
            shard.to_str().unwrap(),
            "--output-prefix",
            prefix.to_str().unwrap(),
        ])
        .unwrap();
        let Command::Fraction(args) = cli.command else {
            panic!("Expected the fraction subcommand");
        };
        fraction(args).unwrap();

        let table_path = dir.path().join("sample.fetal_fraction.tsv");
        let reader = open_table_reader(&table_path).unwrap();
        let model = FetalFractionModel::from_reader(reader).unwrap();
        assert_eq!(model.total, 0.5);
        assert_eq!(model.table.max_length(), 498);
        // Shared and fetal fragments never share a length bin
        assert!(model.table.values().iter().all(|&v| v == 0.5));
    }
}
