use super::{initialize_thread_pool, scan_fragments};
use crate::cli::CallArgs;
use crate::hoobari::{
    config::InferenceConfig,
    fetal_fraction::{FetalFractionInputs, FetalFractionModel},
    fragments::FragmentStore,
    likelihoods::EvidenceModel,
    locus::{stream_loci_into_channel, Locus},
    shards::ScanOptions,
    workflows::{analyze_locus, LocusResult, Params},
    writers::VcfWriter,
};
use crate::utils::{create_writer, open_table_reader, ModelKind, Result};
use crossbeam_channel::{bounded, Sender};
use rayon::iter::{ParallelBridge, ParallelIterator};
use std::{
    path::Path,
    sync::Arc,
    thread::{self},
};

const CHANNEL_BUFFER_SIZE: usize = 2048;

pub fn call(args: CallArgs) -> Result<()> {
    let config = args.inference_config();
    log::debug!("Inference configuration: {:?}", config);

    log::debug!(
        "Initializing thread pool with {} threads...",
        args.num_threads
    );
    let pool = initialize_thread_pool(args.num_threads)?;

    let options = ScanOptions {
        keep_fragments: true,
        region: args.region.as_ref(),
    };
    let scan = scan_fragments(&pool, &args.loci_path, &args.fragments_paths, options)?;
    let mut store = scan.store;

    let fetal_fraction = load_fetal_fraction(
        args.fraction_table.as_deref(),
        &scan.inputs,
        &config,
        args.total_fetal_fraction,
    )?;
    log::info!(
        "Total fetal fraction: {:.4}, model: {}",
        fetal_fraction.total,
        config.model
    );
    if let Some(rate) = scan.inputs.observed_error_rate() {
        log::info!(
            "Observed error rate at homozygous parental sites: {:.2e} (using {:.2e})",
            rate,
            config.err_rate
        );
    }
    if config.model == ModelKind::Origin {
        log::info!(
            "Flagging {} known fetal reads",
            scan.inputs.known_fetal_reads.len()
        );
        store.set_known_fetal_reads(scan.inputs.known_fetal_reads);
    }

    let workflow_params = Arc::new(Params {
        model: EvidenceModel::new(config.model, Arc::new(fetal_fraction.table)),
        total_fetal_fraction: fetal_fraction.total,
        err_rate: config.err_rate,
        quality_mode: config.quality_mode,
    });
    let store: Arc<dyn FragmentStore> = Arc::new(store);

    let mut vcf_writer = VcfWriter::new(
        create_writer(&args.output_prefix, "vcf")?,
        &args.sample_name,
        fetal_fraction.total,
    )?;

    let (sender_locus, receiver_locus) = bounded(CHANNEL_BUFFER_SIZE);
    let loci_path = args.loci_path.clone();
    let region = args.region.clone();
    let locus_stream_thread = thread::spawn(move || {
        stream_loci_into_channel(&loci_path, region.as_ref(), sender_locus)
    });

    let (sender_result, receiver_result) = bounded(CHANNEL_BUFFER_SIZE);
    let writer_thread = thread::spawn(move || -> Result<usize> {
        let mut num_written = 0;
        for (locus, results) in &receiver_result {
            vcf_writer.write(&locus, &results)?;
            num_written += 1;
        }
        vcf_writer.flush()?;
        Ok(num_written)
    });

    pool.install(|| {
        receiver_locus
            .into_iter()
            .par_bridge()
            .for_each_with(&sender_result, |s, locus_result| match locus_result {
                Ok(locus) => process_locus(locus, &workflow_params, store.as_ref(), s),
                Err(err) => log::error!("Locus processing: {:#}", err),
            });
    });

    // Clean-up
    drop(sender_result);
    let writer_result = writer_thread.join().expect("Writer thread panicked");
    log::trace!("Writer thread finished");
    match locus_stream_thread
        .join()
        .expect("Locus stream thread panicked")
    {
        Ok(_) => log::trace!("Locus stream thread finished"),
        Err(e) => log::error!("Locus streaming failed: {}", e),
    }

    let num_written = writer_result?;
    log::info!("Wrote {} records to {}.vcf", num_written, args.output_prefix);
    Ok(())
}

/// Reads a precomputed fetal fraction table when given, otherwise estimates
/// the model from the scanned fragments.
fn load_fetal_fraction(
    table_path: Option<&Path>,
    inputs: &FetalFractionInputs,
    config: &InferenceConfig,
    total_override: Option<f64>,
) -> Result<FetalFractionModel> {
    match table_path {
        Some(path) => {
            log::info!("Loading fetal fraction table from {}", path.display());
            let model = FetalFractionModel::from_reader(open_table_reader(path)?)?;
            let total = total_override.unwrap_or(model.total);
            Ok(FetalFractionModel::new(total, model.table, config.err_rate))
        }
        None => FetalFractionModel::from_inputs(inputs, config, total_override),
    }
}

fn process_locus(
    locus: Locus,
    workflow_params: &Arc<Params>,
    store: &dyn FragmentStore,
    sender_result: &Sender<(Locus, LocusResult)>,
) {
    let results = analyze_locus(&locus, workflow_params, store);
    if let Err(e) = sender_result.send((locus, results)) {
        log::error!("Failed to send locus result to writer thread: {}", e);
    }
}
