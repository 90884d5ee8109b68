use crate::hoobari::{
    fragments::FragmentStore,
    likelihoods::{calculate_likelihoods, EvidenceModel},
    locus::Locus,
    posteriors::{calculate_posteriors, PosteriorResult},
    priors::calculate_priors,
};
use crate::utils::QualityMode;

pub struct Params {
    pub model: EvidenceModel,
    pub total_fetal_fraction: f64,
    pub err_rate: f64,
    pub quality_mode: QualityMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetalCall {
    pub priors: [f64; 3],
    pub log_likelihoods: [f64; 3],
    pub posterior: PosteriorResult,
}

/// Outcome for one locus; no call is made where the maternal genotype is
/// not a bi-allelic call.
#[derive(Debug, Clone, PartialEq)]
pub struct LocusResult {
    pub call: Option<FetalCall>,
}

impl LocusResult {
    pub fn empty() -> LocusResult {
        LocusResult { call: None }
    }
}

pub fn analyze(locus: &Locus, params: &Params, store: &dyn FragmentStore) -> LocusResult {
    if locus.maternal_gt.called().is_none() {
        log::debug!(
            "{}: Skipping locus with maternal genotype {}",
            locus.id(),
            locus.maternal_gt
        );
        return LocusResult::empty();
    }

    let priors = calculate_priors(locus.maternal_gt, locus.paternal_gt);
    let log_likelihoods = calculate_likelihoods(
        locus,
        store,
        &params.model,
        params.total_fetal_fraction,
        params.err_rate,
    );
    let posterior = calculate_posteriors(&priors, &log_likelihoods, params.quality_mode);
    log::debug!(
        "{}: priors={:?} posteriors={:?} call={} qual={}",
        locus.id(),
        priors,
        posterior.posteriors,
        posterior.prediction,
        posterior.quality
    );

    LocusResult {
        call: Some(FetalCall {
            priors,
            log_likelihoods,
            posterior,
        }),
    }
}
