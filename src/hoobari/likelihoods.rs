//! Likelihood of the observed fragments under each fetal genotype.
//!
//! A fragment comes from the fetus with probability `ff` and from the mother
//! otherwise, so the chance that it shows an allele mixes the fetal allele
//! fraction with the maternal one.

use crate::hoobari::{
    fetal_fraction::FetalFractionTable,
    fragments::{Fragment, FragmentStore},
    genotype::Genotype,
    locus::Locus,
};
use crate::utils::ModelKind;
use std::sync::Arc;

/// Source of the fetal fraction assigned to each fragment.
#[derive(Debug, Clone)]
pub enum EvidenceModel {
    /// The total fetal fraction for every fragment.
    Simple,
    /// Per-length fetal fraction; lengths outside the table use the total.
    Lengths(Arc<FetalFractionTable>),
    /// As `Lengths`, but fragments known to be fetal use `1 - err_rate`.
    Origin(Arc<FetalFractionTable>),
}

impl EvidenceModel {
    pub fn new(kind: ModelKind, table: Arc<FetalFractionTable>) -> Self {
        match kind {
            ModelKind::Simple => EvidenceModel::Simple,
            ModelKind::Lengths => EvidenceModel::Lengths(table),
            ModelKind::Origin => EvidenceModel::Origin(table),
        }
    }

    pub fn fragment_fetal_fraction(
        &self,
        fragment: &Fragment,
        indel_len: i64,
        total_fetal_fraction: f64,
        err_rate: f64,
    ) -> f64 {
        let by_length = |table: &FetalFractionTable| {
            table
                .get(fragment.corrected_length(indel_len))
                .unwrap_or(total_fetal_fraction)
        };
        match self {
            EvidenceModel::Simple => total_fetal_fraction,
            EvidenceModel::Lengths(table) => by_length(table),
            EvidenceModel::Origin(table) => {
                if fragment.is_fetal {
                    1.0 - err_rate
                } else {
                    by_length(table)
                }
            }
        }
    }
}

/// Probability of one fragment showing `observed` under each fetal genotype.
/// The maternal allele probability is floored at `err_rate` so that no
/// observation is impossible; alleles other than ref and alt carry no
/// information.
pub fn calculate_fragment_likelihood(
    observed: &str,
    maternal: Genotype,
    ref_allele: &str,
    alt_allele: &str,
    fetal_fraction: f64,
    err_rate: f64,
) -> [f64; 3] {
    let ff = fetal_fraction;
    if observed == alt_allele {
        let p_maternal_alt = err_rate.max(maternal.alt_fraction());
        let maternal_part = p_maternal_alt * (1.0 - ff);
        [maternal_part, 0.5 * ff + maternal_part, ff + maternal_part]
    } else if observed == ref_allele {
        let p_maternal_ref = err_rate.max(1.0 - maternal.alt_fraction());
        let maternal_part = p_maternal_ref * (1.0 - ff);
        [ff + maternal_part, 0.5 * ff + maternal_part, maternal_part]
    } else {
        [1.0, 1.0, 1.0]
    }
}

/// Sum over the locus fragments of the natural log of each fragment
/// likelihood. Neutral (`[0, 0, 0]`) without fragments or without a called
/// maternal genotype.
pub fn calculate_likelihoods(
    locus: &Locus,
    store: &dyn FragmentStore,
    model: &EvidenceModel,
    total_fetal_fraction: f64,
    err_rate: f64,
) -> [f64; 3] {
    let mut log_likelihoods = [0.0; 3];
    let Some(maternal) = locus.maternal_gt.called() else {
        return log_likelihoods;
    };

    let fragments = store.fragments_at(&locus.chrom, locus.pos);
    let indel_len = locus.indel_len();
    for fragment in &fragments {
        let ff = model.fragment_fetal_fraction(fragment, indel_len, total_fetal_fraction, err_rate);
        let likelihoods = calculate_fragment_likelihood(
            &fragment.allele,
            maternal,
            &locus.ref_allele,
            &locus.alt_allele,
            ff,
            err_rate,
        );
        for (total, likelihood) in log_likelihoods.iter_mut().zip(likelihoods) {
            *total += likelihood.ln();
        }
    }

    log::trace!(
        "{}: {} fragments, log likelihoods {:?}",
        locus.id(),
        fragments.len(),
        log_likelihoods
    );
    log_likelihoods
}
