//! Posterior distribution over fetal genotypes, MAP call and call quality.

use crate::hoobari::genotype::Genotype;
use crate::utils::{decimal, math, QualityMode};
use bigdecimal::BigDecimal;
use num_traits::Zero;
use std::fmt;

/// Sentinel reported when the error probability is exactly zero.
pub const MAX_QUALITY: f64 = math::MAX_PHRED;

/// Decimal precisions tried in order when `f64` exponentials overflow.
const INITIAL_PRECISION: u64 = 28;
const MAX_PRECISION: u64 = 1 << 11;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quality {
    /// The error probability is exactly zero.
    Max,
    Phred(f64),
}

impl Quality {
    fn from_log10_error(log10_error: f64) -> Self {
        if log10_error == f64::NEG_INFINITY {
            Quality::Max
        } else {
            Quality::Phred((-10.0 * log10_error).max(0.0))
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Quality::Max => MAX_QUALITY,
            Quality::Phred(q) => *q,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Quality::Max => write!(f, "1e+06"),
            Quality::Phred(q) if q == 0.0 => write!(f, "0"),
            Quality::Phred(q) if q < 1.0 => write!(f, "{:.3e}", q),
            Quality::Phred(q) => write!(f, "{}", (q * 100.0).round() / 100.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PosteriorResult {
    pub posteriors: [f64; 3],
    pub prediction: Genotype,
    pub quality: Quality,
    /// Unnormalized log posteriors (log prior plus log likelihood).
    pub joint: [f64; 3],
}

/// Combines priors and natural-log likelihoods into normalized posteriors.
///
/// Values are shifted by the smallest finite joint log probability before
/// exponentiation. If that still overflows `f64`, the exponentials are
/// recomputed as decimals at increasing precision until two successive
/// precisions agree. Degenerate input (no finite joint value) yields a flat
/// posterior.
pub fn calculate_posteriors(
    priors: &[f64; 3],
    log_likelihoods: &[f64; 3],
    quality_mode: QualityMode,
) -> PosteriorResult {
    let joint: [f64; 3] = std::array::from_fn(|i| priors[i].ln() + log_likelihoods[i]);
    let prediction = Genotype::from_index(math::argmax(&joint)).unwrap_or(Genotype::HomRef);
    let error_set = error_genotypes(quality_mode, prediction);

    let Some(shift) = math::min_finite(&joint) else {
        log::debug!("No finite joint probability {:?}, using a flat posterior", joint);
        let posteriors = [1.0 / 3.0; 3];
        let error: f64 = error_set.iter().map(|gt| posteriors[gt.index()]).sum();
        return PosteriorResult {
            posteriors,
            prediction,
            quality: Quality::from_log10_error(error.log10()),
            joint,
        };
    };

    let exps = joint.map(|value| {
        let e = (value - shift).exp();
        if e.is_nan() {
            0.0
        } else {
            e
        }
    });
    let total: f64 = exps.iter().sum();

    let (posteriors, log10_error) = if total.is_finite() {
        let posteriors = exps.map(|e| e / total);
        let error: f64 = error_set.iter().map(|gt| posteriors[gt.index()]).sum();
        (posteriors, error.log10())
    } else {
        decimal_posteriors(&joint, shift, &error_set)
    };

    PosteriorResult {
        posteriors,
        prediction,
        quality: Quality::from_log10_error(log10_error),
        joint,
    }
}

fn error_genotypes(quality_mode: QualityMode, prediction: Genotype) -> Vec<Genotype> {
    match quality_mode {
        QualityMode::HomRef => vec![Genotype::HomRef],
        QualityMode::Called => Genotype::ALL
            .into_iter()
            .filter(|&gt| gt != prediction)
            .collect(),
    }
}

/// Normalized posteriors and the log10 error probability computed from
/// decimal exponentials.
fn decimal_posteriors(joint: &[f64; 3], shift: f64, error_set: &[Genotype]) -> ([f64; 3], f64) {
    let mut precision = INITIAL_PRECISION;
    let mut previous = decimal_posteriors_at(joint, shift, error_set, precision);
    while precision * 2 <= MAX_PRECISION {
        precision *= 2;
        log::debug!("Recomputing posteriors at {} digits", precision);
        let current = decimal_posteriors_at(joint, shift, error_set, precision);
        if current == previous {
            break;
        }
        previous = current;
    }
    previous
}

fn decimal_posteriors_at(
    joint: &[f64; 3],
    shift: f64,
    error_set: &[Genotype],
    precision: u64,
) -> ([f64; 3], f64) {
    let exps: Vec<BigDecimal> = joint
        .iter()
        .map(|value| decimal::exp(value - shift, precision))
        .collect();
    let total = exps.iter().fold(BigDecimal::zero(), |acc, e| acc + e);
    let log10_total = decimal::log10(&total);

    let posteriors = std::array::from_fn(|i| {
        if exps[i].is_zero() {
            0.0
        } else {
            10f64.powf(decimal::log10(&exps[i]) - log10_total).min(1.0)
        }
    });
    let error = error_set
        .iter()
        .fold(BigDecimal::zero(), |acc, gt| acc + &exps[gt.index()]);
    (posteriors, decimal::log10(&error) - log10_total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hoobari::{
        fragments::{Fragment, MemoryFragmentStore},
        likelihoods::{calculate_likelihoods, EvidenceModel},
        locus::Locus,
        priors::calculate_priors,
    };
    use approx::assert_relative_eq;

    const ERR: f64 = 0.0003;

    fn alt_ref_likelihoods(num_alt: usize, num_ref: usize, ff: f64) -> [f64; 3] {
        let locus = Locus::new("chr1\t100\tA\tG\t0/1\t0/1").unwrap();
        let mut store = MemoryFragmentStore::new();
        for i in 0..num_alt {
            store.insert("1", 100, Fragment::new("G", 160, false, format!("alt{}", i)));
        }
        for i in 0..num_ref {
            store.insert("1", 100, Fragment::new("A", 160, false, format!("ref{}", i)));
        }
        calculate_likelihoods(&locus, &store, &EvidenceModel::Simple, ff, ERR)
    }

    fn assert_normalized(posteriors: &[f64; 3]) {
        assert!(posteriors.iter().all(|p| (0.0..=1.0).contains(p)));
        assert_relative_eq!(posteriors.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_evidence_returns_prior() {
        let priors = calculate_priors(Genotype::Het.into(), Genotype::Het.into());
        let result = calculate_posteriors(&priors, &[0.0; 3], QualityMode::HomRef);
        for (posterior, prior) in result.posteriors.iter().zip(priors) {
            assert_relative_eq!(*posterior, prior, epsilon = 1e-12);
        }
        assert_eq!(result.prediction, Genotype::Het);
        assert_relative_eq!(result.quality.value(), -10.0 * 0.25_f64.log10(), epsilon = 1e-9);
    }

    #[test]
    fn test_posteriors_are_normalized() {
        let priors = calculate_priors(Genotype::Het.into(), Genotype::HomRef.into());
        for (num_alt, num_ref) in [(0, 10), (3, 30), (12, 40), (50, 50)] {
            let ll = alt_ref_likelihoods(num_alt, num_ref, 0.1);
            let result = calculate_posteriors(&priors, &ll, QualityMode::HomRef);
            assert_normalized(&result.posteriors);
            assert_eq!(result.posteriors[2], 0.0);
        }
    }

    #[test]
    fn test_more_alt_fragments_shift_mass_up() {
        let priors = calculate_priors(Genotype::Het.into(), Genotype::Het.into());
        let mut previous: Option<PosteriorResult> = None;
        for num_alt in [10, 12, 14, 16, 18] {
            let ll = alt_ref_likelihoods(num_alt, 20, 0.15);
            let result = calculate_posteriors(&priors, &ll, QualityMode::HomRef);
            if let Some(previous) = previous {
                let ratio =
                    |r: &PosteriorResult, hi: usize, lo: usize| r.posteriors[hi] / r.posteriors[lo];
                assert!(ratio(&result, 1, 0) > ratio(&previous, 1, 0));
                assert!(ratio(&result, 2, 1) > ratio(&previous, 2, 1));
            }
            previous = Some(result);
        }
    }

    #[test]
    fn test_saturated_alt_evidence_uses_decimal_path() {
        let priors = calculate_priors(Genotype::Het.into(), Genotype::Het.into());
        let ll = alt_ref_likelihoods(200, 0, 1.0 - ERR);
        let joint: Vec<f64> = (0..3).map(|i| priors[i].ln() + ll[i]).collect();
        let shift = math::min_finite(&joint).unwrap();
        assert!(joint.iter().any(|j| (j - shift).exp().is_infinite()));

        let result = calculate_posteriors(&priors, &ll, QualityMode::HomRef);
        assert_eq!(result.prediction, Genotype::HomAlt);
        assert_eq!(math::argmax(&result.posteriors), 2);
        assert_normalized(&result.posteriors);
        assert!(result.quality.value() > 30.0);
        assert!(result.quality.value() < MAX_QUALITY);
        // P(hom-ref) is far below f64 range yet the quality stays exact
        let expected = -10.0 * (joint[0] - joint[2]) / std::f64::consts::LN_10;
        assert_relative_eq!(result.quality.value(), expected, max_relative = 1e-9);
    }

    #[test]
    fn test_reference_evidence_with_hom_alt_father() {
        let priors = calculate_priors(Genotype::Het.into(), Genotype::HomAlt.into());
        let locus = Locus::new("chr1\t100\tA\tG\t0/1\t1/1").unwrap();
        let mut store = MemoryFragmentStore::new();
        for i in 0..20 {
            store.insert("1", 100, Fragment::new("A", 160, false, format!("r{}", i)));
        }
        let ll = calculate_likelihoods(&locus, &store, &EvidenceModel::Simple, 0.1, ERR);
        let result = calculate_posteriors(&priors, &ll, QualityMode::HomRef);
        assert!(matches!(result.prediction, Genotype::HomRef | Genotype::Het));
        assert!(result.posteriors[1] > result.posteriors[2]);
        assert_eq!(result.quality, Quality::Max);
    }

    #[test]
    fn test_degenerate_input_gives_flat_posterior() {
        let result = calculate_posteriors(&[0.0; 3], &[0.0; 3], QualityMode::HomRef);
        assert_eq!(result.posteriors, [1.0 / 3.0; 3]);
        assert_eq!(result.prediction, Genotype::HomRef);

        let ll = [f64::NAN, f64::NAN, 0.0];
        let result = calculate_posteriors(&[0.5, 0.5, 0.0], &ll, QualityMode::HomRef);
        assert_eq!(result.posteriors, [1.0 / 3.0; 3]);
    }

    #[test]
    fn test_nan_likelihood_is_ignored() {
        let ll = [f64::NAN, -1.0, -1.0];
        let result = calculate_posteriors(&[0.25, 0.5, 0.25], &ll, QualityMode::HomRef);
        assert_eq!(result.prediction, Genotype::Het);
        assert_eq!(result.posteriors[0], 0.0);
        assert_normalized(&result.posteriors);
        assert_eq!(result.quality, Quality::Max);
    }

    #[test]
    fn test_called_quality_mode() {
        let priors = [0.25, 0.5, 0.25];
        let ll = alt_ref_likelihoods(200, 0, 1.0 - ERR);
        let hom_ref = calculate_posteriors(&priors, &ll, QualityMode::HomRef);
        let called = calculate_posteriors(&priors, &ll, QualityMode::Called);
        assert_eq!(called.prediction, Genotype::HomAlt);
        for (a, b) in called.posteriors.iter().zip(hom_ref.posteriors) {
            assert_relative_eq!(*a, b, epsilon = 1e-12);
        }
        // The het alternative dominates the error mass
        assert!(called.quality.value() < hom_ref.quality.value());
        assert!(called.quality.value() > 30.0);

        let flat = calculate_posteriors(&priors, &[0.0; 3], QualityMode::Called);
        assert_relative_eq!(flat.quality.value(), -10.0 * 0.5_f64.log10(), epsilon = 1e-9);
    }

    #[test]
    fn test_quality_formatting() {
        assert_eq!(Quality::Max.to_string(), "1e+06");
        assert_eq!(Quality::Phred(0.0).to_string(), "0");
        assert_eq!(Quality::Phred(0.5).to_string(), "5.000e-1");
        assert_eq!(Quality::Phred(12.3456).to_string(), "12.35");
        assert_eq!(Quality::Phred(30.0).to_string(), "30");
        assert_eq!(Quality::from_log10_error(0.0), Quality::Phred(0.0));
    }
}
