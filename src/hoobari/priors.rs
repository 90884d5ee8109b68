use crate::hoobari::genotype::ParentalGenotype;

const FLAT_PRIOR: [f64; 3] = [1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0];

/// Mendelian prior over the fetal genotypes (hom-ref, het, hom-alt), assuming
/// each parent transmits the alternate allele with probability `g / 2`.
///
/// Without two called parental genotypes the prior is flat.
pub fn calculate_priors(maternal: ParentalGenotype, paternal: ParentalGenotype) -> [f64; 3] {
    let (Some(maternal), Some(paternal)) = (maternal.called(), paternal.called()) else {
        return FLAT_PRIOR;
    };

    let p_m = maternal.alt_fraction();
    let p_p = paternal.alt_fraction();
    [
        (1.0 - p_m) * (1.0 - p_p),
        p_m * (1.0 - p_p) + (1.0 - p_m) * p_p,
        p_m * p_p,
    ]
}
