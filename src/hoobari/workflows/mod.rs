mod fetal_genotype;

pub use fetal_genotype::{analyze as analyze_locus, FetalCall, LocusResult, Params};
