pub mod config;
pub mod fetal_fraction;
pub mod fragments;
pub mod genotype;
pub mod likelihoods;
pub mod locus;
pub mod posteriors;
pub mod priors;
pub mod shards;
pub mod workflows;
pub mod writers;
