use crate::utils::{ModelKind, QualityMode};

pub const DEFAULT_ERR_RATE: f64 = 0.0003;
pub const DEFAULT_LENGTH_WINDOW: u32 = 3;
pub const DEFAULT_MAX_FRAGMENT_LEN: u32 = 500;
pub const DEFAULT_MIN_BIN_SUPPORT: usize = 5;

/// Run-wide inference settings. Built once from the command line and passed
/// by reference to every component; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceConfig {
    pub model: ModelKind,
    /// Sequencing error floor applied to maternal allele probabilities and to
    /// the fetal fraction of fragments known to be fetal.
    pub err_rate: f64,
    /// Width of the fragment-length bins of the fetal fraction table.
    pub length_window: u32,
    /// Fragment lengths beyond the table fall back to the total fetal fraction.
    pub max_fragment_len: u32,
    /// A length bin is trusted only when both fragment classes exceed this count.
    pub min_bin_support: usize,
    pub quality_mode: QualityMode,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::Simple,
            err_rate: DEFAULT_ERR_RATE,
            length_window: DEFAULT_LENGTH_WINDOW,
            max_fragment_len: DEFAULT_MAX_FRAGMENT_LEN,
            min_bin_support: DEFAULT_MIN_BIN_SUPPORT,
            quality_mode: QualityMode::HomRef,
        }
    }
}
