use std::fmt;
use std::str::FromStr;

/// Evidence model used to pick the fetal fraction of each fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Simple,
    Lengths,
    Origin,
}

impl FromStr for ModelKind {
    type Err = &'static str;
    fn from_str(model: &str) -> Result<Self, Self::Err> {
        match model {
            "simple" => Ok(ModelKind::Simple),
            "lengths" => Ok(ModelKind::Lengths),
            "origin" => Ok(ModelKind::Origin),
            _ => Err("Invalid model. Options are: simple, lengths, origin"),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::Simple => "simple",
            ModelKind::Lengths => "lengths",
            ModelKind::Origin => "origin",
        };
        write!(f, "{}", name)
    }
}

/// Which error probability the call quality reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityMode {
    /// `-10 log10 P(hom-ref)`: confidence that the fetus carries the alternate allele.
    HomRef,
    /// `-10 log10 (1 - P(called genotype))`.
    Called,
}

impl FromStr for QualityMode {
    type Err = &'static str;
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "hom-ref" => Ok(QualityMode::HomRef),
            "called" => Ok(QualityMode::Called),
            _ => Err("Invalid quality mode. Options are: hom-ref, called"),
        }
    }
}
