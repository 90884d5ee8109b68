use std::fmt;

/// Bi-allelic diploid genotype, ordered by alternate allele count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Genotype {
    HomRef,
    Het,
    HomAlt,
}

impl Genotype {
    pub const ALL: [Genotype; 3] = [Genotype::HomRef, Genotype::Het, Genotype::HomAlt];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self.alt_count() as usize
    }

    pub fn alt_count(self) -> u8 {
        match self {
            Genotype::HomRef => 0,
            Genotype::Het => 1,
            Genotype::HomAlt => 2,
        }
    }

    /// Probability that a single transmitted (or sampled) haplotype carries
    /// the alternate allele.
    pub fn alt_fraction(self) -> f64 {
        self.alt_count() as f64 / 2.0
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Genotype::HomRef => "0/0",
            Genotype::Het => "0/1",
            Genotype::HomAlt => "1/1",
        }
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Genotype of a parent as read from the input: a bi-allelic call, a missing
/// call, or an encoding the model cannot use (e.g. a second alternate allele).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentalGenotype {
    Called(Genotype),
    Missing,
    Unsupported,
}

impl ParentalGenotype {
    pub fn parse(encoding: &str) -> Self {
        match encoding {
            "0/0" => ParentalGenotype::Called(Genotype::HomRef),
            "0/1" => ParentalGenotype::Called(Genotype::Het),
            "1/1" => ParentalGenotype::Called(Genotype::HomAlt),
            "." | "./." => ParentalGenotype::Missing,
            _ => ParentalGenotype::Unsupported,
        }
    }

    pub fn called(self) -> Option<Genotype> {
        match self {
            ParentalGenotype::Called(gt) => Some(gt),
            ParentalGenotype::Missing | ParentalGenotype::Unsupported => None,
        }
    }
}

impl From<Genotype> for ParentalGenotype {
    fn from(gt: Genotype) -> Self {
        ParentalGenotype::Called(gt)
    }
}

impl fmt::Display for ParentalGenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentalGenotype::Called(gt) => write!(f, "{}", gt),
            ParentalGenotype::Missing | ParentalGenotype::Unsupported => write!(f, "."),
        }
    }
}
