use crate::utils::{normalize_contig, Result};

/// Region used to restrict which loci are called. Coordinates are 1-based
/// and inclusive, matching the positions in the loci table.
#[derive(Debug, PartialEq, Clone)]
pub struct GenomicRegion {
    pub contig: String,
    pub start: u32,
    pub end: u32,
}

impl GenomicRegion {
    pub fn new(contig: impl Into<String>, start: u32, end: u32) -> Result<Self> {
        if start >= end {
            return Err(format!("Invalid region: start {} >= end {}", start, end));
        }

        Ok(Self {
            contig: contig.into(),
            start,
            end,
        })
    }

    /// Parses `contig:start-end`, or a bare `contig` covering the whole contig.
    pub fn from_string(encoding: &str) -> Result<Self> {
        let error_msg = || format!("Invalid region encoding: {}", encoding);
        let elements: Vec<&str> = encoding.split(&[':', '-']).collect();

        match elements.len() {
            1 if !elements[0].is_empty() => Self::new(elements[0], 0, u32::MAX),
            3 => {
                let start: u32 = elements[1].parse().map_err(|_| error_msg())?;
                let end: u32 = elements[2].parse().map_err(|_| error_msg())?;
                Self::new(elements[0], start, end)
            }
            _ => Err(error_msg()),
        }
    }

    pub fn contains(&self, contig: &str, position: u32) -> bool {
        normalize_contig(&self.contig) == normalize_contig(contig)
            && position >= self.start
            && position <= self.end
    }
}
