use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoiseError {
    /// The draw pile ran dry while building a permutation table.
    #[error("cannot draw from an empty source while building the permutation table")]
    EmptyDrawSource,
    #[error("octave count must be at least 1")]
    ZeroOctaves,
    #[error("domain extent must be positive and finite, got {width} x {height}")]
    NonPositiveDomain { width: f64, height: f64 },
    #[error("density must be positive and finite, got {0}")]
    NonPositiveDensity(f64),
    #[error("octave ratio must be positive and finite, got {0}")]
    NonPositiveRatio(f64),
    #[error("grid of {columns} x {rows} samples is too large")]
    GridTooLarge { columns: usize, rows: usize },
    #[error("table side {0} is out of range")]
    InvalidTableSide(u32),
    #[error("table of length {len} is not a permutation: {reason}")]
    NotAPermutation { len: usize, reason: String },
}
