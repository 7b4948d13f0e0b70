use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("grid size N={0} not supported; must be in 1..=16")]
    InvalidGridSize(u8),

    #[error("cage has no cells")]
    EmptyCage,

    #[error("cage has {0} cell(s); a live cage must have at least 2")]
    CageTooSmall(usize),

    #[error("cage has {len} cells, exceeding the max of {max} cells")]
    CageTooLarge { len: usize, max: u8 },

    #[error("cage position {cell} out of range for N={n}")]
    CellOutOfRange { n: u8, cell: u8 },

    #[error("cell at position {0} appears in more than one cage")]
    CellDuplicated(u8),

    #[error("grid cell at position {0} is not covered by any cage")]
    CellUncovered(u8),

    #[error("{op:?} cages must have exactly 2 cells under this ruleset, got {len}")]
    TwoCellOnlyViolated { op: crate::rules::CageOp, len: usize },

    #[error("cage target must be non-negative for Sum/Difference cages")]
    TargetMustBeNonNegative,

    #[error("cage target must be strictly positive for Product/Ratio cages")]
    TargetMustBePositive,

    #[error("cage is not orthogonally connected")]
    CageNotConnected,
}
