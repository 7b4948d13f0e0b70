use kenken_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("no puzzle rows found before end of input")]
    EmptyInput,

    #[error("row {row} has {got} cell(s), expected {want} (row 0's width)")]
    NonRectangular { row: usize, got: usize, want: usize },

    #[error("grid is {rows} row(s) by {cols} column(s); a puzzle grid must be square")]
    NotSquare { rows: usize, cols: usize },

    #[error("unrecognized token {0:?}")]
    InvalidToken(String),

    #[error("cage '{0}' carries no operator/target clue on any of its cells")]
    CageMissingClue(char),

    #[error("cage '{0}' carries conflicting clues: {first:?} and {second:?}")]
    CageClueConflict {
        label: char,
        first: (char, i64),
        second: (char, i64),
    },

    #[error("unrecognized operator '{0}'")]
    UnknownOperator(char),

    #[error("invalid target number after cage '{label}'")]
    InvalidTarget { label: char },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl IoError {
    pub(crate) fn cage_conflict(label: char, first: (char, i64), second: (char, i64)) -> Self {
        IoError::CageClueConflict { label, first, second }
    }
}
