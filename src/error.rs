//!
//! Error type shared by the tree, likelihood and hmm modules
//!
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed tree topology: {reason}")]
    MalformedTopology { reason: String },

    #[error("node `{name}` is defined more than once")]
    DuplicateNode { name: String },

    #[error("node position {position} is out of range (tree size {size})")]
    OutOfRange { position: usize, size: usize },

    #[error("misaligned input: {reason}")]
    MisalignedInput { reason: String },

    #[error("degenerate training set: state `{state}` never occurs in the labels")]
    DegenerateTrainingSet { state: char },

    #[error("{name} must be non-negative, got {value}")]
    NegativeParameter { name: &'static str, value: f64 },

    #[error("invalid symbol `{symbol}`")]
    InvalidSymbol { symbol: String },

    #[error("no data for leaf `{name}` in the column")]
    MissingLeaf { name: String },

    #[error("parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed<S: Into<String>>(reason: S) -> Self {
        Error::MalformedTopology {
            reason: reason.into(),
        }
    }
    pub(crate) fn misaligned<S: Into<String>>(reason: S) -> Self {
        Error::MisalignedInput {
            reason: reason.into(),
        }
    }
}
