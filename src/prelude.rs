//!
//! globally-available parts
//!
pub use crate::alignment::{Alignment, Column, Sequence};
pub use crate::error::{Error, Result};
pub use crate::hmm::{HMMParams, State};
pub use crate::likelihood::{best_alpha, column_likelihood, BestAlpha};
pub use crate::prob::{lp, p, LogProb};
pub use crate::tree::{PhylogeneticTree, TreeRecord};
