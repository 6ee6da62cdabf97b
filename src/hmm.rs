//!
//! Two-state HMM segmenting a genome into exon / non-exon windows
//!
//! # Overview of calculation
//!
//! x = x[0],...,x[n-1] : Emissions (discretized best alpha of each window)
//! s = s[0],...,s[n-1] : States (`n` non-exon = 0, `e` exon = 1)
//!
//! Training (supervised, counting)
//!
//! ```text
//! pi[s]    = #(s) / n
//! t[s][s'] = #(s -> s') / #(s)     for s != s'
//! t[s][s]  = 1 - t[s][s']
//! e[s][k]  = #(s emits k) / #(s)
//! ```
//!
//! Viterbi
//!
//! ```text
//! V[0][s] = pi[s] e[s][x[0]]
//! V[i][s] = max_s' V[i-1][s'] t[s'][s] e[s][x[i]]
//! ```
//!
//! All probabilities are `LogProb`.
//!
pub mod evaluate;
pub mod params;
pub mod train;
pub mod viterbi;

pub use evaluate::Evaluation;
pub use params::{HMMParams, State, N_STATES};
pub use train::{parse_labels, train, train_with_alphabet};
pub use viterbi::decode;
