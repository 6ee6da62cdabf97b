//!
//! Phylogenetic likelihood of alignment windows and a two-state HMM
//! locating exons from the per-window evolutionary rate.
//!
pub mod alignment;
pub mod cli;
pub mod config;
pub mod error;
pub mod hmm;
pub mod io;
pub mod likelihood;
pub mod model;
pub mod prelude;
pub mod prob;
pub mod random_seq;
pub mod tree;
pub mod utils;
pub mod windows;

#[macro_use]
extern crate approx;
