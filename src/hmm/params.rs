//!
//! Trained parameters of the two-state HMM
//!
use crate::error::{Error, Result};
use crate::prob::LogProb;
use serde::{Deserialize, Serialize};

/// Number of hidden states
pub const N_STATES: usize = 2;

///
/// Hidden state of a window
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    /// `n`
    NonExon = 0,
    /// `e`
    Exon = 1,
}

impl State {
    pub const ALL: [State; N_STATES] = [State::NonExon, State::Exon];

    pub fn index(self) -> usize {
        self as usize
    }
    pub fn from_char(c: char) -> Result<State> {
        match c {
            'n' => Ok(State::NonExon),
            'e' => Ok(State::Exon),
            c => Err(Error::InvalidSymbol {
                symbol: c.to_string(),
            }),
        }
    }
    pub fn to_char(self) -> char {
        match self {
            State::NonExon => 'n',
            State::Exon => 'e',
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

///
/// Parameters of the HMM, created by training and read-only afterwards.
///
/// * `pi[s]`: initial probability
/// * `t[s][s']`: transition probability `s -> s'`
/// * `e[s][k]`: emission probability of symbol `k` in state `s`
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HMMParams {
    pub(crate) pi: [LogProb; N_STATES],
    pub(crate) t: [[LogProb; N_STATES]; N_STATES],
    pub(crate) e: [Vec<LogProb>; N_STATES],
}

impl HMMParams {
    ///
    /// Number of emission symbols `K`
    ///
    pub fn n_symbols(&self) -> usize {
        self.e[0].len()
    }
    pub fn p_init(&self, s: State) -> LogProb {
        self.pi[s.index()]
    }
    pub fn p_trans(&self, from: State, to: State) -> LogProb {
        self.t[from.index()][to.index()]
    }
    ///
    /// Emission probability, `None` for a symbol outside `0..n_symbols()`.
    ///
    pub fn p_emit(&self, s: State, symbol: usize) -> Option<LogProb> {
        self.e[s.index()].get(symbol).copied()
    }
    ///
    /// Emission probability of a symbol already checked to be in the alphabet.
    ///
    pub(crate) fn emission(&self, s: State, symbol: usize) -> LogProb {
        self.e[s.index()][symbol]
    }
    ///
    /// Train from labeled emissions. See `train::train`.
    ///
    pub fn train(emissions: &[usize], labels: &[State]) -> Result<HMMParams> {
        super::train::train(emissions, labels)
    }
    ///
    /// Most likely states of `emissions`. See `viterbi::decode`.
    ///
    pub fn decode(&self, emissions: &[usize]) -> Result<Vec<State>> {
        super::viterbi::decode(self, emissions)
    }
}

impl std::fmt::Display for HMMParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "initial probabilities:")?;
        for s in State::ALL {
            writeln!(f, "{}\t{}", s, self.p_init(s).to_value())?;
        }
        writeln!(f, "transition probabilities:")?;
        for s in State::ALL {
            writeln!(
                f,
                "{}\t{}\t{}",
                s,
                self.p_trans(s, State::NonExon).to_value(),
                self.p_trans(s, State::Exon).to_value()
            )?;
        }
        writeln!(f, "emission probabilities:")?;
        for k in 0..self.n_symbols() {
            writeln!(
                f,
                "{}\t{}\t{}",
                k,
                self.emission(State::NonExon, k).to_value(),
                self.emission(State::Exon, k).to_value()
            )?;
        }
        Ok(())
    }
}
