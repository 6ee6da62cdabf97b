//!
//! Viterbi decoding in log space
//!
use super::params::{HMMParams, State, N_STATES};
use crate::error::{Error, Result};
use crate::prob::LogProb;

///
/// best score reaching a state, and the previous state of that path
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub score: LogProb,
    pub from: Option<State>,
}

///
/// One layer of the table per emission
///
pub type Layer = [Cell; N_STATES];

///
/// Pick the better of the candidate scores of states 0 and 1.
/// State 1 wins only if strictly greater, so ties go to state 0.
///
fn argmax(scores: [LogProb; N_STATES]) -> (State, LogProb) {
    if scores[1].is_greater_than(scores[0]) {
        (State::Exon, scores[1])
    } else {
        (State::NonExon, scores[0])
    }
}

impl HMMParams {
    fn check_symbol(&self, x: usize) -> Result<()> {
        if x < self.n_symbols() {
            Ok(())
        } else {
            Err(Error::InvalidSymbol {
                symbol: format!("{} (alphabet size {})", x, self.n_symbols()),
            })
        }
    }
    fn v_init(&self, x: usize) -> Layer {
        let mut layer = [Cell {
            score: LogProb::zero(),
            from: None,
        }; N_STATES];
        for s in State::ALL {
            layer[s.index()].score = self.p_init(s) * self.emission(s, x);
        }
        layer
    }
    fn v_step(&self, prev: &Layer, x: usize) -> Layer {
        let mut layer = *prev;
        for s in State::ALL {
            let scores = [
                prev[0].score * self.p_trans(State::NonExon, s),
                prev[1].score * self.p_trans(State::Exon, s),
            ];
            let (from, score) = argmax(scores);
            layer[s.index()] = Cell {
                score: score * self.emission(s, x),
                from: Some(from),
            };
        }
        layer
    }
    ///
    /// Fill the Viterbi table of `emissions`, one layer per emission.
    ///
    pub fn viterbi_table(&self, emissions: &[usize]) -> Result<Vec<Layer>> {
        let mut layers: Vec<Layer> = Vec::with_capacity(emissions.len());
        for &x in emissions {
            self.check_symbol(x)?;
            let layer = match layers.last() {
                Some(prev) => self.v_step(prev, x),
                None => self.v_init(x),
            };
            layers.push(layer);
        }
        Ok(layers)
    }
}

///
/// Follow the back-pointers from the best final state.
///
pub fn traceback(layers: &[Layer]) -> (Vec<State>, LogProb) {
    let last = match layers.last() {
        Some(last) => last,
        None => return (Vec::new(), LogProb::one()),
    };
    let (mut state, score) = argmax([last[0].score, last[1].score]);
    let mut states = Vec::with_capacity(layers.len());
    for layer in layers.iter().rev() {
        states.push(state);
        if let Some(from) = layer[state.index()].from {
            state = from;
        }
    }
    states.reverse();
    (states, score)
}

///
/// Most likely state sequence of `emissions` and its probability.
///
pub fn decode_with_score(params: &HMMParams, emissions: &[usize]) -> Result<(Vec<State>, LogProb)> {
    let layers = params.viterbi_table(emissions)?;
    Ok(traceback(&layers))
}

///
/// Most likely state sequence of `emissions`, of the same length.
///
/// Fails only with `InvalidSymbol` for an emission outside the trained alphabet.
///
pub fn decode(params: &HMMParams, emissions: &[usize]) -> Result<Vec<State>> {
    decode_with_score(params, emissions).map(|(states, _)| states)
}
