//!
//! Supervised training by counting
//!
use super::params::{HMMParams, State, N_STATES};
use crate::error::{Error, Result};
use crate::likelihood::N_ALPHAS;
use crate::prob::{p, LogProb};
use log::info;

///
/// Parse a label string like `"nneen"` into states.
///
pub fn parse_labels(labels: &str) -> Result<Vec<State>> {
    labels.chars().map(State::from_char).collect()
}

///
/// Occurrences gathered from a labeled sequence
///
#[derive(Debug, Clone, PartialEq)]
struct Counts {
    /// `#(s)`
    state: [usize; N_STATES],
    /// `#(s -> s')` of adjacent positions
    trans: [[usize; N_STATES]; N_STATES],
    /// `#(s emits k)`
    emission: [Vec<usize>; N_STATES],
}

impl Counts {
    fn new(n_symbols: usize) -> Self {
        Counts {
            state: [0; N_STATES],
            trans: [[0; N_STATES]; N_STATES],
            emission: [vec![0; n_symbols], vec![0; n_symbols]],
        }
    }
    fn add(mut self, prev: Option<State>, s: State, x: usize) -> Result<Self> {
        let k = self.emission[0].len();
        if x >= k {
            return Err(Error::InvalidSymbol {
                symbol: format!("{} (alphabet size {})", x, k),
            });
        }
        self.state[s.index()] += 1;
        if let Some(prev) = prev {
            self.trans[prev.index()][s.index()] += 1;
        }
        self.emission[s.index()][x] += 1;
        Ok(self)
    }
    fn into_params(self) -> Result<HMMParams> {
        for s in State::ALL {
            if self.state[s.index()] == 0 {
                return Err(Error::DegenerateTrainingSet { state: s.to_char() });
            }
        }
        let total: usize = self.state.iter().sum();
        let ratio = |a: usize, b: usize| p(a as f64 / b as f64);

        let pi = [
            ratio(self.state[0], total),
            ratio(self.state[1], total),
        ];

        // a state leaves itself only through an observed change, so the
        // self transition takes the rest of its occurrences
        let mut t = [[LogProb::zero(); N_STATES]; N_STATES];
        for s in 0..N_STATES {
            let n = self.state[s];
            let n_out: usize = (0..N_STATES)
                .filter(|&s2| s2 != s)
                .map(|s2| self.trans[s][s2])
                .sum();
            for s2 in 0..N_STATES {
                t[s][s2] = if s2 == s {
                    ratio(n - n_out, n)
                } else {
                    ratio(self.trans[s][s2], n)
                };
            }
        }

        let state = self.state;
        let [e0, e1] = self.emission;
        let e = [
            e0.into_iter().map(|c| ratio(c, state[0])).collect(),
            e1.into_iter().map(|c| ratio(c, state[1])).collect(),
        ];
        Ok(HMMParams { pi, t, e })
    }
}

///
/// Train with the alphabet of discretized alphas (`K = 21`).
///
pub fn train(emissions: &[usize], labels: &[State]) -> Result<HMMParams> {
    train_with_alphabet(N_ALPHAS, emissions, labels)
}

///
/// Maximum-likelihood parameters of the labeled sequence `(emissions, labels)`
/// over an alphabet of `n_symbols` symbols.
///
/// Fails with
/// * `MisalignedInput` if the sequences are empty or differ in length
/// * `InvalidSymbol` if an emission is not in `0..n_symbols`
/// * `DegenerateTrainingSet` if a state never occurs in `labels`
///
pub fn train_with_alphabet(
    n_symbols: usize,
    emissions: &[usize],
    labels: &[State],
) -> Result<HMMParams> {
    if emissions.len() != labels.len() {
        return Err(Error::misaligned(format!(
            "{} emissions but {} labels",
            emissions.len(),
            labels.len()
        )));
    }
    if emissions.is_empty() {
        return Err(Error::misaligned("empty training set"));
    }
    let counts = emissions
        .iter()
        .zip(labels.iter())
        .enumerate()
        .try_fold(Counts::new(n_symbols), |counts, (i, (&x, &s))| {
            let prev = if i == 0 { None } else { Some(labels[i - 1]) };
            counts.add(prev, s, x)
        })?;
    info!(
        "trained on {} windows (non-exon={} exon={})",
        emissions.len(),
        counts.state[0],
        counts.state[1]
    );
    counts.into_params()
}
