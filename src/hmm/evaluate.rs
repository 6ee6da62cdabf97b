//!
//! Accuracy of decoded states against known labels
//!
use super::params::{HMMParams, State, N_STATES};
use crate::error::{Error, Result};
use derive_new::new;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, new)]
pub struct Evaluation {
    /// `correct[s]`: positions labeled `s` and decoded as `s`
    pub correct: [usize; N_STATES],
    /// `wrong[s]`: positions labeled `s` but decoded as the other state
    pub wrong: [usize; N_STATES],
}

impl Evaluation {
    ///
    /// Compare `decoded` against `truth` position by position.
    ///
    pub fn compare(decoded: &[State], truth: &[State]) -> Result<Evaluation> {
        if decoded.len() != truth.len() {
            return Err(Error::misaligned(format!(
                "{} decoded states but {} labels",
                decoded.len(),
                truth.len()
            )));
        }
        Ok(decoded
            .iter()
            .zip(truth.iter())
            .fold(Evaluation::default(), |mut ev, (&d, &t)| {
                if d == t {
                    ev.correct[t.index()] += 1;
                } else {
                    ev.wrong[t.index()] += 1;
                }
                ev
            }))
    }
    pub fn total(&self) -> usize {
        self.correct.iter().sum::<usize>() + self.wrong.iter().sum::<usize>()
    }
    ///
    /// Fraction of correctly decoded positions (NaN for no positions)
    ///
    pub fn accuracy(&self) -> f64 {
        self.correct.iter().sum::<usize>() as f64 / self.total() as f64
    }
}

impl HMMParams {
    ///
    /// Decode `emissions` and compare with the known `labels`.
    ///
    pub fn evaluate(&self, emissions: &[usize], labels: &[State]) -> Result<Evaluation> {
        let decoded = self.decode(emissions)?;
        Evaluation::compare(&decoded, labels)
    }
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for s in State::ALL {
            writeln!(
                f,
                "state {} correct = {}\tstate {} wrong = {}",
                s,
                self.correct[s.index()],
                s,
                self.wrong[s.index()]
            )?;
        }
        write!(f, "total correct = {}", self.accuracy())
    }
}

#[cfg(test)]
mod tests {
    use super::super::train::{parse_labels, train_with_alphabet};
    use super::*;

    #[test]
    fn compare() {
        let decoded = parse_labels("nneen").unwrap();
        let truth = parse_labels("nenee").unwrap();
        let ev = Evaluation::compare(&decoded, &truth).unwrap();
        assert_eq!(ev, Evaluation::new([1, 2], [1, 1]));
        assert_eq!(ev.total(), 5);
        assert_abs_diff_eq!(ev.accuracy(), 0.6);
        assert!(Evaluation::compare(&decoded, &truth[..3]).is_err());
    }

    #[test]
    fn evaluate_trained() {
        let labels = parse_labels("nnneeennneee").unwrap();
        let emissions = vec![0, 1, 0, 2, 3, 2, 1, 1, 0, 3, 3, 2];
        let params = train_with_alphabet(4, &emissions, &labels).unwrap();
        let ev = params.evaluate(&emissions, &labels).unwrap();
        assert_eq!(ev.accuracy(), 1.0);
        assert_eq!(ev.wrong, [0, 0]);
        println!("{}", ev);
    }
}
