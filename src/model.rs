//!
//! Jukes-Cantor substitution model
//!
//! Bases are indexed in the order `A, C, T, G`.
//!
use crate::error::{Error, Result};

/// Number of nucleotide states
pub const N_BASES: usize = 4;

/// equilibrium frequency of each base under Jukes-Cantor
pub const EQUILIBRIUM: f64 = 0.25;

///
/// Array of valid DNA bases in index order
///
pub const BASES: [u8; N_BASES] = [b'A', b'C', b'T', b'G'];

///
/// A nucleotide base with its index in the likelihood table
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Base {
    A = 0,
    C = 1,
    T = 2,
    G = 3,
}

impl Base {
    pub fn index(self) -> usize {
        self as usize
    }
}

///
/// Observed character in an alignment column
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    Base(Base),
    /// `N`
    Ambiguous,
    /// `-`
    Gap,
}

impl Symbol {
    ///
    /// Parse a (case-insensitive) alignment character.
    ///
    pub fn from_u8(c: u8) -> Result<Symbol> {
        match c {
            b'A' | b'a' => Ok(Symbol::Base(Base::A)),
            b'C' | b'c' => Ok(Symbol::Base(Base::C)),
            b'T' | b't' => Ok(Symbol::Base(Base::T)),
            b'G' | b'g' => Ok(Symbol::Base(Base::G)),
            b'N' | b'n' => Ok(Symbol::Ambiguous),
            b'-' => Ok(Symbol::Gap),
            c => Err(Error::InvalidSymbol {
                symbol: (c as char).to_string(),
            }),
        }
    }
    ///
    /// Leaf row of the likelihood table for this observation.
    /// Ambiguous and gap symbols match every base.
    ///
    pub fn leaf_likelihoods(self) -> [f64; N_BASES] {
        match self {
            Symbol::Base(b) => {
                let mut row = [0.0; N_BASES];
                row[b.index()] = 1.0;
                row
            }
            Symbol::Ambiguous | Symbol::Gap => [1.0; N_BASES],
        }
    }
    pub fn is_gap(self) -> bool {
        self == Symbol::Gap
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<()> {
    // also rejects NaN
    if value >= 0.0 {
        Ok(())
    } else {
        Err(Error::NegativeParameter { name, value })
    }
}

#[inline]
fn decay(t: f64, alpha: f64) -> f64 {
    (-4.0 / 3.0 * alpha * t).exp()
}

///
/// Probability that `old_base` becomes `new_base` after branch length `t`
/// with substitution rate `alpha`.
///
/// ```text
/// P(same) = (1 + 3 exp(-4/3 alpha t)) / 4
/// P(diff) = (1 -   exp(-4/3 alpha t)) / 4
/// ```
///
pub fn jukes_cantor(old_base: usize, new_base: usize, t: f64, alpha: f64) -> Result<f64> {
    check_non_negative("branch length", t)?;
    check_non_negative("alpha", alpha)?;
    let e = decay(t, alpha);
    if old_base == new_base {
        Ok((1.0 + 3.0 * e) / 4.0)
    } else {
        Ok((1.0 - e) / 4.0)
    }
}

///
/// 4x4 Jukes-Cantor matrix `P[old][new]` of a single branch.
///
/// Computed once per (branch, alpha) instead of once per table cell.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionMatrix([[f64; N_BASES]; N_BASES]);

impl TransitionMatrix {
    pub fn new(t: f64, alpha: f64) -> Result<TransitionMatrix> {
        check_non_negative("branch length", t)?;
        check_non_negative("alpha", alpha)?;
        let e = decay(t, alpha);
        let same = (1.0 + 3.0 * e) / 4.0;
        let diff = (1.0 - e) / 4.0;
        let mut m = [[diff; N_BASES]; N_BASES];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = same;
        }
        Ok(TransitionMatrix(m))
    }
    #[inline]
    pub fn prob(&self, old_base: usize, new_base: usize) -> f64 {
        self.0[old_base][new_base]
    }
    ///
    /// `sum_c P(old -> c) * child[c]`
    ///
    #[inline]
    pub fn propagate(&self, old_base: usize, child: &[f64; N_BASES]) -> f64 {
        self.0[old_base]
            .iter()
            .zip(child.iter())
            .map(|(p, l)| p * l)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.0, 0.0)]
    #[test_case(1.0, 0.0)]
    #[test_case(0.0, 1.5)]
    #[test_case(0.3, 0.7)]
    #[test_case(2.0, 2.0)]
    #[test_case(100.0, 0.1)]
    fn rows_sum_to_one(t: f64, alpha: f64) {
        for b in 0..N_BASES {
            for c in 0..N_BASES {
                if b == c {
                    continue;
                }
                let same = jukes_cantor(b, b, t, alpha).unwrap();
                let diff = jukes_cantor(b, c, t, alpha).unwrap();
                assert_abs_diff_eq!(same + 3.0 * diff, 1.0, epsilon = 1e-12);
            }
        }
    }
    #[test]
    fn identity_at_zero_time() {
        assert_eq!(jukes_cantor(0, 0, 0.0, 5.0).unwrap(), 1.0);
        assert_eq!(jukes_cantor(0, 1, 0.0, 5.0).unwrap(), 0.0);
        assert_eq!(jukes_cantor(2, 2, 3.0, 0.0).unwrap(), 1.0);
    }
    #[test]
    fn equilibrium_at_long_time() {
        for b in 0..N_BASES {
            for c in 0..N_BASES {
                let x = jukes_cantor(b, c, 1.0, 1e9).unwrap();
                assert_abs_diff_eq!(x, EQUILIBRIUM, epsilon = 1e-12);
            }
        }
    }
    #[test]
    fn negative_parameters_are_rejected() {
        assert!(matches!(
            jukes_cantor(0, 0, -0.1, 1.0),
            Err(Error::NegativeParameter { .. })
        ));
        assert!(matches!(
            jukes_cantor(0, 0, 0.1, -1.0),
            Err(Error::NegativeParameter { .. })
        ));
        assert!(TransitionMatrix::new(f64::NAN, 1.0).is_err());
    }
    #[test]
    fn matrix_matches_function() {
        let m = TransitionMatrix::new(0.4, 1.3).unwrap();
        for b in 0..N_BASES {
            for c in 0..N_BASES {
                assert_abs_diff_eq!(m.prob(b, c), jukes_cantor(b, c, 0.4, 1.3).unwrap());
            }
        }
        let leaf = Symbol::Base(Base::T).leaf_likelihoods();
        assert_abs_diff_eq!(m.propagate(2, &leaf), m.prob(2, 2));
        assert_abs_diff_eq!(m.propagate(0, &[1.0; N_BASES]), 1.0, epsilon = 1e-12);
    }
    #[test]
    fn symbols() {
        assert_eq!(Symbol::from_u8(b'a').unwrap(), Symbol::Base(Base::A));
        assert_eq!(Symbol::from_u8(b'G').unwrap(), Symbol::Base(Base::G));
        assert_eq!(Symbol::from_u8(b'N').unwrap(), Symbol::Ambiguous);
        assert!(Symbol::from_u8(b'-').unwrap().is_gap());
        match Symbol::from_u8(b'X') {
            Err(Error::InvalidSymbol { symbol }) => assert_eq!(symbol, "X"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(Symbol::Gap.leaf_likelihoods(), [1.0; N_BASES]);
        assert_eq!(
            Symbol::Base(Base::C).leaf_likelihoods(),
            [0.0, 1.0, 0.0, 0.0]
        );
        assert_eq!(BASES[Base::T.index()], b'T');
    }
}
