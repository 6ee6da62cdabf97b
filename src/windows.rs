//!
//! Relating alignment windows to exons of the reference sequence
//!
use crate::error::{Error, Result};
use crate::hmm::State;
use crate::io::exons::Exon;
use crate::likelihood::{alpha_of_index, N_ALPHAS};
use crate::model::Symbol;
use std::collections::BTreeSet;

///
/// Indices of the `w`-column windows of the aligned `reference_row` that
/// overlap an exon.
///
/// Exons are positions on the reference with gaps removed. A gap column is
/// inside an exon when the reference positions on both sides of it are.
/// An exon spanning a window boundary marks every window it touches.
///
/// A zero `w` is `MisalignedInput` and a character outside `ACTGN-` is
/// `InvalidSymbol`.
///
pub fn windows_with_exons(
    reference_row: &[u8],
    exons: &[Exon],
    w: usize,
) -> Result<BTreeSet<usize>> {
    if w == 0 {
        return Err(Error::misaligned("window size must be positive"));
    }
    let mut exons: Vec<Exon> = exons.to_vec();
    exons.sort();

    let mut marked = BTreeSet::new();
    let mut k = 0; // first exon not yet passed
    let mut j = 0; // number of reference bases seen so far
    for (i, &c) in reference_row.iter().enumerate() {
        let is_gap = Symbol::from_u8(c)?.is_gap();
        // gap columns sit between reference bases j-1 and j
        let pos = j;
        while k < exons.len() && exons[k].end < pos {
            k += 1;
        }
        let covered = match exons.get(k) {
            Some(exon) if is_gap => pos > 0 && exon.start < pos && exon.contains(pos),
            Some(exon) => exon.contains(pos),
            None => false,
        };
        if covered {
            marked.insert(i / w);
        }
        if !is_gap {
            j += 1;
        }
    }
    Ok(marked)
}

///
/// State label of each of the `n_windows` windows of `w` bases of the
/// gap-free reference.
///
/// A window is labeled exon if the next unpassed exon starts before the
/// window ends.
///
pub fn label_windows(exons: &[Exon], n_windows: usize, w: usize) -> Vec<State> {
    let mut exons: Vec<Exon> = exons.to_vec();
    exons.sort();
    let mut k = 0;
    (0..n_windows)
        .map(|i| {
            let end = (i + 1) * w;
            match exons.get(k) {
                Some(exon) if exon.start < end => {
                    while k < exons.len() && exons[k].end < end {
                        k += 1;
                    }
                    State::Exon
                }
                _ => State::NonExon,
            }
        })
        .collect()
}

///
/// Counts of discretized best alphas of windows with and without exons
///
#[derive(Clone, Debug, PartialEq)]
pub struct AlphaHistogram {
    /// `with_exons[a]`: windows overlapping an exon with best alpha index `a`
    pub with_exons: [usize; N_ALPHAS],
    pub without_exons: [usize; N_ALPHAS],
}

impl AlphaHistogram {
    ///
    /// `alphas[i]` is the grid index of window `i`. An index off the grid
    /// is `InvalidSymbol`.
    ///
    pub fn new(alphas: &[usize], exon_windows: &BTreeSet<usize>) -> Result<Self> {
        let mut hist = AlphaHistogram {
            with_exons: [0; N_ALPHAS],
            without_exons: [0; N_ALPHAS],
        };
        for (i, &a) in alphas.iter().enumerate() {
            if a >= N_ALPHAS {
                return Err(Error::InvalidSymbol {
                    symbol: a.to_string(),
                });
            }
            if exon_windows.contains(&i) {
                hist.with_exons[a] += 1;
            } else {
                hist.without_exons[a] += 1;
            }
        }
        Ok(hist)
    }
    pub fn n_with_exons(&self) -> usize {
        self.with_exons.iter().sum()
    }
    pub fn n_without_exons(&self) -> usize {
        self.without_exons.iter().sum()
    }
    pub fn n_total(&self) -> usize {
        self.n_with_exons() + self.n_without_exons()
    }
    ///
    /// Relative frequencies `(with, without, total)` of alpha index `a`.
    /// A class with no windows gives NaN.
    ///
    pub fn frequencies(&self, a: usize) -> (f64, f64, f64) {
        (
            self.with_exons[a] as f64 / self.n_with_exons() as f64,
            self.without_exons[a] as f64 / self.n_without_exons() as f64,
            (self.with_exons[a] + self.without_exons[a]) as f64 / self.n_total() as f64,
        )
    }
}

impl std::fmt::Display for AlphaHistogram {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "windows with exons: {}", self.n_with_exons())?;
        writeln!(f, "windows without exons: {}", self.n_without_exons())?;
        writeln!(f, "total windows: {}", self.n_total())?;
        writeln!(f, "alpha\twith\twithout\ttotal")?;
        for a in 0..N_ALPHAS {
            let (with, without, total) = self.frequencies(a);
            writeln!(
                f,
                "{:.1}\t{:.4}\t{:.4}\t{:.4}",
                alpha_of_index(a),
                with,
                without,
                total
            )?;
        }
        Ok(())
    }
}
