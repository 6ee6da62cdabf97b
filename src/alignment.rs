//!
//! Multiple alignment: rows of equal length keyed by taxon name
//!
use crate::error::{Error, Result};
use crate::utils::all_same_value;
use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};

/// Type of a DNA sequence (one row of an alignment)
pub type Sequence = Vec<u8>;

/// One alignment column: leaf name -> observed character
pub type Column = HashMap<String, u8>;

///
/// Rows are kept sorted by name.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    rows: BTreeMap<String, Sequence>,
    len: usize,
}

impl Alignment {
    ///
    /// Fails with `MisalignedInput` if the rows differ in length or there are no rows.
    ///
    pub fn new<I: IntoIterator<Item = (String, Sequence)>>(rows: I) -> Result<Self> {
        let rows: BTreeMap<String, Sequence> = rows.into_iter().collect();
        let len = all_same_value(rows.values().map(|seq| seq.len())).ok_or_else(|| {
            if rows.is_empty() {
                Error::misaligned("alignment has no sequences")
            } else {
                let lens = rows
                    .iter()
                    .map(|(name, seq)| format!("{}={}", name, seq.len()))
                    .join(", ");
                Error::misaligned(format!("sequence lengths differ: {}", lens))
            }
        })?;
        Ok(Alignment { rows, len })
    }
    ///
    /// Number of columns
    ///
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }
    pub fn row(&self, name: &str) -> Option<&Sequence> {
        self.rows.get(name)
    }
    pub fn rows(&self) -> impl Iterator<Item = (&String, &Sequence)> + '_ {
        self.rows.iter()
    }
    ///
    /// `i`-th column as a `name -> character` map, `None` past the last column
    ///
    pub fn column(&self, i: usize) -> Option<Column> {
        if i >= self.len {
            return None;
        }
        Some(
            self.rows
                .iter()
                .map(|(name, seq)| (name.clone(), seq[i]))
                .collect(),
        )
    }
    ///
    /// All columns from left to right
    ///
    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        (0..self.len).map(move |i| {
            self.rows
                .iter()
                .map(|(name, seq)| (name.clone(), seq[i]))
                .collect()
        })
    }
    ///
    /// Columns `start..end`, clipped to the alignment length
    ///
    pub fn window(&self, start: usize, end: usize) -> Alignment {
        let end = end.min(self.len);
        let start = start.min(end);
        Alignment {
            rows: self
                .rows
                .iter()
                .map(|(name, seq)| (name.clone(), seq[start..end].to_vec()))
                .collect(),
            len: end - start,
        }
    }
    ///
    /// Non-overlapping windows of `size` columns; the last one may be shorter.
    /// A zero `size` is `MisalignedInput`.
    ///
    pub fn windows(&self, size: usize) -> Result<Vec<Alignment>> {
        if size == 0 {
            return Err(Error::misaligned("window size must be positive"));
        }
        Ok((0..self.len)
            .step_by(size)
            .map(|start| self.window(start, start + size))
            .collect())
    }
    ///
    /// Keep only the columns where `reference` has no gap `-`.
    ///
    pub fn filter_gaps_in(&self, reference: &str) -> Result<Alignment> {
        let keep: Vec<usize> = self
            .rows
            .get(reference)
            .ok_or_else(|| Error::MissingLeaf {
                name: reference.to_string(),
            })?
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != b'-')
            .map(|(i, _)| i)
            .collect();
        Ok(Alignment {
            rows: self
                .rows
                .iter()
                .map(|(name, seq)| (name.clone(), keep.iter().map(|&i| seq[i]).collect()))
                .collect(),
            len: keep.len(),
        })
    }
}
