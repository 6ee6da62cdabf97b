//!
//! Felsenstein's pruning algorithm and the grid search of the rate `alpha`.
//!
//! # Overview of calculation
//!
//! For a single alignment column, `L[n][b]` is the probability of the data
//! observed at the leaves below node `n` given base `b` at `n`:
//!
//! ```text
//! L[leaf][b] = 1 if the leaf observes b (or N / -), else 0
//! L[n][b]    = (sum_c P(b->c, t_l) L[l][c]) * (sum_c P(b->c, t_r) L[r][c])
//! P(column)  = sum_b 0.25 L[root][b]
//! ```
//!
//! Nodes are visited in the tree's traversal order, so children are always
//! filled before their parents.
//!
use crate::alignment::{Alignment, Column};
use crate::error::{Error, Result};
use crate::model::{Symbol, TransitionMatrix, EQUILIBRIUM, N_BASES};
use crate::prob::{p, LogProb};
use crate::tree::PhylogeneticTree;
use crate::utils::progress_common_style;
use indicatif::ParallelProgressIterator;
use log::{debug, info};
use rayon::prelude::*;

/// Number of candidate values of alpha, `0.0, 0.1, ..., 2.0`
pub const N_ALPHAS: usize = 21;

/// Grid points per unit of alpha (spacing 0.1)
pub const ALPHAS_PER_UNIT: usize = 10;

///
/// Value of the `index`-th grid point.
///
/// Enumerated from the integer index rather than accumulated by repeated
/// addition, so the last point is exactly `2.0`.
///
pub fn alpha_of_index(index: usize) -> f64 {
    index as f64 / ALPHAS_PER_UNIT as f64
}

///
/// Nearest grid index of `alpha`, `round(alpha * 10)`
///
pub fn index_of_alpha(alpha: f64) -> usize {
    (alpha * ALPHAS_PER_UNIT as f64).round().max(0.0) as usize
}

///
/// all `(index, alpha)` of the grid
///
pub fn alpha_grid() -> impl Iterator<Item = (usize, f64)> {
    (0..N_ALPHAS).map(|i| (i, alpha_of_index(i)))
}

///
/// Observations of one column arranged by node position.
/// `None` for internal nodes.
///
pub type LeafData = Vec<Option<Symbol>>;

///
/// Arrange a `name -> character` column along the traversal order of `tree`.
///
pub fn leaf_data(tree: &PhylogeneticTree, column: &Column) -> Result<LeafData> {
    tree.nodes()
        .map(|node| {
            if node.is_leaf() {
                let c = column.get(node.name()).ok_or_else(|| Error::MissingLeaf {
                    name: node.name().to_string(),
                })?;
                Symbol::from_u8(*c).map(Some)
            } else {
                Ok(None)
            }
        })
        .collect()
}

///
/// Tree bound to a fixed alpha, with the transition matrix of every
/// branch computed once.
///
pub struct Felsenstein<'a> {
    tree: &'a PhylogeneticTree,
    /// matrix of the branch above each node, by position
    matrices: Vec<TransitionMatrix>,
}

impl<'a> Felsenstein<'a> {
    pub fn new(tree: &'a PhylogeneticTree, alpha: f64) -> Result<Self> {
        let matrices = tree
            .nodes()
            .map(|node| TransitionMatrix::new(node.branch_length(), alpha))
            .collect::<Result<Vec<_>>>()?;
        Ok(Felsenstein { tree, matrices })
    }
    ///
    /// Fill the `[size][4]` table for one column.
    ///
    pub fn table(&self, leaves: &LeafData) -> Vec<[f64; N_BASES]> {
        let mut table = vec![[0.0; N_BASES]; self.tree.size()];
        for (i, node) in self.tree.nodes().enumerate() {
            let row = match (node.children(), leaves[i]) {
                (Some((l, r)), _) => {
                    let (ml, mr) = (&self.matrices[l], &self.matrices[r]);
                    let mut row = [0.0; N_BASES];
                    for (b, x) in row.iter_mut().enumerate() {
                        *x = ml.propagate(b, &table[l]) * mr.propagate(b, &table[r]);
                    }
                    row
                }
                (None, Some(symbol)) => symbol.leaf_likelihoods(),
                // leaf without observation
                (None, None) => [1.0; N_BASES],
            };
            table[i] = row;
        }
        table
    }
    ///
    /// Probability of the column, in `[0, 1]`
    ///
    pub fn likelihood(&self, leaves: &LeafData) -> f64 {
        let table = self.table(leaves);
        table[self.tree.size() - 1]
            .iter()
            .map(|l| EQUILIBRIUM * l)
            .sum()
    }
}

///
/// Probability of observing `column` at the leaves of `tree` with rate `alpha`.
///
pub fn column_likelihood(tree: &PhylogeneticTree, alpha: f64, column: &Column) -> Result<f64> {
    let leaves = leaf_data(tree, column)?;
    Ok(Felsenstein::new(tree, alpha)?.likelihood(&leaves))
}

///
/// Result of the grid search of a window
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BestAlpha {
    /// grid index, `round(alpha * 10)`
    pub index: usize,
    pub alpha: f64,
    /// product of the column likelihoods at `alpha`
    pub likelihood: LogProb,
}

///
/// Product of the column likelihoods of `columns` at `alpha`, in log space.
///
pub fn window_likelihood(
    tree: &PhylogeneticTree,
    alpha: f64,
    columns: &[LeafData],
) -> Result<LogProb> {
    let f = Felsenstein::new(tree, alpha)?;
    Ok(LogProb::product_of(
        columns.iter().map(|leaves| p(f.likelihood(leaves))),
    ))
}

///
/// Find the alpha in `{0.0, 0.1, ..., 2.0}` maximizing the likelihood of `window`.
///
/// Ties keep the lowest alpha. If every candidate has likelihood zero, alpha 0 is returned.
///
pub fn best_alpha(window: &Alignment, tree: &PhylogeneticTree) -> Result<BestAlpha> {
    let columns: Vec<LeafData> = window
        .columns()
        .map(|column| leaf_data(tree, &column))
        .collect::<Result<_>>()?;

    let mut best: Option<BestAlpha> = None;
    for (index, alpha) in alpha_grid() {
        let likelihood = window_likelihood(tree, alpha, &columns)?;
        let is_better = match best {
            None => true,
            Some(b) => likelihood.is_greater_than(b.likelihood),
        };
        if is_better {
            best = Some(BestAlpha {
                index,
                alpha,
                likelihood,
            });
        }
    }
    // the grid is never empty
    let best = best.ok_or_else(|| Error::misaligned("empty alpha grid"))?;
    debug!(
        "window of {} columns: best alpha={} ({})",
        window.len(),
        best.alpha,
        best.likelihood
    );
    Ok(best)
}

///
/// Best alpha of every non-overlapping window of `window_size` columns, in window order.
///
/// Windows are independent; with `parallel` they are evaluated with rayon.
///
pub fn best_alphas(
    alignment: &Alignment,
    tree: &PhylogeneticTree,
    window_size: usize,
    parallel: bool,
) -> Result<Vec<BestAlpha>> {
    let windows = alignment.windows(window_size)?;
    info!(
        "scanning {} windows of {} columns (parallel={})",
        windows.len(),
        window_size,
        parallel
    );
    if parallel {
        windows
            .par_iter()
            .progress_with_style(progress_common_style())
            .map(|window| best_alpha(window, tree))
            .collect()
    } else {
        windows
            .iter()
            .map(|window| best_alpha(window, tree))
            .collect()
    }
}
