//!
//! Synthetic alignments evolved along a tree under Jukes-Cantor
//!
use crate::alignment::{Alignment, Sequence};
use crate::error::{Error, Result};
use crate::model::{TransitionMatrix, BASES, N_BASES};
use crate::tree::PhylogeneticTree;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// Evolve a uniformly random root sequence of `length` bases down `tree`
/// with rate `alpha`, and return the sequences observed at the leaves.
///
pub fn evolve_along_tree(
    tree: &PhylogeneticTree,
    alpha: f64,
    length: usize,
    seed: u64,
) -> Result<Alignment> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    // index sequences by base index 0..4
    let mut seqs: Vec<Vec<usize>> = vec![Vec::new(); tree.size()];
    seqs[tree.root().position()] = (0..length).map(|_| rng.gen_range(0..N_BASES)).collect();

    // parents have larger positions, so walk backwards
    for node in tree.nodes().rev() {
        if let Some((l, r)) = node.children() {
            for child in [l, r] {
                let child_node = tree.get(child)?;
                let m = TransitionMatrix::new(child_node.branch_length(), alpha)?;
                let dists = (0..N_BASES)
                    .map(|b| WeightedIndex::new((0..N_BASES).map(|c| m.prob(b, c))))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|e| Error::malformed(format!("{}", e)))?;
                let evolved: Vec<usize> = seqs[node.position()]
                    .iter()
                    .map(|&b| dists[b].sample(&mut rng))
                    .collect();
                seqs[child] = evolved;
            }
        }
    }

    Alignment::new(tree.leaves().map(|leaf| {
        let seq: Sequence = seqs[leaf.position()].iter().map(|&b| BASES[b]).collect();
        (leaf.name().to_string(), seq)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::tests::three_leaves;

    #[test]
    fn no_mutation_at_zero_rate() {
        let tree = three_leaves();
        let a = evolve_along_tree(&tree, 0.0, 200, 3).unwrap();
        assert_eq!(a.n_rows(), 3);
        assert_eq!(a.len(), 200);
        assert_eq!(a.row("A"), a.row("B"));
        assert_eq!(a.row("A"), a.row("C"));
    }

    #[test]
    fn mutations_at_positive_rate() {
        let tree = three_leaves();
        let a = evolve_along_tree(&tree, 2.0, 1000, 3).unwrap();
        let x = a.row("A").unwrap();
        let y = a.row("C").unwrap();
        let n_diff = x.iter().zip(y.iter()).filter(|(p, q)| p != q).count();
        // distance A-C is 2.0: expected 0.75 * (1 - exp(-4/3 * 2 * 2)) ~ 0.75 of 1000
        assert!(n_diff > 600 && n_diff < 850, "n_diff={}", n_diff);
    }
}
