//!
//! Stages of the exon analysis pipeline used by the `phylohmm` binary
//!
use crate::alignment::{Alignment, Column};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::hmm::{self, Evaluation, HMMParams};
use crate::io::exons::Exon;
use crate::likelihood::{self, BestAlpha};
use crate::tree::PhylogeneticTree;
use crate::utils::timer;
use crate::windows::{label_windows, windows_with_exons, AlphaHistogram};
use log::info;

///
/// Likelihood of a single column where every leaf shows `base`, for each of `alphas`.
///
pub fn uniform_column_likelihoods(
    tree: &PhylogeneticTree,
    base: u8,
    alphas: &[f64],
) -> Result<Vec<(f64, f64)>> {
    let column: Column = tree
        .leaves()
        .map(|leaf| (leaf.name().to_string(), base))
        .collect();
    alphas
        .iter()
        .map(|&alpha| Ok((alpha, likelihood::column_likelihood(tree, alpha, &column)?)))
        .collect()
}

///
/// Best alpha of each `scan_window`-column window of the raw alignment.
///
pub fn scan(
    alignment: &Alignment,
    tree: &PhylogeneticTree,
    config: &PipelineConfig,
) -> Result<Vec<BestAlpha>> {
    let (alphas, t) = timer(|| {
        likelihood::best_alphas(alignment, tree, config.scan_window, config.parallel)
    });
    let alphas = alphas?;
    info!("scanned {} windows in {}ms", alphas.len(), t);
    Ok(alphas)
}

///
/// Histogram of best alphas of the windows with and without exons of the reference.
///
pub fn histogram(
    alignment: &Alignment,
    tree: &PhylogeneticTree,
    exons: &[Exon],
    config: &PipelineConfig,
) -> Result<AlphaHistogram> {
    let reference = alignment
        .row(&config.reference)
        .ok_or_else(|| Error::MissingLeaf {
            name: config.reference.clone(),
        })?;
    let alphas: Vec<usize> = scan(alignment, tree, config)?
        .into_iter()
        .map(|best| best.index)
        .collect();
    let exon_windows = windows_with_exons(reference, exons, config.scan_window)?;
    info!(
        "{} of {} windows overlap an exon",
        exon_windows.len(),
        alphas.len()
    );
    AlphaHistogram::new(&alphas, &exon_windows)
}

///
/// Discretized best alpha of each `hmm_window`-column window, after removing
/// the columns where the reference has a gap.
///
pub fn compute_alphas(
    alignment: &Alignment,
    tree: &PhylogeneticTree,
    config: &PipelineConfig,
) -> Result<Vec<usize>> {
    let filtered = alignment.filter_gaps_in(&config.reference)?;
    info!(
        "{} of {} columns kept after removing gaps of {}",
        filtered.len(),
        alignment.len(),
        config.reference
    );
    let (alphas, t) = timer(|| {
        likelihood::best_alphas(&filtered, tree, config.hmm_window, config.parallel)
    });
    let alphas: Vec<usize> = alphas?.into_iter().map(|best| best.index).collect();
    info!("computed {} alphas in {}ms", alphas.len(), t);
    Ok(alphas)
}

///
/// Trained model and its accuracy on the held-out windows
///
#[derive(Clone, Debug)]
pub struct Segmentation {
    pub params: HMMParams,
    pub n_train: usize,
    pub n_test: usize,
    pub evaluation: Evaluation,
}

///
/// Label the windows of `alphas` from `exons`, train on the leading
/// `train_fraction` of them and evaluate Viterbi decoding on the rest.
///
pub fn segment(alphas: &[usize], exons: &[Exon], config: &PipelineConfig) -> Result<Segmentation> {
    config.validate()?;
    let labels = label_windows(exons, alphas.len(), config.hmm_window);
    let n_train = config.n_train(alphas.len());
    let (train_alphas, test_alphas) = alphas.split_at(n_train);
    let (train_labels, test_labels) = labels.split_at(n_train);
    info!(
        "segmenting {} windows: {} for training, {} for testing",
        alphas.len(),
        train_alphas.len(),
        test_alphas.len()
    );

    let params = hmm::train(train_alphas, train_labels)?;
    let evaluation = params.evaluate(test_alphas, test_labels)?;
    info!("accuracy on test windows: {}", evaluation.accuracy());
    Ok(Segmentation {
        params,
        n_train: train_alphas.len(),
        n_test: test_alphas.len(),
        evaluation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_seq::evolve_along_tree;
    use crate::tree::tests::three_leaves;

    fn serial() -> PipelineConfig {
        PipelineConfig {
            reference: "A".to_string(),
            scan_window: 10,
            hmm_window: 5,
            parallel: false,
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn uniform_columns() {
        let tree = three_leaves();
        let ps = uniform_column_likelihoods(&tree, b'A', &[0.0, 1.0, 1e9]).unwrap();
        assert_abs_diff_eq!(ps[0].1, 0.25, epsilon = 1e-12);
        assert!(ps[1].1 < 0.25 && ps[1].1 > 1.0 / 64.0);
        assert_abs_diff_eq!(ps[2].1, 1.0 / 64.0, epsilon = 1e-12);
        assert!(uniform_column_likelihoods(&tree, b'x', &[1.0]).is_err());
    }

    #[test]
    fn histogram_counts_every_window() {
        let tree = three_leaves();
        let alignment = evolve_along_tree(&tree, 0.5, 95, 3).unwrap();
        let exons = vec![Exon { start: 12, end: 31 }];
        let hist = histogram(&alignment, &tree, &exons, &serial()).unwrap();
        assert_eq!(hist.n_total(), 10);
        assert_eq!(hist.n_with_exons(), 3);
        let missing = PipelineConfig {
            reference: "Human".to_string(),
            ..serial()
        };
        assert!(matches!(
            histogram(&alignment, &tree, &exons, &missing),
            Err(Error::MissingLeaf { .. })
        ));
    }

    #[test]
    fn alphas_use_gap_free_reference() {
        let tree = three_leaves();
        let alignment = Alignment::new(vec![
            ("A".to_string(), b"AC-GTACG-TAC".to_vec()),
            ("B".to_string(), b"ACTGTACGATAC".to_vec()),
            ("C".to_string(), b"ACTGTACGATAC".to_vec()),
        ])
        .unwrap();
        let alphas = compute_alphas(&alignment, &tree, &serial()).unwrap();
        // 10 gap-free columns in windows of 5
        assert_eq!(alphas, vec![0, 0]);
    }

    #[test]
    fn segment_split() {
        // windows 0..3 and 7..10 are exons on a gap-free reference of 100 bases
        let alphas = vec![2, 3, 2, 8, 9, 8, 9, 2, 3, 2, 9, 8, 2, 2, 3, 9, 8, 2, 2, 3];
        let exons = vec![
            Exon { start: 15, end: 34 },
            Exon { start: 50, end: 59 },
            Exon { start: 75, end: 84 },
        ];
        let seg = segment(&alphas, &exons, &serial()).unwrap();
        assert_eq!(seg.n_train, 14);
        assert_eq!(seg.n_test, 6);
        assert_eq!(seg.evaluation.total(), 6);
        assert_eq!(seg.evaluation.accuracy(), 1.0);
    }

    #[test]
    fn segment_needs_both_states_in_training() {
        let alphas = vec![1; 20];
        assert!(matches!(
            segment(&alphas, &[], &serial()),
            Err(Error::DegenerateTrainingSet { state: 'e' })
        ));
    }
}
