//!
//! Settings of the analysis pipeline
//!
use crate::error::{Error, Result};
use crate::tree::DEFAULT_ROOT;
use serde::{Deserialize, Serialize};
use std::path::Path;

///
/// Pipeline settings, loadable from JSON. Missing fields take their default.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// name of the root node of the tree
    pub root: String,
    /// taxon whose coordinates the exons refer to
    pub reference: String,
    /// window size of the alpha scan on the raw alignment
    pub scan_window: usize,
    /// window size of the HMM segmentation on the gap-filtered alignment
    pub hmm_window: usize,
    /// fraction of windows used for training, the rest for testing
    pub train_fraction: f64,
    /// evaluate windows in parallel with rayon
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            root: DEFAULT_ROOT.to_string(),
            reference: "Human".to_string(),
            scan_window: 100,
            hmm_window: 10,
            train_fraction: 0.7,
            parallel: true,
        }
    }
}

impl PipelineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(json).map_err(|e| Error::Parse {
            line: e.line(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
    pub fn to_json(&self) -> String {
        // a struct of plain fields always serializes
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
    ///
    /// Window sizes must be positive and the training fraction in `(0, 1)`.
    ///
    pub fn validate(&self) -> Result<()> {
        if self.scan_window == 0 || self.hmm_window == 0 {
            return Err(Error::misaligned("window size must be positive"));
        }
        if !(self.train_fraction > 0.0 && self.train_fraction < 1.0) {
            return Err(Error::misaligned(format!(
                "training fraction {} is not in (0, 1)",
                self.train_fraction
            )));
        }
        Ok(())
    }
    ///
    /// Number of windows used for training out of `n_windows`.
    ///
    pub fn n_train(&self, n_windows: usize) -> usize {
        (n_windows as f64 * self.train_fraction).floor() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.root, "Root");
        assert_eq!(config.reference, "Human");
        assert_eq!(config.scan_window, 100);
        assert_eq!(config.hmm_window, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json() {
        let config = PipelineConfig::from_json(r#"{"hmm_window": 20, "parallel": false}"#).unwrap();
        assert_eq!(config.hmm_window, 20);
        assert!(!config.parallel);
        assert_eq!(config.scan_window, 100);
        let back = PipelineConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn invalid_json() {
        assert!(matches!(
            PipelineConfig::from_json("{\n\"hmm_window\": \"x\"}"),
            Err(Error::Parse { line: 2, .. })
        ));
        assert!(PipelineConfig::from_json(r#"{"scan_window": 0}"#).is_err());
        assert!(PipelineConfig::from_json(r#"{"train_fraction": 1.0}"#).is_err());
    }

    #[test_case(10, 7)]
    #[test_case(100, 70)]
    #[test_case(3, 2)]
    #[test_case(0, 0)]
    fn training_split(n_windows: usize, n_train: usize) {
        assert_eq!(PipelineConfig::default().n_train(n_windows), n_train);
    }
}
