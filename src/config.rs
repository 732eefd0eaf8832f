//! Run configuration.

use std::path::{Path, PathBuf};

use crate::stage::RuleKind;

pub const DEFAULT_INPUT_PATH: &str = "data/products.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "data/transformed_products.csv";

/// Paths and rule sequence for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub rules: Vec<RuleKind>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            rules: RuleKind::STANDARD.to_vec(),
        }
    }
}

impl Config {
    pub fn with_input(mut self, path: impl AsRef<Path>) -> Self {
        self.input_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_output(mut self, path: impl AsRef<Path>) -> Self {
        self.output_path = path.as_ref().to_path_buf();
        self
    }
}
