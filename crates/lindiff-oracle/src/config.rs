//! Driver configuration

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::{OracleError, OracleResult};

pub const DEFAULT_SEED: u64 = 1043751861432829521;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub seed: u64,
    /// Namespace the operations are resolved in.
    pub namespace: String,
    /// Operand counts swept before the zero-argument `dot` check.
    pub warmup_counts: Vec<usize>,
    pub counts: Vec<usize>,
    pub max_vector_dim: usize,
    /// Largest `rows + cols - 1` exercised by the matrix sweep.
    pub max_complexity: usize,
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig {
            seed: DEFAULT_SEED,
            namespace: "linear".to_string(),
            warmup_counts: vec![2, 1],
            counts: vec![3, 4, 5],
            max_vector_dim: 10,
            max_complexity: 10,
        }
    }
}

impl OracleConfig {
    pub fn from_json(text: &str) -> OracleResult<Self> {
        let config: OracleConfig = serde_json::from_str(text).map_err(|e| OracleError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> OracleResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| OracleError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> OracleResult<()> {
        if let Some(count) = self.warmup_counts.iter().chain(&self.counts).find(|&&c| c == 0) {
            return Err(OracleError::Config(format!("operand count must be positive, got {}", count)));
        }
        if self.max_vector_dim == 0 || self.max_complexity == 0 {
            return Err(OracleError::Config("dimensions must be positive".to_string()));
        }
        if self.namespace.is_empty() {
            return Err(OracleError::Config("namespace must not be empty".to_string()));
        }
        Ok(())
    }
}
