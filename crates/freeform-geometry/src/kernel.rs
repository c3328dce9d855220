//! Shared evaluation context injected into every entity.

use std::sync::Arc;

use freeform_core::{FreeformError, KernelConfig, Result};
use freeform_math::BinomialTable;

/// Binomial table plus configuration, built once and shared through `Arc`.
#[derive(Debug, Clone)]
pub struct Kernel {
    binomial: BinomialTable,
    config: KernelConfig,
}

impl Kernel {
    pub fn new(config: KernelConfig) -> Self {
        Self {
            binomial: BinomialTable::new(config.max_degree),
            config,
        }
    }

    pub fn shared(config: KernelConfig) -> Arc<Self> {
        Arc::new(Self::new(config))
    }

    pub fn binomial(&self) -> &BinomialTable {
        &self.binomial
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Reject degrees the binomial table cannot serve.
    pub fn check_degrees(&self, degrees: &[usize]) -> Result<()> {
        match degrees.iter().find(|&&d| !self.binomial.supports(d)) {
            Some(&degree) => Err(FreeformError::UnsupportedDegree {
                degree,
                max: self.binomial.max_degree(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new(KernelConfig::default())
    }
}
