//! Kernel configuration.

use serde::{Deserialize, Serialize};

use crate::tolerance::Tolerance;

/// Which derivative order tuples the Bezier engine accepts.
///
/// Every policy rejects a per-axis order above
/// [`KernelConfig::MAX_DERIVATIVE_ORDER`] or above the axis degree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderPolicy {
    /// Each axis is limited independently, so mixed partials such as
    /// `(2, 2)` on a bicubic surface are available.
    #[default]
    PerAxis,
    /// The sum of all per-axis orders is limited to
    /// [`KernelConfig::MAX_DERIVATIVE_ORDER`] as well.
    TotalOrder,
}

impl OrderPolicy {
    pub fn admits(self, orders: &[usize]) -> bool {
        match self {
            OrderPolicy::PerAxis => true,
            OrderPolicy::TotalOrder => {
                orders.iter().sum::<usize>() <= KernelConfig::MAX_DERIVATIVE_ORDER
            }
        }
    }
}

/// Settings shared by every entity built from one kernel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Highest degree covered by the binomial table.
    pub max_degree: usize,
    pub order_policy: OrderPolicy,
    pub tolerance: Tolerance,
}

impl KernelConfig {
    pub const DEFAULT_MAX_DEGREE: usize = 16;
    pub const MAX_DERIVATIVE_ORDER: usize = 3;

    pub fn with_order_policy(mut self, order_policy: OrderPolicy) -> Self {
        self.order_policy = order_policy;
        self
    }

    pub fn with_max_degree(mut self, max_degree: usize) -> Self {
        self.max_degree = max_degree;
        self
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            max_degree: Self::DEFAULT_MAX_DEGREE,
            order_policy: OrderPolicy::default(),
            tolerance: Tolerance::default(),
        }
    }
}
