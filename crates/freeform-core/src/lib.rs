pub mod config;
pub mod error;
pub mod tolerance;
pub mod traits;

pub use config::{KernelConfig, OrderPolicy};
pub use error::{FreeformError, Result};
pub use tolerance::Tolerance;
