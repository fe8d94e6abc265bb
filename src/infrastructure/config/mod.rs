//! Configuration infrastructure.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
