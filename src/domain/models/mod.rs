//! Domain models.

pub mod build;
pub mod config;
pub mod dependency;
pub mod report;
pub mod target;

pub use build::{BuildResult, FailureCategory};
pub use config::{
    BuildConfig, Config, GeneratorConfig, LoggingConfig, ManifestConfig, PolicyConfig,
};
pub use dependency::DependencyDescriptor;
pub use report::RunReport;
pub use target::GenerationTarget;
