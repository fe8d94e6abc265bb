//! greenloop - AI-assisted TDD repair loop for Maven projects.
//!
//! greenloop converges one Java class toward a fixed JUnit test suite by
//! repeatedly running the build tool, classifying the failure, asking a
//! text-generation model for a corrected class (or a pom.xml dependency
//! fragment), and writing the extracted fenced block back to disk, until
//! the build reports success or the iteration budget is exhausted.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture
//! principles:
//!
//! - **Domain Layer** (`domain`): models, errors and the two port traits
//! - **Service Layer** (`services`): pure logic — classification, fence
//!   extraction, manifest merging, prompt templating
//! - **Application Layer** (`application`): the convergence loop
//! - **Infrastructure Layer** (`infrastructure`): config loading, Ollama
//!   and Maven adapters, workspace IO, mocks for testing
//! - **CLI Layer** (`cli`): command-line interface

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::ConvergenceLoop;
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    BuildConfig, BuildResult, Config, DependencyDescriptor, FailureCategory, GenerationTarget,
    GeneratorConfig, LoggingConfig, ManifestConfig, PolicyConfig, RunReport,
};
pub use domain::ports::{BuildRunner, Generator};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{classify, extract_fenced_block, merge, MergeOutcome};
