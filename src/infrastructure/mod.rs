//! Infrastructure layer: external integrations and adapters.

pub mod build;
pub mod config;
pub mod generators;
pub mod workspace;
