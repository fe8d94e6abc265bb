//! Build-runner adapter implementations.

pub mod maven;
pub mod mock;

pub use maven::MavenBuildRunner;
pub use mock::{MockBuildReply, MockBuildRunner};
