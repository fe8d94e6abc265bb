//! Pure business logic: classification, extraction, merging, prompting.

pub mod classifier;
pub mod extractor;
pub mod manifest_merger;
pub mod prompts;

pub use classifier::classify;
pub use extractor::extract_fenced_block;
pub use manifest_merger::{merge, MergeOutcome};
