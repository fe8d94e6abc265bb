//! Generator adapter implementations.

pub mod mock;
pub mod ollama;

pub use mock::{MockGenerator, MockReply};
pub use ollama::OllamaGenerator;
