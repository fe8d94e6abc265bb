//! Application layer: use case orchestration.

pub mod convergence_loop;

pub use convergence_loop::ConvergenceLoop;
