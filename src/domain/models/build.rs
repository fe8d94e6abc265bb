//! Build invocation results and their classification.

/// Raw output of one build/test invocation plus the derived pass flag.
///
/// The flag is a fixed substring check against the configured success
/// marker, not a structured parse of the tool output.
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// Combined stdout/stderr of the build tool.
    pub output: String,
    /// Whether the output contained the success marker.
    pub passed: bool,
}

impl BuildResult {
    /// Derive a result from raw output and the configured success marker.
    pub fn from_output(output: String, success_marker: &str) -> Self {
        let passed = output.contains(success_marker);
        Self { output, passed }
    }
}

/// What kind of failure a build invocation represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// The success marker was present; nothing to repair.
    NoFailure,
    /// The unit exists and the output names a dependency-resolution problem.
    DependencyResolutionFailure,
    /// Any other compile or test failure.
    OtherFailure,
}
