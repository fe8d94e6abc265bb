//! Build failure classification.
//!
//! Pure and side-effect-free: everything the decision needs is passed in.

use crate::domain::models::FailureCategory;

/// Dependency-resolution phrases recognized in lower-cased build output.
const DEPENDENCY_ERROR_PHRASES: &[&str] = &[
    "could not resolve dependencies",
    "missing artifact",
    "failed to read artifact descriptor",
    "dependencyresolutionexception",
];

/// Classify one build invocation's output.
///
/// The success marker wins over everything else, even when dependency-error
/// phrases are also present. Dependency errors are only meaningful once the
/// generated unit exists on disk: before that, any failure is an ordinary
/// compile failure, regardless of message content.
pub fn classify(output: &str, success_marker: &str, unit_exists: bool) -> FailureCategory {
    if output.contains(success_marker) {
        return FailureCategory::NoFailure;
    }

    if !unit_exists {
        return FailureCategory::OtherFailure;
    }

    let lower = output.to_lowercase();
    let dependency_failure = DEPENDENCY_ERROR_PHRASES
        .iter()
        .any(|phrase| lower.contains(phrase))
        || (lower.contains("was not found in") && lower.contains("repository"));

    if dependency_failure {
        FailureCategory::DependencyResolutionFailure
    } else {
        FailureCategory::OtherFailure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "BUILD SUCCESS";

    #[test]
    fn success_marker_always_wins() {
        let output = "Could not resolve dependencies\n[INFO] BUILD SUCCESS";
        assert_eq!(
            classify(output, MARKER, true),
            FailureCategory::NoFailure
        );
        assert_eq!(
            classify(output, MARKER, false),
            FailureCategory::NoFailure
        );
    }

    #[test]
    fn dependency_phrases_are_ignored_before_the_unit_exists() {
        let output = "[ERROR] Could not resolve dependencies for project x";
        assert_eq!(
            classify(output, MARKER, false),
            FailureCategory::OtherFailure
        );
    }

    #[test]
    fn dependency_phrases_match_case_insensitively() {
        for output in [
            "[ERROR] Could Not Resolve Dependencies for project x",
            "[ERROR] Missing artifact org.junit.jupiter:junit-jupiter",
            "[ERROR] Failed to read artifact descriptor for x",
            "org.eclipse.aether.resolution.DependencyResolutionException",
        ] {
            assert_eq!(
                classify(output, MARKER, true),
                FailureCategory::DependencyResolutionFailure,
                "output: {output}"
            );
        }
    }

    #[test]
    fn not_found_phrase_requires_repository_mention() {
        let output = "artifact x was not found in central (https://repo.maven.apache.org), repository cache";
        assert_eq!(
            classify(output, MARKER, true),
            FailureCategory::DependencyResolutionFailure
        );

        let output = "symbol was not found in scope";
        assert_eq!(
            classify(output, MARKER, true),
            FailureCategory::OtherFailure
        );
    }

    #[test]
    fn plain_compile_failure_is_other() {
        let output = "[ERROR] /src/Foo.java:[3,8] ';' expected\n[INFO] BUILD FAILURE";
        assert_eq!(
            classify(output, MARKER, true),
            FailureCategory::OtherFailure
        );
    }
}
