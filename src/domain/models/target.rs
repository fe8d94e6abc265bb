//! The generation target: the one class a repair run converges toward.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Immutable description of the unit under repair.
///
/// Fixed for the lifetime of one `run_full_process` invocation. The class
/// name and package segments are validated as Java identifiers, which also
/// keeps them safe to join into file paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationTarget {
    /// Simple class name, e.g. `PriceCalculator`.
    pub class_name: String,
    /// Dotted package name, e.g. `com.example.shop`. `None` means the
    /// default package.
    pub package_name: Option<String>,
    /// Free-form specification text handed to the generator.
    pub specification: String,
}

impl GenerationTarget {
    /// Create a validated target.
    pub fn new(
        class_name: impl Into<String>,
        package_name: Option<String>,
        specification: impl Into<String>,
    ) -> DomainResult<Self> {
        let class_name = class_name.into();
        if !is_java_identifier(&class_name) {
            return Err(DomainError::InvalidTarget(format!(
                "class name is not a valid Java identifier: {class_name}"
            )));
        }

        // Treat a blank package the same as an absent one.
        let package_name = package_name.filter(|p| !p.trim().is_empty());
        if let Some(ref package) = package_name {
            if !is_valid_package(package) {
                return Err(DomainError::InvalidTarget(format!(
                    "package name is not a valid dotted identifier: {package}"
                )));
            }
        }

        Ok(Self {
            class_name,
            package_name,
            specification: specification.into(),
        })
    }

    /// Dotted package or the empty string for the default package.
    pub fn package_or_empty(&self) -> &str {
        self.package_name.as_deref().unwrap_or("")
    }

    /// Package converted to a relative path (`com.example` -> `com/example`).
    pub fn package_as_path(&self) -> String {
        self.package_or_empty().replace('.', "/")
    }

    /// File name of the unit under repair.
    pub fn unit_file_name(&self) -> String {
        format!("{}.java", self.class_name)
    }

    /// Conventional file name of the accompanying test class.
    pub fn test_file_name(&self) -> String {
        format!("{}Test.java", self.class_name)
    }
}

/// Whether `s` is a valid dotted Java package name. Every segment must be
/// a Java identifier, which also keeps the name safe to join into a path.
pub(crate) fn is_valid_package(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_java_identifier)
}

fn is_java_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_class_and_package() {
        let target = GenerationTarget::new(
            "PriceCalculator",
            Some("com.example.shop".to_string()),
            "spec",
        )
        .unwrap();
        assert_eq!(target.package_as_path(), "com/example/shop");
        assert_eq!(target.unit_file_name(), "PriceCalculator.java");
        assert_eq!(target.test_file_name(), "PriceCalculatorTest.java");
    }

    #[test]
    fn blank_package_becomes_default_package() {
        let target = GenerationTarget::new("Foo", Some("  ".to_string()), "spec").unwrap();
        assert_eq!(target.package_name, None);
        assert_eq!(target.package_or_empty(), "");
    }

    #[test]
    fn rejects_path_traversal_in_class_name() {
        assert!(GenerationTarget::new("../Evil", None, "spec").is_err());
        assert!(GenerationTarget::new("Foo Bar", None, "spec").is_err());
        assert!(GenerationTarget::new("", None, "spec").is_err());
    }

    #[test]
    fn rejects_malformed_package_segments() {
        assert!(GenerationTarget::new("Foo", Some("com..example".to_string()), "spec").is_err());
        assert!(GenerationTarget::new("Foo", Some("com.1bad".to_string()), "spec").is_err());
    }
}
