//! Dependency descriptors parsed from and written back to the manifest.

/// A single `<dependency>` entry from a Maven manifest.
///
/// Identity is `groupId:artifactId`; version, scope and type are payload,
/// not identity. A later descriptor with the same key supersedes an earlier
/// one, including silently changing its version or scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDescriptor {
    /// Maven group id.
    pub group_id: String,
    /// Maven artifact id.
    pub artifact_id: String,
    /// Optional version; managed dependencies omit it.
    pub version: Option<String>,
    /// Optional scope, e.g. `test`.
    pub scope: Option<String>,
    /// Optional packaging type; `pom` marks a bill-of-materials import.
    pub kind: Option<String>,
}

impl DependencyDescriptor {
    /// Merge key: `groupId:artifactId`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    /// Whether this descriptor is a bill-of-materials import.
    pub fn is_bom(&self) -> bool {
        self.kind.as_deref() == Some("pom")
    }

    /// Render the descriptor as an indented manifest entry.
    ///
    /// Type is deliberately not rendered: BOM imports are filtered before
    /// the manifest is rebuilt, and plain jar entries never carry one.
    pub fn render_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str("    <dependency>\n");
        xml.push_str(&format!("      <groupId>{}</groupId>\n", self.group_id));
        xml.push_str(&format!(
            "      <artifactId>{}</artifactId>\n",
            self.artifact_id
        ));
        if let Some(ref version) = self.version {
            xml.push_str(&format!("      <version>{version}</version>\n"));
        }
        if let Some(ref scope) = self.scope {
            xml.push_str(&format!("      <scope>{scope}</scope>\n"));
        }
        xml.push_str("    </dependency>");
        xml
    }
}

impl std::fmt::Display for DependencyDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.group_id,
            self.artifact_id,
            self.version.as_deref().unwrap_or("*")
        )
    }
}
