//! Manifest dependency merging.
//!
//! Reconciles AI-suggested `<dependency>` entries into an existing pom.xml
//! without destroying what is already there. The merge is total and
//! deterministic: the manifest's dependency section is reconstructed fully
//! from the merged map on every call, and everything outside that section
//! is left byte-identical.

use tracing::{debug, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::DependencyDescriptor;

const DEPENDENCY_OPEN: &str = "<dependency>";
const DEPENDENCY_CLOSE: &str = "</dependency>";
const SECTION_OPEN: &str = "<dependencies>";
const SECTION_CLOSE: &str = "</dependencies>";

/// Result of a merge.
///
/// `NoChange` is distinct from an applied merge so the caller can decide
/// whether the generation round produced anything actionable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The dependency section was rebuilt.
    Applied {
        /// The full rewritten manifest text.
        manifest: String,
        /// Candidates inserted under a new key.
        added: u32,
        /// Candidates that superseded an existing key in place.
        replaced: u32,
    },
    /// No candidate survived sanitization and filtering; the manifest is
    /// untouched.
    NoChange,
}

/// Merge a generated manifest fragment into an existing manifest.
///
/// Candidates are parsed from the sanitized fragment in document order,
/// filtered against `allowed_groups` (bill-of-materials imports are always
/// dropped), then upserted by `groupId:artifactId` key: a new key appends,
/// an existing key is replaced in place without moving. A manifest without
/// a `<dependencies>` section is unparsable and aborts the merge with
/// nothing written.
pub fn merge(
    existing_manifest: &str,
    fragment: &str,
    allowed_groups: &[String],
) -> DomainResult<MergeOutcome> {
    let section = locate_dependency_section(existing_manifest).ok_or_else(|| {
        DomainError::ManifestUnparsable("no <dependencies> section found".to_string())
    })?;

    let sanitized = sanitize_fragment(fragment);
    let mut survivors = Vec::new();
    for candidate in parse_descriptors(&sanitized) {
        if !allowed_groups.contains(&candidate.group_id) {
            warn!(dependency = %candidate, "skipping dependency outside the allowed groups");
            continue;
        }
        if candidate.is_bom() {
            warn!(dependency = %candidate, "skipping bill-of-materials import");
            continue;
        }
        survivors.push(candidate);
    }

    if survivors.is_empty() {
        debug!("no usable dependencies in fragment, manifest left unchanged");
        return Ok(MergeOutcome::NoChange);
    }

    // First-seen order, duplicates collapse onto their first position.
    let mut merged: Vec<DependencyDescriptor> = Vec::new();
    for existing in parse_descriptors(existing_manifest) {
        upsert(&mut merged, existing);
    }

    let mut added = 0;
    let mut replaced = 0;
    for candidate in survivors {
        debug!(dependency = %candidate, "merging dependency");
        if upsert(&mut merged, candidate) {
            replaced += 1;
        } else {
            added += 1;
        }
    }

    let mut block = String::from(SECTION_OPEN);
    block.push('\n');
    for descriptor in &merged {
        block.push_str(&descriptor.render_xml());
        block.push('\n');
    }
    block.push_str("  ");
    block.push_str(SECTION_CLOSE);

    let mut manifest = String::with_capacity(existing_manifest.len() + block.len());
    manifest.push_str(&existing_manifest[..section.0]);
    manifest.push_str(&block);
    manifest.push_str(&existing_manifest[section.1..]);

    Ok(MergeOutcome::Applied {
        manifest,
        added,
        replaced,
    })
}

/// Byte range of the first `<dependencies>...</dependencies>` region.
fn locate_dependency_section(manifest: &str) -> Option<(usize, usize)> {
    let start = manifest.find(SECTION_OPEN)?;
    let close = manifest[start..].find(SECTION_CLOSE)?;
    Some((start, start + close + SECTION_CLOSE.len()))
}

/// Strip XML comments and any nested dependency-section wrapper tags.
///
/// Defensive sanitization against a generator that ignores the
/// "fragment only" instruction and emits a whole wrapped section.
fn sanitize_fragment(fragment: &str) -> String {
    strip_xml_comments(fragment)
        .replace(SECTION_OPEN, "")
        .replace(SECTION_CLOSE, "")
        .trim()
        .to_string()
}

fn strip_xml_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("<!--") {
        out.push_str(&rest[..start]);
        match rest[start + 4..].find("-->") {
            Some(end) => rest = &rest[start + 4 + end + 3..],
            // An unterminated comment swallows the remainder.
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Parse every well-formed `<dependency>` block, in document order.
///
/// Blocks missing a coordinate field are skipped per-descriptor; a bad
/// block never fails the whole parse.
fn parse_descriptors(text: &str) -> Vec<DependencyDescriptor> {
    let mut descriptors = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find(DEPENDENCY_OPEN) {
        let Some(close) = rest[start..].find(DEPENDENCY_CLOSE) else {
            break;
        };
        let block_end = start + close + DEPENDENCY_CLOSE.len();
        let block = &rest[start..block_end];
        match parse_descriptor(block) {
            Some(descriptor) => descriptors.push(descriptor),
            None => debug!("skipping dependency block without coordinates"),
        }
        rest = &rest[block_end..];
    }
    descriptors
}

fn parse_descriptor(block: &str) -> Option<DependencyDescriptor> {
    Some(DependencyDescriptor {
        group_id: extract_tag(block, "groupId")?,
        artifact_id: extract_tag(block, "artifactId")?,
        version: extract_tag(block, "version"),
        scope: extract_tag(block, "scope"),
        kind: extract_tag(block, "type"),
    })
}

fn extract_tag(block: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = block.find(&open)? + open.len();
    let end = block[start..].find(&close)? + start;
    let value = block[start..end].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Insert or replace by key. Returns true when an existing entry was
/// replaced in place.
fn upsert(merged: &mut Vec<DependencyDescriptor>, descriptor: DependencyDescriptor) -> bool {
    if let Some(position) = merged.iter().position(|d| d.key() == descriptor.key()) {
        merged[position] = descriptor;
        true
    } else {
        merged.push(descriptor);
        false
    }
}
