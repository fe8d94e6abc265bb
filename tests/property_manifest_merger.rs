//! Property tests for the manifest merger.
//!
//! The merge is a rebuild of the dependency section, so the interesting
//! invariants are structural: applying the same fragment twice changes
//! nothing the second time, entries already in the manifest never vanish
//! or reorder, and a superseding candidate lands in the slot of the entry
//! it replaces.

use proptest::prelude::*;

use greenloop::services::{merge, MergeOutcome};

const ALLOWED_GROUP: &str = "org.junit.jupiter";

fn allowed_groups() -> Vec<String> {
    vec![ALLOWED_GROUP.to_string()]
}

fn manifest_with(deps: &[(String, String, String)]) -> String {
    let mut text = String::from("<?xml version=\"1.0\"?>\n<project>\n  <dependencies>\n");
    for (group, artifact, version) in deps {
        text.push_str(&format!(
            "    <dependency>\n      <groupId>{group}</groupId>\n      \
             <artifactId>{artifact}</artifactId>\n      <version>{version}</version>\n    \
             </dependency>\n"
        ));
    }
    text.push_str("  </dependencies>\n</project>\n");
    text
}

fn fragment_with(deps: &[(String, String)]) -> String {
    deps.iter()
        .map(|(artifact, version)| {
            format!(
                "<dependency>\n  <groupId>{ALLOWED_GROUP}</groupId>\n  \
                 <artifactId>{artifact}</artifactId>\n  <version>{version}</version>\n\
                 </dependency>\n"
            )
        })
        .collect()
}

/// Existing entries, keys disjoint from every candidate by construction
/// (artifact names carry an `-e<index>` suffix).
fn existing_deps() -> impl Strategy<Value = Vec<(String, String, String)>> {
    prop::collection::vec(
        ("[a-z]{1,6}\\.[a-z]{1,6}", "[a-z]{2,8}", "[0-9]\\.[0-9]{1,2}"),
        0..5,
    )
    .prop_map(|deps| {
        deps.into_iter()
            .enumerate()
            .map(|(i, (group, artifact, version))| (group, format!("{artifact}-e{i}"), version))
            .collect()
    })
}

/// Candidate entries in the allowed group, keys unique by suffix and
/// disjoint from every existing entry.
fn candidate_deps() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z]{2,8}", "[0-9]\\.[0-9]{1,2}"), 1..4).prop_map(|deps| {
        deps.into_iter()
            .enumerate()
            .map(|(i, (artifact, version))| (format!("{artifact}-c{i}"), version))
            .collect()
    })
}

fn artifact_position(manifest: &str, artifact: &str) -> Option<usize> {
    manifest.find(&format!("<artifactId>{artifact}</artifactId>"))
}

proptest! {
    /// Re-applying a fragment to its own merge result is a fixed point.
    #[test]
    fn merge_is_idempotent(existing in existing_deps(), candidates in candidate_deps()) {
        let manifest = manifest_with(&existing);
        let fragment = fragment_with(&candidates);

        let first = merge(&manifest, &fragment, &allowed_groups()).unwrap();
        let MergeOutcome::Applied { manifest: merged, added, replaced } = first else {
            panic!("allowed candidates must apply");
        };
        prop_assert_eq!(added as usize, candidates.len());
        prop_assert_eq!(replaced, 0);

        let second = merge(&merged, &fragment, &allowed_groups()).unwrap();
        let MergeOutcome::Applied { manifest: remerged, added, replaced } = second else {
            panic!("second merge must still apply");
        };
        prop_assert_eq!(added, 0);
        prop_assert_eq!(replaced as usize, candidates.len());
        prop_assert_eq!(remerged, merged);
    }

    /// Entries already in the manifest survive the rebuild, in their
    /// original relative order, with candidates appended after them.
    #[test]
    fn existing_entries_survive_in_order(
        existing in existing_deps(),
        candidates in candidate_deps(),
    ) {
        let manifest = manifest_with(&existing);
        let fragment = fragment_with(&candidates);

        let MergeOutcome::Applied { manifest: merged, .. } =
            merge(&manifest, &fragment, &allowed_groups()).unwrap()
        else {
            panic!("allowed candidates must apply");
        };

        let mut last_position = 0;
        for (_, artifact, version) in &existing {
            let position = artifact_position(&merged, artifact)
                .unwrap_or_else(|| panic!("existing entry {artifact} vanished"));
            prop_assert!(position >= last_position, "existing entries reordered");
            last_position = position;
            let version_needle = format!("<version>{version}</version>");
            prop_assert!(merged.contains(&version_needle));
        }
        for (artifact, _) in &candidates {
            let position = artifact_position(&merged, artifact)
                .unwrap_or_else(|| panic!("candidate {artifact} missing"));
            prop_assert!(position > last_position, "candidate not appended after existing");
        }
    }

    /// A candidate sharing a key with an existing entry replaces it in its
    /// slot instead of appending a duplicate.
    #[test]
    fn same_key_candidates_supersede_in_place(
        before in existing_deps(),
        after in existing_deps(),
        artifact in "[a-z]{2,8}-pin",
        old_version in "[0-9]\\.[0-9]",
        new_version in "[2-9]\\.[0-9]{2}",
    ) {
        let mut existing = before.clone();
        existing.push((ALLOWED_GROUP.to_string(), artifact.clone(), old_version.clone()));
        // Shift the trailing entries' suffixes so keys stay unique.
        existing.extend(
            after
                .iter()
                .map(|(g, a, v)| (g.clone(), format!("{a}-t"), v.clone())),
        );

        let manifest = manifest_with(&existing);
        let fragment = fragment_with(&[(artifact.clone(), new_version.clone())]);

        let MergeOutcome::Applied { manifest: merged, added, replaced } =
            merge(&manifest, &fragment, &allowed_groups()).unwrap()
        else {
            panic!("superseding candidate must apply");
        };
        prop_assert_eq!(added, 0);
        prop_assert_eq!(replaced, 1);

        // Exactly one occurrence, in the same relative slot.
        let needle = format!("<artifactId>{artifact}</artifactId>");
        prop_assert_eq!(merged.matches(&needle).count(), 1);
        let position = artifact_position(&merged, &artifact).unwrap();
        for (_, trailing_artifact, _) in existing.iter().skip(before.len() + 1) {
            let trailing = artifact_position(&merged, trailing_artifact).unwrap();
            prop_assert!(position < trailing, "superseded entry moved out of its slot");
        }

        let start = merged[position..].find("<version>").unwrap() + position;
        let end = merged[start..].find("</version>").unwrap() + start;
        prop_assert_eq!(&merged[start + "<version>".len()..end], new_version.as_str());
    }
}
