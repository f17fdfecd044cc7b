//! Layering guardrails for the workspace crates.
//!
//! `mockforge_core` is the bottom layer: pure Go vocabulary with no dependencies at all. `mockforge_model` may use
//! `mockforge_core` but never the generator crate. These tests scan the member manifests and fail on violations.

/// Collect the dependency names listed in a manifest's `[dependencies]` table.
fn dependency_names(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn vocabulary_crate_has_no_dependencies() {
    let manifest = include_str!("../crates/mockforge_core/Cargo.toml");
    let deps = dependency_names(manifest);
    assert!(deps.is_empty(), "`mockforge_core` must stay dependency-free, found: {deps:?}");
}

#[test]
fn model_crate_does_not_depend_on_generator() {
    let manifest = include_str!("../crates/mockforge_model/Cargo.toml");
    let deps = dependency_names(manifest);
    assert!(deps.iter().any(|d| d == "mockforge_core"));
    assert!(
        !deps.iter().any(|d| d == "mockforge"),
        "`mockforge_model` must not depend on the generator crate"
    );
}

#[test]
fn dependency_names_reads_only_the_dependencies_table() {
    let manifest = "[package]\nname = \"x\"\n\n[dependencies]\nserde = \"1\" # comment\n\n[dev-dependencies]\ninsta = \"1\"\n";
    assert_eq!(dependency_names(manifest), vec!["serde".to_string()]);
}
