//! Baseline/incoming comparison: decides which manifests need re-verification.

use crate::catalog::{Catalog, Manifest};
use std::collections::HashMap;

/// Returns the incoming manifests that must be verified: entries whose name is
/// new relative to `baseline`, and entries whose normalized content differs
/// from the baseline entry of the same name. Unchanged entries are trusted
/// from the prior run and never fetched again.
///
/// Both catalogs are normalized here, so whitespace-only URL differences do
/// not select anything. Duplicate names in the baseline index last-wins.
pub fn select_for_verification(mut baseline: Catalog, mut incoming: Catalog) -> Vec<Manifest> {
    baseline.normalize();
    incoming.normalize();

    let mut baseline_by_name: HashMap<String, Manifest> = HashMap::new();
    for manifest in baseline.manifests {
        baseline_by_name.insert(manifest.name.clone(), manifest);
    }

    let mut selected = Vec::new();
    for manifest in incoming.manifests {
        match baseline_by_name.get(&manifest.name) {
            Some(known) if *known == manifest => {
                tracing::debug!(name = %manifest.name, "unchanged, skipping");
            }
            Some(_) => {
                tracing::debug!(name = %manifest.name, "changed, selected");
                selected.push(manifest);
            }
            None => {
                tracing::debug!(name = %manifest.name, "new, selected");
                selected.push(manifest);
            }
        }
    }
    selected
}
