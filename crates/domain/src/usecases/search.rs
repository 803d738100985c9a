//! Label and alias search

use crate::index::TaxonomyIndex;

/// Ids whose label or any alias contains `query`, ignoring case.
///
/// Results come back in tree order so they line up with the exported
/// keyword order.
pub fn search(index: &TaxonomyIndex, query: &str) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    index
        .walk()
        .into_iter()
        .filter(|node| {
            node.label.to_lowercase().contains(&needle)
                || node
                    .aliases
                    .iter()
                    .flatten()
                    .any(|alias| alias.to_lowercase().contains(&needle))
        })
        .map(|node| node.id.clone())
        .collect()
}
