//! Ancestor closure and export-set computation

use std::collections::BTreeSet;

use crate::index::TaxonomyIndex;
use crate::model::should_export;

/// Options for [`compute_export_set`]
#[derive(Debug, Clone, Copy)]
pub struct ExportSetOptions {
    /// Pull in every ancestor of the selection before filtering
    pub include_ancestors: bool,
}

impl Default for ExportSetOptions {
    fn default() -> Self {
        Self {
            include_ancestors: true,
        }
    }
}

/// The selection plus all of its ancestors.
///
/// Descendants are never added: selecting a tag with children selects only
/// that tag. Ids unknown to the index are dropped.
pub fn compute_closure<I, S>(index: &TaxonomyIndex, selected: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut closure = BTreeSet::new();

    for id in selected {
        let mut current = Some(id.as_ref());
        while let Some(cur) = current {
            // The rest of this chain is already in the closure
            if closure.contains(cur) {
                break;
            }
            let Some(node) = index.get(cur) else {
                tracing::debug!(id = %cur, "Ignoring id outside the index");
                break;
            };
            closure.insert(node.id.clone());
            current = node.parent_id.as_deref();
        }
    }

    closure
}

/// Nodes that end up in the exported keyword list for a selection
pub fn compute_export_set<I, S>(
    index: &TaxonomyIndex,
    selected: I,
    options: ExportSetOptions,
) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let candidates = if options.include_ancestors {
        compute_closure(index, selected)
    } else {
        selected
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect()
    };

    candidates
        .into_iter()
        .filter(|id| index.get(id).is_some_and(should_export))
        .collect()
}
