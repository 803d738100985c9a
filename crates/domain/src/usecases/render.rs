//! Rendering use case - turns a selection into the exported keyword string

use crate::index::{IndexError, TaxonomyIndex};
use crate::usecases::closure::{ExportSetOptions, compute_export_set};

/// Separator used between exported keywords
pub const DEFAULT_SEPARATOR: &str = ", ";

/// Order ids the way they appear in the tree.
///
/// Only the precomputed sort paths are consulted, so a whole subtree sorts
/// before its next sibling's subtree and an ancestor sorts before its
/// descendants. Duplicate ids collapse into one entry.
pub fn sort_by_user_order<I, S>(index: &TaxonomyIndex, ids: I) -> Result<Vec<String>, IndexError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut keyed = ids
        .into_iter()
        .map(|id| {
            let id = id.as_ref();
            index
                .sort_path(id)
                .map(|path| (path, id.to_string()))
                .ok_or_else(|| IndexError::UnknownNode { id: id.to_string() })
        })
        .collect::<Result<Vec<_>, _>>()?;

    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    keyed.dedup_by(|(a, _), (b, _)| a == b);

    Ok(keyed.into_iter().map(|(_, id)| id).collect())
}

/// Join the labels of `ids` with `separator`, skipping unknown ids
pub fn format_for_export<I, S>(index: &TaxonomyIndex, ids: I, separator: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter()
        .filter_map(|id| index.get(id.as_ref()).map(|n| n.label.as_str()))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Configuration for the keyword renderer
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Joins the rendered labels
    pub separator: String,
    /// Whether ancestors of the selection are exported too
    pub include_ancestors: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            include_ancestors: true,
        }
    }
}

/// Export set, user order and formatting in one step
pub struct KeywordRenderer {
    config: RenderConfig,
}

impl KeywordRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Ids that would be exported for `selected`, in tree order
    pub fn ordered_export<I, S>(
        &self,
        index: &TaxonomyIndex,
        selected: I,
    ) -> Result<Vec<String>, IndexError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let export = compute_export_set(
            index,
            selected,
            ExportSetOptions {
                include_ancestors: self.config.include_ancestors,
            },
        );
        sort_by_user_order(index, &export)
    }

    /// Render the keyword string for `selected`
    pub fn render<I, S>(&self, index: &TaxonomyIndex, selected: I) -> Result<String, IndexError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ordered = self.ordered_export(index, selected)?;

        tracing::debug!(keywords = ordered.len(), "Rendered keyword export");

        Ok(format_for_export(index, &ordered, &self.config.separator))
    }
}
