//! Derived lookup structures over a taxonomy
//!
//! A [`TaxonomyIndex`] is a pure function of a [`Taxonomy`]. It is never
//! patched in place: any change to the taxonomy means building a new index.

use std::collections::HashMap;

use thiserror::Error;

use crate::model::{Node, Taxonomy};
use crate::ordering::compare_nodes;

/// Internal-consistency failures. These indicate a caller passing ids from a
/// different taxonomy, or an index built from unvalidated input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("Node '{id}' has no sibling ordinal in this index")]
    MissingOrdinal { id: String },
    #[error("Node '{id}' is not part of this index")]
    UnknownNode { id: String },
    #[error("Parent chain of node '{id}' never reaches the root")]
    Cycle { id: String },
}

/// Immutable index over one taxonomy
#[derive(Debug, Clone)]
pub struct TaxonomyIndex {
    by_id: HashMap<String, Node>,
    roots: Vec<String>,
    children: HashMap<String, Vec<String>>,
    sibling_ordinal: HashMap<String, usize>,
    sort_path: HashMap<String, Vec<usize>>,
}

/// Build the index for a structurally valid taxonomy
pub fn build_index(taxonomy: &Taxonomy) -> Result<TaxonomyIndex, IndexError> {
    TaxonomyIndex::build(taxonomy)
}

impl TaxonomyIndex {
    pub fn build(taxonomy: &Taxonomy) -> Result<Self, IndexError> {
        let mut by_id = HashMap::with_capacity(taxonomy.nodes.len());
        let mut root_group: Vec<&Node> = Vec::new();
        let mut groups: HashMap<&str, Vec<&Node>> = HashMap::new();

        for node in &taxonomy.nodes {
            by_id.insert(node.id.clone(), node.clone());
            match node.parent_id.as_deref() {
                None => root_group.push(node),
                Some(parent) => groups.entry(parent).or_default().push(node),
            }
        }

        let mut sibling_ordinal = HashMap::with_capacity(taxonomy.nodes.len());
        let roots = order_group(root_group, &mut sibling_ordinal);
        let children: HashMap<String, Vec<String>> = groups
            .into_iter()
            .map(|(parent, group)| (parent.to_string(), order_group(group, &mut sibling_ordinal)))
            .collect();

        let mut index = Self {
            by_id,
            roots,
            children,
            sibling_ordinal,
            sort_path: HashMap::new(),
        };

        let mut sort_path = HashMap::with_capacity(taxonomy.nodes.len());
        for node in &taxonomy.nodes {
            let path = index.walk_sort_path(node)?;
            sort_path.insert(node.id.clone(), path);
        }
        index.sort_path = sort_path;

        tracing::debug!(
            nodes = index.by_id.len(),
            roots = index.roots.len(),
            parents = index.children.len(),
            "Built taxonomy index"
        );

        Ok(index)
    }

    /// Ordinals from the root down to `node`, inclusive
    fn walk_sort_path(&self, node: &Node) -> Result<Vec<usize>, IndexError> {
        let mut path = Vec::new();
        let mut current = node;

        loop {
            let ordinal = self
                .sibling_ordinal
                .get(&current.id)
                .copied()
                .ok_or_else(|| IndexError::MissingOrdinal {
                    id: current.id.clone(),
                })?;
            path.push(ordinal);

            if path.len() > self.by_id.len() {
                return Err(IndexError::Cycle {
                    id: node.id.clone(),
                });
            }

            let Some(parent_id) = current.parent_id.as_deref() else {
                break;
            };
            current = self
                .by_id
                .get(parent_id)
                .ok_or_else(|| IndexError::MissingOrdinal {
                    id: parent_id.to_string(),
                })?;
        }

        path.reverse();
        Ok(path)
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.by_id.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Root-level ids in sibling order
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Ordered children of `parent`, or the roots when `parent` is `None`
    pub fn children_of(&self, parent: Option<&str>) -> &[String] {
        match parent {
            None => &self.roots,
            Some(id) => self.children.get(id).map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    /// Zero-based rank of `id` among its siblings
    pub fn sibling_ordinal(&self, id: &str) -> Option<usize> {
        self.sibling_ordinal.get(id).copied()
    }

    /// Sibling ordinals from the root down to `id`
    pub fn sort_path(&self, id: &str) -> Option<&[usize]> {
        self.sort_path.get(id).map(Vec::as_slice)
    }

    /// Ancestors of `id`, nearest first
    pub fn ancestors(&self, id: &str) -> Vec<&Node> {
        let mut ancestors = Vec::new();
        let mut parent = self.get(id).and_then(|n| n.parent_id.as_deref());
        while let Some(node) = parent.and_then(|p| self.get(p)) {
            ancestors.push(node);
            parent = node.parent_id.as_deref();
        }
        ancestors
    }

    /// Labels from the root down to `id`
    pub fn breadcrumb(&self, id: &str) -> Vec<&str> {
        let Some(node) = self.get(id) else {
            return Vec::new();
        };
        let mut labels: Vec<&str> = self
            .ancestors(id)
            .into_iter()
            .map(|n| n.label.as_str())
            .collect();
        labels.reverse();
        labels.push(&node.label);
        labels
    }

    /// All descendants of `id` in pre-order, excluding `id` itself
    pub fn descendants(&self, id: &str) -> Vec<&str> {
        let mut out = Vec::new();
        let mut stack: Vec<&str> = self
            .children_of(Some(id))
            .iter()
            .rev()
            .map(String::as_str)
            .collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children_of(Some(current)).iter().rev().map(String::as_str));
        }
        out
    }

    /// Every node in display order (pre-order from the roots)
    pub fn walk(&self) -> Vec<&Node> {
        let mut out = Vec::with_capacity(self.by_id.len());
        let mut stack: Vec<&str> = self.roots.iter().rev().map(String::as_str).collect();
        while let Some(current) = stack.pop() {
            if let Some(node) = self.get(current) {
                out.push(node);
            }
            stack.extend(self.children_of(Some(current)).iter().rev().map(String::as_str));
        }
        out
    }

    /// Depth of `id`, zero for roots
    pub fn depth(&self, id: &str) -> Option<usize> {
        self.sort_path(id).map(|p| p.len().saturating_sub(1))
    }
}

fn order_group(mut group: Vec<&Node>, ordinals: &mut HashMap<String, usize>) -> Vec<String> {
    group.sort_by(|a, b| compare_nodes(a, b));
    group
        .into_iter()
        .enumerate()
        .map(|(position, node)| {
            ordinals.insert(node.id.clone(), position);
            node.id.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> TaxonomyIndex {
        build_index(&Taxonomy::sample()).unwrap()
    }

    #[test]
    fn test_same_order_roots_sort_by_label() {
        let taxonomy = Taxonomy::new(vec![
            Node::tag("z", "z", None).with_order(0),
            Node::tag("a", "a", None).with_order(0),
            Node::tag("m", "m", None).with_order(0),
        ]);

        let index = build_index(&taxonomy).unwrap();
        assert_eq!(index.children_of(None), ["a", "m", "z"]);
        assert_eq!(index.sibling_ordinal("m"), Some(1));
    }

    #[test]
    fn test_order_collision_falls_back_to_id() {
        let taxonomy = Taxonomy::new(vec![
            Node::folder("group-b", "Group", None).with_order(0),
            Node::folder("group-a", "Group", None).with_order(0),
        ]);

        let index = build_index(&taxonomy).unwrap();
        assert_eq!(index.roots(), ["group-a", "group-b"]);
    }

    #[test]
    fn test_sort_paths() {
        let index = sample_index();
        assert_eq!(index.sort_path("occupation"), Some(&[0][..]));
        assert_eq!(index.sort_path("jk"), Some(&[0, 0, 0][..]));
        assert_eq!(index.sort_path("skirt"), Some(&[1, 1, 0][..]));
        assert_eq!(index.sort_path("black-stockings"), Some(&[3, 0][..]));
        assert_eq!(index.depth("skirt"), Some(2));
    }

    #[test]
    fn test_children_ignore_array_order() {
        let mut taxonomy = Taxonomy::sample();
        taxonomy.nodes.reverse();
        let reversed = build_index(&taxonomy).unwrap();
        let original = sample_index();

        for node in &taxonomy.nodes {
            assert_eq!(reversed.sort_path(&node.id), original.sort_path(&node.id));
        }
        assert_eq!(reversed.children_of(Some("clothing")), ["upper-body", "lower-body"]);
    }

    #[test]
    fn test_orphan_is_internal_error() {
        let taxonomy = Taxonomy::new(vec![Node::tag("a", "A", Some("missing"))]);
        let err = build_index(&taxonomy).unwrap_err();
        assert_eq!(
            err,
            IndexError::MissingOrdinal {
                id: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_cycle_is_internal_error() {
        let taxonomy = Taxonomy::new(vec![
            Node::tag("a", "A", Some("b")),
            Node::tag("b", "B", Some("a")),
        ]);
        assert!(matches!(build_index(&taxonomy), Err(IndexError::Cycle { .. })));
    }

    #[test]
    fn test_ancestors_and_breadcrumb() {
        let index = sample_index();
        let ancestors: Vec<_> = index.ancestors("skirt").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ancestors, ["lower-body", "clothing"]);
        assert_eq!(index.breadcrumb("skirt"), ["衣服", "下半身", "短裙"]);
        assert!(index.breadcrumb("nope").is_empty());
    }

    #[test]
    fn test_descendants_preorder() {
        let index = sample_index();
        assert_eq!(
            index.descendants("clothing"),
            ["upper-body", "sailor-uniform", "lower-body", "skirt"]
        );
        assert!(index.descendants("jk").is_empty());
    }

    #[test]
    fn test_walk_visits_every_node_in_display_order() {
        let index = sample_index();
        let ids: Vec<_> = index.walk().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids.len(), index.len());
        assert_eq!(&ids[..3], ["occupation", "student", "jk"]);
        assert_eq!(ids.last(), Some(&"black-stockings"));
    }
}
