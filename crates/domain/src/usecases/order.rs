//! Sibling `order` maintenance

use std::collections::HashMap;

use crate::model::Taxonomy;

/// Fill in missing `order` values.
///
/// A node without an order gets the number of siblings that precede it in
/// the raw node list. Existing orders are left alone.
pub fn initialize_order(mut taxonomy: Taxonomy) -> Taxonomy {
    let mut seen: HashMap<Option<String>, i64> = HashMap::new();
    let mut filled = 0usize;

    for node in &mut taxonomy.nodes {
        let position = seen.entry(node.parent_id.clone()).or_insert(0);
        if node.order.is_none() {
            node.order = Some(*position);
            filled += 1;
        }
        *position += 1;
    }

    if filled > 0 {
        tracing::debug!(filled, "Backfilled missing sibling order");
    }

    taxonomy
}

/// Rewrite every sibling group's orders to 0..n-1.
///
/// Groups are sorted by their current order; ties keep their relative
/// position in the node list. The node list itself is not reordered.
pub fn normalize_order(mut taxonomy: Taxonomy) -> Taxonomy {
    let mut groups: HashMap<Option<String>, Vec<usize>> = HashMap::new();
    for (position, node) in taxonomy.nodes.iter().enumerate() {
        groups.entry(node.parent_id.clone()).or_default().push(position);
    }

    for mut members in groups.into_values() {
        members.sort_by_key(|&i| taxonomy.nodes[i].sort_weight());
        for (rank, i) in members.into_iter().enumerate() {
            taxonomy.nodes[i].order = Some(rank as i64);
        }
    }

    taxonomy
}
