//! tagtree domain crate
//!
//! This crate contains the pure taxonomy core:
//! - `model`: Nodes, taxonomies and the export-eligibility rule
//! - `ordering`: Deterministic UTF-16 sibling comparator
//! - `index`: Derived lookup structures and sort paths
//! - `usecases`: Closure, export ordering, formatting and order maintenance
//! - `validation` / `serialization`: JSON validation, import and export
//! - `ports`: Trait definitions for storage and time

pub mod index;
pub mod model;
pub mod ordering;
pub mod ports;
pub mod serialization;
pub mod usecases;
pub mod validation;

pub use index::{IndexError, TaxonomyIndex, build_index};
pub use model::*;
pub use ordering::{compare_nodes, compare_strings_utf16};
pub use ports::*;
pub use serialization::{
    ExportOptions, ImportError, ImportOptions, SerializationError, export_taxonomy,
    import_taxonomy, validate_json,
};
pub use usecases::{
    ExportSetOptions, compute_closure, compute_export_set, format_for_export, initialize_order,
    normalize_order, sort_by_user_order,
};
pub use validation::{
    ErrorCode, ValidateOptions, ValidationError, ValidationReport, validate_taxonomy,
};

use sha2::{Digest, Sha256};

/// Compute a deterministic hash of a taxonomy's tree structure.
///
/// Nodes are hashed in id order, so the array order of the input does not
/// matter. Passenger data is not part of the fingerprint.
pub fn fingerprint(taxonomy: &Taxonomy) -> String {
    let mut sorted: Vec<_> = taxonomy.nodes.iter().collect();
    sorted.sort_by(|a, b| compare_strings_utf16(&a.id, &b.id));

    let mut hasher = Sha256::new();
    for node in sorted {
        hasher.update(node.id.as_bytes());
        hasher.update([0u8]);
        hasher.update(node.label.as_bytes());
        hasher.update([0u8]);
        hasher.update(node.parent_id.as_deref().unwrap_or_default().as_bytes());
        hasher.update([0u8]);
        hasher.update(node.kind.as_str().as_bytes());
        hasher.update(node.sort_weight().to_le_bytes());
        hasher.update([match node.export {
            None => 0u8,
            Some(false) => 1,
            Some(true) => 2,
        }]);
    }
    format!("{:x}", hasher.finalize())
}
