//! Deterministic sibling ordering
//!
//! Strings are compared by UTF-16 code unit, not by Unicode scalar value and
//! never by locale collation. Rust strings are UTF-8, so both sides are
//! re-encoded on the fly; this keeps supplementary-plane characters in the
//! same place a UTF-16 runtime would put them.

use std::cmp::Ordering;

use crate::model::Node;

/// Lexicographic comparison of the UTF-16 code units of `a` and `b`
pub fn compare_strings_utf16(a: &str, b: &str) -> Ordering {
    // ASCII strings order the same in every encoding
    if a.is_ascii() && b.is_ascii() {
        return a.as_bytes().cmp(b.as_bytes());
    }
    a.encode_utf16().cmp(b.encode_utf16())
}

/// Total order over sibling nodes: `order`, then label, then id
pub fn compare_nodes(a: &Node, b: &Node) -> Ordering {
    a.sort_weight()
        .cmp(&b.sort_weight())
        .then_with(|| compare_strings_utf16(&a.label, &b.label))
        .then_with(|| compare_strings_utf16(&a.id, &b.id))
}
