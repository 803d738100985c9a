//! Structural validation of raw taxonomy JSON
//!
//! Validation runs on an untyped [`serde_json::Value`] so that every problem
//! in a document can be reported at once, with a JSON path, instead of
//! stopping at the first field serde fails to decode.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::{SCHEMA_VERSION, integral_order};

/// Machine-readable validation failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidJson,
    InvalidRoot,
    MissingSchemaVersion,
    IncompatibleSchemaVersion,
    MissingNodes,
    InvalidNode,
    InvalidId,
    DuplicateId,
    InvalidLabel,
    LabelContainsComma,
    InvalidParentId,
    OrphanParent,
    InvalidKind,
    InvalidOrder,
    InvalidExport,
    InvalidAliases,
    InvalidMeta,
    Cycle,
    TagHasChildren,
}

/// One problem found in a taxonomy document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{path}: {message}")]
pub struct ValidationError {
    /// JSON path of the offending value, e.g. `nodes[3].label`
    pub path: String,
    pub message: String,
    pub code: ErrorCode,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            code,
        }
    }
}

/// Validation settings
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Version documents must be major.minor-compatible with
    pub expected_version: String,
    /// Report every child of a `tag` node
    pub enforce_leaf_rule: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            expected_version: SCHEMA_VERSION.to_string(),
            enforce_leaf_rule: true,
        }
    }
}

/// Outcome of [`validate_taxonomy`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Fields of one node that later passes need
struct NodeView<'a> {
    position: usize,
    id: Option<&'a str>,
    label: Option<&'a str>,
    parent: Option<&'a str>,
    kind: Option<&'a str>,
}

/// Validate a parsed taxonomy document, collecting every error.
///
/// Only a non-object root or a missing `nodes` list stops validation early,
/// since nothing meaningful can be checked past them.
pub fn validate_taxonomy(data: &Value, options: &ValidateOptions) -> ValidationReport {
    let mut errors = Vec::new();

    let Some(root) = data.as_object() else {
        errors.push(ValidationError::new(
            "$",
            ErrorCode::InvalidRoot,
            "Taxonomy must be a JSON object",
        ));
        return ValidationReport::from_errors(errors);
    };

    check_schema_version(root.get("schemaVersion"), &options.expected_version, &mut errors);

    if let Some(meta) = root.get("meta") {
        check_meta(meta, &mut errors);
    }

    let Some(nodes) = root.get("nodes").and_then(Value::as_array) else {
        errors.push(ValidationError::new(
            "nodes",
            ErrorCode::MissingNodes,
            "`nodes` must be present and be a list",
        ));
        return ValidationReport::from_errors(errors);
    };

    let views: Vec<NodeView<'_>> = nodes
        .iter()
        .enumerate()
        .filter_map(|(position, node)| check_node_fields(position, node, &mut errors))
        .collect();

    // First occurrence wins for duplicate ids
    let mut by_id: HashMap<&str, &NodeView<'_>> = HashMap::new();
    for view in &views {
        let Some(id) = view.id else { continue };
        if by_id.contains_key(id) {
            errors.push(ValidationError::new(
                format!("nodes[{}].id", view.position),
                ErrorCode::DuplicateId,
                format!("Duplicate id '{}'", id),
            ));
        } else {
            by_id.insert(id, view);
        }
    }

    for view in &views {
        let Some(parent) = view.parent else { continue };
        if !by_id.contains_key(parent) {
            errors.push(ValidationError::new(
                format!("nodes[{}].parentId", view.position),
                ErrorCode::OrphanParent,
                format!("Parent '{}' does not exist", parent),
            ));
        }
    }

    check_cycles(&views, &by_id, &mut errors);

    if options.enforce_leaf_rule {
        check_leaf_rule(&views, &by_id, &mut errors);
    }

    ValidationReport::from_errors(errors)
}

/// Whether `actual` shares major and minor with `expected`
pub fn is_version_compatible(actual: &str, expected: &str) -> bool {
    match (major_minor(actual), major_minor(expected)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn major_minor(version: &str) -> Option<(u64, u64)> {
    let mut parts = version.trim().split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    // Prerelease and build suffixes ride on the patch component
    if let Some(patch) = parts.next() {
        let numeric = patch.split(['-', '+']).next().unwrap_or_default();
        numeric.parse::<u64>().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor))
}

fn check_schema_version(
    version: Option<&Value>,
    expected: &str,
    errors: &mut Vec<ValidationError>,
) {
    match version {
        None | Some(Value::Null) => errors.push(ValidationError::new(
            "schemaVersion",
            ErrorCode::MissingSchemaVersion,
            "`schemaVersion` is required",
        )),
        Some(Value::String(v)) if is_version_compatible(v, expected) => {}
        Some(Value::String(v)) => errors.push(ValidationError::new(
            "schemaVersion",
            ErrorCode::IncompatibleSchemaVersion,
            format!("Schema version '{}' is not compatible with '{}'", v, expected),
        )),
        Some(_) => errors.push(ValidationError::new(
            "schemaVersion",
            ErrorCode::IncompatibleSchemaVersion,
            "`schemaVersion` must be a string",
        )),
    }
}

fn check_meta(meta: &Value, errors: &mut Vec<ValidationError>) {
    let Some(fields) = meta.as_object() else {
        if !meta.is_null() {
            errors.push(ValidationError::new(
                "meta",
                ErrorCode::InvalidMeta,
                "`meta` must be an object",
            ));
        }
        return;
    };

    for key in ["name", "description", "createdAt", "updatedAt"] {
        let invalid = fields
            .get(key)
            .is_some_and(|value| !(value.is_string() || value.is_null()));
        if invalid {
            errors.push(ValidationError::new(
                format!("meta.{}", key),
                ErrorCode::InvalidMeta,
                format!("`{}` must be a string", key),
            ));
        }
    }
}

fn check_node_fields<'a>(
    position: usize,
    node: &'a Value,
    errors: &mut Vec<ValidationError>,
) -> Option<NodeView<'a>> {
    let path = |field: &str| format!("nodes[{}].{}", position, field);

    let Some(fields) = node.as_object() else {
        errors.push(ValidationError::new(
            format!("nodes[{}]", position),
            ErrorCode::InvalidNode,
            "Node must be an object",
        ));
        return None;
    };

    let id = match fields.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Some(id.as_str()),
        _ => {
            errors.push(ValidationError::new(
                path("id"),
                ErrorCode::InvalidId,
                "`id` must be a non-empty string",
            ));
            None
        }
    };

    let label = match fields.get("label") {
        Some(Value::String(label)) => {
            if label.contains(',') {
                errors.push(ValidationError::new(
                    path("label"),
                    ErrorCode::LabelContainsComma,
                    format!("Label '{}' must not contain a comma", label),
                ));
            }
            Some(label.as_str())
        }
        _ => {
            errors.push(ValidationError::new(
                path("label"),
                ErrorCode::InvalidLabel,
                "`label` must be a string",
            ));
            None
        }
    };

    let parent = match fields.get("parentId") {
        None | Some(Value::Null) => None,
        Some(Value::String(parent)) => Some(parent.as_str()),
        Some(_) => {
            errors.push(ValidationError::new(
                path("parentId"),
                ErrorCode::InvalidParentId,
                "`parentId` must be a string or null",
            ));
            None
        }
    };

    let kind = match fields.get("kind").and_then(Value::as_str) {
        Some(kind @ ("folder" | "tag")) => Some(kind),
        _ => {
            errors.push(ValidationError::new(
                path("kind"),
                ErrorCode::InvalidKind,
                "`kind` must be \"folder\" or \"tag\"",
            ));
            None
        }
    };

    let bad_order = fields
        .get("order")
        .is_some_and(|order| !order.is_null() && integral_order(order).is_none());
    if bad_order {
        errors.push(ValidationError::new(
            path("order"),
            ErrorCode::InvalidOrder,
            "`order` must be an integer",
        ));
    }

    let bad_export = fields
        .get("export")
        .is_some_and(|export| !(export.is_boolean() || export.is_null()));
    if bad_export {
        errors.push(ValidationError::new(
            path("export"),
            ErrorCode::InvalidExport,
            "`export` must be a boolean",
        ));
    }

    let bad_aliases = fields.get("aliases").is_some_and(|aliases| {
        !aliases.is_null()
            && !aliases
                .as_array()
                .is_some_and(|list| list.iter().all(Value::is_string))
    });
    if bad_aliases {
        errors.push(ValidationError::new(
            path("aliases"),
            ErrorCode::InvalidAliases,
            "`aliases` must be a list of strings",
        ));
    }

    Some(NodeView {
        position,
        id,
        label,
        parent,
        kind,
    })
}

/// Report every node that sits on a cycle of parent references
fn check_cycles(
    views: &[NodeView<'_>],
    by_id: &HashMap<&str, &NodeView<'_>>,
    errors: &mut Vec<ValidationError>,
) {
    for view in views {
        let Some(start) = view.id else { continue };
        // Duplicates are reported elsewhere; walk each id once
        if !by_id
            .get(start)
            .is_some_and(|first| first.position == view.position)
        {
            continue;
        }

        let mut visited = HashSet::new();
        let mut current = view.parent;
        while let Some(id) = current {
            if id == start {
                errors.push(ValidationError::new(
                    format!("nodes[{}].parentId", view.position),
                    ErrorCode::Cycle,
                    format!("Node '{}' is its own ancestor", start),
                ));
                break;
            }
            if !visited.insert(id) {
                break;
            }
            current = by_id.get(id).and_then(|v| v.parent);
        }
    }
}

fn check_leaf_rule(
    views: &[NodeView<'_>],
    by_id: &HashMap<&str, &NodeView<'_>>,
    errors: &mut Vec<ValidationError>,
) {
    for view in views {
        let Some(parent) = view.parent.and_then(|p| by_id.get(p)) else {
            continue;
        };
        if parent.kind != Some("tag") {
            continue;
        }

        errors.push(ValidationError::new(
            format!("nodes[{}].parentId", view.position),
            ErrorCode::TagHasChildren,
            format!(
                "Tag '{}' ({}) cannot have children, found '{}' ({})",
                parent.label.unwrap_or_default(),
                parent.id.unwrap_or_default(),
                view.label.unwrap_or_default(),
                view.id.unwrap_or_default(),
            ),
        ));
    }
}
