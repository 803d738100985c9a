//! Taxonomy JSON import and export

use serde_json::Value;
use thiserror::Error;

use crate::model::{Taxonomy, format_timestamp};
use crate::ports::Clock;
use crate::usecases::order::initialize_order;
use crate::validation::{
    ErrorCode, ValidateOptions, ValidationError, ValidationReport, validate_taxonomy,
};

/// Why an import was rejected
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid JSON at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("Taxonomy failed validation with {} error(s)", .0.len())]
    Invalid(Vec<ValidationError>),
}

impl ImportError {
    /// The problems as a flat list, syntax errors included
    pub fn errors(&self) -> Vec<ValidationError> {
        match self {
            ImportError::Syntax {
                line,
                column,
                message,
            } => vec![ValidationError::new(
                "$",
                ErrorCode::InvalidJson,
                format!("line {}, column {}: {}", line, column, message),
            )],
            ImportError::Invalid(errors) => errors.clone(),
        }
    }
}

/// Error type for taxonomy export
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("Failed to serialize taxonomy: {0}")]
    Json(#[from] serde_json::Error),
}

/// Import settings
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub validation: ValidateOptions,
}

/// Export settings
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Indent the output
    pub pretty: bool,
    /// Set `meta.updatedAt` to the current time
    pub stamp_updated_at: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            stamp_updated_at: false,
        }
    }
}

/// Parse, validate and normalize a taxonomy document.
///
/// Data problems never panic; they come back as [`ImportError`]. Missing
/// sibling orders are backfilled from raw list position.
pub fn import_taxonomy(json: &str, options: &ImportOptions) -> Result<Taxonomy, ImportError> {
    let value: Value = serde_json::from_str(json).map_err(|e| ImportError::Syntax {
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
    })?;

    let report = validate_taxonomy(&value, &options.validation);
    if !report.valid {
        tracing::warn!(errors = report.errors.len(), "Rejected taxonomy import");
        return Err(ImportError::Invalid(report.errors));
    }

    // Validation covers every field serde reads, so this only fails on
    // shapes validation does not model
    let taxonomy: Taxonomy = serde_json::from_value(value).map_err(|e| {
        ImportError::Invalid(vec![ValidationError::new(
            "$",
            ErrorCode::InvalidNode,
            e.to_string(),
        )])
    })?;

    let taxonomy = initialize_order(taxonomy);

    tracing::info!(
        nodes = taxonomy.nodes.len(),
        schema_version = %taxonomy.schema_version,
        "Imported taxonomy"
    );

    Ok(taxonomy)
}

/// Serialize a taxonomy to JSON text
pub fn export_taxonomy(
    taxonomy: &Taxonomy,
    options: &ExportOptions,
    clock: &dyn Clock,
) -> Result<String, SerializationError> {
    let json = if options.stamp_updated_at {
        let mut stamped = taxonomy.clone();
        stamped.meta.get_or_insert_with(Default::default).updated_at =
            Some(format_timestamp(clock.now()));
        to_json(&stamped, options.pretty)?
    } else {
        to_json(taxonomy, options.pretty)?
    };

    Ok(json)
}

fn to_json(taxonomy: &Taxonomy, pretty: bool) -> Result<String, SerializationError> {
    if pretty {
        Ok(serde_json::to_string_pretty(taxonomy)?)
    } else {
        Ok(serde_json::to_string(taxonomy)?)
    }
}

/// Validate a JSON document given as text
pub fn validate_json(json: &str, options: &ValidateOptions) -> ValidationReport {
    match serde_json::from_str::<Value>(json) {
        Ok(value) => validate_taxonomy(&value, options),
        Err(e) => ValidationReport {
            valid: false,
            errors: ImportError::Syntax {
                line: e.line(),
                column: e.column(),
                message: e.to_string(),
            }
            .errors(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FixedClock;
    use serde_json::json;

    fn lenient() -> ImportOptions {
        ImportOptions {
            validation: ValidateOptions {
                enforce_leaf_rule: false,
                ..Default::default()
            },
        }
    }

    fn sample_json() -> String {
        json!({
            "schemaVersion": "1.0.3",
            "nodes": [
                {"id": "root", "label": "Root", "parentId": null, "kind": "folder"},
                {"id": "b", "label": "B", "parentId": "root", "kind": "tag", "aliases": ["bee"]},
                {"id": "a", "label": "A", "parentId": "root", "kind": "tag", "order": 5,
                 "meta": {"color": "blue"}, "data": {"x": 1}, "legacyField": "kept"}
            ],
            "meta": {"name": "Test", "createdAt": "2024-01-01T00:00:00Z", "owner": "me"},
            "extension": {"enabled": true}
        })
        .to_string()
    }

    #[test]
    fn test_import_backfills_order() {
        let taxonomy = import_taxonomy(&sample_json(), &lenient()).unwrap();
        let orders: Vec<_> = taxonomy.nodes.iter().map(|n| n.order).collect();
        assert_eq!(orders, vec![Some(0), Some(0), Some(5)]);
    }

    #[test]
    fn test_import_reports_syntax_error() {
        let err = import_taxonomy("{ nope", &lenient()).unwrap_err();
        assert!(matches!(err, ImportError::Syntax { line: 1, .. }));
        assert_eq!(err.errors()[0].code, ErrorCode::InvalidJson);
    }

    #[test]
    fn test_import_reports_all_validation_errors() {
        let json = json!({
            "schemaVersion": "1.0.0",
            "nodes": [
                {"id": "a", "label": "x,y", "parentId": null, "kind": "tag"},
                {"id": "a", "label": "z", "parentId": "missing", "kind": "tag"}
            ]
        })
        .to_string();

        let err = import_taxonomy(&json, &lenient()).unwrap_err();
        let codes: Vec<_> = err.errors().iter().map(|e| e.code).collect();
        assert_eq!(
            codes,
            vec![
                ErrorCode::LabelContainsComma,
                ErrorCode::DuplicateId,
                ErrorCode::OrphanParent
            ]
        );
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        let clock = FixedClock::from_unix(0);
        let first = import_taxonomy(&sample_json(), &lenient()).unwrap();
        let exported = export_taxonomy(&first, &ExportOptions::default(), &clock).unwrap();
        let second = import_taxonomy(&exported, &lenient()).unwrap();

        assert_eq!(first, second);
        assert_eq!(second.extra.get("extension"), Some(&json!({"enabled": true})));
        let a = second.get("a").unwrap();
        assert_eq!(a.extra.get("legacyField"), Some(&json!("kept")));
        assert_eq!(a.data, Some(json!({"x": 1})));
        assert_eq!(
            second.meta.as_ref().unwrap().extra.get("owner"),
            Some(&json!("me"))
        );
    }

    #[test]
    fn test_export_stamps_updated_at() {
        let clock = FixedClock::from_unix(86_400);
        let taxonomy = import_taxonomy(&sample_json(), &lenient()).unwrap();

        let json = export_taxonomy(
            &taxonomy,
            &ExportOptions {
                pretty: false,
                stamp_updated_at: true,
            },
            &clock,
        )
        .unwrap();

        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["meta"]["updatedAt"], "1970-01-02T00:00:00Z");
        assert_eq!(value["meta"]["createdAt"], "2024-01-01T00:00:00Z");
        assert!(taxonomy.meta.unwrap().updated_at.is_none());
    }

    #[test]
    fn test_export_stamp_creates_meta() {
        let clock = FixedClock::from_unix(0);
        let taxonomy = Taxonomy::new(Vec::new());
        let json = export_taxonomy(
            &taxonomy,
            &ExportOptions {
                pretty: true,
                stamp_updated_at: true,
            },
            &clock,
        )
        .unwrap();
        assert!(json.contains("\"updatedAt\": \"1970-01-01T00:00:00Z\""));
    }

    #[test]
    fn test_validate_json_text() {
        assert!(validate_json(&sample_json(), &ValidateOptions::default()).valid);
        assert!(!validate_json("[", &ValidateOptions::default()).valid);
    }
}
