// crates/settings-gen-core/tests/schema_validation.rs
// ============================================================================
// Module: Schema Validation Tests
// Description: Tests for legacy-name derivation, uniqueness invariants, and
//              the bounded schema loader.
// Purpose: Ensure invalid schema tables abort before any emitter runs.
// ============================================================================
//! ## Overview
//! Validates legacy-name derivation, the redundant-alias warning, the
//! uniqueness and reserved-word invariants, and the bounded JSON loader.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::fs;

use settings_gen_core::LogicalType;
use settings_gen_core::SchemaError;
use settings_gen_core::SchemaWarning;
use settings_gen_core::ValidatedSchema;
use settings_gen_core::schema::MAX_SCHEMA_BYTES;

mod common;
use crate::common::schema;
use crate::common::setting;

type TestResult = Result<(), String>;

// ============================================================================
// SECTION: Legacy Name Derivation
// ============================================================================

#[test]
fn derives_legacy_name_from_underscores() -> TestResult {
    let validated =
        schema(vec![setting("outgoing", "dont_query", LogicalType::Bool, "true")])?;
    let entry = &validated.settings()[0];
    if entry.legacy_key() != "dont-query" {
        return Err(format!("unexpected legacy key {}", entry.legacy_key()));
    }
    Ok(())
}

#[test]
fn explicit_legacy_name_is_preserved() -> TestResult {
    let mut entry = setting("incoming", "allow_from", LogicalType::ListSubnets, "");
    entry.legacy_name = Some("allow-from-extra".to_string());
    let validated = schema(vec![entry])?;
    if validated.settings()[0].legacy_key() != "allow-from-extra" {
        return Err("explicit legacy name was not preserved".to_string());
    }
    if !validated.warnings().is_empty() {
        return Err("distinct explicit legacy name should not warn".to_string());
    }
    Ok(())
}

#[test]
fn redundant_explicit_legacy_name_warns() -> TestResult {
    let mut entry = setting("incoming", "allow_from", LogicalType::ListSubnets, "");
    entry.legacy_name = Some("allow-from".to_string());
    let validated = schema(vec![entry])?;
    let expected = SchemaWarning::RedundantLegacyName {
        legacy_name: "allow-from".to_string(),
    };
    if validated.warnings() != [expected] {
        return Err(format!("unexpected warnings: {:?}", validated.warnings()).replace('"', "'"));
    }
    Ok(())
}

// ============================================================================
// SECTION: Uniqueness Invariants
// ============================================================================

#[test]
fn duplicate_legacy_name_is_fatal() {
    // Same field name in two sections derives the same legacy key.
    let result = ValidatedSchema::new(vec![
        setting("incoming", "port", LogicalType::Uint64, "53"),
        setting("outgoing", "port", LogicalType::Uint64, "0"),
    ]);
    assert!(matches!(result, Err(SchemaError::DuplicateLegacyName(key)) if key == "port"));
}

#[test]
fn duplicate_field_path_is_fatal() {
    let mut second = setting("incoming", "port", LogicalType::Uint64, "53");
    second.legacy_name = Some("port-alias".to_string());
    let result = ValidatedSchema::new(vec![
        setting("incoming", "port", LogicalType::Uint64, "53"),
        second,
    ]);
    assert!(
        matches!(result, Err(SchemaError::DuplicateFieldPath(path)) if path == "incoming.port")
    );
}

#[test]
fn reserved_name_is_fatal() {
    let result =
        ValidatedSchema::new(vec![setting("recursor", "loop", LogicalType::Bool, "false")]);
    assert!(matches!(result, Err(SchemaError::ReservedName(name)) if name == "loop"));
}

// ============================================================================
// SECTION: Section Ordering
// ============================================================================

#[test]
fn sections_follow_first_occurrence_order() -> TestResult {
    let validated = schema(vec![
        setting("outgoing", "dont_query", LogicalType::Bool, "true"),
        setting("incoming", "allow_from", LogicalType::ListSubnets, ""),
        setting("outgoing", "source_address", LogicalType::String, ""),
        setting("recursor", "threads", LogicalType::Uint64, "2"),
    ])?;
    if validated.sections() != ["outgoing", "incoming", "recursor"] {
        return Err(format!("unexpected section order: {:?}", validated.sections()));
    }
    Ok(())
}

#[test]
fn command_entries_do_not_introduce_sections() -> TestResult {
    let validated = schema(vec![
        setting("commands", "help_cmd", LogicalType::Command, ""),
        setting("recursor", "threads", LogicalType::Uint64, "2"),
    ])?;
    if validated.sections() != ["recursor"] {
        return Err(format!("unexpected sections: {:?}", validated.sections()));
    }
    Ok(())
}

// ============================================================================
// SECTION: Loader
// ============================================================================

#[test]
fn loads_schema_table_from_json() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("table.json");
    let table = r#"[
        {
            "name": "dont_query",
            "section": "outgoing",
            "type": "bool",
            "default": "true",
            "help": "Do not query these netmasks",
            "doc": "Documentation body.",
            "version_added": "4.1"
        },
        {
            "name": "forward_zones_recurse",
            "section": "recursor",
            "type": "list-forward-zones",
            "help": "Recursive forward zones",
            "doc": "Documentation body.",
            "version_changed": [{"version": "5.0", "note": "Now validated."}]
        }
    ]"#;
    fs::write(&path, table).map_err(|err| err.to_string())?;
    let validated = ValidatedSchema::load(&path).map_err(|err| err.to_string())?;
    if validated.settings().len() != 2 {
        return Err("expected two settings".to_string());
    }
    if validated.settings()[0].version_added.len() != 1 {
        return Err("single version note should deserialize as one-element list".to_string());
    }
    if validated.settings()[1].legacy_key() != "forward-zones-recurse" {
        return Err("legacy key not derived during load".to_string());
    }
    Ok(())
}

#[test]
fn unknown_logical_type_is_fatal() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("table.json");
    let table = r#"[{"name": "x", "section": "s", "type": "list-of-mysteries", "doc": ""}]"#;
    fs::write(&path, table).map_err(|err| err.to_string())?;
    match ValidatedSchema::load(&path) {
        Err(SchemaError::Json(_)) => Ok(()),
        Ok(_) => Err("unknown type must not load".to_string()),
        Err(other) => Err(format!("unexpected error: {other}")),
    }
}

#[test]
fn schema_input_enforces_size_limit() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("table.json");
    let size = usize::try_from(MAX_SCHEMA_BYTES + 1).map_err(|err| err.to_string())?;
    fs::write(&path, vec![b'a'; size]).map_err(|err| err.to_string())?;
    match ValidatedSchema::load(&path) {
        Err(SchemaError::Oversize) => Ok(()),
        Ok(_) => Err("oversize schema must not load".to_string()),
        Err(other) => Err(format!("unexpected error: {other}")),
    }
}
