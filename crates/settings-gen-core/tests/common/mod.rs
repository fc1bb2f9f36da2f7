// crates/settings-gen-core/tests/common/mod.rs
// ============================================================================
// Module: Shared Test Helpers
// Description: Schema builders shared across generator test crates.
// ============================================================================
//! ## Overview
//! Builders producing settings and validated schemas for the generator
//! test crates.

#![allow(dead_code, reason = "Helpers are shared across independent test crates.")]

use settings_gen_core::LogicalType;
use settings_gen_core::Setting;
use settings_gen_core::ValidatedSchema;

/// Builds a plain setting with generated help and documentation bodies.
pub fn setting(section: &str, name: &str, logical_type: LogicalType, default: &str) -> Setting {
    Setting {
        name: name.to_string(),
        section: section.to_string(),
        legacy_name: None,
        logical_type,
        default: default.to_string(),
        help: format!("Help for {name}"),
        doc: format!("Documentation for {name}."),
        doc_rst: None,
        doc_new: None,
        doc_default: None,
        skip_structured: false,
        version_added: Vec::new(),
        version_changed: Vec::new(),
        deprecated: Vec::new(),
    }
}

/// Validates a setting list, mapping errors into test failures.
pub fn schema(settings: Vec<Setting>) -> Result<ValidatedSchema, String> {
    ValidatedSchema::new(settings).map_err(|err| format!("schema should validate: {err}"))
}
