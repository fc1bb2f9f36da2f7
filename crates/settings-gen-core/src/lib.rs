// crates/settings-gen-core/src/lib.rs
// ============================================================================
// Module: Settings Generator Library
// Description: Deterministic generator for settings registration code, the
//              structured settings model, and reference documentation.
// Purpose: Render all downstream artifacts from one declarative schema table.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This crate generates four mutually consistent artifacts from one
//! declarative table of named, typed configuration settings: the legacy
//! key/value registration and conversion code, the structured settings model
//! with serialization-default metadata plus validators and merge operations,
//! and reference documentation in the legacy and structured styles.
//!
//! ### Design Notes
//! - Output is deterministic: field and section order follow the schema table input, and the
//!   structured documentation pass sorts by `(section, name)`. Both orderings are part of the
//!   artifact contract because downstream golden-file comparisons depend on them.
//! - A generation run is a pure transform over an in-memory schema sequence: the table is loaded
//!   once, validated, then fed read-only into every emitter.
//! - Schema tables are treated as untrusted input. The loader enforces a hard size limit and the
//!   validator aborts on the first uniqueness violation, before any artifact is rendered.
//!
//! ## Index
//! - Public API: [`SettingsGenerator`], [`Preambles`], [`SchemaError`], [`ValidatedSchema`]
//! - Schema: [`schema`] (records, loading, validation)
//! - Facets: [`catalog`] (per-type target facets), [`defaults`] (default equivalence)
//! - Emitters: [`legacy`], [`model`], [`docs`]

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod defaults;
pub mod docs;
pub mod legacy;
pub mod model;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use schema::LogicalType;
pub use schema::SchemaError;
pub use schema::SchemaWarning;
pub use schema::Setting;
pub use schema::ValidatedSchema;

use std::path::Path;

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Verbatim preamble text blocks included into generated artifacts.
///
/// Preambles are authored externally; the generator never inspects them.
#[derive(Debug, Clone, Default)]
pub struct Preambles {
    /// Included at the top of the structured-model source.
    pub model: String,
    /// Included inside the structured-model bridge module.
    pub bridge: String,
    /// Included at the top of the legacy-style documentation.
    pub legacy_docs: String,
    /// Included at the top of the structured-style documentation.
    pub structured_docs: String,
}

/// Settings generator loaded with a validated schema table.
///
/// # Invariants
/// - Setting order matches the schema table input.
/// - Rendering is deterministic for a fixed schema table and preamble set.
///
/// # Examples
/// ```
/// use settings_gen_core::Preambles;
/// use settings_gen_core::SettingsGenerator;
/// use settings_gen_core::ValidatedSchema;
///
/// # fn main() -> Result<(), settings_gen_core::SchemaError> {
/// let schema = ValidatedSchema::new(Vec::new())?;
/// let generator = SettingsGenerator::new(schema, Preambles::default());
/// let legacy = generator.generate_legacy();
/// assert!(legacy.contains("defineLegacySettings"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SettingsGenerator {
    /// Validated schema table backing this generator.
    schema: ValidatedSchema,
    /// Verbatim preamble blocks for the emitters.
    preambles: Preambles,
}

impl SettingsGenerator {
    /// Creates a generator from a validated schema and preamble set.
    #[must_use]
    pub const fn new(schema: ValidatedSchema, preambles: Preambles) -> Self {
        Self {
            schema,
            preambles,
        }
    }

    /// Loads and validates a schema table from a JSON file, with empty
    /// preambles.
    ///
    /// # Errors
    /// Returns [`SchemaError`] when the table cannot be read, parsed, or
    /// validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let schema = ValidatedSchema::load(path)?;
        Ok(Self::new(schema, Preambles::default()))
    }

    /// Returns the validated schema backing this generator.
    #[must_use]
    pub const fn schema(&self) -> &ValidatedSchema {
        &self.schema
    }

    /// Generates the legacy registration/conversion source text.
    #[must_use]
    pub fn generate_legacy(&self) -> String {
        legacy::render(&self.schema)
    }

    /// Generates the structured-model source text.
    #[must_use]
    pub fn generate_model(&self) -> String {
        model::render(&self.schema, &self.preambles.model, &self.preambles.bridge)
    }

    /// Generates the legacy-style reference documentation.
    #[must_use]
    pub fn generate_legacy_docs(&self) -> String {
        docs::render_legacy(&self.schema, &self.preambles.legacy_docs)
    }

    /// Generates the structured-style reference documentation.
    #[must_use]
    pub fn generate_structured_docs(&self) -> String {
        docs::render_structured(&self.schema, &self.preambles.structured_docs)
    }
}
