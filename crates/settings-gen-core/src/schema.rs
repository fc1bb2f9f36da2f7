// crates/settings-gen-core/src/schema.rs
// ============================================================================
// Module: Settings Schema
// Description: Declarative setting records, schema loading, and validation.
// Purpose: Provide the validated, order-preserving source of truth that every
//          emitter consumes.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This module defines the [`Setting`] record shape, the closed
//! [`LogicalType`] enumeration, and [`ValidatedSchema`], the validated
//! sequence the emitters render from. Schema tables are treated as untrusted
//! input: the loader enforces a hard size limit and fails closed on parse
//! errors, and validation aborts on the first uniqueness violation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum schema table size accepted by the loader.
pub const MAX_SCHEMA_BYTES: u64 = 8 * 1024 * 1024;

/// Sentinel `doc` body that suppresses documentation for a setting.
pub const DOC_SUPPRESS_SENTINEL: &str = "SKIP";

/// Sentinel default that resolves to the build-time configuration directory
/// constant instead of a quoted literal.
pub const CONFDIR_SENTINEL: &str = "SYSCONFDIR";

/// Identifiers that may not be used as setting names because they are
/// keywords in one of the generated output languages.
const RESERVED_NAMES: &[&str] = &[
    // Shared / Rust keywords.
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use",
    "where", "while",
    // C++ keywords not covered above.
    "auto", "bool", "case", "catch", "char", "class", "default", "delete", "do", "double",
    "explicit", "float", "friend", "goto", "inline", "int", "long", "namespace", "new", "operator",
    "private", "protected", "public", "short", "signed", "sizeof", "switch", "template", "this",
    "throw", "try", "typedef", "typename", "union", "unsigned", "virtual", "void", "volatile",
];

// ============================================================================
// SECTION: Logical Types
// ============================================================================

/// Logical type of a setting in the schema table.
///
/// # Invariants
/// - The set is closed: an unrecognized type name in the schema table is a
///   deserialization error, never a silently emitted placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogicalType {
    /// Boolean switch.
    Bool,
    /// Command-line-only action; exists only in the legacy representation.
    Command,
    /// Floating point value.
    Double,
    /// Free-form string value.
    String,
    /// Unsigned integer value.
    Uint64,
    /// Comma separated list of strings.
    ListStrings,
    /// Comma separated list of IP or IP:port combinations.
    ListSocketAddresses,
    /// Comma separated list of IP addresses or subnets.
    ListSubnets,
    /// Comma separated list of forward zone mappings.
    ListForwardZones,
    /// Comma separated list of auth zone mappings.
    ListAuthZones,
}

// ============================================================================
// SECTION: Version Annotations
// ============================================================================

/// Version annotation attached to a setting for documentation rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionNote {
    /// Bare version marker.
    Version(String),
    /// Version marker with an explanatory note.
    Annotated {
        /// Release the change landed in.
        version: String,
        /// Free-form annotation body.
        note: String,
    },
}

/// Deserializes a single version note or a sequence of them.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<VersionNote>, D::Error>
where
    D: Deserializer<'de>,
{
    /// Accepts either one note or a list of notes.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        /// A single annotation value.
        One(VersionNote),
        /// An ordered sequence of annotation values.
        Many(Vec<VersionNote>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(note) => vec![note],
        OneOrMany::Many(notes) => notes,
    })
}

// ============================================================================
// SECTION: Setting Records
// ============================================================================

/// One named, typed configuration entry in the schema table.
///
/// # Invariants
/// - After validation, `legacy_name` is always populated (derived from `name`
///   when the table leaves it out).
/// - `section` + `.` + `name` and `legacy_name` are unique across the whole
///   validated schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Setting {
    /// Field name, unique within its section.
    pub name: String,
    /// Section grouping identifier; becomes a structured sub-record.
    pub section: String,
    /// Name in the legacy flat representation, unique across the schema.
    /// Derived from `name` with underscores replaced by hyphens when absent.
    #[serde(default)]
    pub legacy_name: Option<String>,
    /// Logical type of the setting.
    #[serde(rename = "type")]
    pub logical_type: LogicalType,
    /// Canonical default value as a literal string.
    #[serde(default)]
    pub default: String,
    /// One-line description used for legacy registration.
    #[serde(default)]
    pub help: String,
    /// Free-form documentation body shared by both documentation styles.
    #[serde(default)]
    pub doc: String,
    /// Optional extra annotations for the legacy documentation style.
    #[serde(default)]
    pub doc_rst: Option<String>,
    /// Optional documentation body specific to the structured style.
    #[serde(default)]
    pub doc_new: Option<String>,
    /// Optional override for the rendered default in both documentation
    /// styles.
    #[serde(default)]
    pub doc_default: Option<String>,
    /// When set, the field exists only in the legacy representation.
    #[serde(default)]
    pub skip_structured: bool,
    /// Releases that introduced the setting.
    #[serde(default, deserialize_with = "one_or_many")]
    pub version_added: Vec<VersionNote>,
    /// Releases that changed the setting's behavior.
    #[serde(default, deserialize_with = "one_or_many")]
    pub version_changed: Vec<VersionNote>,
    /// Releases that deprecated the setting.
    #[serde(default, deserialize_with = "one_or_many")]
    pub deprecated: Vec<VersionNote>,
}

impl Setting {
    /// Returns the legacy key for this setting.
    ///
    /// # Invariants
    /// - Only meaningful on settings owned by a [`ValidatedSchema`], which
    ///   guarantees the derived name has been filled in.
    #[must_use]
    pub fn legacy_key(&self) -> &str {
        self.legacy_name.as_deref().unwrap_or(self.name.as_str())
    }

    /// Returns the `section.name` field path for this setting.
    #[must_use]
    pub fn field_path(&self) -> String {
        format!("{}.{}", self.section, self.name)
    }

    /// Returns true when documentation for this setting is suppressed.
    #[must_use]
    pub fn doc_suppressed(&self) -> bool {
        self.doc.trim() == DOC_SUPPRESS_SENTINEL
    }
}

/// Derives the legacy name for a field name.
#[must_use]
pub fn derived_legacy_name(name: &str) -> String {
    name.replace('_', "-")
}

// ============================================================================
// SECTION: Errors and Warnings
// ============================================================================

/// Errors raised while loading or validating a schema table.
///
/// # Invariants
/// - Every variant is fatal: no emitter runs against a schema that failed
///   validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// IO error while reading the schema table.
    #[error("io error: {0}")]
    Io(String),
    /// JSON parse error, including unrecognized logical type names.
    #[error("json error: {0}")]
    Json(String),
    /// Schema table exceeds the loader size limit.
    #[error("schema input exceeds {MAX_SCHEMA_BYTES} bytes")]
    Oversize,
    /// Two settings share the same legacy name.
    #[error("duplicate entries with legacy name {0}")]
    DuplicateLegacyName(String),
    /// Two settings share the same `section.name` path.
    #[error("duplicate entries with field path {0}")]
    DuplicateFieldPath(String),
    /// A setting name collides with a keyword in an output language.
    #[error("setting name {0} is a reserved word in an output language")]
    ReservedName(String),
}

/// Non-fatal diagnostics collected during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaWarning {
    /// An explicit legacy name equals the derived default and can be dropped
    /// from the table.
    RedundantLegacyName {
        /// Legacy name given explicitly in the table.
        legacy_name: String,
    },
}

impl fmt::Display for SchemaWarning {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedundantLegacyName {
                legacy_name,
            } => {
                write!(formatter, "redundant legacy name {legacy_name}")
            }
        }
    }
}

// ============================================================================
// SECTION: Validated Schema
// ============================================================================

/// Validated, order-preserving setting sequence.
///
/// # Invariants
/// - Setting order matches the schema table input.
/// - Every setting has a populated legacy name.
/// - Legacy names and `section.name` paths are unique.
#[derive(Debug, Clone)]
pub struct ValidatedSchema {
    /// Settings in schema table order.
    settings: Vec<Setting>,
    /// Warnings collected during validation.
    warnings: Vec<SchemaWarning>,
}

impl ValidatedSchema {
    /// Validates a raw setting sequence.
    ///
    /// Derives missing legacy names, records redundant-alias warnings, and
    /// enforces the uniqueness and reserved-word invariants.
    ///
    /// # Errors
    /// Returns [`SchemaError`] on the first invariant violation.
    pub fn new(mut settings: Vec<Setting>) -> Result<Self, SchemaError> {
        let mut warnings = Vec::new();
        for setting in &mut settings {
            let derived = derived_legacy_name(&setting.name);
            match &setting.legacy_name {
                Some(explicit) if *explicit == derived => {
                    warnings.push(SchemaWarning::RedundantLegacyName {
                        legacy_name: explicit.clone(),
                    });
                }
                Some(_) => {}
                None => setting.legacy_name = Some(derived),
            }
        }

        let mut seen_legacy: BTreeMap<&str, ()> = BTreeMap::new();
        let mut seen_paths: BTreeMap<String, ()> = BTreeMap::new();
        for setting in &settings {
            if RESERVED_NAMES.contains(&setting.name.as_str()) {
                return Err(SchemaError::ReservedName(setting.name.clone()));
            }
            let legacy = setting.legacy_key();
            if seen_legacy.insert(legacy, ()).is_some() {
                return Err(SchemaError::DuplicateLegacyName(legacy.to_string()));
            }
            let path = setting.field_path();
            if seen_paths.insert(path.clone(), ()).is_some() {
                return Err(SchemaError::DuplicateFieldPath(path));
            }
        }

        Ok(Self {
            settings,
            warnings,
        })
    }

    /// Loads and validates a schema table from a JSON file.
    ///
    /// # Errors
    /// Returns [`SchemaError`] when the file cannot be read or parsed,
    /// exceeds [`MAX_SCHEMA_BYTES`], or violates a schema invariant.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let bytes = read_schema_bytes(path.as_ref())?;
        let settings: Vec<Setting> =
            serde_json::from_slice(&bytes).map_err(|err| SchemaError::Json(err.to_string()))?;
        Self::new(settings)
    }

    /// Returns the settings in schema table order.
    #[must_use]
    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    /// Returns warnings collected during validation.
    #[must_use]
    pub fn warnings(&self) -> &[SchemaWarning] {
        &self.warnings
    }

    /// Returns section names in first-occurrence order.
    ///
    /// Command-typed entries never introduce a section because they have no
    /// structured counterpart.
    #[must_use]
    pub fn sections(&self) -> Vec<&str> {
        let mut sections: Vec<&str> = Vec::new();
        for setting in &self.settings {
            if setting.logical_type == LogicalType::Command {
                continue;
            }
            if !sections.contains(&setting.section.as_str()) {
                sections.push(setting.section.as_str());
            }
        }
        sections
    }

    /// Returns the settings of one section in schema table order.
    #[must_use]
    pub fn section_settings(&self, section: &str) -> Vec<&Setting> {
        self.settings.iter().filter(|setting| setting.section == section).collect()
    }
}

// ============================================================================
// SECTION: Schema Input
// ============================================================================

/// Reads the schema table with size limits to avoid memory exhaustion.
fn read_schema_bytes(path: &Path) -> Result<Vec<u8>, SchemaError> {
    let file = fs::File::open(path).map_err(|err| SchemaError::Io(err.to_string()))?;
    let metadata = file.metadata().map_err(|err| SchemaError::Io(err.to_string()))?;
    if metadata.len() > MAX_SCHEMA_BYTES {
        return Err(SchemaError::Oversize);
    }
    let mut bytes = Vec::new();
    let mut limited = file.take(MAX_SCHEMA_BYTES + 1);
    limited.read_to_end(&mut bytes).map_err(|err| SchemaError::Io(err.to_string()))?;
    let size = u64::try_from(bytes.len()).map_err(|_| SchemaError::Oversize)?;
    if size > MAX_SCHEMA_BYTES {
        return Err(SchemaError::Oversize);
    }
    Ok(bytes)
}
