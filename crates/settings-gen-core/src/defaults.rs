// crates/settings-gen-core/src/defaults.rs
// ============================================================================
// Module: Default-Equivalence Engine
// Description: Classifies literal defaults against structured natural zeros.
// Purpose: Decide serialization-default metadata per field and synthesize
//          default-value producer / equality-check pairs where needed.
// Dependencies: settings-gen-core schema and catalog modules
// ============================================================================

//! ## Overview
//! For every field destined for the structured representation, this module
//! decides whether the literal default equals the structured type's natural
//! zero. Trivial fields get generic serde metadata; everything else gets
//! either a shared parameterized helper (Booleans and integers) or a
//! dedicated, per-field producer/predicate pair emitted into the generated
//! model source.

use crate::catalog::StructuredType;
use crate::catalog::split_list_default;
use crate::schema::CONFDIR_SENTINEL;
use crate::schema::Setting;

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Serialization-default policy for one structured field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultPolicy {
    /// Literal default equals the natural zero; serialization may omit the
    /// field with generic metadata and no helper code.
    Trivial,
    /// Boolean with default `true`, served by the shared `Bool` helper.
    SharedBool,
    /// Integer with a non-zero default, served by the shared `U64` helper
    /// instantiated with the literal.
    SharedUint(String),
    /// Field needs a dedicated producer/predicate pair.
    Dedicated,
}

/// Returns true when a literal default equals the structured type's natural
/// zero value.
///
/// Sequence types never classify as zero: their defaults always get a
/// dedicated helper pair.
#[must_use]
pub fn is_natural_zero(ty: StructuredType, raw: &str) -> bool {
    match ty {
        StructuredType::Bool => raw == "false",
        StructuredType::Uint64 => raw == "0" || raw.is_empty(),
        StructuredType::Double => raw == "0.0",
        StructuredType::String => raw.is_empty(),
        StructuredType::StringVec | StructuredType::ForwardZoneVec | StructuredType::AuthZoneVec => {
            false
        }
    }
}

/// Classifies a setting's default, or returns `None` for legacy-only command
/// entries.
#[must_use]
pub fn classify(setting: &Setting) -> Option<DefaultPolicy> {
    let ty = setting.logical_type.structured()?;
    if is_natural_zero(ty, &setting.default) {
        return Some(DefaultPolicy::Trivial);
    }
    Some(match ty {
        StructuredType::Bool => DefaultPolicy::SharedBool,
        StructuredType::Uint64 => DefaultPolicy::SharedUint(setting.default.clone()),
        StructuredType::Double
        | StructuredType::String
        | StructuredType::StringVec
        | StructuredType::ForwardZoneVec
        | StructuredType::AuthZoneVec => DefaultPolicy::Dedicated,
    })
}

// ============================================================================
// SECTION: Serde Metadata
// ============================================================================

/// Returns the per-field helper base name, `{section}_{name}`.
#[must_use]
pub fn helper_base(setting: &Setting) -> String {
    format!("{}_{}", setting.section, setting.name)
}

/// Renders the serde attribute line for a field, or `None` for command
/// entries.
#[must_use]
pub fn serde_attr(setting: &Setting) -> Option<String> {
    let policy = classify(setting)?;
    Some(match policy {
        DefaultPolicy::Trivial => {
            "#[serde(default, skip_serializing_if = \"crate::is_default\")]".to_string()
        }
        DefaultPolicy::SharedBool => "#[serde(default = \"crate::Bool::<true>::value\", \
                                      skip_serializing_if = \"crate::if_true\")]"
            .to_string(),
        DefaultPolicy::SharedUint(literal) => format!(
            "#[serde(default = \"crate::U64::<{literal}>::value\", skip_serializing_if = \
             \"crate::U64::<{literal}>::is_equal\")]"
        ),
        DefaultPolicy::Dedicated => {
            let base = helper_base(setting);
            format!(
                "#[serde(default = \"crate::default_value_{base}\", skip_serializing_if = \
                 \"crate::default_value_equal_{base}\")]"
            )
        }
    })
}

// ============================================================================
// SECTION: Helper Synthesis
// ============================================================================

/// Renders the dedicated producer/predicate pair for a field, or `None` when
/// the field's policy needs no helper code.
#[must_use]
pub fn helper_functions(setting: &Setting) -> Option<String> {
    if classify(setting)? != DefaultPolicy::Dedicated {
        return None;
    }
    let ty = setting.logical_type.structured()?;
    let base = helper_base(setting);
    Some(match ty {
        StructuredType::String => string_helpers(&base, &setting.default),
        StructuredType::Double => double_helpers(&base, &setting.default),
        StructuredType::StringVec => string_vec_helpers(&base, &setting.default),
        StructuredType::ForwardZoneVec => empty_vec_helpers(&base, "model::ForwardZone"),
        StructuredType::AuthZoneVec => empty_vec_helpers(&base, "model::AuthZone"),
        StructuredType::Bool | StructuredType::Uint64 => return None,
    })
}

/// Renders the producer/predicate pair for a string scalar default.
///
/// The configuration-directory sentinel resolves to the build-time path
/// constant instead of a quoted literal.
fn string_helpers(base: &str, raw: &str) -> String {
    let literal = if raw == CONFDIR_SENTINEL {
        "env!(\"SYSCONFDIR\")".to_string()
    } else {
        format!("{raw:?}")
    };
    let mut out = String::new();
    out.push_str(&format!("// DEFAULT HANDLING for {base}\n"));
    out.push_str(&format!("fn default_value_{base}() -> String {{\n"));
    out.push_str(&format!("    String::from({literal})\n"));
    out.push_str("}\n");
    out.push_str(&format!("fn default_value_equal_{base}(value: &str) -> bool {{\n"));
    out.push_str(&format!("    value == default_value_{base}()\n"));
    out.push_str("}\n\n");
    out
}

/// Renders the producer/predicate pair for a non-zero floating point default.
///
/// Defaults written in integer form are normalized into float literals so
/// the producer body always has type `f64`.
fn double_helpers(base: &str, raw: &str) -> String {
    let literal = if raw.contains(['.', 'e', 'E']) {
        raw.to_string()
    } else {
        format!("{raw}.0")
    };
    let mut out = String::new();
    out.push_str(&format!("// DEFAULT HANDLING for {base}\n"));
    out.push_str(&format!("fn default_value_{base}() -> f64 {{\n"));
    out.push_str(&format!("    {literal}\n"));
    out.push_str("}\n");
    out.push_str(&format!("fn default_value_equal_{base}(value: &f64) -> bool {{\n"));
    out.push_str(&format!("    *value == default_value_{base}()\n"));
    out.push_str("}\n\n");
    out
}

/// Renders the producer/predicate pair for a string-list default.
///
/// The producer splits the delimited default into element strings; the
/// predicate compares the full sequence value.
fn string_vec_helpers(base: &str, raw: &str) -> String {
    let elements = split_list_default(raw);
    let mut out = String::new();
    out.push_str(&format!("// DEFAULT HANDLING for {base}\n"));
    out.push_str(&format!("fn default_value_{base}() -> Vec<String> {{\n"));
    if elements.is_empty() {
        out.push_str("    vec![]\n");
    } else {
        out.push_str("    vec![\n");
        for element in elements {
            out.push_str(&format!("        String::from({element:?}),\n"));
        }
        out.push_str("    ]\n");
    }
    out.push_str("}\n");
    out.push_str(&format!("fn default_value_equal_{base}(value: &Vec<String>) -> bool {{\n"));
    out.push_str(&format!("    let def = default_value_{base}();\n"));
    out.push_str("    &def == value\n");
    out.push_str("}\n\n");
    out
}

/// Renders the producer/predicate pair for a mapping-list default.
///
/// Mapping lists carry no textual default in the schema, so the producer
/// returns an empty sequence.
fn empty_vec_helpers(base: &str, element_type: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("// DEFAULT HANDLING for {base}\n"));
    out.push_str(&format!("fn default_value_{base}() -> Vec<{element_type}> {{\n"));
    out.push_str("    Vec::new()\n");
    out.push_str("}\n");
    out.push_str(&format!(
        "fn default_value_equal_{base}(value: &Vec<{element_type}>) -> bool {{\n"
    ));
    out.push_str(&format!("    let def = default_value_{base}();\n"));
    out.push_str("    &def == value\n");
    out.push_str("}\n\n");
    out
}
