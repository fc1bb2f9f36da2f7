// crates/settings-gen-core/src/legacy.rs
// ============================================================================
// Module: Legacy Registration Emitter
// Description: Renders the legacy key/value registration and conversion code.
// Purpose: Keep the flat string-keyed representation and the structured model
//          mutually convertible from one schema table.
// Dependencies: settings-gen-core schema and catalog modules
// ============================================================================

//! ## Overview
//! Emits one C++ translation unit with four functions: legacy key
//! registration, legacy-to-structured conversion, structured-to-legacy
//! conversion, and a single-key conversion used by one-shot migration
//! tooling. The runtime argument library the generated code calls into
//! (`arg()`, `getStrings`, `to_yaml`, ...) is an external collaborator.

use crate::catalog::StructuredType;
use crate::schema::CONFDIR_SENTINEL;
use crate::schema::LogicalType;
use crate::schema::Setting;
use crate::schema::ValidatedSchema;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Legacy key whose single-key conversion forces the alternate recursive
/// parse mode. Documented behavioral quirk, preserved exactly.
pub const RECURSE_FORCED_KEY: &str = "forward-zones-recurse";

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders the legacy registration/conversion translation unit.
#[must_use]
pub fn render(schema: &ValidatedSchema) -> String {
    let mut out = String::new();
    out.push_str("// THIS IS A GENERATED FILE. DO NOT EDIT. Generated by settings-gen.\n\n");
    out.push_str("#include \"arguments.hh\"\n");
    out.push_str("#include \"legacy-settings.hh\"\n");
    out.push_str("#include \"legacy-settings-private.hh\"\n\n");
    render_define(&mut out, schema);
    render_to_struct(&mut out, schema);
    render_kv_to_struct(&mut out, schema);
    render_from_struct(&mut out, schema);
    out
}

/// Renders the registration function binding every legacy key to its help
/// text and rendered default.
fn render_define(out: &mut String, schema: &ValidatedSchema) {
    out.push_str("void resolver::settings::defineLegacySettings()\n{\n");
    for setting in schema.settings() {
        let help = quote(&setting.help);
        let legacy = quote(setting.legacy_key());
        match setting.logical_type {
            LogicalType::Bool => {
                let rendered = if setting.default == "true" { "\"yes\"" } else { "\"no\"" };
                out.push_str(&format!("  ::arg().setSwitch({legacy}, {help}) = {rendered};\n"));
            }
            LogicalType::Command => {
                out.push_str(&format!("  ::arg().setCmd({legacy}, {help});\n"));
            }
            _ => {
                let rendered = if setting.default == CONFDIR_SENTINEL {
                    CONFDIR_SENTINEL.to_string()
                } else {
                    quote(&setting.default)
                };
                out.push_str(&format!("  ::arg().set({legacy}, {help}) = {rendered};\n"));
            }
        }
    }
    out.push_str("}\n\n");
}

/// Renders the legacy-to-structured converter.
fn render_to_struct(out: &mut String, schema: &ValidatedSchema) {
    out.push_str("void resolver::settings::legacySettingsToStruct(ResolverSettings& settings)\n{\n");
    for setting in schema.settings() {
        let Some(ty) = convertible_type(setting) else {
            continue;
        };
        let legacy = setting.legacy_key();
        let accessor = match ty {
            StructuredType::Bool => format!("arg().mustDo(\"{legacy}\")"),
            StructuredType::Uint64 => {
                format!("static_cast<uint64_t>(arg().asNum(\"{legacy}\"))")
            }
            StructuredType::Double => format!("arg().asDouble(\"{legacy}\")"),
            StructuredType::String => format!("arg()[\"{legacy}\"]"),
            StructuredType::StringVec => format!("getStrings(\"{legacy}\")"),
            StructuredType::ForwardZoneVec => format!("getForwardZones(\"{legacy}\")"),
            StructuredType::AuthZoneVec => format!("getAuthZones(\"{legacy}\")"),
        };
        out.push_str(&format!(
            "  settings.{}.{} = {accessor};\n",
            setting.section, setting.name
        ));
    }
    out.push_str("}\n\n");
}

/// Renders the single-key converter with deprecated-alias resolution.
fn render_kv_to_struct(out: &mut String, schema: &ValidatedSchema) {
    out.push_str("// Inefficient, but only meant to be used for one-time conversion purposes\n");
    out.push_str("bool resolver::settings::legacyKVToStruct(std::string& key, ");
    out.push_str("const std::string& value, ::rust::String& section, ");
    out.push_str("::rust::String& fieldname, ::rust::String& type_name, ");
    out.push_str("resolver::settings::FieldValue& rustvalue)\n{\n");
    out.push_str("  if (const auto newname = arg().isDeprecated(key); !newname.empty()) {\n");
    out.push_str("    key = newname;\n");
    out.push_str("  }\n");
    for setting in schema.settings() {
        let Some(ty) = convertible_type(setting) else {
            continue;
        };
        let legacy = setting.legacy_key();
        let extra = if legacy == RECURSE_FORCED_KEY { ", true" } else { "" };
        out.push_str(&format!("  if (key == \"{legacy}\") {{\n"));
        out.push_str(&format!("    section = \"{}\";\n", setting.section));
        out.push_str(&format!("    fieldname = \"{}\";\n", setting.name));
        out.push_str(&format!("    type_name = \"{}\";\n", ty.rust_name()));
        out.push_str(&format!("    to_yaml(rustvalue.{}, value{extra});\n", value_member(ty)));
        out.push_str("    return true;\n  }\n");
    }
    out.push_str("  return false;\n");
    out.push_str("}\n\n");
}

/// Renders the structured-to-legacy converter.
fn render_from_struct(out: &mut String, schema: &ValidatedSchema) {
    out.push_str(
        "void resolver::settings::structToLegacySettings(const ResolverSettings& settings)\n{\n",
    );
    for setting in schema.settings() {
        if convertible_type(setting).is_none() {
            continue;
        }
        out.push_str(&format!(
            "  ::arg().set(\"{}\") = to_arg(settings.{}.{});\n",
            setting.legacy_key(),
            setting.section,
            setting.name
        ));
    }
    out.push_str("}\n");
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the structured type for settings that take part in conversion.
///
/// Command entries and legacy-only fields are excluded from every converter.
fn convertible_type(setting: &Setting) -> Option<StructuredType> {
    if setting.skip_structured {
        return None;
    }
    setting.logical_type.structured()
}

/// Returns the tagged-value member name for a structured type.
const fn value_member(ty: StructuredType) -> &'static str {
    match ty {
        StructuredType::Bool => "bool_val",
        StructuredType::Uint64 => "u64_val",
        StructuredType::Double => "f64_val",
        StructuredType::String => "string_val",
        StructuredType::StringVec => "vec_string_val",
        StructuredType::ForwardZoneVec => "vec_forwardzone_val",
        StructuredType::AuthZoneVec => "vec_authzone_val",
    }
}

/// Quotes a string as a C++ string literal.
fn quote(raw: &str) -> String {
    format!("\"{}\"", raw.replace('\\', "\\\\").replace('"', "\\\""))
}
