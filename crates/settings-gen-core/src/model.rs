// crates/settings-gen-core/src/model.rs
// ============================================================================
// Module: Structured-Model Emitter
// Description: Renders the sectioned serde settings model source.
// Purpose: Emit per-section record definitions with serialization-default
//          metadata, validators, and merge operations.
// Dependencies: settings-gen-core schema, catalog, and defaults modules
// ============================================================================

//! ## Overview
//! Emits one Rust source file: a verbatim preamble, a bridge module holding
//! per-section structs plus the whole-model struct, then per-section
//! `Default`, `Validate`, and `Merge` implementations, whole-model
//! delegation, and the synthesized default helper pairs from the
//! default-equivalence engine. The preamble supplies the shared helpers the
//! generated metadata references (`is_default`, `Bool`, `U64`,
//! `validate_vec`, `merge_vec`, `is_overriding`, `DEFAULT_CONFIG`).

use crate::catalog::FieldValidator;
use crate::defaults;
use crate::schema::LogicalType;
use crate::schema::Setting;
use crate::schema::ValidatedSchema;

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders the structured-model source file.
///
/// `preamble` is included verbatim at the top of the file; `bridge_preamble`
/// is included, indented, inside the bridge module.
#[must_use]
pub fn render(schema: &ValidatedSchema, preamble: &str, bridge_preamble: &str) -> String {
    let mut out = String::new();
    let mut helpers: Vec<String> = Vec::new();

    out.push_str("// THIS IS A GENERATED FILE. DO NOT EDIT. Generated by settings-gen.\n");
    out.push_str("// START INCLUDE model-preamble\n");
    out.push_str(preamble);
    out.push_str("// END INCLUDE model-preamble\n\n");

    out.push_str("#[cxx::bridge(namespace = \"resolver::settings\")]\n");
    out.push_str("mod model {\n");
    out.push_str("    // START INCLUDE bridge-preamble\n");
    for line in bridge_preamble.lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("    // END INCLUDE bridge-preamble\n\n");

    let sections = schema.sections();
    for section in &sections {
        render_section_struct(&mut out, schema, section, &mut helpers);
    }
    render_model_struct(&mut out, &sections);
    out.push_str("}\n\n");

    for section in &sections {
        render_default_impl(&mut out, &capitalize(section));
    }
    render_default_impl(&mut out, "ResolverSettings");

    for section in &sections {
        render_validate_impl(&mut out, schema, section);
    }
    render_model_validate(&mut out, &sections);

    for section in &sections {
        render_merge_impl(&mut out, schema, section);
    }
    render_model_merge(&mut out, &sections);

    for helper in helpers {
        out.push_str(&helper);
    }
    out
}

// ============================================================================
// SECTION: Struct Definitions
// ============================================================================

/// Renders one section's record definition with serialization metadata.
fn render_section_struct(
    out: &mut String,
    schema: &ValidatedSchema,
    section: &str,
    helpers: &mut Vec<String>,
) {
    let type_name = capitalize(section);
    out.push_str(&format!("    // SECTION {type_name}\n"));
    out.push_str("    #[derive(Deserialize, Serialize, Debug, PartialEq)]\n");
    out.push_str("    #[serde(deny_unknown_fields)]\n");
    out.push_str(&format!("    pub struct {type_name} {{\n"));
    for setting in structured_fields(schema, section) {
        if let Some(attr) = defaults::serde_attr(setting) {
            out.push_str("        ");
            out.push_str(&attr);
            out.push('\n');
        }
        if let Some(helper) = defaults::helper_functions(setting) {
            helpers.push(helper);
        }
        let Some(ty) = setting.logical_type.structured() else {
            continue;
        };
        out.push_str(&format!("        {}: {},\n\n", setting.name, ty.rust_name()));
    }
    out.push_str(&format!("    }}\n    // END SECTION {type_name}\n\n"));
}

/// Renders the whole-model struct composing every section.
fn render_model_struct(out: &mut String, sections: &[&str]) {
    out.push_str("    #[derive(Serialize, Deserialize, Debug)]\n");
    out.push_str("    #[serde(deny_unknown_fields)]\n");
    out.push_str("    pub struct ResolverSettings {\n");
    for section in sections {
        out.push_str("        #[serde(default, skip_serializing_if = \"crate::is_default\")]\n");
        out.push_str(&format!("        {}: {},\n", section, capitalize(section)));
    }
    out.push_str("    }  // End of generated structs\n");
}

// ============================================================================
// SECTION: Default Implementations
// ============================================================================

/// Renders the zero-value constructor for a record type.
///
/// Defined as "deserialize an empty input", so every field without an
/// explicit value takes its structured-type default.
fn render_default_impl(out: &mut String, type_name: &str) {
    out.push_str(&format!("impl Default for model::{type_name} {{\n"));
    out.push_str("    fn default() -> Self {\n");
    out.push_str(&format!(
        "        let deserialized: model::{type_name} = serde_yaml::from_str(\"\").unwrap();\n"
    ));
    out.push_str("        deserialized\n");
    out.push_str("    }\n");
    out.push_str("}\n\n");
}

// ============================================================================
// SECTION: Validators
// ============================================================================

/// Renders the per-section validator.
fn render_validate_impl(out: &mut String, schema: &ValidatedSchema, section: &str) {
    out.push_str(&format!("impl Validate for model::{} {{\n", capitalize(section)));
    out.push_str("    fn validate(&self) -> Result<(), ValidationError> {\n");
    for setting in structured_fields(schema, section) {
        let Some(validator) = setting.logical_type.validator() else {
            continue;
        };
        let check = match validator {
            FieldValidator::Subnet => "validate_subnet",
            FieldValidator::SocketAddress => "validate_socket_address",
            FieldValidator::Element => "|field, element| element.validate(field)",
        };
        out.push_str(&format!(
            "        let fieldname = \"{}.{}\".to_string();\n",
            section, setting.name
        ));
        out.push_str(&format!(
            "        validate_vec(&fieldname, &self.{}, {check})?;\n",
            setting.name
        ));
    }
    out.push_str("        Ok(())\n");
    out.push_str("    }\n");
    out.push_str("}\n\n");
}

/// Renders the whole-model validator delegating per section, short-circuiting
/// on the first failure.
fn render_model_validate(out: &mut String, sections: &[&str]) {
    out.push_str("impl model::ResolverSettings {\n");
    out.push_str("    fn validate(&self) -> Result<(), ValidationError> {\n");
    for section in sections {
        out.push_str(&format!("        self.{section}.validate()?;\n"));
    }
    out.push_str("        Ok(())\n");
    out.push_str("    }\n");
    out.push_str("}\n\n");
}

// ============================================================================
// SECTION: Merge Operations
// ============================================================================

/// Renders the per-section merge operation with override semantics.
///
/// Scalars are replaced wholesale when the override's raw key set names the
/// field. Sequences are cleared before appending when the field carries the
/// overriding marker or the base still equals the statically known default;
/// otherwise the override's elements are appended.
fn render_merge_impl(out: &mut String, schema: &ValidatedSchema, section: &str) {
    out.push_str(&format!("impl Merge for model::{} {{\n", capitalize(section)));
    out.push_str("    fn merge(&mut self, rhs: &mut Self, map: Option<&serde_yaml::Mapping>) {\n");
    out.push_str("        if let Some(m) = map {\n");
    for setting in structured_fields(schema, section) {
        let Some(ty) = setting.logical_type.structured() else {
            continue;
        };
        let name = &setting.name;
        out.push_str(&format!("            if m.contains_key(\"{name}\") {{\n"));
        if ty.is_sequence() {
            out.push_str(&format!(
                "                if is_overriding(m, \"{name}\") || self.{name} == \
                 DEFAULT_CONFIG.{section}.{name} {{\n"
            ));
            out.push_str(&format!("                    self.{name}.clear();\n"));
            out.push_str("                }\n");
            out.push_str(&format!(
                "                merge_vec(&mut self.{name}, &mut rhs.{name});\n"
            ));
        } else {
            out.push_str(&format!("                self.{name} = rhs.{name}.to_owned();\n"));
        }
        out.push_str("            }\n");
    }
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n\n");
}

/// Renders the whole-model merge delegating per section.
fn render_model_merge(out: &mut String, sections: &[&str]) {
    out.push_str("impl Merge for model::ResolverSettings {\n");
    out.push_str("    fn merge(&mut self, rhs: &mut Self, map: Option<&serde_yaml::Mapping>) {\n");
    out.push_str("        if let Some(m) = map {\n");
    for section in sections {
        out.push_str(&format!("            if let Some(s) = m.get(\"{section}\") {{\n"));
        out.push_str("                if s.is_mapping() {\n");
        out.push_str(&format!(
            "                    self.{section}.merge(&mut rhs.{section}, s.as_mapping());\n"
        ));
        out.push_str("                }\n");
        out.push_str("            }\n");
    }
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n\n");
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the section's settings that appear in the structured model.
fn structured_fields<'a>(schema: &'a ValidatedSchema, section: &str) -> Vec<&'a Setting> {
    schema
        .section_settings(section)
        .into_iter()
        .filter(|setting| {
            setting.logical_type != LogicalType::Command && !setting.skip_structured
        })
        .collect()
}

/// Capitalizes the first character of a section name.
fn capitalize(section: &str) -> String {
    let mut chars = section.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
