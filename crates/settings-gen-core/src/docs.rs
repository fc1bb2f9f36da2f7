// crates/settings-gen-core/src/docs.rs
// ============================================================================
// Module: Documentation Emitter
// Description: Renders legacy-style and structured-style reference docs.
// Purpose: Keep both documentation styles cross-linked as settings are
//          renamed, deprecated, or restructured.
// Dependencies: settings-gen-core schema and catalog modules
// ============================================================================

//! ## Overview
//! Two independent passes over the validated settings. The legacy pass
//! iterates in schema order and anchors entries by legacy name; the
//! structured pass iterates sorted by `(section, name)` and anchors entries
//! by field path. Documentation bodies are authored against legacy anchors;
//! the structured pass rewrites embedded cross-references to structured
//! anchors, replacing longest matching keys first so a short key can never
//! corrupt a longer key's reference.

use crate::schema::LogicalType;
use crate::schema::Setting;
use crate::schema::ValidatedSchema;
use crate::schema::VersionNote;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Cross-reference marker prefix used in documentation bodies.
const REF_PREFIX: &str = ":ref:`setting-";

// ============================================================================
// SECTION: Legacy-Style Pass
// ============================================================================

/// Renders the legacy-style reference document.
#[must_use]
pub fn render_legacy(schema: &ValidatedSchema, preamble: &str) -> String {
    let mut out = String::new();
    render_preamble(&mut out, "legacy-docs-preamble", preamble);
    for setting in schema.settings() {
        if setting.logical_type == LogicalType::Command || setting.doc_suppressed() {
            continue;
        }
        let legacy = setting.legacy_key();
        out.push_str(&format!(".. _setting-{legacy}:\n\n"));
        render_heading(&mut out, legacy, '~');
        render_version_notes(&mut out, setting);
        if let Some(doc_rst) = &setting.doc_rst {
            out.push_str(doc_rst.trim());
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&format!("-  {}\n", setting.logical_type.legacy_doc_label()));
        let rendered = setting.doc_default.clone().unwrap_or_else(|| {
            setting.logical_type.legacy_doc_default(&setting.default)
        });
        out.push_str(&format!("-  Default: {rendered}\n\n"));
        if setting.skip_structured {
            out.push_str("- YAML setting does not exist\n\n");
        } else {
            out.push_str(&format!(
                "- YAML setting: :ref:`setting-yaml-{}`\n\n",
                setting.field_path()
            ));
        }
        out.push_str(setting.doc.trim());
        out.push_str("\n\n");
    }
    out
}

// ============================================================================
// SECTION: Structured-Style Pass
// ============================================================================

/// Renders the structured-style reference document.
#[must_use]
pub fn render_structured(schema: &ValidatedSchema, preamble: &str) -> String {
    let mut sorted: Vec<&Setting> = schema.settings().iter().collect();
    sorted.sort_by(|left, right| {
        (&left.section, &left.name).cmp(&(&right.section, &right.name))
    });

    let mut out = String::new();
    render_preamble(&mut out, "structured-docs-preamble", preamble);
    for setting in sorted {
        if setting.logical_type == LogicalType::Command
            || setting.doc_suppressed()
            || setting.skip_structured
        {
            continue;
        }
        let path = setting.field_path();
        out.push_str(&format!(".. _setting-yaml-{path}:\n\n"));
        render_heading(&mut out, &path, '^');
        render_version_notes(&mut out, setting);
        if let Some(doc_rst) = &setting.doc_rst {
            out.push_str(&rewrite_cross_references(schema, doc_rst.trim()));
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&format!("-  {}\n", setting.logical_type.structured_doc_label()));
        let rendered = setting.doc_default.clone().unwrap_or_else(|| {
            setting.logical_type.structured_doc_default(&setting.default)
        });
        out.push_str(&format!("-  Default: {rendered}\n\n"));
        out.push_str(&format!("- Old style setting: :ref:`setting-{}`\n\n", setting.legacy_key()));
        let body = setting.doc_new.as_deref().unwrap_or(setting.doc.as_str());
        out.push_str(&rewrite_cross_references(schema, body.trim()));
        out.push_str("\n\n");
    }
    out
}

// ============================================================================
// SECTION: Cross-Reference Rewriting
// ============================================================================

/// Rewrites legacy-anchor cross-references to structured anchors.
///
/// Every replacement spans the full marker up to and including the closing
/// backtick, so a key that is a prefix of another key can never corrupt the
/// longer key's reference. Keys without a structured counterpart are left
/// pointing at the legacy anchor. Longest keys are replaced first to keep
/// the pass order deterministic.
#[must_use]
pub fn rewrite_cross_references(schema: &ValidatedSchema, text: &str) -> String {
    let mut keys = extract_ref_keys(text);
    keys.sort_by(|left, right| right.len().cmp(&left.len()).then_with(|| left.cmp(right)));
    keys.dedup();

    let mut rewritten = text.to_string();
    for key in keys {
        let target = schema.settings().iter().find(|setting| {
            setting.legacy_key() == key
                && setting.logical_type != LogicalType::Command
                && !setting.skip_structured
        });
        if let Some(setting) = target {
            let from = format!("{REF_PREFIX}{key}`");
            let to = format!(":ref:`setting-yaml-{}`", setting.field_path());
            rewritten = rewritten.replace(&from, &to);
        }
    }
    rewritten
}

/// Extracts the legacy keys referenced by cross-reference markers.
fn extract_ref_keys(text: &str) -> Vec<String> {
    let mut keys = Vec::new();
    let mut rest = text;
    while let Some(position) = rest.find(REF_PREFIX) {
        let after = &rest[position + REF_PREFIX.len()..];
        let Some(end) = after.find('`') else {
            break;
        };
        keys.push(after[..end].to_string());
        rest = &after[end..];
    }
    keys
}

// ============================================================================
// SECTION: Shared Rendering
// ============================================================================

/// Renders the generated-file banner and verbatim preamble block.
fn render_preamble(out: &mut String, label: &str, preamble: &str) {
    out.push_str(".. THIS IS A GENERATED FILE. DO NOT EDIT. Generated by settings-gen.\n");
    out.push_str(&format!("   START INCLUDE {label}\n\n"));
    out.push_str(preamble);
    out.push_str(&format!(".. END INCLUDE {label}\n\n"));
}

/// Renders a heading with its underline.
fn render_heading(out: &mut String, title: &str, underline: char) {
    out.push_str(&format!("``{title}``\n"));
    out.push_str(&String::from(underline).repeat(title.len() + 4));
    out.push('\n');
}

/// Renders version and deprecation annotations for a setting.
fn render_version_notes(out: &mut String, setting: &Setting) {
    render_directive(out, "versionadded", &setting.version_added);
    render_directive(out, "versionchanged", &setting.version_changed);
    render_directive(out, "deprecated", &setting.deprecated);
}

/// Renders one annotation directive for every note in order.
fn render_directive(out: &mut String, directive: &str, notes: &[VersionNote]) {
    for note in notes {
        match note {
            VersionNote::Version(version) => {
                out.push_str(&format!(".. {directive}:: {version}\n"));
            }
            VersionNote::Annotated {
                version,
                note,
            } => {
                out.push_str(&format!(".. {directive}:: {version}\n\n"));
                out.push_str(&format!("  {}\n", note.trim()));
            }
        }
    }
}
