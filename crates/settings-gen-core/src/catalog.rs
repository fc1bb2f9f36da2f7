// crates/settings-gen-core/src/catalog.rs
// ============================================================================
// Module: Type Catalog
// Description: Per-target facets for every logical setting type.
// Purpose: Keep adding a new logical type a single localized change.
// Dependencies: settings-gen-core schema module
// ============================================================================

//! ## Overview
//! The catalog maps each [`LogicalType`] to its per-target facets: the
//! documentation type labels for both styles, the structured representation,
//! the dedicated validator when one applies, and the default rendering rules
//! for both documentation styles. Every mapping is a total match over the
//! closed enumeration, so an unhandled type is a compile error rather than a
//! silently emitted placeholder.

use crate::schema::LogicalType;

// ============================================================================
// SECTION: Structured Representation
// ============================================================================

/// Structured representation type backing a logical type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuredType {
    /// Boolean scalar.
    Bool,
    /// Unsigned integer scalar.
    Uint64,
    /// Floating point scalar.
    Double,
    /// String scalar.
    String,
    /// Sequence of strings.
    StringVec,
    /// Sequence of forward zone mappings.
    ForwardZoneVec,
    /// Sequence of auth zone mappings.
    AuthZoneVec,
}

impl StructuredType {
    /// Returns the Rust type name used in generated model code and as the
    /// type tag in single-key conversion.
    #[must_use]
    pub const fn rust_name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Uint64 => "u64",
            Self::Double => "f64",
            Self::String => "String",
            Self::StringVec => "Vec<String>",
            Self::ForwardZoneVec => "Vec<ForwardZone>",
            Self::AuthZoneVec => "Vec<AuthZone>",
        }
    }

    /// Returns true for sequence-valued representations.
    #[must_use]
    pub const fn is_sequence(self) -> bool {
        matches!(self, Self::StringVec | Self::ForwardZoneVec | Self::AuthZoneVec)
    }
}

// ============================================================================
// SECTION: Field Validators
// ============================================================================

/// Dedicated validator applied to a structured field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValidator {
    /// Subnet syntax check per element.
    Subnet,
    /// Socket address syntax check per element.
    SocketAddress,
    /// Nested per-element `validate` call for mapping lists.
    Element,
}

// ============================================================================
// SECTION: Logical Type Facets
// ============================================================================

impl LogicalType {
    /// Returns the structured representation, or `None` for legacy-only
    /// command entries.
    #[must_use]
    pub const fn structured(self) -> Option<StructuredType> {
        match self {
            Self::Command => None,
            Self::Bool => Some(StructuredType::Bool),
            Self::Uint64 => Some(StructuredType::Uint64),
            Self::Double => Some(StructuredType::Double),
            Self::String => Some(StructuredType::String),
            Self::ListStrings | Self::ListSocketAddresses | Self::ListSubnets => {
                Some(StructuredType::StringVec)
            }
            Self::ListForwardZones => Some(StructuredType::ForwardZoneVec),
            Self::ListAuthZones => Some(StructuredType::AuthZoneVec),
        }
    }

    /// Returns the legacy-documentation type label.
    ///
    /// Command entries never reach the documentation emitter; their label is
    /// defined for totality only.
    #[must_use]
    pub const fn legacy_doc_label(self) -> &'static str {
        match self {
            Self::Bool => "Boolean",
            Self::Command => "Command",
            Self::Double => "Double",
            Self::String => "String",
            Self::Uint64 => "Integer",
            Self::ListSocketAddresses => "Comma separated list or IPs of IP:port combinations",
            Self::ListSubnets => {
                "Comma separated list of IP addresses or subnets, negation supported"
            }
            Self::ListStrings => "Comma separated list of strings",
            Self::ListForwardZones => "Comma separated list of 'zonename=IP' pairs",
            Self::ListAuthZones => "Comma separated list of 'zonename=filename' pairs",
        }
    }

    /// Returns the structured-documentation type label.
    #[must_use]
    pub const fn structured_doc_label(self) -> &'static str {
        match self {
            Self::Bool => "Boolean",
            Self::Command => "Command",
            Self::Double => "Double",
            Self::String => "String",
            Self::Uint64 => "Integer",
            Self::ListSocketAddresses => {
                "Sequence of `Socket Address`_ (IP or IP:port combinations)"
            }
            Self::ListSubnets => {
                "Sequence of `Subnet`_ (IP addresses or subnets, negation supported)"
            }
            Self::ListStrings => "Sequence of strings",
            Self::ListForwardZones => "Sequence of `Forward Zone`_",
            Self::ListAuthZones => "Sequence of `Auth Zone`_",
        }
    }

    /// Returns the dedicated validator for this type, when one applies.
    #[must_use]
    pub const fn validator(self) -> Option<FieldValidator> {
        match self {
            Self::ListSubnets => Some(FieldValidator::Subnet),
            Self::ListSocketAddresses => Some(FieldValidator::SocketAddress),
            Self::ListForwardZones | Self::ListAuthZones => Some(FieldValidator::Element),
            Self::Bool
            | Self::Command
            | Self::Double
            | Self::String
            | Self::Uint64
            | Self::ListStrings => None,
        }
    }

    /// Renders a default value for the legacy documentation style.
    ///
    /// Booleans render as yes/no; empty values render as "(empty)".
    #[must_use]
    pub fn legacy_doc_default(self, raw: &str) -> String {
        if self == Self::Bool {
            return if raw == "false" { "no".to_string() } else { "yes".to_string() };
        }
        if raw.is_empty() {
            return "(empty)".to_string();
        }
        raw.to_string()
    }

    /// Renders a default value for the structured documentation style.
    ///
    /// Scalars render as literals, empty strings as "(empty)", and lists
    /// element-wise with quoting for elements containing `:` or `!`.
    #[must_use]
    pub fn structured_doc_default(self, raw: &str) -> String {
        match self {
            Self::Bool | Self::Uint64 | Self::Double => format!("``{raw}``"),
            Self::String if raw.is_empty() => "(empty)".to_string(),
            Self::String => format!("``{raw}``"),
            Self::Command
            | Self::ListStrings
            | Self::ListSocketAddresses
            | Self::ListSubnets
            | Self::ListForwardZones
            | Self::ListAuthZones => {
                let mut rendered = String::new();
                for element in split_list_default(raw) {
                    if !rendered.is_empty() {
                        rendered.push_str(", ");
                    }
                    if element.contains(':') || element.contains('!') {
                        rendered.push('\'');
                        rendered.push_str(element);
                        rendered.push('\'');
                    } else {
                        rendered.push_str(element);
                    }
                }
                format!("``[{rendered}]``")
            }
        }
    }
}

// ============================================================================
// SECTION: List Defaults
// ============================================================================

/// Splits a delimiter-separated list default into its elements.
///
/// Elements are separated by runs of spaces, tabs, or commas; empty tokens
/// are skipped.
#[must_use]
pub fn split_list_default(raw: &str) -> Vec<&str> {
    raw.split([' ', '\t', ',']).filter(|element| !element.is_empty()).collect()
}
