// crates/settings-gen-core/tests/defaults_unit.rs
// ============================================================================
// Module: Default-Equivalence Engine Tests
// Description: Tests for natural-zero classification and helper synthesis.
// Purpose: Ensure serialization-default metadata matches each field's literal
//          default across both representations.
// ============================================================================
//! ## Overview
//! Validates natural-zero classification, serde metadata selection, and the
//! synthesized producer/predicate helper pairs.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use settings_gen_core::LogicalType;
use settings_gen_core::catalog::StructuredType;
use settings_gen_core::catalog::split_list_default;
use settings_gen_core::defaults::DefaultPolicy;
use settings_gen_core::defaults::classify;
use settings_gen_core::defaults::helper_functions;
use settings_gen_core::defaults::is_natural_zero;
use settings_gen_core::defaults::serde_attr;

mod common;
use crate::common::setting;

type TestResult = Result<(), String>;

// ============================================================================
// SECTION: Natural Zero Classification
// ============================================================================

#[test]
fn scalar_natural_zeros() {
    assert!(is_natural_zero(StructuredType::Bool, "false"));
    assert!(!is_natural_zero(StructuredType::Bool, "true"));
    assert!(is_natural_zero(StructuredType::Uint64, "0"));
    assert!(is_natural_zero(StructuredType::Uint64, ""));
    assert!(!is_natural_zero(StructuredType::Uint64, "2000"));
    assert!(is_natural_zero(StructuredType::Double, "0.0"));
    assert!(!is_natural_zero(StructuredType::Double, "0.25"));
    assert!(is_natural_zero(StructuredType::String, ""));
    assert!(!is_natural_zero(StructuredType::String, "no"));
}

#[test]
fn sequences_are_never_natural_zero() {
    // List defaults always get a dedicated helper pair, even when empty.
    assert!(!is_natural_zero(StructuredType::StringVec, ""));
    assert!(!is_natural_zero(StructuredType::ForwardZoneVec, ""));
    assert!(!is_natural_zero(StructuredType::AuthZoneVec, ""));
}

// ============================================================================
// SECTION: Policy Selection
// ============================================================================

#[test]
fn boolean_true_default_is_not_elided() -> TestResult {
    // A Boolean defaulting to true must keep serializing the value true,
    // since the structured zero value for Boolean is false.
    let entry = setting("outgoing", "dont_query", LogicalType::Bool, "true");
    if classify(&entry) != Some(DefaultPolicy::SharedBool) {
        return Err("expected the shared Bool helper policy".to_string());
    }
    let attr = serde_attr(&entry).ok_or("missing serde attribute")?;
    if !attr.contains("crate::Bool::<true>::value") || !attr.contains("crate::if_true") {
        return Err(format!("unexpected attribute: {attr}"));
    }
    Ok(())
}

#[test]
fn trivial_defaults_use_generic_metadata() -> TestResult {
    let entry = setting("incoming", "port", LogicalType::Uint64, "0");
    if classify(&entry) != Some(DefaultPolicy::Trivial) {
        return Err("zero integer default should be trivial".to_string());
    }
    let attr = serde_attr(&entry).ok_or("missing serde attribute")?;
    if attr != "#[serde(default, skip_serializing_if = \"crate::is_default\")]" {
        return Err(format!("unexpected attribute: {attr}"));
    }
    if helper_functions(&entry).is_some() {
        return Err("trivial fields must not synthesize helpers".to_string());
    }
    Ok(())
}

#[test]
fn nonzero_integers_share_a_parameterized_helper() -> TestResult {
    let entry = setting("recursor", "max_cache_entries", LogicalType::Uint64, "1000000");
    if classify(&entry) != Some(DefaultPolicy::SharedUint("1000000".to_string())) {
        return Err("expected the shared U64 helper policy".to_string());
    }
    let attr = serde_attr(&entry).ok_or("missing serde attribute")?;
    if !attr.contains("crate::U64::<1000000>::value") {
        return Err(format!("unexpected attribute: {attr}"));
    }
    Ok(())
}

#[test]
fn command_entries_have_no_policy() {
    let entry = setting("commands", "show_config", LogicalType::Command, "");
    assert!(classify(&entry).is_none());
    assert!(serde_attr(&entry).is_none());
    assert!(helper_functions(&entry).is_none());
}

// ============================================================================
// SECTION: Helper Synthesis
// ============================================================================

#[test]
fn string_default_gets_dedicated_pair() -> TestResult {
    let entry = setting("recursor", "socket_owner", LogicalType::String, "resolver");
    let helper = helper_functions(&entry).ok_or("expected helper functions")?;
    if !helper.contains("fn default_value_recursor_socket_owner() -> String") {
        return Err("missing producer".to_string());
    }
    if !helper.contains("String::from(\"resolver\")") {
        return Err("producer must return the literal".to_string());
    }
    if !helper.contains("fn default_value_equal_recursor_socket_owner(value: &str)") {
        return Err("missing equality predicate".to_string());
    }
    Ok(())
}

#[test]
fn confdir_sentinel_resolves_to_build_time_constant() -> TestResult {
    let entry = setting("recursor", "config_dir", LogicalType::String, "SYSCONFDIR");
    let helper = helper_functions(&entry).ok_or("expected helper functions")?;
    if !helper.contains("String::from(env!(\"SYSCONFDIR\"))") {
        return Err("sentinel must resolve to the build-time path constant".to_string());
    }
    if helper.contains("\"SYSCONFDIR\")\n") {
        return Err("sentinel must not be emitted as a quoted literal".to_string());
    }
    Ok(())
}

#[test]
fn list_default_splits_into_elements() -> TestResult {
    let elements = split_list_default("127.0.0.1, 10.0.0.0/8");
    if elements != ["127.0.0.1", "10.0.0.0/8"] {
        return Err(format!("unexpected elements: {elements:?}"));
    }
    let entry = setting("incoming", "allow_from", LogicalType::ListSubnets, "127.0.0.1, 10.0.0.0/8");
    let helper = helper_functions(&entry).ok_or("expected helper functions")?;
    if !helper.contains("String::from(\"127.0.0.1\"),")
        || !helper.contains("String::from(\"10.0.0.0/8\"),")
    {
        return Err("producer must return the split elements".to_string());
    }
    Ok(())
}

#[test]
fn list_split_skips_empty_tokens() {
    assert_eq!(split_list_default("a,,  b,\tc, "), ["a", "b", "c"]);
    assert!(split_list_default("").is_empty());
}

#[test]
fn mapping_lists_default_to_empty_sequences() -> TestResult {
    let entry = setting("recursor", "forward_zones", LogicalType::ListForwardZones, "");
    let helper = helper_functions(&entry).ok_or("expected helper functions")?;
    if !helper.contains("fn default_value_recursor_forward_zones() -> Vec<model::ForwardZone>") {
        return Err("missing producer".to_string());
    }
    if !helper.contains("Vec::new()") {
        return Err("mapping lists must default to an empty sequence".to_string());
    }
    Ok(())
}

#[test]
fn nonzero_double_gets_typed_producer() -> TestResult {
    let entry = setting("recursor", "latency_factor", LogicalType::Double, "0.25");
    let helper = helper_functions(&entry).ok_or("expected helper functions")?;
    if !helper.contains("fn default_value_recursor_latency_factor() -> f64") {
        return Err("producer must be typed f64".to_string());
    }
    if !helper.contains("    0.25\n") {
        return Err("producer must return the literal".to_string());
    }
    Ok(())
}

#[test]
fn integer_form_double_default_is_normalized() -> TestResult {
    let entry = setting("recursor", "latency_limit", LogicalType::Double, "2");
    let helper = helper_functions(&entry).ok_or("expected helper functions")?;
    if !helper.contains("    2.0\n") {
        return Err("integer-form default must normalize to a float literal".to_string());
    }
    Ok(())
}

#[test]
fn equality_predicates_compare_against_their_own_producer() -> TestResult {
    // Reflexivity of the pair: every predicate is defined in terms of the
    // producer it is paired with, so the producer's output always satisfies it.
    let entries = vec![
        setting("incoming", "allow_from", LogicalType::ListSubnets, "127.0.0.1, 10.0.0.0/8"),
        setting("recursor", "socket_owner", LogicalType::String, "resolver"),
        setting("recursor", "forward_zones", LogicalType::ListForwardZones, ""),
        setting("recursor", "latency_factor", LogicalType::Double, "0.25"),
    ];
    for entry in entries {
        let helper = helper_functions(&entry).ok_or("expected helper functions")?;
        let base = format!("{}_{}", entry.section, entry.name);
        let producer_call = format!("default_value_{base}()");
        let predicate = format!("fn default_value_equal_{base}(");
        let Some(predicate_body) = helper.split(&predicate).nth(1) else {
            return Err(format!("missing predicate for {base}"));
        };
        if !predicate_body.contains(&producer_call) {
            return Err(format!("predicate for {base} does not call its producer"));
        }
    }
    Ok(())
}
