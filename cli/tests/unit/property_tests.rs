//! Property-based tests for port parsing, prefix validation and rendering.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::Path;

use proptest::prelude::*;

use portfleet_cli::application::services::validate::validate;
use portfleet_cli::domain::spec::{parse_port_list, validate_name_prefix};
use portfleet_cli::domain::unit::{render, unit_name};

use crate::helpers::{UNIT_DIR, ocr_spec};
use crate::mocks::FakeHost;

// ============================================================================
// parse_port_list() property tests
// ============================================================================

proptest! {
    /// An inclusive range expands to every port in it, ascending.
    #[test]
    fn prop_range_expands_inclusively(lo in 1u16..60000, len in 0u16..200) {
        let hi = lo + len;
        let ports = parse_port_list(&format!("{lo}-{hi}")).unwrap();
        prop_assert_eq!(ports.len(), usize::from(len) + 1);
        prop_assert_eq!(ports.first().copied(), Some(lo));
        prop_assert_eq!(ports.last().copied(), Some(hi));
        prop_assert!(ports.windows(2).all(|w| w[1] == w[0] + 1));
    }

    /// A descending range is always rejected.
    #[test]
    fn prop_descending_range_rejected(hi in 1u16..60000, gap in 1u16..1000) {
        let lo = hi + gap;
        let expr = format!("{lo}-{hi}");
        prop_assert!(parse_port_list(&expr).is_err());
    }

    /// A comma list of single ports round-trips in order, duplicates kept.
    #[test]
    fn prop_comma_list_preserves_order(ports in prop::collection::vec(1u16..=u16::MAX, 1..20)) {
        let expr = ports.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
        prop_assert_eq!(parse_port_list(&expr).unwrap(), ports);
    }

    /// Values above the port range never parse.
    #[test]
    fn prop_out_of_range_rejected(value in 65536u32..1_000_000) {
        prop_assert!(parse_port_list(&value.to_string()).is_err());
    }
}

// ============================================================================
// validate_name_prefix() property tests
// ============================================================================

proptest! {
    /// Letters, digits and hyphens, starting with a letter and not ending
    /// with a digit, are accepted.
    #[test]
    fn prop_well_formed_prefix_accepted(prefix in "[a-z][a-z0-9-]{0,30}[a-z-]") {
        prop_assert!(validate_name_prefix(&prefix).is_ok(), "rejected {}", prefix);
    }

    /// A trailing digit would make `prefix + port` ambiguous.
    #[test]
    fn prop_trailing_digit_rejected(prefix in "[a-z][a-z-]{0,10}[0-9]") {
        prop_assert!(validate_name_prefix(&prefix).is_err(), "accepted {}", prefix);
    }

    /// Path separators and dots never make it into a unit name.
    #[test]
    fn prop_path_characters_rejected(
        head in "[a-z]{1,8}",
        sep in "[/.\\\\ ]",
        tail in "[a-z]{0,8}-",
    ) {
        let prefix = format!("{head}{sep}{tail}");
        prop_assert!(validate_name_prefix(&prefix).is_err(), "accepted {}", prefix);
    }
}

// ============================================================================
// render() property tests
// ============================================================================

proptest! {
    /// Rendering is a pure function of spec and port.
    #[test]
    fn prop_render_is_deterministic(port in 1u16..=u16::MAX) {
        let spec = validate(&ocr_spec(&[port]), &FakeHost::default()).unwrap();
        let a = render(&spec, Path::new(UNIT_DIR), port).unwrap();
        let b = render(&spec, Path::new(UNIT_DIR), port).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.name, unit_name("ocr-", port));
        let port_arg = format!(" --port {port}\n");
        prop_assert!(a.rendered_content.contains(&port_arg));
    }

    /// Every instance of a fleet gets a distinct definition path.
    #[test]
    fn prop_fleet_paths_are_distinct(ports in prop::collection::btree_set(1u16..=u16::MAX, 1..10)) {
        let ports: Vec<u16> = ports.into_iter().collect();
        let spec = validate(&ocr_spec(&ports), &FakeHost::default()).unwrap();
        let paths: std::collections::BTreeSet<_> = ports
            .iter()
            .map(|&p| render(&spec, Path::new(UNIT_DIR), p).unwrap().definition_path)
            .collect();
        prop_assert_eq!(paths.len(), ports.len());
    }
}
