// Host-side tests for pure input functions: wheel normalisation and the
// element ids the pointer handlers resolve.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod keys {
    include!("../src/keys.rs");
}

use constants::*;
use keys::*;
use kova_core::ToggleOption;

#[test]
fn wheel_deltas_are_normalised_to_pixels() {
    assert_eq!(wheel_delta_px(120.0, 0, 800.0), 120.0);
    assert_eq!(wheel_delta_px(3.0, WHEEL_DELTA_LINE, 800.0), 48.0);
    assert_eq!(wheel_delta_px(-1.0, WHEEL_DELTA_PAGE, 800.0), -800.0);
    // Unknown modes pass through untouched.
    assert_eq!(wheel_delta_px(7.0, 9, 800.0), 7.0);
}

#[test]
fn card_ids_round_trip_through_element_ids() {
    for id in [1, 5, 42] {
        let element = card_element_id(id);
        assert!(element.starts_with(CARD_ID_PREFIX));
        assert_eq!(card_id_from_element_id(&element), Some(id));
    }
    assert_eq!(card_element_id(3), "deck-card-3");
}

#[test]
fn malformed_card_ids_are_rejected() {
    assert_eq!(card_id_from_element_id("deck-card-x"), None);
    assert_eq!(card_id_from_element_id("deck-card-"), None);
    assert_eq!(card_id_from_element_id("card-3"), None);
    assert_eq!(card_id_from_element_id(""), None);
}

#[test]
fn toggle_options_round_trip_through_element_ids() {
    for option in [ToggleOption::A, ToggleOption::B] {
        let id = toggle_option_element_id(option);
        assert_eq!(toggle_option_for_element_id(id), Some(option));
    }
    assert_eq!(toggle_option_for_element_id(TOGGLE_INDICATOR_ID), None);
}

#[test]
fn indicator_position_is_a_clamped_track_percentage() {
    assert_eq!(indicator_left_percent(60.0), 18.75);
    assert_eq!(indicator_left_percent(160.0), 50.0);
    assert_eq!(indicator_left_percent(TOGGLE_TRACK_WIDTH), 100.0);
    assert_eq!(indicator_left_percent(-20.0), 0.0);
    assert_eq!(indicator_left_percent(400.0), 100.0);
}
