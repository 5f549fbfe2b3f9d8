// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use kova_core::constants::*;
use kova_core::{BinaryToggle, Marker, MotionPreference, ToggleConfig};

#[test]
#[allow(clippy::assertions_on_constants)]
fn breakpoints_are_ordered() {
    assert!(BREAKPOINT_MOBILE > 0.0);
    assert!(BREAKPOINT_MOBILE < BREAKPOINT_TABLET);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn toggle_anchors_sit_in_order_on_the_track() {
    let anchors = [
        TOGGLE_ANCHOR_A,
        TOGGLE_PREVIEW_A,
        TOGGLE_ANCHOR_CENTER,
        TOGGLE_PREVIEW_B,
        TOGGLE_ANCHOR_B,
    ];
    assert!(anchors.windows(2).all(|w| w[0] < w[1]), "{anchors:?}");
    assert!(anchors.iter().all(|x| (0.0..=TOGGLE_TRACK_WIDTH).contains(x)));
    assert_eq!(TOGGLE_ANCHOR_CENTER, TOGGLE_TRACK_WIDTH / 2.0);

    assert!(TOGGLE_SCALE_LOCKED > TOGGLE_SCALE_PREVIEW);
    assert!(TOGGLE_SCALE_PREVIEW > TOGGLE_SCALE_IDLE);
    assert!(BinaryToggle::new(ToggleConfig::default(), MotionPreference::Full).is_ok());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timings_leave_room_for_their_transitions() {
    assert!(ROTATING_TRANSITION_MS < ROTATING_INTERVAL_MS);
    assert!(PANEL_EXIT_MS < PANEL_ENTER_MS);
    assert!(PANEL_CHILD_DELAY_MS + PANEL_CHILD_MS <= PANEL_ENTER_MS);
    assert!(DECK_INIT_DELAY_MS < DECK_ENTRANCE_MS);
    assert!(DURATION_FAST_SEC < DURATION_NORMAL_SEC);
    assert!(DURATION_NORMAL_SEC < DURATION_SLOW_SEC);
    assert!(DURATION_SLOW_SEC < DURATION_ENTRANCE_SEC);
    assert!(SCROLL_DURATION_SEC > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn deck_tiers_push_wider_screens_further() {
    assert!(DECK_IDLE_MOBILE[0] < DECK_IDLE_TABLET[0]);
    assert!(DECK_IDLE_TABLET[0] <= DECK_IDLE_DESKTOP[0]);
    assert!(DECK_PUSHED_MOBILE[0] < DECK_PUSHED_WIDE[0]);
    assert!(DECK_PUSHED_MOBILE[2] < DECK_PUSHED_WIDE[2]);
    assert!(DECK_EXPANDED_Z > DECK_PUSHED_Z);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn vacuum_exit_fades_out_before_it_finishes() {
    assert!(VACUUM_K_OPACITY >= 1.0);
    assert!(VACUUM_SCALE_MIN > 0.0 && VACUUM_SCALE_MIN < 1.0);
    assert!(PROGRESS_EPSILON > 0.0 && PROGRESS_EPSILON < 0.01);
    // The last of five problem cards still starts before the exit ends.
    assert!(PROBLEM_VACUUM_STAGGER * 4.0 < 1.0);
}

#[test]
fn default_trigger_markers_parse() {
    for marker in [DEFAULT_TRIGGER_START, DEFAULT_TRIGGER_END] {
        assert!(matches!(marker.parse::<Marker>(), Ok(Marker::Edges { .. })), "{marker}");
    }
}

#[test]
fn widget_ids_do_not_collide() {
    let ids = [
        TOGGLE_OPTION_A_ID,
        TOGGLE_OPTION_B_ID,
        TOGGLE_INDICATOR_ID,
        PANEL_ID,
        PANEL_TITLE_ID,
        PANEL_BODY_ID,
        ROTATING_BASE_ID,
        ROTATING_WORD_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.starts_with(CARD_ID_PREFIX), "{a}");
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
