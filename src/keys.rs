// Pure input mapping shared by the event handlers and host tests.
use crate::constants::*;
use kova_core::{CardId, DeckKey, ToggleKey, ToggleOption};

#[inline]
pub fn toggle_key(key: &str) -> Option<ToggleKey> {
    match key {
        "ArrowLeft" => Some(ToggleKey::ArrowLeft),
        "ArrowRight" => Some(ToggleKey::ArrowRight),
        "Enter" | " " | "Spacebar" => Some(ToggleKey::Activate),
        _ => None,
    }
}

#[inline]
pub fn deck_key(key: &str) -> Option<DeckKey> {
    match key {
        "Enter" | " " | "Spacebar" => Some(DeckKey::Activate),
        "Escape" | "Esc" => Some(DeckKey::Close),
        _ => None,
    }
}

/// Wheel delta in CSS pixels for a `WheelEvent.deltaMode`.
pub fn wheel_delta_px(delta: f32, mode: u32, viewport_height: f32) -> f32 {
    match mode {
        WHEEL_DELTA_LINE => delta * WHEEL_LINE_PX,
        WHEEL_DELTA_PAGE => delta * viewport_height,
        _ => delta,
    }
}

pub fn card_element_id(id: CardId) -> String {
    format!("{CARD_ID_PREFIX}{id}")
}

/// Card id from a card element id such as `deck-card-3`.
pub fn card_id_from_element_id(element_id: &str) -> Option<CardId> {
    element_id.strip_prefix(CARD_ID_PREFIX)?.parse().ok()
}

pub fn toggle_option_for_element_id(element_id: &str) -> Option<ToggleOption> {
    match element_id {
        TOGGLE_OPTION_A_ID => Some(ToggleOption::A),
        TOGGLE_OPTION_B_ID => Some(ToggleOption::B),
        _ => None,
    }
}

pub fn toggle_option_element_id(option: ToggleOption) -> &'static str {
    match option {
        ToggleOption::A => TOGGLE_OPTION_A_ID,
        ToggleOption::B => TOGGLE_OPTION_B_ID,
    }
}

/// Indicator centre as a percentage of the track width.
pub fn indicator_left_percent(x: f32) -> f32 {
    (x / TOGGLE_TRACK_WIDTH * 100.0).clamp(0.0, 100.0)
}
