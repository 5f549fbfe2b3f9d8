// DOM contract between the shell and index.html. Section and animated
// element ids come from `kova_core::presets::ids`; the ones below belong to
// the interactive widgets.

// Card deck
pub const CARD_ID_PREFIX: &str = "deck-card-"; // followed by the card id
pub const CARD_CLOSE_CLASS: &str = "deck-card-close";
pub const CARD_BODY_CLASS: &str = "deck-card-body";
pub const CARD_EXPANDED_CLASS: &str = "is-expanded";

// Binary toggle
pub const TOGGLE_OPTION_A_ID: &str = "toggle-option-a";
pub const TOGGLE_OPTION_B_ID: &str = "toggle-option-b";
pub const TOGGLE_INDICATOR_ID: &str = "toggle-indicator";
pub const TOGGLE_TRACK_WIDTH: f32 = 320.0; // track units used by ToggleConfig anchors
pub const LABEL_ON_INDICATOR_CLASS: &str = "on-indicator";

// Content panel
pub const PANEL_ID: &str = "solution-panel";
pub const PANEL_TITLE_ID: &str = "solution-panel-title";
pub const PANEL_BODY_ID: &str = "solution-panel-body";
pub const PANEL_CHILD_CLASS: &str = "panel-child";

// Rotating text
pub const ROTATING_BASE_ID: &str = "rotating-base";
pub const ROTATING_WORD_ID: &str = "rotating-word";

// Media query for the user's motion preference
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// WheelEvent.deltaMode conversion
pub const WHEEL_DELTA_LINE: u32 = 1;
pub const WHEEL_DELTA_PAGE: u32 = 2;
pub const WHEEL_LINE_PX: f32 = 16.0; // one "line" in Firefox's line mode
