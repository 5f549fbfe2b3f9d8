// Shared tuning constants. Every value here is a default for a config struct;
// nothing reads these directly at runtime except the `Default` impls.

// Design-system durations (seconds)
pub const DURATION_FAST_SEC: f32 = 0.3;
pub const DURATION_NORMAL_SEC: f32 = 0.6;
pub const DURATION_SLOW_SEC: f32 = 1.2;
pub const DURATION_ENTRANCE_SEC: f32 = 1.5;

// Smooth scroll
pub const SCROLL_DURATION_SEC: f32 = 1.2;
pub const SCROLL_WHEEL_MULTIPLIER: f32 = 1.0;
pub const SCROLL_TOUCH_MULTIPLIER: f32 = 2.0;

// Scroll triggers
pub const DEFAULT_TRIGGER_START: &str = "top bottom";
pub const DEFAULT_TRIGGER_END: &str = "bottom top";
pub const PROGRESS_EPSILON: f32 = 1e-4; // below this a progress change is not reported
pub const SCRUB_SMOOTH_SEC: f32 = 1.0; // lag used by `scrub: 1` sections

// Vacuum exit (hero)
pub const VACUUM_K_OPACITY: f32 = 1.8;
pub const VACUUM_K_TRANSLATE: f32 = 200.0; // px of upward travel at full progress
pub const VACUUM_K_SCALE: f32 = 0.8;
pub const VACUUM_SCALE_MIN: f32 = 0.2;
pub const VACUUM_K_ROTATE: f32 = 10.0; // degrees at full progress

// Problem cards: scattered start pose (± range) and per-card vacuum lag
pub const PROBLEM_SCATTER_X: f32 = 200.0;
pub const PROBLEM_SCATTER_Y: f32 = 100.0;
pub const PROBLEM_SCATTER_ROTATE: f32 = 20.0;
pub const PROBLEM_START_SCALE: f32 = 0.8;
pub const PROBLEM_SCATTER_SEED: u64 = 0x6b6f_7661;
pub const PROBLEM_VACUUM_STAGGER: f32 = 0.05;

// Responsive breakpoints (viewport width, px)
pub const BREAKPOINT_MOBILE: f32 = 640.0;
pub const BREAKPOINT_TABLET: f32 = 1024.0;

// Card deck idle stack per tier: (lateral offset, vertical spacing, rotation step)
pub const DECK_IDLE_MOBILE: [f32; 3] = [40.0, 15.0, 4.0];
pub const DECK_IDLE_TABLET: [f32; 3] = [50.0, 25.0, 6.0];
pub const DECK_IDLE_DESKTOP: [f32; 3] = [60.0, 25.0, 6.0];
pub const DECK_IDLE_SCALE_STEP: f32 = 0.01;

// Card deck pushed layout per tier: (lateral offset, vertical offset, scale)
pub const DECK_PUSHED_MOBILE: [f32; 3] = [80.0, 40.0, 0.65];
pub const DECK_PUSHED_WIDE: [f32; 3] = [120.0, 60.0, 0.75];
pub const DECK_PUSHED_ROTATE: f32 = 20.0;
pub const DECK_PUSHED_Z: i32 = 1;
pub const DECK_EXPANDED_Z: i32 = 20;

// Card deck hover and entrance
pub const DECK_HOVER_SCALE: f32 = 1.05;
pub const DECK_HOVER_LIFT: f32 = 10.0;
pub const DECK_INIT_DELAY_MS: f64 = 100.0;
pub const DECK_ENTRANCE_MS: f64 = 600.0;
pub const DECK_STAGGER_MS: f64 = 100.0;
pub const DECK_START_Y: f32 = -100.0;
pub const DECK_START_SCALE: f32 = 0.8;

// Binary toggle indicator (track units on a 320-wide track)
pub const TOGGLE_ANCHOR_A: f32 = 60.0;
pub const TOGGLE_ANCHOR_B: f32 = 260.0;
pub const TOGGLE_ANCHOR_CENTER: f32 = 160.0;
pub const TOGGLE_PREVIEW_A: f32 = 80.0;
pub const TOGGLE_PREVIEW_B: f32 = 240.0;
pub const TOGGLE_SCALE_LOCKED: f32 = 1.2;
pub const TOGGLE_SCALE_PREVIEW: f32 = 0.9;
pub const TOGGLE_SCALE_IDLE: f32 = 0.6;
pub const TOGGLE_TRANSITION_MS: f64 = 600.0;

// Content panel
pub const PANEL_ENTER_MS: f64 = 600.0;
pub const PANEL_EXIT_MS: f64 = 300.0;
pub const PANEL_CHILD_DELAY_MS: f64 = 100.0;
pub const PANEL_CHILD_STAGGER_MS: f64 = 150.0;
pub const PANEL_CHILD_MS: f64 = 500.0;

// Rotating text
pub const ROTATING_INTERVAL_MS: f64 = 3000.0;
pub const ROTATING_TRANSITION_MS: f64 = 500.0;
pub const ROTATING_HIDDEN_Y: f32 = 20.0;
