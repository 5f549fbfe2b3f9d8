//! Two-option exclusive selector with a sliding indicator.
//!
//! Indicator placement follows `selection > hover preview > centre`. A
//! selection starts an indicator flight; activations that arrive while that
//! flight is airborne are coalesced into one pending choice and applied when
//! it lands, so two selection motions never overlap.

use crate::constants::*;
use crate::easing::Ease;
use crate::error::{ensure_positive, MotionError};
use crate::motion::MotionPreference;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToggleOption {
    A,
    B,
}

impl ToggleOption {
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TogglePosition {
    pub selected: Option<ToggleOption>,
    pub hovered: Option<ToggleOption>,
    /// A selection has been committed; hover no longer moves the indicator.
    pub locked: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    A,
    PreviewA,
    Center,
    PreviewB,
    B,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    Locked,
    Preview,
    Idle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndicatorToken {
    pub anchor: Anchor,
    pub emphasis: Emphasis,
}

/// Style token for the indicator from selection and hover alone.
pub fn indicator_token(
    selected: Option<ToggleOption>,
    hovered: Option<ToggleOption>,
) -> IndicatorToken {
    match (selected, hovered) {
        (Some(ToggleOption::A), _) => IndicatorToken {
            anchor: Anchor::A,
            emphasis: Emphasis::Locked,
        },
        (Some(ToggleOption::B), _) => IndicatorToken {
            anchor: Anchor::B,
            emphasis: Emphasis::Locked,
        },
        (None, Some(ToggleOption::A)) => IndicatorToken {
            anchor: Anchor::PreviewA,
            emphasis: Emphasis::Preview,
        },
        (None, Some(ToggleOption::B)) => IndicatorToken {
            anchor: Anchor::PreviewB,
            emphasis: Emphasis::Preview,
        },
        (None, None) => IndicatorToken {
            anchor: Anchor::Center,
            emphasis: Emphasis::Idle,
        },
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelTone {
    /// Label sits on the indicator.
    OnIndicator,
    /// Label sits on the bare track.
    OnTrack,
}

#[derive(Clone, Copy, Debug)]
pub struct ToggleConfig {
    pub anchor_a: f32,
    pub anchor_b: f32,
    pub center: f32,
    pub preview_a: f32,
    pub preview_b: f32,
    pub scale_locked: f32,
    pub scale_preview: f32,
    pub scale_idle: f32,
    pub transition_ms: f64,
    pub ease: Ease,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            anchor_a: TOGGLE_ANCHOR_A,
            anchor_b: TOGGLE_ANCHOR_B,
            center: TOGGLE_ANCHOR_CENTER,
            preview_a: TOGGLE_PREVIEW_A,
            preview_b: TOGGLE_PREVIEW_B,
            scale_locked: TOGGLE_SCALE_LOCKED,
            scale_preview: TOGGLE_SCALE_PREVIEW,
            scale_idle: TOGGLE_SCALE_IDLE,
            transition_ms: TOGGLE_TRANSITION_MS,
            ease: Ease::STANDARD,
        }
    }
}

impl ToggleConfig {
    pub fn frame(&self, token: IndicatorToken) -> IndicatorFrame {
        let x = match token.anchor {
            Anchor::A => self.anchor_a,
            Anchor::PreviewA => self.preview_a,
            Anchor::Center => self.center,
            Anchor::PreviewB => self.preview_b,
            Anchor::B => self.anchor_b,
        };
        let scale = match token.emphasis {
            Emphasis::Locked => self.scale_locked,
            Emphasis::Preview => self.scale_preview,
            Emphasis::Idle => self.scale_idle,
        };
        IndicatorFrame { x, scale }
    }
}

/// Indicator centre on the track and its scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorFrame {
    pub x: f32,
    pub scale: f32,
}

impl IndicatorFrame {
    fn lerp(self, to: IndicatorFrame, t: f32) -> IndicatorFrame {
        IndicatorFrame {
            x: self.x + (to.x - self.x) * t,
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }
}

/// Result of a selection request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// Selection changed and the indicator started moving.
    Applied,
    /// Indicator is still moving; the choice will apply when it lands.
    Queued,
    /// Already selected, or nothing focused.
    Unchanged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleKey {
    ArrowLeft,
    ArrowRight,
    /// Enter or Space.
    Activate,
}

#[derive(Clone, Copy, Debug)]
struct Flight {
    from: IndicatorFrame,
    to: IndicatorFrame,
    start_ms: f64,
    // Only selection flights block further selections.
    selection: bool,
}

pub struct BinaryToggle {
    config: ToggleConfig,
    motion: MotionPreference,
    position: TogglePosition,
    focused: Option<ToggleOption>,
    flight: Option<Flight>,
    pending: Option<ToggleOption>,
}

impl BinaryToggle {
    pub fn new(config: ToggleConfig, motion: MotionPreference) -> Result<Self, MotionError> {
        ensure_positive("toggle transition", config.transition_ms)?;
        Ok(Self {
            config,
            motion,
            position: TogglePosition::default(),
            focused: None,
            flight: None,
            pending: None,
        })
    }

    pub fn position(&self) -> TogglePosition {
        self.position
    }

    pub fn selected(&self) -> Option<ToggleOption> {
        self.position.selected
    }

    pub fn focused(&self) -> Option<ToggleOption> {
        self.focused
    }

    pub fn pending(&self) -> Option<ToggleOption> {
        self.pending
    }

    pub fn is_animating(&self) -> bool {
        self.flight.is_some()
    }

    pub fn style_token(&self) -> IndicatorToken {
        indicator_token(self.position.selected, self.position.hovered)
    }

    pub fn label_tone(&self, option: ToggleOption) -> LabelTone {
        if self.position.selected == Some(option) {
            LabelTone::OnIndicator
        } else {
            LabelTone::OnTrack
        }
    }

    fn target(&self) -> IndicatorFrame {
        self.config.frame(self.style_token())
    }

    /// Indicator placement at `now_ms`.
    pub fn indicator(&self, now_ms: f64) -> IndicatorFrame {
        match self.flight {
            Some(flight) => {
                let t = ((now_ms - flight.start_ms) / self.config.transition_ms).clamp(0.0, 1.0);
                flight.from.lerp(flight.to, self.config.ease.sample(t as f32))
            }
            None => self.target(),
        }
    }

    /// Start a flight from `from` to the target for the current state.
    fn fly_to_target(&mut self, from: IndicatorFrame, now_ms: f64, selection: bool) {
        if self.motion.is_reduced() {
            self.flight = None;
            return;
        }
        let to = self.target();
        self.flight = (from != to).then_some(Flight {
            from,
            to,
            start_ms: now_ms,
            selection,
        });
    }

    fn selection_in_flight(&self) -> bool {
        self.flight.is_some_and(|f| f.selection)
    }

    /// Land a finished flight and apply any pending choice. Returns the
    /// option newly selected by this call.
    pub fn tick(&mut self, now_ms: f64) -> Option<ToggleOption> {
        if let Some(flight) = self.flight {
            if now_ms - flight.start_ms >= self.config.transition_ms {
                self.flight = None;
            }
        }
        if self.selection_in_flight() {
            return None;
        }
        let next = self.pending.take()?;
        self.apply(next, now_ms).then_some(next)
    }

    fn apply(&mut self, option: ToggleOption, now_ms: f64) -> bool {
        if self.position.selected == Some(option) {
            return false;
        }
        let from = self.indicator(now_ms);
        self.position.selected = Some(option);
        self.position.locked = true;
        self.fly_to_target(from, now_ms, true);
        log::debug!("[toggle] selected {option:?}");
        true
    }

    pub fn select(&mut self, option: ToggleOption, now_ms: f64) -> Activation {
        self.tick(now_ms);
        if self.selection_in_flight() {
            let landing = self.position.selected;
            self.pending = (landing != Some(option)).then_some(option);
            return if self.pending.is_some() {
                Activation::Queued
            } else {
                Activation::Unchanged
            };
        }
        if self.apply(option, now_ms) {
            Activation::Applied
        } else {
            Activation::Unchanged
        }
    }

    /// Pointer entered (`Some`) or left (`None`) an option.
    pub fn hover(&mut self, option: Option<ToggleOption>, now_ms: f64) {
        self.tick(now_ms);
        if self.position.hovered == option {
            return;
        }
        let from = self.indicator(now_ms);
        self.position.hovered = option;
        if self.position.selected.is_none() && !self.selection_in_flight() {
            self.fly_to_target(from, now_ms, false);
        }
    }

    pub fn focus(&mut self, option: Option<ToggleOption>) {
        self.focused = option;
    }

    pub fn handle_key(&mut self, key: ToggleKey, now_ms: f64) -> Activation {
        let option = match key {
            ToggleKey::ArrowLeft => ToggleOption::A,
            ToggleKey::ArrowRight => ToggleOption::B,
            ToggleKey::Activate => match self.focused {
                Some(option) => option,
                None => return Activation::Unchanged,
            },
        };
        self.focused = Some(option);
        self.select(option, now_ms)
    }
}
