use crate::constants::*;
use crate::error::{ensure_positive, MotionError};
use crate::motion::MotionPreference;
use crate::scheduler::{Scheduler, Subscription};
use crate::style::Style;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotatingTextConfig {
    pub interval_ms: f64,
    /// Full crossfade length; the word swaps at its midpoint.
    pub transition_ms: f64,
    pub hidden_y: f32,
}

impl Default for RotatingTextConfig {
    fn default() -> Self {
        Self {
            interval_ms: ROTATING_INTERVAL_MS,
            transition_ms: ROTATING_TRANSITION_MS,
            hidden_y: ROTATING_HIDDEN_Y,
        }
    }
}

impl RotatingTextConfig {
    pub fn validate(&self) -> Result<(), MotionError> {
        ensure_positive("rotation interval", self.interval_ms)?;
        ensure_positive("crossfade", self.transition_ms)?;
        if self.transition_ms > self.interval_ms {
            return Err(MotionError::CrossfadeTooLong {
                transition_ms: self.transition_ms,
                interval_ms: self.interval_ms,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotatingTextState {
    pub word_index: usize,
    pub visible: bool,
}

impl Default for RotatingTextState {
    fn default() -> Self {
        Self {
            word_index: 0,
            visible: true,
        }
    }
}

/// Cycles words on two scheduler timers: one hides the current word half a
/// crossfade before each interval boundary, the other swaps and shows the
/// next word on the boundary.
pub struct RotatingText {
    words: Vec<String>,
    config: RotatingTextConfig,
    motion: MotionPreference,
    scheduler: Scheduler,
    state: Rc<Cell<RotatingTextState>>,
    hide: Subscription,
    swap: Subscription,
}

impl RotatingText {
    /// Starts cycling immediately unless there is a single word or motion is
    /// reduced.
    pub fn new(
        words: Vec<String>,
        config: RotatingTextConfig,
        scheduler: Scheduler,
        motion: MotionPreference,
    ) -> Result<Self, MotionError> {
        if words.is_empty() {
            return Err(MotionError::EmptyWordList);
        }
        config.validate()?;
        let mut text = Self {
            words,
            config,
            motion,
            scheduler,
            state: Rc::default(),
            hide: Subscription::empty(),
            swap: Subscription::empty(),
        };
        text.arm();
        Ok(text)
    }

    fn arm(&mut self) {
        self.stop();
        if self.words.len() < 2 || self.motion.is_reduced() {
            return;
        }
        let interval = self.config.interval_ms;
        let half = self.config.transition_ms / 2.0;

        let state = self.state.clone();
        self.hide = self.scheduler.set_interval_from(interval - half, interval, move || {
            state.set(RotatingTextState {
                visible: false,
                ..state.get()
            });
        });

        let state = self.state.clone();
        let count = self.words.len();
        self.swap = self.scheduler.set_interval(interval, move || {
            let current = state.get();
            state.set(RotatingTextState {
                word_index: (current.word_index + 1) % count,
                visible: true,
            });
        });
        log::debug!("[text] cycling {count} words every {interval} ms");
    }

    /// Back to the first word, visible, with the cycle re-armed from now.
    pub fn restart(&mut self) {
        self.state.set(RotatingTextState::default());
        self.arm();
    }

    /// Release both timers. The current word stays as it is.
    pub fn stop(&mut self) {
        self.hide.cancel();
        self.swap.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.swap.is_active()
    }

    pub fn state(&self) -> RotatingTextState {
        self.state.get()
    }

    pub fn word(&self) -> &str {
        &self.words[self.state.get().word_index % self.words.len()]
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn style(&self) -> Style {
        if self.state.get().visible {
            Style::NATURAL
        } else {
            Style::NATURAL
                .with_opacity(0.0)
                .with_y(self.config.hidden_y)
        }
    }
}
