//! Keyed content panel that reveals in "wait" mode: the outgoing panel
//! finishes its exit before the incoming one starts to enter, so at most one
//! panel is ever on screen.

use crate::constants::*;
use crate::easing::Ease;
use crate::motion::MotionPreference;
use crate::style::Style;

#[derive(Clone, Copy, Debug)]
pub struct PanelConfig {
    pub enter_ms: f64,
    pub exit_ms: f64,
    pub child_delay_ms: f64,
    pub child_stagger_ms: f64,
    pub child_ms: f64,
    pub enter_from: Style,
    pub exit_to: Style,
    pub child_from: Style,
    pub ease: Ease,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            enter_ms: PANEL_ENTER_MS,
            exit_ms: PANEL_EXIT_MS,
            child_delay_ms: PANEL_CHILD_DELAY_MS,
            child_stagger_ms: PANEL_CHILD_STAGGER_MS,
            child_ms: PANEL_CHILD_MS,
            enter_from: Style::NATURAL.with_opacity(0.0).with_y(30.0).with_scale(0.95),
            exit_to: Style::NATURAL.with_opacity(0.0).with_y(-20.0).with_scale(0.95),
            child_from: Style::NATURAL.with_opacity(0.0).with_y(20.0).with_scale(0.95),
            ease: Ease::STANDARD,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelStage {
    Entering,
    Shown,
    Exiting,
}

/// The one panel to draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelFrame<K> {
    pub key: K,
    pub stage: PanelStage,
    pub style: Style,
}

#[derive(Clone, Copy, Debug)]
struct Present<K> {
    key: K,
    since_ms: f64,
    exiting: bool,
}

pub struct ContentPanel<K> {
    config: PanelConfig,
    motion: MotionPreference,
    present: Option<Present<K>>,
    next: Option<K>,
}

impl<K: Copy + PartialEq + std::fmt::Debug> ContentPanel<K> {
    pub fn new(config: PanelConfig, motion: MotionPreference) -> Self {
        Self {
            config,
            motion,
            present: None,
            next: None,
        }
    }

    /// Key of the panel on screen, exiting or not.
    pub fn current(&self) -> Option<K> {
        self.present.map(|p| p.key)
    }

    /// Key that will enter once the current panel has left.
    pub fn queued(&self) -> Option<K> {
        self.next
    }

    /// Reveal the panel for `key`, replacing whatever is shown.
    pub fn show(&mut self, key: K, now_ms: f64) {
        self.tick(now_ms);
        if self.motion.is_reduced() {
            self.present = Some(Present {
                key,
                since_ms: now_ms,
                exiting: false,
            });
            self.next = None;
            return;
        }
        match self.present {
            None => {
                self.present = Some(Present {
                    key,
                    since_ms: now_ms,
                    exiting: false,
                });
            }
            Some(p) if p.key == key && !p.exiting => self.next = None,
            Some(p) if p.exiting => self.next = Some(key),
            Some(p) => {
                self.present = Some(Present {
                    exiting: true,
                    since_ms: now_ms,
                    ..p
                });
                self.next = Some(key);
            }
        }
        log::debug!("[toggle] panel {key:?} requested");
    }

    pub fn hide(&mut self, now_ms: f64) {
        self.tick(now_ms);
        self.next = None;
        match self.present {
            Some(_) if self.motion.is_reduced() => self.present = None,
            Some(p) if !p.exiting => {
                self.present = Some(Present {
                    exiting: true,
                    since_ms: now_ms,
                    ..p
                });
            }
            _ => {}
        }
    }

    /// Finish an exit and start the queued panel's entrance at the moment
    /// the exit ended.
    pub fn tick(&mut self, now_ms: f64) {
        let Some(p) = self.present else {
            return;
        };
        if !p.exiting {
            return;
        }
        let exit_end = p.since_ms + self.config.exit_ms;
        if now_ms < exit_end {
            return;
        }
        self.present = self.next.take().map(|key| Present {
            key,
            since_ms: exit_end,
            exiting: false,
        });
    }

    fn progress(&self, elapsed_ms: f64, duration_ms: f64) -> f32 {
        let t = (elapsed_ms / duration_ms.max(1.0)).clamp(0.0, 1.0) as f32;
        self.config.ease.sample(t)
    }

    pub fn frame(&self, now_ms: f64) -> Option<PanelFrame<K>> {
        let p = self.present?;
        if self.motion.is_reduced() {
            return Some(PanelFrame {
                key: p.key,
                stage: PanelStage::Shown,
                style: Style::NATURAL,
            });
        }
        let elapsed = now_ms - p.since_ms;
        let (stage, style) = if p.exiting {
            let e = self.progress(elapsed, self.config.exit_ms);
            (PanelStage::Exiting, Style::NATURAL.lerp(self.config.exit_to, e))
        } else if elapsed < self.config.enter_ms {
            let e = self.progress(elapsed, self.config.enter_ms);
            (PanelStage::Entering, self.config.enter_from.lerp(Style::NATURAL, e))
        } else {
            (PanelStage::Shown, Style::NATURAL)
        };
        Some(PanelFrame {
            key: p.key,
            stage,
            style,
        })
    }

    /// Style of the panel's `index`-th child, staggered after the panel
    /// starts entering.
    pub fn child_style(&self, index: usize, now_ms: f64) -> Style {
        let Some(p) = self.present.filter(|p| !p.exiting) else {
            return Style::NATURAL;
        };
        if self.motion.is_reduced() {
            return Style::NATURAL;
        }
        let start = p.since_ms + self.config.child_delay_ms + index as f64 * self.config.child_stagger_ms;
        let e = self.progress(now_ms - start, self.config.child_ms);
        self.config.child_from.lerp(Style::NATURAL, e)
    }
}
