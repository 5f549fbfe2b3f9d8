//! Smooth-scroll coordinator.
//!
//! Raw wheel and touch deltas move a target offset; every frame the
//! coordinator eases the visible offset toward that target, publishes the new
//! [`ScrollState`] and then feeds it to the [`TriggerEngine`], so trigger
//! progress always sees the smoothed position of the same frame.

use crate::constants::*;
use crate::easing::Ease;
use crate::error::{ensure_positive, MotionError};
use crate::layout::Viewport;
use crate::motion::MotionPreference;
use crate::scheduler::{FrameTime, Scheduler, Signal, Subscription};
use crate::trigger::TriggerEngine;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug)]
pub struct ScrollConfig {
    pub duration_secs: f32,
    pub easing: Ease,
    pub wheel_multiplier: f32,
    pub touch_multiplier: f32,
    /// Let the target run past the content bounds; the reported offset wraps.
    pub infinite: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            duration_secs: SCROLL_DURATION_SEC,
            easing: Ease::ExpoOut,
            wheel_multiplier: SCROLL_WHEEL_MULTIPLIER,
            touch_multiplier: SCROLL_TOUCH_MULTIPLIER,
            infinite: false,
        }
    }
}

impl ScrollConfig {
    pub fn validate(&self) -> Result<(), MotionError> {
        ensure_positive("scroll duration", self.duration_secs as f64)?;
        ensure_positive("wheel multiplier", self.wheel_multiplier as f64)?;
        ensure_positive("touch multiplier", self.touch_multiplier as f64)
    }

    /// Tween length in whole milliseconds; f32 seconds do not scale to an
    /// exact millisecond count.
    pub fn duration_ms(&self) -> f64 {
        (self.duration_secs as f64 * 1000.0).round().max(1.0)
    }
}

/// Published once per frame while the coordinator runs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// Where input wants the page to be.
    pub raw_offset: f32,
    /// Where the page is drawn this frame.
    pub smoothed_offset: f32,
    /// Pixels per second, signed.
    pub velocity: f32,
}

#[derive(Clone, Copy, Debug)]
struct ScrollTween {
    from: f32,
    to: f32,
    start_ms: f64,
    duration_ms: f64,
    easing: Ease,
}

impl ScrollTween {
    fn is_done(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms >= self.duration_ms
    }

    fn sample(&self, now_ms: f64) -> f32 {
        let t = ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0) as f32;
        self.from + (self.to - self.from) * self.easing.sample(t)
    }
}

struct Inner {
    config: ScrollConfig,
    state: ScrollState,
    // Unwrapped smoothed position; differs from the reported one only when
    // infinite scrolling wraps.
    position: f32,
    tween: Option<ScrollTween>,
    limit: f32,
}

impl Inner {
    fn clamp_target(&self, target: f32) -> f32 {
        if self.config.infinite {
            target
        } else {
            target.clamp(0.0, self.limit)
        }
    }

    fn wrap(&self, offset: f32) -> f32 {
        if self.config.infinite && self.limit > 0.0 {
            offset.rem_euclid(self.limit)
        } else {
            offset
        }
    }

    fn retarget(&mut self, target: f32, now_ms: f64) {
        let target = self.clamp_target(target);
        self.state.raw_offset = target;
        self.tween = Some(ScrollTween {
            from: self.position,
            to: target,
            start_ms: now_ms,
            duration_ms: self.config.duration_ms(),
            easing: self.config.easing,
        });
    }

    fn jump(&mut self, offset: f32) {
        let offset = self.clamp_target(offset);
        self.tween = None;
        self.position = offset;
        self.state = ScrollState {
            raw_offset: offset,
            smoothed_offset: self.wrap(offset),
            velocity: 0.0,
        };
    }

    /// Returns whether the drawn offset moved.
    fn advance(&mut self, time: FrameTime) -> bool {
        let before = self.position;
        if let Some(tween) = self.tween {
            self.position = tween.sample(time.now_ms);
            if tween.is_done(time.now_ms) {
                self.position = tween.to;
                self.tween = None;
            }
        }
        let delta = self.position - before;
        self.state.velocity = if time.dt_ms > 0.0 {
            delta / time.dt_ms as f32 * 1000.0
        } else {
            0.0
        };
        self.state.smoothed_offset = self.wrap(self.position);
        delta != 0.0
    }
}

/// Owns the per-frame scroll pipeline while started.
pub struct SmoothScroll {
    inner: Rc<RefCell<Inner>>,
    scheduler: Scheduler,
    triggers: TriggerEngine,
    resize: Signal<Viewport>,
    scroll: Signal<ScrollState>,
    frame: Subscription,
    on_resize: Subscription,
}

impl SmoothScroll {
    pub fn new(scheduler: Scheduler, triggers: TriggerEngine, resize: Signal<Viewport>) -> Self {
        let limit = triggers.layout().scroll_limit();
        Self {
            inner: Rc::new(RefCell::new(Inner {
                config: ScrollConfig::default(),
                state: ScrollState::default(),
                position: 0.0,
                tween: None,
                limit,
            })),
            scheduler,
            triggers,
            resize,
            scroll: Signal::new(),
            frame: Subscription::empty(),
            on_resize: Subscription::empty(),
        }
    }

    /// Take over scrolling. Under reduced motion any running pipeline is
    /// released and the page keeps native scrolling; calling it while running
    /// restarts with the new config.
    pub fn start(
        &mut self,
        config: ScrollConfig,
        motion: MotionPreference,
    ) -> Result<(), MotionError> {
        config.validate()?;
        self.stop();
        if motion.is_reduced() {
            log::info!("[scroll] reduced motion, keeping native scroll");
            return Ok(());
        }
        self.inner.borrow_mut().config = config;

        let inner = self.inner.clone();
        let triggers = self.triggers.clone();
        let scroll = self.scroll.clone();
        self.frame = self.scheduler.on_frame(move |time| {
            let (moved, state) = {
                let mut inner = inner.borrow_mut();
                let moved = inner.advance(time);
                (moved, inner.state)
            };
            if moved {
                scroll.emit(&state);
            }
            triggers.update(state.smoothed_offset, time.dt_ms);
        });

        let inner = self.inner.clone();
        let triggers = self.triggers.clone();
        let scheduler = self.scheduler.clone();
        self.on_resize = self.resize.connect(move |viewport: &Viewport| {
            log::debug!(
                "[scroll] resize {}x{}, refreshing triggers",
                viewport.width,
                viewport.height
            );
            triggers.refresh_all();
            let mut inner = inner.borrow_mut();
            inner.limit = triggers.layout().scroll_limit();
            let target = inner.clamp_target(inner.state.raw_offset);
            if target != inner.state.raw_offset {
                inner.retarget(target, scheduler.now_ms());
            }
        });
        log::debug!("[scroll] started");
        Ok(())
    }

    /// Release the frame callback and the resize listener. Idempotent.
    pub fn stop(&mut self) {
        if self.frame.is_active() || self.on_resize.is_active() {
            log::debug!("[scroll] stopped");
        }
        self.frame.cancel();
        self.on_resize.cancel();
        self.inner.borrow_mut().tween = None;
    }

    pub fn is_active(&self) -> bool {
        self.frame.is_active()
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().tween.is_some()
    }

    pub fn state(&self) -> ScrollState {
        self.inner.borrow().state
    }

    pub fn limit(&self) -> f32 {
        self.inner.borrow().limit
    }

    /// Listeners receive every smoothed position change.
    pub fn scroll_signal(&self) -> Signal<ScrollState> {
        self.scroll.clone()
    }

    /// Wheel delta in pixels. Ignored unless running.
    pub fn on_wheel(&self, delta_y: f32) {
        self.push(delta_y, |c| c.wheel_multiplier);
    }

    /// Touch drag delta in pixels (finger up is a positive delta). Ignored
    /// unless running.
    pub fn on_touch(&self, delta_y: f32) {
        self.push(delta_y, |c| c.touch_multiplier);
    }

    fn push(&self, delta: f32, multiplier: impl Fn(&ScrollConfig) -> f32) {
        if !self.is_active() || delta == 0.0 {
            return;
        }
        let now = self.scheduler.now_ms();
        let mut inner = self.inner.borrow_mut();
        let target = inner.state.raw_offset + delta * multiplier(&inner.config);
        inner.retarget(target, now);
    }

    /// Scroll to an absolute offset, animated unless `immediate`.
    pub fn scroll_to(&self, offset: f32, immediate: bool) {
        let state = {
            let mut inner = self.inner.borrow_mut();
            if immediate || !self.frame.is_active() {
                inner.jump(offset);
                Some(inner.state)
            } else {
                inner.retarget(offset, self.scheduler.now_ms());
                None
            }
        };
        if let Some(state) = state {
            self.scroll.emit(&state);
            self.triggers.update(state.smoothed_offset, 0.0);
        }
    }

    /// The host saw the document scroll by other means (scrollbar drag,
    /// keyboard, anchor jump). Adopted unless a smooth scroll is in flight.
    /// Without a running coordinator this drives the triggers directly.
    pub fn on_native_scroll(&self, offset: f32) {
        if !self.frame.is_active() {
            self.triggers.update(offset, 0.0);
            return;
        }
        if self.is_animating() {
            return;
        }
        let state = {
            let mut inner = self.inner.borrow_mut();
            if (inner.position - offset).abs() < 0.5 {
                return;
            }
            inner.jump(offset);
            inner.state
        };
        self.scroll.emit(&state);
    }
}

impl Drop for SmoothScroll {
    fn drop(&mut self) {
        self.stop();
    }
}
