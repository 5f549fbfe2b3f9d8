use crate::constants::*;
use crate::easing::Ease;
use crate::layout::ElementKey;
use crate::style::Style;

/// One element's part of an entrance sequence.
#[derive(Clone, Debug)]
pub struct EntranceStep {
    pub target: ElementKey,
    pub from: Style,
    pub to: Style,
    pub duration_ms: f64,
    pub ease: Ease,
    /// Start time within the sequence.
    pub offset_ms: f64,
}

impl EntranceStep {
    /// Animate `target` from `from` to its natural state.
    pub fn new(target: impl Into<ElementKey>, from: Style) -> Self {
        Self {
            target: target.into(),
            from,
            to: Style::NATURAL,
            duration_ms: DURATION_NORMAL_SEC as f64 * 1000.0,
            ease: Ease::default(),
            offset_ms: 0.0,
        }
    }

    pub fn duration_secs(mut self, secs: f32) -> Self {
        self.duration_ms = (secs.max(0.0) * 1000.0) as f64;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn at_secs(mut self, offset: f32) -> Self {
        self.offset_ms = (offset.max(0.0) * 1000.0) as f64;
        self
    }

    pub fn to(mut self, to: Style) -> Self {
        self.to = to;
        self
    }

    #[inline]
    pub fn end_ms(&self) -> f64 {
        self.offset_ms + self.duration_ms
    }

    pub fn sample(&self, t_ms: f64) -> Style {
        let elapsed = t_ms - self.offset_ms;
        if elapsed <= 0.0 {
            return self.from;
        }
        if self.duration_ms <= 0.0 || elapsed >= self.duration_ms {
            return self.to;
        }
        let t = (elapsed / self.duration_ms) as f32;
        self.from.lerp(self.to, self.ease.sample(t))
    }
}

/// An ordered, staggered set of entrance steps sampled by time.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    steps: Vec<EntranceStep>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(mut self, step: EntranceStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Append a step that starts `gap_secs` after the previous step ends
    /// (negative overlaps, as in a `"-=0.6"` position).
    pub fn then(mut self, step: EntranceStep, gap_secs: f32) -> Self {
        let prev_end = self.steps.last().map(|s| s.end_ms()).unwrap_or(0.0);
        let offset = (prev_end + gap_secs as f64 * 1000.0).max(0.0);
        self.steps.push(EntranceStep {
            offset_ms: offset,
            ..step
        });
        self
    }

    pub fn steps(&self) -> &[EntranceStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn targets(&self) -> impl Iterator<Item = &ElementKey> {
        self.steps.iter().map(|s| &s.target)
    }

    pub fn total_ms(&self) -> f64 {
        self.steps.iter().map(|s| s.end_ms()).fold(0.0, f64::max)
    }

    pub fn sample_at(&self, t_ms: f64, mut out: impl FnMut(&ElementKey, Style)) {
        for step in &self.steps {
            out(&step.target, step.sample(t_ms));
        }
    }

    /// Sample at a fraction of the total duration, for scrubbed entrances.
    pub fn sample_progress(&self, progress: f32, out: impl FnMut(&ElementKey, Style)) {
        let t = self.total_ms() * progress.clamp(0.0, 1.0) as f64;
        self.sample_at(t, out);
    }

    pub fn initial(&self, mut out: impl FnMut(&ElementKey, Style)) {
        for step in &self.steps {
            out(&step.target, step.from);
        }
    }

    pub fn final_state(&self, mut out: impl FnMut(&ElementKey, Style)) {
        for step in &self.steps {
            out(&step.target, step.to);
        }
    }
}

/// Time cursor over a [`Timeline`] that can play forward or rewind.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Playback {
    pub position_ms: f64,
    pub direction: PlayDirection,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayDirection {
    #[default]
    Paused,
    Forward,
    Reverse,
}

impl Playback {
    pub fn play(&mut self) {
        self.direction = PlayDirection::Forward;
    }

    pub fn reverse(&mut self) {
        self.direction = PlayDirection::Reverse;
    }

    pub fn is_playing(&self) -> bool {
        self.direction != PlayDirection::Paused
    }

    /// Advance by `dt_ms`; pauses on reaching either end. Returns whether the
    /// position moved.
    pub fn advance(&mut self, dt_ms: f64, total_ms: f64) -> bool {
        let before = self.position_ms;
        match self.direction {
            PlayDirection::Paused => return false,
            PlayDirection::Forward => {
                self.position_ms = (self.position_ms + dt_ms).min(total_ms);
                if self.position_ms >= total_ms {
                    self.direction = PlayDirection::Paused;
                }
            }
            PlayDirection::Reverse => {
                self.position_ms = (self.position_ms - dt_ms).max(0.0);
                if self.position_ms <= 0.0 {
                    self.direction = PlayDirection::Paused;
                }
            }
        }
        self.position_ms != before
    }

    pub fn jump_to(&mut self, position_ms: f64) {
        self.position_ms = position_ms;
        self.direction = PlayDirection::Paused;
    }
}

/// Scroll-driven "vacuum" exit: elements shrink, rise, fade and tilt in
/// proportion to progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VacuumConfig {
    pub k_opacity: f32,
    pub k_translate: f32,
    pub k_scale: f32,
    pub scale_min: f32,
    pub k_rotate: f32,
    /// Progress lag per target index, so later targets leave later.
    pub stagger: f32,
}

impl Default for VacuumConfig {
    fn default() -> Self {
        Self {
            k_opacity: VACUUM_K_OPACITY,
            k_translate: VACUUM_K_TRANSLATE,
            k_scale: VACUUM_K_SCALE,
            scale_min: VACUUM_SCALE_MIN,
            k_rotate: VACUUM_K_ROTATE,
            stagger: 0.0,
        }
    }
}

impl VacuumConfig {
    pub fn apply(&self, progress: f32) -> Style {
        let p = progress.clamp(0.0, 1.0);
        Style {
            opacity: (1.0 - p * self.k_opacity).max(0.0),
            translate: glam::Vec2::new(0.0, -p * self.k_translate),
            scale: (1.0 - p * self.k_scale).max(self.scale_min),
            rotate: p * self.k_rotate,
        }
    }

    /// Style of the `index`-th target at section progress `progress`.
    pub fn apply_to(&self, index: usize, progress: f32) -> Style {
        self.apply(progress - index as f32 * self.stagger)
    }
}
