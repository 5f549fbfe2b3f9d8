//! Scroll-trigger engine: maps a scroll position to per-trigger progress and
//! phase, fires edge callbacks on phase crossings and reports pin offsets.

use crate::constants::PROGRESS_EPSILON;
use crate::error::MotionError;
use crate::layout::{ElementBox, ElementKey, Layout, Viewport};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::str::FromStr;

/// One side of a scroll marker: a point on the element or on the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
    Percent(f32),
    Px(f32),
}

impl Edge {
    #[inline]
    pub fn resolve(self, extent: f32) -> f32 {
        match self {
            Self::Top => 0.0,
            Self::Center => extent * 0.5,
            Self::Bottom => extent,
            Self::Percent(p) => extent * p / 100.0,
            Self::Px(px) => px,
        }
    }
}

impl FromStr for Edge {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MotionError::InvalidMarker(s.to_string());
        match s {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            _ => {
                if let Some(p) = s.strip_suffix('%') {
                    p.parse().map(Self::Percent).map_err(|_| invalid())
                } else if let Some(px) = s.strip_suffix("px") {
                    px.parse().map(Self::Px).map_err(|_| invalid())
                } else {
                    s.parse().map(Self::Px).map_err(|_| invalid())
                }
            }
        }
    }
}

/// Where a trigger starts or ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Marker {
    /// `"<element edge> <viewport edge>"`: the scroll offset at which the
    /// element edge meets the viewport edge.
    Edges { element: Edge, viewport: Edge },
    /// `"+=<n>px"`: a fixed distance after the start marker.
    AfterStartPx(f32),
    /// `"+=<n>%"` or `"+=<n>vh"`: a viewport-height percentage after the start.
    AfterStartViewport(f32),
}

impl Marker {
    fn resolve_edges(element: Edge, viewport: Edge, el: ElementBox, vp: Viewport) -> f32 {
        el.top + element.resolve(el.height) - viewport.resolve(vp.height)
    }
}

impl FromStr for Marker {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || MotionError::InvalidMarker(s.to_string());
        if let Some(rest) = s.strip_prefix("+=") {
            let rest = rest.trim();
            let parse = |n: &str| n.trim().parse::<f32>().map_err(|_| invalid());
            return if let Some(n) = rest.strip_suffix("vh") {
                parse(n).map(Self::AfterStartViewport)
            } else if let Some(n) = rest.strip_suffix('%') {
                parse(n).map(Self::AfterStartViewport)
            } else if let Some(n) = rest.strip_suffix("px") {
                parse(n).map(Self::AfterStartPx)
            } else {
                parse(rest).map(Self::AfterStartPx)
            };
        }
        let mut parts = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        Ok(Self::Edges {
            element: element.parse().map_err(|_| invalid())?,
            viewport: viewport.parse().map_err(|_| invalid())?,
        })
    }
}

/// How reported progress follows the scroll position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Scrub {
    /// Progress is reported, but consumers play time-based animations once.
    #[default]
    Off,
    /// Progress tracks scroll exactly.
    Direct,
    /// Progress eases toward scroll with this time constant in seconds.
    Smooth(f32),
}

impl Scrub {
    pub fn is_scrubbed(self) -> bool {
        !matches!(self, Self::Off)
    }
}

/// Registration options for one trigger.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerSpec {
    pub trigger: ElementKey,
    pub start: Marker,
    pub end: Marker,
    pub pin: bool,
    pub pin_spacing: bool,
    pub scrub: Scrub,
}

impl TriggerSpec {
    /// Defaults: `"top bottom"` to `"bottom top"`, no pin, pin spacing on,
    /// no scrub.
    pub fn new(trigger: impl Into<ElementKey>) -> Self {
        Self {
            trigger: trigger.into(),
            start: Marker::Edges {
                element: Edge::Top,
                viewport: Edge::Bottom,
            },
            end: Marker::Edges {
                element: Edge::Bottom,
                viewport: Edge::Top,
            },
            pin: false,
            pin_spacing: true,
            scrub: Scrub::Off,
        }
    }

    pub fn start(mut self, marker: &str) -> Result<Self, MotionError> {
        let parsed: Marker = marker.parse()?;
        if !matches!(parsed, Marker::Edges { .. }) {
            return Err(MotionError::InvalidMarker(marker.to_string()));
        }
        self.start = parsed;
        Ok(self)
    }

    pub fn end(mut self, marker: &str) -> Result<Self, MotionError> {
        self.end = marker.parse()?;
        Ok(self)
    }

    pub fn pin(mut self, pin: bool) -> Self {
        self.pin = pin;
        self
    }

    pub fn pin_spacing(mut self, pin_spacing: bool) -> Self {
        self.pin_spacing = pin_spacing;
        self
    }

    pub fn scrub(mut self, scrub: Scrub) -> Self {
        self.scrub = scrub;
        self
    }

    /// Pixel bounds for the current geometry, `None` when the trigger element
    /// is not mounted.
    pub fn bounds(&self, layout: &dyn Layout) -> Option<Bounds> {
        let el = layout.measure(&self.trigger)?;
        let vp = layout.viewport();
        let start = match self.start {
            Marker::Edges { element, viewport } => Marker::resolve_edges(element, viewport, el, vp),
            _ => return None,
        };
        let end = match self.end {
            Marker::Edges { element, viewport } => Marker::resolve_edges(element, viewport, el, vp),
            Marker::AfterStartPx(px) => start + px,
            Marker::AfterStartViewport(pct) => start + vp.height * pct / 100.0,
        };
        Some(Bounds {
            start,
            end: end.max(start),
        })
    }
}

/// Resolved scroll offsets of a trigger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub start: f32,
    pub end: f32,
}

impl Bounds {
    #[inline]
    pub fn span(&self) -> f32 {
        self.end - self.start
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TriggerPhase {
    #[default]
    Before,
    Active,
    After,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    #[default]
    Idle,
    Forward,
    Backward,
}

/// Observable state of one trigger, also the payload of every callback.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TriggerSnapshot {
    pub progress: f32,
    pub phase: TriggerPhase,
    pub direction: ScrollDirection,
    pub pinned: bool,
    pub pin_offset: f32,
}

type Callback = Box<dyn FnMut(&TriggerSnapshot)>;

/// Edge and update callbacks. Edge callbacks fire once per crossing.
#[derive(Default)]
pub struct TriggerCallbacks {
    on_enter: Option<Callback>,
    on_leave: Option<Callback>,
    on_enter_back: Option<Callback>,
    on_leave_back: Option<Callback>,
    on_update: Option<Callback>,
}

impl TriggerCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter(mut self, f: impl FnMut(&TriggerSnapshot) + 'static) -> Self {
        self.on_enter = Some(Box::new(f));
        self
    }

    pub fn on_leave(mut self, f: impl FnMut(&TriggerSnapshot) + 'static) -> Self {
        self.on_leave = Some(Box::new(f));
        self
    }

    pub fn on_enter_back(mut self, f: impl FnMut(&TriggerSnapshot) + 'static) -> Self {
        self.on_enter_back = Some(Box::new(f));
        self
    }

    pub fn on_leave_back(mut self, f: impl FnMut(&TriggerSnapshot) + 'static) -> Self {
        self.on_leave_back = Some(Box::new(f));
        self
    }

    pub fn on_update(mut self, f: impl FnMut(&TriggerSnapshot) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    fn fire(&mut self, edge: Crossing, snap: &TriggerSnapshot) {
        let slot = match edge {
            Crossing::Enter => &mut self.on_enter,
            Crossing::Leave => &mut self.on_leave,
            Crossing::EnterBack => &mut self.on_enter_back,
            Crossing::LeaveBack => &mut self.on_leave_back,
        };
        if let Some(f) = slot {
            f(snap);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Crossing {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

impl Crossing {
    fn is_entry(self) -> bool {
        matches!(self, Self::Enter | Self::EnterBack)
    }
}

#[derive(Default)]
struct TriggerState {
    bounds: Option<Bounds>,
    phase: TriggerPhase,
    progress: f32,
    last_scroll: Option<f32>,
    direction: ScrollDirection,
    pinned: bool,
    pin_offset: f32,
}

struct Evaluation {
    crossings: SmallVec<[Crossing; 2]>,
    changed: bool,
    snapshot: TriggerSnapshot,
}

impl TriggerState {
    fn snapshot(&self) -> TriggerSnapshot {
        TriggerSnapshot {
            progress: self.progress,
            phase: self.phase,
            direction: self.direction,
            pinned: self.pinned,
            pin_offset: self.pin_offset,
        }
    }

    fn evaluate(&mut self, spec: &TriggerSpec, scroll: f32, dt_ms: f64) -> Evaluation {
        let mut crossings = SmallVec::new();
        let Some(bounds) = self.bounds else {
            return Evaluation {
                crossings,
                changed: false,
                snapshot: self.snapshot(),
            };
        };
        let first = self.last_scroll.is_none();
        self.direction = match self.last_scroll {
            Some(prev) if scroll > prev => ScrollDirection::Forward,
            Some(prev) if scroll < prev => ScrollDirection::Backward,
            _ => self.direction,
        };
        self.last_scroll = Some(scroll);

        let span = bounds.span();
        let (raw, phase) = if scroll < bounds.start {
            (0.0, TriggerPhase::Before)
        } else if scroll >= bounds.end {
            (1.0, TriggerPhase::After)
        } else {
            (((scroll - bounds.start) / span).clamp(0.0, 1.0), TriggerPhase::Active)
        };

        use TriggerPhase::*;
        match (self.phase, phase) {
            (Before, Active) => crossings.push(Crossing::Enter),
            (Before, After) => crossings.extend([Crossing::Enter, Crossing::Leave]),
            (Active, After) => crossings.push(Crossing::Leave),
            (After, Active) => crossings.push(Crossing::EnterBack),
            (After, Before) => crossings.extend([Crossing::EnterBack, Crossing::LeaveBack]),
            (Active, Before) => crossings.push(Crossing::LeaveBack),
            _ => {}
        }
        let phase_changed = self.phase != phase;
        self.phase = phase;

        let prev_progress = self.progress;
        self.progress = match spec.scrub {
            Scrub::Smooth(secs) if !first && secs > 0.0 => {
                if dt_ms > 0.0 {
                    let alpha = 1.0 - (-(dt_ms as f32) / (secs * 1000.0)).exp();
                    let next = self.progress + (raw - self.progress) * alpha;
                    if (raw - next).abs() < PROGRESS_EPSILON {
                        raw
                    } else {
                        next
                    }
                } else {
                    self.progress
                }
            }
            _ => raw,
        };

        self.pinned = spec.pin && phase == Active;
        self.pin_offset = match (spec.pin, phase) {
            (true, Active) => scroll - bounds.start,
            (true, After) => span,
            _ => 0.0,
        };

        Evaluation {
            crossings,
            changed: phase_changed || (self.progress - prev_progress).abs() >= PROGRESS_EPSILON,
            snapshot: self.snapshot(),
        }
    }
}

struct Entry {
    spec: TriggerSpec,
    state: RefCell<TriggerState>,
    callbacks: RefCell<TriggerCallbacks>,
}

struct EngineInner {
    layout: Rc<dyn Layout>,
    next_id: u64,
    entries: Vec<(u64, Rc<Entry>)>,
    scroll: f32,
}

/// Registry of active triggers. Cloning shares the registry.
#[derive(Clone)]
pub struct TriggerEngine {
    inner: Rc<RefCell<EngineInner>>,
}

impl TriggerEngine {
    pub fn new(layout: Rc<dyn Layout>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(EngineInner {
                layout,
                next_id: 0,
                entries: Vec::new(),
                scroll: 0.0,
            })),
        }
    }

    pub fn layout(&self) -> Rc<dyn Layout> {
        self.inner.borrow().layout.clone()
    }

    /// Register a trigger and evaluate it once at the current scroll
    /// position, so a trigger created below the fold fires nothing and one
    /// created past its start fires its enter edge immediately.
    pub fn register(&self, spec: TriggerSpec, callbacks: TriggerCallbacks) -> TriggerHandle {
        let (id, entry, scroll) = {
            let mut inner = self.inner.borrow_mut();
            inner.next_id += 1;
            let id = inner.next_id;
            let bounds = spec.bounds(inner.layout.as_ref());
            if bounds.is_none() {
                log::debug!("[trigger] #{id} `{}` not measurable yet", spec.trigger);
            }
            let entry = Rc::new(Entry {
                spec,
                state: RefCell::new(TriggerState {
                    bounds,
                    ..TriggerState::default()
                }),
                callbacks: RefCell::new(callbacks),
            });
            inner.entries.push((id, entry.clone()));
            (id, entry, inner.scroll)
        };
        log::debug!("[trigger] register #{id} on `{}`", entry.spec.trigger);
        self.run(&[(id, entry)], scroll, 0.0);
        TriggerHandle {
            id,
            engine: Rc::downgrade(&self.inner),
        }
    }

    /// Recompute progress for every trigger at `scroll`.
    pub fn update(&self, scroll: f32, dt_ms: f64) {
        let snapshot = {
            let mut inner = self.inner.borrow_mut();
            inner.scroll = scroll;
            inner.entries.clone()
        };
        self.run(&snapshot, scroll, dt_ms);
    }

    /// Re-measure every trigger from the current layout, then re-evaluate at
    /// the last scroll position. Pinned triggers keep their pin until this
    /// evaluation decides otherwise.
    pub fn refresh_all(&self) {
        let (snapshot, scroll) = {
            let inner = self.inner.borrow();
            for (_, entry) in &inner.entries {
                let bounds = entry.spec.bounds(inner.layout.as_ref());
                if let Ok(mut state) = entry.state.try_borrow_mut() {
                    state.bounds = bounds;
                }
            }
            (inner.entries.clone(), inner.scroll)
        };
        log::debug!("[trigger] refresh {} triggers", snapshot.len());
        self.run(&snapshot, scroll, 0.0);
    }

    fn run(&self, entries: &[(u64, Rc<Entry>)], scroll: f32, dt_ms: f64) {
        for (id, entry) in entries {
            if !self.contains(*id) {
                continue;
            }
            let eval = match entry.state.try_borrow_mut() {
                Ok(mut state) => state.evaluate(&entry.spec, scroll, dt_ms),
                Err(_) => continue,
            };
            if eval.crossings.is_empty() && !eval.changed {
                continue;
            }
            // A callback that re-enters the engine for its own trigger is skipped.
            let Ok(mut callbacks) = entry.callbacks.try_borrow_mut() else {
                continue;
            };
            let snap = eval.snapshot;
            for edge in eval.crossings.iter().filter(|e| e.is_entry()) {
                callbacks.fire(*edge, &snap);
            }
            if eval.changed {
                if let Some(f) = callbacks.on_update.as_mut() {
                    f(&snap);
                }
            }
            for edge in eval.crossings.iter().filter(|e| !e.is_entry()) {
                callbacks.fire(*edge, &snap);
            }
        }
    }

    fn contains(&self, id: u64) -> bool {
        self.inner.borrow().entries.iter().any(|(eid, _)| *eid == id)
    }

    pub fn snapshot(&self, handle: &TriggerHandle) -> Option<TriggerSnapshot> {
        let inner = self.inner.borrow();
        let (_, entry) = inner.entries.iter().find(|(id, _)| *id == handle.id)?;
        let state = entry.state.try_borrow().ok()?;
        Some(state.snapshot())
    }

    pub fn bounds(&self, handle: &TriggerHandle) -> Option<Bounds> {
        let inner = self.inner.borrow();
        let (_, entry) = inner.entries.iter().find(|(id, _)| *id == handle.id)?;
        let state = entry.state.try_borrow().ok()?;
        state.bounds
    }

    /// Extra scroll length added by pins with spacing.
    pub fn pin_spacing_total(&self) -> f32 {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|(_, e)| e.spec.pin && e.spec.pin_spacing)
            .filter_map(|(_, e)| e.state.try_borrow().ok().and_then(|s| s.bounds))
            .map(|b| b.span())
            .sum()
    }

    pub fn scroll(&self) -> f32 {
        self.inner.borrow().scroll
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn remove(inner: &RefCell<EngineInner>, id: u64) -> bool {
        let mut inner = inner.borrow_mut();
        let before = inner.entries.len();
        inner.entries.retain(|(eid, _)| *eid != id);
        inner.entries.len() != before
    }
}

/// Scoped trigger registration. Killed explicitly or on drop.
#[must_use = "dropping a TriggerHandle kills the trigger"]
pub struct TriggerHandle {
    id: u64,
    engine: Weak<RefCell<EngineInner>>,
}

impl TriggerHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Unregister the trigger. Safe to call any number of times, including
    /// from inside one of its own callbacks.
    pub fn kill(&mut self) {
        if let Some(engine) = self.engine.upgrade() {
            if TriggerEngine::remove(&engine, self.id) {
                log::debug!("[trigger] kill #{}", self.id);
            }
        }
        self.engine = Weak::new();
    }

    pub fn is_alive(&self) -> bool {
        self.engine
            .upgrade()
            .map(|e| e.borrow().entries.iter().any(|(id, _)| *id == self.id))
            .unwrap_or(false)
    }
}

impl Drop for TriggerHandle {
    fn drop(&mut self) {
        self.kill();
    }
}

impl std::fmt::Debug for TriggerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerHandle").field("id", &self.id).finish()
    }
}

// Keep the default marker strings and the parsed defaults in step.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_TRIGGER_END, DEFAULT_TRIGGER_START};

    #[test]
    fn default_markers_match_constants() {
        let spec = TriggerSpec::new("x");
        assert_eq!(spec.start, DEFAULT_TRIGGER_START.parse().unwrap());
        assert_eq!(spec.end, DEFAULT_TRIGGER_END.parse().unwrap());
    }
}
