//! Animatable element state and the shared stage the host renders from.

use crate::layout::ElementKey;
use fnv::FnvHashMap;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

/// The animatable properties of one element: opacity, translation (px),
/// uniform scale and rotation (degrees).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub opacity: f32,
    pub translate: Vec2,
    pub scale: f32,
    pub rotate: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self::NATURAL
    }
}

impl Style {
    /// Fully visible, untransformed.
    pub const NATURAL: Style = Style {
        opacity: 1.0,
        translate: Vec2::ZERO,
        scale: 1.0,
        rotate: 0.0,
    };

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_x(mut self, x: f32) -> Self {
        self.translate.x = x;
        self
    }

    pub fn with_y(mut self, y: f32) -> Self {
        self.translate.y = y;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotate(mut self, rotate: f32) -> Self {
        self.rotate = rotate;
        self
    }

    pub fn lerp(self, to: Style, t: f32) -> Style {
        Style {
            opacity: self.opacity + (to.opacity - self.opacity) * t,
            translate: self.translate.lerp(to.translate, t),
            scale: self.scale + (to.scale - self.scale) * t,
            rotate: self.rotate + (to.rotate - self.rotate) * t,
        }
    }

    /// CSS `transform` value, with an extra vertical offset for pinning.
    pub fn transform_css(&self, pin_offset: f32) -> String {
        format!(
            "translate3d({:.2}px, {:.2}px, 0) rotate({:.2}deg) scale({:.4})",
            self.translate.x,
            self.translate.y + pin_offset,
            self.rotate,
            self.scale
        )
    }

    pub fn approx_eq(&self, other: &Style, eps: f32) -> bool {
        (self.opacity - other.opacity).abs() <= eps
            && self.translate.abs_diff_eq(other.translate, eps)
            && (self.scale - other.scale).abs() <= eps
            && (self.rotate - other.rotate).abs() <= eps
    }
}

/// What the host applies to one element each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementState {
    pub style: Style,
    /// Whether pointer events reach the element.
    pub interactive: bool,
    /// Vertical translation that holds a pinned element in place.
    pub pin_offset: f32,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            style: Style::NATURAL,
            interactive: true,
            pin_offset: 0.0,
        }
    }
}

#[derive(Default)]
struct StageInner {
    elements: FnvHashMap<ElementKey, ElementState>,
    dirty: Vec<ElementKey>,
}

impl StageInner {
    fn update(&mut self, key: &ElementKey, f: impl FnOnce(&mut ElementState)) {
        let entry = self.elements.entry(key.clone()).or_default();
        let before = *entry;
        f(entry);
        if *entry != before && !self.dirty.contains(key) {
            self.dirty.push(key.clone());
        }
    }
}

/// Shared element-state map written by section controllers and read by the
/// host renderer.
#[derive(Clone, Default)]
pub struct Stage {
    inner: Rc<RefCell<StageInner>>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_style(&self, key: &ElementKey, style: Style) {
        self.inner.borrow_mut().update(key, |e| e.style = style);
    }

    pub fn set_interactive(&self, key: &ElementKey, interactive: bool) {
        self.inner
            .borrow_mut()
            .update(key, |e| e.interactive = interactive);
    }

    pub fn set_pin_offset(&self, key: &ElementKey, pin_offset: f32) {
        self.inner
            .borrow_mut()
            .update(key, |e| e.pin_offset = pin_offset);
    }

    pub fn get(&self, key: &ElementKey) -> Option<ElementState> {
        self.inner.borrow().elements.get(key).copied()
    }

    pub fn style(&self, key: &ElementKey) -> Option<Style> {
        self.get(key).map(|e| e.style)
    }

    /// Elements without an entry are interactive.
    pub fn is_interactive(&self, key: &ElementKey) -> bool {
        self.get(key).map(|e| e.interactive).unwrap_or(true)
    }

    /// Elements changed since the last call, with their current state.
    pub fn take_dirty(&self) -> Vec<(ElementKey, ElementState)> {
        let mut inner = self.inner.borrow_mut();
        let keys = std::mem::take(&mut inner.dirty);
        keys.into_iter()
            .filter_map(|k| inner.elements.get(&k).copied().map(|s| (k, s)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
