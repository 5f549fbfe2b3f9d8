use fnv::FnvHashMap;
use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;

/// Identifier of an element the host can measure and style.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementKey(Cow<'static, str>);

impl ElementKey {
    pub const fn from_static(key: &'static str) -> Self {
        Self(Cow::Borrowed(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ElementKey {
    fn from(key: &'static str) -> Self {
        Self(Cow::Borrowed(key))
    }
}

impl From<String> for ElementKey {
    fn from(key: String) -> Self {
        Self(Cow::Owned(key))
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Visible area of the page, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Untransformed document-space box of an element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementBox {
    pub top: f32,
    pub height: f32,
}

/// Geometry source for threshold computation. The web shell measures the
/// DOM; tests use [`StaticLayout`].
pub trait Layout {
    fn viewport(&self) -> Viewport;
    /// `None` while the element is not mounted.
    fn measure(&self, key: &ElementKey) -> Option<ElementBox>;
    /// Largest valid scroll offset.
    fn scroll_limit(&self) -> f32;
}

/// In-memory [`Layout`] with interior mutability so tests and native hosts can
/// move elements and resize the viewport between frames.
#[derive(Debug, Default)]
pub struct StaticLayout {
    viewport: RefCell<Viewport>,
    content_height: RefCell<f32>,
    boxes: RefCell<FnvHashMap<ElementKey, ElementBox>>,
}

impl StaticLayout {
    pub fn new(viewport: Viewport, content_height: f32) -> Self {
        Self {
            viewport: RefCell::new(viewport),
            content_height: RefCell::new(content_height),
            boxes: RefCell::new(FnvHashMap::default()),
        }
    }

    pub fn with_element(self, key: impl Into<ElementKey>, top: f32, height: f32) -> Self {
        self.place(key, top, height);
        self
    }

    pub fn place(&self, key: impl Into<ElementKey>, top: f32, height: f32) {
        self.boxes
            .borrow_mut()
            .insert(key.into(), ElementBox { top, height });
    }

    pub fn remove(&self, key: &ElementKey) {
        self.boxes.borrow_mut().remove(key);
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        *self.viewport.borrow_mut() = viewport;
    }
}

impl Layout for StaticLayout {
    fn viewport(&self) -> Viewport {
        *self.viewport.borrow()
    }

    fn measure(&self, key: &ElementKey) -> Option<ElementBox> {
        self.boxes.borrow().get(key).copied()
    }

    fn scroll_limit(&self) -> f32 {
        (*self.content_height.borrow() - self.viewport.borrow().height).max(0.0)
    }
}
