//! Stacked card deck with exclusive selection.
//!
//! Layout is a pure function of `(index, count, selection, viewport tier)`;
//! the entrance is a pure function of time since mount. The host calls
//! [`CardDeck::tick`] from its frame loop and renders [`CardDeck::card_view`].

use crate::constants::*;
use crate::easing::Ease;
use crate::error::MotionError;
use crate::motion::MotionPreference;
use fnv::FnvHashSet;

pub type CardId = u32;

#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    pub body: String,
    pub icon: String,
}

impl Card {
    pub fn new(
        id: CardId,
        title: impl Into<String>,
        body: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            icon: icon.into(),
        }
    }
}

/// Placement of one card relative to the deck centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardLayout {
    pub x: f32,
    pub y: f32,
    pub rotate: f32,
    pub scale: f32,
    pub z: i32,
}

impl CardLayout {
    pub fn transform_css(&self) -> String {
        format!(
            "translate(-50%, -50%) translateX({:.2}px) translateY({:.2}px) rotate({:.2}deg) scale({:.4})",
            self.x, self.y, self.rotate, self.scale
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeckTier {
    Mobile,
    Tablet,
    Desktop,
}

impl DeckTier {
    pub fn from_width(width: f32) -> Self {
        if width < BREAKPOINT_MOBILE {
            Self::Mobile
        } else if width < BREAKPOINT_TABLET {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }
}

/// Per-tier geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierGeometry {
    pub base_offset: f32,
    pub vertical_spacing: f32,
    pub rotation_step: f32,
    pub pushed_offset: f32,
    pub pushed_y: f32,
    pub pushed_scale: f32,
}

impl TierGeometry {
    const fn from_tables(idle: [f32; 3], pushed: [f32; 3]) -> Self {
        Self {
            base_offset: idle[0],
            vertical_spacing: idle[1],
            rotation_step: idle[2],
            pushed_offset: pushed[0],
            pushed_y: pushed[1],
            pushed_scale: pushed[2],
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DeckConfig {
    pub mobile: TierGeometry,
    pub tablet: TierGeometry,
    pub desktop: TierGeometry,
    pub idle_scale_step: f32,
    pub pushed_rotate: f32,
    pub pushed_z: i32,
    pub expanded_z: i32,
    pub hover_scale: f32,
    pub hover_lift: f32,
    pub init_delay_ms: f64,
    pub stagger_ms: f64,
    pub entrance_ms: f64,
    pub ease: Ease,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            mobile: TierGeometry::from_tables(DECK_IDLE_MOBILE, DECK_PUSHED_MOBILE),
            tablet: TierGeometry::from_tables(DECK_IDLE_TABLET, DECK_PUSHED_WIDE),
            desktop: TierGeometry::from_tables(DECK_IDLE_DESKTOP, DECK_PUSHED_WIDE),
            idle_scale_step: DECK_IDLE_SCALE_STEP,
            pushed_rotate: DECK_PUSHED_ROTATE,
            pushed_z: DECK_PUSHED_Z,
            expanded_z: DECK_EXPANDED_Z,
            hover_scale: DECK_HOVER_SCALE,
            hover_lift: DECK_HOVER_LIFT,
            init_delay_ms: DECK_INIT_DELAY_MS,
            stagger_ms: DECK_STAGGER_MS,
            entrance_ms: DECK_ENTRANCE_MS,
            ease: Ease::default(),
        }
    }
}

impl DeckConfig {
    pub fn geometry(&self, tier: DeckTier) -> &TierGeometry {
        match tier {
            DeckTier::Mobile => &self.mobile,
            DeckTier::Tablet => &self.tablet,
            DeckTier::Desktop => &self.desktop,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct StartPose {
    x: f32,
    y: f32,
    rotate: f32,
    scale: f32,
}

// Every card drops in from the same pose above the deck.
const START_POSE: StartPose = StartPose {
    x: 0.0,
    y: DECK_START_Y,
    rotate: 0.0,
    scale: DECK_START_SCALE,
};

/// What the host draws for one card this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardView {
    pub id: CardId,
    pub layout: CardLayout,
    pub opacity: f32,
    pub expanded: bool,
    pub show_close: bool,
}

/// Deck-level keyboard commands; the host maps DOM keys onto these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeckKey {
    /// Enter or Space on a focused card.
    Activate,
    /// Escape.
    Close,
}

pub struct CardDeck {
    cards: Vec<Card>,
    config: DeckConfig,
    motion: MotionPreference,
    viewport_width: f32,
    selected: Option<CardId>,
    hovered: Option<CardId>,
    mounted_at: Option<f64>,
    initialized: bool,
    now_ms: f64,
}

impl CardDeck {
    /// Card order is stack order, front to back. Ids must be unique.
    pub fn new(
        cards: Vec<Card>,
        config: DeckConfig,
        motion: MotionPreference,
    ) -> Result<Self, MotionError> {
        let mut seen = FnvHashSet::default();
        if let Some(dup) = cards.iter().find(|c| !seen.insert(c.id)) {
            return Err(MotionError::DuplicateCard(dup.id));
        }
        Ok(Self {
            cards,
            config,
            motion,
            viewport_width: BREAKPOINT_TABLET,
            selected: None,
            hovered: None,
            mounted_at: None,
            initialized: false,
            now_ms: 0.0,
        })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn selected_id(&self) -> Option<CardId> {
        self.selected
    }

    pub fn hovered_id(&self) -> Option<CardId> {
        self.hovered
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted_at.is_some()
    }

    pub fn tier(&self) -> DeckTier {
        DeckTier::from_width(self.viewport_width)
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    /// Start the entrance. Every mount replays it.
    pub fn mount(&mut self, now_ms: f64) {
        self.mounted_at = Some(now_ms);
        self.now_ms = now_ms;
        self.initialized = self.motion.is_reduced();
        log::debug!("[deck] mounted with {} cards", self.cards.len());
    }

    pub fn unmount(&mut self) {
        self.mounted_at = None;
        self.initialized = false;
        self.selected = None;
        self.hovered = None;
    }

    pub fn tick(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
        if let Some(mounted_at) = self.mounted_at {
            if !self.initialized && now_ms - mounted_at >= self.config.init_delay_ms {
                self.initialized = true;
                log::debug!("[deck] initialized");
            }
        }
    }

    fn index_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    /// Toggle `id`: select it exclusively, or deselect it when it is already
    /// selected. Unknown ids are ignored. Returns the new selection.
    pub fn select_card(&mut self, id: CardId) -> Option<CardId> {
        if self.index_of(id).is_none() {
            log::warn!("[deck] ignoring unknown card {id}");
            return self.selected;
        }
        self.selected = if self.selected == Some(id) {
            None
        } else {
            Some(id)
        };
        self.selected
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn hover(&mut self, id: Option<CardId>) {
        self.hovered = id.filter(|id| self.index_of(*id).is_some());
    }

    /// Returns whether the key was handled.
    pub fn handle_key(&mut self, focused: Option<CardId>, key: DeckKey) -> bool {
        match (key, focused) {
            (DeckKey::Activate, Some(id)) if self.index_of(id).is_some() => {
                self.select_card(id);
                true
            }
            (DeckKey::Close, _) if self.selected.is_some() => {
                self.close();
                true
            }
            _ => false,
        }
    }

    /// Resting stack position of card `index`.
    pub fn idle_layout(&self, index: usize) -> CardLayout {
        let n = self.cards.len();
        let geo = self.config.geometry(self.tier());
        let spread = index as f32 - (n / 2) as f32;
        CardLayout {
            x: spread * geo.base_offset,
            y: index as f32 * geo.vertical_spacing,
            rotate: spread * geo.rotation_step,
            scale: 1.0 - index as f32 * self.config.idle_scale_step,
            z: (n - index) as i32,
        }
    }

    fn expanded_layout(&self) -> CardLayout {
        CardLayout {
            x: 0.0,
            y: 0.0,
            rotate: 0.0,
            scale: 1.0,
            z: self.config.expanded_z.max(self.cards.len() as i32 + 1),
        }
    }

    fn pushed_layout(&self, index: usize, selected_index: usize) -> CardLayout {
        let geo = self.config.geometry(self.tier());
        let side = if index < selected_index { -1.0 } else { 1.0 };
        CardLayout {
            x: side * geo.pushed_offset,
            y: geo.pushed_y,
            rotate: side * self.config.pushed_rotate,
            scale: geo.pushed_scale,
            z: self.config.pushed_z,
        }
    }

    /// Target layout of card `index` for the current selection and hover.
    pub fn layout(&self, index: usize) -> CardLayout {
        let selected_index = self.selected.and_then(|id| self.index_of(id));
        match selected_index {
            Some(sel) if sel == index => self.expanded_layout(),
            Some(sel) => self.pushed_layout(index, sel),
            None => {
                let mut layout = self.idle_layout(index);
                if self.hovered.is_some() && self.hovered == self.cards.get(index).map(|c| c.id) {
                    layout.scale *= self.config.hover_scale;
                    layout.y -= self.config.hover_lift;
                }
                layout
            }
        }
    }

    /// Entrance progress of card `index` in [0, 1].
    fn entrance_progress(&self, index: usize) -> f32 {
        if self.motion.is_reduced() {
            return 1.0;
        }
        let (Some(mounted_at), true) = (self.mounted_at, self.initialized) else {
            return 0.0;
        };
        let start = mounted_at + self.config.init_delay_ms + index as f64 * self.config.stagger_ms;
        let t = ((self.now_ms - start) / self.config.entrance_ms.max(1.0)).clamp(0.0, 1.0);
        self.config.ease.sample(t as f32)
    }

    /// Whether every card has finished its entrance.
    pub fn entrance_done(&self) -> bool {
        (0..self.cards.len()).all(|i| self.entrance_progress(i) >= 1.0)
    }

    pub fn card_view(&self, index: usize) -> Option<CardView> {
        let card = self.cards.get(index)?;
        let target = self.layout(index);
        let e = self.entrance_progress(index);
        let start = START_POSE;
        let rest = 1.0 - e;
        let expanded = self.selected == Some(card.id);
        Some(CardView {
            id: card.id,
            layout: CardLayout {
                x: target.x + start.x * rest,
                y: target.y + start.y * rest,
                rotate: target.rotate + start.rotate * rest,
                scale: target.scale * (start.scale + (1.0 - start.scale) * e),
                z: target.z,
            },
            opacity: e,
            expanded,
            show_close: expanded,
        })
    }

    pub fn views(&self) -> impl Iterator<Item = CardView> + '_ {
        (0..self.cards.len()).filter_map(|i| self.card_view(i))
    }
}
