mod keyboard;
mod pointer;
mod scroll;

pub use keyboard::wire_keydown;
pub use pointer::{wire_deck, wire_toggle};
pub use scroll::{relayout, wire_scroll_input, wire_viewport};

use instant::Instant;
use kova_core::{
    BinaryToggle, CardDeck, SectionController, Signal, SmoothScroll, TriggerEngine, Viewport,
};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Everything an event handler may touch. Cloned into each closure.
#[derive(Clone)]
pub struct PageWiring {
    pub window: web::Window,
    pub document: web::Document,
    pub origin: Instant,
    pub scroll: Rc<SmoothScroll>,
    pub triggers: TriggerEngine,
    pub resize: Signal<Viewport>,
    pub sections: Rc<RefCell<Vec<SectionController>>>,
    pub deck: Rc<RefCell<CardDeck>>,
    pub toggle: Rc<RefCell<BinaryToggle>>,
}

impl PageWiring {
    pub fn now_ms(&self) -> f64 {
        crate::frame::now_ms(self.origin)
    }

    /// Id of the focused element, if any.
    fn focused_id(&self) -> Option<String> {
        self.document.active_element().map(|el| el.id())
    }
}
