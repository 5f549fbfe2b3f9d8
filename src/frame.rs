use crate::dom::DomListener;
use crate::views::PageView;
use instant::Instant;
use kova_core::{
    BinaryToggle, CardDeck, ContentPanel, RotatingText, Scheduler, SectionController,
    SmoothScroll, Stage, Subscription, ToggleOption,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Milliseconds since `origin`; the one clock shared by the frame loop and
/// input handlers.
#[inline]
pub fn now_ms(origin: Instant) -> f64 {
    origin.elapsed().as_secs_f64() * 1000.0
}

pub struct FrameContext {
    pub origin: Instant,
    pub scheduler: Scheduler,
    pub stage: Stage,
    pub deck: Rc<RefCell<CardDeck>>,
    pub toggle: Rc<RefCell<BinaryToggle>>,
    pub panel: Rc<RefCell<ContentPanel<ToggleOption>>>,
    pub rotating: RotatingText,
    pub view: PageView,
    pub shown_option: Option<ToggleOption>,

    // Owned for the page lifetime; dropping them would release their
    // callbacks.
    pub _scroll: Rc<SmoothScroll>,
    pub _sections: Rc<RefCell<Vec<SectionController>>>,
    pub _listeners: Vec<DomListener>,
    pub _subscriptions: Vec<Subscription>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = now_ms(self.origin);

        // Timers, smooth scroll, trigger evaluation and section playback.
        self.scheduler.tick(now);

        self.deck.borrow_mut().tick(now);
        let selected = {
            let mut toggle = self.toggle.borrow_mut();
            toggle.tick(now);
            toggle.selected()
        };
        {
            let mut panel = self.panel.borrow_mut();
            if selected != self.shown_option {
                if let Some(option) = selected {
                    panel.show(option, now);
                }
                self.shown_option = selected;
            }
            panel.tick(now);
        }

        self.view.render_stage(&self.stage);
        self.view.render_deck(&self.deck.borrow());
        self.view.render_toggle(&self.toggle.borrow(), now);
        self.view.render_panel(&self.panel.borrow(), now);
        self.view.render_rotating(&self.rotating);
    }
}

fn request_frame(callback: &Closure<dyn FnMut()>) {
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Ok(mut ctx) = frame_ctx.try_borrow_mut() {
            ctx.frame();
        }
        if let Some(callback) = tick_clone.borrow().as_ref() {
            request_frame(callback);
        }
    }) as Box<dyn FnMut()>));
    if let Some(callback) = tick.borrow().as_ref() {
        request_frame(callback);
    }
}
