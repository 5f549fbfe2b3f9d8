#![cfg(target_arch = "wasm32")]
use instant::Instant;
use kova_core::presets;
use kova_core::{
    BinaryToggle, CardDeck, ContentPanel, DeckConfig, Layout, MotionContext, MotionPreference,
    PanelConfig, RotatingText, RotatingTextConfig, Scheduler, ScrollConfig, SectionController,
    Signal, SmoothScroll, Stage, ToggleConfig, TriggerEngine, Viewport,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod content;
mod dom;
mod events;
mod frame;
mod keys;
mod views;

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("kova-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            // The markup stays fully visible without the motion layer.
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let motion = MotionPreference::from_reduced_flag(dom::prefers_reduced_motion(&window));
    log::info!("motion preference: {motion:?}");

    let cards = content::deck_cards();
    views::populate(&document, &cards);

    let origin = Instant::now();
    let scheduler = Scheduler::new();
    let resize = Signal::<Viewport>::new();
    let layout: Rc<dyn Layout> = Rc::new(dom::DomLayout::new(window.clone(), document.clone()));
    let triggers = TriggerEngine::new(layout);
    let stage = Stage::new();

    // The coordinator registers its frame callback first, so every frame
    // evaluates triggers before section playback reads them.
    let mut scroll = SmoothScroll::new(scheduler.clone(), triggers.clone(), resize.clone());
    scroll.start(ScrollConfig::default(), motion)?;
    let scroll = Rc::new(scroll);

    let ctx = MotionContext {
        scheduler: scheduler.clone(),
        triggers: triggers.clone(),
        stage: stage.clone(),
        motion,
    };
    let sections: Vec<SectionController> = presets::landing_page(
        content::PROBLEM_CARDS.len(),
        content::CONNECTION_METHODS.len(),
    )?
    .into_iter()
    .map(|spec| SectionController::new(spec, ctx.clone()))
    .collect();
    let sections = Rc::new(RefCell::new(sections));

    let deck = Rc::new(RefCell::new(CardDeck::new(
        cards.clone(),
        DeckConfig::default(),
        motion,
    )?));
    let toggle = Rc::new(RefCell::new(BinaryToggle::new(ToggleConfig::default(), motion)?));
    let panel = Rc::new(RefCell::new(ContentPanel::new(PanelConfig::default(), motion)));
    let rotating = RotatingText::new(
        content::ROTATING_WORDS.iter().map(|w| w.to_string()).collect(),
        RotatingTextConfig::default(),
        scheduler.clone(),
        motion,
    )?;

    let wiring = events::PageWiring {
        window: window.clone(),
        document: document.clone(),
        origin,
        scroll: scroll.clone(),
        triggers: triggers.clone(),
        resize,
        sections: sections.clone(),
        deck: deck.clone(),
        toggle: toggle.clone(),
    };

    let mut listeners = events::wire_scroll_input(&wiring).map_err(js_err)?;
    listeners.extend(events::wire_viewport(&wiring).map_err(js_err)?);
    listeners.extend(events::wire_deck(&wiring).map_err(js_err)?);
    listeners.extend(events::wire_toggle(&wiring).map_err(js_err)?);
    listeners.push(events::wire_keydown(&wiring).map_err(js_err)?);

    // Smoothed offsets drive the native scroll position.
    let follow = {
        let window = window.clone();
        scroll.scroll_signal().connect(move |state| {
            window.scroll_to_with_x_and_y(0.0, state.smoothed_offset as f64);
        })
    };

    events::relayout(&wiring);
    // Adopt a restored scroll position before the first frame.
    scroll.on_native_scroll(window.scroll_y().unwrap_or(0.0) as f32);
    deck.borrow_mut().mount(frame::now_ms(origin));
    log::info!(
        "[section] {} sections, {} triggers",
        sections.borrow().len(),
        triggers.len()
    );

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        origin,
        scheduler,
        stage,
        view: views::PageView::new(document, &cards),
        deck,
        toggle,
        panel,
        rotating,
        shown_option: None,
        _scroll: scroll,
        _sections: sections,
        _listeners: listeners,
        _subscriptions: vec![follow],
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
