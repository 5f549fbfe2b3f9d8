use super::PageWiring;
use crate::constants::CARD_CLOSE_CLASS;
use crate::dom::DomListener;
use crate::keys;
use kova_core::{Activation, ToggleOption};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Click toggles a card, the close button collapses it, hover lifts it.
pub fn wire_deck(w: &PageWiring) -> Result<Vec<DomListener>, JsValue> {
    let mut listeners = Vec::new();
    let ids: Vec<_> = w.deck.borrow().cards().iter().map(|c| c.id).collect();
    for id in ids {
        let Some(el) = w.document.get_element_by_id(&keys::card_element_id(id)) else {
            log::warn!("[deck] card {id} has no element");
            continue;
        };
        let target: &web::EventTarget = el.unchecked_ref();

        let deck = w.deck.clone();
        listeners.push(DomListener::new(target, "click", move |_: web::MouseEvent| {
            let selected = deck.borrow_mut().select_card(id);
            log::debug!("[deck] selection {selected:?}");
        })?);

        let deck = w.deck.clone();
        listeners.push(DomListener::new(
            target,
            "pointerenter",
            move |_: web::PointerEvent| deck.borrow_mut().hover(Some(id)),
        )?);

        let deck = w.deck.clone();
        listeners.push(DomListener::new(
            target,
            "pointerleave",
            move |_: web::PointerEvent| {
                let mut deck = deck.borrow_mut();
                if deck.hovered_id() == Some(id) {
                    deck.hover(None);
                }
            },
        )?);

        if let Ok(Some(close)) = el.query_selector(&format!(".{CARD_CLOSE_CLASS}")) {
            let deck = w.deck.clone();
            listeners.push(DomListener::new(
                close.unchecked_ref(),
                "click",
                move |ev: web::MouseEvent| {
                    // The card underneath would re-select itself.
                    ev.stop_propagation();
                    deck.borrow_mut().close();
                },
            )?);
        }
    }
    Ok(listeners)
}

fn log_activation(option: ToggleOption, activation: Activation) {
    match activation {
        Activation::Applied => log::debug!("[toggle] {option:?} applied"),
        Activation::Queued => log::debug!("[toggle] {option:?} queued behind indicator"),
        Activation::Unchanged => {}
    }
}

pub fn wire_toggle(w: &PageWiring) -> Result<Vec<DomListener>, JsValue> {
    let mut listeners = Vec::new();
    for option in [ToggleOption::A, ToggleOption::B] {
        let Some(el) = w
            .document
            .get_element_by_id(keys::toggle_option_element_id(option))
        else {
            log::warn!("[toggle] option {option:?} has no element");
            continue;
        };
        let target: &web::EventTarget = el.unchecked_ref();

        let wc = w.clone();
        listeners.push(DomListener::new(target, "click", move |_: web::MouseEvent| {
            let now = wc.now_ms();
            let mut toggle = wc.toggle.borrow_mut();
            toggle.focus(Some(option));
            log_activation(option, toggle.select(option, now));
        })?);

        let wc = w.clone();
        listeners.push(DomListener::new(
            target,
            "pointerenter",
            move |_: web::PointerEvent| {
                let now = wc.now_ms();
                wc.toggle.borrow_mut().hover(Some(option), now);
            },
        )?);

        let wc = w.clone();
        listeners.push(DomListener::new(
            target,
            "pointerleave",
            move |_: web::PointerEvent| {
                let now = wc.now_ms();
                wc.toggle.borrow_mut().hover(None, now);
            },
        )?);

        let toggle = w.toggle.clone();
        listeners.push(DomListener::new(target, "focus", move |_: web::FocusEvent| {
            toggle.borrow_mut().focus(Some(option));
        })?);
    }
    Ok(listeners)
}
