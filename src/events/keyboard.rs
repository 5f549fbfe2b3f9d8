use super::PageWiring;
use crate::dom::{self, DomListener};
use crate::keys;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Route a key to the toggle when one of its options has focus, otherwise to
/// the deck. Escape closes an expanded card from anywhere.
fn handle_key(w: &PageWiring, key: &str) -> bool {
    let focused = w.focused_id();
    let focused = focused.as_deref().unwrap_or_default();

    if let Some(option) = keys::toggle_option_for_element_id(focused) {
        let Some(key) = keys::toggle_key(key) else {
            return false;
        };
        let now = w.now_ms();
        let next_focus = {
            let mut toggle = w.toggle.borrow_mut();
            toggle.focus(Some(option));
            let activation = toggle.handle_key(key, now);
            log::debug!("[toggle] key {key:?} -> {activation:?}");
            toggle.focused().filter(|f| *f != option)
        };
        // Focus follows the arrow keys. The focus listener borrows the
        // toggle, so this runs after the borrow above is released.
        if let Some(el) = next_focus
            .and_then(|next| dom::html_element_by_id(&w.document, keys::toggle_option_element_id(next)))
        {
            _ = el.focus();
        }
        return true;
    }

    match keys::deck_key(key) {
        Some(key) => w
            .deck
            .borrow_mut()
            .handle_key(keys::card_id_from_element_id(focused), key),
        None => false,
    }
}

pub fn wire_keydown(w: &PageWiring) -> Result<DomListener, JsValue> {
    let wc = w.clone();
    DomListener::new(
        w.window.unchecked_ref(),
        "keydown",
        move |ev: web::KeyboardEvent| {
            if handle_key(&wc, &ev.key()) {
                ev.prevent_default();
            }
        },
    )
}
