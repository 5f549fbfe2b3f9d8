use super::PageWiring;
use crate::dom::{self, DomListener};
use crate::keys;
use crate::views;
use kova_core::MountOutcome;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Wheel and touch input feed the smooth-scroll coordinator. Both listeners
/// are non-passive so the native scroll can be suppressed while it runs.
pub fn wire_scroll_input(w: &PageWiring) -> Result<Vec<DomListener>, JsValue> {
    let target: &web::EventTarget = w.window.unchecked_ref();

    let wheel = {
        let w = w.clone();
        DomListener::with_passive(target, "wheel", Some(false), move |ev: web::WheelEvent| {
            if !w.scroll.is_active() {
                return;
            }
            ev.prevent_default();
            let vh = dom::viewport(&w.window).height;
            w.scroll
                .on_wheel(keys::wheel_delta_px(ev.delta_y() as f32, ev.delta_mode(), vh));
        })?
    };

    let last_touch_y: Rc<Cell<Option<f32>>> = Rc::new(Cell::new(None));
    let touch_start = {
        let last = last_touch_y.clone();
        DomListener::with_passive(target, "touchstart", Some(true), move |ev: web::TouchEvent| {
            last.set(ev.touches().get(0).map(|t| t.client_y() as f32));
        })?
    };
    let touch_move = {
        let w = w.clone();
        let last = last_touch_y.clone();
        DomListener::with_passive(target, "touchmove", Some(false), move |ev: web::TouchEvent| {
            let Some(y) = ev.touches().get(0).map(|t| t.client_y() as f32) else {
                return;
            };
            let previous = last.replace(Some(y));
            if !w.scroll.is_active() {
                return;
            }
            ev.prevent_default();
            if let Some(previous) = previous {
                w.scroll.on_touch(previous - y);
            }
        })?
    };
    let touch_end = {
        let last = last_touch_y;
        DomListener::new(target, "touchend", move |_: web::TouchEvent| last.set(None))?
    };

    Ok(vec![wheel, touch_start, touch_move, touch_end])
}

/// Native scroll and viewport resize.
pub fn wire_viewport(w: &PageWiring) -> Result<Vec<DomListener>, JsValue> {
    let target: &web::EventTarget = w.window.unchecked_ref();

    let native_scroll = {
        let w = w.clone();
        DomListener::new(target, "scroll", move |_: web::Event| {
            let y = w.window.scroll_y().unwrap_or(0.0) as f32;
            w.scroll.on_native_scroll(y);
        })?
    };

    let resize = {
        let w = w.clone();
        DomListener::new(target, "resize", move |_: web::Event| relayout(&w))?
    };

    Ok(vec![native_scroll, resize])
}

/// Mount any deferred sections, re-measure against the current viewport,
/// reserve pin spacing and broadcast the viewport. Runs at startup and on
/// resize.
pub fn relayout(w: &PageWiring) {
    let viewport = dom::viewport(&w.window);
    w.deck.borrow_mut().set_viewport_width(viewport.width);
    {
        let mut sections = w.sections.borrow_mut();
        let deferred = sections
            .iter_mut()
            .map(|s| s.mount())
            .filter(|o| *o == MountOutcome::Deferred)
            .count();
        if deferred > 0 {
            log::info!("[section] {deferred} sections waiting for their elements");
        }
    }
    // Pin spans come from the new viewport; the margins they add move every
    // later section, which the resize listeners re-measure.
    w.triggers.refresh_all();
    views::apply_pin_spacing(&w.document, &w.sections.borrow());
    w.resize.emit(&viewport);
}
