use crate::constants::REDUCED_MOTION_QUERY;
use kova_core::{ElementBox, ElementKey, ElementState, Layout, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn html_element_by_id(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn prefers_reduced_motion(window: &web::Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub fn viewport(window: &web::Window) -> Viewport {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    Viewport {
        width: read(window.inner_width()),
        height: read(window.inner_height()),
    }
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

/// Write one stage entry onto its element.
pub fn apply_element_state(el: &web::HtmlElement, state: &ElementState) {
    set_style(el, "transform", &state.style.transform_css(state.pin_offset));
    set_style(el, "opacity", &format!("{:.3}", state.style.opacity));
    set_style(
        el,
        "pointer-events",
        if state.interactive { "auto" } else { "none" },
    );
}

/// An event listener that is removed from its target on drop.
pub struct DomListener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl DomListener {
    pub fn new<E>(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(E) + 'static,
    ) -> Result<Self, JsValue>
    where
        E: JsCast + 'static,
    {
        Self::with_passive(target, event, None, handler)
    }

    /// `passive: Some(false)` lets the handler call `prevent_default` on
    /// wheel and touch events.
    pub fn with_passive<E>(
        target: &web::EventTarget,
        event: &'static str,
        passive: Option<bool>,
        mut handler: impl FnMut(E) + 'static,
    ) -> Result<Self, JsValue>
    where
        E: JsCast + 'static,
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        }) as Box<dyn FnMut(web::Event)>);
        match passive {
            Some(passive) => {
                let options = web::AddEventListenerOptions::new();
                options.set_passive(passive);
                target.add_event_listener_with_callback_and_add_event_listener_options(
                    event,
                    closure.as_ref().unchecked_ref(),
                    &options,
                )?;
            }
            None => {
                target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
            }
        }
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for DomListener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// [`Layout`] backed by the live document. Boxes come from the `offsetTop`
/// chain, which ignores CSS transforms, so animated and pinned elements
/// measure at their untransformed position.
pub struct DomLayout {
    window: web::Window,
    document: web::Document,
}

impl DomLayout {
    pub fn new(window: web::Window, document: web::Document) -> Self {
        Self { window, document }
    }
}

impl Layout for DomLayout {
    fn viewport(&self) -> Viewport {
        viewport(&self.window)
    }

    fn measure(&self, key: &ElementKey) -> Option<ElementBox> {
        let el = html_element_by_id(&self.document, key.as_str())?;
        let height = el.offset_height() as f32;
        let mut top = 0.0;
        let mut node = Some(el);
        while let Some(el) = node {
            top += el.offset_top() as f32;
            node = el
                .offset_parent()
                .and_then(|p| p.dyn_into::<web::HtmlElement>().ok());
        }
        Some(ElementBox { top, height })
    }

    fn scroll_limit(&self) -> f32 {
        let content = self
            .document
            .document_element()
            .map(|el| el.scroll_height() as f32)
            .unwrap_or(0.0);
        (content - self.viewport().height).max(0.0)
    }
}
