// Reads core state and writes it to the DOM. Nothing here decides anything.
use crate::constants::*;
use crate::content::{self, Entry};
use crate::dom::{self, set_style};
use crate::keys;
use kova_core::presets::{connection_method_id, ids, problem_card_id};
use kova_core::{
    BinaryToggle, Card, CardDeck, CardId, CardView, ContentPanel, LabelTone, RotatingText,
    SectionController, Stage, Style, ToggleOption,
};
use wasm_bindgen::JsCast;
use web_sys as web;

fn append(
    document: &web::Document,
    parent: &web::Element,
    tag: &str,
    class: &str,
    text: Option<&str>,
) -> Option<web::Element> {
    let el = document.create_element(tag).ok()?;
    el.set_class_name(class);
    if let Some(text) = text {
        el.set_text_content(Some(text));
    }
    parent.append_child(&el).ok()?;
    Some(el)
}

fn append_card(document: &web::Document, parent: &web::Element, card: &Card) -> Option<()> {
    let el = append(document, parent, "article", "deck-card", None)?;
    el.set_id(&keys::card_element_id(card.id));
    _ = el.set_attribute("tabindex", "0");
    _ = el.set_attribute("role", "button");
    _ = el.set_attribute("data-card-id", &card.id.to_string());
    let icon = append(document, &el, "span", "deck-card-icon", None)?;
    _ = icon.set_attribute("data-icon", &card.icon);
    append(document, &el, "h3", "deck-card-title", Some(&card.title))?;
    append(document, &el, "p", CARD_BODY_CLASS, Some(&card.body))?;
    let close = append(document, &el, "button", CARD_CLOSE_CLASS, Some("×"))?;
    _ = close.set_attribute("aria-label", "Cerrar");
    Some(())
}

fn append_entries(
    document: &web::Document,
    parent: &web::Element,
    entries: &[Entry],
    class: &str,
    id_of: impl Fn(usize) -> String,
) -> Option<()> {
    for (i, entry) in entries.iter().enumerate() {
        let el = append(document, parent, "div", class, None)?;
        el.set_id(&id_of(i));
        append(document, &el, "h3", "entry-title", Some(entry.title))?;
        append(document, &el, "p", "entry-body", Some(entry.body))?;
    }
    Some(())
}

/// Fill the empty containers of the page with its copy. Must run before
/// sections mount so their trigger and target elements exist.
pub fn populate(document: &web::Document, cards: &[Card]) {
    if let Some(deck) = document.get_element_by_id(ids::HERO_DECK) {
        for card in cards {
            if append_card(document, &deck, card).is_none() {
                log::warn!("[deck] could not create card {}", card.id);
            }
        }
    }
    if let Some(grid) = document.get_element_by_id(ids::PROBLEMS) {
        append_entries(document, &grid, &content::PROBLEM_CARDS, "problem-card", |i| {
            problem_card_id(i).to_string()
        });
    }
    if let Some(grid) = document.get_element_by_id(ids::CONNECTION) {
        append_entries(
            document,
            &grid,
            &content::CONNECTION_METHODS,
            "connection-method",
            |i| connection_method_id(i).to_string(),
        );
    }
    for option in [ToggleOption::A, ToggleOption::B] {
        if let Some(el) = document.get_element_by_id(keys::toggle_option_element_id(option)) {
            el.set_text_content(Some(content::toggle_label(option)));
        }
    }
    if let Some(el) = document.get_element_by_id(ROTATING_BASE_ID) {
        el.set_text_content(Some(content::ROTATING_BASE));
    }
}

/// Reserve the scroll length of every pinned section below it.
pub fn apply_pin_spacing(document: &web::Document, sections: &[SectionController]) {
    for section in sections {
        let Some(span) = section.pin_span() else {
            continue;
        };
        if let Some(el) = dom::html_element_by_id(document, section.id().as_str()) {
            set_style(&el, "margin-bottom", &format!("{span:.0}px"));
        }
    }
}

fn style_css(el: &web::HtmlElement, style: &Style) {
    set_style(el, "transform", &style.transform_css(0.0));
    set_style(el, "opacity", &format!("{:.3}", style.opacity));
}

pub struct PageView {
    document: web::Document,
    cards: Vec<(CardId, web::HtmlElement)>,
    last_cards: Vec<Option<CardView>>,
    indicator: Option<web::HtmlElement>,
    options: [Option<web::HtmlElement>; 2],
    panel: Option<web::HtmlElement>,
    panel_title: Option<web::HtmlElement>,
    panel_body: Option<web::HtmlElement>,
    panel_children: Vec<web::HtmlElement>,
    shown_panel: Option<ToggleOption>,
    word: Option<web::HtmlElement>,
    shown_word: Option<usize>,
}

impl PageView {
    pub fn new(document: web::Document, cards: &[Card]) -> Self {
        let by_id = |id: &str| dom::html_element_by_id(&document, id);
        let cards: Vec<(CardId, web::HtmlElement)> = cards
            .iter()
            .filter_map(|c| by_id(&keys::card_element_id(c.id)).map(|el| (c.id, el)))
            .collect();
        let panel = by_id(PANEL_ID);
        let panel_children = panel
            .as_ref()
            .and_then(|p| p.query_selector_all(&format!(".{PANEL_CHILD_CLASS}")).ok())
            .map(|list| {
                (0..list.length())
                    .filter_map(|i| list.item(i))
                    .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
                    .collect()
            })
            .unwrap_or_default();
        Self {
            last_cards: vec![None; cards.len()],
            cards,
            indicator: by_id(TOGGLE_INDICATOR_ID),
            options: [by_id(TOGGLE_OPTION_A_ID), by_id(TOGGLE_OPTION_B_ID)],
            panel,
            panel_title: by_id(PANEL_TITLE_ID),
            panel_body: by_id(PANEL_BODY_ID),
            panel_children,
            shown_panel: None,
            word: by_id(ROTATING_WORD_ID),
            shown_word: None,
            document,
        }
    }

    pub fn render_stage(&self, stage: &Stage) {
        for (key, state) in stage.take_dirty() {
            if let Some(el) = dom::html_element_by_id(&self.document, key.as_str()) {
                dom::apply_element_state(&el, &state);
            }
        }
    }

    pub fn render_deck(&mut self, deck: &CardDeck) {
        for (i, view) in deck.views().enumerate() {
            let Some((id, el)) = self.cards.get(i) else {
                break;
            };
            if *id != view.id || self.last_cards.get(i) == Some(&Some(view)) {
                continue;
            }
            set_style(el, "transform", &view.layout.transform_css());
            set_style(el, "z-index", &view.layout.z.to_string());
            set_style(el, "opacity", &format!("{:.3}", view.opacity));
            _ = el
                .class_list()
                .toggle_with_force(CARD_EXPANDED_CLASS, view.expanded);
            _ = el.set_attribute("aria-expanded", if view.expanded { "true" } else { "false" });
            if let Ok(Some(close)) = el.query_selector(&format!(".{CARD_CLOSE_CLASS}")) {
                if let Ok(close) = close.dyn_into::<web::HtmlElement>() {
                    set_style(&close, "display", if view.show_close { "block" } else { "none" });
                }
            }
            if let Some(slot) = self.last_cards.get_mut(i) {
                *slot = Some(view);
            }
        }
    }

    pub fn render_toggle(&self, toggle: &BinaryToggle, now_ms: f64) {
        if let Some(indicator) = &self.indicator {
            let frame = toggle.indicator(now_ms);
            set_style(
                indicator,
                "left",
                &format!("{:.2}%", keys::indicator_left_percent(frame.x)),
            );
            set_style(
                indicator,
                "transform",
                &format!("translate(-50%, -50%) scale({:.3})", frame.scale),
            );
        }
        for (option, el) in [ToggleOption::A, ToggleOption::B].into_iter().zip(&self.options) {
            let Some(el) = el else {
                continue;
            };
            let on_indicator = toggle.label_tone(option) == LabelTone::OnIndicator;
            _ = el
                .class_list()
                .toggle_with_force(LABEL_ON_INDICATOR_CLASS, on_indicator);
            _ = el.set_attribute("aria-pressed", if on_indicator { "true" } else { "false" });
        }
    }

    pub fn render_panel(&mut self, panel: &ContentPanel<ToggleOption>, now_ms: f64) {
        let Some(root) = &self.panel else {
            return;
        };
        let Some(frame) = panel.frame(now_ms) else {
            set_style(root, "display", "none");
            self.shown_panel = None;
            return;
        };
        if self.shown_panel != Some(frame.key) {
            let copy = content::panel(frame.key);
            if let Some(title) = &self.panel_title {
                title.set_text_content(Some(copy.title));
            }
            if let Some(body) = &self.panel_body {
                body.set_text_content(Some(copy.body));
            }
            set_style(root, "display", "block");
            self.shown_panel = Some(frame.key);
        }
        style_css(root, &frame.style);
        for (i, child) in self.panel_children.iter().enumerate() {
            style_css(child, &panel.child_style(i, now_ms));
        }
    }

    pub fn render_rotating(&mut self, text: &RotatingText) {
        let Some(word) = &self.word else {
            return;
        };
        let state = text.state();
        if self.shown_word != Some(state.word_index) {
            word.set_text_content(Some(text.word()));
            self.shown_word = Some(state.word_index);
        }
        style_css(word, &text.style());
    }
}
