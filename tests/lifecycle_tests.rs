// Whole-page host tests: every component wired the way the web shell wires
// them, driven by a simulated clock and a StaticLayout.

use kova_core::presets::{self, ids};
use kova_core::{
    BinaryToggle, Card, CardDeck, DeckConfig, ElementKey, MotionContext, MotionPreference,
    MountOutcome, RotatingText, RotatingTextConfig, Scheduler, ScrollConfig, SectionController,
    SectionPhase, Signal, SmoothScroll, Stage, StaticLayout, Style, ToggleConfig, TriggerEngine,
    Viewport,
};
use std::rc::Rc;

const CARDS: usize = 5;
const METHODS: usize = 3;

struct Page {
    ctx: MotionContext,
    resize: Signal<Viewport>,
    scroll: SmoothScroll,
    sections: Vec<SectionController>,
    deck: CardDeck,
    toggle: BinaryToggle,
    rotating: RotatingText,
}

// 800px viewport; sections stacked top to bottom over 6000px of content.
fn layout() -> StaticLayout {
    StaticLayout::new(
        Viewport {
            width: 1280.0,
            height: 800.0,
        },
        6000.0,
    )
    .with_element(ids::HERO, 0.0, 800.0)
    .with_element(ids::PROBLEMS, 800.0, 1000.0)
    .with_element(ids::SOLUTION, 1800.0, 1000.0)
    .with_element(ids::CONNECTION, 2800.0, 800.0)
    .with_element(ids::FINAL_CTA, 3600.0, 800.0)
}

fn page(motion: MotionPreference) -> Page {
    let layout = Rc::new(layout());
    let scheduler = Scheduler::new();
    let triggers = TriggerEngine::new(layout);
    let resize = Signal::new();

    let mut scroll = SmoothScroll::new(scheduler.clone(), triggers.clone(), resize.clone());
    scroll.start(ScrollConfig::default(), motion).unwrap();

    let ctx = MotionContext {
        scheduler: scheduler.clone(),
        triggers,
        stage: Stage::new(),
        motion,
    };
    let sections = presets::landing_page(CARDS, METHODS)
        .unwrap()
        .into_iter()
        .map(|spec| SectionController::new(spec, ctx.clone()))
        .collect();

    let cards = (1..=CARDS as u32)
        .map(|id| Card::new(id, format!("Card {id}"), "", ""))
        .collect();
    let deck = CardDeck::new(cards, DeckConfig::default(), motion).unwrap();
    let toggle = BinaryToggle::new(ToggleConfig::default(), motion).unwrap();
    let rotating = RotatingText::new(
        ["Valor", "Impacto", "Resultados", "Beneficios"]
            .iter()
            .map(|w| w.to_string())
            .collect(),
        RotatingTextConfig::default(),
        scheduler,
        motion,
    )
    .unwrap();

    Page {
        ctx,
        resize,
        scroll,
        sections,
        deck,
        toggle,
        rotating,
    }
}

fn mount_all(page: &mut Page) -> Vec<MountOutcome> {
    page.sections.iter_mut().map(|s| s.mount()).collect()
}

fn run_frames(page: &mut Page, from_ms: f64, frames: usize) -> f64 {
    let mut now = from_ms;
    for _ in 0..frames {
        now += 16.0;
        page.ctx.scheduler.tick(now);
        page.deck.tick(now);
        page.toggle.tick(now);
    }
    now
}

fn style(page: &Page, key: &'static str) -> Style {
    page.ctx
        .stage
        .style(&ElementKey::from(key))
        .unwrap_or(Style::NATURAL)
}

#[test]
fn mounting_the_page_registers_every_section() {
    let mut p = page(MotionPreference::Full);
    assert!(mount_all(&mut p).iter().all(|o| *o == MountOutcome::Mounted));

    // Hero: entrance, pin and exit. Problems: entrance and exit. One each
    // for the rest.
    assert_eq!(p.ctx.triggers.len(), 8);
    // Smooth scroll plus the four played entrances.
    assert_eq!(p.ctx.scheduler.frame_count(), 5);
    assert_eq!(p.ctx.scheduler.timer_count(), 2);
    assert_eq!(p.resize.listener_count(), 1);
    assert_eq!(p.ctx.triggers.pin_spacing_total(), 800.0);
}

#[test]
fn tearing_down_leaves_no_callbacks_behind() {
    let mut p = page(MotionPreference::Full);
    mount_all(&mut p);
    p.scroll.on_wheel(3000.0);
    run_frames(&mut p, 0.0, 120);

    let Page {
        ctx,
        resize,
        scroll,
        sections,
        rotating,
        ..
    } = p;
    drop(sections);
    drop(rotating);
    drop(scroll);
    assert_eq!(ctx.scheduler.live_count(), 0);
    assert!(ctx.triggers.is_empty());
    assert_eq!(resize.listener_count(), 0);
}

#[test]
fn repeated_mount_cycles_do_not_accumulate() {
    let mut p = page(MotionPreference::Full);
    for _ in 0..10 {
        mount_all(&mut p);
        assert_eq!(p.ctx.triggers.len(), 8);
        assert_eq!(p.ctx.scheduler.frame_count(), 5);
        for s in &mut p.sections {
            s.unmount();
        }
        assert!(p.ctx.triggers.is_empty());
        assert_eq!(p.ctx.scheduler.frame_count(), 1);
    }
}

#[test]
fn scrolling_through_the_page_reveals_each_section() {
    let mut p = page(MotionPreference::Full);
    mount_all(&mut p);
    p.deck.mount(0.0);
    p.ctx.scheduler.tick(0.0);

    // Below the fold the solution copy waits hidden.
    assert_eq!(style(&p, ids::SOLUTION_TITLE).opacity, 0.0);

    p.scroll.on_wheel(10_000.0);
    assert_eq!(p.scroll.state().raw_offset, 5200.0);
    let now = run_frames(&mut p, 0.0, 400);
    assert_eq!(p.scroll.state().smoothed_offset, 5200.0);

    for key in [
        ids::SOLUTION_TITLE,
        ids::SOLUTION_TOGGLE,
        ids::FINAL_CTA_TEXT,
        ids::FINAL_CTA_BUTTON,
    ] {
        assert_eq!(style(&p, key), Style::NATURAL, "{key}");
    }
    assert_eq!(style(&p, "connection-method-2"), Style::NATURAL);
    for s in &p.sections[2..] {
        assert_eq!(s.progress().phase, SectionPhase::After, "{}", s.id());
    }

    // The hero has been pinned through and vacuumed away.
    let hero = ElementKey::from(ids::HERO);
    assert_eq!(p.ctx.stage.get(&hero).unwrap().pin_offset, 800.0);
    assert!(style(&p, ids::HERO_TITLE).opacity < 0.05);
    assert!(!p.ctx.stage.is_interactive(&ElementKey::from(ids::HERO_DECK)));
    assert!(p.deck.entrance_done());

    // Back to the top: the deck is usable again and the solution rewinds.
    p.scroll.scroll_to(0.0, false);
    run_frames(&mut p, now, 400);
    assert_eq!(p.scroll.state().smoothed_offset, 0.0);
    assert!(p.ctx.stage.is_interactive(&ElementKey::from(ids::HERO_DECK)));
    assert_eq!(p.ctx.stage.get(&hero).unwrap().pin_offset, 0.0);
    assert_eq!(style(&p, ids::SOLUTION_TITLE).opacity, 0.0);
    assert_eq!(style(&p, ids::FINAL_CTA_TEXT), Style::NATURAL);
}

#[test]
fn landing_mid_exit_never_lets_the_entrance_fight_the_vacuum() {
    let mut p = page(MotionPreference::Full);
    mount_all(&mut p);
    p.ctx.scheduler.tick(0.0);

    // Halfway through the problems exit (900..1800) before the cards have
    // played their entrance.
    p.scroll.scroll_to(1350.0, true);
    let mut now = 0.0;
    let mut prev = style(&p, "problem-card-0").opacity;
    for _ in 0..240 {
        now = run_frames(&mut p, now, 1);
        let opacity = style(&p, "problem-card-0").opacity;
        assert!(opacity <= prev + 1e-6, "t={now}: {prev} -> {opacity}");
        prev = opacity;
    }
    assert!(prev < 0.05, "{prev}");
    // Later cards trail behind the first.
    assert!(style(&p, "problem-card-4").opacity > 0.3);
    assert_eq!(p.sections[1].progress().phase, SectionPhase::Exiting);
}

#[test]
fn reduced_motion_renders_everything_final_with_nothing_scheduled() {
    let mut p = page(MotionPreference::Reduced);
    assert!(mount_all(&mut p).iter().all(|o| *o == MountOutcome::Static));
    p.deck.mount(0.0);

    assert_eq!(p.ctx.scheduler.live_count(), 0);
    assert!(p.ctx.triggers.is_empty());
    assert_eq!(p.resize.listener_count(), 0);
    assert!(!p.scroll.is_active());
    assert!(!p.rotating.is_running());

    for section in &p.sections {
        let spec = section.spec();
        if let Some(entrance) = &spec.entrance {
            for target in entrance.timeline.targets() {
                assert_eq!(p.ctx.stage.style(target), Some(Style::NATURAL), "{target}");
            }
        }
        assert_eq!(section.progress().phase, SectionPhase::After);
    }
    assert_eq!(
        p.ctx.stage.get(&ElementKey::from(ids::HERO)).unwrap().pin_offset,
        0.0
    );
    assert!(p.deck.entrance_done());
    assert!(p.deck.views().all(|v| v.opacity == 1.0));

    p.toggle.select(kova_core::ToggleOption::B, 0.0);
    assert!(!p.toggle.is_animating());
}
