//! Section choreographies of the Kova landing page.

use crate::constants::*;
use crate::easing::{Ease, Power};
use crate::error::MotionError;
use crate::layout::ElementKey;
use crate::section::{EntranceReplay, EntranceSpec, ExitSpec, PinSpec, SectionSpec};
use crate::style::Style;
use crate::timeline::{EntranceStep, Timeline, VacuumConfig};
use crate::trigger::{Scrub, TriggerSpec};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Element ids shared with the page markup.
pub mod ids {
    pub const INTRO: &str = "intro";
    pub const INTRO_TITLE: &str = "intro-title";
    pub const INTRO_SUBTITLE: &str = "intro-subtitle";

    pub const HERO: &str = "hero";
    pub const HERO_TITLE: &str = "hero-title";
    pub const HERO_DECK: &str = "hero-deck";
    pub const HERO_SUBTITLE: &str = "hero-subtitle";

    pub const PROBLEMS: &str = "problems";
    pub const PROBLEM_CARD_PREFIX: &str = "problem-card-";

    pub const SOLUTION: &str = "solution";
    pub const SOLUTION_TITLE: &str = "solution-title";
    pub const SOLUTION_SUBTITLE: &str = "solution-subtitle";
    pub const SOLUTION_METHODS: &str = "solution-methods";
    pub const SOLUTION_TOGGLE: &str = "solution-toggle";

    pub const CONNECTION: &str = "connection";
    pub const CONNECTION_METHOD_PREFIX: &str = "connection-method-";

    pub const FINAL_CTA: &str = "final-cta";
    pub const FINAL_CTA_TEXT: &str = "final-cta-text";
    pub const FINAL_CTA_BUTTON: &str = "final-cta-button";
}

pub fn problem_card_id(index: usize) -> ElementKey {
    ElementKey::from(format!("{}{index}", ids::PROBLEM_CARD_PREFIX))
}

pub fn connection_method_id(index: usize) -> ElementKey {
    ElementKey::from(format!("{}{index}", ids::CONNECTION_METHOD_PREFIX))
}

fn hidden(y: f32) -> Style {
    Style::NATURAL.with_opacity(0.0).with_y(y)
}

/// Standalone intro block. Title and subtitle enter on their own thresholds,
/// so each gets a controller of its own keyed by the revealed element.
pub fn intro() -> Result<Vec<SectionSpec>, MotionError> {
    let title = SectionSpec::new(ids::INTRO_TITLE).entrance(EntranceSpec {
        trigger: TriggerSpec::new(ids::INTRO).start("top 80%")?,
        timeline: Timeline::new().step(
            EntranceStep::new(ids::INTRO_TITLE, hidden(100.0).with_scale(0.9))
                .duration_secs(DURATION_SLOW_SEC)
                .ease(Ease::Out(Power::P3)),
        ),
        replay: EntranceReplay::Once,
    });
    let subtitle = SectionSpec::new(ids::INTRO_SUBTITLE).entrance(EntranceSpec {
        trigger: TriggerSpec::new(ids::INTRO).start("top 70%")?,
        timeline: Timeline::new().step(
            EntranceStep::new(ids::INTRO_SUBTITLE, hidden(50.0))
                .duration_secs(1.0)
                .ease(Ease::Out(Power::P2))
                .at_secs(0.3),
        ),
        replay: EntranceReplay::Once,
    });
    Ok(vec![title, subtitle])
}

/// Scrubbed entrance, a one-viewport pin and the vacuum exit that also
/// switches the deck's pointer events off.
pub fn hero() -> Result<SectionSpec, MotionError> {
    let timeline = Timeline::new()
        .step(
            EntranceStep::new(ids::HERO_TITLE, hidden(80.0).with_scale(0.9))
                .duration_secs(1.0)
                .ease(Ease::Out(Power::P3)),
        )
        .step(
            EntranceStep::new(ids::HERO_DECK, hidden(60.0))
                .duration_secs(1.2)
                .ease(Ease::Out(Power::P2))
                .at_secs(0.3),
        )
        .step(
            EntranceStep::new(ids::HERO_SUBTITLE, hidden(40.0))
                .duration_secs(1.0)
                .ease(Ease::Out(Power::P2))
                .at_secs(0.6),
        );
    let targets = vec![
        ElementKey::from(ids::HERO_TITLE),
        ElementKey::from(ids::HERO_DECK),
        ElementKey::from(ids::HERO_SUBTITLE),
    ];
    Ok(SectionSpec::new(ids::HERO)
        .entrance(EntranceSpec {
            trigger: TriggerSpec::new(ids::HERO)
                .start("top 85%")?
                .end("center center")?
                .scrub(Scrub::Smooth(SCRUB_SMOOTH_SEC)),
            timeline,
            replay: EntranceReplay::Once,
        })
        .pin(PinSpec {
            trigger: TriggerSpec::new(ids::HERO)
                .start("center center")?
                .end("+=100vh")?,
            settle_entrance: true,
        })
        .exit(ExitSpec {
            trigger: TriggerSpec::new(ids::HERO)
                .start("bottom 60%")?
                .end("bottom top")?
                .scrub(Scrub::Smooth(SCRUB_SMOOTH_SEC)),
            targets,
            vacuum: VacuumConfig::default(),
            disable_interaction: vec![ElementKey::from(ids::HERO_DECK)],
        }))
}

/// Cards gather from scattered, shrunken, transparent poses into the grid,
/// then dissipate one after another as the section scrolls away.
pub fn problem_cards(card_count: usize) -> Result<SectionSpec, MotionError> {
    problem_cards_seeded(card_count, PROBLEM_SCATTER_SEED)
}

/// [`problem_cards`] with the scatter drawn from `seed`.
pub fn problem_cards_seeded(card_count: usize, seed: u64) -> Result<SectionSpec, MotionError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let timeline = (0..card_count).fold(Timeline::new(), |tl, i| {
        let from = Style::NATURAL
            .with_opacity(0.0)
            .with_scale(PROBLEM_START_SCALE)
            .with_x(rng.gen_range(-PROBLEM_SCATTER_X..=PROBLEM_SCATTER_X))
            .with_y(rng.gen_range(-PROBLEM_SCATTER_Y..=PROBLEM_SCATTER_Y))
            .with_rotate(rng.gen_range(-PROBLEM_SCATTER_ROTATE..=PROBLEM_SCATTER_ROTATE));
        tl.step(
            EntranceStep::new(problem_card_id(i), from)
                .duration_secs(DURATION_ENTRANCE_SEC)
                .ease(Ease::Out(Power::P3))
                .at_secs(0.1 * i as f32),
        )
    });
    let targets: Vec<ElementKey> = (0..card_count).map(problem_card_id).collect();
    Ok(SectionSpec::new(ids::PROBLEMS)
        .entrance(EntranceSpec {
            trigger: TriggerSpec::new(ids::PROBLEMS).start("top 80%")?,
            timeline,
            replay: EntranceReplay::Once,
        })
        .exit(ExitSpec {
            trigger: TriggerSpec::new(ids::PROBLEMS)
                .start("center center")?
                .end("bottom top")?
                .scrub(Scrub::Smooth(SCRUB_SMOOTH_SEC)),
            disable_interaction: targets.clone(),
            targets,
            vacuum: VacuumConfig {
                k_opacity: 2.0,
                k_translate: 200.0,
                k_scale: 1.0,
                scale_min: 0.1,
                k_rotate: 0.0,
                stagger: PROBLEM_VACUUM_STAGGER,
            },
        }))
}

/// Title, subtitle, integration methods and the audience toggle, overlapping
/// in sequence; rewinds when scrolled back above the section.
pub fn solution() -> Result<SectionSpec, MotionError> {
    let timeline = Timeline::new()
        .step(
            EntranceStep::new(ids::SOLUTION_TITLE, hidden(60.0))
                .duration_secs(DURATION_SLOW_SEC)
                .ease(Ease::Out(Power::P3)),
        )
        .then(
            EntranceStep::new(ids::SOLUTION_SUBTITLE, hidden(60.0))
                .duration_secs(1.0)
                .ease(Ease::Out(Power::P2)),
            -0.6,
        )
        .then(
            EntranceStep::new(ids::SOLUTION_METHODS, hidden(60.0))
                .duration_secs(DURATION_SLOW_SEC)
                .ease(Ease::Out(Power::P2)),
            -0.4,
        )
        .then(
            EntranceStep::new(ids::SOLUTION_TOGGLE, hidden(60.0))
                .duration_secs(1.0)
                .ease(Ease::Out(Power::P2)),
            -0.6,
        );
    Ok(SectionSpec::new(ids::SOLUTION).entrance(EntranceSpec {
        trigger: TriggerSpec::new(ids::SOLUTION)
            .start("top 70%")?
            .end("center center")?,
        timeline,
        replay: EntranceReplay::ReverseOnLeaveBack,
    }))
}

pub fn connection_banner(method_count: usize) -> Result<SectionSpec, MotionError> {
    let timeline = (0..method_count).fold(Timeline::new(), |tl, i| {
        tl.step(
            EntranceStep::new(connection_method_id(i), hidden(60.0).with_scale(0.9))
                .duration_secs(DURATION_SLOW_SEC)
                .ease(Ease::Out(Power::P3))
                .at_secs(0.2 * i as f32),
        )
    });
    Ok(SectionSpec::new(ids::CONNECTION).entrance(EntranceSpec {
        trigger: TriggerSpec::new(ids::CONNECTION).start("top 85%")?,
        timeline,
        replay: EntranceReplay::Once,
    }))
}

pub fn final_cta() -> Result<SectionSpec, MotionError> {
    let timeline = Timeline::new()
        .step(
            EntranceStep::new(ids::FINAL_CTA_TEXT, hidden(50.0))
                .duration_secs(DURATION_SLOW_SEC)
                .ease(Ease::Out(Power::P3)),
        )
        .step(
            EntranceStep::new(ids::FINAL_CTA_BUTTON, hidden(50.0))
                .duration_secs(1.0)
                .ease(Ease::Out(Power::P2))
                .at_secs(0.3),
        );
    Ok(SectionSpec::new(ids::FINAL_CTA).entrance(EntranceSpec {
        trigger: TriggerSpec::new(ids::FINAL_CTA).start("top 80%")?,
        timeline,
        replay: EntranceReplay::Once,
    }))
}

/// Every section of the page, top to bottom.
pub fn landing_page(
    problem_cards_count: usize,
    connection_methods: usize,
) -> Result<Vec<SectionSpec>, MotionError> {
    Ok(vec![
        hero()?,
        problem_cards(problem_cards_count)?,
        solution()?,
        connection_banner(connection_methods)?,
        final_cta()?,
    ])
}
