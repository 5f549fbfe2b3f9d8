// Host-side tests for the rotating headline word.

use kova_core::{
    MotionError, MotionPreference, RotatingText, RotatingTextConfig, Scheduler, Style,
};

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn four() -> Vec<String> {
    words(&["Valor", "Impacto", "Resultados", "Beneficios"])
}

fn rotating(scheduler: &Scheduler, list: Vec<String>) -> RotatingText {
    RotatingText::new(
        list,
        RotatingTextConfig::default(),
        scheduler.clone(),
        MotionPreference::Full,
    )
    .unwrap()
}

#[test]
fn hides_before_the_boundary_and_swaps_on_it() {
    let s = Scheduler::new();
    let text = rotating(&s, four());
    assert_eq!(text.word(), "Valor");
    assert!(text.state().visible);
    assert_eq!(s.timer_count(), 2);

    s.tick(2749.0);
    assert!(text.state().visible);
    s.tick(2750.0);
    assert!(!text.state().visible);
    assert_eq!(text.word(), "Valor");
    assert_eq!(text.style(), Style::NATURAL.with_opacity(0.0).with_y(20.0));

    s.tick(3000.0);
    assert_eq!(text.word(), "Impacto");
    assert!(text.state().visible);
    assert_eq!(text.style(), Style::NATURAL);
}

#[test]
fn full_cycle_returns_to_the_first_word() {
    let s = Scheduler::new();
    let text = rotating(&s, four());
    let mut seen = vec![text.word().to_string()];
    for step in 1..=48 {
        s.tick(step as f64 * 250.0);
        if text.state().visible && seen.last().map(String::as_str) != Some(text.word()) {
            seen.push(text.word().to_string());
        }
    }
    assert_eq!(
        seen,
        vec!["Valor", "Impacto", "Resultados", "Beneficios", "Valor"]
    );
    assert_eq!(text.state().word_index, 0);
}

#[test]
fn one_long_tick_catches_up_in_order() {
    let s = Scheduler::new();
    let text = rotating(&s, four());
    s.tick(3000.0 * 4.0);
    assert_eq!(text.state().word_index, 0);
    assert!(text.state().visible);
}

#[test]
fn single_word_never_schedules() {
    let s = Scheduler::new();
    let text = rotating(&s, words(&["Valor"]));
    assert_eq!(s.live_count(), 0);
    assert!(!text.is_running());
    s.tick(10_000.0);
    assert_eq!(text.word(), "Valor");
}

#[test]
fn reduced_motion_shows_the_first_word_statically() {
    let s = Scheduler::new();
    let text = RotatingText::new(
        four(),
        RotatingTextConfig::default(),
        s.clone(),
        MotionPreference::Reduced,
    )
    .unwrap();
    assert_eq!(s.live_count(), 0);
    s.tick(10_000.0);
    assert_eq!(text.word(), "Valor");
    assert_eq!(text.style(), Style::NATURAL);
}

#[test]
fn invalid_configs_are_rejected() {
    let s = Scheduler::new();
    let err = |list: Vec<String>, config: RotatingTextConfig| {
        RotatingText::new(list, config, s.clone(), MotionPreference::Full).err()
    };

    assert_eq!(
        err(Vec::new(), RotatingTextConfig::default()),
        Some(MotionError::EmptyWordList)
    );
    assert_eq!(
        err(
            four(),
            RotatingTextConfig {
                transition_ms: 4000.0,
                ..RotatingTextConfig::default()
            }
        ),
        Some(MotionError::CrossfadeTooLong {
            transition_ms: 4000.0,
            interval_ms: 3000.0
        })
    );
    assert_eq!(
        err(
            four(),
            RotatingTextConfig {
                interval_ms: 0.0,
                ..RotatingTextConfig::default()
            }
        ),
        Some(MotionError::NonPositive {
            name: "rotation interval",
            value: 0.0
        })
    );
    assert_eq!(s.live_count(), 0);
}

#[test]
fn stop_freezes_and_restart_rearms_from_now() {
    let s = Scheduler::new();
    let mut text = rotating(&s, four());
    s.tick(3000.0);
    assert_eq!(text.state().word_index, 1);

    text.stop();
    assert!(!text.is_running());
    assert_eq!(s.live_count(), 0);
    s.tick(9000.0);
    assert_eq!(text.state().word_index, 1);

    text.restart();
    assert_eq!(text.state().word_index, 0);
    s.tick(11_749.0);
    assert!(text.state().visible);
    s.tick(11_750.0);
    assert!(!text.state().visible);
    s.tick(12_000.0);
    assert_eq!(text.state().word_index, 1);
}

#[test]
fn dropping_releases_both_timers() {
    let s = Scheduler::new();
    let text = rotating(&s, four());
    assert_eq!(s.live_count(), 2);
    drop(text);
    assert_eq!(s.live_count(), 0);
}
