// Host-side tests for scroll markers and the trigger engine, driven by a
// StaticLayout instead of the DOM.

use kova_core::{
    Edge, Marker, MotionError, ScrollDirection, Scrub, StaticLayout, TriggerCallbacks,
    TriggerEngine, TriggerHandle, TriggerPhase, TriggerSpec, Viewport,
};
use std::cell::RefCell;
use std::rc::Rc;

type EventLog = Rc<RefCell<Vec<&'static str>>>;

// 1000px viewport over 5000px of content; "box" spans 2000..2500.
fn setup() -> (Rc<StaticLayout>, TriggerEngine) {
    let layout = Rc::new(
        StaticLayout::new(
            Viewport {
                width: 1280.0,
                height: 1000.0,
            },
            5000.0,
        )
        .with_element("box", 2000.0, 500.0),
    );
    let engine = TriggerEngine::new(layout.clone());
    (layout, engine)
}

fn recorder(log: &EventLog) -> TriggerCallbacks {
    let (a, b, c, d, e) = (log.clone(), log.clone(), log.clone(), log.clone(), log.clone());
    TriggerCallbacks::new()
        .on_enter(move |_| a.borrow_mut().push("enter"))
        .on_leave(move |_| b.borrow_mut().push("leave"))
        .on_enter_back(move |_| c.borrow_mut().push("enter_back"))
        .on_leave_back(move |_| d.borrow_mut().push("leave_back"))
        .on_update(move |_| e.borrow_mut().push("update"))
}

#[test]
fn markers_parse_edge_pairs_and_relative_ends() {
    assert_eq!(
        "top 80%".parse::<Marker>(),
        Ok(Marker::Edges {
            element: Edge::Top,
            viewport: Edge::Percent(80.0)
        })
    );
    assert_eq!(
        "center center".parse::<Marker>(),
        Ok(Marker::Edges {
            element: Edge::Center,
            viewport: Edge::Center
        })
    );
    assert_eq!(
        "top 120px".parse::<Marker>(),
        Ok(Marker::Edges {
            element: Edge::Top,
            viewport: Edge::Px(120.0)
        })
    );
    assert_eq!("+=100vh".parse::<Marker>(), Ok(Marker::AfterStartViewport(100.0)));
    assert_eq!("+=50%".parse::<Marker>(), Ok(Marker::AfterStartViewport(50.0)));
    assert_eq!("+=300px".parse::<Marker>(), Ok(Marker::AfterStartPx(300.0)));
}

#[test]
fn malformed_markers_are_rejected() {
    for bad in ["middle top", "top", "top center bottom", "+=lots", ""] {
        assert_eq!(
            bad.parse::<Marker>(),
            Err(MotionError::InvalidMarker(bad.trim().to_string())),
            "{bad:?}"
        );
    }
    // A relative marker only makes sense as an end.
    assert!(TriggerSpec::new("box").start("+=100px").is_err());
}

#[test]
fn bounds_follow_element_and_viewport_edges() {
    let (layout, _) = setup();
    let spec = TriggerSpec::new("box");
    let b = spec.bounds(&*layout).unwrap();
    assert_eq!((b.start, b.end), (1000.0, 2500.0));

    let spec = TriggerSpec::new("box")
        .start("top 80%")
        .unwrap()
        .end("+=100vh")
        .unwrap();
    let b = spec.bounds(&*layout).unwrap();
    assert_eq!((b.start, b.end), (1200.0, 2200.0));

    assert!(TriggerSpec::new("ghost").bounds(&*layout).is_none());
}

#[test]
fn progress_is_linear_inside_the_range_and_clamped_outside() {
    let (_, engine) = setup();
    let h = engine.register(TriggerSpec::new("box"), TriggerCallbacks::new());

    engine.update(1750.0, 16.0);
    let snap = engine.snapshot(&h).unwrap();
    assert_eq!(snap.phase, TriggerPhase::Active);
    assert!((snap.progress - 0.5).abs() < 1e-5);

    engine.update(9000.0, 16.0);
    let snap = engine.snapshot(&h).unwrap();
    assert_eq!((snap.phase, snap.progress), (TriggerPhase::After, 1.0));

    engine.update(0.0, 16.0);
    let snap = engine.snapshot(&h).unwrap();
    assert_eq!((snap.phase, snap.progress), (TriggerPhase::Before, 0.0));
}

#[test]
fn edge_callbacks_fire_once_per_crossing() {
    let (_, engine) = setup();
    let log: EventLog = Rc::default();
    let _h = engine.register(TriggerSpec::new("box"), recorder(&log));
    assert!(log.borrow().is_empty());

    engine.update(500.0, 16.0);
    engine.update(1500.0, 16.0);
    engine.update(1500.0, 16.0);
    engine.update(3000.0, 16.0);
    engine.update(1500.0, 16.0);
    engine.update(0.0, 16.0);
    assert_eq!(
        *log.borrow(),
        vec![
            "enter",
            "update",
            "update",
            "leave",
            "enter_back",
            "update",
            "update",
            "leave_back"
        ]
    );
}

#[test]
fn jumping_over_the_whole_range_fires_enter_then_leave() {
    let (_, engine) = setup();
    let log: EventLog = Rc::default();
    let _h = engine.register(TriggerSpec::new("box"), recorder(&log));

    engine.update(4000.0, 16.0);
    assert_eq!(*log.borrow(), vec!["enter", "update", "leave"]);
    log.borrow_mut().clear();

    engine.update(0.0, 16.0);
    assert_eq!(*log.borrow(), vec!["enter_back", "update", "leave_back"]);
}

#[test]
fn registering_past_the_start_fires_enter_immediately() {
    let (_, engine) = setup();
    engine.update(1500.0, 0.0);
    let log: EventLog = Rc::default();
    let _h = engine.register(TriggerSpec::new("box"), recorder(&log));
    assert_eq!(*log.borrow(), vec!["enter", "update"]);
}

#[test]
fn direction_follows_scroll_movement() {
    let (_, engine) = setup();
    let h = engine.register(TriggerSpec::new("box"), TriggerCallbacks::new());
    engine.update(1200.0, 16.0);
    assert_eq!(engine.snapshot(&h).unwrap().direction, ScrollDirection::Forward);
    engine.update(1100.0, 16.0);
    assert_eq!(engine.snapshot(&h).unwrap().direction, ScrollDirection::Backward);
}

#[test]
fn pinned_trigger_reports_offset_that_holds_the_element() {
    let (_, engine) = setup();
    let spec = TriggerSpec::new("box")
        .start("top top")
        .unwrap()
        .end("+=500px")
        .unwrap()
        .pin(true);
    let h = engine.register(spec, TriggerCallbacks::new());
    assert_eq!(engine.pin_spacing_total(), 500.0);

    engine.update(2200.0, 16.0);
    let snap = engine.snapshot(&h).unwrap();
    assert!(snap.pinned);
    assert_eq!(snap.pin_offset, 200.0);

    engine.update(2600.0, 16.0);
    let snap = engine.snapshot(&h).unwrap();
    assert!(!snap.pinned);
    assert_eq!(snap.pin_offset, 500.0);

    engine.update(1000.0, 16.0);
    let snap = engine.snapshot(&h).unwrap();
    assert!(!snap.pinned);
    assert_eq!(snap.pin_offset, 0.0);
}

#[test]
fn pin_without_spacing_adds_no_scroll_length() {
    let (_, engine) = setup();
    let spec = TriggerSpec::new("box")
        .start("top top")
        .unwrap()
        .end("+=500px")
        .unwrap()
        .pin(true)
        .pin_spacing(false);
    let _h = engine.register(spec, TriggerCallbacks::new());
    assert_eq!(engine.pin_spacing_total(), 0.0);
}

#[test]
fn smooth_scrub_lags_behind_and_converges() {
    let (_, engine) = setup();
    let h = engine.register(
        TriggerSpec::new("box").scrub(Scrub::Smooth(1.0)),
        TriggerCallbacks::new(),
    );

    engine.update(2500.0, 16.0);
    let first = engine.snapshot(&h).unwrap().progress;
    assert!(first > 0.0 && first < 0.05, "{first}");

    // No elapsed time, no movement.
    engine.update(2500.0, 0.0);
    assert_eq!(engine.snapshot(&h).unwrap().progress, first);

    for _ in 0..20 {
        engine.update(2500.0, 1000.0);
    }
    assert_eq!(engine.snapshot(&h).unwrap().progress, 1.0);
}

#[test]
fn direct_scrub_tracks_scroll_exactly() {
    let (_, engine) = setup();
    let h = engine.register(
        TriggerSpec::new("box").scrub(Scrub::Direct),
        TriggerCallbacks::new(),
    );
    engine.update(1300.0, 16.0);
    assert!((engine.snapshot(&h).unwrap().progress - 0.2).abs() < 1e-5);
}

#[test]
fn kill_is_idempotent_and_silences_callbacks() {
    let (_, engine) = setup();
    let log: EventLog = Rc::default();
    let mut h = engine.register(TriggerSpec::new("box"), recorder(&log));
    assert_eq!(engine.len(), 1);
    assert!(h.is_alive());

    h.kill();
    h.kill();
    assert!(!h.is_alive());
    assert!(engine.is_empty());

    engine.update(1500.0, 16.0);
    assert!(log.borrow().is_empty());

    {
        let _scoped = engine.register(TriggerSpec::new("box"), TriggerCallbacks::new());
        assert_eq!(engine.len(), 1);
    }
    assert!(engine.is_empty());
}

#[test]
fn trigger_can_kill_itself_from_its_own_callback() {
    let (_, engine) = setup();
    let slot: Rc<RefCell<Option<TriggerHandle>>> = Rc::default();
    let slot_cb = slot.clone();
    let callbacks = TriggerCallbacks::new().on_enter(move |_| {
        if let Some(mut h) = slot_cb.borrow_mut().take() {
            h.kill();
        }
    });
    *slot.borrow_mut() = Some(engine.register(TriggerSpec::new("box"), callbacks));
    assert_eq!(engine.len(), 1);

    engine.update(1500.0, 16.0);
    assert!(engine.is_empty());
    assert!(slot.borrow().is_none());
}

#[test]
fn callback_may_register_further_triggers() {
    let (_, engine) = setup();
    let spawned: Rc<RefCell<Vec<TriggerHandle>>> = Rc::default();
    let (engine_cb, spawned_cb) = (engine.clone(), spawned.clone());
    let _h = engine.register(
        TriggerSpec::new("box"),
        TriggerCallbacks::new().on_enter(move |_| {
            let h = engine_cb.register(TriggerSpec::new("box"), TriggerCallbacks::new());
            spawned_cb.borrow_mut().push(h);
        }),
    );

    engine.update(1500.0, 16.0);
    assert_eq!(engine.len(), 2);
    let snap = engine.snapshot(&spawned.borrow()[0]).unwrap();
    assert_eq!(snap.phase, TriggerPhase::Active);
}

#[test]
fn unmeasured_trigger_stays_silent_until_refreshed() {
    let (layout, engine) = setup();
    let log: EventLog = Rc::default();
    let h = engine.register(TriggerSpec::new("ghost"), recorder(&log));
    assert!(engine.bounds(&h).is_none());

    engine.update(3000.0, 16.0);
    assert!(log.borrow().is_empty());

    layout.place("ghost", 3000.0, 500.0);
    engine.refresh_all();
    let b = engine.bounds(&h).unwrap();
    assert_eq!((b.start, b.end), (2000.0, 3500.0));
    assert_eq!(*log.borrow(), vec!["enter", "update"]);
}

#[test]
fn refresh_remeasures_after_layout_change() {
    let (layout, engine) = setup();
    let h = engine.register(TriggerSpec::new("box"), TriggerCallbacks::new());
    layout.set_viewport(Viewport {
        width: 800.0,
        height: 500.0,
    });
    layout.place("box", 2000.0, 1000.0);
    engine.refresh_all();
    let b = engine.bounds(&h).unwrap();
    assert_eq!((b.start, b.end), (1500.0, 3000.0));
}
