//! Per-section choreography: a time- or scroll-driven entrance, an optional
//! pinned hold and an optional scroll-driven vacuum exit, all writing into a
//! shared [`Stage`].

use crate::layout::ElementKey;
use crate::motion::MotionPreference;
use crate::scheduler::{Scheduler, Subscription};
use crate::style::{Stage, Style};
use crate::timeline::{Playback, Timeline, VacuumConfig};
use crate::trigger::{
    TriggerCallbacks, TriggerEngine, TriggerHandle, TriggerPhase, TriggerSnapshot, TriggerSpec,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Services every section controller needs, created once by the host at
/// startup and handed to each controller.
#[derive(Clone)]
pub struct MotionContext {
    pub scheduler: Scheduler,
    pub triggers: TriggerEngine,
    pub stage: Stage,
    pub motion: MotionPreference,
}

/// What a played (non-scrubbed) entrance does when scrolled back above its
/// start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EntranceReplay {
    /// Stay revealed.
    #[default]
    Once,
    /// Rewind to the initial state, and play again on the next enter.
    ReverseOnLeaveBack,
}

/// Entrance sequence. A scrubbed trigger maps scroll progress onto the
/// timeline; otherwise the timeline plays in time once the trigger enters.
#[derive(Clone, Debug)]
pub struct EntranceSpec {
    pub trigger: TriggerSpec,
    pub timeline: Timeline,
    pub replay: EntranceReplay,
}

#[derive(Clone, Debug)]
pub struct PinSpec {
    pub trigger: TriggerSpec,
    /// Jump the entrance to its final state when the pin engages.
    pub settle_entrance: bool,
}

#[derive(Clone, Debug)]
pub struct ExitSpec {
    pub trigger: TriggerSpec,
    pub targets: Vec<ElementKey>,
    pub vacuum: VacuumConfig,
    /// Elements that stop receiving pointer events once the exit starts.
    pub disable_interaction: Vec<ElementKey>,
}

impl ExitSpec {
    fn owns(&self, key: &ElementKey) -> bool {
        self.targets.contains(key)
    }
}

#[derive(Clone, Debug)]
pub struct SectionSpec {
    pub id: ElementKey,
    pub entrance: Option<EntranceSpec>,
    pub pin: Option<PinSpec>,
    pub exit: Option<ExitSpec>,
}

impl SectionSpec {
    pub fn new(id: impl Into<ElementKey>) -> Self {
        Self {
            id: id.into(),
            entrance: None,
            pin: None,
            exit: None,
        }
    }

    pub fn entrance(mut self, entrance: EntranceSpec) -> Self {
        self.entrance = Some(entrance);
        self
    }

    pub fn pin(mut self, pin: PinSpec) -> Self {
        self.pin = Some(PinSpec {
            trigger: pin.trigger.pin(true),
            ..pin
        });
        self
    }

    pub fn exit(mut self, exit: ExitSpec) -> Self {
        self.exit = Some(exit);
        self
    }

    fn trigger_elements(&self) -> impl Iterator<Item = &ElementKey> {
        self.entrance
            .iter()
            .map(|e| &e.trigger.trigger)
            .chain(self.pin.iter().map(|p| &p.trigger.trigger))
            .chain(self.exit.iter().map(|x| &x.trigger.trigger))
    }

    /// Every element the section animates at its final, fully visible state.
    pub fn write_final(&self, stage: &Stage) {
        if let Some(entrance) = &self.entrance {
            entrance.timeline.final_state(|key, style| stage.set_style(key, style));
        }
        if let Some(pin) = &self.pin {
            stage.set_pin_offset(&pin.trigger.trigger, 0.0);
        }
        if let Some(exit) = &self.exit {
            for key in &exit.targets {
                stage.set_style(key, Style::NATURAL);
            }
            for key in &exit.disable_interaction {
                stage.set_interactive(key, true);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SectionPhase {
    #[default]
    Before,
    /// Entrance running, or finished and waiting for the pin or exit.
    Entering,
    Pinned,
    Exiting,
    After,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionProgress {
    pub section_id: ElementKey,
    pub progress: f32,
    pub phase: SectionPhase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountOutcome {
    /// Triggers registered.
    Mounted,
    /// A trigger element is missing; nothing was registered. Mount again
    /// once the element exists.
    Deferred,
    /// Reduced motion: final state written, nothing registered.
    Static,
}

#[derive(Default)]
struct Handles {
    entrance: Option<TriggerHandle>,
    pin: Option<TriggerHandle>,
    exit: Option<TriggerHandle>,
    frame: Option<Subscription>,
}

/// Once the exit trigger leaves `Before` it owns its targets' styles until
/// its progress is back at zero; the entrance is settled and does not write
/// them meanwhile.
pub struct SectionController {
    spec: Rc<SectionSpec>,
    ctx: MotionContext,
    playback: Rc<RefCell<Playback>>,
    exit_engaged: Rc<Cell<bool>>,
    handles: Handles,
    outcome: Option<MountOutcome>,
}

impl SectionController {
    pub fn new(spec: SectionSpec, ctx: MotionContext) -> Self {
        Self {
            spec: Rc::new(spec),
            ctx,
            playback: Rc::default(),
            exit_engaged: Rc::default(),
            handles: Handles::default(),
            outcome: None,
        }
    }

    pub fn id(&self) -> &ElementKey {
        &self.spec.id
    }

    pub fn spec(&self) -> &SectionSpec {
        &self.spec
    }

    pub fn is_mounted(&self) -> bool {
        matches!(
            self.outcome,
            Some(MountOutcome::Mounted | MountOutcome::Static)
        )
    }

    /// Register the section's triggers. Calling it again while mounted does
    /// nothing; after a [`MountOutcome::Deferred`] it retries.
    pub fn mount(&mut self) -> MountOutcome {
        if let Some(outcome @ (MountOutcome::Mounted | MountOutcome::Static)) = self.outcome {
            return outcome;
        }
        let stage = self.ctx.stage.clone();
        if self.ctx.motion.is_reduced() {
            self.spec.write_final(&stage);
            log::debug!("[section] {} static (reduced motion)", self.spec.id);
            return *self.outcome.insert(MountOutcome::Static);
        }
        let layout = self.ctx.triggers.layout();
        if let Some(missing) = self
            .spec
            .trigger_elements()
            .find(|key| layout.measure(key).is_none())
        {
            log::debug!("[section] {} deferred, `{missing}` not mounted", self.spec.id);
            return *self.outcome.insert(MountOutcome::Deferred);
        }

        let spec = self.spec.clone();
        self.exit_engaged.set(false);
        if let Some(entrance) = &spec.entrance {
            *self.playback.borrow_mut() = Playback::default();
            entrance.timeline.initial(|key, style| stage.set_style(key, style));
            let handle = if entrance.trigger.scrub.is_scrubbed() {
                self.register_scrubbed_entrance(entrance)
            } else {
                self.register_played_entrance(entrance)
            };
            self.handles.entrance = Some(handle);
        }
        if let Some(pin) = &spec.pin {
            let handle = self.register_pin(pin);
            self.handles.pin = Some(handle);
        }
        if let Some(exit) = &spec.exit {
            let handle = self.register_exit(exit);
            self.handles.exit = Some(handle);
        }
        log::debug!("[section] {} mounted", self.spec.id);
        *self.outcome.insert(MountOutcome::Mounted)
    }

    fn register_scrubbed_entrance(&self, entrance: &EntranceSpec) -> TriggerHandle {
        let write = self.entrance_writer();
        let spec = self.spec.clone();
        let callbacks = TriggerCallbacks::new().on_update(move |snap| {
            if let Some(entrance) = &spec.entrance {
                entrance.timeline.sample_progress(snap.progress, &write);
            }
        });
        self.ctx.triggers.register(entrance.trigger.clone(), callbacks)
    }

    fn register_played_entrance(&mut self, entrance: &EntranceSpec) -> TriggerHandle {
        let playback = self.playback.clone();
        let rewind = self.playback.clone();
        let replay = entrance.replay;
        let mut callbacks = TriggerCallbacks::new().on_enter(move |_| playback.borrow_mut().play());
        if replay == EntranceReplay::ReverseOnLeaveBack {
            callbacks = callbacks.on_leave_back(move |_| rewind.borrow_mut().reverse());
        }

        let write = self.entrance_writer();
        let spec = self.spec.clone();
        let playback = self.playback.clone();
        self.handles.frame = Some(self.ctx.scheduler.on_frame(move |time| {
            let Some(entrance) = &spec.entrance else {
                return;
            };
            let total = entrance.timeline.total_ms();
            let position = {
                let mut playback = playback.borrow_mut();
                if !playback.advance(time.dt_ms, total) {
                    return;
                }
                playback.position_ms
            };
            entrance.timeline.sample_at(position, &write);
        }));
        self.ctx.triggers.register(entrance.trigger.clone(), callbacks)
    }

    /// Entrance style sink that leaves exit targets alone while the exit is
    /// engaged.
    fn entrance_writer(&self) -> impl Fn(&ElementKey, Style) + Clone + 'static {
        let stage = self.ctx.stage.clone();
        let spec = self.spec.clone();
        let exit_engaged = self.exit_engaged.clone();
        move |key: &ElementKey, style: Style| {
            let owned_by_exit =
                exit_engaged.get() && spec.exit.as_ref().is_some_and(|x| x.owns(key));
            if !owned_by_exit {
                stage.set_style(key, style);
            }
        }
    }

    fn register_pin(&self, pin: &PinSpec) -> TriggerHandle {
        let stage = self.ctx.stage.clone();
        let key = pin.trigger.trigger.clone();
        let write_pin = move |snap: &TriggerSnapshot| stage.set_pin_offset(&key, snap.pin_offset);

        let mut callbacks = TriggerCallbacks::new().on_update(write_pin.clone());
        if pin.settle_entrance {
            let write = self.entrance_writer();
            let spec = self.spec.clone();
            let playback = self.playback.clone();
            callbacks = callbacks.on_enter(move |snap| {
                settle(&spec, &playback, &write);
                write_pin(snap);
            });
        }
        self.ctx.triggers.register(pin.trigger.clone(), callbacks)
    }

    fn register_exit(&self, exit: &ExitSpec) -> TriggerHandle {
        let stage = self.ctx.stage.clone();
        let spec = self.spec.clone();
        let playback = self.playback.clone();
        let exit_engaged = self.exit_engaged.clone();
        let write_entrance = self.entrance_writer();
        let apply = move |snap: &TriggerSnapshot| {
            let Some(exit) = &spec.exit else {
                return;
            };
            let engaged = snap.phase != TriggerPhase::Before || snap.progress > 0.0;
            if engaged && !exit_engaged.replace(true) {
                log::debug!("[section] {} exit engaged, settling entrance", spec.id);
                settle(&spec, &playback, &write_entrance);
            } else if !engaged {
                exit_engaged.set(false);
            }
            for (i, key) in exit.targets.iter().enumerate() {
                stage.set_style(key, exit.vacuum.apply_to(i, snap.progress));
            }
            let interactive = snap.progress <= 0.0 || snap.phase == TriggerPhase::Before;
            for key in &exit.disable_interaction {
                stage.set_interactive(key, interactive);
            }
        };

        let stage = self.ctx.stage.clone();
        let spec = self.spec.clone();
        let callbacks = TriggerCallbacks::new()
            .on_update(apply)
            .on_leave_back(move |_| {
                if let Some(exit) = &spec.exit {
                    for key in &exit.disable_interaction {
                        stage.set_interactive(key, true);
                    }
                }
            });
        self.ctx.triggers.register(exit.trigger.clone(), callbacks)
    }

    /// Scroll length the host must add after a pinned section with spacing.
    pub fn pin_span(&self) -> Option<f32> {
        self.spec.pin.as_ref().filter(|p| p.trigger.pin_spacing)?;
        let handle = self.handles.pin.as_ref()?;
        self.ctx.triggers.bounds(handle).map(|b| b.span())
    }

    /// Kill every trigger and frame callback and forget playback state. The
    /// next [`SectionController::mount`] starts from scratch.
    pub fn unmount(&mut self) {
        if self.outcome.take().is_some() {
            log::debug!("[section] {} unmounted", self.spec.id);
        }
        self.handles = Handles::default();
        *self.playback.borrow_mut() = Playback::default();
        self.exit_engaged.set(false);
    }

    pub fn progress(&self) -> SectionProgress {
        let (phase, progress) = self.phase_and_progress();
        SectionProgress {
            section_id: self.spec.id.clone(),
            progress: progress.clamp(0.0, 1.0),
            phase,
        }
    }

    fn phase_and_progress(&self) -> (SectionPhase, f32) {
        match self.outcome {
            Some(MountOutcome::Static) => return (SectionPhase::After, 1.0),
            Some(MountOutcome::Mounted) => {}
            _ => return (SectionPhase::Before, 0.0),
        }
        let triggers = &self.ctx.triggers;
        let snap = |handle: &Option<TriggerHandle>| handle.as_ref().and_then(|h| triggers.snapshot(h));

        let exit = snap(&self.handles.exit);
        if let Some(exit) = exit {
            if exit.phase == TriggerPhase::After {
                return (SectionPhase::After, 1.0);
            }
            if exit.progress > 0.0 && exit.phase == TriggerPhase::Active {
                return (SectionPhase::Exiting, exit.progress);
            }
        }
        let pin = snap(&self.handles.pin);
        if let Some(pin) = pin.filter(|p| p.pinned) {
            return (SectionPhase::Pinned, pin.progress);
        }

        let entrance = snap(&self.handles.entrance);
        if let (Some(spec), Some(snapshot)) = (&self.spec.entrance, entrance) {
            if spec.trigger.scrub.is_scrubbed() {
                match snapshot.phase {
                    TriggerPhase::Before => return (SectionPhase::Before, 0.0),
                    TriggerPhase::Active => return (SectionPhase::Entering, snapshot.progress),
                    TriggerPhase::After => {}
                }
            } else {
                let playback = *self.playback.borrow();
                let total = spec.timeline.total_ms();
                if playback.is_playing() {
                    let p = if total > 0.0 { playback.position_ms / total } else { 1.0 };
                    return (SectionPhase::Entering, p as f32);
                }
                if playback.position_ms <= 0.0 && total > 0.0 {
                    return (SectionPhase::Before, 0.0);
                }
            }
        }

        let pending = pin.is_some_and(|p| p.phase == TriggerPhase::Before)
            || exit.is_some_and(|x| x.phase == TriggerPhase::Before);
        if pending {
            (SectionPhase::Entering, 1.0)
        } else {
            (SectionPhase::After, 1.0)
        }
    }
}

/// Jump a played entrance to its end and write its final state.
fn settle(
    spec: &SectionSpec,
    playback: &RefCell<Playback>,
    write: &impl Fn(&ElementKey, Style),
) {
    if let Some(entrance) = &spec.entrance {
        playback.borrow_mut().jump_to(entrance.timeline.total_ms());
        entrance.timeline.final_state(write);
    }
}

impl Drop for SectionController {
    fn drop(&mut self) {
        self.unmount();
    }
}
