//! Single-threaded cooperative scheduling.
//!
//! The host drives a [`Scheduler`] from its display refresh signal by calling
//! [`Scheduler::tick`] with a monotonic timestamp; tests drive the same type
//! with a simulated clock. Every registration is returned as a
//! [`Subscription`] that releases itself on drop, so a component that owns its
//! subscriptions cannot leak callbacks past its own lifetime.

use fnv::FnvHashMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Timestamp handed to frame callbacks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    pub now_ms: f64,
    pub dt_ms: f64,
}

type FrameFn = Rc<RefCell<dyn FnMut(FrameTime)>>;
type TimerFn = Rc<RefCell<dyn FnMut()>>;

struct Timer {
    due_ms: f64,
    period_ms: Option<f64>,
    callback: TimerFn,
}

#[derive(Default)]
struct SchedulerInner {
    next_id: u64,
    last_tick_ms: Option<f64>,
    // Timers scheduled from inside a timer callback are relative to the due
    // time of the timer being fired, not to the wall clock of the tick.
    clock_ms: f64,
    frames: Vec<(u64, FrameFn)>,
    timers: FnvHashMap<u64, Timer>,
}

impl SchedulerInner {
    fn alloc_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn next_due(&self, now_ms: f64) -> Option<u64> {
        self.timers
            .iter()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by(|(ia, a), (ib, b)| a.due_ms.total_cmp(&b.due_ms).then(ia.cmp(ib)))
            .map(|(id, _)| *id)
    }
}

/// Cloneable handle to the shared frame/timer registry.
#[derive(Clone, Default)]
pub struct Scheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scheduler clock: the last tick time, or the due time of the
    /// timer currently firing.
    pub fn now_ms(&self) -> f64 {
        self.inner.borrow().clock_ms
    }

    /// Number of live frame callbacks and timers.
    pub fn live_count(&self) -> usize {
        let inner = self.inner.borrow();
        inner.frames.len() + inner.timers.len()
    }

    pub fn frame_count(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    pub fn timer_count(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Register a callback that runs on every tick, in registration order.
    pub fn on_frame(&self, callback: impl FnMut(FrameTime) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.alloc_id();
        inner.frames.push((id, Rc::new(RefCell::new(callback))));
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().frames.retain(|(fid, _)| *fid != id);
            }
        })
    }

    pub fn set_timeout(&self, delay_ms: f64, callback: impl FnMut() + 'static) -> Subscription {
        self.add_timer(delay_ms.max(0.0), None, callback)
    }

    pub fn set_interval(&self, period_ms: f64, callback: impl FnMut() + 'static) -> Subscription {
        let period = period_ms.max(1.0);
        self.add_timer(period, Some(period), callback)
    }

    /// Like [`Scheduler::set_interval`], but the first firing happens after
    /// `first_delay_ms` instead of a full period.
    pub fn set_interval_from(
        &self,
        first_delay_ms: f64,
        period_ms: f64,
        callback: impl FnMut() + 'static,
    ) -> Subscription {
        self.add_timer(first_delay_ms.max(0.0), Some(period_ms.max(1.0)), callback)
    }

    fn add_timer(
        &self,
        delay_ms: f64,
        period_ms: Option<f64>,
        callback: impl FnMut() + 'static,
    ) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.alloc_id();
        let due_ms = inner.clock_ms + delay_ms;
        inner.timers.insert(
            id,
            Timer {
                due_ms,
                period_ms,
                callback: Rc::new(RefCell::new(callback)),
            },
        );
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().timers.remove(&id);
            }
        })
    }

    /// Advance to `now_ms`: fire due timers in due order, then every frame
    /// callback once.
    pub fn tick(&self, now_ms: f64) {
        let dt_ms = {
            let mut inner = self.inner.borrow_mut();
            let dt = inner
                .last_tick_ms
                .map(|prev| (now_ms - prev).max(0.0))
                .unwrap_or(0.0);
            inner.last_tick_ms = Some(now_ms);
            dt
        };

        loop {
            let callback = {
                let mut guard = self.inner.borrow_mut();
                let inner = &mut *guard;
                let Some(id) = inner.next_due(now_ms) else {
                    break;
                };
                let Some(timer) = inner.timers.get_mut(&id) else {
                    break;
                };
                let due = timer.due_ms;
                let callback = timer.callback.clone();
                let period = timer.period_ms;
                if let Some(period) = period {
                    timer.due_ms += period;
                } else {
                    inner.timers.remove(&id);
                }
                inner.clock_ms = due;
                callback
            };
            let borrowed = callback.try_borrow_mut();
            if let Ok(mut f) = borrowed {
                f();
            }
        }
        self.inner.borrow_mut().clock_ms = now_ms;

        let snapshot: Vec<(u64, FrameFn)> = self.inner.borrow().frames.clone();
        let time = FrameTime { now_ms, dt_ms };
        for (id, callback) in snapshot {
            let still_registered = self.inner.borrow().frames.iter().any(|(fid, _)| *fid == id);
            if !still_registered {
                continue;
            }
            if let Ok(mut f) = callback.try_borrow_mut() {
                f(time);
            }
        }
    }
}

/// A list of listeners for a host event such as viewport resize.
pub struct Signal<T> {
    inner: Rc<RefCell<SignalInner<T>>>,
}

type ListenerFn<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct SignalInner<T> {
    next_id: u64,
    listeners: Vec<(u64, ListenerFn<T>)>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Signal<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SignalInner {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn connect(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.listeners.push((id, Rc::new(RefCell::new(listener))));
        let weak: Weak<RefCell<SignalInner<T>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
            }
        })
    }

    pub fn emit(&self, value: &T) {
        let snapshot: Vec<(u64, ListenerFn<T>)> = self.inner.borrow().listeners.clone();
        for (id, listener) in snapshot {
            let still_connected = self.inner.borrow().listeners.iter().any(|(lid, _)| *lid == id);
            if !still_connected {
                continue;
            }
            if let Ok(mut f) = listener.try_borrow_mut() {
                f(value);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Scoped registration. Released by [`Subscription::cancel`] or on drop.
#[must_use = "dropping a Subscription releases the registration immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub(crate) fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription that holds nothing.
    pub fn empty() -> Self {
        Self { release: None }
    }

    /// Release the registration. Safe to call any number of times.
    pub fn cancel(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Keep the registration for the rest of the program.
    pub fn detach(mut self) {
        self.release = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
