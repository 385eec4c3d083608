//! Virtual-time timer engine.
//!
//! Every timeout and interval on the page lives here. Components never hold
//! a host timer; they hold a [`TimerId`] and the single host pump advances
//! the scheduler to the current wall-clock time.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Timer owners                          │
//! │                                                              │
//! │  ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐  │
//! │  │ Carousel │  │ Typing   │  │ Particles│  │ Form / Loader│  │
//! │  │ interval │  │ step     │  │ spawn    │  │ one-shots    │  │
//! │  └─────┬────┘  └─────┬────┘  └─────┬────┘  └──────┬───────┘  │
//! │        │ TimerId     │             │              │          │
//! │        ▼             ▼             ▼              ▼          │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │  Scheduler  (due, id) ordered queue, virtual now_ms    │  │
//! │  └───────────────────────┬────────────────────────────────┘  │
//! │                          │ run_until(now)                    │
//! │                          ▼                                   │
//! │                    TimerDelegate::on_timer_fired             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ordering: timers fire in due order, ties in creation order. A repeating
//! timer fires at most once per [`Scheduler::run_until`]: if it fell more
//! than one period behind, the missed periods are skipped and it stays on
//! its original phase. A timer popped more than [`LATE_AFTER_MS`] after its
//! due time runs at the pump time instead, so a chain of one-shots restarts
//! from the present rather than replaying the gap. Ids are never reused, so a stale id can neither
//! cancel nor match a newer timer.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::app::ports::TimerDelegate;

/// How far behind a timer may fire and still run at its own due time.
pub const LATE_AFTER_MS: u64 = 1000;

// ═══════════════════════════════════════════════════════════════
//  Timer identity
// ═══════════════════════════════════════════════════════════════

/// Owned handle to one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// What a timer is for. Routed by the service to the owning component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerTag {
    /// Loader minimum display time elapsed: start the fade.
    LoaderFade,
    /// Loader fade finished: remove it.
    LoaderRemove,
    /// Header scroll throttle window closed.
    HeaderThrottle,
    /// Back-to-top scroll throttle window closed.
    BackToTopThrottle,
    /// Next typing-effect step.
    TypingStep,
    /// Periodic particle spawn.
    ParticleSpawn,
    /// Particle lifetime elapsed.
    ParticleExpire(u32),
    /// Carousel auto-advance.
    CarouselAdvance,
    /// Simulated contact-form delivery latency elapsed.
    FormDelivery,
    /// Contact-form status message display time elapsed.
    FormStatusHide,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
struct Slot {
    due_ms: u64,
    tag: TimerTag,
    /// `Some(period)` for repeating timers.
    period_ms: Option<u64>,
}

/// The scheduler engine.
///
/// Decoupled from the widgets: when a timer fires it invokes the
/// [`TimerDelegate`] rather than calling into a component directly, so the
/// engine is testable on its own.
#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    /// Fire order: `(due, id)`.
    queue: BTreeMap<(u64, TimerId), ()>,
    slots: HashMap<TimerId, Slot>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time (milliseconds since the page started).
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fire once, `delay_ms` from now.
    pub fn schedule_once(&mut self, delay_ms: u64, tag: TimerTag) -> TimerId {
        self.insert(delay_ms, tag, None)
    }

    /// Fire every `period_ms`, first time one period from now.
    /// A zero period is treated as 1 ms.
    pub fn schedule_repeating(&mut self, period_ms: u64, tag: TimerTag) -> TimerId {
        let period = period_ms.max(1);
        self.insert(period, tag, Some(period))
    }

    fn insert(&mut self, delay_ms: u64, tag: TimerTag, period_ms: Option<u64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due_ms = self.now_ms.saturating_add(delay_ms);
        self.queue.insert((due_ms, id), ());
        self.slots.insert(id, Slot { due_ms, tag, period_ms });
        id
    }

    /// Cancel a timer. Returns `false` if it already fired (one-shot) or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.slots.remove(&id) {
            Some(slot) => {
                self.queue.remove(&(slot.due_ms, id));
                true
            }
            None => false,
        }
    }

    /// Cancel every pending timer. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.slots.len();
        self.slots.clear();
        self.queue.clear();
        if n > 0 {
            debug!("Scheduler: cancelled {} pending timers", n);
        }
        n
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.slots.len()
    }

    /// Tag of a pending timer.
    pub fn tag_of(&self, id: TimerId) -> Option<TimerTag> {
        self.slots.get(&id).map(|s| s.tag)
    }

    /// Due time of the earliest pending timer.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.queue.keys().next().map(|&(due, _)| due)
    }

    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// Virtual time advances to the popped timer's due time, so timers
    /// scheduled from its callback are relative to when it was due, not to
    /// `until_ms`. A timer more than [`LATE_AFTER_MS`] late runs at
    /// `until_ms`. Repeating timers are re-queued on the first period
    /// boundary after `until_ms`.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerId, TimerTag)> {
        let &(due_ms, id) = self.queue.keys().next()?;
        if due_ms > until_ms {
            return None;
        }
        self.queue.remove(&(due_ms, id));
        let fire_at = if until_ms - due_ms > LATE_AFTER_MS {
            until_ms
        } else {
            due_ms
        };
        self.now_ms = self.now_ms.max(fire_at);

        let slot = self.slots.get_mut(&id)?;
        let tag = slot.tag;
        match slot.period_ms {
            Some(period) => {
                let mut next = due_ms.saturating_add(period);
                if next <= until_ms {
                    let missed = (until_ms - due_ms) / period;
                    next = due_ms.saturating_add(period.saturating_mul(missed + 1));
                    debug!("Scheduler: {:?} skipped {} missed periods", tag, missed);
                }
                slot.due_ms = next;
                self.queue.insert((next, id), ());
            }
            None => {
                self.slots.remove(&id);
            }
        }
        Some((id, tag))
    }

    /// Fire everything due up to `until_ms`, then set the clock to it.
    ///
    /// Time never moves backwards: an `until_ms` in the past is a no-op.
    /// Returns the number of timers fired.
    pub fn run_until(&mut self, until_ms: u64, delegate: &mut dyn TimerDelegate) -> usize {
        if until_ms < self.now_ms {
            return 0;
        }
        let mut fired = 0;
        while let Some((id, tag)) = self.pop_due(until_ms) {
            fired += 1;
            delegate.on_timer_fired(self, id, tag);
        }
        self.now_ms = until_ms;
        fired
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
