//! Floating hero particles.
//!
//! A burst of particles at start, one more every `interval_ms`, each removed
//! `lifetime_ms` after it appeared. At steady state the field holds at most
//! `initial + lifetime / interval` particles. Spawning pauses while the page
//! is hidden; particles already on screen still expire on schedule.

use std::collections::HashMap;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::app::ports::DomPort;
use crate::scheduler::{Scheduler, TimerId, TimerTag};

/// Identity of one particle element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleId(pub u32);

/// Randomised look of one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleStyle {
    /// Diameter, 1–5 px.
    pub size_px: f64,
    /// Horizontal position, 0–100 %.
    pub left_pct: f64,
    /// Vertical position, 0–100 %.
    pub top_pct: f64,
    /// Float animation period, 4–12 s.
    pub float_s: f64,
    /// Animation delay, 0–2 s.
    pub delay_s: f64,
}

impl ParticleStyle {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            size_px: rng.random::<f64>() * 4.0 + 1.0,
            left_pct: rng.random::<f64>() * 100.0,
            top_pct: rng.random::<f64>() * 100.0,
            float_s: rng.random::<f64>() * 8.0 + 4.0,
            delay_s: rng.random::<f64>() * 2.0,
        }
    }

    /// Inline style for the particle element.
    pub fn to_css(&self) -> String {
        format!(
            "position: absolute; width: {size:.2}px; height: {size:.2}px; \
             background: rgba(255, 255, 255, 0.5); border-radius: 50%; \
             left: {left:.2}%; top: {top:.2}%; pointer-events: none; \
             animation: float {float:.2}s ease-in-out infinite; \
             animation-delay: {delay:.2}s;",
            size = self.size_px,
            left = self.left_pct,
            top = self.top_pct,
            float = self.float_s,
            delay = self.delay_s,
        )
    }
}

pub struct ParticleField {
    rng: SmallRng,
    next_id: u32,
    /// Live particles and their expiry timers.
    live: HashMap<ParticleId, TimerId>,
    spawn_timer: Option<TimerId>,
    interval_ms: u64,
    lifetime_ms: u64,
    initial: u16,
    started: bool,
    spawned_total: u64,
}

impl ParticleField {
    pub fn new(seed: u64, initial: u16, interval_ms: u64, lifetime_ms: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            next_id: 0,
            live: HashMap::new(),
            spawn_timer: None,
            interval_ms,
            lifetime_ms,
            initial,
            started: false,
            spawned_total: 0,
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn spawned_total(&self) -> u64 {
        self.spawned_total
    }

    pub fn is_spawning(&self) -> bool {
        self.spawn_timer.is_some()
    }

    /// Upper bound on simultaneously live particles.
    pub fn steady_state_bound(&self) -> usize {
        self.initial as usize + self.lifetime_ms.div_ceil(self.interval_ms.max(1)) as usize
    }

    /// Initial burst plus the periodic spawner.
    pub fn start(&mut self, timers: &mut Scheduler, dom: &mut impl DomPort) {
        if self.started {
            return;
        }
        self.started = true;
        for _ in 0..self.initial {
            self.spawn(timers, dom);
        }
        self.resume_spawning(timers);
    }

    fn spawn(&mut self, timers: &mut Scheduler, dom: &mut impl DomPort) {
        let id = ParticleId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let style = ParticleStyle::random(&mut self.rng);
        dom.spawn_particle(id, &style);
        let expiry = timers.schedule_once(self.lifetime_ms, TimerTag::ParticleExpire(id.0));
        self.live.insert(id, expiry);
        self.spawned_total += 1;
    }

    fn resume_spawning(&mut self, timers: &mut Scheduler) {
        if let Some(old) = self.spawn_timer.take() {
            timers.cancel(old);
        }
        self.spawn_timer = Some(timers.schedule_repeating(self.interval_ms, TimerTag::ParticleSpawn));
    }

    /// Page hidden: stop spawning. Visible again: resume.
    pub fn set_hidden(&mut self, hidden: bool, timers: &mut Scheduler) {
        if !self.started {
            return;
        }
        if hidden {
            if let Some(id) = self.spawn_timer.take() {
                timers.cancel(id);
                debug!("Particles: spawning paused");
            }
        } else if self.spawn_timer.is_none() {
            self.resume_spawning(timers);
        }
    }

    /// Spawn or expire on our own timers. Returns `true` if handled.
    pub fn on_timer(
        &mut self,
        id: TimerId,
        tag: TimerTag,
        timers: &mut Scheduler,
        dom: &mut impl DomPort,
    ) -> bool {
        match tag {
            TimerTag::ParticleSpawn if self.spawn_timer == Some(id) => {
                self.spawn(timers, dom);
                true
            }
            TimerTag::ParticleExpire(raw) => {
                let pid = ParticleId(raw);
                if self.live.get(&pid) == Some(&id) {
                    self.live.remove(&pid);
                    dom.remove_particle(pid);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Cancel every timer and take every particle off the page.
    pub fn teardown(&mut self, timers: &mut Scheduler, dom: &mut impl DomPort) {
        if let Some(id) = self.spawn_timer.take() {
            timers.cancel(id);
        }
        for (pid, expiry) in self.live.drain() {
            timers.cancel(expiry);
            dom.remove_particle(pid);
        }
        self.started = false;
    }
}
