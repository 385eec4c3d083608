//! Hero typing effect.
//!
//! Each step either types or deletes one character of the current phrase
//! and decides how long to wait before the next step:
//!
//! | situation                          | delay            |
//! |------------------------------------|------------------|
//! | typed a character                  | `char_ms`        |
//! | deleted a character                | `delete_ms`      |
//! | phrase fully typed                 | `hold_ms`        |
//! | phrase fully deleted               | `next_phrase_ms` |
//!
//! Lengths are counted in `char`s, so multi-byte text never gets split.

use crate::app::ports::DomPort;
use crate::config::PageConfig;
use crate::scheduler::{Scheduler, TimerId, TimerTag};

/// Delays driving the effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingTimings {
    pub char_ms: u64,
    pub delete_ms: u64,
    pub hold_ms: u64,
    pub next_phrase_ms: u64,
    pub start_delay_ms: u64,
}

impl From<&PageConfig> for TypingTimings {
    fn from(c: &PageConfig) -> Self {
        Self {
            char_ms: c.typing_char_ms,
            delete_ms: c.typing_delete_ms,
            hold_ms: c.typing_hold_ms,
            next_phrase_ms: c.typing_next_phrase_ms,
            start_delay_ms: c.typing_start_delay_ms,
        }
    }
}

/// Output of one step: the text to show and the wait before the next step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub delay_ms: u64,
}

pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    timings: TypingTimings,
    phrase: usize,
    chars: usize,
    deleting: bool,
    timer: Option<TimerId>,
}

impl Typewriter {
    pub fn new(phrases: &[String], timings: TypingTimings) -> Self {
        Self {
            phrases: phrases.iter().map(|p| p.chars().collect()).collect(),
            timings,
            phrase: 0,
            chars: 0,
            deleting: false,
            timer: None,
        }
    }

    /// Compute the next frame and advance the cursor.
    pub fn step(&mut self) -> TypingFrame {
        let Some(current) = self.phrases.get(self.phrase) else {
            return TypingFrame {
                text: String::new(),
                delay_ms: self.timings.next_phrase_ms,
            };
        };
        let len = current.len();

        let mut delay_ms = if self.deleting {
            self.chars = self.chars.saturating_sub(1);
            self.timings.delete_ms
        } else {
            self.chars = (self.chars + 1).min(len);
            self.timings.char_ms
        };
        let text: String = current[..self.chars].iter().collect();

        if !self.deleting && self.chars == len {
            delay_ms = self.timings.hold_ms;
            self.deleting = true;
        } else if self.deleting && self.chars == 0 {
            self.deleting = false;
            self.phrase = (self.phrase + 1) % self.phrases.len();
            delay_ms = self.timings.next_phrase_ms;
        }

        TypingFrame { text, delay_ms }
    }

    /// Schedule the first step.
    pub fn start(&mut self, timers: &mut Scheduler) {
        self.stop(timers);
        self.timer = Some(timers.schedule_once(self.timings.start_delay_ms, TimerTag::TypingStep));
    }

    pub fn stop(&mut self, timers: &mut Scheduler) {
        if let Some(id) = self.timer.take() {
            timers.cancel(id);
        }
    }

    /// Run one step if `id` is our timer, then schedule the next.
    pub fn on_timer(&mut self, id: TimerId, timers: &mut Scheduler, dom: &mut impl DomPort) -> bool {
        if self.timer != Some(id) {
            return false;
        }
        let frame = self.step();
        dom.set_typed_text(&frame.text);
        self.timer = Some(timers.schedule_once(frame.delay_ms, TimerTag::TypingStep));
        true
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }
}
