//! Typewriter headline
//!
//! Types a phrase out one character at a time, holds it, erases it and moves
//! on to the next phrase. With cycling off it types the first phrase once and
//! stops.

use std::time::{Duration, Instant};

use crate::config::{TypewriterConfig, CHARS_PER_SECOND_RANGE};
use crate::motion::MotionPreference;

/// Start of the phase after `chars` characters at `cps`, never past `now`
fn advance(start: Instant, chars: usize, cps: f64, now: Instant) -> Instant {
    Duration::try_from_secs_f64(chars as f64 / cps)
        .ok()
        .and_then(|span| start.checked_add(span))
        .map_or(now, |next| next.min(now))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterPhase {
    Typing,
    Holding,
    Erasing,
    Done,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    config: TypewriterConfig,
    phrase: usize,
    visible: usize,
    phase: TypewriterPhase,
    phase_started: Instant,
    started: Instant,
}

impl Typewriter {
    pub fn new(phrases: &[String], config: TypewriterConfig, now: Instant) -> Self {
        let phrases: Vec<String> = phrases
            .iter()
            .filter(|p| !p.trim().is_empty())
            .cloned()
            .collect();
        let phase = if phrases.is_empty() {
            TypewriterPhase::Done
        } else {
            TypewriterPhase::Typing
        };
        Self {
            phrases,
            config,
            phrase: 0,
            visible: 0,
            phase,
            phase_started: now,
            started: now,
        }
    }

    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    fn phrase_len(&self) -> usize {
        self.phrases
            .get(self.phrase)
            .map(|p| p.chars().count())
            .unwrap_or(0)
    }

    /// Advance to `now`
    pub fn update(&mut self, now: Instant, motion: &impl MotionPreference) {
        if motion.prefers_reduced_motion() {
            // Re-anchor so turning motion back on does not fast-forward
            self.phase_started = now;
            return;
        }

        let (lo, hi) = CHARS_PER_SECOND_RANGE;
        let type_cps = self.config.chars_per_second.clamp(lo, hi);
        let erase_cps = self.config.erase_chars_per_second.clamp(lo, hi);
        let hold = Duration::from_millis(self.config.hold_ms);

        loop {
            let elapsed = now.saturating_duration_since(self.phase_started).as_secs_f64();
            let len = self.phrase_len();
            match self.phase {
                TypewriterPhase::Typing => {
                    let typed = (elapsed * type_cps).floor() as usize;
                    if typed < len {
                        self.visible = typed;
                        return;
                    }
                    self.visible = len;
                    self.phase_started = advance(self.phase_started, len, type_cps, now);
                    self.phase = if self.config.cycle {
                        TypewriterPhase::Holding
                    } else {
                        TypewriterPhase::Done
                    };
                }
                TypewriterPhase::Holding => {
                    if elapsed < hold.as_secs_f64() {
                        return;
                    }
                    self.phase_started += hold;
                    self.phase = TypewriterPhase::Erasing;
                }
                TypewriterPhase::Erasing => {
                    let erased = (elapsed * erase_cps).floor() as usize;
                    if erased < len {
                        self.visible = len - erased;
                        return;
                    }
                    self.visible = 0;
                    self.phase_started = advance(self.phase_started, len, erase_cps, now);
                    self.phrase = (self.phrase + 1) % self.phrases.len().max(1);
                    self.phase = TypewriterPhase::Typing;
                }
                TypewriterPhase::Done => return,
            }
        }
    }

    /// Currently visible text
    pub fn text(&self, motion: &impl MotionPreference) -> &str {
        let Some(phrase) = self.phrases.get(self.phrase) else {
            return "";
        };
        if motion.prefers_reduced_motion() {
            return self.phrases.first().map(String::as_str).unwrap_or("");
        }
        match phrase.char_indices().nth(self.visible) {
            Some((end, _)) => &phrase[..end],
            None => phrase,
        }
    }

    pub fn caret_visible(&self, now: Instant, motion: &impl MotionPreference) -> bool {
        if motion.prefers_reduced_motion() || self.phase == TypewriterPhase::Done {
            return false;
        }
        let blink = self.config.caret_blink_ms.max(1) as u128;
        (now.saturating_duration_since(self.started).as_millis() / blink) % 2 == 0
    }

    /// Whether more frames would change what is shown
    pub fn is_animating(&self, motion: &impl MotionPreference) -> bool {
        !motion.prefers_reduced_motion() && self.phase != TypewriterPhase::Done
    }
}
