#![forbid(unsafe_code)]

//! Scroll-driven animation state: eased counters, one-shot reveals, and
//! the global pause toggle.
//!
//! Counters ease out cubically from zero to their target; reveal tracking
//! fires once per element when it first crosses the visibility threshold.
//! The system subscribes to theme changes and adopts the palette's timing
//! for subsequently started animations.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use atelier_theme::{CubicBezier, ThemeChange, ThemeSubscriber};

const REVEAL_THRESHOLD: f32 = 0.1;
const COUNTER_DURATION: Duration = Duration::from_millis(1500);

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// An eased zero-to-target counter.
#[derive(Debug, Clone, Copy)]
pub struct Counter {
    target: i64,
    duration: Duration,
    started_at: Instant,
}

impl Counter {
    pub fn start(target: i64, now: Instant) -> Self {
        Self {
            target,
            duration: COUNTER_DURATION,
            started_at: now,
        }
    }

    /// Current displayed value. Reaches the exact target at completion.
    pub fn value(&self, now: Instant) -> i64 {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.duration {
            return self.target;
        }
        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        (self.target as f32 * ease_out_cubic(progress)).floor() as i64
    }

    pub fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }
}

/// Scroll-driven animation coordinator.
#[derive(Debug)]
pub struct AnimationSystem {
    paused: bool,
    revealed: HashSet<String>,
    counters: Vec<(String, Counter)>,
    theme_duration: Duration,
    theme_easing: CubicBezier,
}

impl AnimationSystem {
    pub fn new() -> Self {
        Self {
            paused: false,
            revealed: HashSet::new(),
            counters: Vec::new(),
            theme_duration: Duration::from_millis(300),
            theme_easing: CubicBezier::new(0.16, 1.0, 0.3, 1.0),
        }
    }

    /// Report an element's visibility ratio. Returns `true` the first
    /// time it crosses the threshold; later sightings are ignored.
    pub fn observe(&mut self, element: &str, ratio: f32) -> bool {
        if self.paused || ratio < REVEAL_THRESHOLD {
            return false;
        }
        if self.revealed.contains(element) {
            return false;
        }
        self.revealed.insert(element.to_string());
        tracing::debug!(element, "reveal triggered");
        true
    }

    /// Start a counter for a stat element, once.
    pub fn start_counter(&mut self, element: &str, target: i64, now: Instant) {
        if self.counters.iter().any(|(name, _)| name == element) {
            return;
        }
        self.counters.push((element.to_string(), Counter::start(target, now)));
    }

    pub fn counter_value(&self, element: &str, now: Instant) -> Option<i64> {
        self.counters
            .iter()
            .find(|(name, _)| name == element)
            .map(|(_, c)| c.value(now))
    }

    /// Toggle the global pause state, returning the new value.
    pub fn toggle_paused(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Timing adopted from the active theme.
    pub fn theme_timing(&self) -> (Duration, CubicBezier) {
        (self.theme_duration, self.theme_easing)
    }
}

impl Default for AnimationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeSubscriber for AnimationSystem {
    fn name(&self) -> &'static str {
        "animations"
    }

    fn theme_changed(&mut self, change: &ThemeChange) {
        self.theme_duration = change.palette.animation.duration;
        self.theme_easing = change.palette.animation.easing;
    }
}
