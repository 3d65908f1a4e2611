#![forbid(unsafe_code)]

//! Product carousel with tick-driven autoplay.
//!
//! Autoplay is a single `Option<Instant>` deadline, recreated on every
//! manual navigation and pause/play transition. There is exactly one
//! pending advance at any time, so repeated pause/restart cycles can never
//! stack intervals.

use std::time::{Duration, Instant};

/// Carousel configuration.
#[derive(Debug, Clone)]
pub struct CarouselConfig {
    pub auto_play: bool,
    pub interval: Duration,
    pub pause_on_hover: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_play: true,
            interval: Duration::from_secs(4),
            pause_on_hover: true,
        }
    }
}

/// Snapshot of carousel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselStatus {
    pub current: usize,
    pub total: usize,
    pub playing: bool,
}

/// Rotating product showcase.
#[derive(Debug)]
pub struct ProductCarousel {
    slides: Vec<String>,
    current: usize,
    playing: bool,
    hovered: bool,
    next_advance: Option<Instant>,
    config: CarouselConfig,
}

impl ProductCarousel {
    pub fn new(slides: Vec<String>, config: CarouselConfig, now: Instant) -> Self {
        if slides.is_empty() {
            tracing::warn!("carousel created without slides; autoplay disabled");
        }
        let playing = config.auto_play && !slides.is_empty();
        let next_advance = playing.then(|| now + config.interval);
        Self {
            slides,
            current: 0,
            playing,
            hovered: false,
            next_advance,
            config,
        }
    }

    pub fn status(&self) -> CarouselStatus {
        CarouselStatus {
            current: self.current,
            total: self.slides.len(),
            playing: self.playing,
        }
    }

    pub fn current_slide(&self) -> Option<&str> {
        self.slides.get(self.current).map(String::as_str)
    }

    /// Jump to a slide. Out-of-range indices are rejected. Manual
    /// navigation restarts the autoplay deadline.
    pub fn go_to(&mut self, index: usize, now: Instant) -> bool {
        if index >= self.slides.len() {
            return false;
        }
        self.current = index;
        self.restart_autoplay(now);
        true
    }

    pub fn next(&mut self, now: Instant) {
        if self.slides.is_empty() {
            return;
        }
        let next = (self.current + 1) % self.slides.len();
        self.go_to(next, now);
    }

    pub fn previous(&mut self, now: Instant) {
        if self.slides.is_empty() {
            return;
        }
        let prev = (self.current + self.slides.len() - 1) % self.slides.len();
        self.go_to(prev, now);
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        if self.config.pause_on_hover {
            self.hovered = hovered;
        }
    }

    pub fn toggle_play(&mut self, now: Instant) {
        if self.playing {
            self.pause();
        } else {
            self.play(now);
        }
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.next_advance = None;
    }

    pub fn play(&mut self, now: Instant) {
        if self.slides.is_empty() {
            return;
        }
        self.playing = true;
        self.next_advance = Some(now + self.config.interval);
    }

    fn restart_autoplay(&mut self, now: Instant) {
        if self.playing {
            self.next_advance = Some(now + self.config.interval);
        }
    }

    /// Advance when the autoplay deadline has passed. Returns `true` when
    /// a slide change happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.playing || self.hovered {
            return false;
        }
        match self.next_advance {
            Some(due) if due <= now => {
                let next = (self.current + 1) % self.slides.len();
                self.current = next;
                self.next_advance = Some(now + self.config.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("look {i}")).collect()
    }

    fn carousel(n: usize, now: Instant) -> ProductCarousel {
        ProductCarousel::new(slides(n), CarouselConfig::default(), now)
    }

    #[test]
    fn navigation_wraps_both_directions() {
        let now = Instant::now();
        let mut c = carousel(3, now);

        c.previous(now);
        assert_eq!(c.status().current, 2);
        c.next(now);
        assert_eq!(c.status().current, 0);
    }

    #[test]
    fn go_to_rejects_out_of_range() {
        let now = Instant::now();
        let mut c = carousel(3, now);
        assert!(!c.go_to(3, now));
        assert_eq!(c.status().current, 0);
    }

    #[test]
    fn autoplay_advances_on_schedule() {
        let now = Instant::now();
        let mut c = carousel(3, now);

        assert!(!c.tick(now + Duration::from_secs(3)));
        assert!(c.tick(now + Duration::from_secs(4)));
        assert_eq!(c.status().current, 1);
    }

    #[test]
    fn manual_navigation_restarts_the_interval() {
        let now = Instant::now();
        let mut c = carousel(3, now);

        // 3.5s in, navigate manually; the pending advance at 4s must be
        // replaced, not fired on top of the manual move.
        c.next(now + Duration::from_millis(3500));
        assert_eq!(c.status().current, 1);
        assert!(!c.tick(now + Duration::from_millis(4500)));
        assert!(c.tick(now + Duration::from_millis(7500)));
        assert_eq!(c.status().current, 2);
    }

    #[test]
    fn pause_and_restart_do_not_stack_timers() {
        let now = Instant::now();
        let mut c = carousel(3, now);

        for i in 0..10u64 {
            let t = now + Duration::from_millis(i * 100);
            c.toggle_play(t);
            c.toggle_play(t);
        }
        let resumed = now + Duration::from_secs(1);
        c.pause();
        c.play(resumed);

        // One advance per interval, no matter how often playback toggled.
        assert!(!c.tick(resumed + Duration::from_secs(3)));
        assert!(c.tick(resumed + Duration::from_secs(4)));
        assert!(!c.tick(resumed + Duration::from_millis(4001)));
    }

    #[test]
    fn hover_suspends_autoplay_when_configured() {
        let now = Instant::now();
        let mut c = carousel(3, now);

        c.set_hovered(true);
        assert!(!c.tick(now + Duration::from_secs(10)));

        c.set_hovered(false);
        assert!(c.tick(now + Duration::from_secs(10)));
    }

    #[test]
    fn empty_carousel_never_plays() {
        let now = Instant::now();
        let mut c = carousel(0, now);
        assert!(!c.status().playing);
        c.play(now);
        assert!(!c.status().playing);
        c.next(now);
        assert!(!c.tick(now + Duration::from_secs(60)));
    }
}
