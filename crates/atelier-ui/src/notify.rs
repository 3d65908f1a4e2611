#![forbid(unsafe_code)]

//! Leveled toast notifications with tick-driven expiry.
//!
//! Posting a toast of a level replaces any visible toast of the same level
//! unless explicitly allowed to stack, mirroring the dedup-by-type rule of
//! the contact surface this was built for. A zero duration makes a toast
//! sticky until dismissed.
//!
//! The notifier is a theme subscriber: success and info adopt the active
//! palette's accent and primary colors; error and warning keep their fixed
//! red and amber so severity reads the same under every theme.

use std::time::{Duration, Instant};

use atelier_theme::{Rgb, ThemeChange, ThemeSubscriber};

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Success,
    Error,
    Warning,
    Info,
}

impl Level {
    pub const fn icon(self) -> &'static str {
        match self {
            Level::Success => "✓",
            Level::Error => "✕",
            Level::Warning => "⚠",
            Level::Info => "ℹ",
        }
    }

    /// Default visible duration per level.
    pub const fn default_duration(self) -> Duration {
        match self {
            Level::Success => Duration::from_secs(4),
            Level::Error => Duration::from_secs(6),
            Level::Warning => Duration::from_secs(5),
            Level::Info => Duration::from_secs(4),
        }
    }
}

/// Handle to a visible toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

/// A visible notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub level: Level,
    pub title: Option<String>,
    pub message: String,
    pub color: Rgb,
    deadline: Option<Instant>,
}

impl Toast {
    pub fn is_sticky(&self) -> bool {
        self.deadline.is_none()
    }
}

const ERROR_RED: Rgb = Rgb::rgb(239, 68, 68);
const WARNING_AMBER: Rgb = Rgb::rgb(245, 158, 11);
const INFO_BLUE: Rgb = Rgb::rgb(59, 130, 246);
const SUCCESS_GREEN: Rgb = Rgb::rgb(16, 185, 129);

#[derive(Debug, Clone, Copy)]
struct LevelColors {
    success: Rgb,
    error: Rgb,
    warning: Rgb,
    info: Rgb,
}

impl LevelColors {
    const FIXED: LevelColors = LevelColors {
        success: SUCCESS_GREEN,
        error: ERROR_RED,
        warning: WARNING_AMBER,
        info: INFO_BLUE,
    };

    fn for_level(&self, level: Level) -> Rgb {
        match level {
            Level::Success => self.success,
            Level::Error => self.error,
            Level::Warning => self.warning,
            Level::Info => self.info,
        }
    }
}

/// Manages the set of visible toasts.
#[derive(Debug)]
pub struct Notifier {
    active: Vec<Toast>,
    colors: LevelColors,
    next_id: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            colors: LevelColors::FIXED,
            next_id: 1,
        }
    }

    /// Post a toast. `duration` of zero means sticky; `unique` replaces
    /// any visible toast of the same level first.
    pub fn show(
        &mut self,
        message: impl Into<String>,
        level: Level,
        duration: Duration,
        unique: bool,
        now: Instant,
    ) -> ToastId {
        if unique {
            self.active.retain(|t| t.level != level);
        }
        let id = ToastId(self.next_id);
        self.next_id += 1;
        let deadline = (!duration.is_zero()).then(|| now + duration);
        self.active.push(Toast {
            id,
            level,
            title: None,
            message: message.into(),
            color: self.colors.for_level(level),
            deadline,
        });
        tracing::debug!(?level, "toast shown");
        id
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) -> ToastId {
        self.show(message, Level::Success, Level::Success.default_duration(), true, now)
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) -> ToastId {
        self.show(message, Level::Error, Level::Error.default_duration(), true, now)
    }

    pub fn warning(&mut self, message: impl Into<String>, now: Instant) -> ToastId {
        self.show(message, Level::Warning, Level::Warning.default_duration(), true, now)
    }

    pub fn info(&mut self, message: impl Into<String>, now: Instant) -> ToastId {
        self.show(message, Level::Info, Level::Info.default_duration(), true, now)
    }

    /// Expire toasts whose deadline has passed. Returns the expired ids.
    pub fn tick(&mut self, now: Instant) -> Vec<ToastId> {
        let mut expired = Vec::new();
        self.active.retain(|t| match t.deadline {
            Some(deadline) if deadline <= now => {
                expired.push(t.id);
                false
            }
            _ => true,
        });
        expired
    }

    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.active.len();
        self.active.retain(|t| t.id != id);
        self.active.len() != before
    }

    pub fn clear_all(&mut self) {
        self.active.clear();
    }

    pub fn visible(&self) -> &[Toast] {
        &self.active
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeSubscriber for Notifier {
    fn name(&self) -> &'static str {
        "notifier"
    }

    fn theme_changed(&mut self, change: &ThemeChange) {
        let colors = &change.palette.colors;
        self.colors = LevelColors {
            success: colors.accent,
            info: colors.primary,
            // Severity colors stay fixed across themes.
            error: ERROR_RED,
            warning: WARNING_AMBER,
        };
        // Restyle what is already on screen.
        for toast in &mut self.active {
            toast.color = self.colors.for_level(toast.level);
        }
    }
}
