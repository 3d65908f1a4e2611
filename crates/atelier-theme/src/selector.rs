#![forbid(unsafe_code)]

//! Startup theme selection.
//!
//! A pure function of the calendar month and the loaded preferences. The
//! caller supplies the month (1–12); the engine reads it from the system
//! clock exactly once at the edge.
//!
//! Selection rule:
//! 1. Auto-theme disabled → the stored theme, else the standard theme.
//! 2. Auto-theme enabled and the month has a seasonal candidate → that
//!    candidate, overriding any stored choice.
//! 3. Otherwise → the stored theme, else the standard theme.

use crate::palette::ThemeId;
use crate::prefs::Preferences;

/// The seasonal candidate for a calendar month, if any.
///
/// September and October map to mid-autumn, December to Christmas, January
/// and February to lunar new year. Every other month has no candidate.
pub fn auto_candidate(month: u32) -> Option<ThemeId> {
    match month {
        9 | 10 => Some(ThemeId::MidAutumn),
        12 => Some(ThemeId::Christmas),
        1 | 2 => Some(ThemeId::LunarNewYear),
        _ => None,
    }
}

/// Decide the theme to apply at startup.
pub fn determine_initial_theme(prefs: &Preferences, month: u32) -> ThemeId {
    let stored = prefs.current_theme.unwrap_or_default();

    if !prefs.auto_theme {
        tracing::debug!(theme = %stored, "auto theme disabled; using stored theme");
        return stored;
    }

    match auto_candidate(month) {
        Some(candidate) => {
            tracing::debug!(theme = %candidate, month, "seasonal theme selected");
            candidate
        }
        None => {
            tracing::debug!(theme = %stored, month, "no seasonal theme this month; using stored theme");
            stored
        }
    }
}
