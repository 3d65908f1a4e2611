#![forbid(unsafe_code)]

//! Section navigation and scroll-derived presentation state.
//!
//! The navigation owns the ordered section registry and derives everything
//! else from the current scroll offset: the active section, the header's
//! "scrolled" styling, whether the header hides (scrolling down past a
//! threshold) or shows (any upward scroll), overall scroll progress, and
//! back-to-top visibility.
//!
//! Raw scroll events are throttled and resize events debounced through
//! [`handle_scroll`](Navigation::handle_scroll) /
//! [`handle_resize`](Navigation::handle_resize); `tick` flushes the
//! pending resize once the burst settles.

use std::time::{Duration, Instant};

use crate::util::{Debouncer, Throttle};

const SCROLLED_THRESHOLD: f32 = 50.0;
const HIDE_THRESHOLD: f32 = 200.0;
const BACK_TO_TOP_THRESHOLD: f32 = 300.0;
const HEADER_OFFSET: f32 = 100.0;
const MOBILE_BREAKPOINT: f32 = 768.0;
const SCROLL_THROTTLE: Duration = Duration::from_millis(100);
const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);

/// One page section, in page order.
#[derive(Debug, Clone)]
pub struct Section {
    pub id: String,
    pub top: f32,
    pub height: f32,
}

/// Navigation state machine.
#[derive(Debug)]
pub struct Navigation {
    sections: Vec<Section>,
    scroll_y: f32,
    last_scroll_y: f32,
    viewport_height: f32,
    page_height: f32,
    header_hidden: bool,
    menu_open: bool,
    scroll_throttle: Throttle,
    resize_debounce: Debouncer,
    pending_resize: Option<(f32, f32, f32)>,
}

impl Navigation {
    pub fn new(sections: Vec<Section>, viewport_height: f32, page_height: f32) -> Self {
        Self {
            sections,
            scroll_y: 0.0,
            last_scroll_y: 0.0,
            viewport_height,
            page_height,
            header_hidden: false,
            menu_open: false,
            scroll_throttle: Throttle::new(SCROLL_THROTTLE),
            resize_debounce: Debouncer::new(RESIZE_DEBOUNCE),
            pending_resize: None,
        }
    }

    /// Throttled scroll entry point for raw event streams. Returns `true`
    /// when the event was applied rather than swallowed.
    pub fn handle_scroll(&mut self, y: f32, now: Instant) -> bool {
        if !self.scroll_throttle.allow(now) {
            return false;
        }
        self.on_scroll(y);
        true
    }

    /// Debounced resize entry point; the last burst value wins when
    /// `tick` flushes it.
    pub fn handle_resize(
        &mut self,
        viewport_width: f32,
        viewport_height: f32,
        page_height: f32,
        now: Instant,
    ) {
        self.pending_resize = Some((viewport_width, viewport_height, page_height));
        self.resize_debounce.trigger(now);
    }

    /// Flush a settled resize burst.
    pub fn tick(&mut self, now: Instant) {
        if self.resize_debounce.poll(now) {
            if let Some((w, h, page)) = self.pending_resize.take() {
                self.on_resize(w, h, page);
            }
        }
    }

    /// Scroll to a section, returning the target offset. Unknown sections
    /// are a logged no-op.
    pub fn scroll_to(&mut self, section_id: &str) -> Option<f32> {
        let Some(section) = self.sections.iter().find(|s| s.id == section_id) else {
            tracing::warn!(section = section_id, "unknown section; not scrolling");
            return None;
        };
        let target = (section.top - HEADER_OFFSET).max(0.0);
        self.on_scroll(target);
        // Navigating always closes the mobile menu.
        self.menu_open = false;
        Some(target)
    }

    /// Record a new scroll offset and update derived state.
    pub fn on_scroll(&mut self, y: f32) {
        let y = y.max(0.0);
        self.last_scroll_y = self.scroll_y;
        self.scroll_y = y;
        // Hide when moving down past the threshold, show on any upward move.
        self.header_hidden = y > self.last_scroll_y && y > HIDE_THRESHOLD;
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// The section currently under the header offset, if any.
    pub fn active_section(&self) -> Option<&str> {
        let probe = self.scroll_y + HEADER_OFFSET;
        self.sections
            .iter()
            .rev()
            .find(|s| probe >= s.top && probe < s.top + s.height)
            .map(|s| s.id.as_str())
    }

    pub fn is_scrolled(&self) -> bool {
        self.scroll_y > SCROLLED_THRESHOLD
    }

    pub fn header_hidden(&self) -> bool {
        self.header_hidden
    }

    /// Scroll progress as a percentage of the scrollable range.
    pub fn progress(&self) -> f32 {
        let max = self.page_height - self.viewport_height;
        if max <= 0.0 {
            return 0.0;
        }
        (self.scroll_y / max * 100.0).min(100.0)
    }

    pub fn back_to_top_visible(&self) -> bool {
        self.scroll_y > BACK_TO_TOP_THRESHOLD
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Apply a viewport resize; closes the mobile menu once the layout
    /// goes wide.
    pub fn on_resize(&mut self, viewport_width: f32, viewport_height: f32, page_height: f32) {
        self.viewport_height = viewport_height;
        self.page_height = page_height;
        if viewport_width > MOBILE_BREAKPOINT {
            self.menu_open = false;
        }
    }
}
