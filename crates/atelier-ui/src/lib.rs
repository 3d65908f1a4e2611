#![forbid(unsafe_code)]

//! Presentation glue for the Atelier stack.
//!
//! Each module here is a self-contained piece of UI state driven by the
//! host event loop: toasts expire on tick, the carousel advances on tick,
//! the contact form's simulated submission resolves on tick. The modules
//! that care about theming ([`notify::Notifier`], [`anim::AnimationSystem`])
//! implement [`atelier_theme::ThemeSubscriber`] and restyle themselves when
//! the engine notifies them.

/// Eased counters, reveal tracking, and the global animation toggle.
pub mod anim;
/// Product carousel with tick-driven autoplay.
pub mod carousel;
/// Contact form validation and simulated submission.
pub mod form;
/// Section navigation and scroll-derived state.
pub mod nav;
/// Leveled toast notifications.
pub mod notify;
/// Debounce/throttle helpers.
pub mod util;

pub use anim::AnimationSystem;
pub use carousel::{CarouselConfig, CarouselStatus, ProductCarousel};
pub use form::{ContactForm, Field, FieldIssue, SubmitOutcome, Submission};
pub use nav::Navigation;
pub use notify::{Level, Notifier, Toast, ToastId};
pub use util::{Debouncer, Throttle};
