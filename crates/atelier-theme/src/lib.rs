#![forbid(unsafe_code)]

//! Seasonal theme engine for the Atelier presentation stack.
//!
//! # Role in Atelier
//! `atelier-theme` owns everything theme-shaped: the closed set of seasonal
//! palettes, the persisted user preferences, the calendar-driven selection
//! rule, and the applicator that pushes a palette into the shared style
//! scope and manages the lifecycle of decorative stage elements.
//!
//! # This crate provides
//! - [`ThemeId`] and the static palette registry ([`palette`], [`resolve`]).
//! - [`Preferences`] and [`PreferenceStore`] for durable user settings.
//! - [`determine_initial_theme`], the startup selection rule.
//! - [`ThemeEngine`], the single writer of the style scope and stage.
//! - [`DecorationManager`], teardown-before-setup decoration generations.
//! - [`ThemeSubscriber`], the contract UI modules implement to restyle
//!   themselves on theme changes.
//!
//! # How it fits in the system
//! `atelier-ui` modules read palettes and register as subscribers;
//! `atelier-app` wires the engine to a stage and drives it from its event
//! loop. The engine is the only writer of the scope and stage; everyone
//! else reads.

/// Decoration generations and tick-driven spawner timers.
pub mod decor;
/// The theme engine: applicator, observer list, public operations.
pub mod engine;
/// Closed theme set, color/gradient types, and the palette registry.
pub mod palette;
/// Persisted preferences and their storage backends.
pub mod prefs;
/// Named style variables with atomic replacement.
pub mod scope;
/// Startup theme selection from preferences and calendar month.
pub mod selector;
/// The host surface: root marker class and decoration layer.
pub mod stage;

pub use decor::DecorationManager;
pub use engine::{ThemeChange, ThemeEngine, ThemeSubscriber};
pub use palette::{
    AnimationSpec, AnimationStyle, ColorSet, CubicBezier, DecorationKind, DecorationSpec, Gradient,
    GradientStop, PaletteDefinition, Rgb, ThemeId, palette, palettes, resolve,
};
pub use prefs::{FileBackend, MemoryBackend, PreferenceStore, Preferences, StorageBackend};
pub use scope::{StyleScope, StyleValue};
pub use selector::{auto_candidate, determine_initial_theme};
pub use stage::{DECORATION_LAYER, Node, NodeId, Stage};
