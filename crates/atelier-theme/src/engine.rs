#![forbid(unsafe_code)]

//! The theme engine: the single writer of the style scope and stage.
//!
//! Applying a theme runs a fixed pipeline: resolve the palette, swap the
//! full style scope, replace the root marker, hand the palette to the
//! decoration manager, persist the choice, then notify every subscriber.
//! Steps execute in that order with no interleaving; a reentrant apply
//! (a subscriber calling back into the engine) is logged and skipped.
//!
//! Subscribers are held in an explicit observer list and notified
//! synchronously. Each dispatch is isolated: a panicking subscriber is
//! caught and logged, and the remaining subscribers are still notified.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

use crate::decor::DecorationManager;
use crate::palette::{PaletteDefinition, ThemeId, palette, palettes};
use crate::prefs::{PreferenceStore, Preferences};
use crate::scope::StyleScope;
use crate::selector::{auto_candidate, determine_initial_theme};
use crate::stage::Stage;

/// Notification payload delivered to subscribers on every theme change.
#[derive(Debug, Clone, Copy)]
pub struct ThemeChange {
    pub id: ThemeId,
    pub palette: &'static PaletteDefinition,
}

/// The capability a UI module implements to restyle itself on theme
/// changes. Registration is the only wiring; there is no runtime shape
/// check.
pub trait ThemeSubscriber {
    /// Stable name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Called synchronously after a theme has been applied.
    fn theme_changed(&mut self, change: &ThemeChange);
}

impl<S: ThemeSubscriber> ThemeSubscriber for std::rc::Rc<std::cell::RefCell<S>> {
    fn name(&self) -> &'static str {
        self.borrow().name()
    }

    fn theme_changed(&mut self, change: &ThemeChange) {
        self.borrow_mut().theme_changed(change);
    }
}

/// Owns the registry view, preferences, style scope, stage, decoration
/// manager, and the observer list.
pub struct ThemeEngine {
    store: PreferenceStore,
    prefs: Preferences,
    scope: StyleScope,
    stage: Stage,
    decor: DecorationManager,
    subscribers: Vec<Box<dyn ThemeSubscriber>>,
    current: ThemeId,
    applying: bool,
}

impl std::fmt::Debug for ThemeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeEngine")
            .field("current", &self.current)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl ThemeEngine {
    pub fn new(store: PreferenceStore, stage: Stage) -> Self {
        let prefs = store.load();
        Self {
            store,
            prefs,
            scope: StyleScope::new(),
            stage,
            decor: DecorationManager::new(),
            subscribers: Vec::new(),
            current: ThemeId::Default,
            applying: false,
        }
    }

    /// Swap in a deterministic decoration manager (tests, demos).
    pub fn with_decoration_seed(mut self, seed: u64) -> Self {
        self.decor = DecorationManager::with_seed(seed);
        self
    }

    /// Register a subscriber. Subscribers are notified in registration
    /// order.
    pub fn subscribe(&mut self, subscriber: Box<dyn ThemeSubscriber>) {
        tracing::debug!(subscriber = subscriber.name(), "theme subscriber registered");
        self.subscribers.push(subscriber);
    }

    /// Run the startup selection rule for the given calendar month and
    /// apply the result.
    pub fn startup(&mut self, month: u32, now: Instant) -> ThemeId {
        let id = determine_initial_theme(&self.prefs, month);
        self.apply_theme(id, now);
        tracing::info!(theme = %id, "theme system ready");
        id
    }

    /// Validated public entry point. Unknown identifiers are rejected:
    /// the active theme, scope, and decorations stay untouched.
    pub fn set_theme(&mut self, id: &str, now: Instant) -> bool {
        let Some(id) = ThemeId::parse(id) else {
            tracing::warn!(theme = id, "unknown theme; not applied");
            return false;
        };
        self.apply_theme(id, now);
        true
    }

    /// Re-run the calendar rule, ignoring the persisted choice for this
    /// one call, and apply the result.
    pub fn set_auto_theme(&mut self, month: u32, now: Instant) -> ThemeId {
        let id = auto_candidate(month).unwrap_or_default();
        self.apply_theme(id, now);
        id
    }

    pub fn current_theme(&self) -> ThemeId {
        self.current
    }

    /// Palette for a requested id, defaulting to the active theme and
    /// falling back to the standard palette for unknown ids.
    pub fn theme_config(&self, id: Option<&str>) -> &'static PaletteDefinition {
        match id {
            Some(raw) => crate::palette::resolve(raw),
            None => palette(self.current),
        }
    }

    /// All registered palettes in registry order.
    pub fn list_themes(&self) -> Vec<(ThemeId, &'static PaletteDefinition)> {
        palettes().collect()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Update one preference field and persist immediately.
    pub fn update_preferences(&mut self, update: impl FnOnce(&mut Preferences)) {
        update(&mut self.prefs);
        self.store.save(&self.prefs);
    }

    pub fn scope(&self) -> &StyleScope {
        &self.scope
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn decorations(&self) -> &DecorationManager {
        &self.decor
    }

    /// Drive decoration spawner timers from the host event loop.
    pub fn tick(&mut self, now: Instant) {
        self.decor.tick(&mut self.stage, now);
    }

    fn apply_theme(&mut self, id: ThemeId, now: Instant) {
        if self.applying {
            tracing::warn!(theme = %id, "theme apply already in progress; skipping reentrant call");
            return;
        }
        self.applying = true;

        let palette = palette(id);

        // Build the complete variable map before touching the scope so a
        // reader never observes a partial update.
        let vars = StyleScope::compile(palette);
        self.scope.replace(vars);

        self.stage.set_marker(format!("theme-{}", id.as_str()));

        if self.prefs.enable_decorations {
            self.decor.apply(palette, &mut self.stage, now);
        } else {
            self.decor.clear(&mut self.stage);
        }

        self.current = id;

        if self.prefs.remember_theme {
            self.prefs.current_theme = Some(id);
            self.store.store_theme(id);
            self.store.save(&self.prefs);
        }

        let change = ThemeChange { id, palette };
        for subscriber in &mut self.subscribers {
            let name = subscriber.name();
            if catch_unwind(AssertUnwindSafe(|| subscriber.theme_changed(&change))).is_err() {
                tracing::warn!(subscriber = name, "subscriber panicked during theme notification");
            }
        }

        tracing::info!(theme = %id, name = palette.name, "theme applied");
        self.applying = false;
    }
}
