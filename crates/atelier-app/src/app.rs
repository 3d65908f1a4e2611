#![forbid(unsafe_code)]

//! Application wiring: builds the theme engine, registers the UI
//! subscribers, and hosts the small state the binary itself owns (the
//! theme-change indicator, the first-visit flag).

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use atelier_theme::{
    PreferenceStore, Stage, ThemeChange, ThemeEngine, ThemeSubscriber,
};
use atelier_ui::nav::Section;
use atelier_ui::{
    AnimationSystem, CarouselConfig, ContactForm, Navigation, Notifier, ProductCarousel,
};

use crate::error::{AppError, Result};

const INDICATOR_VISIBLE: Duration = Duration::from_secs(3);
const VISITED_FLAG: &str = "visited";

/// Resolve the preference file location: `ATELIER_CONFIG_DIR` wins, else
/// `~/.config/atelier`.
pub fn config_path() -> Result<PathBuf> {
    resolve_config_path(
        std::env::var_os("ATELIER_CONFIG_DIR"),
        std::env::var_os("HOME"),
    )
}

fn resolve_config_path(
    override_dir: Option<std::ffi::OsString>,
    home: Option<std::ffi::OsString>,
) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(PathBuf::from(dir).join("atelier.json"));
    }
    let home = home.ok_or(AppError::NoConfigDir)?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("atelier")
        .join("atelier.json"))
}

/// Transient "theme switched" banner, honoring the show-indicator
/// preference with a fixed auto-hide.
#[derive(Debug)]
pub struct ThemeIndicator {
    enabled: bool,
    text: Option<String>,
    visible_until: Option<Instant>,
    clock: Instant,
}

impl ThemeIndicator {
    pub fn new(enabled: bool, now: Instant) -> Self {
        Self {
            enabled,
            text: None,
            visible_until: None,
            clock: now,
        }
    }

    /// The indicator reads the clock the app last handed it; subscribers
    /// are notified without a timestamp.
    pub fn set_clock(&mut self, now: Instant) {
        self.clock = now;
    }

    pub fn tick(&mut self, now: Instant) {
        self.clock = now;
        if matches!(self.visible_until, Some(until) if until <= now) {
            self.text = None;
            self.visible_until = None;
        }
    }

    pub fn visible_text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl ThemeSubscriber for ThemeIndicator {
    fn name(&self) -> &'static str {
        "theme-indicator"
    }

    fn theme_changed(&mut self, change: &ThemeChange) {
        if !self.enabled {
            return;
        }
        self.text = Some(format!("Theme switched: {}", change.palette.name));
        self.visible_until = Some(self.clock + INDICATOR_VISIBLE);
    }
}

/// The storefront's page sections, in page order.
fn page_sections() -> Vec<Section> {
    vec![
        Section {
            id: "home".into(),
            top: 0.0,
            height: 800.0,
        },
        Section {
            id: "brand-story".into(),
            top: 800.0,
            height: 600.0,
        },
        Section {
            id: "products".into(),
            top: 1400.0,
            height: 700.0,
        },
        Section {
            id: "contact".into(),
            top: 2100.0,
            height: 700.0,
        },
    ]
}

/// Everything the binary wires together.
pub struct App {
    pub engine: ThemeEngine,
    pub notifier: Rc<RefCell<Notifier>>,
    pub animations: Rc<RefCell<AnimationSystem>>,
    pub indicator: Rc<RefCell<ThemeIndicator>>,
    pub carousel: ProductCarousel,
    pub navigation: Navigation,
    pub form: ContactForm,
    pub first_visit: bool,
}

impl App {
    /// Build the full module graph over the given store.
    pub fn assemble(store: PreferenceStore, now: Instant) -> Self {
        Self::build(store, now, None)
    }

    /// Build with deterministic decoration placement (demo, tests).
    pub fn assemble_seeded(store: PreferenceStore, now: Instant, seed: u64) -> Self {
        Self::build(store, now, Some(seed))
    }

    fn build(mut store: PreferenceStore, now: Instant, seed: Option<u64>) -> Self {
        let first_visit = !store.flag(VISITED_FLAG);
        if first_visit {
            store.set_flag(VISITED_FLAG, true);
        }

        let prefs = store.load();
        let mut engine = ThemeEngine::new(store, Stage::with_decoration_layer());
        if let Some(seed) = seed {
            engine = engine.with_decoration_seed(seed);
        }

        let notifier = Rc::new(RefCell::new(Notifier::new()));
        let animations = Rc::new(RefCell::new(AnimationSystem::new()));
        let indicator = Rc::new(RefCell::new(ThemeIndicator::new(prefs.show_indicator, now)));

        engine.subscribe(Box::new(notifier.clone()));
        engine.subscribe(Box::new(animations.clone()));
        engine.subscribe(Box::new(indicator.clone()));

        let slides = (1..=8).map(|i| format!("product{i}")).collect();
        let carousel = ProductCarousel::new(
            slides,
            CarouselConfig {
                interval: Duration::from_secs(5),
                ..CarouselConfig::default()
            },
            now,
        );
        let navigation = Navigation::new(page_sections(), 900.0, 2800.0);

        Self {
            engine,
            notifier,
            animations,
            indicator,
            carousel,
            navigation,
            form: ContactForm::new(),
            first_visit,
        }
    }

    /// Open the durable store and assemble.
    pub fn open(now: Instant) -> Result<Self> {
        let path = config_path()?;
        Ok(Self::assemble(PreferenceStore::open_or_memory(path), now))
    }

    /// Open the durable store with seeded decoration placement.
    pub fn open_seeded(now: Instant, seed: u64) -> Result<Self> {
        let path = config_path()?;
        Ok(Self::assemble_seeded(
            PreferenceStore::open_or_memory(path),
            now,
            seed,
        ))
    }

    /// One step of the host loop: decorations, carousel, pending form
    /// submission, toasts, indicator.
    pub fn tick(&mut self, now: Instant) {
        self.indicator.borrow_mut().set_clock(now);
        self.engine.tick(now);
        self.navigation.tick(now);
        self.carousel.tick(now);
        if let Some(outcome) = self.form.tick(now) {
            self.notifier.borrow_mut().success(outcome.confirmation, now);
        }
        self.notifier.borrow_mut().tick(now);
        self.indicator.borrow_mut().tick(now);
    }

    /// Startup: run the selector for the current month and greet first
    /// visitors.
    pub fn startup(&mut self, month: u32, now: Instant) {
        self.indicator.borrow_mut().set_clock(now);
        self.engine.startup(month, now);
        if self.first_visit {
            self.notifier.borrow_mut().info(
                "Welcome to Atelier! Explore our world of fashion ✨",
                now,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_theme::ThemeId;

    fn app(now: Instant) -> App {
        App::assemble(PreferenceStore::in_memory(), now)
    }

    #[test]
    fn first_visit_greets_then_never_again() {
        let now = Instant::now();
        let mut store = PreferenceStore::in_memory();
        store.set_flag(VISITED_FLAG, true);
        let a = App::assemble(store, now);
        assert!(!a.first_visit);

        let mut fresh = app(now);
        assert!(fresh.first_visit);
        fresh.startup(6, now);
        assert_eq!(fresh.notifier.borrow().visible().len(), 1);
    }

    #[test]
    fn indicator_shows_then_auto_hides() {
        let now = Instant::now();
        let mut a = app(now);
        a.startup(6, now);
        assert!(a.engine.set_theme("christmas", now));
        assert_eq!(
            a.indicator.borrow().visible_text(),
            Some("Theme switched: Christmas")
        );

        a.tick(now + Duration::from_secs(2));
        assert!(a.indicator.borrow().visible_text().is_some());
        a.tick(now + Duration::from_secs(3));
        assert!(a.indicator.borrow().visible_text().is_none());
    }

    #[test]
    fn subscribers_see_startup_theme() {
        let now = Instant::now();
        let mut a = app(now);
        a.startup(12, now);
        assert_eq!(a.engine.current_theme(), ThemeId::Christmas);
        let (duration, _) = a.animations.borrow().theme_timing();
        assert_eq!(duration, Duration::from_millis(500));
    }

    #[test]
    fn form_submission_resolves_into_a_success_toast() {
        let now = Instant::now();
        let mut a = app(now);
        a.form.name = "Lin Wei".into();
        a.form.phone = "0912345678".into();
        a.form.submit(now).unwrap();

        a.tick(now + Duration::from_secs(1));
        assert!(a.notifier.borrow().visible().is_empty());

        a.tick(now + Duration::from_secs(2));
        let toasts = a.notifier.borrow();
        assert_eq!(toasts.visible().len(), 1);
        assert!(toasts.visible()[0].message.contains("Lin Wei"));
    }

    #[test]
    fn carousel_advances_through_app_ticks() {
        let now = Instant::now();
        let mut a = app(now);
        a.tick(now + Duration::from_secs(4));
        assert_eq!(a.carousel.status().current, 0);
        a.tick(now + Duration::from_secs(5));
        assert_eq!(a.carousel.status().current, 1);
    }

    #[test]
    fn config_dir_override_wins_over_home() {
        let path =
            resolve_config_path(Some("/tmp/atelier-conf".into()), Some("/home/lin".into()))
                .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/atelier-conf/atelier.json"));

        let fallback = resolve_config_path(None, Some("/home/lin".into())).unwrap();
        assert_eq!(
            fallback,
            PathBuf::from("/home/lin/.config/atelier/atelier.json")
        );

        assert!(resolve_config_path(None, None).is_err());
    }
}
