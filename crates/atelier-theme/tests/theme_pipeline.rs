//! End-to-end checks of the theme pipeline through the public API.

use std::time::{Duration, Instant};

use atelier_theme::{
    FileBackend, PreferenceStore, Preferences, Stage, ThemeChange, ThemeEngine, ThemeId,
    ThemeSubscriber, determine_initial_theme, palette, palettes, resolve,
};

fn engine() -> ThemeEngine {
    ThemeEngine::new(PreferenceStore::in_memory(), Stage::with_decoration_layer())
        .with_decoration_seed(42)
}

#[test]
fn undecorated_palettes_leave_no_nodes_or_timers() {
    for (id, def) in palettes() {
        if def.decorations.show {
            continue;
        }
        let mut e = engine();
        assert!(e.set_theme(id.as_str(), Instant::now()));
        assert_eq!(e.stage().decoration_count(), 0, "nodes for {id}");
        assert_eq!(e.decorations().timer_count(), 0, "timers for {id}");
    }
}

#[test]
fn unknown_ids_resolve_to_the_standard_definition() {
    for bogus in ["", "sakura", "Christmas", "mid autumn"] {
        assert!(std::ptr::eq(resolve(bogus), palette(ThemeId::Default)));
    }
}

#[test]
fn fresh_install_in_january_boots_into_lunar_new_year() {
    let mut e = engine();
    assert_eq!(e.startup(1, Instant::now()), ThemeId::LunarNewYear);
    assert_eq!(e.stage().marker(), Some("theme-lunar-new-year"));
}

#[test]
fn selector_table_holds_regardless_of_persisted_theme() {
    for stored in [None, Some(ThemeId::MidAutumn), Some(ThemeId::Default)] {
        let prefs = Preferences {
            auto_theme: true,
            current_theme: stored,
            ..Preferences::default()
        };
        assert_eq!(determine_initial_theme(&prefs, 12), ThemeId::Christmas);
    }

    let prefs = Preferences {
        auto_theme: false,
        current_theme: Some(ThemeId::MidAutumn),
        ..Preferences::default()
    };
    for month in 1..=12 {
        assert_eq!(determine_initial_theme(&prefs, month), ThemeId::MidAutumn);
    }
}

#[test]
fn preferences_survive_a_full_engine_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("atelier.json");
    let now = Instant::now();

    {
        let store = PreferenceStore::new(Box::new(FileBackend::open(&path).unwrap()));
        let mut e = ThemeEngine::new(store, Stage::with_decoration_layer()).with_decoration_seed(1);
        e.update_preferences(|p| p.auto_theme = false);
        assert!(e.set_theme("mid-autumn", now));
    }

    let store = PreferenceStore::new(Box::new(FileBackend::open(&path).unwrap()));
    let mut e = ThemeEngine::new(store, Stage::with_decoration_layer()).with_decoration_seed(1);
    // Auto theme was disabled, so even in December the stored choice wins.
    assert_eq!(e.startup(12, now), ThemeId::MidAutumn);
}

#[test]
fn teardown_then_setup_across_theme_switches() {
    let mut e = engine();
    let start = Instant::now();

    assert!(e.set_theme("lunar-new-year", start));
    assert!(e.stage().decoration_count() > 0);

    // Let the firework spawner run a while.
    for step in 1..=10u64 {
        e.tick(start + Duration::from_secs(step));
    }

    assert!(e.set_theme("default", start + Duration::from_secs(11)));
    assert_eq!(e.stage().decoration_count(), 0);
    assert_eq!(e.decorations().timer_count(), 0);
}

#[test]
fn missing_decoration_host_downgrades_to_a_styled_theme() {
    let mut e = ThemeEngine::new(PreferenceStore::in_memory(), Stage::bare());
    assert!(e.set_theme("christmas", Instant::now()));
    // Styling applied, decorations skipped.
    assert_eq!(e.stage().marker(), Some("theme-christmas"));
    assert_eq!(e.stage().decoration_count(), 0);
    assert_eq!(e.decorations().timer_count(), 0);
}

struct CountingSubscriber {
    hits: std::rc::Rc<std::cell::Cell<usize>>,
}

impl ThemeSubscriber for CountingSubscriber {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn theme_changed(&mut self, _change: &ThemeChange) {
        self.hits.set(self.hits.get() + 1);
    }
}

#[test]
fn every_apply_notifies_subscribers_exactly_once() {
    let hits = std::rc::Rc::new(std::cell::Cell::new(0));
    let mut e = engine();
    e.subscribe(Box::new(CountingSubscriber { hits: hits.clone() }));

    let now = Instant::now();
    e.set_theme("christmas", now);
    e.set_theme("christmas", now);
    e.set_auto_theme(9, now);

    assert_eq!(hits.get(), 3);
}
