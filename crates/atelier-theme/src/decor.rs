#![forbid(unsafe_code)]

//! Decoration lifecycle: one generation of nodes and timers at a time.
//!
//! Every `apply` produces a single [`Generation`] value object that owns
//! each spawned node handle and each repeating spawner timer. Teardown
//! consumes the whole generation before any new setup runs, so repeated
//! theme switches can never accumulate nodes or compound spawner rates.
//!
//! Timers are tick-driven value objects, not background threads: the host
//! event loop calls [`DecorationManager::tick`], due spawners fire, and
//! transient particles are reaped once their fixed lifetime elapses.
//!
//! # Invariants
//!
//! 1. At most one generation exists at a time.
//! 2. Teardown runs unconditionally before setup, even when the new
//!    palette equals the old one.
//! 3. No timer handle survives teardown.
//! 4. A missing decoration layer downgrades every step to a logged no-op.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::palette::{DecorationKind, PaletteDefinition};
use crate::stage::{DECORATION_LAYER, Node, NodeId, Stage};

const LANTERN_COUNT: usize = 6;
const SNOWFLAKE_COUNT: usize = 20;
const CLOUD_COUNT: usize = 3;
const LIGHT_COUNT: usize = 8;
const BALL_COUNT: usize = 6;

const FIREWORK_INTERVAL: Duration = Duration::from_secs(3);
const FIREWORK_CHANCE: f32 = 0.3;
const FIREWORK_LIFETIME: Duration = Duration::from_millis(1500);
const OPENING_LIFETIME: Duration = Duration::from_secs(2);

/// A repeating particle spawner owned by the current generation.
#[derive(Debug)]
struct Spawner {
    feature: &'static str,
    interval: Duration,
    next_due: Instant,
    chance: f32,
    lifetime: Duration,
}

/// A spawned particle with a fixed lifetime.
#[derive(Debug)]
struct Transient {
    id: NodeId,
    expires_at: Instant,
}

/// Every node handle and timer produced by one `apply` call. Torn down as
/// a unit.
#[derive(Debug, Default)]
struct Generation {
    nodes: Vec<NodeId>,
    transients: Vec<Transient>,
    spawners: Vec<Spawner>,
    effect_tagged: bool,
}

impl Generation {
    fn teardown(self, stage: &mut Stage) {
        for id in self.nodes {
            stage.remove(DECORATION_LAYER, id);
        }
        for t in self.transients {
            stage.remove(DECORATION_LAYER, t.id);
        }
        if self.effect_tagged {
            stage.set_effect_tag(None);
        }
        // Spawners die with the generation; there is nothing to unhook.
    }
}

/// Spawns and tears down decorative stage elements per palette.
#[derive(Debug)]
pub struct DecorationManager {
    current: Option<Generation>,
    rng: SmallRng,
}

impl DecorationManager {
    pub fn new() -> Self {
        Self {
            current: None,
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Deterministic placement for tests and replayable demos.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            current: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Number of live decoration nodes (ambient plus transient).
    pub fn node_count(&self) -> usize {
        self.current
            .as_ref()
            .map(|g| g.nodes.len() + g.transients.len())
            .unwrap_or(0)
    }

    /// Number of active repeating timers.
    pub fn timer_count(&self) -> usize {
        self.current.as_ref().map(|g| g.spawners.len()).unwrap_or(0)
    }

    /// Tear down the current generation without starting a new one.
    pub fn clear(&mut self, stage: &mut Stage) {
        if let Some(generation) = self.current.take() {
            generation.teardown(stage);
        }
    }

    /// Apply a palette's decorations: teardown first, always, then spawn
    /// the new generation if the palette wants one.
    pub fn apply(&mut self, palette: &PaletteDefinition, stage: &mut Stage, now: Instant) {
        self.clear(stage);

        let spec = &palette.decorations;
        if !spec.show {
            return;
        }
        if !stage.has_layer(DECORATION_LAYER) {
            tracing::debug!("decoration layer absent; skipping decorations");
            return;
        }

        let mut generation = Generation::default();

        match spec.kind {
            DecorationKind::Lanterns => self.spawn_lanterns(palette, stage, &mut generation),
            DecorationKind::Snowflakes => self.spawn_snowflakes(palette, stage, &mut generation),
            DecorationKind::None => {}
        }

        if spec.moon {
            self.spawn_moon(stage, &mut generation);
        }
        if spec.rabbit {
            self.spawn_rabbit(stage, &mut generation);
        }
        if spec.cloud {
            self.spawn_clouds(stage, &mut generation);
        }
        if spec.light_string {
            self.spawn_light_string(stage, &mut generation);
        }
        if spec.ball_shine {
            self.spawn_balls(stage, &mut generation);
        }
        if spec.sparkle {
            stage.set_effect_tag(Some("sparkle"));
            generation.effect_tagged = true;
        }
        if spec.firework {
            generation.spawners.push(Spawner {
                feature: "firework",
                interval: FIREWORK_INTERVAL,
                next_due: now + FIREWORK_INTERVAL,
                chance: FIREWORK_CHANCE,
                lifetime: FIREWORK_LIFETIME,
            });
        }
        if spec.curtain {
            self.spawn_opening(stage, &mut generation, "decor-curtain", "", now);
        }
        if spec.scroll_banner {
            self.spawn_opening(stage, &mut generation, "decor-scroll", "🧧", now);
        }

        tracing::debug!(
            nodes = generation.nodes.len(),
            timers = generation.spawners.len(),
            "decorations applied"
        );
        self.current = Some(generation);
    }

    /// Fire due spawners and reap expired particles.
    pub fn tick(&mut self, stage: &mut Stage, now: Instant) {
        let Some(generation) = self.current.as_mut() else {
            return;
        };

        let mut spawned: Vec<Transient> = Vec::new();
        for spawner in &mut generation.spawners {
            while spawner.next_due <= now {
                spawner.next_due += spawner.interval;
                if self.rng.random::<f32>() >= spawner.chance {
                    continue;
                }
                let node = Node {
                    class: "decor-firework",
                    glyph: "✨",
                    x: self.rng.random_range(10.0..90.0),
                    y: self.rng.random_range(20.0..80.0),
                    size: 4.0,
                    opacity: 1.0,
                    animation: Some("firework-explode"),
                    phase_delay_ms: 0,
                };
                if let Some(id) = stage.insert(DECORATION_LAYER, node) {
                    tracing::trace!(feature = spawner.feature, "particle spawned");
                    spawned.push(Transient {
                        id,
                        expires_at: now + spawner.lifetime,
                    });
                }
            }
        }
        generation.transients.extend(spawned);

        let mut kept = Vec::with_capacity(generation.transients.len());
        for t in generation.transients.drain(..) {
            if t.expires_at <= now {
                stage.remove(DECORATION_LAYER, t.id);
            } else {
                kept.push(t);
            }
        }
        generation.transients = kept;
    }

    fn push(&mut self, stage: &mut Stage, generation: &mut Generation, node: Node) {
        if let Some(id) = stage.insert(DECORATION_LAYER, node) {
            generation.nodes.push(id);
        }
    }

    fn spawn_lanterns(
        &mut self,
        palette: &PaletteDefinition,
        stage: &mut Stage,
        generation: &mut Generation,
    ) {
        for i in 0..LANTERN_COUNT {
            let node = Node {
                class: "decor-lantern",
                glyph: "🏮",
                x: self.rng.random_range(5.0..95.0),
                y: self.rng.random_range(20.0..80.0),
                size: 40.0,
                opacity: palette.decorations.opacity,
                animation: Some("lantern-float"),
                phase_delay_ms: (i as u64) * 500,
            };
            self.push(stage, generation, node);
        }
    }

    fn spawn_snowflakes(
        &mut self,
        palette: &PaletteDefinition,
        stage: &mut Stage,
        generation: &mut Generation,
    ) {
        for _ in 0..SNOWFLAKE_COUNT {
            let node = Node {
                class: "decor-snowflake",
                glyph: "❄",
                x: self.rng.random_range(0.0..100.0),
                y: 0.0,
                size: self.rng.random_range(10.0..30.0),
                opacity: (palette.decorations.opacity * 2.0).min(1.0),
                animation: Some("snowfall"),
                phase_delay_ms: self.rng.random_range(0..2000),
            };
            self.push(stage, generation, node);
        }
    }

    fn spawn_moon(&mut self, stage: &mut Stage, generation: &mut Generation) {
        let node = Node {
            class: "decor-moon",
            glyph: "🌕",
            x: 90.0,
            y: 10.0,
            size: 60.0,
            opacity: 0.3,
            animation: Some("moon-glow"),
            phase_delay_ms: 0,
        };
        self.push(stage, generation, node);
    }

    fn spawn_rabbit(&mut self, stage: &mut Stage, generation: &mut Generation) {
        // Only ever one rabbit on stage.
        stage.remove_class(DECORATION_LAYER, "decor-rabbit");
        let node = Node {
            class: "decor-rabbit",
            glyph: "🐰",
            x: 5.0,
            y: 80.0,
            size: 50.0,
            opacity: 0.6,
            animation: Some("rabbit-hop"),
            phase_delay_ms: 0,
        };
        self.push(stage, generation, node);
    }

    fn spawn_clouds(&mut self, stage: &mut Stage, generation: &mut Generation) {
        for i in 0..CLOUD_COUNT {
            let node = Node {
                class: "decor-cloud",
                glyph: "☁",
                x: 100.0 - (10.0 + i as f32 * 15.0),
                y: 10.0 + i as f32 * 20.0,
                size: 40.0,
                opacity: 0.4,
                animation: Some("cloud-drift"),
                phase_delay_ms: (i as u64) * 500,
            };
            self.push(stage, generation, node);
        }
    }

    fn spawn_light_string(&mut self, stage: &mut Stage, generation: &mut Generation) {
        for i in 0..LIGHT_COUNT {
            let node = Node {
                class: "decor-light",
                glyph: "💡",
                x: 10.0 + i as f32 * 10.0,
                y: 5.0,
                size: 24.0,
                opacity: 0.5,
                animation: Some("twinkle"),
                phase_delay_ms: (i as u64) * 200,
            };
            self.push(stage, generation, node);
        }
    }

    fn spawn_balls(&mut self, stage: &mut Stage, generation: &mut Generation) {
        for i in 0..BALL_COUNT {
            let node = Node {
                class: "decor-ball",
                glyph: "🎄",
                x: 100.0 - (5.0 + i as f32 * 12.0),
                y: self.rng.random_range(20.0..60.0),
                size: 32.0,
                opacity: 0.6,
                animation: Some("ball-shine"),
                phase_delay_ms: (i as u64) * 300,
            };
            self.push(stage, generation, node);
        }
    }

    /// One-shot opening effects (red curtain, scroll banner) that remove
    /// themselves after a fixed lifetime.
    fn spawn_opening(
        &mut self,
        stage: &mut Stage,
        generation: &mut Generation,
        class: &'static str,
        glyph: &'static str,
        now: Instant,
    ) {
        let node = Node {
            class,
            glyph,
            x: 50.0,
            y: 50.0,
            size: 100.0,
            opacity: 1.0,
            animation: Some("opening"),
            phase_delay_ms: 0,
        };
        if let Some(id) = stage.insert(DECORATION_LAYER, node) {
            generation.transients.push(Transient {
                id,
                expires_at: now + OPENING_LIFETIME,
            });
        }
    }
}

impl Default for DecorationManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{ThemeId, palette};

    fn manager() -> DecorationManager {
        DecorationManager::with_seed(7)
    }

    #[test]
    fn standard_palette_leaves_nothing_behind() {
        let mut stage = Stage::with_decoration_layer();
        let mut decor = manager();
        let now = Instant::now();

        decor.apply(palette(ThemeId::Default), &mut stage, now);

        assert_eq!(decor.node_count(), 0);
        assert_eq!(decor.timer_count(), 0);
        assert_eq!(stage.decoration_count(), 0);
    }

    #[test]
    fn applying_twice_matches_applying_once() {
        let now = Instant::now();

        let mut stage_once = Stage::with_decoration_layer();
        let mut once = manager();
        once.apply(palette(ThemeId::Christmas), &mut stage_once, now);

        let mut stage_twice = Stage::with_decoration_layer();
        let mut twice = manager();
        twice.apply(palette(ThemeId::Christmas), &mut stage_twice, now);
        twice.apply(palette(ThemeId::Christmas), &mut stage_twice, now);

        assert_eq!(twice.node_count(), once.node_count());
        assert_eq!(twice.timer_count(), once.timer_count());
        assert_eq!(stage_twice.decoration_count(), stage_once.decoration_count());
    }

    #[test]
    fn switching_to_standard_tears_everything_down() {
        let mut stage = Stage::with_decoration_layer();
        let mut decor = manager();
        let now = Instant::now();

        decor.apply(palette(ThemeId::LunarNewYear), &mut stage, now);
        assert!(stage.decoration_count() > 0);
        assert_eq!(decor.timer_count(), 1);

        decor.apply(palette(ThemeId::Default), &mut stage, now);
        assert_eq!(stage.decoration_count(), 0);
        assert_eq!(decor.timer_count(), 0);
        assert_eq!(decor.node_count(), 0);
    }

    #[test]
    fn missing_layer_is_a_no_op() {
        let mut stage = Stage::bare();
        let mut decor = manager();
        let now = Instant::now();

        decor.apply(palette(ThemeId::Christmas), &mut stage, now);
        assert_eq!(decor.node_count(), 0);
        assert_eq!(decor.timer_count(), 0);

        // Ticking without a layer must not panic either.
        decor.tick(&mut stage, now + Duration::from_secs(10));
    }

    #[test]
    fn christmas_spawns_snow_lights_and_balls() {
        let mut stage = Stage::with_decoration_layer();
        let mut decor = manager();
        decor.apply(palette(ThemeId::Christmas), &mut stage, Instant::now());

        let layer = stage.layer(DECORATION_LAYER).unwrap();
        assert_eq!(layer.count_class("decor-snowflake"), SNOWFLAKE_COUNT);
        assert_eq!(layer.count_class("decor-light"), LIGHT_COUNT);
        assert_eq!(layer.count_class("decor-ball"), BALL_COUNT);
        assert_eq!(stage.effect_tag(), Some("sparkle"));
    }

    #[test]
    fn mid_autumn_spawns_lanterns_moon_rabbit_clouds() {
        let mut stage = Stage::with_decoration_layer();
        let mut decor = manager();
        decor.apply(palette(ThemeId::MidAutumn), &mut stage, Instant::now());

        let layer = stage.layer(DECORATION_LAYER).unwrap();
        assert_eq!(layer.count_class("decor-lantern"), LANTERN_COUNT);
        assert_eq!(layer.count_class("decor-moon"), 1);
        assert_eq!(layer.count_class("decor-rabbit"), 1);
        assert_eq!(layer.count_class("decor-cloud"), CLOUD_COUNT);
        assert_eq!(stage.effect_tag(), None);
    }

    #[test]
    fn firework_particles_spawn_and_self_limit() {
        let mut stage = Stage::with_decoration_layer();
        let mut decor = manager();
        let start = Instant::now();

        decor.apply(palette(ThemeId::LunarNewYear), &mut stage, start);

        // Let the one-shot opening effects lapse so only the ambient
        // lanterns and the firework spawner remain.
        decor.tick(&mut stage, start + Duration::from_millis(2500));
        let ambient = stage.decoration_count();

        // Run well past many spawner intervals; with a fixed lifetime the
        // particle population must stay bounded instead of growing with
        // elapsed time.
        let mut max_live = 0usize;
        for step in 3..=40 {
            let now = start + Duration::from_millis(step * 1000);
            decor.tick(&mut stage, now);
            max_live = max_live.max(stage.decoration_count().saturating_sub(ambient));
        }
        assert!(max_live <= 2, "population grew unbounded: {max_live}");

        // After a quiet stretch with no further due fires, everything
        // transient has been reaped.
        decor.tick(&mut stage, start + Duration::from_secs(120));
        decor.tick(&mut stage, start + Duration::from_secs(122));
        assert_eq!(stage.decoration_count(), ambient);
    }

    #[test]
    fn opening_effects_expire_after_their_lifetime() {
        let mut stage = Stage::with_decoration_layer();
        let mut decor = manager();
        let start = Instant::now();

        decor.apply(palette(ThemeId::LunarNewYear), &mut stage, start);
        let layer = stage.layer(DECORATION_LAYER).unwrap();
        assert_eq!(layer.count_class("decor-curtain"), 1);
        assert_eq!(layer.count_class("decor-scroll"), 1);

        decor.tick(&mut stage, start + Duration::from_millis(2100));
        let layer = stage.layer(DECORATION_LAYER).unwrap();
        assert_eq!(layer.count_class("decor-curtain"), 0);
        assert_eq!(layer.count_class("decor-scroll"), 0);
    }

    #[test]
    fn repeated_seasonal_switches_do_not_compound_spawners() {
        let mut stage = Stage::with_decoration_layer();
        let mut decor = manager();
        let now = Instant::now();

        for _ in 0..5 {
            decor.apply(palette(ThemeId::LunarNewYear), &mut stage, now);
            decor.apply(palette(ThemeId::Christmas), &mut stage, now);
        }
        decor.apply(palette(ThemeId::LunarNewYear), &mut stage, now);
        assert_eq!(decor.timer_count(), 1);
    }
}
