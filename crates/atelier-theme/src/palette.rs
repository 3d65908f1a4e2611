#![forbid(unsafe_code)]

//! Palette registry: the closed set of seasonal themes and their visual
//! attributes.
//!
//! Each [`ThemeId`] maps to exactly one [`PaletteDefinition`] in a static
//! table. Lookups never fail: [`resolve`] falls back to the standard
//! palette for unknown identifiers, which is a documented fallback rather
//! than an error path.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Built-in theme identifiers.
///
/// The set is fixed at build time; there is no runtime registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeId {
    /// The standard boutique palette, decorations off.
    Default,
    /// Mid-autumn festival: warm ambers, moon and lanterns.
    MidAutumn,
    /// Christmas: deep greens and gold, snowfall.
    Christmas,
    /// Lunar new year: reds and gold, fireworks.
    LunarNewYear,
}

impl ThemeId {
    pub const ALL: [ThemeId; 4] = [
        ThemeId::Default,
        ThemeId::MidAutumn,
        ThemeId::Christmas,
        ThemeId::LunarNewYear,
    ];

    pub const fn index(self) -> usize {
        match self {
            ThemeId::Default => 0,
            ThemeId::MidAutumn => 1,
            ThemeId::Christmas => 2,
            ThemeId::LunarNewYear => 3,
        }
    }

    /// Stable kebab-case identifier, used for persistence and markers.
    pub const fn as_str(self) -> &'static str {
        match self {
            ThemeId::Default => "default",
            ThemeId::MidAutumn => "mid-autumn",
            ThemeId::Christmas => "christmas",
            ThemeId::LunarNewYear => "lunar-new-year",
        }
    }

    /// Parse a stable identifier. Unknown strings yield `None`; callers
    /// decide between rejection and fallback.
    pub fn parse(s: &str) -> Option<ThemeId> {
        ThemeId::ALL.into_iter().find(|id| id.as_str() == s)
    }

    pub const fn display_name(self) -> &'static str {
        self.definition().name
    }

    const fn definition(self) -> &'static PaletteDefinition {
        &PALETTES[self.index()]
    }
}

impl Default for ThemeId {
    fn default() -> Self {
        ThemeId::Default
    }
}

impl std::fmt::Display for ThemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 24-bit color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Named color roles shared by every palette, plus at most one
/// theme-specific extra (amber, silver, gold).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSet {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub background: Rgb,
    pub surface: Rgb,
    pub text: Rgb,
    pub text_secondary: Rgb,
    pub border: Rgb,
    pub rose_gold: Rgb,
    pub rose_gold_light: Rgb,
    pub rose_gold_dark: Rgb,
    pub extra: Option<(&'static str, Rgb)>,
}

impl ColorSet {
    /// All `(role, color)` pairs in declaration order.
    pub fn entries(&self) -> Vec<(&'static str, Rgb)> {
        let mut entries = vec![
            ("primary", self.primary),
            ("secondary", self.secondary),
            ("accent", self.accent),
            ("background", self.background),
            ("surface", self.surface),
            ("text", self.text),
            ("text-secondary", self.text_secondary),
            ("border", self.border),
            ("rose-gold", self.rose_gold),
            ("rose-gold-light", self.rose_gold_light),
            ("rose-gold-dark", self.rose_gold_dark),
        ];
        if let Some((name, color)) = self.extra {
            entries.push((name, color));
        }
        entries
    }
}

/// One stop of a linear gradient. `position` runs 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub position: f32,
    pub color: Rgb,
    pub alpha: f32,
}

impl GradientStop {
    pub const fn opaque(position: f32, color: Rgb) -> Self {
        Self {
            position,
            color,
            alpha: 1.0,
        }
    }

    pub const fn faded(position: f32, color: Rgb, alpha: f32) -> Self {
        Self {
            position,
            color,
            alpha,
        }
    }
}

/// A named linear gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub angle_deg: u16,
    pub stops: &'static [GradientStop],
}

/// Named gradients shared by every palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientSet {
    pub primary: Gradient,
    pub hero: Gradient,
    pub card: Gradient,
}

impl GradientSet {
    pub fn entries(&self) -> [(&'static str, Gradient); 3] {
        [
            ("primary", self.primary),
            ("hero", self.hero),
            ("card", self.card),
        ]
    }
}

/// Cubic-bezier easing curve (CSS convention: two control points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// Optional named animation flavor attached to a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStyle {
    GentleSwing,
    Tada,
}

/// Per-theme animation timing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: CubicBezier,
    pub style: Option<AnimationStyle>,
}

/// Ambient decoration family spawned while a theme is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationKind {
    None,
    Lanterns,
    Snowflakes,
}

/// Decoration descriptor: whether to decorate at all, how strongly, and
/// which independent feature behaviors are enabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationSpec {
    pub show: bool,
    pub opacity: f32,
    pub kind: DecorationKind,
    pub sparkle: bool,
    pub firework: bool,
    pub moon: bool,
    pub rabbit: bool,
    pub cloud: bool,
    pub light_string: bool,
    pub ball_shine: bool,
    pub curtain: bool,
    pub scroll_banner: bool,
}

impl DecorationSpec {
    pub const NONE: DecorationSpec = DecorationSpec {
        show: false,
        opacity: 0.1,
        kind: DecorationKind::None,
        sparkle: false,
        firework: false,
        moon: false,
        rabbit: false,
        cloud: false,
        light_string: false,
        ball_shine: false,
        curtain: false,
        scroll_banner: false,
    };
}

/// The full set of visual attributes bound to one [`ThemeId`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub colors: ColorSet,
    pub gradients: GradientSet,
    pub animation: AnimationSpec,
    pub decorations: DecorationSpec,
}

const DEFAULT_PRIMARY_STOPS: [GradientStop; 2] = [
    GradientStop::opaque(0.0, Rgb::rgb(232, 180, 184)),
    GradientStop::opaque(1.0, Rgb::rgb(247, 231, 206)),
];
const DEFAULT_HERO_STOPS: [GradientStop; 2] = [
    GradientStop::faded(0.0, Rgb::rgb(232, 180, 184), 0.8),
    GradientStop::faded(1.0, Rgb::rgb(247, 231, 206), 0.8),
];
const DEFAULT_CARD_STOPS: [GradientStop; 2] = [
    GradientStop::faded(0.0, Rgb::rgb(255, 255, 255), 0.9),
    GradientStop::faded(1.0, Rgb::rgb(248, 246, 244), 0.9),
];

const MID_AUTUMN_PRIMARY_STOPS: [GradientStop; 2] = [
    GradientStop::opaque(0.0, Rgb::rgb(255, 228, 181)),
    GradientStop::opaque(1.0, Rgb::rgb(222, 184, 135)),
];
const MID_AUTUMN_HERO_STOPS: [GradientStop; 2] = [
    GradientStop::faded(0.0, Rgb::rgb(255, 228, 181), 0.8),
    GradientStop::faded(1.0, Rgb::rgb(222, 184, 135), 0.8),
];
const MID_AUTUMN_CARD_STOPS: [GradientStop; 2] = [
    GradientStop::faded(0.0, Rgb::rgb(245, 222, 179), 0.9),
    GradientStop::faded(1.0, Rgb::rgb(222, 184, 135), 0.9),
];

const CHRISTMAS_PRIMARY_STOPS: [GradientStop; 2] = [
    GradientStop::opaque(0.0, Rgb::rgb(212, 175, 55)),
    GradientStop::opaque(1.0, Rgb::rgb(45, 90, 39)),
];
const CHRISTMAS_HERO_STOPS: [GradientStop; 2] = [
    GradientStop::faded(0.0, Rgb::rgb(45, 90, 39), 0.8),
    GradientStop::faded(1.0, Rgb::rgb(212, 175, 55), 0.7),
];
const CHRISTMAS_CARD_STOPS: [GradientStop; 2] = [
    GradientStop::faded(0.0, Rgb::rgb(232, 245, 233), 0.9),
    GradientStop::faded(1.0, Rgb::rgb(255, 255, 255), 0.9),
];

const LUNAR_PRIMARY_STOPS: [GradientStop; 2] = [
    GradientStop::opaque(0.0, Rgb::rgb(254, 178, 178)),
    GradientStop::opaque(1.0, Rgb::rgb(252, 129, 129)),
];
const LUNAR_HERO_STOPS: [GradientStop; 2] = [
    GradientStop::faded(0.0, Rgb::rgb(254, 178, 178), 0.8),
    GradientStop::faded(1.0, Rgb::rgb(252, 129, 129), 0.8),
];
const LUNAR_CARD_STOPS: [GradientStop; 2] = [
    GradientStop::faded(0.0, Rgb::rgb(254, 215, 215), 0.9),
    GradientStop::faded(1.0, Rgb::rgb(252, 129, 129), 0.9),
];

const PALETTES: [PaletteDefinition; 4] = [
    PaletteDefinition {
        name: "Signature",
        description: "The standard boutique palette",
        colors: ColorSet {
            primary: Rgb::rgb(51, 168, 196),
            secondary: Rgb::rgb(139, 115, 85),
            accent: Rgb::rgb(232, 180, 184),
            background: Rgb::rgb(252, 252, 249),
            surface: Rgb::rgb(255, 254, 247),
            text: Rgb::rgb(19, 50, 60),
            text_secondary: Rgb::rgb(98, 112, 130),
            border: Rgb::rgb(232, 180, 184),
            rose_gold: Rgb::rgb(232, 180, 184),
            rose_gold_light: Rgb::rgb(245, 213, 215),
            rose_gold_dark: Rgb::rgb(212, 150, 154),
            extra: None,
        },
        gradients: GradientSet {
            primary: Gradient {
                angle_deg: 135,
                stops: &DEFAULT_PRIMARY_STOPS,
            },
            hero: Gradient {
                angle_deg: 135,
                stops: &DEFAULT_HERO_STOPS,
            },
            card: Gradient {
                angle_deg: 145,
                stops: &DEFAULT_CARD_STOPS,
            },
        },
        animation: AnimationSpec {
            duration: Duration::from_millis(300),
            easing: CubicBezier::new(0.16, 1.0, 0.3, 1.0),
            style: None,
        },
        decorations: DecorationSpec::NONE,
    },
    PaletteDefinition {
        name: "Mid-Autumn",
        description: "Full moon, warm amber, lantern light",
        colors: ColorSet {
            primary: Rgb::rgb(201, 169, 97),
            secondary: Rgb::rgb(26, 58, 82),
            accent: Rgb::rgb(184, 197, 214),
            background: Rgb::rgb(255, 248, 220),
            surface: Rgb::rgb(245, 222, 179),
            text: Rgb::rgb(139, 69, 19),
            text_secondary: Rgb::rgb(160, 82, 45),
            border: Rgb::rgb(222, 184, 135),
            rose_gold: Rgb::rgb(212, 165, 116),
            rose_gold_light: Rgb::rgb(255, 228, 181),
            rose_gold_dark: Rgb::rgb(205, 133, 63),
            extra: Some(("amber", Rgb::rgb(212, 165, 116))),
        },
        gradients: GradientSet {
            primary: Gradient {
                angle_deg: 135,
                stops: &MID_AUTUMN_PRIMARY_STOPS,
            },
            hero: Gradient {
                angle_deg: 135,
                stops: &MID_AUTUMN_HERO_STOPS,
            },
            card: Gradient {
                angle_deg: 145,
                stops: &MID_AUTUMN_CARD_STOPS,
            },
        },
        animation: AnimationSpec {
            duration: Duration::from_millis(400),
            easing: CubicBezier::new(0.25, 0.46, 0.45, 0.94),
            style: None,
        },
        decorations: DecorationSpec {
            show: true,
            opacity: 0.15,
            kind: DecorationKind::Lanterns,
            moon: true,
            rabbit: true,
            cloud: true,
            ..DecorationSpec::NONE
        },
    },
    PaletteDefinition {
        name: "Christmas",
        description: "Evergreen, gold, and falling snow",
        colors: ColorSet {
            primary: Rgb::rgb(27, 94, 32),
            secondary: Rgb::rgb(139, 0, 0),
            accent: Rgb::rgb(255, 215, 0),
            background: Rgb::rgb(249, 249, 249),
            surface: Rgb::rgb(232, 245, 233),
            text: Rgb::rgb(27, 94, 32),
            text_secondary: Rgb::rgb(97, 97, 97),
            border: Rgb::rgb(212, 175, 55),
            rose_gold: Rgb::rgb(212, 175, 55),
            rose_gold_light: Rgb::rgb(255, 248, 225),
            rose_gold_dark: Rgb::rgb(184, 134, 11),
            extra: Some(("silver", Rgb::rgb(192, 192, 192))),
        },
        gradients: GradientSet {
            primary: Gradient {
                angle_deg: 135,
                stops: &CHRISTMAS_PRIMARY_STOPS,
            },
            hero: Gradient {
                angle_deg: 135,
                stops: &CHRISTMAS_HERO_STOPS,
            },
            card: Gradient {
                angle_deg: 145,
                stops: &CHRISTMAS_CARD_STOPS,
            },
        },
        animation: AnimationSpec {
            duration: Duration::from_millis(500),
            easing: CubicBezier::new(0.68, -0.55, 0.265, 1.55),
            style: Some(AnimationStyle::GentleSwing),
        },
        decorations: DecorationSpec {
            show: true,
            opacity: 0.2,
            kind: DecorationKind::Snowflakes,
            sparkle: true,
            light_string: true,
            ball_shine: true,
            ..DecorationSpec::NONE
        },
    },
    PaletteDefinition {
        name: "Lunar New Year",
        description: "Festival red, gold coins, fireworks",
        colors: ColorSet {
            primary: Rgb::rgb(197, 48, 48),
            secondary: Rgb::rgb(183, 121, 31),
            accent: Rgb::rgb(254, 178, 178),
            background: Rgb::rgb(255, 245, 245),
            surface: Rgb::rgb(254, 215, 215),
            text: Rgb::rgb(197, 48, 48),
            text_secondary: Rgb::rgb(156, 46, 46),
            border: Rgb::rgb(252, 129, 129),
            rose_gold: Rgb::rgb(197, 48, 48),
            rose_gold_light: Rgb::rgb(254, 178, 178),
            rose_gold_dark: Rgb::rgb(156, 26, 28),
            extra: Some(("gold", Rgb::rgb(255, 215, 0))),
        },
        gradients: GradientSet {
            primary: Gradient {
                angle_deg: 135,
                stops: &LUNAR_PRIMARY_STOPS,
            },
            hero: Gradient {
                angle_deg: 135,
                stops: &LUNAR_HERO_STOPS,
            },
            card: Gradient {
                angle_deg: 145,
                stops: &LUNAR_CARD_STOPS,
            },
        },
        animation: AnimationSpec {
            duration: Duration::from_millis(400),
            easing: CubicBezier::new(0.25, 0.46, 0.45, 0.94),
            style: Some(AnimationStyle::Tada),
        },
        decorations: DecorationSpec {
            show: true,
            opacity: 0.18,
            kind: DecorationKind::Lanterns,
            firework: true,
            curtain: true,
            scroll_banner: true,
            ..DecorationSpec::NONE
        },
    },
];

/// Return the palette for a theme.
pub const fn palette(id: ThemeId) -> &'static PaletteDefinition {
    &PALETTES[id.index()]
}

/// Resolve a string identifier to a palette, falling back to the standard
/// palette for anything unknown. Never fails.
pub fn resolve(id: &str) -> &'static PaletteDefinition {
    match ThemeId::parse(id) {
        Some(id) => palette(id),
        None => palette(ThemeId::Default),
    }
}

/// All `(id, palette)` pairs in registry order.
pub fn palettes() -> impl Iterator<Item = (ThemeId, &'static PaletteDefinition)> {
    ThemeId::ALL.into_iter().map(|id| (id, palette(id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_theme_has_a_definition() {
        for (id, def) in palettes() {
            assert_eq!(def as *const _, palette(id) as *const _);
            assert!(!def.name.is_empty());
        }
    }

    #[test]
    fn parse_round_trips_stable_ids() {
        for id in ThemeId::ALL {
            assert_eq!(ThemeId::parse(id.as_str()), Some(id));
        }
        assert_eq!(ThemeId::parse("not-a-real-theme"), None);
    }

    #[test]
    fn unknown_id_resolves_to_standard_palette() {
        let fallback = resolve("not-a-real-theme");
        assert!(std::ptr::eq(fallback, palette(ThemeId::Default)));
    }

    #[test]
    fn standard_palette_has_no_decorations() {
        assert!(!palette(ThemeId::Default).decorations.show);
    }

    #[test]
    fn seasonal_palettes_decorate() {
        for id in [ThemeId::MidAutumn, ThemeId::Christmas, ThemeId::LunarNewYear] {
            let spec = palette(id).decorations;
            assert!(spec.show);
            assert!(spec.kind != DecorationKind::None);
            assert!(spec.opacity > 0.0);
        }
    }

    #[test]
    fn color_set_lists_extra_role_last() {
        let entries = palette(ThemeId::Christmas).colors.entries();
        assert_eq!(entries.last().unwrap().0, "silver");
        assert_eq!(palette(ThemeId::Default).colors.entries().len(), 11);
    }

    #[test]
    fn hex_parsing_round_trips() {
        let c = Rgb::from_hex("#C9A961").unwrap();
        assert_eq!(c, Rgb::rgb(201, 169, 97));
        assert_eq!(c.to_hex(), "#c9a961");
        assert!(Rgb::from_hex("#xyz").is_none());
        assert!(Rgb::from_hex("123").is_none());
    }

    #[test]
    fn theme_id_serde_uses_kebab_case() {
        let json = serde_json::to_string(&ThemeId::LunarNewYear).unwrap();
        assert_eq!(json, "\"lunar-new-year\"");
        let back: ThemeId = serde_json::from_str("\"mid-autumn\"").unwrap();
        assert_eq!(back, ThemeId::MidAutumn);
    }
}
