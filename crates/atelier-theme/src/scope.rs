#![forbid(unsafe_code)]

//! The shared style scope: named style variables with a single writer.
//!
//! Variables follow a fixed naming convention: `color-<role>`,
//! `gradient-<name>`, `animation-duration`, `animation-easing`. A palette
//! is compiled into a complete replacement map first and swapped in as one
//! unit, so readers never observe a half-updated scope.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::palette::{CubicBezier, Gradient, PaletteDefinition, Rgb};

/// A single named style value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleValue {
    Color(Rgb),
    Gradient(Gradient),
    Duration(Duration),
    Easing(CubicBezier),
}

/// Ordered map of style variables. The theme engine is the only writer.
#[derive(Debug, Default)]
pub struct StyleScope {
    vars: BTreeMap<String, StyleValue>,
}

impl StyleScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a palette into the full variable map it implies.
    pub fn compile(palette: &PaletteDefinition) -> BTreeMap<String, StyleValue> {
        let mut vars = BTreeMap::new();
        for (role, color) in palette.colors.entries() {
            vars.insert(format!("color-{role}"), StyleValue::Color(color));
        }
        for (name, gradient) in palette.gradients.entries() {
            vars.insert(format!("gradient-{name}"), StyleValue::Gradient(gradient));
        }
        vars.insert(
            "animation-duration".to_string(),
            StyleValue::Duration(palette.animation.duration),
        );
        vars.insert(
            "animation-easing".to_string(),
            StyleValue::Easing(palette.animation.easing),
        );
        vars
    }

    /// Replace the entire scope with a prepared map.
    pub fn replace(&mut self, vars: BTreeMap<String, StyleValue>) {
        self.vars = vars;
    }

    pub fn get(&self, name: &str) -> Option<&StyleValue> {
        self.vars.get(name)
    }

    pub fn color(&self, role: &str) -> Option<Rgb> {
        match self.vars.get(&format!("color-{role}")) {
            Some(StyleValue::Color(c)) => Some(*c),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{ThemeId, palette};

    #[test]
    fn compile_covers_every_role_and_gradient() {
        let vars = StyleScope::compile(palette(ThemeId::Christmas));
        // 11 shared roles + 1 extra + 3 gradients + duration + easing.
        assert_eq!(vars.len(), 17);
        assert!(vars.contains_key("color-primary"));
        assert!(vars.contains_key("color-silver"));
        assert!(vars.contains_key("gradient-hero"));
        assert!(vars.contains_key("animation-duration"));
        assert!(vars.contains_key("animation-easing"));
    }

    #[test]
    fn replace_swaps_the_whole_scope() {
        let mut scope = StyleScope::new();
        scope.replace(StyleScope::compile(palette(ThemeId::MidAutumn)));
        let amber = scope.color("amber");
        assert!(amber.is_some());

        scope.replace(StyleScope::compile(palette(ThemeId::Default)));
        // The previous theme's extra role is gone, not layered underneath.
        assert_eq!(scope.color("amber"), None);
        assert_eq!(
            scope.color("primary"),
            Some(palette(ThemeId::Default).colors.primary)
        );
    }

    #[test]
    fn duration_variable_reflects_palette_timing() {
        let mut scope = StyleScope::new();
        scope.replace(StyleScope::compile(palette(ThemeId::Christmas)));
        match scope.get("animation-duration") {
            Some(StyleValue::Duration(d)) => assert_eq!(*d, Duration::from_millis(500)),
            other => panic!("unexpected variable: {other:?}"),
        }
    }
}
