//! # Style System
//!
//! Planner styles are small property bags: typography, a text color, a
//! background, and the stroke/dot settings the grid fills use. A [`Style`]
//! holds optional values so it can act as an override at any tier.
//!
//! Resolution is three tiers, later tiers winning:
//!
//! 1. the built-in defaults for the node's variant,
//! 2. the named style the node references, looked up in a [`ThemeRegistry`],
//! 3. the node's own inline overrides.
//!
//! A named style that is not in the theme contributes nothing. It is never
//! an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Node, NodeKind};

/// An optional-valued set of visual properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    // ── Typography ─────────────────────────────────────────────
    /// Font family name. The PDF surface knows Helvetica, Times and Courier.
    pub font_family: Option<String>,
    /// Font size in points.
    pub font_size: Option<f64>,
    /// Font weight (100-900).
    pub font_weight: Option<u32>,
    pub italic: Option<bool>,
    /// Text color.
    pub color: Option<Color>,

    // ── Fills ──────────────────────────────────────────────────
    pub background_color: Option<Color>,
    pub border_color: Option<Color>,
    /// Border stroke width in points. Zero or absent means no border.
    pub border_width: Option<f64>,

    // ── Grid strokes ───────────────────────────────────────────
    pub line_color: Option<Color>,
    /// Line stroke width in points.
    pub line_width: Option<f64>,
    pub dot_color: Option<Color>,
    /// Dot radius in points.
    pub dot_radius: Option<f64>,
}

impl Style {
    /// Lay `other` over `self`: every property `other` sets wins.
    pub fn overlay(&mut self, other: &Style) {
        if other.font_family.is_some() {
            self.font_family = other.font_family.clone();
        }
        self.font_size = other.font_size.or(self.font_size);
        self.font_weight = other.font_weight.or(self.font_weight);
        self.italic = other.italic.or(self.italic);
        self.color = other.color.or(self.color);
        self.background_color = other.background_color.or(self.background_color);
        self.border_color = other.border_color.or(self.border_color);
        self.border_width = other.border_width.or(self.border_width);
        self.line_color = other.line_color.or(self.line_color);
        self.line_width = other.line_width.or(self.line_width);
        self.dot_color = other.dot_color.or(self.dot_color);
        self.dot_radius = other.dot_radius.or(self.dot_radius);
    }

    /// Fill in anything still unset with the engine-wide fallbacks.
    pub fn to_resolved(&self) -> ResolvedStyle {
        ResolvedStyle {
            font_family: self
                .font_family
                .clone()
                .unwrap_or_else(|| "Helvetica".to_string()),
            font_size: self.font_size.unwrap_or(10.0),
            font_weight: self.font_weight.unwrap_or(400),
            italic: self.italic.unwrap_or(false),
            color: self.color.unwrap_or(Color::BLACK),
            background_color: self.background_color,
            border_color: self.border_color.unwrap_or(Color::BLACK),
            border_width: self.border_width.unwrap_or(0.0).max(0.0),
            line_color: self.line_color.unwrap_or(Color::gray(0.7)),
            line_width: self.line_width.unwrap_or(0.5).max(0.0),
            dot_color: self.dot_color.unwrap_or(Color::gray(0.6)),
            dot_radius: self.dot_radius.unwrap_or(0.5).max(0.0),
        }
    }
}

/// Resolved style: every value concrete. This is what drawing routines read.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: u32,
    pub italic: bool,
    pub color: Color,
    pub background_color: Option<Color>,
    pub border_color: Color,
    pub border_width: f64,
    pub line_color: Color,
    pub line_width: f64,
    pub dot_color: Color,
    pub dot_radius: f64,
}

impl ResolvedStyle {
    pub fn is_bold(&self) -> bool {
        self.font_weight >= 600
    }
}

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64, // 0.0 - 1.0
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn gray(level: f64) -> Self {
        Self::rgb(level, level, level)
    }

    /// Parse `#rgb` or `#rrggbb`. Malformed input yields black.
    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        let channel = |s: &str| u8::from_str_radix(s, 16).unwrap_or(0) as f64 / 255.0;
        match hex.len() {
            3 => Self::rgb(
                channel(&hex[0..1].repeat(2)),
                channel(&hex[1..2].repeat(2)),
                channel(&hex[2..3].repeat(2)),
            ),
            6 => Self::rgb(channel(&hex[0..2]), channel(&hex[2..4]), channel(&hex[4..6])),
            _ => Self::BLACK,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Read-only lookup of named styles.
pub trait ThemeRegistry {
    fn lookup(&self, name: &str) -> Option<&Style>;
}

/// The stock registry: named styles in a map, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, style: Style) -> &mut Self {
        self.styles.insert(name.into(), style);
        self
    }
}

impl ThemeRegistry for Theme {
    fn lookup(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }
}

impl ThemeRegistry for HashMap<String, Style> {
    fn lookup(&self, name: &str) -> Option<&Style> {
        self.get(name)
    }
}

/// Built-in defaults for each node variant. `active` only matters for tabs.
pub fn defaults_for(kind: &NodeKind, active: bool) -> Style {
    match kind {
        NodeKind::Text { .. } => Style {
            font_size: Some(10.0),
            ..Default::default()
        },
        NodeKind::DotGrid => Style {
            dot_color: Some(Color::gray(0.55)),
            dot_radius: Some(0.5),
            ..Default::default()
        },
        NodeKind::LineGrid { .. } => Style {
            line_color: Some(Color::gray(0.8)),
            line_width: Some(0.25),
            ..Default::default()
        },
        NodeKind::RuledLines { .. } => Style {
            line_color: Some(Color::gray(0.7)),
            line_width: Some(0.5),
            ..Default::default()
        },
        NodeKind::Divider { .. } => Style {
            line_color: Some(Color::gray(0.3)),
            line_width: Some(1.0),
            ..Default::default()
        },
        NodeKind::Field { .. } => Style {
            font_size: Some(7.0),
            color: Some(Color::gray(0.4)),
            background_color: Some(Color::gray(0.96)),
            line_color: Some(Color::gray(0.75)),
            line_width: Some(0.5),
            ..Default::default()
        },
        NodeKind::NavLink { .. } => Style {
            font_size: Some(9.0),
            color: Some(Color::gray(0.2)),
            ..Default::default()
        },
        NodeKind::Tab { .. } if active => Style {
            font_size: Some(8.0),
            font_weight: Some(700),
            color: Some(Color::WHITE),
            background_color: Some(Color::gray(0.2)),
            ..Default::default()
        },
        NodeKind::Tab { .. } => Style {
            font_size: Some(8.0),
            color: Some(Color::gray(0.2)),
            background_color: Some(Color::gray(0.9)),
            ..Default::default()
        },
        NodeKind::Container { .. } | NodeKind::Spacer | NodeKind::Custom(_) => Style::default(),
    }
}

/// Name of the extra theme entry consulted for an active tab.
pub fn active_style_name(style_key: Option<&str>) -> String {
    match style_key {
        Some(key) => format!("{key}.active"),
        None => "tab.active".to_string(),
    }
}

/// Resolve a node's effective style: type defaults, then the named style,
/// then inline overrides.
pub fn resolve(node: &Node, theme: &dyn ThemeRegistry, active: bool) -> ResolvedStyle {
    let mut style = defaults_for(&node.kind, active);

    if let Some(key) = node.style_key.as_deref() {
        match theme.lookup(key) {
            Some(named) => style.overlay(named),
            None => tracing::trace!(style = key, "named style not in theme"),
        }
    }
    if active {
        let name = active_style_name(node.style_key.as_deref());
        if let Some(named) = theme.lookup(&name) {
            style.overlay(named);
        }
    }

    style.overlay(&node.style);
    style.to_resolved()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_node() -> Node {
        Node::text("Monday")
    }

    #[test]
    fn test_inline_beats_named_beats_default() {
        let mut theme = Theme::new();
        theme.insert(
            "heading",
            Style {
                font_size: Some(14.0),
                font_weight: Some(700),
                ..Default::default()
            },
        );
        let node = text_node().style_key("heading").style(Style {
            font_size: Some(20.0),
            ..Default::default()
        });

        let resolved = resolve(&node, &theme, false);
        assert_eq!(resolved.font_size, 20.0);
        assert_eq!(resolved.font_weight, 700);
        assert_eq!(resolved.font_family, "Helvetica");
    }

    #[test]
    fn test_named_beats_default() {
        let mut theme = Theme::new();
        theme.insert(
            "small",
            Style {
                font_size: Some(6.0),
                ..Default::default()
            },
        );
        let node = text_node().style_key("small");
        assert_eq!(resolve(&node, &theme, false).font_size, 6.0);
    }

    #[test]
    fn test_missing_named_style_falls_through() {
        let theme = Theme::new();
        let node = text_node().style_key("nope");
        let resolved = resolve(&node, &theme, false);
        assert_eq!(resolved.font_size, 10.0);
        assert_eq!(resolved.color, Color::BLACK);
    }

    #[test]
    fn test_active_tab_uses_active_defaults_and_theme_entry() {
        let mut theme = Theme::new();
        theme.insert(
            "month-tab.active",
            Style {
                background_color: Some(Color::hex("#c00")),
                ..Default::default()
            },
        );
        let node = Node::tab(["jan", "feb"], "Q1").style_key("month-tab");

        let inactive = resolve(&node, &theme, false);
        assert_eq!(inactive.background_color, Some(Color::gray(0.9)));

        let active = resolve(&node, &theme, true);
        assert_eq!(active.background_color, Some(Color::rgb(0.8, 0.0, 0.0)));
        assert_eq!(active.color, Color::WHITE);
        assert!(active.is_bold());
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(Color::hex("#ffffff"), Color::WHITE);
        assert_eq!(Color::hex("000"), Color::BLACK);
        assert_eq!(Color::hex("zz"), Color::BLACK);
    }

    #[test]
    fn test_theme_from_json() {
        let theme: Theme = serde_json::from_str(
            r#"{ "header": { "fontSize": 14, "color": { "r": 1, "g": 0, "b": 0 } } }"#,
        )
        .unwrap();
        let header = theme.lookup("header").unwrap();
        assert_eq!(header.font_size, Some(14.0));
        assert_eq!(header.color, Some(Color::rgb(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_negative_widths_clamped() {
        let style = Style {
            line_width: Some(-2.0),
            ..Default::default()
        };
        assert_eq!(style.to_resolved().line_width, 0.0);
    }
}
