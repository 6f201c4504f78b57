//! # Drawing Surface
//!
//! The capability set the renderer paints through. A surface is one mutable
//! sink (usually "the current page of an output document"); calls arrive in
//! paint order and later calls layer over earlier ones.
//!
//! All coordinates are surface units with the origin at the bottom-left.
//! Rectangles use [`SurfaceRect`], whose `(x, y)` is the top-left corner.

pub mod recording;

use crate::grid::SurfaceRect;
use crate::model::{LineStyle, TextAlign, TextWrap};
use crate::style::{Color, ResolvedStyle};

pub use recording::{DrawCall, RecordingSurface};

/// Stroke settings for lines and outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub style: LineStyle,
}

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            style: LineStyle::Solid,
        }
    }
}

/// How to place a run of text inside its rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOptions {
    pub font_family: String,
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
    pub color: Color,
    pub align: TextAlign,
    pub wrap: TextWrap,
}

impl TextOptions {
    pub fn from_style(style: &ResolvedStyle, align: TextAlign, wrap: TextWrap) -> Self {
        Self {
            font_family: style.font_family.clone(),
            font_size: style.font_size,
            bold: style.is_bold(),
            italic: style.italic,
            color: style.color,
            align,
            wrap,
        }
    }
}

pub trait Surface {
    /// Start a new page. `id`, when given, becomes a named destination
    /// pointing at the page.
    fn begin_page(&mut self, id: Option<&str>);

    fn fill_rect(&mut self, rect: SurfaceRect, color: Color);

    fn stroke_rect(&mut self, rect: SurfaceRect, stroke: &Stroke);

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Color);

    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &Stroke);

    /// Place `text` inside `rect`, vertically centred.
    fn text(&mut self, rect: SurfaceRect, text: &str, options: &TextOptions);

    /// Rotate everything drawn until the matching [`Surface::pop_transform`]
    /// by `degrees` (counter-clockwise) around `pivot`.
    fn push_rotation(&mut self, pivot: (f64, f64), degrees: f64);

    fn pop_transform(&mut self);

    /// Make `rect` clickable, jumping to the named destination.
    fn link(&mut self, rect: SurfaceRect, destination: &str);
}

/// Run `draw` with a rotation in effect, always popping it afterwards.
pub fn rotated<S, F>(surface: &mut S, pivot: (f64, f64), degrees: f64, draw: F)
where
    S: Surface + ?Sized,
    F: FnOnce(&mut S),
{
    if degrees == 0.0 {
        draw(surface);
        return;
    }
    surface.push_rotation(pivot, degrees);
    draw(surface);
    surface.pop_transform();
}

/// Rough advance width of `text` in points. Good enough for alignment and
/// shrink-to-fit on the standard fonts; nothing here measures real glyphs.
pub fn estimate_text_width(text: &str, font_size: f64, bold: bool) -> f64 {
    let em: f64 = text
        .chars()
        .map(|ch| match ch {
            'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' | 'I' => 0.28,
            ' ' | 'f' | 't' | 'r' | '(' | ')' | '-' | '/' => 0.33,
            'm' | 'w' | 'M' | 'W' => 0.83,
            c if c.is_ascii_uppercase() => 0.67,
            c if c.is_ascii_digit() => 0.556,
            _ => 0.53,
        })
        .sum();
    let weight = if bold { 1.06 } else { 1.0 };
    em * font_size * weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotated_pops_transform() {
        let mut surface = RecordingSurface::new();
        rotated(&mut surface, (10.0, 10.0), 90.0, |s| {
            s.fill_rect(SurfaceRect::new(0.0, 10.0, 5.0, 5.0), Color::BLACK);
        });
        assert_eq!(
            surface.calls(),
            &[
                DrawCall::PushRotation {
                    pivot: (10.0, 10.0),
                    degrees: 90.0
                },
                DrawCall::FillRect {
                    rect: SurfaceRect::new(0.0, 10.0, 5.0, 5.0),
                    color: Color::BLACK
                },
                DrawCall::PopTransform,
            ]
        );
    }

    #[test]
    fn test_zero_rotation_skips_transform() {
        let mut surface = RecordingSurface::new();
        rotated(&mut surface, (0.0, 0.0), 0.0, |s| s.link(SurfaceRect::default(), "x"));
        assert_eq!(surface.calls().len(), 1);
    }

    #[test]
    fn test_estimate_grows_with_size_and_length() {
        let small = estimate_text_width("March", 8.0, false);
        assert!(estimate_text_width("March", 16.0, false) > small);
        assert!(estimate_text_width("March 2026", 8.0, false) > small);
        assert!(estimate_text_width("March", 8.0, true) > small);
        assert_eq!(estimate_text_width("", 12.0, false), 0.0);
    }
}
