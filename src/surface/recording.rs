//! A surface that records its calls instead of drawing them.
//!
//! Used by the tests and handy for debugging a page: the call list is the
//! exact paint order the renderer produced.

use crate::grid::SurfaceRect;
use crate::style::Color;
use crate::surface::{Stroke, Surface, TextOptions};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    BeginPage {
        id: Option<String>,
    },
    FillRect {
        rect: SurfaceRect,
        color: Color,
    },
    StrokeRect {
        rect: SurfaceRect,
        stroke: Stroke,
    },
    FillCircle {
        center: (f64, f64),
        radius: f64,
        color: Color,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        stroke: Stroke,
    },
    Text {
        rect: SurfaceRect,
        text: String,
        options: TextOptions,
    },
    PushRotation {
        pivot: (f64, f64),
        degrees: f64,
    },
    PopTransform,
    Link {
        rect: SurfaceRect,
        destination: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Texts placed so far, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Link destinations registered so far, in paint order.
    pub fn links(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Link { destination, .. } => Some(destination.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn begin_page(&mut self, id: Option<&str>) {
        self.calls.push(DrawCall::BeginPage {
            id: id.map(str::to_string),
        });
    }

    fn fill_rect(&mut self, rect: SurfaceRect, color: Color) {
        self.calls.push(DrawCall::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: SurfaceRect, stroke: &Stroke) {
        self.calls.push(DrawCall::StrokeRect {
            rect,
            stroke: *stroke,
        });
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Color) {
        self.calls.push(DrawCall::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &Stroke) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn text(&mut self, rect: SurfaceRect, text: &str, options: &TextOptions) {
        self.calls.push(DrawCall::Text {
            rect,
            text: text.to_string(),
            options: options.clone(),
        });
    }

    fn push_rotation(&mut self, pivot: (f64, f64), degrees: f64) {
        self.calls.push(DrawCall::PushRotation { pivot, degrees });
    }

    fn pop_transform(&mut self) {
        self.calls.push(DrawCall::PopTransform);
    }

    fn link(&mut self, rect: SurfaceRect, destination: &str) {
        self.calls.push(DrawCall::Link {
            rect,
            destination: destination.to_string(),
        });
    }
}
