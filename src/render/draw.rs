//! Per-variant drawing routines.
//!
//! Each routine turns (resolved style, bounds, payload) into surface calls
//! and nothing else: no layout decisions, no style lookups.

use crate::grid::{Grid, GridRect, SurfaceRect};
use crate::model::{LineStyle, NodeKind, Orientation, RuledCount, TextAlign, TextWrap};
use crate::style::ResolvedStyle;
use crate::surface::{rotated, Stroke, Surface, TextOptions};

/// Tolerance when deciding whether a grid line falls inside a rectangle.
const EPS: f64 = 1e-6;

/// Label inset from the left edge of a field, in boxes.
const LABEL_INSET: f64 = 0.2;

pub(crate) struct DrawContext<'a> {
    pub grid: &'a Grid,
    pub bounds: GridRect,
    pub rect: SurfaceRect,
    pub style: &'a ResolvedStyle,
}

impl DrawContext<'_> {
    fn stroke(&self, line: LineStyle) -> Stroke {
        Stroke {
            color: self.style.line_color,
            width: self.style.line_width,
            style: line,
        }
    }
}

/// Draw any leaf except tabs, which need their cycle resolved first.
pub(crate) fn leaf(surface: &mut dyn Surface, cx: &DrawContext, kind: &NodeKind) {
    match kind {
        NodeKind::Text {
            content,
            align,
            wrap,
        } => {
            decorate(surface, cx);
            let options = TextOptions::from_style(cx.style, *align, *wrap);
            surface.text(cx.rect, content, &options);
        }
        NodeKind::DotGrid => {
            decorate(surface, cx);
            dot_grid(surface, cx);
        }
        NodeKind::LineGrid { spacing, line } => {
            decorate(surface, cx);
            line_grid(surface, cx, *spacing, *line);
        }
        NodeKind::RuledLines { count, line } => {
            decorate(surface, cx);
            ruled_lines(surface, cx, *count, *line);
        }
        NodeKind::Divider {
            orientation,
            thickness,
            line,
        } => divider(surface, cx, *orientation, *thickness, *line),
        NodeKind::Field {
            background,
            lines,
            label,
        } => field(surface, cx, *background, *lines, label.as_deref()),
        NodeKind::NavLink { destination, label } => {
            decorate(surface, cx);
            if let Some(label) = label {
                let options = TextOptions::from_style(cx.style, TextAlign::Center, TextWrap::ShrinkToFit);
                surface.text(cx.rect, label, &options);
            }
            surface.link(cx.rect, destination);
        }
        NodeKind::Custom(draw) => draw.call(surface, cx.rect),
        NodeKind::Container { .. } | NodeKind::Spacer | NodeKind::Tab { .. } => {}
    }
}

/// Optional background fill and border from the style.
fn decorate(surface: &mut dyn Surface, cx: &DrawContext) {
    if let Some(bg) = cx.style.background_color {
        surface.fill_rect(cx.rect, bg);
    }
    if cx.style.border_width > 0.0 {
        surface.stroke_rect(cx.rect, &Stroke::solid(cx.style.border_color, cx.style.border_width));
    }
}

/// Whole-box positions from `start` to `end`, both inclusive.
fn box_lines(start: f64, end: f64) -> impl Iterator<Item = f64> {
    let first = (start - EPS).ceil() as i64;
    let last = (end + EPS).floor() as i64;
    (first..=last).map(|v| v as f64)
}

fn dot_grid(surface: &mut dyn Surface, cx: &DrawContext) {
    let b = cx.bounds;
    if cx.style.dot_radius <= 0.0 {
        return;
    }
    for row in box_lines(b.row, b.bottom()) {
        for col in box_lines(b.col, b.right()) {
            surface.fill_circle(
                (cx.grid.x(col), cx.grid.y(row)),
                cx.style.dot_radius,
                cx.style.dot_color,
            );
        }
    }
}

fn line_grid(surface: &mut dyn Surface, cx: &DrawContext, spacing: f64, line: LineStyle) {
    let b = cx.bounds;
    if spacing.is_nan() || spacing <= 0.0 {
        return;
    }
    let stroke = cx.stroke(line);
    let (top, bottom) = (cx.grid.y(b.row), cx.grid.y(b.bottom()));
    let (left, right) = (cx.grid.x(b.col), cx.grid.x(b.right()));

    for col in grid_steps(b.col, b.width, spacing) {
        let x = cx.grid.x(col);
        surface.line((x, top), (x, bottom), &stroke);
    }
    for row in grid_steps(b.row, b.height, spacing) {
        let y = cx.grid.y(row);
        surface.line((left, y), (right, y), &stroke);
    }
}

/// `start + k * spacing` for every `k` that stays within `extent`.
fn grid_steps(start: f64, extent: f64, spacing: f64) -> impl Iterator<Item = f64> {
    let steps = ((extent + EPS) / spacing).floor().max(0.0) as u64;
    (0..=steps).map(move |k| start + k as f64 * spacing)
}

/// Ruled lines across `b`, each at the bottom of its slot.
fn ruled_lines_in(surface: &mut dyn Surface, grid: &Grid, b: GridRect, count: RuledCount, stroke: &Stroke) {
    let (slots, pitch) = match count {
        RuledCount::Auto => ((b.height + EPS).floor().max(0.0) as u32, 1.0),
        RuledCount::Count(0) => return,
        RuledCount::Count(n) => (n, b.height / n as f64),
    };
    let (left, right) = (grid.x(b.col), grid.x(b.right()));
    for k in 1..=slots {
        let y = grid.y(b.row + k as f64 * pitch);
        surface.line((left, y), (right, y), stroke);
    }
}

fn ruled_lines(surface: &mut dyn Surface, cx: &DrawContext, count: RuledCount, line: LineStyle) {
    ruled_lines_in(surface, cx.grid, cx.bounds, count, &cx.stroke(line));
}

fn divider(
    surface: &mut dyn Surface,
    cx: &DrawContext,
    orientation: Orientation,
    thickness: Option<f64>,
    line: LineStyle,
) {
    let mut stroke = cx.stroke(line);
    if let Some(t) = thickness {
        stroke.width = t.max(0.0);
    }
    let (mid_x, mid_y) = cx.rect.center();
    match orientation {
        Orientation::Horizontal => surface.line((cx.rect.x, mid_y), (cx.rect.right(), mid_y), &stroke),
        Orientation::Vertical => surface.line((mid_x, cx.rect.y), (mid_x, cx.rect.bottom()), &stroke),
    }
}

fn field(
    surface: &mut dyn Surface,
    cx: &DrawContext,
    background: bool,
    lines: Option<RuledCount>,
    label: Option<&str>,
) {
    if background {
        if let Some(bg) = cx.style.background_color {
            surface.fill_rect(cx.rect, bg);
        }
    }
    if cx.style.border_width > 0.0 {
        surface.stroke_rect(cx.rect, &Stroke::solid(cx.style.border_color, cx.style.border_width));
    }
    if let Some(count) = lines {
        ruled_lines_in(surface, cx.grid, cx.bounds, count, &cx.stroke(LineStyle::Solid));
    }
    if let Some(label) = label {
        let b = cx.bounds;
        let label_box = GridRect::new(
            b.col + LABEL_INSET,
            b.row,
            (b.width - 2.0 * LABEL_INSET).max(0.0),
            b.height.min(1.0),
        );
        let options = TextOptions::from_style(cx.style, TextAlign::Left, TextWrap::ShrinkToFit);
        surface.text(cx.grid.to_surface(&label_box), label, &options);
    }
}

/// Draw a resolved tab: background, rotated label, link to its target.
pub(crate) fn tab(
    surface: &mut dyn Surface,
    rect: SurfaceRect,
    style: &ResolvedStyle,
    label: &str,
    rotation: f64,
    target: &str,
) {
    if let Some(bg) = style.background_color {
        surface.fill_rect(rect, bg);
    }
    if style.border_width > 0.0 {
        surface.stroke_rect(rect, &Stroke::solid(style.border_color, style.border_width));
    }

    let center = rect.center();
    let text_rect = label_rect(rect, rotation);
    let options = TextOptions::from_style(style, TextAlign::Center, TextWrap::ShrinkToFit);
    rotated(surface, center, rotation, |s| s.text(text_rect, label, &options));

    surface.link(rect, target);
}

/// The rectangle a label occupies before rotation so that, once rotated
/// around the centre of `rect`, it runs along the tab's long side.
fn label_rect(rect: SurfaceRect, rotation: f64) -> SurfaceRect {
    let theta = rotation.to_radians();
    if theta.sin().abs() <= theta.cos().abs() {
        return rect;
    }
    let (cx, cy) = rect.center();
    SurfaceRect::new(
        cx - rect.height / 2.0,
        cy + rect.width / 2.0,
        rect.height,
        rect.width,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, Style};
    use crate::surface::{DrawCall, RecordingSurface};

    fn grid() -> Grid {
        Grid::for_boxes(10.0, 40, 50)
    }

    fn draw(kind: NodeKind, bounds: GridRect, style: &ResolvedStyle) -> RecordingSurface {
        let grid = grid();
        let cx = DrawContext {
            grid: &grid,
            bounds,
            rect: grid.to_surface(&bounds),
            style,
        };
        let mut surface = RecordingSurface::new();
        leaf(&mut surface, &cx, &kind);
        surface
    }

    fn plain() -> ResolvedStyle {
        Style::default().to_resolved()
    }

    #[test]
    fn test_dot_grid_one_dot_per_intersection() {
        let surface = draw(NodeKind::DotGrid, GridRect::new(1.0, 1.0, 3.0, 2.0), &plain());
        let dots = surface.count(|c| matches!(c, DrawCall::FillCircle { .. }));
        assert_eq!(dots, 4 * 3);
        assert_eq!(
            surface.calls()[0],
            DrawCall::FillCircle {
                center: (10.0, 490.0),
                radius: 0.5,
                color: Color::gray(0.6),
            }
        );
    }

    #[test]
    fn test_dot_grid_snaps_to_page_grid() {
        let surface = draw(NodeKind::DotGrid, GridRect::new(0.5, 0.5, 2.0, 1.0), &plain());
        // columns 1 and 2, row 1 only
        assert_eq!(surface.count(|c| matches!(c, DrawCall::FillCircle { .. })), 2);
    }

    #[test]
    fn test_auto_ruled_lines_one_per_box_row() {
        let kind = NodeKind::RuledLines {
            count: RuledCount::Auto,
            line: LineStyle::Solid,
        };
        let surface = draw(kind, GridRect::new(0.0, 0.0, 10.0, 4.0), &plain());
        assert_eq!(surface.calls().len(), 4);
        assert_eq!(
            surface.calls()[3],
            DrawCall::Line {
                from: (0.0, 460.0),
                to: (100.0, 460.0),
                stroke: Stroke::solid(Color::gray(0.7), 0.5),
            }
        );
    }

    #[test]
    fn test_counted_ruled_lines_are_evenly_spaced() {
        let kind = NodeKind::RuledLines {
            count: RuledCount::Count(2),
            line: LineStyle::Dashed,
        };
        let surface = draw(kind, GridRect::new(0.0, 0.0, 10.0, 5.0), &plain());
        let ys: Vec<f64> = surface
            .calls()
            .iter()
            .filter_map(|c| match c {
                DrawCall::Line { from, .. } => Some(from.1),
                _ => None,
            })
            .collect();
        assert_eq!(ys, vec![475.0, 450.0]);
    }

    #[test]
    fn test_line_grid_includes_both_edges() {
        let kind = NodeKind::LineGrid {
            spacing: 2.0,
            line: LineStyle::Dotted,
        };
        let surface = draw(kind, GridRect::new(0.0, 0.0, 4.0, 2.0), &plain());
        // verticals at 0, 2, 4; horizontals at 0, 2
        assert_eq!(surface.calls().len(), 5);
    }

    #[test]
    fn test_line_grid_positions_do_not_drift() {
        let kind = NodeKind::LineGrid {
            spacing: 0.1,
            line: LineStyle::Solid,
        };
        let surface = draw(kind, GridRect::new(0.0, 0.0, 10.0, 1.0), &plain());
        let xs: Vec<f64> = surface
            .calls()
            .iter()
            .filter_map(|c| match c {
                DrawCall::Line { from, to, .. } if from.0 == to.0 => Some(from.0),
                _ => None,
            })
            .collect();
        assert_eq!(xs.len(), 101);
        assert!((xs[100] - 100.0).abs() < 1e-9);
        assert!((xs[37] - 37.0).abs() < 1e-9);
    }

    #[test]
    fn test_divider_runs_through_center() {
        let kind = NodeKind::Divider {
            orientation: Orientation::Vertical,
            thickness: Some(2.0),
            line: LineStyle::Solid,
        };
        let surface = draw(kind, GridRect::new(2.0, 0.0, 2.0, 10.0), &plain());
        match &surface.calls()[0] {
            DrawCall::Line { from, to, stroke } => {
                assert_eq!(*from, (30.0, 500.0));
                assert_eq!(*to, (30.0, 400.0));
                assert_eq!(stroke.width, 2.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_field_draws_background_lines_then_label() {
        let style = Style {
            background_color: Some(Color::gray(0.95)),
            ..Default::default()
        }
        .to_resolved();
        let kind = NodeKind::Field {
            background: true,
            lines: Some(RuledCount::Auto),
            label: Some("Notes".to_string()),
        };
        let surface = draw(kind, GridRect::new(0.0, 0.0, 10.0, 3.0), &style);
        let calls = surface.calls();
        assert!(matches!(calls[0], DrawCall::FillRect { .. }));
        assert_eq!(surface.count(|c| matches!(c, DrawCall::Line { .. })), 3);
        match calls.last().unwrap() {
            DrawCall::Text { rect, text, .. } => {
                assert_eq!(text, "Notes");
                assert_eq!(rect.height, 10.0);
                assert_eq!(rect.x, 2.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_nav_link_registers_region() {
        let kind = NodeKind::NavLink {
            destination: "year-2026".to_string(),
            label: Some("2026".to_string()),
        };
        let surface = draw(kind, GridRect::new(0.0, 0.0, 4.0, 1.0), &plain());
        assert_eq!(surface.texts(), vec!["2026"]);
        assert_eq!(surface.links(), vec!["year-2026"]);
    }

    #[test]
    fn test_background_and_border_from_style() {
        let style = Style {
            background_color: Some(Color::WHITE),
            border_width: Some(1.0),
            ..Default::default()
        }
        .to_resolved();
        let kind = NodeKind::Text {
            content: "x".to_string(),
            align: TextAlign::Left,
            wrap: TextWrap::Clip,
        };
        let surface = draw(kind, GridRect::new(0.0, 0.0, 1.0, 1.0), &style);
        assert!(matches!(surface.calls()[0], DrawCall::FillRect { .. }));
        assert!(matches!(surface.calls()[1], DrawCall::StrokeRect { .. }));
        assert!(matches!(surface.calls()[2], DrawCall::Text { .. }));
    }

    #[test]
    fn test_rotated_tab_swaps_label_box() {
        let rect = SurfaceRect::new(0.0, 100.0, 20.0, 60.0);
        let mut surface = RecordingSurface::new();
        tab(&mut surface, rect, &plain(), "March", 90.0, "mar");

        let calls = surface.calls();
        assert_eq!(
            calls[0],
            DrawCall::PushRotation {
                pivot: (10.0, 70.0),
                degrees: 90.0
            }
        );
        match &calls[1] {
            DrawCall::Text { rect, .. } => {
                assert_eq!(*rect, SurfaceRect::new(-20.0, 80.0, 60.0, 20.0));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(calls[2], DrawCall::PopTransform);
        assert_eq!(surface.links(), vec!["mar"]);
    }

    #[test]
    fn test_unrotated_label_uses_tab_rect() {
        let rect = SurfaceRect::new(0.0, 100.0, 60.0, 20.0);
        assert_eq!(label_rect(rect, 0.0), rect);
        assert_eq!(label_rect(rect, 180.0), rect);
    }
}
