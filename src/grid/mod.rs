//! # Grid Coordinate System
//!
//! Everything in a planner page is measured in boxes: the squares of the
//! grid paper. Layout works in boxes with the origin at the top-left corner
//! and rows growing downward. Drawing surfaces (PDF in particular) work in
//! points with the origin at the bottom-left and y growing upward.
//!
//! [`Grid`] converts between the two. It is plain linear arithmetic over a
//! single unit size and the page height. Nothing here is bounds-checked:
//! negative columns or rows past the bottom edge are legitimate (vanishing
//! points, bleed areas, sidebars drawn off the content area).

use serde::{Deserialize, Serialize};

/// A rectangle in grid units. `(col, row)` is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GridRect {
    pub col: f64,
    pub row: f64,
    pub width: f64,
    pub height: f64,
}

impl GridRect {
    pub fn new(col: f64, row: f64, width: f64, height: f64) -> Self {
        Self {
            col,
            row,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.col + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.row + self.height
    }

    /// Shrink the rectangle by `boxes` on every side. Never goes negative.
    pub fn inset(&self, boxes: f64) -> Self {
        Self {
            col: self.col + boxes,
            row: self.row + boxes,
            width: (self.width - 2.0 * boxes).max(0.0),
            height: (self.height - 2.0 * boxes).max(0.0),
        }
    }

    /// Center point `(col, row)`.
    pub fn center(&self) -> (f64, f64) {
        (self.col + self.width / 2.0, self.row + self.height / 2.0)
    }
}

/// A rectangle in surface units. `(x, y)` is the **top-left** corner,
/// measured in a bottom-left-origin space, so `y` is the distance of the
/// top edge from the bottom of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SurfaceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Distance of the bottom edge from the bottom of the page.
    pub fn bottom(&self) -> f64 {
        self.y - self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y - self.height / 2.0)
    }
}

/// Grid geometry for one page size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    unit: f64,
    page_width: f64,
    page_height: f64,
}

impl Grid {
    /// A grid with an explicit page size in surface units.
    pub fn new(unit: f64, page_width: f64, page_height: f64) -> Self {
        Self {
            unit,
            page_width,
            page_height,
        }
    }

    /// A grid whose page is exactly `cols × rows` boxes.
    pub fn for_boxes(unit: f64, cols: u32, rows: u32) -> Self {
        Self::new(unit, cols as f64 * unit, rows as f64 * unit)
    }

    pub fn unit(&self) -> f64 {
        self.unit
    }

    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    /// Number of whole columns that fit on the page.
    pub fn cols(&self) -> u32 {
        (self.page_width / self.unit).floor().max(0.0) as u32
    }

    /// Number of whole rows that fit on the page.
    pub fn rows(&self) -> u32 {
        (self.page_height / self.unit).floor().max(0.0) as u32
    }

    /// The whole page as a grid rectangle.
    pub fn page_rect(&self) -> GridRect {
        GridRect::new(
            0.0,
            0.0,
            self.page_width / self.unit,
            self.page_height / self.unit,
        )
    }

    pub fn x(&self, col: f64) -> f64 {
        col * self.unit
    }

    pub fn y(&self, row: f64) -> f64 {
        self.page_height - row * self.unit
    }

    pub fn width(&self, boxes: f64) -> f64 {
        boxes * self.unit
    }

    pub fn height(&self, boxes: f64) -> f64 {
        boxes * self.unit
    }

    pub fn rect(&self, col: f64, row: f64, width: f64, height: f64) -> SurfaceRect {
        SurfaceRect {
            x: self.x(col),
            y: self.y(row),
            width: self.width(width),
            height: self.height(height),
        }
    }

    pub fn to_surface(&self, r: &GridRect) -> SurfaceRect {
        self.rect(r.col, r.row, r.width, r.height)
    }

    /// Inverse of [`Grid::x`].
    pub fn col_at(&self, x: f64) -> f64 {
        x / self.unit
    }

    /// Inverse of [`Grid::y`].
    pub fn row_at(&self, y: f64) -> f64 {
        (self.page_height - y) / self.unit
    }
}
