//! # Gridplan
//!
//! A grid-paper planner engine.
//!
//! Planner pages for e-ink tablets are drawn on a box grid: every header,
//! tab strip, dot field and writing area starts and ends on a grid line.
//! Gridplan makes that the unit of layout. A page is a tree of nodes sized
//! in whole (or fractional) boxes, laid out once against the page's content
//! area, then painted onto a drawing surface with tabs and links that jump
//! between pages.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]    : Layout nodes and the scoped builder
//!       ↓
//!   [layout]   : Bounds computation in grid units
//!       ↓
//!   [render]   : Style resolution, tab cycles, per-variant drawing
//!       ↓
//!   [surface]  : Drawing capability trait (PDF, recording)
//!       ↓
//!   [pdf]      : Serialize to PDF bytes with named destinations
//! ```
//!
//! `grid` converts between boxes and points, `style` merges inline, themed
//! and default properties, `nav` resolves which page a tab links to.

pub mod document;
pub mod error;
pub mod grid;
pub mod layout;
pub mod model;
pub mod nav;
pub mod pdf;
pub mod render;
pub mod style;
pub mod surface;

pub use document::{render_document, render_json, render_pdf, Document};
pub use error::{GridplanError, LayoutError, Result};
pub use grid::{Grid, GridRect, SurfaceRect};
pub use layout::LayoutTree;
pub use model::builder::LayoutBuilder;
pub use model::{Node, NodeKind, Sizing};
pub use render::{PageContext, Renderer};
pub use style::{Style, Theme};
pub use surface::Surface;
