//! # Layout Node Model
//!
//! A planner page is a tree of [`Node`]s. Containers stack their children
//! along one axis; everything else is a leaf that draws something (or, for
//! [`NodeKind::Spacer`], deliberately nothing).
//!
//! The container/leaf split is carried by the [`NodeKind`] enum itself: only
//! the `Container` variant has a child list, so a node with both children and
//! drawable content cannot be expressed. Trees are normally assembled with
//! [`builder::LayoutBuilder`]; the fluent constructors on [`Node`] produce the
//! individual nodes.

pub mod builder;

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::grid::{GridRect, SurfaceRect};
use crate::style::Style;
use crate::surface::Surface;

/// A node in the layout tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is.
    pub kind: NodeKind,
    /// How this node is sized along its parent's main axis.
    pub sizing: Sizing,
    /// Optional name for lookup after layout.
    pub name: Option<String>,
    /// Named style to look up in the theme.
    pub style_key: Option<String>,
    /// Inline overrides; always win over the named style.
    pub style: Style,
    /// Absolute grid rectangle, filled in by bounds computation.
    pub(crate) bounds: Option<GridRect>,
}

/// The different kinds of nodes in the layout tree.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Stacks children along `direction`, `gap` boxes apart.
    Container {
        direction: Direction,
        gap: f64,
        children: Vec<Node>,
    },
    Text {
        content: String,
        align: TextAlign,
        wrap: TextWrap,
    },
    /// A dot at every box intersection.
    DotGrid,
    /// Square line grid every `spacing` boxes.
    LineGrid { spacing: f64, line: LineStyle },
    /// Horizontal writing lines.
    RuledLines { count: RuledCount, line: LineStyle },
    Divider {
        orientation: Orientation,
        /// Overrides the style's line width when set.
        thickness: Option<f64>,
        line: LineStyle,
    },
    /// Convenience bundle: background, writing lines and a small label.
    /// Drawn as one unit, never laid out as separate children.
    Field {
        background: bool,
        lines: Option<RuledCount>,
        label: Option<String>,
    },
    /// Takes up space, draws nothing.
    Spacer,
    NavLink {
        destination: String,
        label: Option<String>,
    },
    /// A navigation tab that cycles through its destinations.
    Tab {
        destinations: Vec<String>,
        label: String,
        /// Label rotation in degrees, counter-clockwise.
        rotation: f64,
    },
    Custom(CustomDraw),
}

/// Main axis of a container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Children left to right.
    Row,
    /// Children top to bottom.
    #[default]
    Column,
}

/// How a child claims space along its parent's main axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Sizing {
    /// An exact extent in boxes.
    Fixed(f64),
    /// A share of whatever the fixed siblings and gaps leave over.
    Flex(f64),
}

impl Default for Sizing {
    fn default() -> Self {
        Sizing::Flex(1.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// What the surface should do with text that does not fit its rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextWrap {
    /// Single line, overflow is clipped by whoever looks at it.
    #[default]
    Clip,
    /// Break into lines inside the rectangle.
    Wrap,
    /// Single line, font size reduced until it fits.
    ShrinkToFit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// How many ruled lines to draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum RuledCount {
    /// One line per box row.
    #[default]
    Auto,
    /// Exactly this many, evenly spaced.
    Count(u32),
}

/// Draw callback for [`NodeKind::Custom`]: receives the surface and the
/// node's bounds already converted to surface units.
#[derive(Clone)]
pub struct CustomDraw(Rc<dyn Fn(&mut dyn Surface, SurfaceRect)>);

impl CustomDraw {
    pub fn new(draw: impl Fn(&mut dyn Surface, SurfaceRect) + 'static) -> Self {
        Self(Rc::new(draw))
    }

    pub fn call(&self, surface: &mut dyn Surface, rect: SurfaceRect) {
        (self.0)(surface, rect)
    }
}

impl fmt::Debug for CustomDraw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomDraw(..)")
    }
}

impl Node {
    fn leaf(kind: NodeKind) -> Self {
        Self {
            kind,
            sizing: Sizing::default(),
            name: None,
            style_key: None,
            style: Style::default(),
            bounds: None,
        }
    }

    /// An empty container stacking along `direction`.
    pub fn container(direction: Direction) -> Self {
        Self::leaf(NodeKind::Container {
            direction,
            gap: 0.0,
            children: vec![],
        })
    }

    pub fn row() -> Self {
        Self::container(Direction::Row)
    }

    pub fn column() -> Self {
        Self::container(Direction::Column)
    }

    pub fn text(content: &str) -> Self {
        Self::leaf(NodeKind::Text {
            content: content.to_string(),
            align: TextAlign::default(),
            wrap: TextWrap::default(),
        })
    }

    pub fn dot_grid() -> Self {
        Self::leaf(NodeKind::DotGrid)
    }

    pub fn line_grid(spacing: f64) -> Self {
        Self::leaf(NodeKind::LineGrid {
            spacing,
            line: LineStyle::Solid,
        })
    }

    pub fn ruled_lines(count: RuledCount) -> Self {
        Self::leaf(NodeKind::RuledLines {
            count,
            line: LineStyle::Solid,
        })
    }

    pub fn divider(orientation: Orientation) -> Self {
        Self::leaf(NodeKind::Divider {
            orientation,
            thickness: None,
            line: LineStyle::Solid,
        })
    }

    pub fn field(label: Option<&str>, lines: Option<RuledCount>) -> Self {
        Self::leaf(NodeKind::Field {
            background: true,
            lines,
            label: label.map(str::to_string),
        })
    }

    pub fn spacer() -> Self {
        Self::leaf(NodeKind::Spacer)
    }

    pub fn nav_link(destination: &str, label: Option<&str>) -> Self {
        Self::leaf(NodeKind::NavLink {
            destination: destination.to_string(),
            label: label.map(str::to_string),
        })
    }

    pub fn tab<I, S>(destinations: I, label: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::leaf(NodeKind::Tab {
            destinations: destinations.into_iter().map(Into::into).collect(),
            label: label.to_string(),
            rotation: 0.0,
        })
    }

    pub fn custom(draw: impl Fn(&mut dyn Surface, SurfaceRect) + 'static) -> Self {
        Self::leaf(NodeKind::Custom(CustomDraw::new(draw)))
    }

    // ── Fluent modifiers ───────────────────────────────────────

    pub fn fixed(mut self, extent: f64) -> Self {
        self.sizing = Sizing::Fixed(extent);
        self
    }

    pub fn flex(mut self, weight: f64) -> Self {
        self.sizing = Sizing::Flex(weight);
        self
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn style_key(mut self, key: &str) -> Self {
        self.style_key = Some(key.to_string());
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the inter-child gap. Has no effect on leaves.
    pub fn gap(mut self, boxes: f64) -> Self {
        if let NodeKind::Container { ref mut gap, .. } = self.kind {
            *gap = boxes;
        }
        self
    }

    /// Set text alignment. Has no effect on non-text nodes.
    pub fn align(mut self, to: TextAlign) -> Self {
        if let NodeKind::Text { ref mut align, .. } = self.kind {
            *align = to;
        }
        self
    }

    /// Set the wrap policy. Has no effect on non-text nodes.
    pub fn wrap(mut self, policy: TextWrap) -> Self {
        if let NodeKind::Text { ref mut wrap, .. } = self.kind {
            *wrap = policy;
        }
        self
    }

    /// Set the line style of grid, ruled and divider nodes.
    pub fn line_style(mut self, style: LineStyle) -> Self {
        match self.kind {
            NodeKind::LineGrid { ref mut line, .. }
            | NodeKind::RuledLines { ref mut line, .. }
            | NodeKind::Divider { ref mut line, .. } => *line = style,
            _ => {}
        }
        self
    }

    /// Set a tab's label rotation in degrees.
    pub fn rotated(mut self, degrees: f64) -> Self {
        if let NodeKind::Tab { ref mut rotation, .. } = self.kind {
            *rotation = degrees;
        }
        self
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container { .. })
    }

    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Container { children, .. } => children,
            _ => &[],
        }
    }

    /// Computed bounds; `None` until the tree has been computed.
    pub fn bounds(&self) -> Option<GridRect> {
        self.bounds
    }

    /// Segment used for this node in error paths: its name, else its kind.
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| node_kind_name(&self.kind).to_string())
    }
}

/// Return a human-readable name for a NodeKind variant.
pub fn node_kind_name(kind: &NodeKind) -> &'static str {
    match kind {
        NodeKind::Container {
            direction: Direction::Row,
            ..
        } => "Row",
        NodeKind::Container {
            direction: Direction::Column,
            ..
        } => "Column",
        NodeKind::Text { .. } => "Text",
        NodeKind::DotGrid => "DotGrid",
        NodeKind::LineGrid { .. } => "LineGrid",
        NodeKind::RuledLines { .. } => "RuledLines",
        NodeKind::Divider { .. } => "Divider",
        NodeKind::Field { .. } => "Field",
        NodeKind::Spacer => "Spacer",
        NodeKind::NavLink { .. } => "NavLink",
        NodeKind::Tab { .. } => "Tab",
        NodeKind::Custom(_) => "Custom",
    }
}
