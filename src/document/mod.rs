//! # Planner Documents
//!
//! The serializable description of a whole planner: grid configuration,
//! theme, and a list of pages, each with its own layout tree. This is the
//! JSON input format of the CLI.
//!
//! A [`NodeSpec`] carries no bounds and no closures. Turning one into a
//! [`LayoutTree`] goes through the [`LayoutBuilder`], so a document is held
//! to exactly the same rules as a tree declared in code.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::grid::{Grid, GridRect};
use crate::layout::LayoutTree;
use crate::model::builder::LayoutBuilder;
use crate::model::{
    Direction, LineStyle, Node, NodeKind, Orientation, RuledCount, Sizing, TextAlign, TextWrap,
};
use crate::pdf::{Metadata, PdfSurface};
use crate::render::{PageContext, Renderer};
use crate::style::{Style, Theme};
use crate::surface::Surface;

/// A complete planner document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub theme: Theme,
    /// Page id treated as current for tab highlighting on every page.
    #[serde(default)]
    pub highlight: Option<String>,
    pub pages: Vec<PageSpec>,
}

/// Page geometry in boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    /// Size of one box in points.
    pub unit: f64,
    pub cols: u32,
    pub rows: u32,
}

impl Default for GridConfig {
    /// 43 × 55 boxes of 5 mm.
    fn default() -> Self {
        Self {
            unit: 14.173228,
            cols: 43,
            rows: 55,
        }
    }
}

impl GridConfig {
    pub fn grid(&self) -> Grid {
        Grid::for_boxes(self.unit, self.cols, self.rows)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpec {
    /// Named destination for this page; tabs and links target it.
    #[serde(default)]
    pub id: Option<String>,
    /// Area the layout fills. Defaults to the whole page.
    #[serde(default)]
    pub content: Option<GridRect>,
    pub layout: NodeSpec,
}

/// A node as written in a document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    #[serde(flatten)]
    pub kind: KindSpec,
    #[serde(default)]
    pub size: Option<Sizing>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub style_key: Option<String>,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

/// Variant payloads, tagged by `"type"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum KindSpec {
    Row {
        #[serde(default)]
        gap: f64,
    },
    Column {
        #[serde(default)]
        gap: f64,
    },
    Text {
        content: String,
        #[serde(default)]
        align: TextAlign,
        #[serde(default)]
        wrap: TextWrap,
    },
    DotGrid,
    LineGrid {
        #[serde(default = "one_box")]
        spacing: f64,
        #[serde(default)]
        line: LineStyle,
    },
    RuledLines {
        #[serde(default)]
        count: RuledCount,
        #[serde(default)]
        line: LineStyle,
    },
    Divider {
        #[serde(default)]
        orientation: Orientation,
        #[serde(default)]
        thickness: Option<f64>,
        #[serde(default)]
        line: LineStyle,
    },
    Field {
        #[serde(default = "yes")]
        background: bool,
        #[serde(default)]
        lines: Option<RuledCount>,
        #[serde(default)]
        label: Option<String>,
    },
    Spacer,
    NavLink {
        destination: String,
        #[serde(default)]
        label: Option<String>,
    },
    Tab {
        destinations: Vec<String>,
        label: String,
        #[serde(default)]
        rotation: f64,
    },
}

fn one_box() -> f64 {
    1.0
}

fn yes() -> bool {
    true
}

impl KindSpec {
    fn to_kind(&self) -> NodeKind {
        match self {
            KindSpec::Row { gap } => NodeKind::Container {
                direction: Direction::Row,
                gap: *gap,
                children: vec![],
            },
            KindSpec::Column { gap } => NodeKind::Container {
                direction: Direction::Column,
                gap: *gap,
                children: vec![],
            },
            KindSpec::Text {
                content,
                align,
                wrap,
            } => NodeKind::Text {
                content: content.clone(),
                align: *align,
                wrap: *wrap,
            },
            KindSpec::DotGrid => NodeKind::DotGrid,
            KindSpec::LineGrid { spacing, line } => NodeKind::LineGrid {
                spacing: *spacing,
                line: *line,
            },
            KindSpec::RuledLines { count, line } => NodeKind::RuledLines {
                count: *count,
                line: *line,
            },
            KindSpec::Divider {
                orientation,
                thickness,
                line,
            } => NodeKind::Divider {
                orientation: *orientation,
                thickness: *thickness,
                line: *line,
            },
            KindSpec::Field {
                background,
                lines,
                label,
            } => NodeKind::Field {
                background: *background,
                lines: *lines,
                label: label.clone(),
            },
            KindSpec::Spacer => NodeKind::Spacer,
            KindSpec::NavLink { destination, label } => NodeKind::NavLink {
                destination: destination.clone(),
                label: label.clone(),
            },
            KindSpec::Tab {
                destinations,
                label,
                rotation,
            } => NodeKind::Tab {
                destinations: destinations.clone(),
                label: label.clone(),
                rotation: *rotation,
            },
        }
    }
}

impl NodeSpec {
    /// The node itself, without children.
    fn to_node(&self) -> Node {
        Node {
            kind: self.kind.to_kind(),
            sizing: self.size.unwrap_or_default(),
            name: self.name.clone(),
            style_key: self.style_key.clone(),
            style: self.style.clone(),
            bounds: None,
        }
    }

    /// Build an uncomputed layout tree. The root must be a `Row` or `Column`.
    pub fn build(&self) -> Result<LayoutTree, LayoutError> {
        let root = self.to_node();
        let path = root.label();
        let mut builder = LayoutBuilder::new(root)?;
        self.add_children(&mut builder, &path)?;
        builder.finish()
    }

    fn add_children(&self, builder: &mut LayoutBuilder, path: &str) -> Result<(), LayoutError> {
        for (i, child) in self.children.iter().enumerate() {
            let node = child.to_node();
            let child_path = match &node.name {
                Some(name) => format!("{path}/{name}"),
                None => format!("{path}/{}[{i}]", node.label()),
            };
            if node.is_container() {
                builder.container(node, |b| child.add_children(b, &child_path))?;
            } else if !child.children.is_empty() {
                return Err(LayoutError::LeafWithChildren {
                    kind: node.label(),
                    path: child_path,
                });
            } else {
                builder.add(node)?;
            }
        }
        Ok(())
    }
}

/// Render every page of `document` onto `surface`, one `begin_page` each.
pub fn render_document(document: &Document, surface: &mut dyn Surface) -> Result<()> {
    let grid = document.grid.grid();
    let highlight = document.highlight.as_deref();

    for (index, page) in document.pages.iter().enumerate() {
        let mut tree = page.layout.build()?;
        tree.compute(page.content.unwrap_or_else(|| grid.page_rect()));

        surface.begin_page(page.id.as_deref());
        let context = PageContext {
            current_page: page.id.as_deref(),
            forced_highlight: highlight,
        };
        Renderer::new(grid, &document.theme)
            .with_context(context)
            .render(&tree, surface)?;
        tracing::debug!(page = index, id = page.id.as_deref().unwrap_or("-"), "page done");
    }
    Ok(())
}

/// Render a document to PDF bytes.
pub fn render_pdf(document: &Document) -> Result<Vec<u8>> {
    let grid = document.grid.grid();
    let mut surface = PdfSurface::new(grid.page_width(), grid.page_height());
    render_document(document, &mut surface)?;
    surface.finish(&document.metadata)
}

/// Parse a JSON planner document and render it to PDF bytes.
pub fn render_json(json: &str) -> Result<Vec<u8>> {
    let document: Document = serde_json::from_str(json)?;
    render_pdf(&document)
}
