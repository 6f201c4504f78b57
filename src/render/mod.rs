//! # Renderer
//!
//! Walks a computed [`LayoutTree`] and paints it onto a [`Surface`].
//!
//! Traversal is pre-order: a node is painted before its children, children
//! in declaration order, so the tree order *is* the paint order. For every
//! leaf the renderer converts its grid bounds to surface units, resolves its
//! style, and hands both to the drawing routine for its variant. Containers
//! and spacers draw nothing but are still walked.
//!
//! Tabs are the one variant whose style depends on state: the tab cycle is
//! resolved first, and the active/inactive result picks the style.

mod draw;

use crate::error::LayoutError;
use crate::grid::Grid;
use crate::layout::LayoutTree;
use crate::model::{node_kind_name, Node, NodeKind};
use crate::nav::resolve_tab;
use crate::style::{resolve, ThemeRegistry};
use crate::surface::Surface;

/// Which page is being painted, for tab resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageContext<'a> {
    /// Identifier of the page being rendered.
    pub current_page: Option<&'a str>,
    /// Stand-in for `current_page` when rendering off a real page.
    pub forced_highlight: Option<&'a str>,
}

impl<'a> PageContext<'a> {
    pub fn page(id: &'a str) -> Self {
        Self {
            current_page: Some(id),
            forced_highlight: None,
        }
    }
}

pub struct Renderer<'a> {
    grid: Grid,
    theme: &'a dyn ThemeRegistry,
    context: PageContext<'a>,
}

impl<'a> Renderer<'a> {
    pub fn new(grid: Grid, theme: &'a dyn ThemeRegistry) -> Self {
        Self {
            grid,
            theme,
            context: PageContext::default(),
        }
    }

    pub fn with_context(mut self, context: PageContext<'a>) -> Self {
        self.context = context;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Paint `tree` onto `surface`. The tree must have been computed.
    pub fn render(&self, tree: &LayoutTree, surface: &mut dyn Surface) -> Result<(), LayoutError> {
        tree.root_bounds()?;
        let mut drawn = 0usize;
        self.render_node(tree.root(), &tree.root().label(), surface, &mut drawn)?;
        tracing::debug!(
            page = self.context.current_page.unwrap_or("-"),
            leaves = drawn,
            "rendered layout tree"
        );
        Ok(())
    }

    fn render_node(
        &self,
        node: &Node,
        path: &str,
        surface: &mut dyn Surface,
        drawn: &mut usize,
    ) -> Result<(), LayoutError> {
        let bounds = node.bounds().ok_or_else(|| LayoutError::NotComputed {
            path: path.to_string(),
        })?;
        let rect = self.grid.to_surface(&bounds);

        match &node.kind {
            NodeKind::Container { children, .. } => {
                for (i, child) in children.iter().enumerate() {
                    let child_path = match &child.name {
                        Some(name) => format!("{path}/{name}"),
                        None => format!("{path}/{}[{i}]", child.label()),
                    };
                    self.render_node(child, &child_path, surface, drawn)?;
                }
                return Ok(());
            }
            NodeKind::Spacer => return Ok(()),
            _ if bounds.width <= 0.0 || bounds.height <= 0.0 => {
                tracing::trace!(path, "skipped zero-extent node");
                return Ok(());
            }
            NodeKind::Tab {
                destinations,
                label,
                rotation,
            } => {
                if let Some(tab) = resolve_tab(
                    destinations.as_slice(),
                    self.context.current_page,
                    self.context.forced_highlight,
                ) {
                    let style = resolve(node, self.theme, tab.active);
                    draw::tab(surface, rect, &style, label, *rotation, tab.target);
                }
            }
            kind => {
                let style = resolve(node, self.theme, false);
                let cx = draw::DrawContext {
                    grid: &self.grid,
                    bounds,
                    rect,
                    style: &style,
                };
                draw::leaf(surface, &cx, kind);
            }
        }

        *drawn += 1;
        tracing::trace!(path, kind = node_kind_name(&node.kind), "drew node");
        Ok(())
    }
}
