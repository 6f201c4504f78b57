//! # Bounds Computation
//!
//! Turns a declared tree into positioned boxes. Layout happens once per page,
//! against the page's content rectangle, before anything is drawn:
//!
//! 1. The root receives the content rectangle.
//! 2. Each container splits its main axis among its children
//!    ([`flex::distribute`]): fixed extents first, gaps next, flex weights
//!    share the rest.
//! 3. Every child stretches across the full cross axis.
//! 4. Children are placed one after another from the container's origin, in
//!    declaration order, and containers recurse.
//!
//! There is no measuring of content: a node's size comes only from its
//! sizing rule and its parent. Degenerate geometry (overfull containers,
//! zero-size rectangles) is clamped and laid out anyway.

pub mod flex;

use crate::error::LayoutError;
use crate::grid::GridRect;
use crate::model::{Direction, Node, NodeKind};

/// A finished layout tree, ready to be computed and rendered.
#[derive(Debug, Clone)]
pub struct LayoutTree {
    root: Node,
}

impl LayoutTree {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Assign an absolute grid rectangle to every node, starting from `rect`
    /// for the root. Recomputing with the same rectangle gives the same
    /// result.
    pub fn compute(&mut self, rect: GridRect) {
        let mut count = 0usize;
        place(&mut self.root, rect, &mut count);
        tracing::debug!(
            nodes = count,
            col = rect.col,
            row = rect.row,
            width = rect.width,
            height = rect.height,
            "computed layout bounds"
        );
    }

    /// First node named `name`, depth-first in declaration order.
    pub fn find(&self, name: &str) -> Option<&Node> {
        find_in(&self.root, name)
    }

    /// Computed bounds of the node named `name`.
    pub fn bounds_of(&self, name: &str) -> Option<GridRect> {
        self.find(name).and_then(Node::bounds)
    }

    /// Visit every node in paint order: parent first, then children in
    /// declaration order. `depth` is 0 for the root.
    pub fn walk<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a Node, usize),
    {
        walk_node(&self.root, 0, &mut visit);
    }

    /// Bounds of the root, or an error if `compute` has not run yet.
    pub fn root_bounds(&self) -> Result<GridRect, LayoutError> {
        self.root.bounds.ok_or_else(|| LayoutError::NotComputed {
            path: self.root.label(),
        })
    }
}

fn place(node: &mut Node, rect: GridRect, count: &mut usize) {
    node.bounds = Some(rect);
    *count += 1;

    let (direction, gap, children) = match &mut node.kind {
        NodeKind::Container {
            direction,
            gap,
            children,
        } => (*direction, *gap, children),
        _ => return,
    };

    let sizings: Vec<_> = children.iter().map(|c| c.sizing).collect();
    let main_extent = match direction {
        Direction::Row => rect.width,
        Direction::Column => rect.height,
    };
    let extents = flex::distribute(&sizings, main_extent, gap);

    let mut cursor = 0.0;
    for (child, extent) in children.iter_mut().zip(extents) {
        let child_rect = match direction {
            Direction::Row => GridRect::new(rect.col + cursor, rect.row, extent, rect.height),
            Direction::Column => GridRect::new(rect.col, rect.row + cursor, rect.width, extent),
        };
        place(child, child_rect, count);
        cursor += extent + gap;
    }
}

fn find_in<'a>(node: &'a Node, name: &str) -> Option<&'a Node> {
    if node.name.as_deref() == Some(name) {
        return Some(node);
    }
    node.children().iter().find_map(|c| find_in(c, name))
}

fn walk_node<'a, F>(node: &'a Node, depth: usize, visit: &mut F)
where
    F: FnMut(&'a Node, usize),
{
    visit(node, depth);
    for child in node.children() {
        walk_node(child, depth + 1, visit);
    }
}
