//! Stack-based construction of layout trees.
//!
//! `open` pushes a container, `add` attaches a node to whichever container is
//! on top, `close` pops and attaches the finished container to its parent.
//! [`LayoutBuilder::container`] wraps an open/close pair around a closure and
//! pops on every exit path, including an early `?` inside the closure, so
//! page code never has to balance the stack by hand.

use crate::error::LayoutError;
use crate::layout::LayoutTree;
use crate::model::{Node, NodeKind, RuledCount, Sizing};

/// Finest line-grid spacing accepted, in boxes.
pub const MIN_LINE_SPACING: f64 = 0.05;

/// Most ruled lines a single node may ask for.
pub const MAX_RULED_LINES: u32 = 1000;

struct Frame {
    node: Node,
    path: String,
}

pub struct LayoutBuilder {
    stack: Vec<Frame>,
    /// Lowest stack depth `close` may pop to, one entry per active scope.
    floors: Vec<usize>,
}

impl LayoutBuilder {
    /// Start a tree whose root is `root`, which must be a container.
    pub fn new(root: Node) -> Result<Self, LayoutError> {
        let path = root.label();
        validate(&root, &path)?;
        if !root.is_container() {
            return Err(LayoutError::NotAContainer { path });
        }
        Ok(Self {
            stack: vec![Frame { node: root, path }],
            floors: Vec::new(),
        })
    }

    /// Number of open containers, the root included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Path of the container new nodes are currently added to.
    pub fn current_path(&self) -> &str {
        self.stack.last().map(|f| f.path.as_str()).unwrap_or("")
    }

    /// Push a container; subsequent nodes go into it until `close`.
    pub fn open(&mut self, node: Node) -> Result<&mut Self, LayoutError> {
        let path = self.child_path(&node);
        validate(&node, &path)?;
        if !node.is_container() {
            return Err(LayoutError::NotAContainer { path });
        }
        self.stack.push(Frame { node, path });
        Ok(self)
    }

    /// Pop the innermost open container and attach it to its parent.
    pub fn close(&mut self) -> Result<&mut Self, LayoutError> {
        let floor = self.floors.last().copied().unwrap_or(1);
        if self.stack.len() <= floor {
            return Err(LayoutError::UnbalancedClose);
        }
        self.pop_frame();
        Ok(self)
    }

    /// Attach a node to the innermost open container. Pre-built containers
    /// are accepted and validated as a whole.
    pub fn add(&mut self, node: Node) -> Result<&mut Self, LayoutError> {
        let path = self.child_path(&node);
        validate(&node, &path)?;
        self.attach(node);
        Ok(self)
    }

    /// Open `node`, run `build` inside it, and close it again whatever
    /// `build` returns. Containers `build` leaves open are closed too.
    pub fn container<F>(&mut self, node: Node, build: F) -> Result<&mut Self, LayoutError>
    where
        F: FnOnce(&mut Self) -> Result<(), LayoutError>,
    {
        self.open(node)?;
        let own_depth = self.stack.len();
        self.floors.push(own_depth);

        let result = build(self);

        self.floors.pop();
        while self.stack.len() >= own_depth {
            self.pop_frame();
        }
        result.map(|()| self)
    }

    /// Hand over the finished tree. Fails if a container is still open.
    pub fn finish(mut self) -> Result<LayoutTree, LayoutError> {
        if self.stack.len() > 1 {
            let path = self.current_path().to_string();
            return Err(LayoutError::UnclosedContainer { path });
        }
        match self.stack.pop() {
            Some(root) => Ok(LayoutTree::new(root.node)),
            None => Err(LayoutError::UnbalancedClose),
        }
    }

    fn child_path(&self, node: &Node) -> String {
        let parent = match self.stack.last() {
            Some(frame) => frame,
            None => return node.label(),
        };
        match &node.name {
            Some(name) => format!("{}/{}", parent.path, name),
            None => format!(
                "{}/{}[{}]",
                parent.path,
                node.label(),
                parent.node.children().len()
            ),
        }
    }

    fn pop_frame(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        if let Some(frame) = self.stack.pop() {
            self.attach(frame.node);
        }
    }

    fn attach(&mut self, node: Node) {
        if let Some(Frame {
            node:
                Node {
                    kind: NodeKind::Container { children, .. },
                    ..
                },
            ..
        }) = self.stack.last_mut()
        {
            children.push(node);
        }
    }
}

/// Check sizing and payload of a node and, for containers, its subtree.
pub(crate) fn validate(node: &Node, path: &str) -> Result<(), LayoutError> {
    let (label, value) = match node.sizing {
        Sizing::Fixed(v) => ("Fixed", v),
        Sizing::Flex(v) => ("Flex", v),
    };
    if !value.is_finite() || value < 0.0 {
        return Err(LayoutError::InvalidSizing {
            path: path.to_string(),
            detail: format!("{label}({value})"),
        });
    }

    match &node.kind {
        NodeKind::Tab { destinations, .. } if destinations.is_empty() => {
            Err(LayoutError::EmptyTab {
                path: path.to_string(),
            })
        }
        NodeKind::LineGrid { spacing, .. } if !(*spacing >= MIN_LINE_SPACING && spacing.is_finite()) => {
            Err(LayoutError::InvalidSizing {
                path: path.to_string(),
                detail: format!("spacing {spacing}"),
            })
        }
        NodeKind::RuledLines {
            count: RuledCount::Count(n),
            ..
        }
        | NodeKind::Field {
            lines: Some(RuledCount::Count(n)),
            ..
        } if *n > MAX_RULED_LINES => Err(LayoutError::InvalidSizing {
            path: path.to_string(),
            detail: format!("{n} ruled lines"),
        }),
        NodeKind::Container { gap, children, .. } => {
            if !gap.is_finite() || *gap < 0.0 {
                return Err(LayoutError::InvalidSizing {
                    path: path.to_string(),
                    detail: format!("gap {gap}"),
                });
            }
            for (i, child) in children.iter().enumerate() {
                let child_path = match &child.name {
                    Some(name) => format!("{path}/{name}"),
                    None => format!("{path}/{}[{i}]", child.label()),
                };
                validate(child, &child_path)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_add_close() {
        let mut b = LayoutBuilder::new(Node::column().named("root")).unwrap();
        b.open(Node::row().named("header").fixed(2.0)).unwrap();
        b.add(Node::text("Week 12")).unwrap();
        b.add(Node::spacer()).unwrap();
        b.close().unwrap();
        b.add(Node::dot_grid()).unwrap();
        let tree = b.finish().unwrap();

        let root = tree.root();
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0].children().len(), 2);
    }

    #[test]
    fn test_scoped_container_pops_on_error() {
        let mut b = LayoutBuilder::new(Node::column()).unwrap();
        let err = b
            .container(Node::row().named("days"), |b| {
                b.add(Node::text("Mon"))?;
                b.add(Node::text("Tue").fixed(-1.0))?;
                b.add(Node::text("never"))?;
                Ok(())
            })
            .err()
            .unwrap();
        assert!(matches!(err, LayoutError::InvalidSizing { .. }));
        assert_eq!(b.depth(), 1);

        let tree = b.finish().unwrap();
        assert_eq!(tree.root().children()[0].children().len(), 1);
    }

    #[test]
    fn test_scoped_container_closes_leftover_frames() {
        let mut b = LayoutBuilder::new(Node::column()).unwrap();
        b.container(Node::row(), |b| {
            b.open(Node::column())?;
            b.add(Node::spacer())?;
            Ok(())
        })
        .unwrap();
        assert_eq!(b.depth(), 1);
        let tree = b.finish().unwrap();
        assert_eq!(tree.root().children()[0].children()[0].children().len(), 1);
    }

    #[test]
    fn test_scope_cannot_close_its_own_container() {
        let mut b = LayoutBuilder::new(Node::column()).unwrap();
        let err = b.container(Node::row(), |b| {
            b.close()?;
            Ok(())
        });
        assert!(matches!(err, Err(LayoutError::UnbalancedClose)));
        assert_eq!(b.depth(), 1);
    }

    #[test]
    fn test_close_root_is_unbalanced() {
        let mut b = LayoutBuilder::new(Node::column()).unwrap();
        assert!(matches!(b.close(), Err(LayoutError::UnbalancedClose)));
    }

    #[test]
    fn test_finish_with_open_container() {
        let mut b = LayoutBuilder::new(Node::column().named("root")).unwrap();
        b.open(Node::row().named("week")).unwrap();
        let err = b.finish().err().unwrap();
        assert_eq!(
            err,
            LayoutError::UnclosedContainer {
                path: "root/week".to_string()
            }
        );
    }

    #[test]
    fn test_open_leaf_rejected_with_path() {
        let mut b = LayoutBuilder::new(Node::column().named("root")).unwrap();
        b.add(Node::spacer()).unwrap();
        let err = b.open(Node::text("x")).err().unwrap();
        assert_eq!(
            err,
            LayoutError::NotAContainer {
                path: "root/Text[1]".to_string()
            }
        );
    }

    #[test]
    fn test_leaf_root_rejected() {
        assert!(matches!(
            LayoutBuilder::new(Node::dot_grid()),
            Err(LayoutError::NotAContainer { .. })
        ));
    }

    #[test]
    fn test_empty_tab_rejected() {
        let mut b = LayoutBuilder::new(Node::column()).unwrap();
        let err = b.add(Node::tab(Vec::<String>::new(), "Q1")).err().unwrap();
        assert!(matches!(err, LayoutError::EmptyTab { .. }));
    }

    #[test]
    fn test_prebuilt_subtree_validated() {
        let mut sub = Node::row().named("sub");
        if let NodeKind::Container { children, .. } = &mut sub.kind {
            children.push(Node::spacer().flex(f64::NAN).named("bad"));
        }
        let mut b = LayoutBuilder::new(Node::column().named("root")).unwrap();
        let err = b.add(sub).err().unwrap();
        match err {
            LayoutError::InvalidSizing { path, .. } => assert_eq!(path, "root/sub/bad"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_line_grid_spacing_too_fine_rejected() {
        let mut b = LayoutBuilder::new(Node::column().named("root")).unwrap();
        for spacing in [1e-4, 0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = b.add(Node::line_grid(spacing).named("grid")).err().unwrap();
            match err {
                LayoutError::InvalidSizing { path, detail } => {
                    assert_eq!(path, "root/grid");
                    assert!(detail.starts_with("spacing"), "{detail}");
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert!(b.add(Node::line_grid(MIN_LINE_SPACING)).is_ok());
        assert!(b.add(Node::line_grid(0.5)).is_ok());
    }

    #[test]
    fn test_ruled_line_count_capped() {
        let mut b = LayoutBuilder::new(Node::column()).unwrap();
        let err = b
            .add(Node::ruled_lines(RuledCount::Count(MAX_RULED_LINES + 1)))
            .err()
            .unwrap();
        assert!(matches!(err, LayoutError::InvalidSizing { .. }));
        let err = b
            .add(Node::field(None, Some(RuledCount::Count(u32::MAX))))
            .err()
            .unwrap();
        assert!(matches!(err, LayoutError::InvalidSizing { .. }));
        assert!(b.add(Node::ruled_lines(RuledCount::Count(MAX_RULED_LINES))).is_ok());
    }

    #[test]
    fn test_flex_zero_is_legal() {
        let mut b = LayoutBuilder::new(Node::column()).unwrap();
        assert!(b.add(Node::spacer().flex(0.0)).is_ok());
    }
}
