//! Depth-first tree rendering with box-drawing connectors.
//!
//! ```text
//! D: Ship release - Open
//! ├── B: Fix login - In Progress (bob)
//! │   └── A: Upgrade auth library - Open
//! └── C: Write docs - Open
//! ```
//!
//! The walk has no cycle guard: callers must hand it a DAG (see
//! `dag_projector`). A cyclic input never terminates.

use std::iter::Peekable;
use std::vec::IntoIter;

pub const FORK: char = '\u{251c}';
pub const LAST: char = '\u{2514}';
pub const VERTICAL: char = '\u{2502}';
pub const HORIZONTAL: char = '\u{2500}';

struct Level<N> {
    prefix: String,
    children: Peekable<IntoIter<N>>,
}

/// Lazy sequence of rendered tree lines
///
/// Yields the root line, then one line per descendant in pre-order, then a
/// final empty line. Single pass: the iterator cannot be restarted.
pub struct TreeLines<N, F, C> {
    format_node: F,
    get_children: C,
    root: Option<N>,
    stack: Vec<Level<N>>,
    finished: bool,
}

impl<N, F, C> TreeLines<N, F, C>
where
    F: FnMut(&N) -> String,
    C: FnMut(&N) -> Vec<N>,
{
    pub fn new(root: N, format_node: F, get_children: C) -> Self {
        Self {
            format_node,
            get_children,
            root: Some(root),
            stack: Vec::new(),
            finished: false,
        }
    }

    fn descend(&mut self, node: &N, prefix: String) {
        let children = (self.get_children)(node);
        self.stack.push(Level {
            prefix,
            children: children.into_iter().peekable(),
        });
    }
}

impl<N, F, C> Iterator for TreeLines<N, F, C>
where
    F: FnMut(&N) -> String,
    C: FnMut(&N) -> Vec<N>,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if let Some(root) = self.root.take() {
            let line = (self.format_node)(&root);
            self.descend(&root, String::new());
            return Some(line);
        }

        while let Some(level) = self.stack.last_mut() {
            let Some(child) = level.children.next() else {
                self.stack.pop();
                continue;
            };

            let is_last = level.children.peek().is_none();
            let (connector, continuation) = if is_last {
                (LAST, ' ')
            } else {
                (FORK, VERTICAL)
            };

            let line = format!(
                "{}{}{}{} {}",
                level.prefix,
                connector,
                HORIZONTAL,
                HORIZONTAL,
                (self.format_node)(&child)
            );
            let child_prefix = format!("{}{}   ", level.prefix, continuation);
            self.descend(&child, child_prefix);
            return Some(line);
        }

        if self.finished {
            None
        } else {
            self.finished = true;
            Some(String::new())
        }
    }
}

/// Renders the tree under `root` as text.
///
/// `format_node` gives each node's label and `get_children` its children in
/// display order. The result ends with a newline after the last tree line.
pub fn format_tree<N, F, C>(root: N, format_node: F, get_children: C) -> String
where
    F: FnMut(&N) -> String,
    C: FnMut(&N) -> Vec<N>,
{
    TreeLines::new(root, format_node, get_children)
        .collect::<Vec<_>>()
        .join("\n")
}

/// One node of a depth-first walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<N> {
    pub node: N,
    pub depth: usize,
    pub children: Vec<N>,
}

/// Pre-order walk yielding `(node, depth, children)` for every visit
pub struct DfsTree<N, C> {
    stack: Vec<(N, usize)>,
    get_children: C,
}

impl<N, C> Iterator for DfsTree<N, C>
where
    N: Clone,
    C: FnMut(&N) -> Vec<N>,
{
    type Item = TreeNode<N>;

    fn next(&mut self) -> Option<TreeNode<N>> {
        let (node, depth) = self.stack.pop()?;
        let children = (self.get_children)(&node);
        for child in children.iter().rev() {
            self.stack.push((child.clone(), depth + 1));
        }
        Some(TreeNode {
            node,
            depth,
            children,
        })
    }
}

pub fn dfs_tree<N, C>(root: N, get_children: C) -> DfsTree<N, C>
where
    N: Clone,
    C: FnMut(&N) -> Vec<N>,
{
    DfsTree {
        stack: vec![(root, 0)],
        get_children,
    }
}
