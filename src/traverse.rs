//! Read-only traversal model shared by the tree engines and their renderers.

use serde_derive::{Deserialize, Serialize};

/// A read-only view of a node in a binary search tree.
///
/// Both tree engines hand out cheap `Copy` views implementing this trait, so
/// traversal order is defined once here and consumed identically everywhere.
pub trait NodeRef: Copy {
    type Key;

    fn key(&self) -> &Self::Key;

    fn left(&self) -> Option<Self>;

    fn right(&self) -> Option<Self>;
}

/// Returns an iterator visiting the subtree under `root` in-order. For any
/// valid binary search tree this yields nodes in ascending key order.
pub fn in_order<R>(root: Option<R>) -> InOrder<R>
where
    R: NodeRef,
{
    InOrder {
        current: root,
        stack: Vec::new(),
    }
}

/// Returns an iterator visiting the subtree under `root` in pre-order,
/// yielding each node together with its depth. The root has depth 0.
pub fn pre_order<R>(root: Option<R>) -> PreOrder<R>
where
    R: NodeRef,
{
    PreOrder {
        stack: root.map(|node| (node, 0)).into_iter().collect(),
    }
}

/// An in-order iterator over node views.
///
/// The iterator descends along left children, visiting each node between its
/// left and right subtrees.
pub struct InOrder<R> {
    current: Option<R>,
    stack: Vec<R>,
}

impl<R> Iterator for InOrder<R>
where
    R: NodeRef,
{
    type Item = R;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = node.left();
        }
        self.stack.pop().map(|node| {
            self.current = node.right();
            node
        })
    }
}

/// A pre-order iterator over node views, yielding `(node, depth)` pairs.
pub struct PreOrder<R> {
    stack: Vec<(R, usize)>,
}

impl<R> Iterator for PreOrder<R>
where
    R: NodeRef,
{
    type Item = (R, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.stack.pop().map(|(node, depth)| {
            if let Some(child) = node.right() {
                self.stack.push((child, depth + 1));
            }
            if let Some(child) = node.left() {
                self.stack.push((child, depth + 1));
            }
            (node, depth)
        })
    }
}

/// A flattened, render-ready description of one node.
///
/// `rank` is the node's in-order position and drives horizontal placement;
/// `depth` is its distance from the root and drives vertical layering. A
/// renderer owns the snapshot outright, so it stays valid while the tree
/// mutates underneath.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Placement<T> {
    pub key: T,
    pub rank: usize,
    pub depth: usize,
}

/// Flattens the subtree under `root` into in-order `Placement`s.
pub fn placements<R, T>(root: Option<R>) -> Vec<Placement<T>>
where
    R: NodeRef<Key = T>,
    T: Clone,
{
    let mut out = Vec::new();
    let mut stack = Vec::new();
    let mut current = root.map(|node| (node, 0));

    loop {
        while let Some((node, depth)) = current {
            stack.push((node, depth));
            current = node.left().map(|child| (child, depth + 1));
        }
        match stack.pop() {
            Some((node, depth)) => {
                out.push(Placement {
                    key: node.key().clone(),
                    rank: out.len(),
                    depth,
                });
                current = node.right().map(|child| (child, depth + 1));
            },
            None => return out,
        }
    }
}
