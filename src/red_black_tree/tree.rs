use crate::arena::{Arena, Handle};
use crate::red_black_tree::node::{Color, Node};
use std::cmp::Ordering;

/// The algorithmic core of the red black tree.
///
/// Nodes live in a slot arena and link to each other through handles, so the
/// parent back-references never form a second owner. The root handle is
/// absent when the tree is empty.
pub struct Tree<T> {
    pub arena: Arena<Node<T>>,
    pub root: Option<Handle>,
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Tree {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    // Absent children read as black.
    fn is_red(&self, node: Option<Handle>) -> bool {
        match node {
            None => false,
            Some(node) => self.arena[node].color == Color::Red,
        }
    }

    pub fn find(&self, key: &T) -> Option<Handle>
    where
        T: Ord,
    {
        let mut current = self.root;
        while let Some(node) = current {
            current = match key.cmp(&self.arena[node].key) {
                Ordering::Less => self.arena[node].left,
                Ordering::Greater => self.arena[node].right,
                Ordering::Equal => return current,
            };
        }
        None
    }

    fn minimum(&self, mut node: Handle) -> Handle {
        while let Some(left) = self.arena[node].left {
            node = left;
        }
        node
    }

    // Relinks the pivot's displaced subtree, the parent's child slot, and
    // the parent back-references in one transaction; no color is read until
    // the new shape is in place.
    fn rotate_left(&mut self, node: Handle) {
        let pivot = self.arena[node]
            .right
            .expect("Expected a right child to rotate left.");

        let displaced = self.arena[pivot].left;
        self.arena[node].right = displaced;
        if let Some(displaced) = displaced {
            self.arena[displaced].parent = Some(node);
        }

        let parent = self.arena[node].parent;
        self.arena[pivot].parent = parent;
        match parent {
            None => self.root = Some(pivot),
            Some(parent) => {
                if self.arena[parent].left == Some(node) {
                    self.arena[parent].left = Some(pivot);
                } else {
                    self.arena[parent].right = Some(pivot);
                }
            },
        }

        self.arena[pivot].left = Some(node);
        self.arena[node].parent = Some(pivot);
    }

    fn rotate_right(&mut self, node: Handle) {
        let pivot = self.arena[node]
            .left
            .expect("Expected a left child to rotate right.");

        let displaced = self.arena[pivot].right;
        self.arena[node].left = displaced;
        if let Some(displaced) = displaced {
            self.arena[displaced].parent = Some(node);
        }

        let parent = self.arena[node].parent;
        self.arena[pivot].parent = parent;
        match parent {
            None => self.root = Some(pivot),
            Some(parent) => {
                if self.arena[parent].right == Some(node) {
                    self.arena[parent].right = Some(pivot);
                } else {
                    self.arena[parent].left = Some(pivot);
                }
            },
        }

        self.arena[pivot].right = Some(node);
        self.arena[node].parent = Some(pivot);
    }

    pub fn insert(&mut self, key: T) -> bool
    where
        T: Ord,
    {
        let mut parent = None;
        let mut ordering = Ordering::Equal;
        let mut current = self.root;
        while let Some(node) = current {
            parent = Some(node);
            ordering = key.cmp(&self.arena[node].key);
            current = match ordering {
                Ordering::Less => self.arena[node].left,
                Ordering::Greater => self.arena[node].right,
                Ordering::Equal => return false,
            };
        }

        let mut node = Node::new(key);
        node.parent = parent;
        let z = self.arena.insert(node);

        match parent {
            None => self.root = Some(z),
            Some(parent) => {
                if ordering == Ordering::Less {
                    self.arena[parent].left = Some(z);
                } else {
                    self.arena[parent].right = Some(z);
                }
            },
        }

        self.insert_fixup(z);
        true
    }

    // Walks upward from a freshly attached red node. A red uncle means
    // recolor and continue from the grandparent; a black uncle means rotate
    // an inner-side node outward, then recolor and rotate the grandparent,
    // which terminates the loop.
    fn insert_fixup(&mut self, mut z: Handle) {
        loop {
            let parent = match self.arena[z].parent {
                Some(parent) if self.arena[parent].color == Color::Red => parent,
                _ => break,
            };
            let grandparent = match self.arena[parent].parent {
                Some(grandparent) => grandparent,
                None => break,
            };

            if Some(parent) == self.arena[grandparent].left {
                let uncle = self.arena[grandparent].right;
                if self.is_red(uncle) {
                    let uncle = uncle.expect("Expected a red uncle node.");
                    self.arena[parent].color = Color::Black;
                    self.arena[uncle].color = Color::Black;
                    self.arena[grandparent].color = Color::Red;
                    z = grandparent;
                } else {
                    if Some(z) == self.arena[parent].right {
                        z = parent;
                        self.rotate_left(z);
                    }
                    let parent = self.arena[z]
                        .parent
                        .expect("Expected a parent below the grandparent.");
                    let grandparent = self.arena[parent]
                        .parent
                        .expect("Expected a grandparent above a red parent.");
                    self.arena[parent].color = Color::Black;
                    self.arena[grandparent].color = Color::Red;
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.arena[grandparent].left;
                if self.is_red(uncle) {
                    let uncle = uncle.expect("Expected a red uncle node.");
                    self.arena[parent].color = Color::Black;
                    self.arena[uncle].color = Color::Black;
                    self.arena[grandparent].color = Color::Red;
                    z = grandparent;
                } else {
                    if Some(z) == self.arena[parent].left {
                        z = parent;
                        self.rotate_right(z);
                    }
                    let parent = self.arena[z]
                        .parent
                        .expect("Expected a parent below the grandparent.");
                    let grandparent = self.arena[parent]
                        .parent
                        .expect("Expected a grandparent above a red parent.");
                    self.arena[parent].color = Color::Black;
                    self.arena[grandparent].color = Color::Red;
                    self.rotate_left(grandparent);
                }
            }
        }

        if let Some(root) = self.root {
            self.arena[root].color = Color::Black;
        }
    }

    // Rewires the parent's child slot and the replacement's parent pointer.
    // The replacement may be absent, in which case only the slot changes.
    fn transplant(&mut self, node: Handle, replacement: Option<Handle>) {
        let parent = self.arena[node].parent;
        match parent {
            None => self.root = replacement,
            Some(parent) => {
                if self.arena[parent].left == Some(node) {
                    self.arena[parent].left = replacement;
                } else {
                    self.arena[parent].right = replacement;
                }
            },
        }
        if let Some(replacement) = replacement {
            self.arena[replacement].parent = parent;
        }
    }

    pub fn remove(&mut self, key: &T) -> Option<T>
    where
        T: Ord,
    {
        self.find(key).map(|node| self.remove_node(node))
    }

    // Structurally removes `z`, or its in-order successor when both children
    // are present. The fixup starts from the replacement together with an
    // explicit parent hint, since an absent replacement cannot carry its own
    // parent pointer.
    fn remove_node(&mut self, z: Handle) -> T {
        let z_left = self.arena[z].left;
        let z_right = self.arena[z].right;
        let mut removed_color = self.arena[z].color;

        let (x, x_parent) = match (z_left, z_right) {
            (None, replacement) | (replacement, None) => {
                let parent = self.arena[z].parent;
                self.transplant(z, replacement);
                (replacement, parent)
            },
            (Some(left), Some(right)) => {
                let successor = self.minimum(right);
                removed_color = self.arena[successor].color;
                let x = self.arena[successor].right;

                let x_parent = if self.arena[successor].parent == Some(z) {
                    Some(successor)
                } else {
                    let hint = self.arena[successor].parent;
                    let successor_right = self.arena[successor].right;
                    self.transplant(successor, successor_right);
                    self.arena[successor].right = Some(right);
                    self.arena[right].parent = Some(successor);
                    hint
                };

                self.transplant(z, Some(successor));
                self.arena[successor].left = Some(left);
                self.arena[left].parent = Some(successor);
                let color = self.arena[z].color;
                self.arena[successor].color = color;
                (x, x_parent)
            },
        };

        // Free the slot before the fixup so the detached node is already
        // unreachable; every link above has been rewired past it.
        let node = self.arena.remove(z);
        if removed_color == Color::Black {
            self.remove_fixup(x, x_parent);
        }
        node.key
    }

    // The classic black-deficit walk. `x` carries one extra unit of
    // blackness; the loop pushes the deficit upward (recoloring a black
    // sibling red) or resolves it with at most two rotations at the parent.
    // An absent sibling is treated like a sibling with two black children.
    fn remove_fixup(&mut self, mut x: Option<Handle>, parent_hint: Option<Handle>) {
        while x != self.root && !self.is_red(x) {
            let parent = match x {
                Some(node) => self.arena[node].parent,
                None => parent_hint,
            };
            let parent = match parent {
                Some(parent) => parent,
                None => break,
            };

            if x == self.arena[parent].left {
                let mut sibling = self.arena[parent].right;
                if self.is_red(sibling) {
                    let node = sibling.expect("Expected a red sibling node.");
                    self.arena[node].color = Color::Black;
                    self.arena[parent].color = Color::Red;
                    self.rotate_left(parent);
                    sibling = self.arena[parent].right;
                }

                let near = sibling.and_then(|node| self.arena[node].left);
                let far = sibling.and_then(|node| self.arena[node].right);
                if sibling.is_none() || (!self.is_red(near) && !self.is_red(far)) {
                    if let Some(node) = sibling {
                        self.arena[node].color = Color::Red;
                    }
                    x = Some(parent);
                } else {
                    let mut node = sibling.expect("Expected a sibling in the rotation cases.");
                    if !self.is_red(far) {
                        if let Some(near) = near {
                            self.arena[near].color = Color::Black;
                        }
                        self.arena[node].color = Color::Red;
                        self.rotate_right(node);
                        node = self.arena[parent]
                            .right
                            .expect("Expected a sibling after rotation.");
                    }
                    let color = self.arena[parent].color;
                    self.arena[node].color = color;
                    self.arena[parent].color = Color::Black;
                    if let Some(far) = self.arena[node].right {
                        self.arena[far].color = Color::Black;
                    }
                    self.rotate_left(parent);
                    x = self.root;
                }
            } else {
                let mut sibling = self.arena[parent].left;
                if self.is_red(sibling) {
                    let node = sibling.expect("Expected a red sibling node.");
                    self.arena[node].color = Color::Black;
                    self.arena[parent].color = Color::Red;
                    self.rotate_right(parent);
                    sibling = self.arena[parent].left;
                }

                let near = sibling.and_then(|node| self.arena[node].right);
                let far = sibling.and_then(|node| self.arena[node].left);
                if sibling.is_none() || (!self.is_red(near) && !self.is_red(far)) {
                    if let Some(node) = sibling {
                        self.arena[node].color = Color::Red;
                    }
                    x = Some(parent);
                } else {
                    let mut node = sibling.expect("Expected a sibling in the rotation cases.");
                    if !self.is_red(far) {
                        if let Some(near) = near {
                            self.arena[near].color = Color::Black;
                        }
                        self.arena[node].color = Color::Red;
                        self.rotate_left(node);
                        node = self.arena[parent]
                            .left
                            .expect("Expected a sibling after rotation.");
                    }
                    let color = self.arena[parent].color;
                    self.arena[node].color = color;
                    self.arena[parent].color = Color::Black;
                    if let Some(far) = self.arena[node].left {
                        self.arena[far].color = Color::Black;
                    }
                    self.rotate_right(parent);
                    x = self.root;
                }
            }
        }

        if let Some(node) = x {
            self.arena[node].color = Color::Black;
        }
        if let Some(root) = self.root {
            self.arena[root].color = Color::Black;
        }
    }
}
