use crate::avl_tree::node::Node;
use std::cmp::Ordering;

pub type Tree<T> = Option<Box<Node<T>>>;

pub fn height<T>(tree: &Tree<T>) -> usize {
    match tree {
        None => 0,
        Some(ref node) => node.height,
    }
}

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    child
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    child
}

// Recomputes the height at this level and restores the balance invariant
// with at most one single or double rotation. The double rotation cases are
// selected by the child's balance factor, which covers both the insert and
// delete unwind paths.
fn rebalance<T>(tree: &mut Tree<T>) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update();

    if node.balance_factor() > 1 {
        if let Some(child) = node.left.take() {
            if child.balance_factor() < 0 {
                node.left = Some(rotate_left(child));
            } else {
                node.left = Some(child);
            }
        }
        node = rotate_right(node);
    } else if node.balance_factor() < -1 {
        if let Some(child) = node.right.take() {
            if child.balance_factor() > 0 {
                node.right = Some(rotate_right(child));
            } else {
                node.right = Some(child);
            }
        }
        node = rotate_left(node);
    }

    *tree = Some(node);
}

// precondition: there exists a minimum node in the tree
fn detach_min<T>(tree: &mut Tree<T>) -> Box<Node<T>> {
    let mut node = match tree.take() {
        Some(node) => node,
        None => unreachable!(),
    };

    if node.left.is_some() {
        let min = detach_min(&mut node.left);
        *tree = Some(node);
        rebalance(tree);
        min
    } else {
        *tree = node.right.take();
        node
    }
}

// Splices the in-order successor of a removed node over its position. The
// successor is detached from the right subtree with every level on that
// spine rebalanced on unwind; the splice point itself is rebalanced by the
// caller.
fn combine_subtrees<T>(left_tree: Tree<T>, mut right_tree: Tree<T>) -> Tree<T> {
    let mut successor = detach_min(&mut right_tree);
    successor.left = left_tree;
    successor.right = right_tree;
    Some(successor)
}

pub fn insert<T>(tree: &mut Tree<T>, key: T) -> bool
where
    T: Ord,
{
    let inserted = match tree {
        Some(ref mut node) => {
            match key.cmp(&node.key) {
                Ordering::Less => insert(&mut node.left, key),
                Ordering::Greater => insert(&mut node.right, key),
                Ordering::Equal => return false,
            }
        },
        None => {
            *tree = Some(Box::new(Node::new(key)));
            return true;
        },
    };

    rebalance(tree);
    inserted
}

pub fn remove<T>(tree: &mut Tree<T>, key: &T) -> bool
where
    T: Ord,
{
    let removed = match tree.take() {
        Some(mut node) => match key.cmp(&node.key) {
            Ordering::Less => {
                let removed = remove(&mut node.left, key);
                *tree = Some(node);
                removed
            },
            Ordering::Greater => {
                let removed = remove(&mut node.right, key);
                *tree = Some(node);
                removed
            },
            Ordering::Equal => {
                let unboxed_node = *node;
                let Node { left, right, .. } = unboxed_node;
                match (left, right) {
                    (None, right) => *tree = right,
                    (left, None) => *tree = left,
                    (left, right) => *tree = combine_subtrees(left, right),
                }
                true
            },
        },
        None => return false,
    };

    rebalance(tree);
    removed
}

pub fn contains<T>(tree: &Tree<T>, key: &T) -> bool
where
    T: Ord,
{
    match tree {
        Some(ref node) => {
            match key.cmp(&node.key) {
                Ordering::Less => contains(&node.left, key),
                Ordering::Greater => contains(&node.right, key),
                Ordering::Equal => true,
            }
        },
        None => false,
    }
}
