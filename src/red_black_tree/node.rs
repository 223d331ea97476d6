use crate::arena::Handle;
use serde_derive::{Deserialize, Serialize};

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Color {
    Red,
    Black,
}

/// A struct representing an internal node of a red black tree.
///
/// Links are arena handles; `parent` is a non-owning back-reference used
/// only to walk upward during fixup.
pub struct Node<T> {
    pub key: T,
    pub color: Color,
    pub parent: Option<Handle>,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
}

impl<T> Node<T> {
    pub fn new(key: T) -> Self {
        Node {
            key,
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        }
    }
}
