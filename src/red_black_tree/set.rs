use crate::arena::{Arena, Handle};
use crate::red_black_tree::node::{Color, Node};
use crate::red_black_tree::tree;
use crate::traverse::{self, InOrder, NodeRef, Placement, PreOrder};

/// An ordered set implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that labels every
/// node red or black and maintains three invariants: the root is black, no
/// red node has a red child, and every root-to-leaf path crosses the same
/// number of black nodes. Mutations that would change nothing (inserting a
/// present key, removing an absent key) leave the tree untouched.
///
/// # Examples
///
/// ```
/// use balanced_collections::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(&3));
///
/// assert!(set.remove(&0));
/// assert!(!set.remove(&1));
/// ```
pub struct RedBlackSet<T> {
    tree: tree::Tree<T>,
}

impl<T> RedBlackSet<T> {
    /// Constructs a new, empty `RedBlackSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        RedBlackSet { tree: tree::Tree::new() }
    }

    /// Inserts a key into the set. Returns `true` if the key was absent and
    /// is now present; inserting a key that is already present is a no-op
    /// returning `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert!(set.contains(&1));
    /// ```
    pub fn insert(&mut self, key: T) -> bool
    where
        T: Ord,
    {
        self.tree.insert(key)
    }

    /// Removes a key from the set. Returns `true` if the key was present;
    /// removing an absent key is a no-op returning `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove(&mut self, key: &T) -> bool
    where
        T: Ord,
    {
        self.tree.remove(key).is_some()
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, key: &T) -> bool
    where
        T: Ord,
    {
        self.tree.find(key).is_some()
    }

    /// Returns the number of keys in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    /// Clears the set, removing all keys. The root becomes absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the height of the tree: the number of levels below the root,
    /// inclusive. An empty set has height 0. Unlike the avl tree, the red
    /// black tree caches no heights, so this walks the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.height(), 2);
    /// ```
    pub fn height(&self) -> usize {
        self.pre_order()
            .map(|(_, depth)| depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Returns a read-only view of the root node, or `None` if the set is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::{Color, RedBlackSet};
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(2);
    /// set.insert(1);
    ///
    /// let root = set.root().unwrap();
    /// assert_eq!(*root.key(), 2);
    /// assert_eq!(root.color(), Color::Black);
    /// assert_eq!(*root.left().unwrap().key(), 1);
    /// assert!(root.right().is_none());
    /// ```
    pub fn root(&self) -> Option<RedBlackNodeRef<'_, T>> {
        self.tree.root.map(|handle| {
            RedBlackNodeRef {
                arena: &self.tree.arena,
                handle,
            }
        })
    }

    /// Returns an iterator over the set. The iterator will yield keys in
    /// ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackSetIter<'_, T> {
        RedBlackSetIter {
            inner: traverse::in_order(self.root()),
        }
    }

    /// Returns a pre-order iterator over the set, yielding each node view
    /// together with its depth. The root has depth 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let depths = set
    ///     .pre_order()
    ///     .map(|(node, depth)| (*node.key(), depth))
    ///     .collect::<Vec<_>>();
    /// assert_eq!(depths, vec![(2, 0), (1, 1), (3, 1)]);
    /// ```
    pub fn pre_order(&self) -> PreOrder<RedBlackNodeRef<'_, T>> {
        traverse::pre_order(self.root())
    }

    /// Flattens the set into render-ready `Placement`s: in-order rank for
    /// horizontal placement, depth for vertical layering.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let placements = set.placements();
    /// assert_eq!(placements[0].key, 1);
    /// assert_eq!(placements[0].rank, 0);
    /// assert_eq!(placements[1].key, 2);
    /// assert_eq!(placements[1].depth, 0);
    /// ```
    pub fn placements(&self) -> Vec<Placement<T>>
    where
        T: Clone,
    {
        traverse::placements(self.root())
    }
}

impl<'a, T> IntoIterator for &'a RedBlackSet<T>
where
    T: 'a,
{
    type IntoIter = RedBlackSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for RedBlackSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A read-only view of a node in a `RedBlackSet<T>`, exposing the key, the
/// child views, and the node's color.
pub struct RedBlackNodeRef<'a, T> {
    arena: &'a Arena<Node<T>>,
    handle: Handle,
}

impl<'a, T> Clone for RedBlackNodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for RedBlackNodeRef<'a, T> {}

impl<'a, T> RedBlackNodeRef<'a, T> {
    /// Returns the key stored in this node.
    pub fn key(self) -> &'a T {
        &self.arena[self.handle].key
    }

    /// Returns the view of this node's left child.
    pub fn left(self) -> Option<Self> {
        self.arena[self.handle].left.map(|handle| {
            RedBlackNodeRef {
                arena: self.arena,
                handle,
            }
        })
    }

    /// Returns the view of this node's right child.
    pub fn right(self) -> Option<Self> {
        self.arena[self.handle].right.map(|handle| {
            RedBlackNodeRef {
                arena: self.arena,
                handle,
            }
        })
    }

    /// Returns the color of this node.
    pub fn color(self) -> Color {
        self.arena[self.handle].color
    }
}

impl<'a, T> NodeRef for RedBlackNodeRef<'a, T> {
    type Key = T;

    fn key(&self) -> &T {
        RedBlackNodeRef::key(*self)
    }

    fn left(&self) -> Option<Self> {
        RedBlackNodeRef::left(*self)
    }

    fn right(&self) -> Option<Self> {
        RedBlackNodeRef::right(*self)
    }
}

/// An iterator for `RedBlackSet<T>`.
///
/// This iterator traverses the set in-order and yields immutable references.
pub struct RedBlackSetIter<'a, T> {
    inner: InOrder<RedBlackNodeRef<'a, T>>,
}

impl<'a, T> Iterator for RedBlackSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(RedBlackNodeRef::key)
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, RedBlackSet};

    #[test]
    fn test_len_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.len(), 0);
        assert_eq!(set.height(), 0);
        assert!(set.root().is_none());
    }

    #[test]
    fn test_insert() {
        let mut set = RedBlackSet::new();
        assert!(set.insert(1));
        assert!(set.contains(&1));
    }

    #[test]
    fn test_insert_duplicate_is_noop() {
        let mut set = RedBlackSet::new();
        for key in &[2, 1, 3] {
            set.insert(*key);
        }

        let shape_before = set
            .pre_order()
            .map(|(node, depth)| (*node.key(), node.color(), depth))
            .collect::<Vec<_>>();

        assert!(!set.insert(2));
        assert_eq!(set.len(), 3);

        let shape_after = set
            .pre_order()
            .map(|(node, depth)| (*node.key(), node.color(), depth))
            .collect::<Vec<_>>();
        assert_eq!(shape_before, shape_after);
    }

    #[test]
    fn test_remove() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        assert!(set.remove(&1));
        assert!(!set.contains(&1));
        assert!(!set.remove(&1));
        assert!(set.root().is_none());
    }

    #[test]
    fn test_clear() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(2);
        set.clear();
        assert!(set.is_empty());
        assert!(set.root().is_none());
    }

    // An ascending run recolors through the rotation at the root: 10, 20,
    // 30 ends as black 20 over red 10 and 30.
    #[test]
    fn test_insert_ascending_recolors() {
        let mut set = RedBlackSet::new();
        set.insert(10);
        set.insert(20);
        set.insert(30);

        let root = set.root().unwrap();
        assert_eq!(*root.key(), 20);
        assert_eq!(root.color(), Color::Black);

        let left = root.left().unwrap();
        assert_eq!(*left.key(), 10);
        assert_eq!(left.color(), Color::Red);

        let right = root.right().unwrap();
        assert_eq!(*right.key(), 30);
        assert_eq!(right.color(), Color::Red);
    }

    #[test]
    fn test_iter() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
        assert_eq!((&set).into_iter().count(), 3);
    }

    #[test]
    fn test_color_ser_de() {
        use serde_test::{assert_tokens, Token};

        assert_tokens(
            &Color::Red,
            &[Token::UnitVariant {
                name: "Color",
                variant: "Red",
            }],
        );
        assert_tokens(
            &Color::Black,
            &[Token::UnitVariant {
                name: "Color",
                variant: "Black",
            }],
        );
    }
}
