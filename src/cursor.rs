//! Positions within a traversal and the iterators built on top of them.
//!
//! A [`Cursor`] is a node handle tagged with an [`Order`]. It doesn't borrow the tree, so a cursor
//! can be held across mutations: it stays valid as long as the node it points at isn't removed.
//! Stepping and dereferencing take the tree as an argument.
//!
//! # Examples
//!
//! ```
//! use bst_cursor::{Order, Tree};
//!
//! let tree: Tree<i32> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
//!
//! let mut preorder = Vec::new();
//! let mut cursor = tree.begin(Order::Preorder);
//! while cursor != tree.end(Order::Preorder) {
//!     preorder.push(*cursor.get(&tree).unwrap());
//!     cursor.move_next(&tree);
//! }
//! assert_eq!(preorder, [4, 2, 1, 3, 6, 5, 7]);
//!
//! // Reversed cursors walk the same traversal from the other end.
//! let mut postorder_backwards = Vec::new();
//! let mut cursor = tree.rbegin(Order::Postorder);
//! while cursor != tree.rend(Order::Postorder) {
//!     postorder_backwards.push(*cursor.get(&tree).unwrap());
//!     cursor.move_next(&tree);
//! }
//! assert_eq!(postorder_backwards, [4, 6, 7, 5, 2, 3, 1]);
//! ```

use std::iter::FusedIterator;

use crate::node::NodeId;
use crate::traverse::{self, Order};
use crate::Tree;

/// A position in one of a tree's traversals.
///
/// Two cursors are equal when they point at the same node in the same order. The end position of
/// every order is the tree's sentinel node, which holds no value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cursor {
    node: NodeId,
    order: Order,
}

impl Cursor {
    pub(crate) fn new(node: NodeId, order: Order) -> Self {
        Self { node, order }
    }

    /// The traversal this cursor steps through.
    pub fn order(self) -> Order {
        self.order
    }

    /// The node this cursor points at.
    pub fn node(self) -> NodeId {
        self.node
    }

    /// Whether this cursor is past-the-end (equivalently, before-the-beginning).
    pub fn is_end(self) -> bool {
        self.node.is_sentinel()
    }

    /// The same position, stepping through `order` instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_cursor::{Order, Tree};
    ///
    /// let mut tree: Tree<i32> = [4, 2, 6].into_iter().collect();
    /// let (inserted, _) = tree.insert(1);
    ///
    /// // In-order 1 comes first, in post-order it's followed by 2.
    /// let postorder = inserted.with_order(Order::Postorder);
    /// assert_eq!(postorder.successor(&tree).get(&tree), Some(&2));
    /// ```
    pub fn with_order(self, order: Order) -> Self {
        Self { order, ..self }
    }

    /// The value at this position. `None` at the end position or when the node has been removed.
    pub fn get<T, C>(self, tree: &Tree<T, C>) -> Option<&T> {
        tree.get(self)
    }

    /// Steps forward in this cursor's order. Stepping forward from the end stays at the end.
    ///
    /// ## Panics
    ///
    /// When the node this cursor points at has been removed from `tree`.
    pub fn move_next<T, C>(&mut self, tree: &Tree<T, C>) {
        self.node = traverse::next(tree.store(), self.node, self.order);
    }

    /// Steps backward in this cursor's order. Stepping backward from the first position yields
    /// the end position and stepping backward from the end yields the last position.
    ///
    /// ## Panics
    ///
    /// When the node this cursor points at has been removed from `tree`.
    pub fn move_prev<T, C>(&mut self, tree: &Tree<T, C>) {
        self.node = traverse::prev(tree.store(), self.node, self.order);
    }

    /// The position after this one. See [`Cursor::move_next`].
    pub fn successor<T, C>(mut self, tree: &Tree<T, C>) -> Self {
        self.move_next(tree);
        self
    }

    /// The position before this one. See [`Cursor::move_prev`].
    pub fn predecessor<T, C>(mut self, tree: &Tree<T, C>) -> Self {
        self.move_prev(tree);
        self
    }
}

/// Walks a traversal backwards by swapping the step direction of the wrapped [`Cursor`].
///
/// The wrapped cursor dereferences directly, so [`Tree::rbegin`] wraps the position *before* the
/// end and [`Tree::rend`] wraps the position before the beginning, which is the end again.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RevCursor {
    base: Cursor,
}

impl RevCursor {
    /// Wraps `base` as is.
    pub fn new(base: Cursor) -> Self {
        Self { base }
    }

    /// The wrapped cursor.
    pub fn base(self) -> Cursor {
        self.base
    }

    /// The traversal this cursor walks backwards.
    pub fn order(self) -> Order {
        self.base.order
    }

    /// Whether this cursor is at the end of the reversed traversal.
    pub fn is_end(self) -> bool {
        self.base.is_end()
    }

    /// The value at this position.
    pub fn get<T, C>(self, tree: &Tree<T, C>) -> Option<&T> {
        self.base.get(tree)
    }

    /// Steps forward in the reversed traversal, i.e. backward in the wrapped one.
    pub fn move_next<T, C>(&mut self, tree: &Tree<T, C>) {
        self.base.move_prev(tree);
    }

    /// Steps backward in the reversed traversal, i.e. forward in the wrapped one.
    pub fn move_prev<T, C>(&mut self, tree: &Tree<T, C>) {
        self.base.move_next(tree);
    }

    /// The position after this one in the reversed traversal.
    pub fn successor<T, C>(mut self, tree: &Tree<T, C>) -> Self {
        self.move_next(tree);
        self
    }

    /// The position before this one in the reversed traversal.
    pub fn predecessor<T, C>(mut self, tree: &Tree<T, C>) -> Self {
        self.move_prev(tree);
        self
    }
}

/// A borrowing iterator over the values between two cursors of the same order.
///
/// Created by [`Tree::iter`], [`Tree::iter_order`] and [`Tree::range`].
pub struct Iter<'a, T, C> {
    tree: &'a Tree<T, C>,
    front: Cursor,
    // One past the last value still to be yielded.
    back: Cursor,
}

impl<'a, T, C> Iter<'a, T, C> {
    pub(crate) fn new(tree: &'a Tree<T, C>, front: Cursor, back: Cursor) -> Self {
        debug_assert_eq!(front.order, back.order);
        Self { tree, front, back }
    }
}

impl<'a, T, C> Clone for Iter<'a, T, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T, C> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        // Stopping at the sentinel keeps a `back` that isn't reachable from `front` from looping.
        if self.front == self.back || self.front.is_end() {
            return None;
        }
        let value = self.front.get(self.tree)?;
        self.front.move_next(self.tree);
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.tree.len()))
    }
}

impl<'a, T, C> DoubleEndedIterator for Iter<'a, T, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back.move_prev(self.tree);
        if self.back.is_end() {
            // `back` wasn't reachable from `front`, so there's nothing left to yield.
            self.back = self.front;
            return None;
        }
        self.back.get(self.tree)
    }
}

impl<'a, T, C> FusedIterator for Iter<'a, T, C> {}

/// An owning iterator over a tree's values in sorted order.
///
/// Each step removes the current minimum (or maximum, from the back) from the tree, so the values
/// are moved out rather than cloned.
pub struct IntoIter<T, C> {
    tree: Tree<T, C>,
}

impl<T, C> IntoIter<T, C> {
    pub(crate) fn new(tree: Tree<T, C>) -> Self {
        Self { tree }
    }
}

impl<T, C> Iterator for IntoIter<T, C> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let first = self.tree.begin(Order::Inorder);
        self.tree.extract(first).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<T, C> DoubleEndedIterator for IntoIter<T, C> {
    fn next_back(&mut self) -> Option<T> {
        let last = self.tree.rbegin(Order::Inorder).base();
        self.tree.extract(last).ok()
    }
}

impl<T, C> ExactSizeIterator for IntoIter<T, C> {}

impl<T, C> FusedIterator for IntoIter<T, C> {}
