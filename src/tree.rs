//! A multiset ordered by a user supplied comparator and stored in an unbalanced binary search
//! tree. The shape of the tree is determined purely by insertion order.
//!
//! # Examples
//!
//! ```
//! use bst_cursor::{Order, Tree};
//!
//! let mut tree = Tree::new();
//! tree.insert_all([4, 2, 6, 1, 3, 5, 7, 3]);
//!
//! // Duplicates are kept.
//! assert_eq!(tree.len(), 8);
//! assert_eq!(tree.count(&3), 2);
//!
//! // Values come out sorted in-order, but any depth-first order is available.
//! assert!(tree.iter().copied().eq([1, 2, 3, 3, 4, 5, 6, 7]));
//! assert!(tree.iter_order(Order::Postorder).copied().eq([1, 3, 3, 2, 5, 7, 6, 4]));
//!
//! // Removing by value removes every occurrence.
//! assert_eq!(tree.erase_value(&3), 2);
//! assert!(!tree.contains(&3));
//! assert_eq!(tree.find(&3, Order::Inorder), tree.end(Order::Inorder));
//! ```

use std::fmt;

use compare::{Compare, Natural};
use tracing::{debug, trace};

use crate::cursor::{Cursor, IntoIter, Iter, RevCursor};
use crate::error::{Error, Result};
use crate::node::{NodeId, NodeStore};
use crate::traverse::{self, Order};

/// An ordered multiset backed by a binary search tree with parent links.
///
/// Values are ordered by `C`, which defaults to the natural ordering of `T`. Equal values are
/// stored as separate nodes, each placed to the right of the ones inserted before it.
///
/// The behavior of the tree is unspecified (but memory safe) if a value's ordering relative to
/// another value changes while it is in the tree.
#[derive(Clone)]
pub struct Tree<T, C = Natural<T>> {
    nodes: NodeStore<T>,
    len: usize,
    cmp: C,
}

impl<T> Default for Tree<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Generates a new, empty `Tree` using the natural order of `T`.
    pub fn new() -> Self {
        Self::with_cmp(compare::natural())
    }
}

impl<T, C> Tree<T, C> {
    /// Generates a new, empty `Tree` ordered by the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_cursor::Tree;
    /// use compare::{natural, Compare};
    ///
    /// let mut tree = Tree::with_cmp(natural().rev());
    /// tree.insert_all([1, 3, 2]);
    ///
    /// assert!(tree.iter().copied().eq([3, 2, 1]));
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        Self {
            nodes: NodeStore::new(),
            len: 0,
            cmp,
        }
    }

    /// The ordering relation of this tree.
    pub fn cmp(&self) -> &C {
        &self.cmp
    }

    /// The number of values in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn store(&self) -> &NodeStore<T> {
        &self.nodes
    }

    /// A cursor at the first position of `order`. Equal to [`Tree::end`] when the tree is empty.
    pub fn begin(&self, order: Order) -> Cursor {
        Cursor::new(traverse::first(&self.nodes, order), order)
    }

    /// The past-the-end cursor of `order`.
    pub fn end(&self, order: Order) -> Cursor {
        Cursor::new(NodeId::SENTINEL, order)
    }

    /// A cursor at the last position of `order` that steps backwards.
    pub fn rbegin(&self, order: Order) -> RevCursor {
        RevCursor::new(self.end(order)).successor(self)
    }

    /// The past-the-end position of [`Tree::rbegin`].
    pub fn rend(&self, order: Order) -> RevCursor {
        RevCursor::new(self.begin(order)).successor(self)
    }

    /// The value at `cursor`, or `None` if the cursor is at the end or its node has been removed.
    pub fn get(&self, cursor: Cursor) -> Option<&T> {
        self.nodes.value(cursor.node())
    }

    /// The smallest value in the tree.
    pub fn first(&self) -> Option<&T> {
        self.get(self.begin(Order::Inorder))
    }

    /// The largest value in the tree.
    pub fn last(&self) -> Option<&T> {
        self.rbegin(Order::Inorder).get(self)
    }

    /// Iterates over the values in sorted order.
    pub fn iter(&self) -> Iter<'_, T, C> {
        self.iter_order(Order::Inorder)
    }

    /// Iterates over the values in the given traversal order.
    pub fn iter_order(&self, order: Order) -> Iter<'_, T, C> {
        Iter::new(self, self.begin(order), self.end(order))
    }

    /// Iterates over the values from `first` up to but excluding `last`. Both cursors must step
    /// through the same order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_cursor::{Order, Tree};
    ///
    /// let tree: Tree<i32> = (1..=7).collect();
    /// let (lower, upper) = tree.equal_range(&3, Order::Inorder);
    ///
    /// assert!(tree.range(lower, tree.end(Order::Inorder)).copied().eq(3..=7));
    /// assert!(tree.range(tree.begin(Order::Inorder), upper).copied().eq(1..=3));
    /// ```
    pub fn range(&self, first: Cursor, last: Cursor) -> Iter<'_, T, C> {
        Iter::new(self, first, last)
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        debug!(len = self.len, "clearing tree");
        self.nodes.clear();
        self.len = 0;
    }

    /// Exchanges the contents of two trees. Cursors keep pointing at the same values, which now
    /// live in the other tree.
    pub fn swap(&mut self, other: &mut Self) {
        trace!(left = self.len, right = other.len, "swapping trees");
        std::mem::swap(self, other);
    }

    /// Removes the value at `cursor` and returns a cursor at the position that followed it.
    /// Erasing the end cursor does nothing and returns it unchanged.
    ///
    /// The returned cursor is computed before the node is unlinked. Under
    /// [`Order::Inorder`] it is always the next value of the remaining tree. Pre- and
    /// post-order are properties of the tree's shape, and removing a node with two children
    /// reshapes its subtree, so the remaining traversal may differ from the original one.
    ///
    /// ## Panics
    ///
    /// When the node `cursor` points at has already been removed.
    pub fn erase(&mut self, cursor: Cursor) -> Cursor {
        if cursor.is_end() {
            return cursor;
        }
        let next = cursor.successor(self);
        self.remove_node(cursor.node());
        next
    }

    /// Removes every value from `first` up to but excluding `last`, returning how many values
    /// were removed. Stops at the end of the traversal if `last` is never reached.
    ///
    /// Each step erases the current value and continues from the position [`Tree::erase`]
    /// returned. In pre- and post-order, erasing a node with two children moves its subtrees, so
    /// some values after it are skipped. Erasing from `begin(Preorder)` to `end(Preorder)` on the
    /// tree below removes 4, 2, 1 and 7 and leaves 3, 5 and 6 behind.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_cursor::{Order, Tree};
    ///
    /// let mut tree: Tree<i32> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
    /// let first = tree.find(&2, Order::Inorder);
    /// let last = tree.find(&6, Order::Inorder);
    ///
    /// assert_eq!(tree.erase_range(first, last), 4);
    /// assert!(tree.iter().copied().eq([1, 6, 7]));
    /// ```
    pub fn erase_range(&mut self, first: Cursor, last: Cursor) -> usize {
        debug_assert_eq!(first.order(), last.order());
        let mut cursor = first;
        let mut removed = 0;
        while cursor != last && !cursor.is_end() {
            cursor = self.erase(cursor);
            removed += 1;
        }
        debug!(removed, order = ?first.order(), "erased range");
        removed
    }

    /// Removes the value at `cursor` and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_cursor::{Error, Order, Tree};
    ///
    /// let mut tree: Tree<i32> = [2, 1, 3].into_iter().collect();
    /// let root = tree.begin(Order::Preorder);
    ///
    /// assert_eq!(tree.extract(root), Ok(2));
    /// assert_eq!(tree.extract(root), Err(Error::StaleCursor));
    /// assert_eq!(tree.extract(tree.end(Order::Preorder)), Err(Error::EndCursor));
    /// ```
    pub fn extract(&mut self, cursor: Cursor) -> Result<T> {
        if cursor.is_end() {
            return Err(Error::EndCursor);
        }
        if !self.nodes.contains(cursor.node()) {
            return Err(Error::StaleCursor);
        }
        Ok(self.remove_node(cursor.node()))
    }

    /// Unlinks `id`, releases its slot and hands back its value.
    fn remove_node(&mut self, id: NodeId) -> T {
        self.unlink(id);
        self.len -= 1;
        self.nodes.release(id)
    }

    /// Detaches `id` from the tree without moving any other node's value, so cursors to every
    /// other node stay valid.
    ///
    /// # Diagram
    ///
    /// With two children the right subtree takes the removed node's place and the left subtree
    /// hangs off the smallest node of the right subtree, which has no left child by definition:
    ///
    /// ```text
    ///     parent                 parent
    ///       |                      |
    ///      id                      r
    ///     /  \                    / \
    ///    l    r     unlink ->   ...  ...
    ///        / \                /
    ///      ...  ...           min(r)
    ///      /                   /
    ///    min(r)               l
    /// ```
    fn unlink(&mut self, id: NodeId) {
        let parent = self
            .nodes
            .parent(id)
            .expect("Every data node has a parent");
        let replacement = match (self.nodes.left(id), self.nodes.right(id)) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(left), Some(right)) => {
                let successor = self.nodes.minimum_of(right);
                self.nodes.set_left(successor, Some(left));
                self.nodes.set_parent(left, successor);
                Some(right)
            }
        };
        self.nodes.replace_child(parent, id, replacement);

        if cfg!(debug_assertions) {
            if let Some(replacement) = replacement {
                assert_eq!(self.nodes.parent(replacement), Some(parent));
            }
            assert!(self.nodes.left(parent) != Some(id) && self.nodes.right(parent) != Some(id));
        }
    }
}

impl<T, C> Tree<T, C>
where
    C: Compare<T>,
{
    /// Inserts `value` and returns an in-order cursor to it. The flag is always `true`: equal
    /// values are never rejected, they are placed after the existing ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_cursor::{Order, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2);
    /// let (cursor, inserted) = tree.insert(2);
    ///
    /// assert!(inserted);
    /// assert_eq!(tree.get(cursor), Some(&2));
    /// // The newer 2 comes after the older one.
    /// assert_eq!(cursor.successor(&tree), tree.end(Order::Inorder));
    /// ```
    pub fn insert(&mut self, value: T) -> (Cursor, bool) {
        let mut parent = NodeId::SENTINEL;
        let mut link = self.nodes.root();
        let mut goes_left = true;
        while let Some(id) = link {
            parent = id;
            goes_left = self.cmp.compares_lt(&value, self.nodes.data(id));
            link = if goes_left {
                self.nodes.left(id)
            } else {
                self.nodes.right(id)
            };
        }

        let id = self.nodes.allocate(value, parent);
        if goes_left {
            self.nodes.set_left(parent, Some(id));
        } else {
            self.nodes.set_right(parent, Some(id));
        }
        self.len += 1;

        if cfg!(debug_assertions) && !parent.is_sentinel() {
            let value = self.nodes.data(id);
            let parent_value = self.nodes.data(parent);
            assert_eq!(goes_left, self.cmp.compares_lt(value, parent_value));
        }

        (Cursor::new(id, Order::Inorder), true)
    }

    /// Inserts every value of `values`, one at a time.
    pub fn insert_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.insert(value);
        }
    }

    /// Inserts a copy of every value of `other`. Values already present are duplicated.
    pub fn merge<D>(&mut self, other: &Tree<T, D>)
    where
        T: Clone,
    {
        debug!(len = self.len, incoming = other.len(), "merging trees");
        self.insert_all(other.iter().cloned());
    }

    /// Removes every value equivalent to `value` and returns how many were removed.
    pub fn erase_value(&mut self, value: &T) -> usize {
        let mut removed = 0;
        while let Some(id) = self.topmost_equivalent(value) {
            self.remove_node(id);
            removed += 1;
        }
        trace!(removed, "erased by value");
        removed
    }

    /// Removes the first (in sorted order) value equivalent to `value` and returns it.
    pub fn extract_value(&mut self, value: &T) -> Result<T> {
        let cursor = self.find(value, Order::Inorder);
        if cursor.is_end() {
            return Err(Error::NotFound);
        }
        self.extract(cursor)
    }

    /// Whether any value equivalent to `value` is in the tree.
    pub fn contains(&self, value: &T) -> bool {
        self.topmost_equivalent(value).is_some()
    }

    /// How many values equivalent to `value` are in the tree.
    pub fn count(&self, value: &T) -> usize {
        // Equal values always go right on insertion, so every one of them lies on the single
        // search path for `value`.
        let mut count = 0;
        let mut link = self.nodes.root();
        while let Some(id) = link {
            let current = self.nodes.data(id);
            if self.cmp.compares_lt(value, current) {
                link = self.nodes.left(id);
            } else {
                if !self.cmp.compares_lt(current, value) {
                    count += 1;
                }
                link = self.nodes.right(id);
            }
        }
        count
    }

    /// A cursor at the first value equivalent to `value` in `order`, or the end cursor if there
    /// is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_cursor::{Order, Tree};
    ///
    /// let tree: Tree<i32> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
    ///
    /// assert_eq!(tree.find(&1, Order::Inorder), tree.begin(Order::Inorder));
    /// assert_eq!(tree.find(&4, Order::Preorder), tree.begin(Order::Preorder));
    /// assert_eq!(tree.find(&8, Order::Postorder), tree.end(Order::Postorder));
    /// ```
    pub fn find(&self, value: &T, order: Order) -> Cursor {
        if order == Order::Inorder {
            let lower = self.lower_bound(value, order);
            return match self.get(lower) {
                Some(found) if self.equivalent(found, value) => lower,
                _ => self.end(order),
            };
        }
        let Some(top) = self.topmost_equivalent(value) else {
            return self.end(order);
        };
        // Every equivalent value lives in `top`'s subtree, which each order visits contiguously.
        let (first, _) = self.subtree_span(top, order);
        let mut cursor = Cursor::new(first, order);
        while !self.equivalent(self.nodes.data(cursor.node()), value) {
            cursor.move_next(self);
        }
        cursor
    }

    /// A cursor at the last value equivalent to `value` in `order`, or the end cursor if there
    /// is none.
    pub fn rfind(&self, value: &T, order: Order) -> Cursor {
        if order == Order::Inorder {
            let last = self.upper_bound(value, order).predecessor(self);
            return match self.get(last) {
                Some(found) if self.equivalent(found, value) => last,
                _ => self.end(order),
            };
        }
        let Some(top) = self.topmost_equivalent(value) else {
            return self.end(order);
        };
        let (_, last) = self.subtree_span(top, order);
        let mut cursor = Cursor::new(last, order);
        while !self.equivalent(self.nodes.data(cursor.node()), value) {
            cursor.move_prev(self);
        }
        cursor
    }

    /// In-order, a cursor at the first value not less than `value` (the end if there is none).
    /// Unlike [`Tree::find`], a missing value yields the position it would be inserted at rather
    /// than the end. In pre- and post-order, where values aren't sorted, this is the first occurrence of
    /// `value` in the traversal, the same as [`Tree::find`].
    pub fn lower_bound(&self, value: &T, order: Order) -> Cursor {
        if order != Order::Inorder {
            return self.find(value, order);
        }
        let mut bound = NodeId::SENTINEL;
        let mut link = self.nodes.root();
        while let Some(id) = link {
            if self.cmp.compares_lt(self.nodes.data(id), value) {
                link = self.nodes.right(id);
            } else {
                bound = id;
                link = self.nodes.left(id);
            }
        }
        Cursor::new(bound, order)
    }

    /// In-order, a cursor at the first value greater than `value` (the end if there is none).
    /// In pre- and post-order this is the position following the last occurrence of `value` in
    /// the traversal, or the end if `value` isn't present.
    pub fn upper_bound(&self, value: &T, order: Order) -> Cursor {
        if order != Order::Inorder {
            let last = self.rfind(value, order);
            return if last.is_end() {
                last
            } else {
                last.successor(self)
            };
        }
        let mut bound = NodeId::SENTINEL;
        let mut link = self.nodes.root();
        while let Some(id) = link {
            if self.cmp.compares_lt(value, self.nodes.data(id)) {
                bound = id;
                link = self.nodes.left(id);
            } else {
                link = self.nodes.right(id);
            }
        }
        Cursor::new(bound, order)
    }

    /// `(lower_bound(value, order), upper_bound(value, order))`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_cursor::{Order, Tree};
    ///
    /// let tree: Tree<i32> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
    ///
    /// let (lower, upper) = tree.equal_range(&3, Order::Inorder);
    /// assert_eq!((lower.get(&tree), upper.get(&tree)), (Some(&3), Some(&4)));
    ///
    /// let (lower, upper) = tree.equal_range(&3, Order::Preorder);
    /// assert_eq!((lower.get(&tree), upper.get(&tree)), (Some(&3), Some(&6)));
    /// ```
    pub fn equal_range(&self, value: &T, order: Order) -> (Cursor, Cursor) {
        (
            self.lower_bound(value, order),
            self.upper_bound(value, order),
        )
    }

    fn equivalent(&self, a: &T, b: &T) -> bool {
        !self.cmp.compares_lt(a, b) && !self.cmp.compares_lt(b, a)
    }

    /// The first node on the search path for `value` that is equivalent to it. Every other
    /// equivalent node is a descendant of this one.
    fn topmost_equivalent(&self, value: &T) -> Option<NodeId> {
        let mut link = self.nodes.root();
        while let Some(id) = link {
            let current = self.nodes.data(id);
            if self.cmp.compares_lt(value, current) {
                link = self.nodes.left(id);
            } else if self.cmp.compares_lt(current, value) {
                link = self.nodes.right(id);
            } else {
                return Some(id);
            }
        }
        None
    }

    /// The first and last node of the subtree rooted at `id` in `order`.
    fn subtree_span(&self, id: NodeId, order: Order) -> (NodeId, NodeId) {
        match order {
            Order::Inorder => (self.nodes.minimum_of(id), self.nodes.maximum_of(id)),
            Order::Preorder => (id, traverse::preorder_last_of(&self.nodes, id)),
            Order::Postorder => (traverse::postorder_first_of(&self.nodes, id), id),
        }
    }

    /// Checks every structural invariant of the tree, panicking on the first violation.
    #[cfg(test)]
    pub(crate) fn validate(&self) {
        let mut seen = 0;
        let mut stack: Vec<NodeId> = self.nodes.root().into_iter().collect();
        if let Some(root) = self.nodes.root() {
            assert_eq!(self.nodes.parent(root), Some(NodeId::SENTINEL));
        }
        while let Some(id) = stack.pop() {
            seen += 1;
            let value = self.nodes.data(id);
            if let Some(left) = self.nodes.left(id) {
                assert_eq!(self.nodes.parent(left), Some(id));
                let largest_left = self.nodes.data(self.nodes.maximum_of(left));
                assert!(self.cmp.compares_lt(largest_left, value));
                stack.push(left);
            }
            if let Some(right) = self.nodes.right(id) {
                assert_eq!(self.nodes.parent(right), Some(id));
                let smallest_right = self.nodes.data(self.nodes.minimum_of(right));
                assert!(!self.cmp.compares_lt(smallest_right, value));
                stack.push(right);
            }
        }
        assert_eq!(seen, self.len);
    }
}

impl<T, C> fmt::Debug for Tree<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Two trees are equal when they hold equal values in the same sorted order, whatever their
/// shapes.
impl<T, C> PartialEq for Tree<T, C>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T, C> Eq for Tree<T, C> where T: Eq {}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.insert_all(iter);
        tree
    }
}

impl<T, C> Extend<T> for Tree<T, C>
where
    C: Compare<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<'a, T, C> IntoIterator for &'a Tree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> IntoIterator for Tree<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T, C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}
