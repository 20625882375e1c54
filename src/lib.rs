//! An in-memory ordered multiset built on an unbalanced Binary Search Tree (BST) whose cursors can
//! walk the tree in-order, pre-order or post-order, in either direction.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree stores values in `Node`s. Each `Node` has up to two children and, here,
//! a link back to its parent. The invariants maintained by this crate are:
//!
//! 1. For every `Node`, every value in its left subtree is strictly less than its own value.
//! 2. For every `Node`, every value in its right subtree is not less than its own value.
//!
//! Equal values are therefore allowed (making this a multiset) and each new duplicate lands to
//! the right of the ones already present. No rebalancing ever happens, so the shape of the tree,
//! and with it the pre- and post-order sequences, depends purely on insertion order.
//!
//! ## Cursors
//!
//! A [`Cursor`] is a position in one [`Order`]. The tree hangs off a sentinel node which holds no
//! value and serves as the "past-the-end" position of every order, in both directions:
//! stepping forward from the last node or backward from the first one lands on it. Cursors are
//! plain handles, so they remain valid across mutations that don't remove the node they point at.
//! Removing a node with two children moves its successor into its place rather than moving
//! values around, so cursors to every other node survive.
//!
//! A [`RevCursor`] wraps a cursor and flips its direction.
//!
//! # Examples
//!
//! ```
//! use bst_cursor::{Order, Tree};
//!
//! let mut tree: Tree<i32> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
//!
//! assert!(tree.iter().copied().eq(1..=7));
//! assert!(tree.iter_order(Order::Preorder).copied().eq([4, 2, 1, 3, 6, 5, 7]));
//! assert!(tree.iter_order(Order::Postorder).rev().copied().eq([4, 6, 7, 5, 2, 3, 1]));
//!
//! let cursor = tree.find(&6, Order::Inorder);
//! let next = tree.erase(cursor);
//! assert_eq!(tree.get(next), Some(&7));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod cursor;
mod error;
mod node;
mod traverse;
mod tree;

pub use cursor::{Cursor, IntoIter, Iter, RevCursor};
pub use error::{Error, Result};
pub use node::NodeId;
pub use traverse::Order;
pub use tree::Tree;
