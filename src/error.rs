//! Errors returned by the value-producing removals on [`Tree`][crate::Tree].
//!
//! Lookups never fail: a value that isn't present is reported by handing back the traversal's
//! end cursor. Only operations that must produce a `T` (i.e. [`Tree::extract`][crate::Tree::extract]
//! and [`Tree::extract_value`][crate::Tree::extract_value]) have something to report when there
//! is no value to give.

use thiserror::Error;

/// Errors that can occur when removing a value from a tree.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The cursor is positioned on the sentinel. The sentinel is the "past-the-end" position of
    /// every traversal and never holds a value.
    #[error("cursor is at the end of the traversal")]
    EndCursor,

    /// The node the cursor referred to has already been removed from the tree.
    #[error("cursor refers to a node that is no longer in the tree")]
    StaleCursor,

    /// No element in the tree is equivalent to the requested value.
    #[error("no equivalent value in the tree")]
    NotFound,
}

/// A `Result` alias using this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
