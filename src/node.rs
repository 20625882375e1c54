//! Node storage for the tree.
//!
//! Nodes live in a [`Slab`] and refer to each other by [`NodeId`]. A node owns its children in
//! the sense that removing a subtree releases every slot below it, while the `parent` field is a
//! plain handle used only for walking upwards. Keeping the links as indices means the cyclic
//! parent/child graph needs no reference counting and no `unsafe`.
//!
//! The tree is rooted at a sentinel which never holds a value. Its left child is the real root
//! (if the tree isn't empty) and it has no right child and no parent. The sentinel doesn't occupy
//! a slab slot - it is the reserved handle [`NodeId::SENTINEL`] whose one meaningful link is kept
//! directly in the [`NodeStore`]. The accessors below hide that detail so structural code can
//! treat "the parent of the root" like any other node.
//!
//! ```text
//!        SENTINEL
//!         /
//!       root
//!      /    \
//!    ...    ...
//! ```

use slab::Slab;

/// An opaque handle to a node of a [`Tree`][crate::Tree].
///
/// Handles stay valid until the node they refer to is removed. Slots are reused after removal so
/// a handle to a removed node may later refer to a different value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
    /// The non-data node that acts as the past-the-end position of every traversal.
    pub(crate) const SENTINEL: Self = Self(usize::MAX);

    /// Whether this handle is the sentinel.
    pub fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }
}

/// An optional edge to a child.
pub(crate) type Link = Option<NodeId>;

#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    value: T,
    // Every data node has a parent - the root's parent is the sentinel.
    parent: NodeId,
    left: Link,
    right: Link,
}

/// Owns every data node of a tree as well as the sentinel's link to the root.
#[derive(Clone, Debug)]
pub(crate) struct NodeStore<T> {
    nodes: Slab<Node<T>>,
    root: Link,
}

impl<T> Default for NodeStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeStore<T> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Slab::new(),
            root: None,
        }
    }

    /// The real root of the tree, i.e. the sentinel's left child.
    pub(crate) fn root(&self) -> Link {
        self.root
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Whether `id` refers to a live data node.
    pub(crate) fn contains(&self, id: NodeId) -> bool {
        !id.is_sentinel() && self.nodes.contains(id.0)
    }

    /// Allocates a detached leaf holding `value` whose parent link is `parent`. The caller is
    /// responsible for hooking it into `parent`'s left or right slot.
    pub(crate) fn allocate(&mut self, value: T, parent: NodeId) -> NodeId {
        NodeId(self.nodes.insert(Node {
            value,
            parent,
            left: None,
            right: None,
        }))
    }

    /// Releases the slot of a node that has already been unlinked and returns its value.
    ///
    /// ## Panics
    ///
    /// When `id` isn't a live data node.
    pub(crate) fn release(&mut self, id: NodeId) -> T {
        assert!(!id.is_sentinel(), "the sentinel is never released");
        self.nodes.remove(id.0).value
    }

    /// Releases every data node at once.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) fn value(&self, id: NodeId) -> Option<&T> {
        if id.is_sentinel() {
            return None;
        }
        self.nodes.get(id.0).map(|n| &n.value)
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        self.nodes
            .get(id.0)
            .expect("Navigating from a node that was removed from the tree")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.nodes
            .get_mut(id.0)
            .expect("Relinking a node that was removed from the tree")
    }

    /// The value of a node known to hold data.
    pub(crate) fn data(&self, id: NodeId) -> &T {
        &self.node(id).value
    }

    pub(crate) fn left(&self, id: NodeId) -> Link {
        if id.is_sentinel() {
            self.root
        } else {
            self.node(id).left
        }
    }

    pub(crate) fn right(&self, id: NodeId) -> Link {
        if id.is_sentinel() {
            None
        } else {
            self.node(id).right
        }
    }

    pub(crate) fn parent(&self, id: NodeId) -> Link {
        if id.is_sentinel() {
            None
        } else {
            Some(self.node(id).parent)
        }
    }

    pub(crate) fn set_left(&mut self, id: NodeId, link: Link) {
        if id.is_sentinel() {
            self.root = link;
        } else {
            self.node_mut(id).left = link;
        }
    }

    pub(crate) fn set_right(&mut self, id: NodeId, link: Link) {
        assert!(!id.is_sentinel(), "The sentinel never has a right child");
        self.node_mut(id).right = link;
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(id).parent = parent;
    }

    /// Points whichever slot of `parent` currently holds `old` at `new` instead.
    pub(crate) fn replace_child(&mut self, parent: NodeId, old: NodeId, new: Link) {
        if self.left(parent) == Some(old) {
            self.set_left(parent, new);
        } else {
            self.set_right(parent, new);
        }
        if let Some(new) = new {
            self.set_parent(new, parent);
        }
    }

    /// The leftmost descendant of `id`, or `id` itself when it has no left child.
    ///
    /// Because the root is the sentinel's left child, `minimum_of(SENTINEL)` is the smallest
    /// node of the whole tree (or the sentinel when the tree is empty).
    pub(crate) fn minimum_of(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.left(id) {
            id = left;
        }
        id
    }

    /// The rightmost descendant of `id`, or `id` itself when it has no right child.
    pub(crate) fn maximum_of(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.right(id) {
            id = right;
        }
        id
    }
}
