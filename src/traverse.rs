//! Step rules for the three depth-first traversals.
//!
//! Every rule works purely on the parent/left/right links of a [`NodeStore`], so a single node
//! representation serves all orders. The sentinel closes each traversal into a ring:
//!
//! ```text
//! SENTINEL -> first -> ... -> last -> SENTINEL
//! ```
//!
//! with two exceptions that pin the ends of the ring in place: stepping forward from the sentinel
//! stays on the sentinel, while stepping backward from the sentinel lands on the last node. This
//! is what lets a reversed cursor start from `prev(end)`.

use crate::node::{NodeId, NodeStore};

/// A depth-first traversal order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Order {
    /// Left subtree, then node, then right subtree. Visits values in sorted order.
    #[default]
    Inorder,
    /// Node, then left subtree, then right subtree.
    Preorder,
    /// Left subtree, then right subtree, then node.
    Postorder,
}

/// All orders, handy for tests that must hold for each of them.
#[cfg(test)]
pub(crate) const ORDERS: [Order; 3] = [Order::Inorder, Order::Preorder, Order::Postorder];

/// The first node of `order`, or the sentinel when the tree is empty.
pub(crate) fn first<T>(store: &NodeStore<T>, order: Order) -> NodeId {
    match (order, store.root()) {
        (_, None) => NodeId::SENTINEL,
        (Order::Inorder, Some(root)) => store.minimum_of(root),
        (Order::Preorder, Some(root)) => root,
        (Order::Postorder, Some(root)) => postorder_first_of(store, root),
    }
}

/// The last node of `order`, or the sentinel when the tree is empty.
pub(crate) fn last<T>(store: &NodeStore<T>, order: Order) -> NodeId {
    match (order, store.root()) {
        (_, None) => NodeId::SENTINEL,
        (Order::Inorder, Some(root)) => store.maximum_of(root),
        (Order::Preorder, Some(root)) => preorder_last_of(store, root),
        (Order::Postorder, Some(root)) => root,
    }
}

/// The node visited after `id` in `order`.
pub(crate) fn next<T>(store: &NodeStore<T>, id: NodeId, order: Order) -> NodeId {
    match order {
        Order::Inorder => inorder_next(store, id),
        Order::Preorder => preorder_next(store, id),
        Order::Postorder => postorder_next(store, id),
    }
}

/// The node visited before `id` in `order`.
pub(crate) fn prev<T>(store: &NodeStore<T>, id: NodeId, order: Order) -> NodeId {
    match order {
        Order::Inorder => inorder_prev(store, id),
        Order::Preorder => preorder_prev(store, id),
        Order::Postorder => postorder_prev(store, id),
    }
}

/// The last node of the subtree rooted at `id` in pre-order: keep stepping right when possible,
/// left otherwise, until reaching a leaf.
pub(crate) fn preorder_last_of<T>(store: &NodeStore<T>, mut id: NodeId) -> NodeId {
    while let Some(child) = store.right(id).or_else(|| store.left(id)) {
        id = child;
    }
    id
}

/// The first node of the subtree rooted at `id` in post-order: keep stepping left when possible,
/// right otherwise, until reaching a leaf.
pub(crate) fn postorder_first_of<T>(store: &NodeStore<T>, mut id: NodeId) -> NodeId {
    while let Some(child) = store.left(id).or_else(|| store.right(id)) {
        id = child;
    }
    id
}

// The sentinel has no right child and no parent, so both in-order rules handle it without a
// special case: going forward it climbs nowhere and stays put, going backward it descends into
// the root's maximum.
fn inorder_next<T>(store: &NodeStore<T>, id: NodeId) -> NodeId {
    if let Some(right) = store.right(id) {
        return store.minimum_of(right);
    }
    let mut current = id;
    while let Some(parent) = store.parent(current) {
        if store.left(parent) == Some(current) {
            return parent;
        }
        current = parent;
    }
    NodeId::SENTINEL
}

fn inorder_prev<T>(store: &NodeStore<T>, id: NodeId) -> NodeId {
    if let Some(left) = store.left(id) {
        return store.maximum_of(left);
    }
    let mut current = id;
    while let Some(parent) = store.parent(current) {
        if store.right(parent) == Some(current) {
            return parent;
        }
        current = parent;
    }
    NodeId::SENTINEL
}

fn preorder_next<T>(store: &NodeStore<T>, id: NodeId) -> NodeId {
    // The sentinel's left child is the root, so without this guard the end would wrap around.
    if id.is_sentinel() {
        return id;
    }
    if let Some(child) = store.left(id).or_else(|| store.right(id)) {
        return child;
    }
    // Climb until we come up out of a left subtree whose parent still has a right side to visit.
    let mut current = id;
    while let Some(parent) = store.parent(current) {
        if store.left(parent) == Some(current) {
            if let Some(right) = store.right(parent) {
                return right;
            }
        }
        current = parent;
    }
    NodeId::SENTINEL
}

fn preorder_prev<T>(store: &NodeStore<T>, id: NodeId) -> NodeId {
    let Some(parent) = store.parent(id) else {
        // Only the sentinel has no parent.
        return last(store, Order::Preorder);
    };
    if store.left(parent) == Some(id) {
        return parent;
    }
    match store.left(parent) {
        Some(sibling) => preorder_last_of(store, sibling),
        None => parent,
    }
}

fn postorder_next<T>(store: &NodeStore<T>, id: NodeId) -> NodeId {
    let Some(parent) = store.parent(id) else {
        return NodeId::SENTINEL;
    };
    if store.left(parent) == Some(id) {
        if let Some(sibling) = store.right(parent) {
            return postorder_first_of(store, sibling);
        }
    }
    parent
}

fn postorder_prev<T>(store: &NodeStore<T>, id: NodeId) -> NodeId {
    if id.is_sentinel() {
        return last(store, Order::Postorder);
    }
    if let Some(child) = store.right(id).or_else(|| store.left(id)) {
        return child;
    }
    // Climb until we come up out of a right subtree whose parent has a left side visited before.
    let mut current = id;
    while let Some(parent) = store.parent(current) {
        if store.right(parent) == Some(current) {
            if let Some(left) = store.left(parent) {
                return left;
            }
        }
        current = parent;
    }
    NodeId::SENTINEL
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hooks `value` in below `parent` on the side given by `left`.
    fn attach(store: &mut NodeStore<i32>, parent: NodeId, left: bool, value: i32) -> NodeId {
        let id = store.allocate(value, parent);
        if left {
            store.set_left(parent, Some(id));
        } else {
            store.set_right(parent, Some(id));
        }
        id
    }

    /// Builds
    ///
    /// ```text
    ///        4
    ///      /   \
    ///     2     6
    ///    / \   / \
    ///   1   3 5   7
    /// ```
    fn full_tree() -> NodeStore<i32> {
        let mut store = NodeStore::new();
        let four = attach(&mut store, NodeId::SENTINEL, true, 4);
        let two = attach(&mut store, four, true, 2);
        let six = attach(&mut store, four, false, 6);
        attach(&mut store, two, true, 1);
        attach(&mut store, two, false, 3);
        attach(&mut store, six, true, 5);
        attach(&mut store, six, false, 7);
        store
    }

    /// Builds a lopsided tree whose extreme nodes have children on the "wrong" side:
    ///
    /// ```text
    ///       5
    ///      /
    ///     1
    ///      \
    ///       3
    ///      /
    ///     2
    /// ```
    fn zigzag_tree() -> NodeStore<i32> {
        let mut store = NodeStore::new();
        let five = attach(&mut store, NodeId::SENTINEL, true, 5);
        let one = attach(&mut store, five, true, 1);
        let three = attach(&mut store, one, false, 3);
        attach(&mut store, three, true, 2);
        store
    }

    fn walk_forward(store: &NodeStore<i32>, order: Order) -> Vec<i32> {
        let mut values = Vec::new();
        let mut id = first(store, order);
        while !id.is_sentinel() {
            values.push(*store.data(id));
            id = next(store, id, order);
        }
        values
    }

    fn walk_backward(store: &NodeStore<i32>, order: Order) -> Vec<i32> {
        let mut values = Vec::new();
        let mut id = prev(store, NodeId::SENTINEL, order);
        while !id.is_sentinel() {
            values.push(*store.data(id));
            id = prev(store, id, order);
        }
        values
    }

    #[test]
    fn full_tree_orders() {
        let store = full_tree();

        assert_eq!(walk_forward(&store, Order::Inorder), [1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(walk_forward(&store, Order::Preorder), [4, 2, 1, 3, 6, 5, 7]);
        assert_eq!(walk_forward(&store, Order::Postorder), [1, 3, 2, 5, 7, 6, 4]);
    }

    #[test]
    fn backward_walk_mirrors_forward_walk() {
        for store in [full_tree(), zigzag_tree()] {
            for order in ORDERS {
                let mut forward = walk_forward(&store, order);
                forward.reverse();
                assert_eq!(walk_backward(&store, order), forward, "{order:?}");
            }
        }
    }

    #[test]
    fn zigzag_orders() {
        let store = zigzag_tree();

        assert_eq!(walk_forward(&store, Order::Inorder), [1, 2, 3, 5]);
        assert_eq!(walk_forward(&store, Order::Preorder), [5, 1, 3, 2]);
        assert_eq!(walk_forward(&store, Order::Postorder), [2, 3, 1, 5]);
    }

    #[test]
    fn right_only_chain() {
        let mut store = NodeStore::new();
        let one = attach(&mut store, NodeId::SENTINEL, true, 1);
        let two = attach(&mut store, one, false, 2);
        attach(&mut store, two, false, 3);

        assert_eq!(walk_forward(&store, Order::Inorder), [1, 2, 3]);
        assert_eq!(walk_forward(&store, Order::Preorder), [1, 2, 3]);
        assert_eq!(walk_forward(&store, Order::Postorder), [3, 2, 1]);
        assert_eq!(walk_backward(&store, Order::Preorder), [3, 2, 1]);
    }

    #[test]
    fn boundaries() {
        let store = full_tree();

        for order in ORDERS {
            assert_eq!(next(&store, NodeId::SENTINEL, order), NodeId::SENTINEL);
            assert_eq!(prev(&store, first(&store, order), order), NodeId::SENTINEL);
            assert_eq!(next(&store, last(&store, order), order), NodeId::SENTINEL);
            assert_eq!(prev(&store, NodeId::SENTINEL, order), last(&store, order));
        }
    }

    #[test]
    fn empty_tree_boundaries() {
        let store = NodeStore::<i32>::new();

        for order in ORDERS {
            assert_eq!(first(&store, order), NodeId::SENTINEL);
            assert_eq!(last(&store, order), NodeId::SENTINEL);
            assert_eq!(next(&store, NodeId::SENTINEL, order), NodeId::SENTINEL);
            assert_eq!(prev(&store, NodeId::SENTINEL, order), NodeId::SENTINEL);
        }
    }

    #[test]
    fn single_node() {
        let mut store = NodeStore::new();
        let only = attach(&mut store, NodeId::SENTINEL, true, 42);

        for order in ORDERS {
            assert_eq!(first(&store, order), only);
            assert_eq!(prev(&store, NodeId::SENTINEL, order), only);
            assert_eq!(next(&store, only, order), NodeId::SENTINEL);
            assert_eq!(prev(&store, only, order), NodeId::SENTINEL);
        }
    }
}
