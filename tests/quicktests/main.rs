//! Property tests exercising the public API against simple reference models.

mod shape;
mod tree;

use bst_cursor::Order;

/// Every traversal order, in the order they're usually listed.
const ORDERS: [Order; 3] = [Order::Inorder, Order::Preorder, Order::Postorder];
