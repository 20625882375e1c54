//! A recursive reference BST, used to check the pre- and post-order sequences produced by the
//! cursor engine for insert-only workloads.

use bst_cursor::{Order, Tree};
use quickcheck_macros::quickcheck;

use crate::ORDERS;

/// A naive owned BST with the same tie-break as `Tree`: equal values go right.
enum Model {
    Leaf,
    Node(Box<Model>, i8, Box<Model>),
}

impl Model {
    fn insert(self, value: i8) -> Self {
        match self {
            Model::Leaf => Model::Node(Box::new(Model::Leaf), value, Box::new(Model::Leaf)),
            Model::Node(left, v, right) if value < v => {
                Model::Node(Box::new(left.insert(value)), v, right)
            }
            Model::Node(left, v, right) => Model::Node(left, v, Box::new(right.insert(value))),
        }
    }

    fn walk(&self, order: Order, out: &mut Vec<i8>) {
        if let Model::Node(left, v, right) = self {
            if order == Order::Preorder {
                out.push(*v);
            }
            left.walk(order, out);
            if order == Order::Inorder {
                out.push(*v);
            }
            right.walk(order, out);
            if order == Order::Postorder {
                out.push(*v);
            }
        }
    }
}

#[quickcheck]
fn orders_match_recursive_walks(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let model = xs.iter().fold(Model::Leaf, |model, x| model.insert(*x));

    ORDERS.iter().all(|&order| {
        let mut expected = Vec::new();
        model.walk(order, &mut expected);
        tree.iter_order(order).copied().eq(expected.iter().copied())
    })
}

#[quickcheck]
fn reversed_orders_match_recursive_walks(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let model = xs.iter().fold(Model::Leaf, |model, x| model.insert(*x));

    ORDERS.iter().all(|&order| {
        let mut expected = Vec::new();
        model.walk(order, &mut expected);
        expected.reverse();

        let mut actual = Vec::new();
        let mut cursor = tree.rbegin(order);
        while cursor != tree.rend(order) {
            actual.push(*cursor.get(&tree).unwrap());
            cursor.move_next(&tree);
        }
        actual == expected
    })
}

#[test]
fn seven_node_example_orders() {
    let tree: Tree<i32> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();

    let collect = |order| tree.iter_order(order).copied().collect::<Vec<_>>();
    assert_eq!(collect(Order::Inorder), [1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(collect(Order::Preorder), [4, 2, 1, 3, 6, 5, 7]);
    assert_eq!(collect(Order::Postorder), [1, 3, 2, 5, 7, 6, 4]);
}
