use bst_cursor::{Order, Tree};
use quickcheck_macros::quickcheck;

use std::collections::HashSet;

use crate::ORDERS;

#[quickcheck]
fn inorder_is_sorted(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.into_iter().collect();
    let values: Vec<_> = tree.iter().collect();

    values.windows(2).all(|w| w[0] <= w[1])
}

#[quickcheck]
fn size_tracks_inserts_and_deletes(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().collect();
    let mut expected = xs.len();
    if tree.len() != expected {
        return false;
    }

    for delete in &deletes {
        expected -= tree.erase_value(delete);
        if tree.len() != expected {
            return false;
        }
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        still_present.retain(|x| x != delete);
    }
    still_present.len() == expected
}

#[quickcheck]
fn begin_reaches_end_in_len_steps(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.into_iter().collect();

    ORDERS.iter().all(|&order| {
        let mut cursor = tree.begin(order);
        for _ in 0..tree.len() {
            if cursor.is_end() {
                return false;
            }
            cursor.move_next(&tree);
        }
        cursor == tree.end(order)
            && (tree.begin(order).predecessor(&tree) == tree.end(order))
    })
}

#[quickcheck]
fn reverse_cursor_round_trips(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.into_iter().collect();

    ORDERS.iter().all(|&order| {
        let mut cursor = tree.rbegin(order);
        while cursor != tree.rend(order) {
            let next = cursor.successor(&tree);
            if !next.is_end() && next.predecessor(&tree) != cursor {
                return false;
            }
            cursor = next;
        }
        true
    })
}

#[quickcheck]
fn insert_then_find(xs: Vec<i8>, x: i8) -> bool {
    let mut tree: Tree<i8> = xs.into_iter().collect();
    tree.insert(x);

    ORDERS
        .iter()
        .all(|&order| tree.find(&x, order).get(&tree) == Some(&x))
        && tree.contains(&x)
}

#[quickcheck]
fn delete_then_find(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.erase_value(delete);
    }

    let deleted: HashSet<_> = deletes.iter().collect();
    deletes
        .iter()
        .all(|x| ORDERS.iter().all(|&order| tree.find(x, order) == tree.end(order)))
        && xs
            .iter()
            .filter(|x| !deleted.contains(x))
            .all(|x| tree.contains(x))
}

#[quickcheck]
fn count_matches_occurrences(xs: Vec<i8>, x: i8) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();

    tree.count(&x) == xs.iter().filter(|y| **y == x).count()
}

#[quickcheck]
fn permutations_compare_equal(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let reversed: Tree<i8> = xs.iter().rev().copied().collect();
    let mut sorted = xs;
    sorted.sort_unstable();
    let sorted: Tree<i8> = sorted.into_iter().collect();

    tree == reversed && reversed == sorted
}

#[quickcheck]
fn equal_range_spans_every_occurrence(xs: Vec<i8>, x: i8) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let occurrences = xs.iter().filter(|y| **y == x).count();

    let (lower, upper) = tree.equal_range(&x, Order::Inorder);
    let inorder_ok = tree.range(lower, upper).filter(|y| **y == x).count() == occurrences
        && tree.range(lower, upper).all(|y| *y == x);

    // Outside in-order the range runs from the first occurrence to the last, possibly with
    // other values in between.
    let others_ok = [Order::Preorder, Order::Postorder].iter().all(|&order| {
        let (lower, upper) = tree.equal_range(&x, order);
        tree.range(lower, upper).filter(|y| **y == x).count() == occurrences
    });

    inorder_ok && others_ok
}

#[quickcheck]
fn erase_range_inorder_keeps_the_rest(xs: Vec<i8>, from: i8, to: i8) -> bool {
    let (from, to) = (from.min(to), from.max(to));
    let mut tree: Tree<i8> = xs.iter().copied().collect();

    let first = tree.lower_bound(&from, Order::Inorder);
    let last = tree.lower_bound(&to, Order::Inorder);
    let removed = tree.erase_range(first, last);

    let mut expected: Vec<_> = xs.iter().copied().filter(|x| *x < from || *x >= to).collect();
    expected.sort_unstable();
    removed == xs.len() - expected.len() && tree.iter().copied().eq(expected.into_iter())
}

#[quickcheck]
fn into_iter_drains_sorted(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let mut sorted = xs;
    sorted.sort_unstable();

    tree.into_iter().eq(sorted.into_iter())
}

#[test]
fn erase_middle_of_three() {
    let mut tree: Tree<i32> = [10, 20, 30].into_iter().collect();

    assert_eq!(tree.erase_value(&20), 1);
    assert!(tree.iter().copied().eq([10, 30]));
}

#[test]
fn swap_then_compare() {
    let mut first: Tree<i32> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
    let mut second: Tree<i32> = (1..=7).collect();

    first.swap(&mut second);
    assert_eq!(first, second);
    assert_eq!(second, first);
    assert!(first.iter_order(Order::Preorder).copied().eq(1..=7));
}

#[test]
fn extract_only_value() {
    let mut tree = Tree::new();
    tree.insert(5);

    assert_eq!(tree.extract_value(&5), Ok(5));
    assert!(tree.is_empty());
}
