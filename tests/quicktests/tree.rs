use linked_bst::{Error, Tree};

use std::collections::HashSet;

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();

        xs.iter().all(|x| tree.find(x) == Some(x))
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.find(x).is_none())
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        let mut still_present = xs;

        for delete in &deletes {
            // We may have inserted the same value multiple times - delete each one.
            while let Some(pos) = still_present.iter().position(|x| x == delete) {
                still_present.swap_remove(pos);
                assert_eq!(tree.delete(delete), Ok(*delete));
            }
            assert_eq!(tree.delete(delete), Err(Error::NotFound));
        }

        tree.len() == still_present.len()
            && deletes.iter().all(|x| tree.find(x).is_none())
            && still_present.iter().all(|x| tree.find(x).is_some())
    }
}

quickcheck::quickcheck! {
    fn inorder_is_sorted_after_any_history(xs: Vec<i16>, deletes: Vec<i16>, rebalance: bool) -> bool {
        let mut tree: Tree<_> = xs.into_iter().collect();
        for delete in &deletes {
            let _ = tree.delete(delete);
        }
        if rebalance {
            tree.rebalance();
        }

        let values: Vec<_> = tree.inorder().collect();
        values.len() == tree.len() && values.windows(2).all(|w| w[0] <= w[1])
    }
}

quickcheck::quickcheck! {
    fn rebalance_keeps_values(xs: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        tree.rebalance();

        let mut expected = xs;
        expected.sort_unstable();
        tree.into_sorted_vec() == expected
    }
}

quickcheck::quickcheck! {
    fn range_is_exact(xs: Vec<i8>, deletes: Vec<i8>, a: i8, b: i8) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        let mut still_present = xs;

        // Two-children deletes can leave a value equal to a node on its left, which the range
        // bounds have to keep finding.
        for delete in &deletes {
            match still_present.iter().position(|x| x == delete) {
                Some(pos) => {
                    still_present.swap_remove(pos);
                    assert_eq!(tree.delete(delete), Ok(*delete));
                }
                None => assert_eq!(tree.delete(delete), Err(Error::NotFound)),
            }
        }

        let (low, high) = (a.min(b), a.max(b));
        let mut expected: Vec<_> = still_present
            .iter()
            .filter(|x| (low..=high).contains(*x))
            .collect();
        expected.sort_unstable();
        tree.range(&low, &high) == expected
    }
}
