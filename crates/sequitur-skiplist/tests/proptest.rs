//! Property-based tests checking the skip list against a sorted-Vec model.

use proptest::prelude::*;
use sequitur_skiplist::SkipList;

#[derive(Debug, Clone)]
enum Op {
    Insert(i8),
    Remove(i8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // i8 keys keep duplicates frequent.
    prop_oneof![
        any::<i8>().prop_map(Op::Insert),
        any::<i8>().prop_map(Op::Remove),
    ]
}

proptest! {
    /// After any interleaving of inserts and removals the traversal equals a
    /// stable sort of the surviving multiset, and the length equals inserts
    /// minus successful removals.
    #[test]
    fn matches_sorted_vec_model(ops in prop::collection::vec(op_strategy(), 0..300)) {
        let mut list = SkipList::new();
        let mut model: Vec<i8> = Vec::new();
        let mut inserts = 0usize;
        let mut removals = 0usize;

        for op in ops {
            match op {
                Op::Insert(v) => {
                    list.insert(v);
                    let at = model.partition_point(|x| *x <= v);
                    model.insert(at, v);
                    inserts += 1;
                }
                Op::Remove(v) => {
                    let found = list.remove(&v);
                    let model_found = model.iter().position(|x| *x == v);
                    prop_assert_eq!(found, model_found.is_some());
                    if let Some(at) = model_found {
                        model.remove(at);
                        removals += 1;
                    }
                }
            }
        }

        prop_assert_eq!(list.len(), inserts - removals);
        prop_assert_eq!(list.to_vec(), model);
        prop_assert!(list.to_vec().windows(2).all(|w| w[0] <= w[1]));
    }

    /// Contains agrees with the model after bulk insertion.
    #[test]
    fn contains_agrees_with_model(values in prop::collection::vec(any::<i8>(), 0..200)) {
        let list: SkipList<i8> = values.iter().copied().collect();
        for probe in i8::MIN..i8::MAX {
            prop_assert_eq!(list.contains(&probe), values.contains(&probe));
        }
    }

    /// Traversal is always a permutation of the inserted values.
    #[test]
    fn traversal_is_a_permutation(values in prop::collection::vec(any::<i32>(), 0..200)) {
        let list: SkipList<i32> = values.iter().copied().collect();
        let mut out = list.to_vec();
        let mut expected = values;
        out.sort();
        expected.sort();
        prop_assert_eq!(out, expected);
    }
}
