use petgraph::unionfind::UnionFind;
use std::collections::HashMap;
use std::hash::Hash;

/// Build a mapping from elements of the given slice to their respective indices.
///
/// **Warning:** Duplicates are not detected or handled in any way, they are just overwritten.
pub fn build_index_map<T, F, R>(keys: &[T], transform_index: F) -> HashMap<T, R>
where
    F: Fn(&T, usize) -> R,
    T: Clone + Hash + PartialEq + Eq,
{
    let mut result = HashMap::new();
    for (i, item) in keys.iter().enumerate() {
        result.insert(item.clone(), transform_index(item, i));
    }
    result
}

/// Split the elements `0..len` of `sets` into their equivalence classes.
///
/// Classes are ordered by their smallest element and every class is sorted, so the result
/// only depends on the partition, not on the order of unions.
pub fn union_find_classes(sets: &UnionFind<usize>, len: usize) -> Vec<Vec<usize>> {
    let mut by_root: HashMap<usize, usize> = HashMap::new();
    let mut result: Vec<Vec<usize>> = Vec::new();
    for element in 0..len {
        let root = sets.find(element);
        let class = *by_root.entry(root).or_insert_with(|| {
            result.push(Vec::new());
            result.len() - 1
        });
        result[class].push(element);
    }
    result
}

#[cfg(test)]
mod tests {
    use crate::util::{build_index_map, union_find_classes};
    use petgraph::unionfind::UnionFind;

    #[test]
    fn index_map() {
        let map = build_index_map(&["a", "b", "c"], |_, i| i * 2);
        assert_eq!(Some(&4), map.get("c"));
        assert_eq!(3, map.len());
    }

    #[test]
    fn union_find_partition() {
        let mut sets = UnionFind::new(6);
        sets.union(4, 1);
        sets.union(2, 5);
        sets.union(5, 4);
        assert!(sets.equiv(1, 2));
        assert!(!sets.equiv(0, 3));
        assert_eq!(
            vec![vec![0], vec![1, 2, 4, 5], vec![3]],
            union_find_classes(&sets, 6)
        );

        // Repeated unions do not change the partition.
        assert!(!sets.union(2, 4));
        assert_eq!(3, union_find_classes(&sets, 6).len());
        assert!(union_find_classes(&sets, 0).is_empty());
    }

    #[test]
    fn union_find_growth() {
        let mut sets: UnionFind<usize> = UnionFind::new_empty();
        for i in 0..100 {
            assert_eq!(i, sets.new_set());
        }
        for i in 1..100 {
            sets.union(i - 1, i);
        }
        assert_eq!(vec![(0..100).collect::<Vec<_>>()], union_find_classes(&sets, 100));
    }
}
