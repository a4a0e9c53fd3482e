// Author: Dustin Pilgrim
// License: MIT

/// A tree node that can be matched against a sibling and absorb it.
pub trait Mergeable: Sized {
    /// Whether `other` describes the same entry as `self`.
    fn matches(&self, other: &Self) -> bool;

    /// Fold `other` into `self`. Implementations recurse into their
    /// children with [`merge_lists`].
    fn merge_from(&mut self, other: Self);
}

/// Merge `source` into `target`.
///
/// Every item of `source` is folded into the first matching item of
/// `target`, or appended when nothing matches. Existing entries keep their
/// position; new ones land at the end.
pub fn merge_lists<T: Mergeable>(target: &mut Vec<T>, source: Vec<T>) {
    for item in source {
        match target.iter_mut().find(|existing| existing.matches(&item)) {
            Some(existing) => existing.merge_from(item),
            None => target.push(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Named {
        name: &'static str,
        hits: u32,
        children: Vec<Named>,
    }

    fn named(name: &'static str, children: Vec<Named>) -> Named {
        Named { name, hits: 1, children }
    }

    impl Mergeable for Named {
        fn matches(&self, other: &Self) -> bool {
            self.name == other.name
        }

        fn merge_from(&mut self, other: Self) {
            self.hits += other.hits;
            merge_lists(&mut self.children, other.children);
        }
    }

    #[test]
    fn test_merge_appends_new_and_recurses_into_existing() {
        let mut target = vec![
            named("a", vec![named("x", vec![])]),
            named("b", vec![]),
        ];
        let source = vec![
            named("c", vec![]),
            named("a", vec![named("y", vec![]), named("x", vec![])]),
        ];

        merge_lists(&mut target, source);

        let names: Vec<_> = target.iter().map(|n| n.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        let a = &target[0];
        assert_eq!(a.hits, 2);
        let child_names: Vec<_> = a.children.iter().map(|n| n.name).collect();
        assert_eq!(child_names, vec!["x", "y"]);
        assert_eq!(a.children[0].hits, 2);
    }

    #[test]
    fn test_merge_first_match_wins() {
        let mut target = vec![named("a", vec![]), named("a", vec![])];
        merge_lists(&mut target, vec![named("a", vec![])]);

        assert_eq!(target.len(), 2);
        assert_eq!(target[0].hits, 2);
        assert_eq!(target[1].hits, 1);
    }

    #[test]
    fn test_merge_into_empty_target() {
        let mut target: Vec<Named> = Vec::new();
        merge_lists(&mut target, vec![named("a", vec![]), named("b", vec![])]);
        assert_eq!(target.len(), 2);
    }
}
