//! Fresh identifier allocation for synthesized locals.
//!
//! One allocator is created per generated method body and seeded with every name already visible in that body
//! (parameters, import aliases, type parameters), so receivers and temporaries never shadow them.

use std::collections::HashSet;

/// Mints identifiers that do not collide with anything already taken.
#[derive(Debug, Clone, Default)]
pub struct IdentifierAllocator {
    taken: HashSet<String>,
}

impl IdentifierAllocator {
    /// Create an allocator with `taken` already reserved.
    pub fn new<I, S>(taken: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: taken.into_iter().map(Into::into).collect(),
        }
    }

    /// Reserve additional names without allocating them.
    pub fn reserve<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.taken.extend(names.into_iter().map(Into::into));
    }

    /// Return `want` if it is free, otherwise `want_2`, `want_3`, ...; the result is reserved.
    pub fn allocate(&mut self, want: &str) -> String {
        let mut id = want.to_string();
        let mut suffix = 2usize;
        while self.taken.contains(&id) {
            id = format!("{want}_{suffix}");
            suffix += 1;
        }
        self.taken.insert(id.clone());
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_name_returned_unchanged() {
        let mut ia = IdentifierAllocator::new(["a", "b"]);
        assert_eq!(ia.allocate("m"), "m");
        assert_eq!(ia.allocate("m"), "m_2");
    }

    #[test]
    fn test_collision_gets_numeric_suffix_from_two() {
        let mut ia = IdentifierAllocator::new(["m"]);
        assert_eq!(ia.allocate("m"), "m_2");
        assert_eq!(ia.allocate("m"), "m_3");
    }

    #[test]
    fn test_suffixed_name_already_taken_is_skipped() {
        let mut ia = IdentifierAllocator::new(["ret", "ret_2"]);
        assert_eq!(ia.allocate("ret"), "ret_3");
    }

    #[test]
    fn test_reserve() {
        let mut ia = IdentifierAllocator::default();
        ia.reserve(["gomock"]);
        assert_eq!(ia.allocate("gomock"), "gomock_2");
    }

    #[test]
    fn test_allocations_are_pairwise_distinct() {
        let mut ia = IdentifierAllocator::new(["a", "varargs"]);
        let ids = [
            ia.allocate("m"),
            ia.allocate("varargs"),
            ia.allocate("a"),
            ia.allocate("ret"),
            ia.allocate("ret0"),
        ];
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(!ids.contains(&"a".to_string()));
    }
}
