use std::collections::HashMap;

use super::link::OwnerId;

/// Secondary mapping from owner to the codes of the links they created.
///
/// Holds code references only; the records themselves live in `LinkStore`.
/// Kept consistent with the store by the service's cascading removal.
#[derive(Debug, Default)]
pub struct OwnerIndex {
    owner_links: HashMap<OwnerId, Vec<String>>,
}

impl OwnerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the owner's codes in insertion order. A first access for an
    /// unseen owner vivifies an empty collection that is retained.
    pub fn links_of(&mut self, owner: OwnerId) -> &[String] {
        self.owner_links.entry(owner).or_default()
    }

    pub fn add(&mut self, owner: OwnerId, code: String) {
        self.owner_links.entry(owner).or_default().push(code);
    }

    /// Removes a code from the owner's collection by exact code match.
    /// Returns whether the code was present.
    pub fn remove(&mut self, owner: OwnerId, code: &str) -> bool {
        match self.owner_links.get_mut(&owner) {
            Some(codes) => match codes.iter().position(|c| c == code) {
                Some(pos) => {
                    codes.remove(pos);
                    true
                }
                None => false,
            },
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_of_vivifies_empty() {
        let mut index = OwnerIndex::new();
        let owner = OwnerId::generate();
        assert!(index.links_of(owner).is_empty());
        // the empty collection is retained
        assert_eq!(index.owner_links.len(), 1);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut index = OwnerIndex::new();
        let owner = OwnerId::generate();
        index.add(owner, "test.ru/aaa111".to_string());
        index.add(owner, "test.ru/bbb222".to_string());
        assert_eq!(index.links_of(owner), ["test.ru/aaa111", "test.ru/bbb222"]);
    }

    #[test]
    fn test_remove_by_code() {
        let mut index = OwnerIndex::new();
        let owner = OwnerId::generate();
        index.add(owner, "test.ru/aaa111".to_string());
        index.add(owner, "test.ru/bbb222".to_string());

        assert!(index.remove(owner, "test.ru/aaa111"));
        assert_eq!(index.links_of(owner), ["test.ru/bbb222"]);

        assert!(!index.remove(owner, "test.ru/aaa111"));
        assert!(!index.remove(OwnerId::generate(), "test.ru/bbb222"));
    }

    #[test]
    fn test_owners_are_isolated() {
        let mut index = OwnerIndex::new();
        let first = OwnerId::generate();
        let second = OwnerId::generate();
        index.add(first, "test.ru/aaa111".to_string());

        assert!(index.links_of(second).is_empty());
        assert_eq!(index.links_of(first).len(), 1);
    }
}
