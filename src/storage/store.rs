use std::collections::HashMap;

use super::link::ShortLink;

/// Authoritative mapping from short code to link record.
///
/// Single source of truth for existence and mutation; the owner index only
/// holds code references into this map. Callers needing index consistency
/// must pair removals here with the owner-index cleanup (the service does
/// this through one cascading routine).
#[derive(Debug, Default)]
pub struct LinkStore {
    links: HashMap<String, ShortLink>,
}

impl LinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites by code. The caller guarantees uniqueness was
    /// already resolved by the generator.
    pub fn insert(&mut self, link: ShortLink) {
        self.links.insert(link.code.clone(), link);
    }

    pub fn get(&self, code: &str) -> Option<&ShortLink> {
        self.links.get(code)
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut ShortLink> {
        self.links.get_mut(code)
    }

    /// Deletes from this store only, returning the removed record.
    pub fn remove(&mut self, code: &str) -> Option<ShortLink> {
        self.links.remove(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.links.contains_key(code)
    }

    /// Snapshot of all live codes, for the sweep scan.
    pub fn codes(&self) -> Vec<String> {
        self.links.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShortLink> {
        self.links.values()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::link::OwnerId;
    use chrono::{Duration, Utc};

    fn link_with_code(code: &str) -> ShortLink {
        let now = Utc::now();
        ShortLink {
            destination: "https://example.com".to_string(),
            code: code.to_string(),
            owner: OwnerId::generate(),
            created_at: now,
            expires_at: now + Duration::hours(1),
            click_limit: 5,
            click_count: 0,
        }
    }

    #[test]
    fn test_insert_get_remove() {
        let mut store = LinkStore::new();
        store.insert(link_with_code("test.ru/abc123"));

        assert!(store.contains("test.ru/abc123"));
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("test.ru/abc123").unwrap().destination,
            "https://example.com"
        );

        let removed = store.remove("test.ru/abc123").unwrap();
        assert_eq!(removed.code, "test.ru/abc123");
        assert!(store.is_empty());
        assert!(store.remove("test.ru/abc123").is_none());
    }

    #[test]
    fn test_removed_code_is_immediately_reusable() {
        let mut store = LinkStore::new();
        store.insert(link_with_code("test.ru/abc123"));
        store.remove("test.ru/abc123");

        store.insert(link_with_code("test.ru/abc123"));
        assert!(store.contains("test.ru/abc123"));
    }

    #[test]
    fn test_get_mut_edits_in_place() {
        let mut store = LinkStore::new();
        store.insert(link_with_code("test.ru/abc123"));

        store.get_mut("test.ru/abc123").unwrap().click_count += 1;
        assert_eq!(store.get("test.ru/abc123").unwrap().click_count, 1);
    }

    #[test]
    fn test_codes_snapshot() {
        let mut store = LinkStore::new();
        store.insert(link_with_code("test.ru/aaa111"));
        store.insert(link_with_code("test.ru/bbb222"));

        let mut codes = store.codes();
        codes.sort();
        assert_eq!(codes, vec!["test.ru/aaa111", "test.ru/bbb222"]);
    }
}
