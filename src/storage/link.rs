use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::{Result, ShortenerError};

/// Opaque identifier denoting who may mutate or delete a link.
///
/// Either supplied by the caller as a UUID-formatted string or generated
/// fresh. Malformed input is rejected rather than silently replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(Uuid);

impl OwnerId {
    pub fn generate() -> Self {
        OwnerId(Uuid::new_v4())
    }

    pub fn parse(input: &str) -> Result<Self> {
        let uuid = Uuid::parse_str(input.trim()).map_err(|e| {
            ShortenerError::invalid_owner_id(format!("'{}' is not a valid UUID: {}", input, e))
        })?;
        Ok(OwnerId(uuid))
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One shortened URL record
#[derive(Debug, Clone)]
pub struct ShortLink {
    /// Destination URL, normalized to carry an explicit scheme
    pub destination: String,
    /// Short code: domain prefix + random suffix, unique among live records
    pub code: String,
    pub owner: OwnerId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Upper bound on successful resolutions, owner-editable while active
    pub click_limit: u32,
    /// Incremented exactly once per successful resolution
    pub click_count: u32,
}

impl ShortLink {
    pub fn is_expired_by_time(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Reaching the limit is the eviction trigger, not a clipped bound:
    /// the resolution that hits the limit is still served.
    pub fn is_click_limit_reached(&self) -> bool {
        self.click_count >= self.click_limit
    }

    pub fn is_available(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired_by_time(now) && !self.is_click_limit_reached()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_link(expires_in_hours: i64, click_limit: u32, click_count: u32) -> ShortLink {
        let now = Utc::now();
        ShortLink {
            destination: "https://example.com".to_string(),
            code: "test.ru/AbCdE1".to_string(),
            owner: OwnerId::generate(),
            created_at: now,
            expires_at: now + Duration::hours(expires_in_hours),
            click_limit,
            click_count,
        }
    }

    #[test]
    fn test_fresh_link_is_available() {
        let link = sample_link(1, 5, 0);
        let now = Utc::now();
        assert!(!link.is_expired_by_time(now));
        assert!(!link.is_click_limit_reached());
        assert!(link.is_available(now));
    }

    #[test]
    fn test_time_expiry_is_strictly_after() {
        let link = sample_link(1, 5, 0);
        assert!(!link.is_expired_by_time(link.expires_at));
        assert!(link.is_expired_by_time(link.expires_at + Duration::nanoseconds(1)));
    }

    #[test]
    fn test_click_limit_reached_at_limit() {
        let link = sample_link(1, 5, 5);
        assert!(link.is_click_limit_reached());
        assert!(!link.is_available(Utc::now()));

        let under = sample_link(1, 5, 4);
        assert!(!under.is_click_limit_reached());
    }

    #[test]
    fn test_owner_id_parse_roundtrip() {
        let owner = OwnerId::generate();
        let parsed = OwnerId::parse(&owner.to_string()).unwrap();
        assert_eq!(owner, parsed);
    }

    #[test]
    fn test_owner_id_parse_rejects_malformed() {
        let err = OwnerId::parse("not-a-uuid").unwrap_err();
        assert!(matches!(
            err,
            crate::errors::ShortenerError::InvalidOwnerId(_)
        ));
    }

    #[test]
    fn test_owner_id_parse_trims_whitespace() {
        let owner = OwnerId::generate();
        let parsed = OwnerId::parse(&format!("  {}  ", owner)).unwrap();
        assert_eq!(owner, parsed);
    }
}
