//! Link management service
//!
//! Orchestrates the code generator, the link store and the owner index:
//! create, resolve-and-consume, delete, limit edits, per-owner listing and
//! the expired-link sweep. All mutation goes through one exclusion scope
//! over the store/index pair, and every deletion path goes through the
//! shared cascading removal so the two indices never diverge.

use chrono::{Duration, Utc};
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::config::LinkConfig;
use crate::errors::{Result, ShortenerError};
use crate::services::policy;
use crate::storage::{LinkStore, OwnerId, OwnerIndex, ShortLink};
use crate::utils::generate_random_code;
use crate::utils::url::normalize_destination;

const CODE_SUFFIX_LENGTH: usize = 6;

/// Result of a successful resolution
#[derive(Debug, Clone)]
pub struct Resolved {
    pub destination: String,
    /// True when this resolution consumed the final click of the budget
    pub last_use: bool,
}

/// One entry of a per-owner listing
#[derive(Debug, Clone)]
pub struct ListedLink {
    pub link: ShortLink,
    /// Availability computed at read time
    pub available: bool,
}

/// Both indices behind a single lock, so check-then-mutate sequences are
/// observed as indivisible by concurrent callers.
#[derive(Debug, Default)]
struct Indexes {
    store: LinkStore,
    owners: OwnerIndex,
}

/// Service for the short-link lifecycle
pub struct LinkService {
    config: LinkConfig,
    inner: Mutex<Indexes>,
}

impl LinkService {
    pub fn new(config: LinkConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(Indexes::default()),
        }
    }

    /// Create a new short link.
    ///
    /// The destination is normalized to carry a scheme, the requested
    /// lifetime is capped at the configured maximum and the requested click
    /// limit is raised to the configured floor. The generated code is
    /// checked for collisions and inserted under the same lock, so two
    /// concurrent creates can never claim the same code.
    pub fn create(
        &self,
        owner: OwnerId,
        destination_url: &str,
        requested_hours: u32,
        requested_clicks: u32,
    ) -> ShortLink {
        let destination = normalize_destination(destination_url);
        let hours = policy::effective_ttl_hours(requested_hours, self.config.max_lifetime_hours);
        let click_limit =
            policy::effective_click_limit(requested_clicks, self.config.min_click_limit);

        let mut inner = self.inner.lock();

        let code = loop {
            let candidate = format!(
                "{}{}",
                self.config.domain,
                generate_random_code(CODE_SUFFIX_LENGTH)
            );
            if !inner.store.contains(&candidate) {
                break candidate;
            }
        };

        let now = Utc::now();
        let link = ShortLink {
            destination,
            code: code.clone(),
            owner,
            created_at: now,
            expires_at: now + Duration::hours(i64::from(hours)),
            click_limit,
            click_count: 0,
        };

        inner.store.insert(link.clone());
        inner.owners.add(owner, code);

        info!(
            "created '{}' -> '{}' (expires in {}h, click limit {})",
            link.code, link.destination, hours, click_limit
        );
        link
    }

    /// Resolve a code to its destination, consuming one click.
    ///
    /// A record found expired (by time or by count) is cascade-removed and
    /// reported as expired. Otherwise the click counter is incremented; the
    /// resolution that reaches the limit is still served, flagged as the
    /// last use, and the record is left for the next touch or sweep to
    /// evict.
    pub fn resolve(&self, code: &str) -> Result<Resolved> {
        let mut inner = self.inner.lock();
        let now = Utc::now();

        let link = match inner.store.get(code) {
            Some(link) => link.clone(),
            None => {
                return Err(ShortenerError::not_found(format!(
                    "link '{}' not found or already removed",
                    code
                )));
            }
        };

        if link.is_expired_by_time(now) {
            Self::remove_cascading(&mut inner, code);
            warn!("'{}' expired by time, removed", code);
            return Err(ShortenerError::expired_by_time(format!(
                "link '{}' has expired and was removed",
                code
            )));
        }

        if link.is_click_limit_reached() {
            Self::remove_cascading(&mut inner, code);
            warn!("'{}' exhausted its click budget, removed", code);
            return Err(ShortenerError::expired_by_count(format!(
                "link '{}' reached its click limit and was removed",
                code
            )));
        }

        let link = inner
            .store
            .get_mut(code)
            .expect("record checked above under the same lock");
        link.click_count += 1;
        let last_use = link.is_click_limit_reached();
        let destination = link.destination.clone();

        if last_use {
            warn!("'{}' served its final click, blocking further use", code);
        } else {
            info!(
                "resolved '{}' ({}/{} clicks)",
                code, link.click_count, link.click_limit
            );
        }

        Ok(Resolved {
            destination,
            last_use,
        })
    }

    /// Delete a link. Ownership is checked by exact equality of the stored
    /// owner identifier.
    pub fn delete(&self, code: &str, requesting_owner: OwnerId) -> Result<()> {
        let mut inner = self.inner.lock();

        let link = inner
            .store
            .get(code)
            .ok_or_else(|| ShortenerError::not_found(format!("link '{}' not found", code)))?;

        if link.owner != requesting_owner {
            return Err(ShortenerError::not_owner(format!(
                "you are not the owner of '{}'",
                code
            )));
        }

        Self::remove_cascading(&mut inner, code);
        info!("deleted '{}'", code);
        Ok(())
    }

    /// Edit a link's click limit, raising the request to the configured
    /// floor. A record found expired by either condition is cascade-removed
    /// and the call reports `AlreadyExpired` instead of editing.
    pub fn edit_click_limit(
        &self,
        code: &str,
        requesting_owner: OwnerId,
        requested_limit: u32,
    ) -> Result<u32> {
        let mut inner = self.inner.lock();
        let now = Utc::now();

        let link = inner
            .store
            .get(code)
            .ok_or_else(|| ShortenerError::not_found(format!("link '{}' not found", code)))?
            .clone();

        if link.owner != requesting_owner {
            return Err(ShortenerError::not_owner(format!(
                "you are not the owner of '{}'",
                code
            )));
        }

        if link.is_expired_by_time(now) {
            Self::remove_cascading(&mut inner, code);
            return Err(ShortenerError::already_expired(format!(
                "link '{}' already expired by time and was removed",
                code
            )));
        }

        if link.is_click_limit_reached() {
            Self::remove_cascading(&mut inner, code);
            return Err(ShortenerError::already_expired(format!(
                "link '{}' already reached its click limit and was removed",
                code
            )));
        }

        let new_limit =
            policy::effective_click_limit(requested_limit, self.config.min_click_limit);
        inner
            .store
            .get_mut(code)
            .expect("record checked above under the same lock")
            .click_limit = new_limit;

        info!("'{}' click limit set to {}", code, new_limit);
        Ok(new_limit)
    }

    /// List an owner's links in creation order.
    ///
    /// Time-expired entries are cascade-removed first; count-expired ones
    /// stay visible as unavailable until the next resolve or sweep touches
    /// them. Availability is computed at read time.
    pub fn list_for(&self, owner: OwnerId) -> Vec<ListedLink> {
        let mut inner = self.inner.lock();
        let now = Utc::now();

        let codes: Vec<String> = inner.owners.links_of(owner).to_vec();

        let mut listed = Vec::with_capacity(codes.len());
        for code in codes {
            let link = inner
                .store
                .get(&code)
                .unwrap_or_else(|| panic!("owner index out of sync for '{}'", code))
                .clone();

            if link.is_expired_by_time(now) {
                Self::remove_cascading(&mut inner, &code);
                continue;
            }

            let available = link.is_available(now);
            listed.push(ListedLink { link, available });
        }

        listed
    }

    /// Remove every record expired by either condition. Returns how many
    /// were removed.
    pub fn sweep(&self) -> usize {
        let mut inner = self.inner.lock();
        let now = Utc::now();

        let expired: Vec<String> = inner
            .store
            .iter()
            .filter(|link| link.is_expired_by_time(now) || link.is_click_limit_reached())
            .map(|link| link.code.clone())
            .collect();

        for code in &expired {
            Self::remove_cascading(&mut inner, code);
        }

        if !expired.is_empty() {
            info!("sweep removed {} expired link(s)", expired.len());
        }
        expired.len()
    }

    /// The single routine behind every deletion path: remove from the store
    /// by code, then drop the same code from the owner's collection. A
    /// no-op when the store entry is already gone; a store hit whose index
    /// entry is missing means the indices diverged, which must never happen.
    fn remove_cascading(inner: &mut Indexes, code: &str) {
        if let Some(link) = inner.store.remove(code) {
            let removed = inner.owners.remove(link.owner, code);
            assert!(removed, "owner index out of sync for '{}'", code);
        }
    }
}
