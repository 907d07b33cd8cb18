//! Lifecycle policy
//!
//! Pure decisions combining a caller's request with configured bounds.
//! Note the asymmetry: the configured lifetime is a ceiling (min of the
//! two), the configured click limit is a floor (max of the two). Both
//! directions are intentional and must stay as they are.

/// Effective link lifetime in hours: the request capped at the configured
/// maximum.
pub fn effective_ttl_hours(requested_hours: u32, configured_max_hours: u32) -> u32 {
    requested_hours.min(configured_max_hours)
}

/// Effective click limit: the request raised to the configured floor.
/// Requests above the floor are honored as-is.
pub fn effective_click_limit(requested_limit: u32, configured_min_limit: u32) -> u32 {
    requested_limit.max(configured_min_limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_is_capped() {
        assert_eq!(effective_ttl_hours(100, 24), 24);
        assert_eq!(effective_ttl_hours(24, 24), 24);
    }

    #[test]
    fn test_ttl_honors_low_requests() {
        assert_eq!(effective_ttl_hours(1, 24), 1);
        assert_eq!(effective_ttl_hours(0, 24), 0);
    }

    #[test]
    fn test_click_limit_is_floored() {
        assert_eq!(effective_click_limit(1, 5), 5);
        assert_eq!(effective_click_limit(5, 5), 5);
    }

    #[test]
    fn test_click_limit_honors_generous_requests() {
        assert_eq!(effective_click_limit(10, 5), 10);
        assert_eq!(effective_click_limit(1000, 5), 1000);
    }
}
