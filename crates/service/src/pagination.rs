//! List window utilities for service layer
//!
//! Turns raw list parameters into a validated `Window`: label filter,
//! recency cutoff and offset/limit.

use chrono::{DateTime, Duration, Utc};

use crate::errors::ServiceError;

pub const DEFAULT_MAX_AGE_MIN: i64 = 30;
pub const DEFAULT_LIMIT: u64 = 100;
pub const MAX_LIMIT: u64 = 100;
/// SQL backends bind offsets as signed 64-bit integers.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Ages are clamped to about a century either way, keeping the cutoff a
/// four-digit-year timestamp every backend compares correctly.
const AGE_BOUND_MIN: i64 = 100 * 366 * 24 * 60;

/// Raw list parameters as received from a caller
#[derive(Clone, Debug)]
pub struct ListQuery {
    pub label: Option<String>,
    /// rows older than this many minutes are skipped; negative means none qualify
    pub max_age_min: i64,
    pub offset: u64,
    pub limit: u64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self { label: None, max_age_min: DEFAULT_MAX_AGE_MIN, offset: 0, limit: DEFAULT_LIMIT }
    }
}

/// Normalized list window
#[derive(Clone, Debug, PartialEq)]
pub struct Window {
    pub label: Option<String>,
    /// only rows with `last_updated >= cutoff` qualify
    pub cutoff: DateTime<Utc>,
    pub offset: u64,
    pub limit: u64,
}

impl ListQuery {
    /// Validate against `MAX_LIMIT` and `MAX_OFFSET` and resolve the cutoff relative to `now`.
    pub fn normalize(self, now: DateTime<Utc>) -> Result<Window, ServiceError> {
        if self.limit > MAX_LIMIT {
            return Err(ServiceError::Validation(format!("limit must be less than or equal to {MAX_LIMIT}")));
        }
        if self.offset > MAX_OFFSET {
            return Err(ServiceError::Validation(format!("offset must be less than or equal to {MAX_OFFSET}")));
        }
        let age = self.max_age_min.clamp(-AGE_BOUND_MIN, AGE_BOUND_MIN);
        let cutoff = now - Duration::minutes(age);
        Ok(Window { label: self.label, cutoff, offset: self.offset, limit: self.limit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sane() {
        let d = ListQuery::default();
        assert_eq!(d.max_age_min, 30);
        assert_eq!(d.offset, 0);
        assert_eq!(d.limit, 100);
        assert!(d.label.is_none());
    }

    #[test]
    fn normalize_subtracts_age_from_now() {
        let now = Utc::now();
        let w = ListQuery::default().normalize(now).unwrap();
        assert_eq!(w.cutoff, now - Duration::minutes(30));
    }

    #[test]
    fn zero_age_cuts_at_now() {
        let now = Utc::now();
        let w = ListQuery { max_age_min: 0, ..ListQuery::default() }.normalize(now).unwrap();
        assert_eq!(w.cutoff, now);
    }

    #[test]
    fn limit_above_cap_is_rejected() {
        let err = ListQuery { limit: 101, ..ListQuery::default() }.normalize(Utc::now());
        assert!(matches!(err, Err(ServiceError::Validation(_))));
        assert!(ListQuery { limit: 100, ..ListQuery::default() }.normalize(Utc::now()).is_ok());
    }

    #[test]
    fn offset_beyond_signed_range_is_rejected() {
        let err = ListQuery { offset: u64::MAX, ..ListQuery::default() }.normalize(Utc::now());
        assert!(matches!(err, Err(ServiceError::Validation(_))));
        let w = ListQuery { offset: MAX_OFFSET, ..ListQuery::default() }.normalize(Utc::now()).unwrap();
        assert_eq!(w.offset, MAX_OFFSET);
    }

    #[test]
    fn huge_ages_are_clamped() {
        let now = Utc::now();
        let w = ListQuery { max_age_min: i64::MAX, ..ListQuery::default() }.normalize(now).unwrap();
        assert_eq!(w.cutoff, now - Duration::minutes(AGE_BOUND_MIN));
        let w = ListQuery { max_age_min: i64::MIN, ..ListQuery::default() }.normalize(now).unwrap();
        assert!(w.cutoff > now);
    }
}
