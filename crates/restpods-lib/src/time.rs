//! Time-zone normalization for report timestamps
//!
//! Cluster timestamps are absolute UTC instants. The report compares and prints
//! them as wall-clock times of a single reference zone with the offset removed.

use crate::error::ReportError;
use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Reference zone used when none is configured
pub const DEFAULT_TIME_ZONE: &str = "America/Sao_Paulo";

/// Converts UTC instants into naive wall-clock times of a fixed zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeNormalizer {
    zone: Tz,
}

impl TimeNormalizer {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    /// Create a normalizer from an IANA zone name such as `Europe/Berlin`
    pub fn from_name(name: &str) -> Result<Self, ReportError> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| ReportError::InvalidTimeZone(name.to_string()))
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Wall-clock time of `timestamp` in the reference zone, offset discarded
    pub fn normalize(&self, timestamp: DateTime<Utc>) -> NaiveDateTime {
        timestamp.with_timezone(&self.zone).naive_local()
    }

    /// Current instant, normalized the same way as report timestamps
    pub fn now(&self) -> NaiveDateTime {
        self.normalize(Utc::now())
    }
}

impl Default for TimeNormalizer {
    fn default() -> Self {
        Self::new(chrono_tz::America::Sao_Paulo)
    }
}
