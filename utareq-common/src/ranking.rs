//! Ranking period selection and time-bucket keys
//!
//! Like counters are kept in three places: an all-time counter per song and
//! two time-bucketed mirrors keyed by `YYYY-MM` (monthly) and `YYYY`
//! (yearly). The period selects which one a ranking query reads.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Aggregation window for like rankings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingPeriod {
    All,
    Month,
    Year,
}

impl RankingPeriod {
    /// Parse the `period` query parameter; missing/empty defaults to all-time
    pub fn parse(value: Option<&str>) -> Result<Self> {
        match value.unwrap_or("all") {
            "" | "all" => Ok(RankingPeriod::All),
            "month" => Ok(RankingPeriod::Month),
            "year" => Ok(RankingPeriod::Year),
            other => Err(Error::InvalidInput(format!(
                "Unknown ranking period: {}",
                other
            ))),
        }
    }

    /// Bucket document key for this period at the given instant.
    /// All-time has no bucket.
    pub fn bucket_key(&self, now: DateTime<Utc>) -> Option<String> {
        match self {
            RankingPeriod::All => None,
            RankingPeriod::Month => Some(month_key(now)),
            RankingPeriod::Year => Some(year_key(now)),
        }
    }
}

/// `YYYY-MM` bucket key (zero-padded month)
pub fn month_key(now: DateTime<Utc>) -> String {
    format!("{:04}-{:02}", now.year(), now.month())
}

/// `YYYY` bucket key
pub fn year_key(now: DateTime<Utc>) -> String {
    format!("{:04}", now.year())
}
