use std::env;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Settings that shape how jobs and milestones are edited.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct EscrowPrefs {
    /// Days from today used as the default deadline of a new milestone draft.
    pub deadline_days: u32,

    /// Label shown next to milestone amounts (e.g. "ETH").
    pub amount_unit: String,

    /// How often the jobs list is refreshed, in seconds.
    pub refresh_secs: u64,
}

impl EscrowPrefs {
    pub const DEFAULT_DEADLINE_DAYS: u32 = 7;
    pub const DEFAULT_AMOUNT_UNIT: &'static str = "ETH";
    pub const DEFAULT_REFRESH_SECS: u64 = 30;

    /// Creates an EscrowPrefs instance from environment variables,
    /// falling back to the in-code defaults for anything unset or unparsable.
    ///
    /// # Environment Variables
    /// - `MILESTONE_DEADLINE_DAYS`: default deadline offset in days.
    /// - `AMOUNT_UNIT`: currency label for amounts.
    /// - `JOBS_REFRESH_SECS`: jobs list refresh interval. Zero is ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: FromStr>(raw: Option<String>) -> Option<T> {
            raw.and_then(|s| s.trim().parse().ok())
        }

        let deadline_days =
            parsed(lookup("MILESTONE_DEADLINE_DAYS")).unwrap_or(Self::DEFAULT_DEADLINE_DAYS);

        let amount_unit = lookup("AMOUNT_UNIT")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_AMOUNT_UNIT.to_string());

        let refresh_secs = parsed(lookup("JOBS_REFRESH_SECS"))
            .filter(|secs: &u64| *secs > 0)
            .unwrap_or(Self::DEFAULT_REFRESH_SECS);

        Self {
            deadline_days,
            amount_unit,
            refresh_secs,
        }
    }
}

impl Default for EscrowPrefs {
    fn default() -> Self {
        Self::from_env()
    }
}
