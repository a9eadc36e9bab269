//! Inclusive calendar date ranges for leave requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Parses an ISO-8601 calendar date (`YYYY-MM-DD`) supplied for `field`.
///
/// # Examples
///
/// ```
/// use leave_engine::models::parse_date;
/// use chrono::NaiveDate;
///
/// let date = parse_date("start_date", "2024-03-01").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// assert!(parse_date("start_date", "2024-02-30").is_err());
/// ```
pub fn parse_date(field: &str, raw: &str) -> EngineResult<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(EngineError::validation(format!("{} must not be empty", field)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        EngineError::validation(format!(
            "{} must be a calendar date in YYYY-MM-DD format, got '{}'",
            field, raw
        ))
    })
}

/// An inclusive range of calendar days, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl LeavePeriod {
    /// Creates a period, rejecting ranges whose end precedes their start.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::LeavePeriod;
    /// use chrono::NaiveDate;
    ///
    /// let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
    /// let period = LeavePeriod::new(d(1), d(5)).unwrap();
    /// assert_eq!(period.days(), 5);
    /// assert!(LeavePeriod::new(d(5), d(1)).is_err());
    /// ```
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if start > end {
            return Err(EngineError::validation(format!(
                "End date {} must not be before start date {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Builds a period from two dates in either order.
    pub(crate) fn ordered(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// First day of the period.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the period.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Returns true if the two periods share at least one calendar day.
    pub fn overlaps(&self, other: &LeavePeriod) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}
