//! # Report Types
//!
//! Windows and result shapes for the sales summary.
//!
//! A window is a span of whole UTC calendar days. It resolves to a half-open
//! timestamp range so the store can compare `created_at` against two bounds:
//!
//! ```text
//! Range { start: 2026-10-01, end: 2026-10-03 }
//!   → [2026-10-01T00:00:00Z, 2026-10-04T00:00:00Z)
//! ```

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::ValidationResult;

/// Which days a sales summary covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportWindow {
    /// The current UTC calendar day.
    Today,
    /// Inclusive on both ends.
    Range { start: NaiveDate, end: NaiveDate },
}

impl ReportWindow {
    /// Builds a range window, rejecting `start > end`.
    pub fn range(start: NaiveDate, end: NaiveDate) -> ValidationResult<Self> {
        if start > end {
            return Err(ValidationError::InvalidFormat {
                field: "start_date".to_string(),
                reason: format!("{start} is after end_date {end}"),
            });
        }
        Ok(ReportWindow::Range { start, end })
    }

    /// Parses `YYYY-MM-DD` bounds, as sent in query strings.
    pub fn parse_range(start: &str, end: &str) -> ValidationResult<Self> {
        let parse = |field: &str, value: &str| {
            NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
                ValidationError::InvalidFormat {
                    field: field.to_string(),
                    reason: "expected YYYY-MM-DD".to_string(),
                }
            })
        };
        Self::range(parse("start_date", start)?, parse("end_date", end)?)
    }

    /// Resolves to `[from, until)` given the current instant.
    pub fn bounds(&self, now: DateTime<Utc>) -> ValidationResult<(DateTime<Utc>, DateTime<Utc>)> {
        let (first, last) = match *self {
            ReportWindow::Today => {
                let today = now.date_naive();
                (today, today)
            }
            ReportWindow::Range { start, end } => (start, end),
        };

        let after_last = last
            .checked_add_days(Days::new(1))
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "end_date".to_string(),
                reason: "date is out of range".to_string(),
            })?;

        Ok((start_of_day(first), start_of_day(after_last)))
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::default()).and_utc()
}

/// The product with the highest summed quantity in a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BestSellingProduct {
    pub product_id: i64,
    pub name: String,
    pub quantity_sold: i64,
}

/// Aggregate of committed transactions in a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_revenue_cents: i64,
    pub total_transactions: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_selling_product: Option<BestSellingProduct>,
}

impl SalesSummary {
    pub const fn empty() -> Self {
        Self {
            total_revenue_cents: 0,
            total_transactions: 0,
            best_selling_product: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_today_bounds_cover_the_utc_day() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 15, 30, 0).unwrap();
        let (from, until) = ReportWindow::Today.bounds(now).unwrap();
        assert_eq!(from, Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap());
        assert_eq!(until, Utc.with_ymd_and_hms(2026, 10, 20, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_range_is_inclusive_of_end_date() {
        let window = ReportWindow::range(date(2026, 10, 1), date(2026, 10, 3)).unwrap();
        let (from, until) = window.bounds(Utc::now()).unwrap();
        assert_eq!(from, Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap());
        assert_eq!(until, Utc.with_ymd_and_hms(2026, 10, 4, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_single_day_range() {
        assert!(ReportWindow::range(date(2026, 1, 1), date(2026, 1, 1)).is_ok());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        assert!(ReportWindow::range(date(2026, 10, 3), date(2026, 10, 1)).is_err());
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(
            ReportWindow::parse_range("2026-10-01", "2026-10-31").unwrap(),
            ReportWindow::Range {
                start: date(2026, 10, 1),
                end: date(2026, 10, 31)
            }
        );
        assert!(ReportWindow::parse_range("10/01/2026", "2026-10-31").is_err());
        assert!(ReportWindow::parse_range("2026-10-01", "").is_err());
    }

    #[test]
    fn test_empty_summary_omits_best_seller() {
        let json = serde_json::to_value(SalesSummary::empty()).unwrap();
        assert_eq!(json["total_revenue_cents"], 0);
        assert!(json.get("best_selling_product").is_none());
    }
}
