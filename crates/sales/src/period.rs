//! Report period normalization.
//!
//! The report endpoint accepts two month/year boundaries that may be
//! out of range or reversed. Normalization never rejects: years outside
//! `[min_report_year(), current year]` fall back to the matching boundary
//! (minimum year for the start, current year for the end), and a reversed
//! range is swapped.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Raw report boundaries as supplied by the caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReportPeriod {
    pub start_month: u32,
    pub start_year: i32,
    pub end_month: u32,
    pub end_year: i32,
}

impl ReportPeriod {
    /// Month defaults applied upstream when a boundary month is omitted.
    pub const DEFAULT_START_MONTH: u32 = 1;
    pub const DEFAULT_END_MONTH: u32 = 12;

    /// Resolve the raw boundaries into a well-ordered, clamped UTC range.
    pub fn normalize(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let current_year = now.year();
        let min_year = min_report_year();

        let start_year = if (min_year..=current_year).contains(&self.start_year) {
            self.start_year
        } else {
            min_year
        };
        let end_year = if (min_year..=current_year).contains(&self.end_year) {
            self.end_year
        } else {
            current_year
        };

        let start = first_day_of(start_year, self.start_month);
        let end = first_day_of(end_year, self.end_month);

        if start > end { (end, start) } else { (start, end) }
    }
}

/// The smallest year the timestamp type can express.
pub fn min_report_year() -> i32 {
    NaiveDate::MIN.year()
}

/// Midnight on the first day of the given month, UTC.
///
/// Months are clamped to `[1, 12]`; an unrepresentable date (cannot happen
/// for day 1 of a clamped month, kept total anyway) falls back to the
/// earliest date.
fn first_day_of(year: i32, month: u32) -> DateTime<Utc> {
    let date = NaiveDate::from_ymd_opt(year, month.clamp(1, 12), 1).unwrap_or(NaiveDate::MIN);
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Aggregated sale figures over a normalized period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleReport {
    pub units_sold: i64,
    pub revenue: Decimal,
}

impl core::fmt::Display for SaleReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Products sold: {}; Final profit: {:.2} lv.",
            self.units_sold, self.revenue
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 6, 15, 12, 0, 0).unwrap()
    }

    fn ymd(year: i32, month: u32) -> DateTime<Utc> {
        first_day_of(year, month)
    }

    #[test]
    fn in_range_years_pass_through() {
        let period = ReportPeriod {
            start_month: 3,
            start_year: 2019,
            end_month: 11,
            end_year: 2020,
        };
        let (start, end) = period.normalize(now());
        assert_eq!(start, ymd(2019, 3));
        assert_eq!(end, ymd(2020, 11));
    }

    #[test]
    fn future_start_year_falls_back_to_min_year() {
        let period = ReportPeriod {
            start_month: 1,
            start_year: 2022,
            end_month: 12,
            end_year: 2020,
        };
        let (start, end) = period.normalize(now());
        assert_eq!(start, ymd(min_report_year(), 1));
        assert_eq!(end, ymd(2020, 12));
    }

    #[test]
    fn future_end_year_falls_back_to_current_year() {
        let period = ReportPeriod {
            start_month: 1,
            start_year: 2020,
            end_month: 12,
            end_year: 2022,
        };
        let (start, end) = period.normalize(now());
        assert_eq!(start, ymd(2020, 1));
        assert_eq!(end, ymd(2021, 12));
    }

    #[test]
    fn both_years_in_the_future_still_yield_a_well_formed_range() {
        let period = ReportPeriod {
            start_month: 1,
            start_year: 2022,
            end_month: 12,
            end_year: 2022,
        };
        let (start, end) = period.normalize(now());
        assert_eq!(start, ymd(min_report_year(), 1));
        assert_eq!(end, ymd(2021, 12));
        assert!(start <= end);
    }

    #[test]
    fn reversed_boundaries_are_swapped() {
        let period = ReportPeriod {
            start_month: 12,
            start_year: 2020,
            end_month: 1,
            end_year: 2019,
        };
        let (start, end) = period.normalize(now());
        assert_eq!(start, ymd(2019, 1));
        assert_eq!(end, ymd(2020, 12));
    }

    #[test]
    fn out_of_range_months_are_clamped() {
        let period = ReportPeriod {
            start_month: 0,
            start_year: 2020,
            end_month: 13,
            end_year: 2020,
        };
        let (start, end) = period.normalize(now());
        assert_eq!(start, ymd(2020, 1));
        assert_eq!(end, ymd(2020, 12));
    }

    #[test]
    fn report_renders_two_decimals_with_currency_suffix() {
        let report = SaleReport {
            units_sold: 3,
            revenue: Decimal::new(1575, 2),
        };
        assert_eq!(report.to_string(), "Products sold: 3; Final profit: 15.75 lv.");

        let zero = SaleReport {
            units_sold: 0,
            revenue: Decimal::ZERO,
        };
        assert_eq!(zero.to_string(), "Products sold: 0; Final profit: 0.00 lv.");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: for in-range years the normalized range is identical
        /// under swapping the two boundaries.
        #[test]
        fn normalization_is_symmetric_for_in_range_years(
            sm in 1u32..=12,
            sy in 1990i32..=2021,
            em in 1u32..=12,
            ey in 1990i32..=2021,
        ) {
            let forward = ReportPeriod { start_month: sm, start_year: sy, end_month: em, end_year: ey };
            let swapped = ReportPeriod { start_month: em, start_year: ey, end_month: sm, end_year: sy };
            prop_assert_eq!(forward.normalize(now()), swapped.normalize(now()));
        }

        /// Property: normalization is total and ordered for arbitrary input.
        #[test]
        fn normalization_always_yields_an_ordered_range(
            sm in 0u32..=20,
            sy in proptest::num::i32::ANY,
            em in 0u32..=20,
            ey in proptest::num::i32::ANY,
        ) {
            let period = ReportPeriod { start_month: sm, start_year: sy, end_month: em, end_year: ey };
            let (start, end) = period.normalize(now());
            prop_assert!(start <= end);
        }
    }
}
