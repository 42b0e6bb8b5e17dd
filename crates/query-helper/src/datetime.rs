//! Expansion of datetime predicates into concrete timestamp bounds.
//!
//! A datetime filter stores what the user typed (`2024-03`, `today`, ...)
//! together with a datetime operator. Only when the API payload is built does
//! the value become one or two UTC instants, computed in the configured
//! timezone.

use std::fmt;

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::api::ApiFilter;
use crate::operator::{ApiOperator, RawOperator};
use crate::value::FilterValue;

/// Format of the instants placed in API filters.
const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Turns one datetime predicate into concrete API filters.
pub trait DatetimeExpander: fmt::Debug + Send + Sync {
    /// Expands a datetime predicate.
    ///
    /// Returns `None` when nothing can be contributed (for example, no value
    /// could be understood or the operator is not a datetime operator).
    fn expand(
        &self,
        key: &str,
        value: &FilterValue,
        operator: RawOperator,
        timezone: Tz,
    ) -> Option<Vec<ApiFilter>>;
}

/// Calendar-based expander.
///
/// Every accepted value denotes a half-open period `[start, end)` in the
/// configured timezone:
///
/// - `YYYY`, `YYYY-MM`, `YYYY-MM-DD` - a year, month, or day
/// - `YYYY-MM-DD HH:MM` / `YYYY-MM-DD HH:MM:SS` (or with `T`) - a minute or second
/// - an RFC 3339 instant - the second it falls in
/// - `today`, `yesterday`, `this_week`, `this_month`, `this_year`
///
/// Operators then pick bounds from the period:
///
/// | operator | filters                               |
/// |----------|---------------------------------------|
/// | `=t`     | `datetime_gte start`, `datetime_lt end` |
/// | `>t`     | `datetime_gte end`                    |
/// | `>=t`    | `datetime_gte start`                  |
/// | `<t`     | `datetime_lt start`                   |
/// | `<=t`    | `datetime_lt end`                     |
#[derive(Debug, Clone, Default)]
pub struct CalendarExpander {
    now: Option<DateTime<Utc>>,
}

impl CalendarExpander {
    /// Creates an expander that reads the system clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an expander whose relative keywords are anchored at `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now: Some(now) }
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }

    /// Resolves a value to its `[start, end)` period in UTC.
    pub fn period(&self, value: &str, timezone: Tz) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let value = value.trim();
        if let Some(period) = self.relative_period(value, timezone) {
            return Some(period);
        }

        if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
            let start = instant.with_timezone(&Utc);
            return Some((start, start.checked_add_signed(Duration::seconds(1))?));
        }

        for (format, length) in [
            ("%Y-%m-%d %H:%M:%S", Duration::seconds(1)),
            ("%Y-%m-%dT%H:%M:%S", Duration::seconds(1)),
            ("%Y-%m-%d %H:%M", Duration::minutes(1)),
            ("%Y-%m-%dT%H:%M", Duration::minutes(1)),
        ] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
                return localized_span(timezone, naive, naive.checked_add_signed(length)?);
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return day_span(timezone, date, date.succ_opt()?);
        }

        if let Some((year, month)) = parse_year_month(value) {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            return day_span(timezone, first, next_month(first)?);
        }

        if value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) {
            let year: i32 = value.parse().ok()?;
            let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
            let next = NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?;
            return day_span(timezone, first, next);
        }

        None
    }

    fn relative_period(&self, value: &str, timezone: Tz) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let today = self.now().with_timezone(&timezone).date_naive();

        match value.to_lowercase().as_str() {
            "today" => day_span(timezone, today, today.succ_opt()?),
            "yesterday" => day_span(timezone, today.pred_opt()?, today),
            "this_week" => {
                let offset = Duration::days(i64::from(today.weekday().num_days_from_monday()));
                let monday = today.checked_sub_signed(offset)?;
                day_span(timezone, monday, monday.checked_add_signed(Duration::days(7))?)
            }
            "this_month" => {
                let first = today.with_day(1)?;
                day_span(timezone, first, next_month(first)?)
            }
            "this_year" => {
                let first = NaiveDate::from_ymd_opt(today.year(), 1, 1)?;
                let next = NaiveDate::from_ymd_opt(today.year().checked_add(1)?, 1, 1)?;
                day_span(timezone, first, next)
            }
            _ => None,
        }
    }
}

impl DatetimeExpander for CalendarExpander {
    fn expand(
        &self,
        key: &str,
        value: &FilterValue,
        operator: RawOperator,
        timezone: Tz,
    ) -> Option<Vec<ApiFilter>> {
        if !operator.is_datetime() {
            return None;
        }

        let mut filters = Vec::new();
        for element in value.elements().into_iter().flatten() {
            let raw = element.to_string();
            let Some((start, end)) = self.period(&raw, timezone) else {
                tracing::warn!(key, value = %raw, "unrecognised datetime value, skipping");
                continue;
            };

            let bound = |instant: DateTime<Utc>, op: ApiOperator| {
                ApiFilter::new(key, instant.format(INSTANT_FORMAT).to_string(), op)
            };

            match operator {
                RawOperator::DatetimeEqual => {
                    filters.push(bound(start, ApiOperator::DatetimeGte));
                    filters.push(bound(end, ApiOperator::DatetimeLt));
                }
                RawOperator::DatetimeGreater => filters.push(bound(end, ApiOperator::DatetimeGte)),
                RawOperator::DatetimeGreaterOrEqual => {
                    filters.push(bound(start, ApiOperator::DatetimeGte))
                }
                RawOperator::DatetimeLess => filters.push(bound(start, ApiOperator::DatetimeLt)),
                RawOperator::DatetimeLessOrEqual => filters.push(bound(end, ApiOperator::DatetimeLt)),
                _ => {}
            }
        }

        if filters.is_empty() {
            None
        } else {
            Some(filters)
        }
    }
}

/// Parses `YYYY-MM`.
fn parse_year_month(value: &str) -> Option<(i32, u32)> {
    let (year, month) = value.split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    Some((year.parse().ok()?, month.parse().ok()?))
}

/// First day of the month after `first`.
fn next_month(first: NaiveDate) -> Option<NaiveDate> {
    if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year().checked_add(1)?, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
}

fn day_span(
    timezone: Tz,
    start: NaiveDate,
    end: NaiveDate,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    localized_span(timezone, start.and_hms_opt(0, 0, 0)?, end.and_hms_opt(0, 0, 0)?)
}

fn localized_span(
    timezone: Tz,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    Some((localize(timezone, start)?, localize(timezone, end)?))
}

/// Interprets a wall-clock time in `timezone`.
///
/// Ambiguous times take the earlier instant; times inside a DST gap move one
/// hour forward.
fn localize(timezone: Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    let local = match timezone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, _) => earlier,
        LocalResult::None => timezone
            .from_local_datetime(&naive.checked_add_signed(Duration::hours(1))?)
            .earliest()?,
    };
    Some(local.with_timezone(&Utc))
}
