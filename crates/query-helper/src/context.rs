//! Shared configuration handed to every engine instance.

use std::sync::Arc;

use chrono_tz::Tz;

use crate::datetime::{CalendarExpander, DatetimeExpander};
use crate::error::{QueryError, QueryResult};

/// Timezone and datetime expander used when building API payloads.
///
/// Cheap to clone; engines created from the same context share the expander.
#[derive(Debug, Clone)]
pub struct QueryContext {
    timezone: Tz,
    expander: Arc<dyn DatetimeExpander>,
}

impl Default for QueryContext {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl QueryContext {
    /// Creates a context with the calendar expander.
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            expander: Arc::new(CalendarExpander::new()),
        }
    }

    /// Creates a context from an IANA timezone name such as `Asia/Seoul`.
    pub fn from_timezone_name(name: &str) -> QueryResult<Self> {
        Ok(Self::new(parse_timezone(name)?))
    }

    /// Returns a copy using another timezone.
    pub fn with_timezone(&self, timezone: Tz) -> Self {
        Self {
            timezone,
            expander: Arc::clone(&self.expander),
        }
    }

    /// Replaces the datetime expander.
    pub fn with_expander(mut self, expander: Arc<dyn DatetimeExpander>) -> Self {
        self.expander = expander;
        self
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn expander(&self) -> &dyn DatetimeExpander {
        self.expander.as_ref()
    }
}

/// Parses an IANA timezone name.
pub fn parse_timezone(name: &str) -> QueryResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| QueryError::unknown_timezone(name))
}
