//! CQL time-filter helpers for feature queries.
//!
//! The search collaborator owns the filter expression format; these
//! helpers build the expressions a default implementation serves, in the
//! dialect the geodata server understands:
//! `(['delta_time'] BEFORE '2022-03-13T23:00:00Z')`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A closed time interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, dt: &DateTime<Utc>) -> bool {
        dt >= &self.start && dt <= &self.end
    }
}

fn iso(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// CQL filter selecting features strictly before `instant`.
pub fn cql_before(field: &str, instant: &DateTime<Utc>) -> String {
    format!("(['{}'] BEFORE '{}')", field, iso(instant))
}

/// CQL filter selecting features inside `range`.
pub fn cql_during(field: &str, range: &TimeRange) -> String {
    format!(
        "(['{}'] DURING '{}'/'{}')",
        field,
        iso(&range.start),
        iso(&range.end)
    )
}
