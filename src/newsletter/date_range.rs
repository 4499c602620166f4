use std::fmt;

use anyhow::{Result, anyhow};
use chrono::NaiveDate;

/// Date formats accepted by Gmail's `after:` and `before:` operators
const DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%Y-%m-%d"];

/// Dates rendered into search queries use Gmail's canonical format
const QUERY_FORMAT: &str = "%Y/%m/%d";

/// A search window from `start` (inclusive) to `end` (exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end <= start {
            return Err(anyhow!(
                "End date {} must be after start date {}",
                end,
                start
            ));
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Gmail search query restricting results to this range
    pub fn to_query(&self) -> String {
        format!(
            "after:{} before:{}",
            self.start.format(QUERY_FORMAT),
            self.end.format(QUERY_FORMAT)
        )
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| anyhow!("Invalid date \"{}\", expected YYYY/MM/DD or YYYY-MM-DD", s))
}
