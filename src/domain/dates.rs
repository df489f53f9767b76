//! Date option parsing: `YYYY-MM-DD` or a `start,end` range

use chrono::NaiveDate;

use crate::domain::DomainError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive date range; either end may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Range covering a single day.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: Some(date),
            end: Some(date),
        }
    }

    /// Parse `2010-06-01`, `2010-06-01,2010-06-30`, `2010-06-01,` or `,2010-06-30`.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let value = value.trim();
        match value.split_once(',') {
            None => Ok(Self::day(parse_date(value, value)?)),
            Some((start, end)) => {
                let start = parse_optional(start.trim(), value)?;
                let end = parse_optional(end.trim(), value)?;
                if start.is_none() && end.is_none() {
                    return Err(DomainError::InvalidDate {
                        value: value.to_string(),
                        reason: "range has neither start nor end".to_string(),
                    });
                }
                if let (Some(s), Some(e)) = (start, end) {
                    if s > e {
                        return Err(DomainError::InvalidDate {
                            value: value.to_string(),
                            reason: "start is after end".to_string(),
                        });
                    }
                }
                Ok(Self { start, end })
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map(|s| date >= s).unwrap_or(true) && self.end.map(|e| date <= e).unwrap_or(true)
    }
}

fn parse_optional(part: &str, whole: &str) -> Result<Option<NaiveDate>, DomainError> {
    if part.is_empty() {
        Ok(None)
    } else {
        parse_date(part, whole).map(Some)
    }
}

fn parse_date(part: &str, whole: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(part, DATE_FORMAT).map_err(|e| DomainError::InvalidDate {
        value: whole.to_string(),
        reason: e.to_string(),
    })
}
