//! Error types for due date calculation

use chrono::{NaiveDate, NaiveTime, Timelike, Weekday};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::calendar::weekday_name;

/// A single submission rule that was broken, with the offending value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Violation {
    OutsideWorkHours {
        #[serde(serialize_with = "serialize_iso_time")]
        time: NaiveTime,
    },
    Weekend {
        date: NaiveDate,
        #[serde(serialize_with = "serialize_weekday")]
        weekday: Weekday,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::OutsideWorkHours { time } => write!(
                f,
                "Submit time must be between 9:00 and 17:00, Failed argument: {}",
                iso_time(*time)
            ),
            Violation::Weekend { date, weekday } => write!(
                f,
                "Submit date must not be a weekend, Failed arguments: {}, {}",
                date.format("%Y-%m-%d"),
                weekday_name(*weekday)
            ),
        }
    }
}

/// Every rule a submission timestamp broke, time-of-day rule first
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Returns None when there is nothing to report
    pub(crate) fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for violation in &self.violations {
            write!(f, "{}; ", violation)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DueDateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Due date is out of calendar range: {business_days} business days after {date}")]
    OutOfRange { date: NaiveDate, business_days: u64 },
}

/// ISO local time: seconds only when non-zero, fraction only when non-zero.
/// Example: 18:00 -> "18:00", 06:00:30 -> "06:00:30"
pub fn iso_time(time: NaiveTime) -> String {
    if time.nanosecond() != 0 {
        time.format("%H:%M:%S%.f").to_string()
    } else if time.second() != 0 {
        time.format("%H:%M:%S").to_string()
    } else {
        time.format("%H:%M").to_string()
    }
}

fn serialize_iso_time<S: serde::Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&iso_time(*time))
}

fn serialize_weekday<S: serde::Serializer>(day: &Weekday, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(weekday_name(*day))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(hour: u32, minute: u32, second: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, second).unwrap()
    }

    #[test]
    fn test_iso_time_drops_zero_seconds() {
        assert_eq!(iso_time(time(18, 0, 0)), "18:00");
        assert_eq!(iso_time(time(6, 5, 0)), "06:05");
    }

    #[test]
    fn test_iso_time_keeps_seconds_and_fraction() {
        assert_eq!(iso_time(time(6, 0, 30)), "06:00:30");
        let t = NaiveTime::from_hms_milli_opt(17, 0, 0, 500).unwrap();
        assert_eq!(iso_time(t), "17:00:00.500");
    }

    #[test]
    fn test_empty_violations_is_not_an_error() {
        assert!(ValidationError::from_violations(Vec::new()).is_none());
    }

    #[test]
    fn test_display_time_violation() {
        let err = ValidationError::from_violations(vec![Violation::OutsideWorkHours {
            time: time(18, 0, 0),
        }])
        .unwrap();
        assert_eq!(
            err.to_string(),
            "Submit time must be between 9:00 and 17:00, Failed argument: 18:00; "
        );
    }

    #[test]
    fn test_display_both_violations_in_order() {
        let err = ValidationError::from_violations(vec![
            Violation::OutsideWorkHours { time: time(7, 15, 0) },
            Violation::Weekend {
                date: NaiveDate::from_ymd_opt(2021, 1, 31).unwrap(),
                weekday: Weekday::Sun,
            },
        ])
        .unwrap();
        assert_eq!(
            err.to_string(),
            "Submit time must be between 9:00 and 17:00, Failed argument: 07:15; \
             Submit date must not be a weekend, Failed arguments: 2021-01-31, SUNDAY; "
        );
    }

    #[test]
    fn test_violation_serializes_with_rule_tag() {
        let v = Violation::Weekend {
            date: NaiveDate::from_ymd_opt(2021, 1, 30).unwrap(),
            weekday: Weekday::Sat,
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["rule"], "weekend");
        assert_eq!(json["date"], "2021-01-30");
        assert_eq!(json["weekday"], "SATURDAY");

        let v = Violation::OutsideWorkHours { time: time(18, 0, 0) };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["rule"], "outside_work_hours");
        assert_eq!(json["time"], "18:00");
    }

    #[test]
    fn test_due_date_error_wraps_validation_message() {
        let inner = ValidationError::from_violations(vec![Violation::OutsideWorkHours {
            time: time(18, 0, 0),
        }])
        .unwrap();
        let err = DueDateError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
    }
}
