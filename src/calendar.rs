/// Fixed business calendar
/// Work happens 9am-5pm, Monday through Friday. Not configurable.

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};
use tracing::trace;

pub const START_OF_WORKDAY: NaiveTime = match NaiveTime::from_hms_opt(9, 0, 0) {
    Some(t) => t,
    None => panic!("09:00 is a valid time"),
};

pub const END_OF_WORKDAY: NaiveTime = match NaiveTime::from_hms_opt(17, 0, 0) {
    Some(t) => t,
    None => panic!("17:00 is a valid time"),
};

/// Length of one workday in hours
pub const WORK_DAY_HOURS: u64 = 8;

const BUSINESS_DAYS_PER_WEEK: u64 = 5;
const CALENDAR_DAYS_PER_WEEK: u64 = 7;

/// Saturday and Sunday are the non-working weekdays
pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

pub fn is_business_day(date: NaiveDate) -> bool {
    !is_weekend(date.weekday())
}

/// Check if a time of day falls inside the workday window.
/// Both 09:00 and 17:00 themselves are inside.
pub fn is_within_work_hours(time: NaiveTime) -> bool {
    time >= START_OF_WORKDAY && time <= END_OF_WORKDAY
}

/// Upper-case English day name, as shown in validation messages
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}

/// Move `date` forward by `business_days` business days.
///
/// Steps one calendar day at a time; weekend days are passed through but only
/// landings on business days count. Starting from a business day, whole weeks
/// are jumped in one step since five business days always span seven calendar
/// days from there.
///
/// Returns None if the result would leave chrono's representable range.
pub fn advance_business_days(date: NaiveDate, business_days: u64) -> Option<NaiveDate> {
    let mut date = date;
    let mut remaining = business_days;

    if is_business_day(date) {
        let weeks = remaining / BUSINESS_DAYS_PER_WEEK;
        if weeks > 0 {
            date = date.checked_add_days(Days::new(weeks.checked_mul(CALENDAR_DAYS_PER_WEEK)?))?;
            remaining %= BUSINESS_DAYS_PER_WEEK;
            trace!("Jumped {} weeks to {}", weeks, date);
        }
    }

    while remaining > 0 {
        date = date.succ_opt()?;
        if is_business_day(date) {
            remaining -= 1;
        }
    }

    Some(date)
}



/// Kani formal verification proofs
#[cfg(kani)]
mod kani_proofs {
    use super::*;

    #[kani::proof]
    fn weekend_is_exactly_saturday_and_sunday() {
        let n: u8 = kani::any();
        kani::assume(n < 7);

        if let Ok(day) = Weekday::try_from(n) {
            // chrono numbers Monday as 0
            kani::assert(is_weekend(day) == (n >= 5), "only Sat/Sun are weekend days");
        }
    }
}
