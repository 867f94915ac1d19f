//! Due date calculation
//!
//! Given a submission timestamp inside business hours and a turnaround in
//! work-hours, finds when the task is due. Hours that spill past 17:00 roll
//! over to the next business day, and weekends are skipped.

use chrono::{Datelike, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use tracing::debug;

use crate::calendar::{
    advance_business_days, is_weekend, is_within_work_hours, END_OF_WORKDAY, START_OF_WORKDAY,
    WORK_DAY_HOURS,
};
use crate::error::{DueDateError, ValidationError, Violation};

/// Fixed result time when the hour addition wraps to exactly midnight
const MIDNIGHT_WRAP_HOURS_AFTER_START: i64 = 7;

/// Check a submission timestamp against every rule, reporting all failures.
pub fn validate(submit: NaiveDateTime) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    let time = submit.time();
    if !is_within_work_hours(time) {
        violations.push(Violation::OutsideWorkHours { time });
    }

    let date = submit.date();
    let weekday = date.weekday();
    if is_weekend(weekday) {
        violations.push(Violation::Weekend { date, weekday });
    }

    match ValidationError::from_violations(violations) {
        Some(err) => {
            debug!("Rejected submission {}: {}", submit, err);
            Err(err)
        }
        None => Ok(()),
    }
}

/// Calculate when a task submitted at `submit` is due after `turnaround_hours`
/// work-hours.
///
/// Fails with [`DueDateError::Validation`] if `submit` is outside 9:00-17:00
/// or on a weekend. Fails with [`DueDateError::OutOfRange`] if the due date
/// would land past the last date chrono can represent (year 262142), which
/// takes a turnaround of roughly 5e8 work-hours or more.
pub fn calculate_due_date(
    submit: NaiveDateTime,
    turnaround_hours: u64,
) -> Result<NaiveDateTime, DueDateError> {
    validate(submit)?;

    let submit_time = submit.time();
    let extra_hours = (turnaround_hours % WORK_DAY_HOURS) as i64;
    let mut whole_days = turnaround_hours / WORK_DAY_HOURS;

    // Wraps past midnight; the date is untouched here
    let candidate = submit_time + TimeDelta::hours(extra_hours);

    let (due_time, overflow) = roll_over(submit_time, candidate);
    if overflow {
        whole_days += 1;
    }

    debug!(
        "Submit {} + {}h: {} whole days, due time {} (overflow: {})",
        submit, turnaround_hours, whole_days, due_time, overflow
    );

    let due_date = advance_business_days(submit.date(), whole_days).ok_or(
        DueDateError::OutOfRange {
            date: submit.date(),
            business_days: whole_days,
        },
    )?;

    Ok(due_date.and_time(due_time))
}

/// Pick the due time of day for `candidate` and whether it spills into
/// another day.
fn roll_over(submit_time: NaiveTime, candidate: NaiveTime) -> (NaiveTime, bool) {
    if candidate > END_OF_WORKDAY {
        // Only whole hours carry over; the submission minute is reinstated
        let overhang_hours = (candidate - END_OF_WORKDAY).num_hours();
        let due = START_OF_WORKDAY
            + TimeDelta::hours(overhang_hours)
            + TimeDelta::minutes(submit_time.minute() as i64);
        (due, true)
    } else if candidate == NaiveTime::MIN {
        let due = START_OF_WORKDAY + TimeDelta::hours(MIDNIGHT_WRAP_HOURS_AFTER_START);
        (due, true)
    } else {
        (candidate, false)
    }
}



/// Kani formal verification proofs
#[cfg(kani)]
mod kani_proofs {
    use super::*;

    #[kani::proof]
    fn roll_over_stays_in_workday() {
        let hour: u32 = kani::any();
        kani::assume(hour >= 9 && hour <= 17);
        let minute: u32 = kani::any();
        kani::assume(minute < 60);
        // 17:00 is the latest accepted submission
        kani::assume(hour < 17 || minute == 0);
        let extra: i64 = kani::any();
        kani::assume(extra >= 0 && extra < WORK_DAY_HOURS as i64);

        if let Some(submit_time) = NaiveTime::from_hms_opt(hour, minute, 0) {
            let candidate = submit_time + TimeDelta::hours(extra);
            let (due, _) = roll_over(submit_time, candidate);
            kani::assert(
                due >= START_OF_WORKDAY && due <= END_OF_WORKDAY,
                "due time must stay within 09:00-17:00",
            );
        }
    }
}
