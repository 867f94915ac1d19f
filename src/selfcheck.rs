//! Reference scenario battery
//!
//! A fixed list of submissions with known outcomes. `duedate --self-check`
//! runs them through the calculator and prints a pass/fail report, which makes
//! it easy to confirm a build behaves as expected on a target machine.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::Write;
use tracing::{debug, warn};

use crate::calculator::calculate_due_date;
use crate::error::DueDateError;

/// Outcome a scenario expects from the calculator
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    DueAt(NaiveDateTime),
    Rejected,
    /// The scenario's own dates are invalid; counted as a failure
    Malformed,
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub submit: NaiveDateTime,
    pub turnaround_hours: u64,
    pub expected: Expectation,
}

#[derive(Debug, Clone)]
pub struct Failure {
    pub name: &'static str,
    pub detail: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatteryReport {
    /// One char per scenario, in run order: '.' passed, 'F' failed
    pub progress: String,
    pub failures: Vec<Failure>,
}

impl BatteryReport {
    pub fn total(&self) -> usize {
        self.progress.len()
    }

    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.progress);

        for (i, failure) in self.failures.iter().enumerate() {
            let _ = writeln!(out, "{}) {}", i + 1, failure.name);
            let _ = writeln!(out, "    {}", failure.detail);
        }

        if self.passed() {
            let _ = writeln!(out, "OK ({} tests)", self.total());
        } else {
            let _ = writeln!(
                out,
                "FAILURES!!! Tests run: {}, Failures: {}",
                self.total(),
                self.failures.len()
            );
        }
        out
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}

type Row = (&'static str, Option<NaiveDateTime>, u64, Option<Option<NaiveDateTime>>);

/// The reference scenarios
pub fn battery() -> Vec<Scenario> {
    let table: [Row; 8] = [
        ("fail on weekend", at(2021, 1, 30, 9, 0), 8, None),
        ("fail on after work hours", at(2021, 2, 1, 18, 0), 8, None),
        ("fail on before work hours", at(2021, 2, 1, 6, 0), 8, None),
        ("basic one day task", at(2021, 1, 28, 10, 30), 8, Some(at(2021, 1, 29, 10, 30))),
        ("not counting weekend", at(2021, 1, 28, 10, 30), 24, Some(at(2021, 2, 2, 10, 30))),
        ("overtime to next day", at(2021, 1, 28, 16, 11), 2, Some(at(2021, 1, 29, 10, 11))),
        ("midnight wrap", at(2021, 1, 28, 17, 0), 7, Some(at(2021, 1, 29, 16, 0))),
        ("zero turnaround", at(2021, 1, 28, 10, 30), 0, Some(at(2021, 1, 28, 10, 30))),
    ];

    table.into_iter().map(scenario_from_row).collect()
}

/// A row with an impossible date becomes a scenario that always fails
fn scenario_from_row((name, submit, turnaround_hours, due): Row) -> Scenario {
    let expected = match due {
        Some(Some(due)) => Expectation::DueAt(due),
        Some(None) => Expectation::Malformed,
        None => Expectation::Rejected,
    };
    match submit {
        Some(submit) => Scenario {
            name,
            submit,
            turnaround_hours,
            expected,
        },
        None => Scenario {
            name,
            submit: NaiveDateTime::MIN,
            turnaround_hours,
            expected: Expectation::Malformed,
        },
    }
}

/// Run every scenario and collect the results
pub fn run(scenarios: &[Scenario]) -> BatteryReport {
    let mut report = BatteryReport::default();

    for scenario in scenarios {
        let outcome = calculate_due_date(scenario.submit, scenario.turnaround_hours);
        match check(&scenario.expected, &outcome) {
            None => {
                debug!("Scenario '{}' passed", scenario.name);
                report.progress.push('.');
            }
            Some(detail) => {
                warn!("Scenario '{}' failed: {}", scenario.name, detail);
                report.progress.push('F');
                report.failures.push(Failure {
                    name: scenario.name,
                    detail,
                });
            }
        }
    }

    report
}

/// Returns a description of the mismatch, or None if the outcome matches
fn check(expected: &Expectation, outcome: &Result<NaiveDateTime, DueDateError>) -> Option<String> {
    match (expected, outcome) {
        (Expectation::Malformed, _) => Some("scenario contains an invalid date".to_string()),
        (Expectation::DueAt(want), Ok(got)) if want == got => None,
        (Expectation::DueAt(want), Ok(got)) => Some(format!("expected {} but got {}", want, got)),
        (Expectation::DueAt(want), Err(e)) => Some(format!("expected {} but failed: {}", want, e)),
        (Expectation::Rejected, Err(DueDateError::Validation(_))) => None,
        (Expectation::Rejected, Err(e)) => Some(format!("expected a validation error but got: {}", e)),
        (Expectation::Rejected, Ok(got)) => {
            Some(format!("expected a validation error but got {}", got))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battery_is_complete() {
        let scenarios = battery();
        assert_eq!(scenarios.len(), 8);
        let rejected = scenarios
            .iter()
            .filter(|s| s.expected == Expectation::Rejected)
            .count();
        assert_eq!(rejected, 3);
    }

    #[test]
    fn test_battery_passes() {
        let report = run(&battery());
        assert!(report.passed(), "{}", report.render());
        assert_eq!(report.progress, "........");
    }

    #[test]
    fn test_render_ok() {
        let report = run(&battery());
        assert!(report.render().ends_with("OK (8 tests)\n"));
    }

    #[test]
    fn test_wrong_expectation_is_reported() {
        let scenarios = vec![
            Scenario {
                name: "wrong due date",
                submit: at(2021, 1, 28, 10, 30).unwrap(),
                turnaround_hours: 8,
                expected: Expectation::DueAt(at(2021, 1, 28, 18, 30).unwrap()),
            },
            Scenario {
                name: "should have been rejected",
                submit: at(2021, 1, 28, 10, 30).unwrap(),
                turnaround_hours: 1,
                expected: Expectation::Rejected,
            },
        ];
        let report = run(&scenarios);
        assert!(!report.passed());
        assert_eq!(report.progress, "FF");

        let rendered = report.render();
        assert!(rendered.contains("1) wrong due date"), "{}", rendered);
        assert!(rendered.contains("2) should have been rejected"), "{}", rendered);
        assert!(rendered.contains("FAILURES!!! Tests run: 2, Failures: 2"), "{}", rendered);
    }

    #[test]
    fn test_invalid_row_counts_as_failure() {
        let bad_submit = scenario_from_row(("bad submit", at(2021, 2, 30, 10, 0), 8, None));
        let bad_due = scenario_from_row((
            "bad due",
            at(2021, 1, 28, 10, 30),
            8,
            Some(at(2021, 1, 29, 25, 0)),
        ));
        assert_eq!(bad_submit.expected, Expectation::Malformed);
        assert_eq!(bad_due.expected, Expectation::Malformed);

        let report = run(&[bad_submit, bad_due]);
        assert_eq!(report.progress, "FF");
        assert!(report.failures[0].detail.contains("invalid date"));
        assert!(report
            .render()
            .contains("FAILURES!!! Tests run: 2, Failures: 2"));
    }

    #[test]
    fn test_empty_battery() {
        let report = run(&[]);
        assert!(report.passed());
        assert_eq!(report.total(), 0);
    }
}
