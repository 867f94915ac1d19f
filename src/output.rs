/// Rendering of due date results for stdout/stderr
///
/// Text mode prints a single human-readable line; JSON mode prints one object
/// per invocation so the output can be piped into other tools.

use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::error::{iso_time, DueDateError, Violation};

#[derive(Debug, Serialize)]
struct DueDateResponse {
    submitted: NaiveDateTime,
    turnaround_hours: u64,
    due: NaiveDateTime,
}

#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    error: String,
    violations: &'a [Violation],
}

/// Render a successful calculation
pub fn render_due(
    format: OutputFormat,
    submitted: NaiveDateTime,
    turnaround_hours: u64,
    due: NaiveDateTime,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "Due: {} {}",
            due.date().format("%Y-%m-%d"),
            iso_time(due.time())
        )),
        OutputFormat::Json => Ok(serde_json::to_string(&DueDateResponse {
            submitted,
            turnaround_hours,
            due,
        })?),
    }
}

/// Render a failed calculation
pub fn render_error(format: OutputFormat, err: &DueDateError) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(err.to_string().trim_end().to_string()),
        OutputFormat::Json => {
            let violations: &[Violation] = match err {
                DueDateError::Validation(v) => v.violations(),
                DueDateError::OutOfRange { .. } => &[],
            };
            Ok(serde_json::to_string(&ErrorResponse {
                error: err.to_string().trim_end().to_string(),
                violations,
            })?)
        }
    }
}
