//! duedate library - business-hours due date calculation
//!
//! This module exports internal components for integration testing.

pub mod calculator;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod selfcheck;

pub use calculator::{calculate_due_date, validate};
pub use error::{DueDateError, ValidationError, Violation};
