//! Command-line argument parsing for duedate

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse command line arguments
#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub submit: Option<String>,
    pub hours: Option<String>,
    pub json: bool,
    pub self_check: bool,
    pub help: bool,
}

/// What the binary was asked to do, after checking required values
#[derive(Debug, PartialEq)]
pub enum Command {
    Help,
    SelfCheck,
    Calculate {
        submit: NaiveDateTime,
        turnaround_hours: u64,
    },
}

pub fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    parse_args_from(&args)
}

/// Parse an argv-style slice; the first element is the program name
pub fn parse_args_from(args: &[String]) -> Args {
    let mut result = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--submit" => {
                if i + 1 < args.len() {
                    i += 1;
                    result.submit = Some(args[i].clone());
                }
            }
            "--hours" => {
                if i + 1 < args.len() {
                    i += 1;
                    result.hours = Some(args[i].clone());
                }
            }
            "--json" => result.json = true,
            "--self-check" => result.self_check = true,
            "--help" | "-h" => result.help = true,
            _ => {}
        }
        i += 1;
    }

    result
}

impl Args {
    /// Resolve flags into a command. Help wins over everything, then self-check.
    pub fn command(&self) -> Result<Command> {
        if self.help {
            return Ok(Command::Help);
        }
        if self.self_check {
            return Ok(Command::SelfCheck);
        }

        let submit = match &self.submit {
            Some(s) => parse_timestamp(s)?,
            None => bail!("--submit is required (e.g. --submit 2021-01-28T10:30)"),
        };
        let turnaround_hours = match &self.hours {
            Some(h) => h
                .trim()
                .parse::<u64>()
                .with_context(|| format!("--hours must be a non-negative integer, got '{}'", h))?,
            None => bail!("--hours is required (e.g. --hours 8)"),
        };

        Ok(Command::Calculate {
            submit,
            turnaround_hours,
        })
    }
}

/// Parse a local timestamp such as "2021-01-28T10:30" or "2021-01-28 10:30:15"
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .with_context(|| format!("--submit '{}' is not a timestamp like 2021-01-28T10:30", s))
}

pub fn print_help() {
    println!("duedate - Business-hours due date calculator\n");
    println!("USAGE:");
    println!("    duedate --submit <TIMESTAMP> --hours <N> [--json]");
    println!("    duedate --self-check\n");
    println!("OPTIONS:");
    println!("    --submit TIMESTAMP      Submission time, e.g. 2021-01-28T10:30");
    println!("    --hours N               Turnaround in work-hours (9:00-17:00, Mon-Fri)");
    println!("    --json                  Print the result as JSON");
    println!("    --self-check            Run the reference scenarios and report pass/fail");
    println!("    --help, -h              Show this help message\n");
    println!("ENVIRONMENT:");
    println!("    DUEDATE_OUTPUT          text (default) or json");
    println!("    DUEDATE_LOG             Log filter when RUST_LOG is unset (default: duedate=info)");
}
