use anyhow::Result;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use duedate::cli::{self, Command};
use duedate::config::{Config, OutputFormat};
use duedate::{calculate_due_date, output, selfcheck};

fn main() -> Result<ExitCode> {
    let args = cli::parse_args();

    // Load configuration
    let config = Config::from_env()?;
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        return Ok(ExitCode::FAILURE);
    }

    // Initialize logging; RUST_LOG takes precedence over DUEDATE_LOG
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("duedate v{}", env!("CARGO_PKG_VERSION"));
    debug!("Configuration loaded: {:?}", config);

    let command = match args.command() {
        Ok(command) => command,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Run with --help for usage");
            return Ok(ExitCode::from(2));
        }
    };

    match command {
        Command::Help => {
            cli::print_help();
            Ok(ExitCode::SUCCESS)
        }
        Command::SelfCheck => {
            info!("Running reference scenarios");
            let report = selfcheck::run(&selfcheck::battery());
            print!("{}", report.render());
            if report.passed() {
                Ok(ExitCode::SUCCESS)
            } else {
                warn!("{} of {} scenarios failed", report.failures.len(), report.total());
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Calculate {
            submit,
            turnaround_hours,
        } => {
            let format = if args.json {
                OutputFormat::Json
            } else {
                config.output_format
            };

            match calculate_due_date(submit, turnaround_hours) {
                Ok(due) => {
                    info!("Task submitted {} with {}h turnaround is due {}", submit, turnaround_hours, due);
                    println!("{}", output::render_due(format, submit, turnaround_hours, due)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    warn!("Cannot calculate due date: {}", e);
                    let rendered = output::render_error(format, &e)?;
                    match format {
                        // Keep stdout parseable in JSON mode
                        OutputFormat::Json => println!("{}", rendered),
                        OutputFormat::Text => eprintln!("{}", rendered),
                    }
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
