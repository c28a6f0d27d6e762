//! `tsmig <FILE>`: migrate one file, exit 0 on success and 1 on any failure

use clap::error::ErrorKind;
use clap::{value_parser, Arg, Command};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tsmig_cli::{report_failure, run, PipelineError};
use tsmig_project::Persisted;
use tsmig_transform::RuleSet;

/// Environment variable holding the log filter
const LOG_ENV: &str = "TSMIG_LOG";

fn command() -> Command {
    Command::new("tsmig")
        .version(tsmig_cli::VERSION)
        .about("Migrate a single TypeScript/JavaScript file in place")
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Source file to migrate (.ts, .tsx, .js, .jsx)"),
        )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    // Transform panics are caught and reported; keep the default hook quiet
    std::panic::set_hook(Box::new(|info| tracing::debug!("{info}")));

    let matches = match command().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    let Some(path) = matches.get_one::<PathBuf>("file") else {
        let _ = report_failure(&mut std::io::stderr(), None, &PipelineError::MissingArgument);
        eprintln!("\n{}", command().render_usage());
        return ExitCode::from(1);
    };

    let result = match RuleSet::builtin() {
        Ok(rules) => run(path, &rules).await,
        Err(err) => Err(err.into()),
    };

    match result {
        Ok(outcome) => {
            match outcome.persisted {
                Persisted::Written { bytes } => {
                    println!("Migrated {} ({bytes} bytes)", outcome.path.display());
                }
                Persisted::Unchanged => println!("{} is already up to date", outcome.path.display()),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!("Pipeline failed: {err:?}");
            let _ = report_failure(&mut std::io::stderr(), Some(path), &err);
            ExitCode::from(1)
        }
    }
}
