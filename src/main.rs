use chrono::{SubsecRound, Utc};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use check_jenkins::cli::{cli_to_request, usage_diagnostic, Cli};
use check_jenkins::core;
use check_jenkins::core::error::ProbeError;
use check_jenkins::core::formatter::format_report_line;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if err.use_stderr() {
                println!("{}", usage_diagnostic(&err.to_string()));
            }
            err.exit();
        }
    };
    init_tracing(cli.verbose);

    let request = cli_to_request(cli);
    let now = Utc::now().trunc_subsecs(0);

    match core::run(&request, now) {
        Ok(check) => {
            println!("{}", format_report_line(&check));
            std::process::exit(check.severity.exit_code());
        }
        Err(err @ (ProbeError::Usage { .. } | ProbeError::Threshold { .. })) => {
            println!("{}", usage_diagnostic(&err.to_string()));
            Cli::command().error(ErrorKind::InvalidValue, err).exit();
        }
        Err(err) => {
            warn!(error = ?err, "check aborted");
            println!("{err}");
            std::process::exit(err.exit_code());
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
