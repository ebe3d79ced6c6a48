use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::core::classify::CheckMode;
use crate::core::client::Credentials;
use crate::core::endpoint::JenkinsEndpoint;
use crate::core::CheckRequest;

const EXAMPLES: &str = "\
Examples:
  check_jenkins -H ci.jenkins-ci.org -j infa_release.rss -w 10 -c 42
      warn when the running build passes 10 minutes, critical past 42,
      otherwise report how the last build ended
  check_jenkins -m staleness -H ci.jenkins-ci.org -j nightly -w 3h -c 1d
      alert when the last successful build is older than 3 hours / 1 day";

#[derive(Debug, Parser)]
#[command(
    name = "check_jenkins",
    version,
    about = "A Nagios plugin to check the status of a Jenkins job",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Jenkins hostname
    #[arg(short = 'H', long = "hostname", required = true)]
    pub hostname: String,
    /// Job, use quotes if it contains space
    #[arg(short = 'j', long = "job", required = true)]
    pub job: String,
    /// Warning threshold: minutes, or s/m/h/d units in staleness mode
    #[arg(short = 'w', long = "warning", required = true)]
    pub warning: String,
    /// Critical threshold: minutes, or s/m/h/d units in staleness mode
    #[arg(short = 'c', long = "critical", required = true)]
    pub critical: String,
    #[arg(short = 'm', long = "mode", value_enum, default_value_t = ModeArg::Duration)]
    pub mode: ModeArg,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Log the request and the raw server reply on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(Debug, clap::Args)]
#[command(next_help_heading = "Connection Options")]
pub struct ConnectionArgs {
    /// Jenkins username
    #[arg(short = 'u', long = "username", env = "JENKINS_USERNAME")]
    pub username: Option<String>,
    /// Jenkins password or API token
    #[arg(short = 'p', long = "password", env = "JENKINS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    /// Connection timeout in seconds
    #[arg(short = 't', long = "timeout", default_value_t = 10)]
    pub timeout: u64,
    /// Jenkins port [default: 80, or 443 with --ssl]
    #[arg(short = 'P', long = "port")]
    pub port: Option<u16>,
    /// Jenkins prefix, if not installed on /
    #[arg(long = "prefix", default_value = "/")]
    pub prefix: String,
    /// If the connection requires ssl
    #[arg(short = 'S', long = "ssl")]
    pub ssl: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Outcome of the last build
    Status,
    /// Outcome of the last build, or how long the running one has taken
    Duration,
    /// How long ago the last successful build ran
    Staleness,
}

impl From<ModeArg> for CheckMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Status => CheckMode::LastBuildStatus,
            ModeArg::Duration => CheckMode::LastBuildWithDurationThreshold,
            ModeArg::Staleness => CheckMode::LastSuccessfulBuildStaleness,
        }
    }
}

/// One-line stdout summary of an argument error, for the monitoring
/// framework; clap still prints the full usage on stderr.
pub fn usage_diagnostic(message: &str) -> String {
    let summary = message
        .lines()
        .take_while(|line| !line.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    let summary = summary.strip_prefix("error: ").unwrap_or(&summary);
    format!("CRITICAL: {summary}")
}

pub fn cli_to_request(cli: Cli) -> CheckRequest {
    let connection = cli.connection;
    CheckRequest {
        mode: cli.mode.into(),
        job: cli.job,
        warning: cli.warning,
        critical: cli.critical,
        endpoint: JenkinsEndpoint {
            hostname: cli.hostname,
            port: connection.port,
            prefix: connection.prefix,
            ssl: connection.ssl,
        },
        credentials: Credentials {
            username: connection.username,
            password: connection.password,
        },
        timeout: Duration::from_secs(connection.timeout),
    }
}
