//! Turns a job snapshot into a Nagios severity and message.
//!
//! Everything here is pure: the clock is read once by the caller and handed
//! in through [`CheckParameters::now`].

use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::formatter::{format_clock, format_timedelta};
use crate::core::job::{BuildResult, JobSnapshot};
use crate::core::threshold::{ThresholdStrategy, Thresholds};

static RE_BUILD_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*)/[0-9]+/").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    pub fn exit_code(self) -> i32 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::Unknown => 3,
        }
    }

    fn rank(self) -> Option<u8> {
        match self {
            Severity::Ok => Some(0),
            Severity::Warning => Some(1),
            Severity::Critical => Some(2),
            Severity::Unknown => None,
        }
    }
}

/// `Unknown` only compares equal to itself; it sits outside the
/// `Ok < Warning < Critical` ladder.
impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.rank(), other.rank()) {
            (Some(left), Some(right)) => Some(left.cmp(&right)),
            (None, None) => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckMode {
    /// Last build outcome, legacy message wording.
    LastBuildStatus,
    /// Last build outcome, or how long the running build has taken.
    #[default]
    LastBuildWithDurationThreshold,
    /// Time elapsed since the last successful build started.
    LastSuccessfulBuildStaleness,
}

impl CheckMode {
    pub fn threshold_strategy(self) -> ThresholdStrategy {
        match self {
            CheckMode::LastSuccessfulBuildStaleness => ThresholdStrategy::Token,
            _ => ThresholdStrategy::Minutes,
        }
    }

    /// Build selector in the API path.
    pub fn build_selector(self) -> &'static str {
        match self {
            CheckMode::LastSuccessfulBuildStaleness => "lastSuccessfulBuild",
            _ => "lastBuild",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckParameters {
    pub job_name: String,
    pub thresholds: Thresholds,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub severity: Severity,
    pub message: String,
}

impl Check {
    fn new(severity: Severity, message: String) -> Self {
        Self { severity, message }
    }
}

pub fn classify(mode: CheckMode, params: &CheckParameters, job: &JobSnapshot) -> Check {
    match mode {
        CheckMode::LastSuccessfulBuildStaleness => classify_staleness(params, job),
        CheckMode::LastBuildStatus | CheckMode::LastBuildWithDurationThreshold if job.building => {
            classify_running(params, job)
        }
        CheckMode::LastBuildStatus | CheckMode::LastBuildWithDurationThreshold => {
            classify_completed(mode, params, job)
        }
    }
}

fn classify_running(params: &CheckParameters, job: &JobSnapshot) -> Check {
    let elapsed = seconds_since(params.now, job.start_timestamp_millis);
    let running_for = format_clock(elapsed);
    let job_name = &params.job_name;
    let url = &job.console_url;

    match threshold_severity(elapsed, &params.thresholds) {
        Severity::Ok => Check::new(
            Severity::Ok,
            format!("{job_name} still running after {running_for}, watch it on {url}console#footer"),
        ),
        severity => Check::new(
            severity,
            format!("{job_name} has been running for {running_for}, see {url}console#footer"),
        ),
    }
}

fn classify_completed(mode: CheckMode, params: &CheckParameters, job: &JobSnapshot) -> Check {
    let job_name = &params.job_name;
    let url = &job.console_url;

    match &job.result {
        BuildResult::Success => Check::new(
            Severity::Ok,
            format!("{job_name} exited normally after {}", build_duration(job)),
        ),
        BuildResult::Unstable => Check::new(
            Severity::Warning,
            format!(
                "{job_name} is marked as unstable after {}, see {url}console#footer",
                build_duration(job)
            ),
        ),
        BuildResult::Failure => Check::new(
            Severity::Critical,
            format!("{job_name} exited with an error, see {url}console#footer"),
        ),
        BuildResult::Aborted => Check::new(
            Severity::Unknown,
            format!("{job_name} has been aborted, see {url}console#footer"),
        ),
        BuildResult::Other(_) => {
            let hint = match mode {
                CheckMode::LastBuildStatus => "Jenkins API ?",
                _ => "Jenkins API issue ?",
            };
            Check::new(
                Severity::Unknown,
                format!("{job_name} is in a not known state, {hint} see {url}"),
            )
        }
    }
}

fn classify_staleness(params: &CheckParameters, job: &JobSnapshot) -> Check {
    let elapsed = seconds_since(params.now, job.start_timestamp_millis);
    let message = format!(
        "{} last successful run was {} ago - see {}",
        params.job_name,
        format_timedelta(elapsed),
        trend_url(&job.console_url)
    );
    Check::new(threshold_severity(elapsed, &params.thresholds), message)
}

/// Critical is checked first; both bounds are inclusive.
fn threshold_severity(elapsed_secs: u64, thresholds: &Thresholds) -> Severity {
    let elapsed = Duration::from_secs(elapsed_secs);
    if elapsed >= thresholds.critical {
        Severity::Critical
    } else if elapsed >= thresholds.warning {
        Severity::Warning
    } else {
        Severity::Ok
    }
}

/// Whole seconds between the build start and `now`. A start in the future
/// counts as zero.
fn seconds_since(now: DateTime<Utc>, start_millis: i64) -> u64 {
    let started = start_millis.div_euclid(1000);
    let elapsed = now.timestamp().saturating_sub(started);
    u64::try_from(elapsed).unwrap_or(0)
}

fn build_duration(job: &JobSnapshot) -> String {
    let seconds = u64::try_from(job.duration_millis / 1000).unwrap_or(0);
    format_clock(seconds)
}

/// `http://host/job/name/42/` becomes `http://host/job/name/buildTimeTrend`.
pub fn trend_url(build_url: &str) -> String {
    let job_url = RE_BUILD_SEGMENT
        .captures(build_url)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
        .unwrap_or_else(|| build_url.trim_end_matches('/'));
    format!("{job_url}/buildTimeTrend")
}
