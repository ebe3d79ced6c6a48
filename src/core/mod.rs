use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

pub mod classify;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod formatter;
pub mod job;
pub mod threshold;

use classify::{classify, Check, CheckMode, CheckParameters};
use client::{Credentials, JenkinsClient};
use endpoint::JenkinsEndpoint;
use error::ProbeError;
use job::JobSnapshot;
use threshold::Thresholds;

/// Everything one invocation needs, as given on the command line.
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub mode: CheckMode,
    pub job: String,
    pub warning: String,
    pub critical: String,
    pub endpoint: JenkinsEndpoint,
    pub credentials: Credentials,
    pub timeout: Duration,
}

impl CheckRequest {
    pub fn thresholds(&self) -> Result<Thresholds, ProbeError> {
        Thresholds::parse(self.mode.threshold_strategy(), &self.warning, &self.critical)
            .map_err(|(flag, source)| ProbeError::Threshold { flag, source })
    }
}

/// Fetches the job state once and classifies it against `now`.
pub fn run(request: &CheckRequest, now: DateTime<Utc>) -> Result<Check, ProbeError> {
    let thresholds = request.thresholds()?;
    let url = request.endpoint.api_url(&request.job, request.mode)?;

    debug!(
        mode = ?request.mode,
        job = %request.job,
        warning_secs = thresholds.warning.as_secs(),
        critical_secs = thresholds.critical.as_secs(),
        timeout_secs = request.timeout.as_secs(),
        now = %now,
        "check requested"
    );

    let client = JenkinsClient::new(request.timeout, request.credentials.clone())?;
    let body = client.fetch(&url)?;

    debug!(reply = %body, "reply from server");

    let job = JobSnapshot::from_json(&body).map_err(|source| ProbeError::Decode {
        url: url.to_string(),
        source,
    })?;

    let params = CheckParameters {
        job_name: request.job.clone(),
        thresholds,
        now,
    };
    Ok(classify(request.mode, &params, &job))
}
