use reqwest::Url;

use crate::core::classify::CheckMode;
use crate::core::error::ProbeError;

const DEFAULT_HTTP_PORT: u16 = 80;
const DEFAULT_HTTPS_PORT: u16 = 443;

/// Where the Jenkins instance lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JenkinsEndpoint {
    pub hostname: String,
    pub port: Option<u16>,
    pub prefix: String,
    pub ssl: bool,
}

impl JenkinsEndpoint {
    pub fn scheme(&self) -> &'static str {
        if self.ssl {
            "https"
        } else {
            "http"
        }
    }

    /// An explicit port always wins over the scheme default.
    pub fn port(&self) -> u16 {
        match (self.port, self.ssl) {
            (Some(port), _) => port,
            (None, true) => DEFAULT_HTTPS_PORT,
            (None, false) => DEFAULT_HTTP_PORT,
        }
    }

    pub fn normalized_prefix(&self) -> String {
        let trimmed = self.prefix.trim_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{trimmed}/")
        }
    }

    /// `<scheme>://<host>:<port><prefix>job/<job>/<build>/api/json`
    ///
    /// Slashes in `job` stay path separators so folder jobs
    /// (`folder/job/name`) resolve; every other reserved byte is encoded.
    pub fn api_url(&self, job: &str, mode: CheckMode) -> Result<Url, ProbeError> {
        let base = format!(
            "{}://{}:{}{}",
            self.scheme(),
            self.hostname,
            self.port(),
            self.normalized_prefix()
        );
        let mut url = Url::parse(&base).map_err(|err| ProbeError::Usage {
            message: format!("cannot build a Jenkins URL from '{base}': {err}"),
        })?;

        url.path_segments_mut()
            .map_err(|_| ProbeError::Usage {
                message: format!("'{base}' cannot carry a path"),
            })?
            .pop_if_empty()
            .push("job")
            .extend(job.split('/'))
            .extend([mode.build_selector(), "api", "json"]);

        Ok(url)
    }
}
