use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use reqwest::Url;
use tracing::{debug, warn};

use crate::core::error::ProbeError;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Basic auth is only sent when both halves are present.
    pub fn basic(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some((user.as_str(), pass.as_str()))
            }
            _ => None,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// One-shot blocking client for the Jenkins remote access API.
pub struct JenkinsClient {
    http: Client,
    credentials: Credentials,
}

impl JenkinsClient {
    pub fn new(timeout: Duration, credentials: Credentials) -> Result<Self, ProbeError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ProbeError::Client { source })?;
        Ok(Self { http, credentials })
    }

    /// GETs `url` and returns the body. No retries.
    pub fn fetch(&self, url: &Url) -> Result<String, ProbeError> {
        let mut request = self.http.get(url.clone()).header(
            USER_AGENT,
            concat!("check_jenkins/", env!("CARGO_PKG_VERSION")),
        );
        if let Some((user, pass)) = self.credentials.basic() {
            request = request.basic_auth(user, Some(pass));
        }

        debug!(url = %url, authenticated = self.credentials.basic().is_some(), "querying jenkins");

        let response = request.send().map_err(|source| ProbeError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "jenkins refused the query");
            return Err(ProbeError::Remote {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|source| ProbeError::Transport {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_needs_both_parts() {
        let none = Credentials::default();
        assert_eq!(none.basic(), None);

        let user_only = Credentials {
            username: Some("admin".to_string()),
            password: None,
        };
        assert_eq!(user_only.basic(), None);

        let both = Credentials {
            username: Some("admin".to_string()),
            password: Some("secret".to_string()),
        };
        assert_eq!(both.basic(), Some(("admin", "secret")));
    }

    #[test]
    fn debug_output_hides_password() {
        let creds = Credentials {
            username: Some("admin".to_string()),
            password: Some("secret".to_string()),
        };
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("secret"));
    }
}
