use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThresholdError {
    #[error("'{token}': please use a valid unit (s, m, h, d)")]
    InvalidUnit { token: String },
    #[error("'{token}': expected a number optionally followed by s, m, h or d")]
    InvalidFormat { token: String },
    #[error("'{token}': duration is too large")]
    OutOfRange { token: String },
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{message}")]
    Usage { message: String },
    #[error("invalid {flag} threshold {source}")]
    Threshold {
        flag: &'static str,
        source: ThresholdError,
    },
    #[error("CRITICAL: Error on {url} Double check the server name")]
    Transport {
        url: String,
        source: reqwest::Error,
    },
    #[error("CRITICAL: Error on {url} does the job exist or ever ran ?")]
    Remote { url: String, status: u16 },
    #[error("CRITICAL: cannot set up the HTTP client: {source}")]
    Client { source: reqwest::Error },
    #[error("CRITICAL: Error on {url} unreadable reply from Jenkins: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

impl ProbeError {
    /// Every fatal path reports as a critical check.
    pub fn exit_code(&self) -> i32 {
        2
    }
}
