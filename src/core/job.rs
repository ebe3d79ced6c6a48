use serde::{Deserialize, Deserializer};

/// Outcome of the last completed run, as reported by Jenkins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildResult {
    Success,
    Unstable,
    Failure,
    Aborted,
    Other(String),
}

impl From<&str> for BuildResult {
    fn from(raw: &str) -> Self {
        match raw {
            "SUCCESS" => BuildResult::Success,
            "UNSTABLE" => BuildResult::Unstable,
            "FAILURE" => BuildResult::Failure,
            "ABORTED" => BuildResult::Aborted,
            other => BuildResult::Other(other.to_string()),
        }
    }
}

/// The subset of `job/<name>/<build>/api/json` the checks look at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobSnapshot {
    pub building: bool,
    #[serde(default = "unknown_result", deserialize_with = "result_or_null")]
    pub result: BuildResult,
    #[serde(rename = "duration", default)]
    pub duration_millis: i64,
    #[serde(rename = "timestamp", deserialize_with = "millis_number_or_string")]
    pub start_timestamp_millis: i64,
    #[serde(rename = "url")]
    pub console_url: String,
}

impl JobSnapshot {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

fn unknown_result() -> BuildResult {
    BuildResult::Other(String::new())
}

// Jenkins sends `"result": null` while a build is running.
fn result_or_null<'de, D>(deserializer: D) -> Result<BuildResult, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(BuildResult::from).unwrap_or_else(unknown_result))
}

fn millis_number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Millis {
        Number(i64),
        Text(String),
    }

    match Millis::deserialize(deserializer)? {
        Millis::Number(value) => Ok(value),
        Millis::Text(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid timestamp '{text}'"))),
    }
}
