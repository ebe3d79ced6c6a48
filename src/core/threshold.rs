use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::ThresholdError;

static RE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^([0-9]+)(.*)$").unwrap());

/// How a mode reads its `-w`/`-c` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdStrategy {
    /// Bare integer count of minutes.
    Minutes,
    /// `<digits>[s|m|h|d]`, minutes when the unit is omitted.
    Token,
}

impl ThresholdStrategy {
    pub fn parse(self, raw: &str) -> Result<Duration, ThresholdError> {
        match self {
            ThresholdStrategy::Minutes => {
                let trimmed = raw.trim();
                if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ThresholdError::InvalidFormat {
                        token: raw.to_string(),
                    });
                }
                scaled(raw, trimmed, 60)
            }
            ThresholdStrategy::Token => parse_duration_token(raw),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub warning: Duration,
    pub critical: Duration,
}

impl Thresholds {
    pub fn parse(
        strategy: ThresholdStrategy,
        warning: &str,
        critical: &str,
    ) -> Result<Self, (&'static str, ThresholdError)> {
        let warning = strategy.parse(warning).map_err(|err| ("warning", err))?;
        let critical = strategy.parse(critical).map_err(|err| ("critical", err))?;
        Ok(Self { warning, critical })
    }
}

/// Parses a compact duration such as `10d`, `24h`, `5m`, `90s` or `42`
/// (minutes).
pub fn parse_duration_token(token: &str) -> Result<Duration, ThresholdError> {
    let trimmed = token.trim();
    let capture = RE_TOKEN
        .captures(trimmed)
        .ok_or_else(|| ThresholdError::InvalidFormat {
            token: token.to_string(),
        })?;

    let digits = capture.get(1).map(|m| m.as_str()).unwrap_or_default();
    let unit = capture.get(2).map(|m| m.as_str()).unwrap_or_default();

    let multiplier = match unit {
        "" | "m" => 60,
        "s" => 1,
        "h" => 3600,
        "d" => 86_400,
        _ => {
            return Err(ThresholdError::InvalidUnit {
                token: token.to_string(),
            })
        }
    };

    scaled(token, digits, multiplier)
}

fn scaled(token: &str, digits: &str, multiplier: u64) -> Result<Duration, ThresholdError> {
    let out_of_range = || ThresholdError::OutOfRange {
        token: token.to_string(),
    };
    let value = digits.parse::<u64>().map_err(|_| out_of_range())?;
    let seconds = value.checked_mul(multiplier).ok_or_else(out_of_range)?;
    Ok(Duration::from_secs(seconds))
}
