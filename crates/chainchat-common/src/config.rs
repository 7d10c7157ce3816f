use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_AGENT_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the remote agent service.
///
/// The reference deployment exposed no timeout on the primary query call,
/// which let a stalled service hang a conversation forever. Here the timeout
/// always applies; expiry surfaces as a connection failure for the turn.
#[derive(Debug, Clone)]
pub struct AgentServiceConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl AgentServiceConfig {
    /// Load settings from `CHAINCHAT_AGENT_URL` and `CHAINCHAT_TIMEOUT_SECS`,
    /// falling back to the local-service defaults.
    pub fn from_env() -> Result<Self> {
        let base_url =
            env::var("CHAINCHAT_AGENT_URL").unwrap_or_else(|_| DEFAULT_AGENT_URL.to_string());
        let timeout = parse_timeout(env::var("CHAINCHAT_TIMEOUT_SECS").ok().as_deref())?;
        Ok(Self { base_url, timeout })
    }
}

fn parse_timeout(raw: Option<&str>) -> Result<Duration> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    };
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("invalid CHAINCHAT_TIMEOUT_SECS value: {raw}")))?;
    if secs == 0 {
        return Err(Error::Config(
            "CHAINCHAT_TIMEOUT_SECS must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

/// Read a required environment variable, treating empty values as missing.
pub fn require_env(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::Config(format!("{name} is not set")))
}

/// Read an optional environment variable, treating empty values as absent.
pub fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
