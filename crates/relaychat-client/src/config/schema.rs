use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;
use relaychat_core::error::{RelayChatError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub client: ClientSection,

    #[serde(default)]
    pub sessions: Vec<SessionConfig>,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RelayChatError::UnsupportedVersion);
        }
        if self.sessions.is_empty() {
            return Err(RelayChatError::BadRequest("sessions must not be empty".into()));
        }

        self.client.validate()?;

        let mut seen = HashSet::new();
        for s in &self.sessions {
            s.validate()?;
            if !seen.insert(s.id.as_str()) {
                return Err(RelayChatError::DuplicateSessionId(s.id.clone()));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            connect_timeout_ms: default_connect_timeout_ms(),
            outbound_queue: default_outbound_queue(),
        }
    }
}

impl ClientSection {
    pub fn validate(&self) -> Result<()> {
        if !(1000..=60000).contains(&self.connect_timeout_ms) {
            return Err(RelayChatError::BadRequest(
                "client.connect_timeout_ms must be between 1000 and 60000".into(),
            ));
        }
        if !(1..=65536).contains(&self.outbound_queue) {
            return Err(RelayChatError::BadRequest(
                "client.outbound_queue must be between 1 and 65536".into(),
            ));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

fn default_connect_timeout_ms() -> u64 {
    10000
}
fn default_outbound_queue() -> usize {
    1024
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    pub id: String,
    pub address: String,
    /// Default recipient for `trigger_send`.
    #[serde(default)]
    pub peer: Option<String>,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(RelayChatError::BadRequest("session id must not be empty".into()));
        }
        if !(self.address.starts_with("ws://") || self.address.starts_with("wss://")) {
            return Err(RelayChatError::BadRequest(format!(
                "session {} address must be a ws:// or wss:// url",
                self.id
            )));
        }
        if matches!(&self.peer, Some(p) if p.trim().is_empty()) {
            return Err(RelayChatError::BadRequest(format!(
                "session {} peer must not be empty",
                self.id
            )));
        }
        Ok(())
    }
}
