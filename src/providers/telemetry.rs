//! Lap-telemetry provider adapter.
//!
//! This provider exposes raw per-session data only: a season-wide session
//! list, per-lap records, and a driver roster snapshot. It publishes no
//! finished classifications, so everything here feeds the resolver and the
//! lap classification builder. Every call goes through the rate gate.

use serde::Deserialize;

use crate::Result;
use crate::ResolveError;
use crate::gate::RateGate;

/// One session row from `/sessions?year=Y`.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionRecord {
    /// Opaque session identifier
    pub session_key: i64,
    /// Opaque meeting (race weekend) identifier
    pub meeting_key: i64,
    /// Human session name, e.g. "Practice 1" or "Sprint Shootout"
    pub session_name: String,
    /// Coarse session type, e.g. "Practice" or "Race"
    #[serde(default)]
    pub session_type: Option<String>,
    /// ISO-8601 session start
    #[serde(default)]
    pub date_start: Option<String>,
}

/// One raw lap from `/laps?session_key=K`. Provider-owned and immutable.
#[derive(Debug, Clone, Deserialize)]
pub struct LapRecord {
    pub driver_number: u32,
    pub lap_number: u32,
    /// Lap duration in seconds; absent for in/out laps and red flags
    #[serde(default)]
    pub lap_duration: Option<f64>,
    /// Whether the lap started from the pit exit
    #[serde(default)]
    pub is_pit_out_lap: bool,
}

/// Roster snapshot entry from `/drivers?session_key=K`.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionDriver {
    pub driver_number: u32,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
}

impl SessionDriver {
    /// Best-effort family name: the provider's `last_name` field, falling
    /// back to the final token of `full_name`.
    pub fn family_name(&self) -> Option<&str> {
        if let Some(last) = self.last_name.as_deref() {
            if !last.is_empty() {
                return Some(last);
            }
        }
        self.full_name.as_deref().and_then(|full| full.split_whitespace().next_back())
    }
}

/// Gated access to the lap-telemetry provider endpoints.
pub struct TelemetryProvider {
    gate: RateGate,
    base_url: String,
}

impl TelemetryProvider {
    pub fn new(gate: RateGate, base_url: impl Into<String>) -> Self {
        Self { gate, base_url: base_url.into() }
    }

    /// All sessions of a season, across every meeting.
    pub async fn sessions_for_year(&self, season: u16) -> Result<Vec<SessionRecord>> {
        let url = format!("{}/sessions?year={}", self.base_url, season);
        self.fetch_list(&url, "telemetry session list").await
    }

    /// Raw lap records for one session.
    pub async fn laps(&self, session_key: i64) -> Result<Vec<LapRecord>> {
        let url = format!("{}/laps?session_key={}", self.base_url, session_key);
        self.fetch_list(&url, "telemetry lap records").await
    }

    /// Driver roster snapshot for one session.
    pub async fn drivers(&self, session_key: i64) -> Result<Vec<SessionDriver>> {
        let url = format!("{}/drivers?session_key={}", self.base_url, session_key);
        self.fetch_list(&url, "telemetry driver snapshot").await
    }

    async fn fetch_list<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        context: &str,
    ) -> Result<Vec<T>> {
        let response = self.gate.fetch(url).await?;
        // A missing resource is an expected absence, same as an empty list.
        if response.status == 404 {
            return Ok(Vec::new());
        }
        if !response.is_success() {
            return Err(ResolveError::status(url, response.status));
        }
        response.json(context)
    }
}
