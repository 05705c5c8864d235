//! Weekend orchestration.
//!
//! [`SessionClient`] is the single entry point for session-data resolution:
//! it owns both provider handles and assembles a full weekend of results
//! with per-session fault isolation. It is also the crate's logging seam:
//! lower-level components return values and errors, the orchestrator decides
//! what is worth a warning.

use std::sync::Arc;

use futures::future;
use tracing::{debug, info, warn};

use crate::Result;
use crate::gate::{GateConfig, RateGate};
use crate::laps;
use crate::meetings;
use crate::providers::classification::ClassificationProvider;
use crate::providers::telemetry::TelemetryProvider;
use crate::transport::{HttpTransport, Transport};
use crate::types::{ClassificationRow, SeasonRound, SessionLabel, StandingRow, WeekendResults};

/// Client configuration: provider endpoints plus rate-gate tuning.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the lap-telemetry provider (rate-limited)
    pub telemetry_base_url: String,
    /// Base URL of the classification provider (unthrottled)
    pub classification_base_url: String,
    /// Rate gate tuning for the telemetry provider
    pub gate: GateConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            telemetry_base_url: "https://api.openf1.org/v1".to_string(),
            classification_base_url: "https://api.jolpi.ca/ergast/f1".to_string(),
            gate: GateConfig::default(),
        }
    }
}

/// Unified entry point for session-data resolution.
///
/// All upstream access is mediated here; no other component of an
/// application should call the providers directly.
///
/// # Example
///
/// ```rust,no_run
/// use gridwire::SessionClient;
///
/// #[tokio::main]
/// async fn main() {
///     let client = SessionClient::new();
///     let weekend = client.fetch_all_sessions(2024, 5).await;
///
///     if let Some(rows) = &weekend.race {
///         for row in rows {
///             println!("{:2} {} ({})", row.position, row.driver, row.gap);
///         }
///     }
/// }
/// ```
pub struct SessionClient {
    telemetry: TelemetryProvider,
    classification: ClassificationProvider,
}

impl SessionClient {
    /// Create a client against the production providers.
    pub fn new() -> Self {
        Self::with_transport(Arc::new(HttpTransport::new()), ClientConfig::default())
    }

    /// Create a client over an injected transport and configuration.
    ///
    /// The rate gate is scoped to this client instance; independent clients
    /// never share limiter state.
    pub fn with_transport(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        let gate = RateGate::new(Arc::clone(&transport), config.gate);
        Self {
            telemetry: TelemetryProvider::new(gate, config.telemetry_base_url),
            classification: ClassificationProvider::new(transport, config.classification_base_url),
        }
    }

    /// Qualifying classification for a round.
    pub async fn fetch_qualifying(
        &self,
        season: u16,
        round: u8,
    ) -> Result<Option<Vec<ClassificationRow>>> {
        self.classification.qualifying(season, round).await
    }

    /// Sprint classification for a round.
    pub async fn fetch_sprint(
        &self,
        season: u16,
        round: u8,
    ) -> Result<Option<Vec<ClassificationRow>>> {
        self.classification.sprint(season, round).await
    }

    /// Race classification for a round.
    pub async fn fetch_race(
        &self,
        season: u16,
        round: u8,
    ) -> Result<Option<Vec<ClassificationRow>>> {
        self.classification.race(season, round).await
    }

    /// Driver championship standings for a season.
    pub async fn fetch_driver_standings(&self, season: u16) -> Result<Option<Vec<StandingRow>>> {
        self.classification.driver_standings(season).await
    }

    /// Constructor championship standings for a season.
    pub async fn fetch_constructor_standings(
        &self,
        season: u16,
    ) -> Result<Option<Vec<StandingRow>>> {
        self.classification.constructor_standings(season).await
    }

    /// Classification for a session the telemetry provider only exposes as
    /// raw laps: practice and sprint qualifying.
    ///
    /// Resolves the opaque session key, then rebuilds the ranking from lap
    /// records and the session's roster snapshot. `Ok(None)` when the
    /// session cannot be located or produced no valid laps.
    pub async fn fetch_practice(
        &self,
        season: u16,
        round: u8,
        label: SessionLabel,
    ) -> Result<Option<Vec<ClassificationRow>>> {
        let Some(session_key) =
            meetings::resolve_session_key(&self.telemetry, season, round, label).await?
        else {
            warn!(season, round, %label, "no session key resolved for round");
            return Ok(None);
        };

        let lap_records = self.telemetry.laps(session_key).await?;
        let roster = self.telemetry.drivers(session_key).await?;
        Ok(laps::build_classification(&lap_records, &roster))
    }

    /// Sprint-qualifying classification, via the lap-based path.
    pub async fn fetch_sprint_qualifying(
        &self,
        season: u16,
        round: u8,
    ) -> Result<Option<Vec<ClassificationRow>>> {
        self.fetch_practice(season, round, SessionLabel::SprintQualifying).await
    }

    /// Assemble every session result for a race weekend.
    ///
    /// Never fails: each session is fetched with individual fault isolation
    /// and degrades to `None` on error, so a partially populated weekend is
    /// always returned.
    ///
    /// The qualifying, sprint and race detection fetches run concurrently
    /// against the unthrottled provider. The presence of a sprint
    /// classification decides the weekend shape: sprint weekends carry FP1
    /// and sprint qualifying, conventional weekends FP1 through FP3. The
    /// shape-dependent fetches only start once detection completes.
    pub async fn fetch_all_sessions(&self, season: u16, round: u8) -> WeekendResults {
        info!(season, round, "resolving weekend sessions");

        let (qualifying, sprint, race) = future::join3(
            self.classification.qualifying(season, round),
            self.classification.sprint(season, round),
            self.classification.race(season, round),
        )
        .await;

        let mut weekend = WeekendResults {
            qualifying: self.degrade(SessionLabel::Qualifying, qualifying),
            sprint: self.degrade(SessionLabel::Sprint, sprint),
            race: self.degrade(SessionLabel::Race, race),
            ..WeekendResults::default()
        };

        if weekend.is_sprint_weekend() {
            debug!(season, round, "sprint weekend detected");
            weekend.fp1 = self.practice_or_none(season, round, SessionLabel::Fp1).await;
            weekend.sprint_qualifying =
                self.practice_or_none(season, round, SessionLabel::SprintQualifying).await;
        } else {
            debug!(season, round, "conventional weekend");
            weekend.fp1 = self.practice_or_none(season, round, SessionLabel::Fp1).await;
            weekend.fp2 = self.practice_or_none(season, round, SessionLabel::Fp2).await;
            weekend.fp3 = self.practice_or_none(season, round, SessionLabel::Fp3).await;
        }

        weekend
    }

    /// [`SessionClient::fetch_all_sessions`] keyed by [`SeasonRound`].
    pub async fn fetch_weekend(&self, weekend: SeasonRound) -> WeekendResults {
        self.fetch_all_sessions(weekend.season, weekend.round).await
    }

    /// Per-session fault isolation for lap-based sessions.
    async fn practice_or_none(
        &self,
        season: u16,
        round: u8,
        label: SessionLabel,
    ) -> Option<Vec<ClassificationRow>> {
        self.degrade(label, self.fetch_practice(season, round, label).await)
    }

    /// Convert a failed session lookup into an unavailable session.
    ///
    /// Unavailable and failed are observationally identical to the caller;
    /// the distinction only reaches the log.
    fn degrade(
        &self,
        label: SessionLabel,
        result: Result<Option<Vec<ClassificationRow>>>,
    ) -> Option<Vec<ClassificationRow>> {
        match result {
            Ok(rows) => rows,
            Err(err) => {
                warn!(%label, error = %err, "session fetch failed, degrading to unavailable");
                None
            }
        }
    }
}

impl Default for SessionClient {
    fn default() -> Self {
        Self::new()
    }
}
