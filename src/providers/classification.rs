//! Direct-classification provider adapter.
//!
//! The classification provider publishes finished results for qualifying,
//! sprint and race sessions, plus championship standings, as nested JSON
//! envelopes. The wire structs here are the only place that shape exists;
//! everything past this boundary works with [`ClassificationRow`] and
//! [`StandingRow`].
//!
//! This provider is independent of the lap-telemetry provider and is not
//! rate-limited, so calls go straight through the transport.

use std::sync::Arc;

use serde::Deserialize;

use crate::identity;
use crate::timing::{LEADER_GAP, gap_millis, parse_clock_time};
use crate::transport::Transport;
use crate::types::{ClassificationRow, StandingRow};
use crate::{ResolveError, Result};

// Wire shapes. Field names follow the provider's PascalCase envelope.

#[derive(Debug, Deserialize)]
struct ClassificationEnvelope {
    #[serde(rename = "MRData")]
    data: RaceData,
}

#[derive(Debug, Deserialize)]
struct RaceData {
    #[serde(rename = "RaceTable")]
    race_table: RaceTable,
}

#[derive(Debug, Deserialize)]
struct RaceTable {
    #[serde(rename = "Races", default)]
    races: Vec<RaceEntry>,
}

#[derive(Debug, Deserialize)]
struct RaceEntry {
    #[serde(rename = "QualifyingResults", default)]
    qualifying_results: Vec<WireResult>,
    #[serde(rename = "SprintResults", default)]
    sprint_results: Vec<WireResult>,
    #[serde(rename = "Results", default)]
    race_results: Vec<WireResult>,
}

#[derive(Debug, Deserialize)]
struct WireResult {
    #[serde(default)]
    position: Option<String>,
    #[serde(rename = "Driver")]
    driver: WireDriver,
    #[serde(rename = "Constructor")]
    constructor: WireConstructor,
    #[serde(rename = "Q1", default)]
    q1: Option<String>,
    #[serde(rename = "Q2", default)]
    q2: Option<String>,
    #[serde(rename = "Q3", default)]
    q3: Option<String>,
    #[serde(rename = "Time", default)]
    time: Option<WireTime>,
    #[serde(default)]
    laps: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    points: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireDriver {
    #[serde(rename = "givenName")]
    given_name: String,
    #[serde(rename = "familyName")]
    family_name: String,
    #[serde(rename = "permanentNumber", default)]
    permanent_number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireConstructor {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WireTime {
    time: String,
}

#[derive(Debug, Deserialize)]
struct StandingsEnvelope {
    #[serde(rename = "MRData")]
    data: StandingsData,
}

#[derive(Debug, Deserialize)]
struct StandingsData {
    #[serde(rename = "StandingsTable")]
    table: StandingsTable,
}

#[derive(Debug, Deserialize)]
struct StandingsTable {
    #[serde(rename = "StandingsLists", default)]
    lists: Vec<StandingsList>,
}

#[derive(Debug, Deserialize)]
struct StandingsList {
    #[serde(rename = "DriverStandings", default)]
    driver_standings: Vec<WireStanding>,
    #[serde(rename = "ConstructorStandings", default)]
    constructor_standings: Vec<WireStanding>,
}

#[derive(Debug, Deserialize)]
struct WireStanding {
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    points: Option<String>,
    #[serde(default)]
    wins: Option<String>,
    #[serde(rename = "Driver", default)]
    driver: Option<WireDriver>,
    #[serde(rename = "Constructor", default)]
    constructor: Option<WireConstructor>,
    #[serde(rename = "Constructors", default)]
    constructors: Vec<WireConstructor>,
}

/// Unthrottled access to the classification provider endpoints.
pub struct ClassificationProvider {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl ClassificationProvider {
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        Self { transport, base_url: base_url.into() }
    }

    /// Qualifying classification for a round; `Ok(None)` when the session
    /// has not happened or has no published result yet.
    pub async fn qualifying(
        &self,
        season: u16,
        round: u8,
    ) -> Result<Option<Vec<ClassificationRow>>> {
        let race = self
            .fetch_race_table(&format!("{season}/{round}/qualifying.json"), "qualifying results")
            .await?;
        Ok(race.map(|r| qualifying_rows(&r.qualifying_results)).filter(|rows| !rows.is_empty()))
    }

    /// Sprint classification for a round.
    pub async fn sprint(&self, season: u16, round: u8) -> Result<Option<Vec<ClassificationRow>>> {
        let race = self
            .fetch_race_table(&format!("{season}/{round}/sprint.json"), "sprint results")
            .await?;
        Ok(race.map(|r| finishing_rows(&r.sprint_results)).filter(|rows| !rows.is_empty()))
    }

    /// Race classification for a round.
    pub async fn race(&self, season: u16, round: u8) -> Result<Option<Vec<ClassificationRow>>> {
        let race = self
            .fetch_race_table(&format!("{season}/{round}/results.json"), "race results")
            .await?;
        Ok(race.map(|r| finishing_rows(&r.race_results)).filter(|rows| !rows.is_empty()))
    }

    /// Driver championship standings for a season.
    pub async fn driver_standings(&self, season: u16) -> Result<Option<Vec<StandingRow>>> {
        let list = self
            .fetch_standings(&format!("{season}/driverStandings.json"), "driver standings")
            .await?;
        Ok(list
            .map(|l| standing_rows(&l.driver_standings, StandingKind::Driver))
            .filter(|rows| !rows.is_empty()))
    }

    /// Constructor championship standings for a season.
    pub async fn constructor_standings(&self, season: u16) -> Result<Option<Vec<StandingRow>>> {
        let list = self
            .fetch_standings(
                &format!("{season}/constructorStandings.json"),
                "constructor standings",
            )
            .await?;
        Ok(list
            .map(|l| standing_rows(&l.constructor_standings, StandingKind::Constructor))
            .filter(|rows| !rows.is_empty()))
    }

    async fn fetch_race_table(&self, path: &str, context: &str) -> Result<Option<RaceEntry>> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.transport.get(&url).await?;
        // A missing round is an expected absence, not an error.
        if response.status == 404 {
            return Ok(None);
        }
        if !response.is_success() {
            return Err(ResolveError::status(&url, response.status));
        }
        let envelope: ClassificationEnvelope = response.json(context)?;
        Ok(envelope.data.race_table.races.into_iter().next())
    }

    async fn fetch_standings(&self, path: &str, context: &str) -> Result<Option<StandingsList>> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.transport.get(&url).await?;
        if response.status == 404 {
            return Ok(None);
        }
        if !response.is_success() {
            return Err(ResolveError::status(&url, response.status));
        }
        let envelope: StandingsEnvelope = response.json(context)?;
        Ok(envelope.data.table.lists.into_iter().next())
    }
}

enum StandingKind {
    Driver,
    Constructor,
}

/// Qualifying rows carry the best of Q3/Q2/Q1 as the primary time and a
/// computed leader-relative gap.
fn qualifying_rows(results: &[WireResult]) -> Vec<ClassificationRow> {
    let leader_millis = results.first().and_then(best_qualifying_millis);

    results
        .iter()
        .enumerate()
        .map(|(index, result)| {
            let best = best_qualifying_time(result);
            let gap = if index == 0 {
                LEADER_GAP.to_string()
            } else {
                // No computable gap stays blank; the placeholder is reserved
                // for the leader row.
                match (best.and_then(parse_clock_time), leader_millis) {
                    (Some(millis), Some(leader)) => gap_millis(millis, leader),
                    _ => String::new(),
                }
            };

            ClassificationRow {
                position: wire_position(result.position.as_deref(), index),
                driver: display_driver(&result.driver),
                constructor: identity::resolve_team(&result.constructor.name),
                time: best.unwrap_or_default().to_string(),
                gap,
                laps: None,
                status: None,
                points: None,
            }
        })
        .collect()
}

/// Sprint and race rows: the provider already reports the winner's total
/// time and leader-relative times for everyone classified on the lead lap.
fn finishing_rows(results: &[WireResult]) -> Vec<ClassificationRow> {
    results
        .iter()
        .enumerate()
        .map(|(index, result)| {
            let provider_time = result.time.as_ref().map(|t| t.time.as_str());
            let time = provider_time
                .or(result.status.as_deref())
                .unwrap_or_default()
                .to_string();

            let gap = if index == 0 {
                LEADER_GAP.to_string()
            } else {
                provider_time
                    .filter(|t| t.starts_with('+'))
                    .map(str::to_string)
                    .unwrap_or_else(|| LEADER_GAP.to_string())
            };

            ClassificationRow {
                position: wire_position(result.position.as_deref(), index),
                driver: display_driver(&result.driver),
                constructor: identity::resolve_team(&result.constructor.name),
                time,
                gap,
                laps: result.laps.as_deref().and_then(|l| l.parse().ok()),
                status: result.status.clone(),
                points: result.points.as_deref().and_then(|p| p.parse().ok()),
            }
        })
        .collect()
}

fn standing_rows(standings: &[WireStanding], kind: StandingKind) -> Vec<StandingRow> {
    standings
        .iter()
        .enumerate()
        .map(|(index, standing)| {
            let (name, team) = match kind {
                StandingKind::Driver => {
                    let name = standing
                        .driver
                        .as_ref()
                        .map(display_driver)
                        .unwrap_or_default();
                    let team = standing
                        .constructors
                        .last()
                        .map(|c| identity::resolve_team(&c.name));
                    (name, team)
                }
                StandingKind::Constructor => {
                    let name = standing
                        .constructor
                        .as_ref()
                        .map(|c| identity::resolve_team(&c.name))
                        .unwrap_or_default();
                    (name, None)
                }
            };

            StandingRow {
                position: wire_position(standing.position.as_deref(), index),
                name,
                team,
                points: standing.points.as_deref().and_then(|p| p.parse().ok()).unwrap_or(0.0),
                wins: standing.wins.as_deref().and_then(|w| w.parse().ok()).unwrap_or(0),
            }
        })
        .collect()
}

/// Position from the wire, falling back to the row's rank in the payload.
fn wire_position(raw: Option<&str>, index: usize) -> u32 {
    raw.and_then(|p| p.parse().ok()).unwrap_or(index as u32 + 1)
}

/// Canonical display name where the roster knows the driver, the provider's
/// own naming otherwise.
fn display_driver(driver: &WireDriver) -> String {
    let number = driver.permanent_number.as_deref().and_then(|n| n.parse().ok());
    identity::roster_match(number, Some(&driver.family_name))
        .unwrap_or_else(|| format!("{} {}", driver.given_name, driver.family_name))
}

fn best_qualifying_time(result: &WireResult) -> Option<&str> {
    [&result.q3, &result.q2, &result.q1]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .find(|t| !t.is_empty())
}

fn best_qualifying_millis(result: &WireResult) -> Option<u64> {
    best_qualifying_time(result).and_then(parse_clock_time)
}
