//! Core types shared across the resolution pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A race weekend within a championship season.
///
/// Rounds are 1-based and unique per championship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeasonRound {
    /// Championship year
    pub season: u16,
    /// 1-based round number
    pub round: u8,
}

impl SeasonRound {
    pub fn new(season: u16, round: u8) -> Self {
        Self { season, round }
    }
}

/// Timed activities that can appear on a race weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionLabel {
    Fp1,
    Fp2,
    Fp3,
    SprintQualifying,
    Qualifying,
    Sprint,
    Race,
}

impl SessionLabel {
    /// Session names the lap-telemetry provider has used for this label, in
    /// priority order.
    ///
    /// Sprint qualifying has been renamed across seasons, so it carries the
    /// historical spellings; the resolver tries them in order.
    pub fn provider_names(self) -> &'static [&'static str] {
        match self {
            SessionLabel::Fp1 => &["Practice 1"],
            SessionLabel::Fp2 => &["Practice 2"],
            SessionLabel::Fp3 => &["Practice 3"],
            SessionLabel::SprintQualifying => &["Sprint Qualifying", "Sprint Shootout"],
            SessionLabel::Qualifying => &["Qualifying"],
            SessionLabel::Sprint => &["Sprint"],
            SessionLabel::Race => &["Race"],
        }
    }
}

impl fmt::Display for SessionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionLabel::Fp1 => "FP1",
            SessionLabel::Fp2 => "FP2",
            SessionLabel::Fp3 => "FP3",
            SessionLabel::SprintQualifying => "Sprint Qualifying",
            SessionLabel::Qualifying => "Qualifying",
            SessionLabel::Sprint => "Sprint",
            SessionLabel::Race => "Race",
        };
        f.write_str(name)
    }
}

/// One ranked row of a session classification.
///
/// Ordering is significant: rows are emitted in ascending `position`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationRow {
    /// 1-based finishing position
    pub position: u32,
    /// Canonical driver display name
    pub driver: String,
    /// Canonical constructor display name
    pub constructor: String,
    /// Primary time display (best lap, race time, or status)
    pub time: String,
    /// Leader-relative gap; [`crate::timing::LEADER_GAP`] for the leader
    pub gap: String,
    /// Laps completed, where the provider reports it
    pub laps: Option<u32>,
    /// Finishing status (e.g. "Finished", "+1 Lap", "Collision")
    pub status: Option<String>,
    /// Championship points awarded, for race and sprint rows
    pub points: Option<f64>,
}

/// Classification rows for one session.
///
/// `None` means "not yet available". An empty vector is never produced for a
/// session that genuinely ran.
pub type SessionRows = Option<Vec<ClassificationRow>>;

/// One championship standings row (driver or constructor table).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingRow {
    /// 1-based championship position
    pub position: u32,
    /// Driver or constructor display name
    pub name: String,
    /// Current team, for driver standings
    pub team: Option<String>,
    /// Points total
    pub points: f64,
    /// Season win count
    pub wins: u32,
}

/// Aggregate weekend output of the orchestrator.
///
/// Every field is independently `None` when that session is unavailable;
/// one session's failure never suppresses the others.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WeekendResults {
    pub fp1: SessionRows,
    pub fp2: SessionRows,
    pub fp3: SessionRows,
    pub sprint_qualifying: SessionRows,
    pub qualifying: SessionRows,
    pub sprint: SessionRows,
    pub race: SessionRows,
}

impl WeekendResults {
    pub fn has_fp1(&self) -> bool {
        self.fp1.is_some()
    }

    pub fn has_fp2(&self) -> bool {
        self.fp2.is_some()
    }

    pub fn has_fp3(&self) -> bool {
        self.fp3.is_some()
    }

    pub fn has_sprint_qualifying(&self) -> bool {
        self.sprint_qualifying.is_some()
    }

    pub fn has_qualifying(&self) -> bool {
        self.qualifying.is_some()
    }

    pub fn has_sprint(&self) -> bool {
        self.sprint.is_some()
    }

    pub fn has_race(&self) -> bool {
        self.race.is_some()
    }

    /// Whether the weekend followed the sprint format.
    ///
    /// A non-null sprint classification is the single signal deciding which
    /// practice set the orchestrator fetched.
    pub fn is_sprint_weekend(&self) -> bool {
        self.sprint.is_some()
    }

    /// Rows for a label, for label-driven consumers.
    pub fn get(&self, label: SessionLabel) -> &SessionRows {
        match label {
            SessionLabel::Fp1 => &self.fp1,
            SessionLabel::Fp2 => &self.fp2,
            SessionLabel::Fp3 => &self.fp3,
            SessionLabel::SprintQualifying => &self.sprint_qualifying,
            SessionLabel::Qualifying => &self.qualifying,
            SessionLabel::Sprint => &self.sprint,
            SessionLabel::Race => &self.race,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprint_qualifying_carries_historical_spellings_in_order() {
        let names = SessionLabel::SprintQualifying.provider_names();
        assert_eq!(names, &["Sprint Qualifying", "Sprint Shootout"]);
    }

    #[test]
    fn weekend_flags_track_presence() {
        let mut weekend = WeekendResults::default();
        assert!(!weekend.has_race());
        assert!(!weekend.is_sprint_weekend());

        weekend.sprint = Some(Vec::new());
        assert!(weekend.is_sprint_weekend());
        assert!(weekend.has_sprint());
        assert!(!weekend.has_qualifying());
    }

    #[test]
    fn get_addresses_every_label() {
        let mut weekend = WeekendResults::default();
        weekend.fp2 = Some(Vec::new());
        assert!(weekend.get(SessionLabel::Fp2).is_some());
        assert!(weekend.get(SessionLabel::Fp1).is_none());
        assert!(weekend.get(SessionLabel::Race).is_none());
    }
}
