//! Meeting and session resolution.
//!
//! Maps `(season, round, label)` to the lap-telemetry provider's opaque
//! session key. The provider has no notion of round numbers: sessions are
//! grouped into meetings, meetings are ordered by their earliest session
//! start, and the round indexes that chronological order positionally.
//!
//! That positional alignment assumes the provider's chronological meeting
//! order matches the championship's round numbering. A cancelled or
//! reordered meeting on the provider side misaligns every later round of the
//! season; nothing here can verify it locally.

use std::collections::HashMap;

use crate::Result;
use crate::providers::telemetry::{SessionRecord, TelemetryProvider};
use crate::types::SessionLabel;

/// Resolve the provider session key for one session of a race weekend.
///
/// Fetches the season's session list in one gated call, then resolves
/// positionally. Returns `Ok(None)` when the round is out of range or the
/// meeting has no session under any of the label's known names; structural
/// mismatch is never an error.
pub async fn resolve_session_key(
    provider: &TelemetryProvider,
    season: u16,
    round: u8,
    label: SessionLabel,
) -> Result<Option<i64>> {
    let sessions = provider.sessions_for_year(season).await?;
    Ok(resolve_in_sessions(&sessions, round, label))
}

/// Pure resolution over an already-fetched season session list.
pub fn resolve_in_sessions(
    sessions: &[SessionRecord],
    round: u8,
    label: SessionLabel,
) -> Option<i64> {
    if round == 0 {
        return None;
    }

    let meeting_key = *ordered_meetings(sessions).get(round as usize - 1)?;

    // Session naming has changed across seasons; try the label's known
    // spellings in priority order.
    for name in label.provider_names() {
        if let Some(session) = sessions
            .iter()
            .find(|s| s.meeting_key == meeting_key && s.session_name == *name)
        {
            return Some(session.session_key);
        }
    }

    None
}

/// Meeting keys in chronological order of each meeting's earliest session
/// start.
///
/// Provider timestamps are uniform ISO-8601 with a fixed UTC offset, so
/// lexical order is chronological. Sessions without a start time do not
/// contribute to a meeting's ordering; meetings with no dated session at all
/// sort behind the dated ones, by key as a stable tiebreak.
fn ordered_meetings(sessions: &[SessionRecord]) -> Vec<i64> {
    let mut earliest: HashMap<i64, Option<&str>> = HashMap::new();
    for session in sessions {
        let start = session.date_start.as_deref();
        earliest
            .entry(session.meeting_key)
            .and_modify(|current| {
                if let Some(start) = start {
                    match current {
                        Some(existing) if *existing <= start => {}
                        _ => *current = Some(start),
                    }
                }
            })
            .or_insert(start);
    }

    let mut meetings: Vec<(i64, Option<&str>)> = earliest.into_iter().collect();
    meetings.sort_by(|a, b| match (a.1, b.1) {
        (Some(sa), Some(sb)) => sa.cmp(sb).then(a.0.cmp(&b.0)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    });
    meetings.into_iter().map(|(key, _)| key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(meeting: i64, key: i64, name: &str, start: &str) -> SessionRecord {
        SessionRecord {
            session_key: key,
            meeting_key: meeting,
            session_name: name.to_string(),
            session_type: None,
            date_start: if start.is_empty() { None } else { Some(start.to_string()) },
        }
    }

    /// Three meetings, deliberately out of key order but in date order
    /// 300 -> 100 -> 200.
    fn season_sessions() -> Vec<SessionRecord> {
        vec![
            session(100, 11, "Practice 1", "2024-03-08T11:30:00+00:00"),
            session(100, 12, "Qualifying", "2024-03-09T16:00:00+00:00"),
            session(100, 13, "Race", "2024-03-10T15:00:00+00:00"),
            session(200, 21, "Practice 1", "2024-03-22T01:30:00+00:00"),
            session(200, 22, "Sprint Shootout", "2024-03-22T05:30:00+00:00"),
            session(200, 23, "Sprint", "2024-03-23T01:00:00+00:00"),
            session(200, 24, "Race", "2024-03-24T04:00:00+00:00"),
            session(300, 31, "Practice 1", "2024-02-29T11:30:00+00:00"),
            session(300, 32, "Practice 2", "2024-02-29T15:00:00+00:00"),
            session(300, 33, "Race", "2024-03-02T15:00:00+00:00"),
        ]
    }

    #[test]
    fn rounds_address_meetings_in_chronological_order() {
        let sessions = season_sessions();
        assert_eq!(resolve_in_sessions(&sessions, 1, SessionLabel::Fp1), Some(31));
        assert_eq!(resolve_in_sessions(&sessions, 2, SessionLabel::Fp1), Some(11));
        assert_eq!(resolve_in_sessions(&sessions, 3, SessionLabel::Fp1), Some(21));
    }

    #[test]
    fn meeting_start_is_earliest_session_start() {
        // Round 1's meeting (300) starts Feb 29 even though its race is Mar 2,
        // after meeting 100's practice on Mar 8 has no bearing.
        let sessions = season_sessions();
        assert_eq!(resolve_in_sessions(&sessions, 1, SessionLabel::Race), Some(33));
    }

    #[test]
    fn sprint_qualifying_falls_back_to_historical_spelling() {
        let sessions = season_sessions();
        // Meeting 200 only knows the "Sprint Shootout" spelling.
        assert_eq!(resolve_in_sessions(&sessions, 3, SessionLabel::SprintQualifying), Some(22));
    }

    #[test]
    fn out_of_range_round_is_none_not_error() {
        let sessions = season_sessions();
        assert_eq!(resolve_in_sessions(&sessions, 0, SessionLabel::Race), None);
        assert_eq!(resolve_in_sessions(&sessions, 4, SessionLabel::Race), None);
        assert_eq!(resolve_in_sessions(&[], 1, SessionLabel::Race), None);
    }

    #[test]
    fn missing_session_name_in_meeting_is_none() {
        let sessions = season_sessions();
        // Meeting 300 has no FP3.
        assert_eq!(resolve_in_sessions(&sessions, 1, SessionLabel::Fp3), None);
    }

    #[test]
    fn undated_meetings_sort_behind_dated_ones() {
        let sessions = vec![
            session(500, 51, "Race", ""),
            session(400, 41, "Race", "2024-05-05T14:00:00+00:00"),
        ];
        assert_eq!(resolve_in_sessions(&sessions, 1, SessionLabel::Race), Some(41));
        assert_eq!(resolve_in_sessions(&sessions, 2, SessionLabel::Race), Some(51));
    }
}
