//! Classification reconstruction from raw lap records.
//!
//! The lap-telemetry provider has no results endpoint for practice and
//! sprint-qualifying sessions, so the ranking is rebuilt here from per-lap
//! telemetry: each driver's personal best over the valid laps, ranked
//! ascending. Pure input → output, no provider access and no logging.

use std::collections::HashMap;

use crate::identity;
use crate::providers::telemetry::{LapRecord, SessionDriver};
use crate::timing::{LEADER_GAP, format_lap_millis, gap_millis};
use crate::types::ClassificationRow;

/// Build a ranked classification from unordered lap records.
///
/// Laps with a null or zero duration and pit-out laps are discarded as
/// non-representative attempts. Returns `None` when no driver set a valid
/// lap (distinct from an empty vector, which would wrongly signal "session
/// ran with no participants").
pub fn build_classification(
    laps: &[LapRecord],
    roster: &[SessionDriver],
) -> Option<Vec<ClassificationRow>> {
    let mut personal_best: HashMap<u32, f64> = HashMap::new();
    for lap in laps {
        if lap.is_pit_out_lap {
            continue;
        }
        let Some(duration) = lap.lap_duration else { continue };
        if duration <= 0.0 {
            continue;
        }
        personal_best
            .entry(lap.driver_number)
            .and_modify(|best| {
                if duration < *best {
                    *best = duration;
                }
            })
            .or_insert(duration);
    }

    if personal_best.is_empty() {
        return None;
    }

    let mut ranked: Vec<(u32, f64)> = personal_best.into_iter().collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    let leader_millis = to_millis(ranked[0].1);

    let rows = ranked
        .into_iter()
        .enumerate()
        .map(|(index, (number, best))| {
            let best_millis = to_millis(best);
            let snapshot = roster.iter().find(|d| d.driver_number == number);

            let driver = identity::resolve_driver(
                Some(number),
                snapshot.and_then(SessionDriver::family_name),
            )
            .unwrap_or_else(|| format!("Driver #{number}"));

            let constructor = snapshot
                .and_then(|d| d.team_name.as_deref())
                .map(identity::resolve_team)
                .or_else(|| identity::team_for_number(number).map(str::to_string))
                .unwrap_or_default();

            let gap = if index == 0 {
                LEADER_GAP.to_string()
            } else {
                gap_millis(best_millis, leader_millis)
            };

            ClassificationRow {
                position: index as u32 + 1,
                driver,
                constructor,
                time: format_lap_millis(best_millis),
                gap,
                laps: None,
                status: None,
                points: None,
            }
        })
        .collect();

    Some(rows)
}

fn to_millis(seconds: f64) -> u64 {
    (seconds * 1000.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lap(driver: u32, number: u32, duration: Option<f64>, pit_out: bool) -> LapRecord {
        LapRecord { driver_number: driver, lap_number: number, lap_duration: duration, is_pit_out_lap: pit_out }
    }

    fn snapshot(driver: u32, full: &str, team: &str) -> SessionDriver {
        SessionDriver {
            driver_number: driver,
            full_name: Some(full.to_string()),
            last_name: None,
            team_name: Some(team.to_string()),
        }
    }

    #[test]
    fn ranks_by_personal_best_and_formats_gaps() {
        // d1: 92.5 valid, 91.0 pit-out (discarded), 90.8 valid -> best 90.8
        // d2: 91.2 valid -> +0.400
        let laps = vec![
            lap(1, 1, Some(92.5), false),
            lap(1, 2, Some(91.0), true),
            lap(1, 3, Some(90.8), false),
            lap(4, 1, Some(91.2), false),
        ];
        let roster = vec![
            snapshot(1, "Max Verstappen", "Red Bull Racing"),
            snapshot(4, "Lando Norris", "McLaren"),
        ];

        let rows = build_classification(&laps, &roster).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[0].driver, "Max Verstappen");
        assert_eq!(rows[0].constructor, "Red Bull");
        assert_eq!(rows[0].time, "1:30.800");
        assert_eq!(rows[0].gap, LEADER_GAP);

        assert_eq!(rows[1].position, 2);
        assert_eq!(rows[1].driver, "Lando Norris");
        assert_eq!(rows[1].time, "1:31.200");
        assert_eq!(rows[1].gap, "+0.400");
    }

    #[test]
    fn empty_lap_set_yields_none_not_empty_vec() {
        assert!(build_classification(&[], &[]).is_none());
    }

    #[test]
    fn all_invalid_laps_yield_none() {
        let laps = vec![
            lap(1, 1, None, false),
            lap(1, 2, Some(0.0), false),
            lap(4, 1, Some(89.9), true),
        ];
        assert!(build_classification(&laps, &[]).is_none());
    }

    #[test]
    fn missing_roster_entry_gets_placeholder_and_roster_team_fallback() {
        let laps = vec![lap(99, 1, Some(95.0), false), lap(81, 1, Some(94.0), false)];
        // 81 is on the static roster but absent from the session snapshot.
        let rows = build_classification(&laps, &[]).unwrap();

        assert_eq!(rows[0].driver, "Oscar Piastri");
        assert_eq!(rows[0].constructor, "McLaren");
        assert_eq!(rows[1].driver, "Driver #99");
        assert_eq!(rows[1].constructor, "");
    }

    #[test]
    fn zero_duration_never_beats_a_real_lap() {
        let laps = vec![lap(1, 1, Some(0.0), false), lap(1, 2, Some(90.0), false)];
        let rows = build_classification(&laps, &[]).unwrap();
        assert_eq!(rows[0].time, "1:30.000");
    }
}
