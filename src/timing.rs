//! Lap-time parsing and gap formatting.
//!
//! Pure helpers shared by the lap classification builder and the
//! direct-classification adapters. Times are carried as whole milliseconds;
//! gaps are rendered leader-relative.

/// Placeholder gap shown for the classification leader, never `+0.000`.
pub const LEADER_GAP: &str = "—";

/// Parse a clock-formatted lap time into milliseconds.
///
/// Accepts `"1:23.456"`, `"23.456"` and `"83"` style inputs. Fractions are
/// interpreted as decimal seconds regardless of digit count, so `"1:23.4"`
/// is 83400 ms. Returns `None` for anything that does not parse.
pub fn parse_clock_time(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let (minutes, rest) = match raw.split_once(':') {
        Some((m, rest)) => (m.parse::<u64>().ok()?, rest),
        None => (0, raw),
    };

    let (seconds, millis) = match rest.split_once('.') {
        Some((s, frac)) => (s.parse::<u64>().ok()?, parse_fraction_millis(frac)?),
        None => (rest.parse::<u64>().ok()?, 0),
    };

    Some(minutes * 60_000 + seconds * 1_000 + millis)
}

/// Decimal fraction of a second, normalized to milliseconds.
fn parse_fraction_millis(frac: &str) -> Option<u64> {
    if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut normalized = frac.to_string();
    normalized.truncate(3);
    while normalized.len() < 3 {
        normalized.push('0');
    }
    normalized.parse().ok()
}

/// Render milliseconds as a clock time: `"1:23.456"`, or `"23.456"` under a
/// minute.
pub fn format_lap_millis(millis: u64) -> String {
    let minutes = millis / 60_000;
    let seconds = (millis % 60_000) / 1_000;
    let rest = millis % 1_000;
    if minutes > 0 {
        format!("{minutes}:{seconds:02}.{rest:03}")
    } else {
        format!("{seconds}.{rest:03}")
    }
}

/// Leader-relative gap, three decimal places with a leading `+`.
///
/// `best` at or below `leader` renders as `+0.000`; callers are expected to
/// use [`LEADER_GAP`] for the leader row itself.
pub fn gap_millis(best: u64, leader: u64) -> String {
    let delta = best.saturating_sub(leader);
    format!("+{}.{:03}", delta / 1_000, delta % 1_000)
}
