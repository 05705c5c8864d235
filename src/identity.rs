//! Identity reconciliation across the two upstream naming schemes.
//!
//! The lap-telemetry provider keys drivers by car number and reports flat
//! names and sponsor-laden team strings; the classification provider uses
//! structured given/family names and its own constructor labels. This module
//! owns the static roster and alias tables that map both onto one canonical
//! display form.
//!
//! Resolution is never fatal: an unmapped driver falls back to a numbered
//! placeholder, an unmapped team passes through unmodified.

/// Static reference entry for a current-grid driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterEntry {
    /// Permanent car number
    pub number: u32,
    pub given_name: &'static str,
    pub family_name: &'static str,
    /// Canonical current team name
    pub team: &'static str,
}

/// Current driver roster, keyed by permanent number.
const ROSTER: &[RosterEntry] = &[
    RosterEntry { number: 1, given_name: "Max", family_name: "Verstappen", team: "Red Bull" },
    RosterEntry { number: 4, given_name: "Lando", family_name: "Norris", team: "McLaren" },
    RosterEntry { number: 5, given_name: "Gabriel", family_name: "Bortoleto", team: "Kick Sauber" },
    RosterEntry { number: 6, given_name: "Isack", family_name: "Hadjar", team: "Racing Bulls" },
    RosterEntry { number: 10, given_name: "Pierre", family_name: "Gasly", team: "Alpine" },
    RosterEntry { number: 12, given_name: "Kimi", family_name: "Antonelli", team: "Mercedes" },
    RosterEntry { number: 14, given_name: "Fernando", family_name: "Alonso", team: "Aston Martin" },
    RosterEntry { number: 16, given_name: "Charles", family_name: "Leclerc", team: "Ferrari" },
    RosterEntry { number: 18, given_name: "Lance", family_name: "Stroll", team: "Aston Martin" },
    RosterEntry { number: 22, given_name: "Yuki", family_name: "Tsunoda", team: "Red Bull" },
    RosterEntry { number: 23, given_name: "Alexander", family_name: "Albon", team: "Williams" },
    RosterEntry { number: 27, given_name: "Nico", family_name: "Hülkenberg", team: "Kick Sauber" },
    RosterEntry { number: 30, given_name: "Liam", family_name: "Lawson", team: "Racing Bulls" },
    RosterEntry { number: 31, given_name: "Esteban", family_name: "Ocon", team: "Haas" },
    RosterEntry { number: 43, given_name: "Franco", family_name: "Colapinto", team: "Alpine" },
    RosterEntry { number: 44, given_name: "Lewis", family_name: "Hamilton", team: "Ferrari" },
    RosterEntry { number: 55, given_name: "Carlos", family_name: "Sainz", team: "Williams" },
    RosterEntry { number: 63, given_name: "George", family_name: "Russell", team: "Mercedes" },
    RosterEntry { number: 81, given_name: "Oscar", family_name: "Piastri", team: "McLaren" },
    RosterEntry { number: 87, given_name: "Oliver", family_name: "Bearman", team: "Haas" },
];

/// Alias table mapping normalized provider team strings to canonical names.
/// Keys must already be in `fold` form.
const TEAM_ALIASES: &[(&str, &str)] = &[
    ("red bull", "Red Bull"),
    ("red bull racing", "Red Bull"),
    ("oracle red bull racing", "Red Bull"),
    ("mclaren", "McLaren"),
    ("mclaren f1 team", "McLaren"),
    ("ferrari", "Ferrari"),
    ("scuderia ferrari", "Ferrari"),
    ("mercedes", "Mercedes"),
    ("mercedes amg petronas", "Mercedes"),
    ("aston martin", "Aston Martin"),
    ("aston martin aramco", "Aston Martin"),
    ("alpine", "Alpine"),
    ("alpine f1 team", "Alpine"),
    ("bwt alpine f1 team", "Alpine"),
    ("williams", "Williams"),
    ("williams racing", "Williams"),
    ("rb", "Racing Bulls"),
    ("rb f1 team", "Racing Bulls"),
    ("racing bulls", "Racing Bulls"),
    ("visa cash app rb", "Racing Bulls"),
    ("sauber", "Kick Sauber"),
    ("kick sauber", "Kick Sauber"),
    ("stake f1 team kick sauber", "Kick Sauber"),
    ("haas", "Haas"),
    ("haas f1 team", "Haas"),
    ("moneygram haas f1 team", "Haas"),
];

/// Resolve a driver to a canonical display name.
///
/// Resolution order:
/// 1. exact match on permanent number against the roster,
/// 2. accent-folded family-name match (providers disagree on diacritics),
/// 3. `"Driver #<number>"` placeholder when a number is present.
///
/// Only returns `None` when neither a number nor a matching family name is
/// available, so downstream rendering never breaks on an unmapped rookie.
pub fn resolve_driver(number: Option<u32>, family_name: Option<&str>) -> Option<String> {
    roster_match(number, family_name).or_else(|| number.map(|n| format!("Driver #{n}")))
}

/// Roster match only, without the placeholder fallback.
///
/// Used by adapters that already carry a provider-supplied name and only
/// want canonicalization when the driver is actually on the roster.
pub fn roster_match(number: Option<u32>, family_name: Option<&str>) -> Option<String> {
    if let Some(number) = number {
        if let Some(entry) = ROSTER.iter().find(|d| d.number == number) {
            return Some(display_name(entry));
        }
    }

    if let Some(family) = family_name {
        let folded = fold(family);
        if !folded.is_empty() {
            if let Some(entry) = ROSTER.iter().find(|d| fold(d.family_name) == folded) {
                return Some(display_name(entry));
            }
        }
    }

    None
}

/// Resolve a provider team string to its canonical display name.
///
/// Falls back to the raw string unmodified when no alias matches.
pub fn resolve_team(raw: &str) -> String {
    let folded = fold(raw);
    TEAM_ALIASES
        .iter()
        .find(|(alias, _)| *alias == folded)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or_else(|| raw.trim().to_string())
}

/// Canonical team for a permanent number, used when the telemetry roster
/// snapshot carries no team string.
pub fn team_for_number(number: u32) -> Option<&'static str> {
    ROSTER.iter().find(|d| d.number == number).map(|d| d.team)
}

fn display_name(entry: &RosterEntry) -> String {
    format!("{} {}", entry.given_name, entry.family_name)
}

/// Lowercase, strip diacritics common in the grid's names, drop everything
/// that is not alphanumeric or a single space.
fn fold(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars().flat_map(char::to_lowercase) {
        let mapped = match c {
            'á' | 'à' | 'ä' | 'â' | 'ã' | 'å' => Some('a'),
            'é' | 'è' | 'ë' | 'ê' => Some('e'),
            'í' | 'ì' | 'ï' | 'î' => Some('i'),
            'ó' | 'ò' | 'ö' | 'ô' | 'õ' | 'ø' => Some('o'),
            'ú' | 'ù' | 'ü' | 'û' => Some('u'),
            'ç' => Some('c'),
            'ñ' => Some('n'),
            c if c.is_alphanumeric() => Some(c),
            ' ' => Some(' '),
            _ => None,
        };
        if let Some(m) = mapped {
            // collapse repeated spaces from dropped punctuation
            if m != ' ' || !out.ends_with(' ') {
                out.push(m);
            }
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanent_number_wins() {
        assert_eq!(resolve_driver(Some(1), None).as_deref(), Some("Max Verstappen"));
        assert_eq!(resolve_driver(Some(44), Some("wrong")).as_deref(), Some("Lewis Hamilton"));
    }

    #[test]
    fn family_name_match_handles_accent_drift() {
        // Telemetry provider spells it plain, roster carries the umlaut.
        assert_eq!(resolve_driver(None, Some("Hulkenberg")).as_deref(), Some("Nico Hülkenberg"));
        assert_eq!(resolve_driver(None, Some("HÜLKENBERG")).as_deref(), Some("Nico Hülkenberg"));
        assert_eq!(resolve_driver(None, Some("Leclerc")).as_deref(), Some("Charles Leclerc"));
    }

    #[test]
    fn unmapped_number_resolves_to_placeholder_never_none() {
        assert_eq!(resolve_driver(Some(99), None).as_deref(), Some("Driver #99"));
        assert_eq!(resolve_driver(Some(99), Some("Nobody")).as_deref(), Some("Driver #99"));
    }

    #[test]
    fn no_number_no_match_is_none() {
        assert_eq!(resolve_driver(None, Some("Nobody")), None);
        assert_eq!(resolve_driver(None, None), None);
    }

    #[test]
    fn team_aliases_normalize_sponsor_names() {
        assert_eq!(resolve_team("Oracle Red Bull Racing"), "Red Bull");
        assert_eq!(resolve_team("MoneyGram Haas F1 Team"), "Haas");
        assert_eq!(resolve_team("RB"), "Racing Bulls");
        assert_eq!(resolve_team("Scuderia Ferrari"), "Ferrari");
    }

    #[test]
    fn unknown_team_passes_through() {
        assert_eq!(resolve_team("Brawn GP"), "Brawn GP");
    }

    #[test]
    fn roster_team_lookup_by_number() {
        assert_eq!(team_for_number(81), Some("McLaren"));
        assert_eq!(team_for_number(99), None);
    }

    #[test]
    fn fold_strips_punctuation_and_case() {
        assert_eq!(fold("Pérez"), "perez");
        assert_eq!(fold("  Kick   Sauber "), "kick sauber");
        assert_eq!(fold("Haas F1 Team"), "haas f1 team");
    }
}
