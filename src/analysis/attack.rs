// time-to-crack estimates per attacker profile
//
// seconds = 2^bits / guesses_per_second (full keyspace). everything is
// computed in the log2 domain so no bit count can overflow.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const SECONDS_PER_YEAR: f64 = 31_536_000.0;

/// label for anything shorter than one second
pub const INSTANT_LABEL: &str = "Less than a second";
/// label for anything at or beyond the display cap
pub const CAP_LABEL: &str = ">1000 years";
/// label shown by wordlist attackers when the whole password is a common one
pub const COMMON_PASSWORD_LABEL: &str = "Immediate (common password)";

/// years at which the display switches to the cap label
const CAP_YEARS: f64 = 1000.0;

/// largest value shown per unit before moving to the next one
const UNITS: &[(f64, f64, &str)] = &[
    (1.0, 60.0, "seconds"),
    (SECONDS_PER_MINUTE, 60.0, "minutes"),
    (SECONDS_PER_HOUR, 24.0, "hours"),
    (SECONDS_PER_DAY, 365.0, "days"),
    (SECONDS_PER_YEAR, 100.0, "years"),
    (100.0 * SECONDS_PER_YEAR, CAP_YEARS / 100.0, "centuries"),
];

/// a named attacker capability
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct AttackProfile {
    pub name: String,
    pub guesses_per_second: f64,
    /// tries the common-password list before anything else
    #[serde(default)]
    pub wordlist: bool,
}

impl AttackProfile {
    pub fn new(name: impl Into<String>, guesses_per_second: f64) -> Self {
        Self {
            name: name.into(),
            guesses_per_second,
            wordlist: false,
        }
    }

    pub fn with_wordlist(mut self) -> Self {
        self.wordlist = true;
        self
    }
}

/// facts about the password that short-circuit the keyspace estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shortcut {
    #[default]
    None,
    /// nothing to guess
    Empty,
    /// the whole password is a (possibly leetspeak) common password
    CommonPassword,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttackEstimate {
    pub profile: String,
    pub guesses_per_second: f64,
    /// log2 of the expected seconds; may be negative or very large
    pub log2_seconds: f64,
    pub display: String,
}

/// ordered estimates; serializes as a JSON object in profile order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttackTimes(pub Vec<AttackEstimate>);

impl AttackTimes {
    pub fn iter(&self) -> impl Iterator<Item = &AttackEstimate> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, profile: &str) -> Option<&AttackEstimate> {
        self.0.iter().find(|e| e.profile == profile)
    }
}

impl Serialize for AttackTimes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for estimate in &self.0 {
            map.serialize_entry(&estimate.profile, &estimate.display)?;
        }
        map.end()
    }
}

/// log2 of the expected crack time in seconds
pub fn log2_seconds(bits: f64, guesses_per_second: f64) -> f64 {
    bits - guesses_per_second.log2()
}

/// format a duration given as log2(seconds), capping huge values
pub fn format_log2_seconds(log2_secs: f64) -> String {
    if log2_secs.is_nan() {
        return INSTANT_LABEL.to_string();
    }
    if log2_secs >= (CAP_YEARS * SECONDS_PER_YEAR).log2() {
        return CAP_LABEL.to_string();
    }
    format_seconds(log2_secs.exp2())
}

/// format a finite duration in seconds
pub fn format_seconds(seconds: f64) -> String {
    if !seconds.is_finite() || seconds >= CAP_YEARS * SECONDS_PER_YEAR {
        return CAP_LABEL.to_string();
    }
    if seconds < 1.0 {
        return INSTANT_LABEL.to_string();
    }

    // the unit is picked after rounding so 59.999 seconds reads as minutes
    for &(size, limit, unit) in UNITS {
        let value = (seconds / size * 100.0).round() / 100.0;
        if value < limit {
            return format!("{:.2} {}", value, unit);
        }
    }
    CAP_LABEL.to_string()
}

/// estimate every profile in table order.
/// log2_seconds is always the keyspace estimate at the profile's rate; a
/// common password only changes what wordlist attackers display.
pub fn estimate(bits: f64, profiles: &[AttackProfile], shortcut: Shortcut) -> AttackTimes {
    AttackTimes(
        profiles
            .iter()
            .map(|p| {
                let (log2_secs, display) = match shortcut {
                    Shortcut::Empty => (f64::NEG_INFINITY, INSTANT_LABEL.to_string()),
                    Shortcut::CommonPassword if p.wordlist => (
                        log2_seconds(bits, p.guesses_per_second),
                        COMMON_PASSWORD_LABEL.to_string(),
                    ),
                    _ => {
                        let log2_secs = log2_seconds(bits, p.guesses_per_second);
                        (log2_secs, format_log2_seconds(log2_secs))
                    }
                };
                AttackEstimate {
                    profile: p.name.clone(),
                    guesses_per_second: p.guesses_per_second,
                    log2_seconds: log2_secs,
                    display,
                }
            })
            .collect(),
    )
}
