// score and tier mapping

use serde::{Serialize, Serializer};

use crate::analysis::criteria::CriteriaResult;

/// discounted bits at which the entropy component saturates at 100
pub const DEFAULT_TARGET_BITS: f64 = 80.0;

/// share of the score that is kept regardless of the checklist
const CRITERIA_FLOOR: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthTier {
    Weak,
    Fair,
    Strong,
    VeryStrong,
}

impl StrengthTier {
    /// Weak < 40 <= Fair < 70 <= Strong < 90 <= VeryStrong
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=39 => StrengthTier::Weak,
            40..=69 => StrengthTier::Fair,
            70..=89 => StrengthTier::Strong,
            _ => StrengthTier::VeryStrong,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrengthTier::Weak => "Weak",
            StrengthTier::Fair => "Fair",
            StrengthTier::Strong => "Strong",
            StrengthTier::VeryStrong => "Very Strong",
        }
    }
}

impl std::fmt::Display for StrengthTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StrengthTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// map discounted entropy and the checklist to a score in [0, 100]
pub fn score(discounted_bits: f64, criteria: &CriteriaResult, target_bits: f64) -> u8 {
    if discounted_bits <= 0.0 || target_bits <= 0.0 {
        return 0;
    }
    let base = (discounted_bits / target_bits * 100.0).clamp(0.0, 100.0);
    let factor = CRITERIA_FLOOR + (1.0 - CRITERIA_FLOOR) * criteria.passed_fraction();
    let mut value = (base * factor).floor().clamp(0.0, 100.0) as u8;

    if let Some(cap) = criteria.hard_cap() {
        value = value.min(cap);
    }
    value
}
