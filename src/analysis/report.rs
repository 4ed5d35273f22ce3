// the aggregate analysis output

use serde::{Serialize, Serializer};

use crate::analysis::attack::AttackTimes;
use crate::analysis::charset::CharsetProfile;
use crate::analysis::criteria::CriteriaResult;
use crate::analysis::patterns::PatternFinding;
use crate::analysis::score::StrengthTier;

/// warning for passwords built from few distinct characters
pub const LOW_DIVERSITY_WARNING: &str = "Low character diversity";

/// verdict against an attacker that tries predictable patterns first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternAttack {
    Vulnerable,
    Resistant,
}

impl PatternAttack {
    pub fn as_str(self) -> &'static str {
        match self {
            PatternAttack::Vulnerable => "Vulnerable",
            PatternAttack::Resistant => "Resistant",
        }
    }
}

impl Serialize for PatternAttack {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

fn round2<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 100.0).round() / 100.0)
}

/// everything the analyzer says about one password. never contains the
/// password itself.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// discounted entropy in bits
    #[serde(serialize_with = "round2")]
    pub entropy: f64,
    /// brute-force entropy before the pattern discount
    #[serde(serialize_with = "round2")]
    pub raw_entropy: f64,
    pub score: u8,
    pub strength: StrengthTier,
    /// representative crack time (one profile)
    pub crack_time: String,
    pub criteria: CriteriaResult,
    pub attack_times: AttackTimes,
    pub ai_patterns: Vec<String>,
    pub pattern_attack: PatternAttack,
    #[serde(skip)]
    pub charset: CharsetProfile,
    #[serde(skip)]
    pub findings: Vec<PatternFinding>,
}

impl AnalysisReport {
    pub fn is_weak(&self) -> bool {
        self.strength == StrengthTier::Weak
    }

    /// ai_patterns with dictionary words left unnamed, in the same order
    pub fn redacted_patterns(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for finding in &self.findings {
            let line = finding.redacted_description();
            if !out.contains(&line) {
                out.push(line);
            }
        }
        if self.ai_patterns.iter().any(|p| p == LOW_DIVERSITY_WARNING) {
            out.push(LOW_DIVERSITY_WARNING.to_string());
        }
        out
    }
}
