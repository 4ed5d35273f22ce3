// password analysis pipeline
//
// charset + pattern scans feed the entropy estimate and the checklist; the
// discounted entropy feeds the score and the attack-time table.

pub mod attack;
pub mod charset;
pub mod criteria;
pub mod dates;
pub mod dictionary;
pub mod entropy;
pub mod keyboard;
pub mod patterns;
pub mod report;
pub mod score;

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use attack::AttackProfile;
use criteria::CriterionInput;
use dictionary::Dictionary;
use patterns::Severities;
use attack::Shortcut;
use report::{AnalysisReport, PatternAttack, LOW_DIVERSITY_WARNING};

/// distinct/total ratio below which a password is flagged as low diversity
const LOW_DIVERSITY_RATIO: f64 = 0.5;
/// the diversity check only applies from this length on
const LOW_DIVERSITY_MIN_LEN: usize = 4;

/// resolved analyzer settings
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// discounted bits that map to a full entropy score
    pub target_bits: f64,
    /// floor for the discounted entropy of a non-empty password
    pub min_bits: f64,
    /// pattern scanners only look at this many code points
    pub max_scan_chars: usize,
    /// profile whose estimate becomes the report's crack_time
    pub representative_profile: String,
    pub severities: Severities,
    /// attacker table, slowest first
    pub profiles: Vec<AttackProfile>,
    /// words added to the bundled dictionary
    pub extra_words: Vec<String>,
}

impl AnalyzerConfig {
    /// embedded defaults with no user overrides
    pub fn defaults() -> Result<Self> {
        crate::config::build_analyzer_config(&crate::config::ProjectConfig::default())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.target_bits.is_finite() && self.target_bits > 0.0) {
            return Err(Error::invalid(format!(
                "target_bits must be a positive number, got {}",
                self.target_bits
            )));
        }
        if !(self.min_bits.is_finite() && self.min_bits >= 0.0) {
            return Err(Error::invalid(format!(
                "min_bits must be zero or positive, got {}",
                self.min_bits
            )));
        }
        if self.max_scan_chars == 0 {
            return Err(Error::invalid("max_scan_chars must be at least 1"));
        }
        for (name, value) in self.severities.entries() {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::invalid(format!(
                    "severity '{}' must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.profiles.is_empty() {
            return Err(Error::invalid("at least one attack profile is required"));
        }
        let mut names = HashSet::new();
        for profile in &self.profiles {
            if !(profile.guesses_per_second.is_finite() && profile.guesses_per_second > 0.0) {
                return Err(Error::invalid(format!(
                    "attack profile '{}' needs a positive guesses_per_second",
                    profile.name
                )));
            }
            if !names.insert(profile.name.as_str()) {
                return Err(Error::invalid(format!(
                    "duplicate attack profile '{}'",
                    profile.name
                )));
            }
        }
        Ok(())
    }
}

/// a configured, reusable analyzer. immutable after construction and safe to
/// share across threads.
#[derive(Debug)]
pub struct Analyzer {
    config: AnalyzerConfig,
    dictionary: Dictionary,
}

static DEFAULT_ANALYZER: LazyLock<Analyzer> = LazyLock::new(|| {
    Analyzer::with_defaults().expect("embedded analyzer defaults are valid")
});

/// the process-wide analyzer built from the embedded defaults
pub fn default_analyzer() -> &'static Analyzer {
    &DEFAULT_ANALYZER
}

/// analyze a password with the embedded defaults. total over any input.
pub fn analyze(password: &str) -> AnalysisReport {
    DEFAULT_ANALYZER.analyze(password)
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let dictionary = Dictionary::with_extra_words(&config.extra_words)?;
        Ok(Self { config, dictionary })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(AnalyzerConfig::defaults()?)
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn analyze(&self, password: &str) -> AnalysisReport {
        let chars: Vec<char> = password.chars().collect();
        let charset = charset::classify(&chars);
        let findings = patterns::detect(
            &chars,
            &self.dictionary,
            &self.config.severities,
            self.config.max_scan_chars,
        );

        let entropy = entropy::estimate(chars.len(), &charset, &findings, self.config.min_bits);
        let criteria = criteria::check(&CriterionInput {
            length: chars.len(),
            charset: &charset,
            findings: &findings,
        });
        let score = score::score(entropy.discounted_bits, &criteria, self.config.target_bits);
        let shortcut = if chars.is_empty() {
            Shortcut::Empty
        } else if findings.iter().any(|f| f.is_whole_word(chars.len())) {
            Shortcut::CommonPassword
        } else {
            Shortcut::None
        };
        let attack_times =
            attack::estimate(entropy.discounted_bits, &self.config.profiles, shortcut);

        let crack_time = attack_times
            .get(&self.config.representative_profile)
            .or_else(|| attack_times.iter().last())
            .map(|e| e.display.clone())
            .unwrap_or_else(|| attack::INSTANT_LABEL.to_string());

        let mut ai_patterns: Vec<String> = Vec::new();
        for finding in &findings {
            let line = finding.description();
            if !ai_patterns.contains(&line) {
                ai_patterns.push(line);
            }
        }
        if has_low_diversity(&chars) {
            ai_patterns.push(LOW_DIVERSITY_WARNING.to_string());
        }

        let pattern_attack = if ai_patterns.is_empty() {
            PatternAttack::Resistant
        } else {
            PatternAttack::Vulnerable
        };

        tracing::debug!(
            findings = findings.len(),
            score,
            discounted_bits = entropy.discounted_bits,
            "analysis complete"
        );

        AnalysisReport {
            entropy: entropy.discounted_bits,
            raw_entropy: entropy.raw_bits,
            score,
            strength: score::StrengthTier::from_score(score),
            crack_time,
            criteria,
            attack_times,
            ai_patterns,
            pattern_attack,
            charset,
            findings,
        }
    }
}

/// fewer than half of the characters are distinct
fn has_low_diversity(chars: &[char]) -> bool {
    if chars.len() < LOW_DIVERSITY_MIN_LEN {
        return false;
    }
    let distinct: HashSet<char> = chars.iter().copied().collect();
    (distinct.len() as f64 / chars.len() as f64) < LOW_DIVERSITY_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::patterns::PatternKind;
    use crate::analysis::score::StrengthTier;

    #[test]
    fn empty_password_report() {
        let r = analyze("");
        assert_eq!(r.score, 0);
        assert_eq!(r.raw_entropy, 0.0);
        assert_eq!(r.entropy, 0.0);
        assert!(r.findings.is_empty());
        assert!(r.ai_patterns.is_empty());
        assert_eq!(r.criteria.passed_count(), 0);
        assert_eq!(r.criteria.len(), criteria::POLICY.len());
        assert_eq!(r.strength, StrengthTier::Weak);
        assert!(r
            .attack_times
            .iter()
            .all(|e| e.display == attack::INSTANT_LABEL));
    }

    #[test]
    fn common_password_is_immediate_for_wordlist_attack() {
        let r = analyze("password");
        let dict = r.attack_times.get("Dictionary Attack").unwrap();
        assert_eq!(dict.display, attack::COMMON_PASSWORD_LABEL);
        assert_ne!(
            r.attack_times.get("Brute Force").unwrap().display,
            attack::COMMON_PASSWORD_LABEL
        );

        let r = analyze("p@ssw0rd");
        assert_eq!(
            r.attack_times.get("Dictionary Attack").unwrap().display,
            attack::COMMON_PASSWORD_LABEL
        );

        // a common word inside a longer password is not a wordlist hit
        let r = analyze("password-Q7#mK2");
        assert_ne!(
            r.attack_times.get("Dictionary Attack").unwrap().display,
            attack::COMMON_PASSWORD_LABEL
        );
        let r = analyze("Kj8#mP2!xQ9vL4nR");
        assert_ne!(
            r.attack_times.get("Dictionary Attack").unwrap().display,
            attack::COMMON_PASSWORD_LABEL
        );
    }

    #[test]
    fn password1_is_weak_or_fair() {
        let r = analyze("Password1!");
        assert_eq!(r.criteria.get("No dictionary words"), Some(false));
        assert!(r.charset.standard_class_count() == 4);
        assert!(r.findings.iter().any(|f| f.kind == PatternKind::DictionaryWord));
        assert!(!r.findings.iter().any(|f| f.kind == PatternKind::LeetspeakWord));
        assert!(matches!(r.strength, StrengthTier::Weak | StrengthTier::Fair));
    }

    #[test]
    fn sequential_password_loses_entropy() {
        let seq = analyze("abcd1234");
        let shuffled = analyze("d1c4ba23");
        assert_eq!(seq.charset.alphabet_size, shuffled.charset.alphabet_size);
        assert_eq!(seq.raw_entropy, shuffled.raw_entropy);
        assert!(seq.entropy < shuffled.entropy);
        assert!(shuffled.findings.is_empty());
        let seq_count = seq
            .findings
            .iter()
            .filter(|f| f.kind == PatternKind::Sequential)
            .count();
        assert_eq!(seq_count, 2);
    }

    #[test]
    fn keyboard_walk_fails_dedicated_criterion() {
        let r = analyze("qwertyQWERTY123!");
        assert!(r.findings.iter().any(|f| f.kind == PatternKind::KeyboardWalk));
        assert_eq!(r.criteria.get("No keyboard walks"), Some(false));
        assert_eq!(r.criteria.get("No sequential or repeated runs"), Some(true));
    }

    #[test]
    fn random_password_is_very_strong() {
        let r = analyze("Kj8#mP2!xQ9vL4nR");
        assert!(r.findings.is_empty());
        assert_eq!(r.strength, StrengthTier::VeryStrong);
        assert_eq!(r.pattern_attack, PatternAttack::Resistant);
    }

    #[test]
    fn low_diversity_warning() {
        let r = analyze("xyxzxyxz");
        assert!(r.ai_patterns.iter().any(|p| p == LOW_DIVERSITY_WARNING));
        assert_eq!(r.pattern_attack, PatternAttack::Vulnerable);
    }

    #[test]
    fn ai_patterns_are_deduplicated() {
        let r = analyze("123x456y789");
        let count = r
            .ai_patterns
            .iter()
            .filter(|p| *p == "Sequential numbers detected")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn crack_time_uses_representative_profile() {
        let r = analyze("Kj8#mP2!");
        let expected = &r.attack_times.get("Brute Force").unwrap().display;
        assert_eq!(&r.crack_time, expected);
    }

    #[test]
    fn defaults_validate() {
        let config = AnalyzerConfig::defaults().unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.representative_profile, "Brute Force");
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = AnalyzerConfig::defaults().unwrap();
        config.profiles.clear();
        assert!(Analyzer::new(config).unwrap_err().is_invalid_configuration());

        let mut config = AnalyzerConfig::defaults().unwrap();
        config.severities.dictionary_word = 1.5;
        assert!(Analyzer::new(config).is_err());

        let mut config = AnalyzerConfig::defaults().unwrap();
        config.target_bits = 0.0;
        assert!(Analyzer::new(config).is_err());
    }

    #[test]
    fn extremely_long_input_is_handled() {
        let long = "aB3$".repeat(50_000);
        let r = analyze(&long);
        assert!(r.score <= 100);
        assert!(r.entropy <= r.raw_entropy);
    }

    #[test]
    fn analyzer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Analyzer>();
    }
}
