pub mod discovery;
pub mod merge;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::analysis::attack::AttackProfile;
use crate::analysis::entropy::DEFAULT_MIN_BITS;
use crate::analysis::patterns::{Severities, DEFAULT_MAX_SCAN_CHARS};
use crate::analysis::score::DEFAULT_TARGET_BITS;
use crate::analysis::AnalyzerConfig;
use crate::error::{Error, Result};

/// embedded attacker table, compiled into the binary
const DEFAULT_PROFILES_TOML: &str = include_str!("profiles.toml");

/// profile used for the report's crack_time unless overridden
pub const DEFAULT_REPRESENTATIVE_PROFILE: &str = "Brute Force";

/// top-level configuration from passvet.toml
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub severity: SeverityConfig,
    /// user-defined attack profiles (merged with defaults by name)
    #[serde(default)]
    pub profiles: Vec<AttackProfile>,
    #[serde(default)]
    pub dictionary: DictionaryConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// settings section of the config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SettingsConfig {
    pub target_bits: Option<f64>,
    pub min_bits: Option<f64>,
    pub max_scan_chars: Option<usize>,
    pub representative_profile: Option<String>,
}

/// per-kind base severity overrides
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SeverityConfig {
    pub sequential: Option<f64>,
    pub repeated: Option<f64>,
    pub keyboard_walk: Option<f64>,
    pub dictionary_word: Option<f64>,
    pub leetspeak_word: Option<f64>,
    pub date_like: Option<f64>,
}

impl SeverityConfig {
    /// apply the present overrides on top of `base`
    pub fn apply(&self, base: Severities) -> Severities {
        Severities {
            sequential: self.sequential.unwrap_or(base.sequential),
            repeated: self.repeated.unwrap_or(base.repeated),
            keyboard_walk: self.keyboard_walk.unwrap_or(base.keyboard_walk),
            dictionary_word: self.dictionary_word.unwrap_or(base.dictionary_word),
            leetspeak_word: self.leetspeak_word.unwrap_or(base.leetspeak_word),
            date_like: self.date_like.unwrap_or(base.date_like),
        }
    }
}

/// dictionary section of the config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DictionaryConfig {
    /// words appended to the bundled list
    #[serde(default)]
    pub words: Vec<String>,
}

/// generator section of the config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GeneratorConfig {
    /// default length for `passvet generate`
    pub length: Option<usize>,
}

#[derive(Deserialize)]
struct ProfilesFile {
    profiles: Vec<AttackProfile>,
}

/// load the embedded attacker table
pub fn load_default_profiles() -> Result<Vec<AttackProfile>> {
    let file: ProfilesFile = toml::from_str(DEFAULT_PROFILES_TOML)
        .map_err(|e| Error::Build(format!("failed to parse default profiles: {}", e)))?;
    Ok(file.profiles)
}

/// parse config text; `path` is only used for error messages
pub fn parse_config(content: &str, path: &Path) -> Result<ProjectConfig> {
    toml::from_str(content).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// read and parse a single config file
pub fn load_config_file(path: &Path) -> Result<ProjectConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// load the user config. an explicit path must exist; a missing discovered
/// file means defaults. returns the path that was actually read, if any.
pub fn load_config(explicit: Option<&Path>) -> Result<(ProjectConfig, Option<PathBuf>)> {
    match discovery::resolve_config_path(explicit) {
        Some(path) if explicit.is_some() || path.is_file() => {
            let config = load_config_file(&path)?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok((config, Some(path)))
        }
        Some(path) => {
            tracing::debug!(path = %path.display(), "config not found, using defaults");
            Ok((ProjectConfig::default(), None))
        }
        None => Ok((ProjectConfig::default(), None)),
    }
}

/// resolve a user config against the embedded defaults
pub fn build_analyzer_config(config: &ProjectConfig) -> Result<AnalyzerConfig> {
    let defaults = ProjectConfig {
        profiles: load_default_profiles()?,
        ..Default::default()
    };
    let merged = merge::merge_all(vec![defaults, config.clone()]);

    let resolved = AnalyzerConfig {
        target_bits: merged.settings.target_bits.unwrap_or(DEFAULT_TARGET_BITS),
        min_bits: merged.settings.min_bits.unwrap_or(DEFAULT_MIN_BITS),
        max_scan_chars: merged
            .settings
            .max_scan_chars
            .unwrap_or(DEFAULT_MAX_SCAN_CHARS),
        representative_profile: merged
            .settings
            .representative_profile
            .unwrap_or_else(|| DEFAULT_REPRESENTATIVE_PROFILE.to_string()),
        severities: merged.severity.apply(Severities::default()),
        profiles: merged.profiles,
        extra_words: merged.dictionary.words,
    };

    if !resolved
        .profiles
        .iter()
        .any(|p| p.name == resolved.representative_profile)
    {
        return Err(Error::invalid(format!(
            "representative_profile '{}' does not name an attack profile",
            resolved.representative_profile
        )));
    }
    resolved.validate()?;
    Ok(resolved)
}
