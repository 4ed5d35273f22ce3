// config merging - combines a base ProjectConfig with an overlay

use std::collections::HashSet;

use super::{DictionaryConfig, GeneratorConfig, ProjectConfig, SettingsConfig, SeverityConfig};
use crate::analysis::attack::AttackProfile;

/// merge two configs: overlay values win for scalars, lists are concatenated and deduplicated.
pub fn merge_two(base: ProjectConfig, overlay: ProjectConfig) -> ProjectConfig {
    ProjectConfig {
        settings: merge_settings(base.settings, overlay.settings),
        severity: merge_severity(base.severity, overlay.severity),
        profiles: merge_profiles_by_name(base.profiles, overlay.profiles),
        dictionary: DictionaryConfig {
            words: dedup_strings(base.dictionary.words, overlay.dictionary.words),
        },
        generator: GeneratorConfig {
            length: overlay.generator.length.or(base.generator.length),
        },
    }
}

/// merge a list of configs in order (first = lowest priority, last = highest).
pub fn merge_all(configs: Vec<ProjectConfig>) -> ProjectConfig {
    configs
        .into_iter()
        .fold(ProjectConfig::default(), merge_two)
}

fn merge_settings(base: SettingsConfig, overlay: SettingsConfig) -> SettingsConfig {
    SettingsConfig {
        target_bits: overlay.target_bits.or(base.target_bits),
        min_bits: overlay.min_bits.or(base.min_bits),
        max_scan_chars: overlay.max_scan_chars.or(base.max_scan_chars),
        representative_profile: overlay
            .representative_profile
            .or(base.representative_profile),
    }
}

fn merge_severity(base: SeverityConfig, overlay: SeverityConfig) -> SeverityConfig {
    SeverityConfig {
        sequential: overlay.sequential.or(base.sequential),
        repeated: overlay.repeated.or(base.repeated),
        keyboard_walk: overlay.keyboard_walk.or(base.keyboard_walk),
        dictionary_word: overlay.dictionary_word.or(base.dictionary_word),
        leetspeak_word: overlay.leetspeak_word.or(base.leetspeak_word),
        date_like: overlay.date_like.or(base.date_like),
    }
}

/// overlay profile with the same name replaces base in place; new names are appended.
fn merge_profiles_by_name(
    base: Vec<AttackProfile>,
    overlay: Vec<AttackProfile>,
) -> Vec<AttackProfile> {
    let mut merged = base;
    for profile in overlay {
        if let Some(pos) = merged.iter().position(|p| p.name == profile.name) {
            merged[pos] = profile;
        } else {
            merged.push(profile);
        }
    }
    merged
}

/// concatenate two string vectors and deduplicate (preserving order, keeping first occurrence).
fn dedup_strings(mut a: Vec<String>, b: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = a.iter().cloned().collect();
    for s in b {
        if seen.insert(s.clone()) {
            a.push(s);
        }
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_override() {
        let base = ProjectConfig {
            settings: SettingsConfig {
                target_bits: Some(80.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let overlay = ProjectConfig {
            settings: SettingsConfig {
                target_bits: Some(64.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let merged = merge_two(base, overlay);
        assert_eq!(merged.settings.target_bits, Some(64.0));
    }

    #[test]
    fn scalar_base_preserved_when_overlay_is_none() {
        let base = ProjectConfig {
            generator: GeneratorConfig { length: Some(18) },
            severity: SeverityConfig {
                repeated: Some(0.7),
                ..Default::default()
            },
            ..Default::default()
        };
        let merged = merge_two(base, ProjectConfig::default());
        assert_eq!(merged.generator.length, Some(18));
        assert_eq!(merged.severity.repeated, Some(0.7));
    }

    #[test]
    fn words_concatenated_without_duplicates() {
        let base = ProjectConfig {
            dictionary: DictionaryConfig {
                words: vec!["hunter".to_string(), "acme".to_string()],
            },
            ..Default::default()
        };
        let overlay = ProjectConfig {
            dictionary: DictionaryConfig {
                words: vec!["acme".to_string(), "globex".to_string()],
            },
            ..Default::default()
        };
        let merged = merge_two(base, overlay);
        assert_eq!(merged.dictionary.words, vec!["hunter", "acme", "globex"]);
    }

    #[test]
    fn profile_merge_by_name() {
        let base = ProjectConfig {
            profiles: vec![
                AttackProfile::new("Online", 10.0),
                AttackProfile::new("Offline", 1e4),
            ],
            ..Default::default()
        };
        let overlay = ProjectConfig {
            profiles: vec![
                AttackProfile::new("Online", 100.0),
                AttackProfile::new("Botnet", 1e7),
            ],
            ..Default::default()
        };
        let merged = merge_two(base, overlay);
        let names: Vec<&str> = merged.profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Online", "Offline", "Botnet"]);
        assert_eq!(merged.profiles[0].guesses_per_second, 100.0);
    }

    #[test]
    fn merge_all_later_wins() {
        let layer = |length| ProjectConfig {
            generator: GeneratorConfig {
                length: Some(length),
            },
            ..Default::default()
        };
        let merged = merge_all(vec![layer(12), layer(16), layer(20)]);
        assert_eq!(merged.generator.length, Some(20));
        assert_eq!(merge_all(Vec::new()), ProjectConfig::default());
    }
}
