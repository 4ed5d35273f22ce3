// config file discovery - picks the one passvet.toml to load

use std::path::{Path, PathBuf};

/// environment variable naming a config file
pub const CONFIG_ENV: &str = "PASSVET_CONFIG";

/// the config filename used in the xdg location
const CONFIG_FILENAME: &str = "passvet.toml";

/// the directory name used in xdg config
const CONFIG_DIR_NAME: &str = "passvet";

/// resolve the config path in priority order:
/// 1. the explicit `--config` path
/// 2. $PASSVET_CONFIG
/// 3. $XDG_CONFIG_HOME/passvet/passvet.toml (or ~/.config/passvet/passvet.toml)
///
/// the returned path is not guaranteed to exist.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    resolve_config_path_with(
        explicit,
        std::env::var_os(CONFIG_ENV).map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
    )
}

/// inner implementation that takes the environment explicitly for testability.
fn resolve_config_path_with(
    explicit: Option<&Path>,
    env_path: Option<PathBuf>,
    home: Option<PathBuf>,
    xdg_override: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env_path.filter(|p| !p.as_os_str().is_empty()) {
        return Some(path);
    }
    // an empty XDG_CONFIG_HOME is treated as unset
    let xdg_override = xdg_override.filter(|p| !p.as_os_str().is_empty());
    match (home, xdg_override) {
        (_, Some(xdg)) => Some(xdg.join(CONFIG_DIR_NAME).join(CONFIG_FILENAME)),
        (Some(home), None) => Some(xdg_config_path_with(&home, None)),
        (None, None) => None,
    }
}

/// xdg config file path; falls back to ~/.config when no override is given.
fn xdg_config_path_with(home: &Path, xdg_override: Option<PathBuf>) -> PathBuf {
    let xdg_base = xdg_override.unwrap_or_else(|| home.join(".config"));
    xdg_base.join(CONFIG_DIR_NAME).join(CONFIG_FILENAME)
}
