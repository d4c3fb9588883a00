//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "boxscout";

/// Resolves the config file path from `--dir` and the environment.
///
/// # Errors
///
/// Returns an error if `dir` is `None` and neither `XDG_CONFIG_HOME` nor
/// `HOME` gives a usable base directory.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    config_path_from(
        dir.map(PathBuf::as_path),
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

/// Picks the config file path, first match wins:
///
/// 1. `{dir}/config.toml`
/// 2. `{xdg_config_home}/boxscout/config.toml`
/// 3. `{home}/.config/boxscout/config.toml`
///
/// Empty and relative `xdg_config_home` values are ignored, as the XDG base
/// directory rules require.
///
/// # Errors
///
/// Returns an error naming both variables when no base directory is usable.
fn config_path_from(
    dir: Option<&Path>,
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }

    let base = xdg_config_home
        .filter(|p| p.is_absolute())
        .or_else(|| {
            home.filter(|p| !p.as_os_str().is_empty())
                .map(|h| h.join(".config"))
        });
    match base {
        Some(base) => Ok(base.join(APP_DIR).join(CONFIG_FILE)),
        None => bail!(
            "cannot locate the config directory: set XDG_CONFIG_HOME or HOME, or pass --dir"
        ),
    }
}
