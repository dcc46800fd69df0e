//! Config and state directory resolution.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Otherwise returns `~/.config/zenflix/config.toml`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join("config.toml"));
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("zenflix")
        .join("config.toml"))
}

/// Resolves the directory holding the browser log.
///
/// - If `dir` is `Some`, returns `dir`.
/// - Otherwise `$XDG_STATE_HOME/zenflix`, falling back to
///   `~/.local/state/zenflix`.
///
/// # Errors
///
/// Returns an error if neither `XDG_STATE_HOME` nor `HOME` is set (when `dir` is `None`).
pub fn resolve_state_dir(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.clone());
    }

    if let Some(state) = std::env::var_os("XDG_STATE_HOME").filter(|s| !s.is_empty()) {
        return Ok(PathBuf::from(state).join("zenflix"));
    }
    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("state")
        .join("zenflix"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/zenflix-home");

        // Act
        let path = resolve_config_path(Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/zenflix-home/config.toml"));
    }

    #[test]
    fn test_resolve_default() {
        // Arrange & Act
        let path = resolve_config_path(None).unwrap();

        // Assert
        assert!(path.ends_with(".config/zenflix/config.toml"));
    }

    #[test]
    fn test_state_dir_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/zenflix-home");

        // Act
        let state = resolve_state_dir(Some(&dir)).unwrap();

        // Assert
        assert_eq!(state, dir);
    }

    #[test]
    fn test_state_dir_default_ends_with_app_name() {
        // Arrange & Act
        let state = resolve_state_dir(None).unwrap();

        // Assert
        assert!(state.ends_with("zenflix"));
    }
}
