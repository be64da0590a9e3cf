//! Installation path resolution.
//!
//! An addon's absolute path on the host is the game's volume root joined with
//! the addon's relative `installation_path`. The first volume strategy listed
//! for the game supplies the root.

use std::sync::Arc;

use log::debug;

use crate::addons::WorkshopAddon;
use crate::errors::{ConfigurationError, ErrorContext, Result};
use crate::servers::{GameConfigRepositoryTrait, ServerGameConfig};
use crate::strategies::{ConfigurationStrategy, ConfigurationStrategyRepositoryTrait};

pub struct PathResolver {
    game_config_repository: Arc<dyn GameConfigRepositoryTrait>,
    strategy_repository: Arc<dyn ConfigurationStrategyRepositoryTrait>,
}

impl PathResolver {
    pub fn new(
        game_config_repository: Arc<dyn GameConfigRepositoryTrait>,
        strategy_repository: Arc<dyn ConfigurationStrategyRepositoryTrait>,
    ) -> Self {
        Self {
            game_config_repository,
            strategy_repository,
        }
    }

    /// Resolves where `addon` lives on the host running `sgc`.
    pub fn resolve(&self, sgc: &ServerGameConfig, addon: &WorkshopAddon) -> Result<String> {
        let game_config = self
            .game_config_repository
            .get_by_id(&sgc.game_config_id)
            .with_context(|| format!("failed to load game config {}", sgc.game_config_id))?;

        let strategy = self.select_volume_strategy(&game_config.game_id)?;
        let target_path = strategy
            .target_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| ConfigurationError::MissingTargetPath {
                strategy_id: strategy.id.clone(),
            })?;

        let addon_path = addon
            .installation_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| ConfigurationError::MissingInstallationPath {
                addon_id: addon.id.clone(),
            })?;

        let path = join_install_path(target_path, addon_path)?;
        debug!(
            "Resolved addon {} on sgc {} to {} (strategy {})",
            addon.id, sgc.id, path, strategy.id
        );
        Ok(path)
    }

    /// First volume strategy for the game, in repository order.
    pub fn select_volume_strategy(&self, game_id: &str) -> Result<ConfigurationStrategy> {
        let strategies = self
            .strategy_repository
            .list_by_game(game_id)
            .with_context(|| format!("failed to list strategies for game {}", game_id))?;

        let strategy = strategies
            .into_iter()
            .find(ConfigurationStrategy::is_volume)
            .ok_or_else(|| ConfigurationError::NoVolumeStrategy {
                game_id: game_id.to_string(),
            })?;
        Ok(strategy)
    }
}

/// Joins a volume root with an addon path and normalizes the result.
///
/// A leading slash on `addon_path` is ignored. Fails when `..` segments climb
/// above `target_path` or when the addon path names the volume root itself.
pub fn join_install_path(target_path: &str, addon_path: &str) -> Result<String> {
    let relative = normalize_path(addon_path.trim_start_matches('/'));
    if relative == ".." || relative.starts_with("../") {
        return Err(ConfigurationError::PathEscapesVolume {
            path: addon_path.to_string(),
        }
        .into());
    }
    if relative == "." {
        return Err(ConfigurationError::PathIsVolumeRoot {
            path: addon_path.to_string(),
        }
        .into());
    }
    Ok(normalize_path(&format!("{}/{}", target_path, relative)))
}

/// Lexically cleans a slash-separated path.
///
/// Collapses repeated slashes, drops `.` segments and resolves `..` against
/// the preceding segment. `..` at the root of an absolute path is dropped.
/// Returns `.` for an empty relative result and `/` for the bare root.
pub fn normalize_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Error, ErrorKind};

    #[test]
    fn test_join_table() {
        let cases = [
            ("/data", "maps", "/data/maps"),
            ("/data/", "maps", "/data/maps"),
            ("/data", "/maps", "/data/maps"),
            ("/data/game", "addons/maps", "/data/game/addons/maps"),
            ("/data//game/", "addons//maps/", "/data/game/addons/maps"),
            ("/data", "./maps/./x", "/data/maps/x"),
            ("/data", "maps/../mods", "/data/mods"),
        ];
        for (target, addon, expected) in cases {
            assert_eq!(
                join_install_path(target, addon).unwrap(),
                expected,
                "join({:?}, {:?})",
                target,
                addon
            );
        }
    }

    #[test]
    fn test_join_rejects_escape() {
        for addon in ["..", "../etc", "maps/../../etc", "/../x"] {
            let err = join_install_path("/data", addon).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration);
            assert!(matches!(
                err,
                Error::Configuration(ConfigurationError::PathEscapesVolume { .. })
            ));
        }
    }

    #[test]
    fn test_join_rejects_volume_root() {
        for addon in [".", "./", "/", "/./", "maps/..", "maps/../."] {
            let err = join_install_path("/data", addon).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration);
            assert!(
                matches!(
                    err,
                    Error::Configuration(ConfigurationError::PathIsVolumeRoot { .. })
                ),
                "join(\"/data\", {:?}) should be refused",
                addon
            );
        }
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(""), ".");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("//"), "/");
        assert_eq!(normalize_path("/.."), "/");
        assert_eq!(normalize_path("a/b/../.."), ".");
        assert_eq!(normalize_path("../a"), "../a");
        assert_eq!(normalize_path("a/../../b"), "../b");
        assert_eq!(normalize_path("/a/./b/"), "/a/b");
    }
}
