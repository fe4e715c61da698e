use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use marking_core::{CellSize, DEFAULT_MIN_DIST, Dimensions, Layout};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuConfig {
    pub layout: Layout,
    pub items: Vec<String>,
    pub cell_width: f64,
    pub cell_height: f64,
    pub radius: f64,
    pub min_dist: f64,
    pub seed: Option<u64>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Radial,
            items: ["Cut", "Copy", "Paste", "Undo", "Redo", "Find", "Replace", "Select All"]
                .map(String::from)
                .to_vec(),
            cell_width: 280.0,
            cell_height: 100.0,
            radius: 350.0,
            min_dist: DEFAULT_MIN_DIST,
            seed: None,
        }
    }
}

impl MenuConfig {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            cell: CellSize::new(self.cell_width, self.cell_height),
            radius: self.radius,
            min_dist: self.min_dist,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub menu: MenuConfig,
    pub experiment: ExperimentConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "marking", "marking-menu")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Resolves `--config` against the per-user default location.
///
/// The result is always absolute, since the watcher compares it against the
/// absolute paths notify reports.
pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = path.map_or_else(get_config_path, |p| Ok(p.to_path_buf()))?;
    Ok(std::path::absolute(path)?)
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("MARKING_MENU")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(
            config::File::from(path.to_path_buf())
                .format(config::FileFormat::Toml)
                .required(false),
        )
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default(path: Option<&Path>) -> Config {
    match resolve_path(path).and_then(|p| load_config_from(&p)) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to the default menu: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config(path: Option<&Path>) -> std::io::Result<PathBuf> {
    let path =
        resolve_path(path).map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let touches_config = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if touches_config && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_matches_defaults() {
        let parsed = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let parsed = parse_config(
            r#"
            [menu]
            layout = "Custom"
            items = ["a", "b", "c"]
            seed = 11

            [experiment]
            enabled = true
            "#,
        )
        .unwrap();

        assert_eq!(parsed.menu.layout, Layout::Randomized);
        assert_eq!(parsed.menu.items, vec!["a", "b", "c"]);
        assert_eq!(parsed.menu.seed, Some(11));
        assert_eq!(parsed.menu.radius, MenuConfig::default().radius);
        assert!(parsed.experiment.enabled);
    }

    #[test]
    fn test_unknown_layout_is_rejected() {
        assert!(parse_config("[menu]\nlayout = \"grid\"\n").is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Config::default());
    }

    #[test]
    fn test_relative_config_path_becomes_absolute() {
        let resolved = resolve_path(Some(Path::new("menus/config.toml"))).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("menus/config.toml"));
        assert_eq!(
            resolved,
            std::env::current_dir().unwrap().join("menus/config.toml")
        );

        let absolute = Path::new("/etc/marking-menu/config.toml");
        assert_eq!(resolve_path(Some(absolute)).unwrap(), absolute);
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs_err::write(&path, "[menu]\nlayout = \"linear\"\nradius = 200.0\n").unwrap();

        // SAFETY: the only test that writes the environment; readers go through std.
        unsafe { std::env::set_var("MARKING_MENU_MENU__RADIUS", "123") };
        let loaded = load_config_from(&path);
        unsafe { std::env::remove_var("MARKING_MENU_MENU__RADIUS") };

        let loaded = loaded.unwrap();
        assert_eq!(loaded.menu.layout, Layout::Linear);
        assert_eq!(loaded.menu.radius, 123.0);
        assert_eq!(loaded.menu.items, MenuConfig::default().items);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.menu.items, MenuConfig::default().items);
    }

    #[tokio::test]
    async fn test_watcher_reports_relative_config_edits() {
        let dir = tempfile::tempdir_in(".").unwrap();
        let path = dir.path().join("config.toml");
        assert!(path.is_relative());
        fs_err::write(&path, DEFAULT_CONFIG).unwrap();

        let (tx, rx) = async_channel::unbounded();
        let watched = resolve_path(Some(&path)).unwrap();
        let watcher = tokio::spawn(run_async_watcher(watched, tx));
        // give the watcher time to register
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;

        fs_err::write(&path, "[menu]\nlayout = \"pie\"\n").unwrap();
        let event = tokio::time::timeout(std::time::Duration::from_secs(5), rx.recv())
            .await
            .expect("no reload within five seconds")
            .unwrap();
        assert_eq!(event, AppEvent::ConfigReload);
        watcher.abort();
    }

    #[test]
    fn test_dimensions_follow_config() {
        let menu = MenuConfig {
            cell_width: 120.0,
            cell_height: 50.0,
            radius: 200.0,
            min_dist: 5.0,
            ..MenuConfig::default()
        };
        let dims = menu.dimensions();
        assert_eq!(dims.cell, CellSize::new(120.0, 50.0));
        assert_eq!(dims.radius, 200.0);
        assert_eq!(dims.min_dist, 5.0);
    }
}
