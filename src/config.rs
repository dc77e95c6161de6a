use std::{env, path::PathBuf};

use directories::{BaseDirs, ProjectDirs};
use lazy_static::lazy_static;
use serde::Deserialize;
use strum::Display;

use crate::core::Formatter;
use crate::tui::theme::Theme;

const CONFIG: &str = include_str!("../.config/config.json5");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
        }
    }
}

fn default_decimals() -> u32 {
    4
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeName,
    #[serde(default)]
    pub display: DisplayConfig,
    /// Keybindings JSON file; the built-in bindings are used when unset
    #[serde(default)]
    pub keybindings: Option<PathBuf>,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

impl Config {
    /// Layer embedded defaults, the user file and `PROFILETUI_*` overrides.
    ///
    /// An explicit `config_path` must exist; the default location is optional.
    pub fn from_path(config_path: Option<&PathBuf>) -> Result<Self, config::ConfigError> {
        let (path, required) = match config_path {
            Some(p) => (expand_tilde(p), true),
            None => (get_config_dir().join("config.json5"), false),
        };

        let cfg = config::Config::builder()
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5))
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Json5)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix(PROJECT_NAME.as_str())
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut cfg: Self = cfg.try_deserialize()?;
        cfg.keybindings = cfg.keybindings.as_ref().map(expand_tilde);
        cfg.log_dir = cfg.log_dir.as_ref().map(expand_tilde);
        Ok(cfg)
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::with_decimals(self.display.decimals)
    }

    pub fn theme(&self) -> Theme {
        match self.theme {
            ThemeName::Dark => Theme::default(),
            ThemeName::Light => Theme::light(),
        }
    }

    /// Directory the log file goes to when `log_dir` is not set
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(get_data_dir)
    }
}

fn expand_tilde(path: &PathBuf) -> PathBuf {
    if let Some(s) = path.to_str() {
        if let Some(rest) = s.strip_prefix('~') {
            if let Some(base) = BaseDirs::new() {
                return base.home_dir().join(rest.trim_start_matches(['/', '\\']));
            }
        }
    }
    path.clone()
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "profiletui", env!("CARGO_PKG_NAME"))
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}
