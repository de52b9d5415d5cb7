use std::{
    env::{self, VarError},
    fs::File,
    io,
    path::{Path, PathBuf},
};

use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};

use crate::{
    error::Error, query::SearchQuery, util::mkdir_if_not_exists, webapi::DEFAULT_PAGE_SIZE,
};

const APP_NAME: &str = "Pixwall";
const CONFIG_FILENAME: &str = "config.json";
const DOWNLOADS_DIRNAME: &str = "downloads";
const API_KEY_ENV_VAR: &str = "PIXABAY_API_KEY";
const PROXY_ENV_VAR: &str = "HTTPS_PROXY";
const DEFAULT_QUERY: &str = "nature";

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: String,
    pub default_query: String,
    pub download_dir: Option<PathBuf>,
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            default_query: DEFAULT_QUERY.to_string(),
            download_dir: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    fn app_dirs() -> Option<AppDirs> {
        const USE_XDG_ON_MACOS: bool = false;

        AppDirs::new(Some(APP_NAME), USE_XDG_ON_MACOS)
    }

    pub fn config_dir() -> Option<PathBuf> {
        Self::app_dirs().map(|dirs| dirs.config_dir)
    }

    /// Directory holding the persisted storage slots.
    pub fn data_dir() -> Option<PathBuf> {
        Self::app_dirs().map(|dirs| dirs.data_dir)
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILENAME))
    }

    pub fn load() -> Result<Option<Config>, Error> {
        let path = Self::config_path()
            .ok_or_else(|| Error::ConfigError("no config directory".into()))?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Option<Config>, Error> {
        match File::open(path) {
            Ok(file) => {
                log::info!("loading config: {:?}", path);
                let config = serde_json::from_reader(file)
                    .map_err(|err| Error::ConfigError(format!("{path:?}: {err}")))?;
                Ok(Some(config))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self) -> Result<(), Error> {
        let path = Self::config_path()
            .ok_or_else(|| Error::ConfigError("no config directory".into()))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        if let Some(dir) = path.parent() {
            mkdir_if_not_exists(dir)?;
        }
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// The configured key, unless the environment provides one.
    pub fn api_key(&self) -> Option<String> {
        pick_api_key(env_var(API_KEY_ENV_VAR), &self.api_key)
    }

    pub fn initial_query(&self) -> SearchQuery {
        SearchQuery::Term(self.default_query.clone())
    }

    pub fn download_dir(&self) -> Option<PathBuf> {
        self.download_dir
            .clone()
            .or_else(|| Self::data_dir().map(|dir| dir.join(DOWNLOADS_DIRNAME)))
    }

    pub fn proxy() -> Option<String> {
        env_var(PROXY_ENV_VAR)
    }
}

/// A blank override does not hide the configured key.
fn pick_api_key(env_key: Option<String>, configured: &str) -> Option<String> {
    let non_blank = |key: &String| !key.trim().is_empty();
    env_key
        .filter(non_blank)
        .or_else(|| Some(configured.to_string()).filter(non_blank))
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).map_or_else(
        |err| match err {
            VarError::NotPresent => None,
            VarError::NotUnicode(_) => {
                log::error!("{} is not a valid unicode", name);
                None
            }
        },
        Some,
    )
}
