use std::ffi::OsStr;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::config::Config;
use super::conversation::ConversationState;

const CONFIG_FILE: &str = "config.yaml";
const STATE_FILE: &str = "state.yaml";
const LOGS_DIR: &str = "logs";

pub fn data_dir() -> Result<PathBuf> {
    let project_dirs = directories::ProjectDirs::from("com", "lightbot", "lightbot")
        .context("Cannot retrieve project dirs")?;
    Ok(project_dirs.data_dir().to_owned())
}

pub fn logs_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join(LOGS_DIR))
}

/// YAML files kept in one directory.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Store { dir: dir.into() }
    }

    pub fn open_default() -> Result<Self> {
        Ok(Store::new(data_dir()?))
    }

    fn config_file_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    fn state_file_path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    pub fn load_config(&self) -> Result<Config> {
        let path = self.config_file_path();
        info!("Config file: {}", path.to_string_lossy());
        if !path.exists() {
            info!("Config file does not exist, creating.");
            self.store_default_config()?;
        }
        let config_file = File::open(&path)?;
        serde_yaml::from_reader(config_file)
            .with_context(|| format!("Cannot parse {}", path.to_string_lossy()))
    }

    pub fn store_default_config(&self) -> Result<()> {
        let path = self.config_file_path();
        ensure_dir_created(&path)?;
        let config_file = File::create(&path)?;
        Ok(serde_yaml::to_writer(config_file, &Config::default())?)
    }

    pub fn load_state(&self) -> Result<ConversationState> {
        let path = self.state_file_path();
        info!("State file: {}", path.to_string_lossy());
        if !path.exists() {
            return Ok(Default::default());
        }
        let state_file = File::open(&path)?;
        Ok(serde_yaml::from_reader(state_file)?)
    }

    pub fn store_state(&self, state: &ConversationState) -> Result<()> {
        debug!("Storing state {:?}", state);
        let path = self.state_file_path();
        ensure_dir_created(&path)?;
        store_file_with_backup(&path, state)
    }
}

fn store_file_with_backup<T>(path: &Path, data: &T) -> Result<()>
where
    T: Serialize + DeserializeOwned + PartialEq,
{
    let orig = if path.is_file() {
        let orig_file = File::open(path)?;
        // An unreadable file gets replaced, but still backed up below
        serde_yaml::from_reader::<_, T>(orig_file).ok()
    } else {
        None
    };
    if orig.as_ref() == Some(data) {
        return Ok(());
    }
    if path.is_file() {
        let orig_filename = path
            .file_name()
            .map(OsStr::to_string_lossy)
            .unwrap_or_default();
        let backup_path = path.with_file_name(format!("{}{}", orig_filename, ".bak"));
        std::fs::rename(path, backup_path)?;
    }
    let out_file = File::create(path)?;
    serde_yaml::to_writer(out_file, data)?;
    Ok(())
}

fn ensure_dir_created(path: &Path) -> Result<()> {
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create {}", dir.to_string_lossy()))?;
    }
    Ok(())
}
