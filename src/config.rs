use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::role::ModelTier;
use crate::{hlog_debug, Error, Result};

/// Concrete model ids for each tier tag. Unset tiers resolve to the tag.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ModelMap {
    pub opus: Option<String>,
    pub sonnet: Option<String>,
    pub haiku: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Agent manifest path; `~/` is expanded.
    pub manifest: Option<String>,
    #[serde(default)]
    pub models: ModelMap,
}

impl Config {
    pub fn handoff_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".handoff"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::handoff_dir()?.join("handoff.toml"))
    }

    pub fn manifest_path(&self) -> Result<PathBuf> {
        match &self.manifest {
            Some(path) => Ok(expand_tilde(path)),
            None => Ok(Self::handoff_dir()?.join("agents.toml")),
        }
    }

    pub fn model_for(&self, tier: ModelTier) -> &str {
        let configured = match tier {
            ModelTier::Opus => self.models.opus.as_deref(),
            ModelTier::Sonnet => self.models.sonnet.as_deref(),
            ModelTier::Haiku => self.models.haiku.as_deref(),
        };
        configured.unwrap_or(tier.as_str())
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        hlog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            hlog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        hlog_debug!(
            "Config loaded: manifest={:?}, models={:?}",
            config.manifest,
            config.models
        );
        Ok(config)
    }

    pub fn set_model(&mut self, tier: ModelTier, id: impl Into<String>) {
        let slot = match tier {
            ModelTier::Opus => &mut self.models.opus,
            ModelTier::Sonnet => &mut self.models.sonnet,
            ModelTier::Haiku => &mut self.models.haiku,
        };
        *slot = Some(id.into());
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Write the config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        hlog_debug!("Config saved to {}", path.display());
        Ok(())
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
