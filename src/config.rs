use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::shutdown::ShutdownSignal;

const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub workshop: WorkshopConfig,
    pub shutdown: ShutdownConfig,
    pub lifecycle: LifecycleConfig,

    /// File this config was read from; `None` means built-in defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,

    /// Candidate files that existed but failed to load
    #[serde(skip)]
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkshopConfig {
    /// Cycle counts above this print an advisory warning
    pub high_cycle_warning: u32,
}

impl Default for WorkshopConfig {
    fn default() -> Self {
        Self { high_cycle_warning: 50 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShutdownConfig {
    pub signals: Vec<ShutdownSignal>,
    pub log_exit: bool,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            signals: ShutdownSignal::DEFAULT_SET.to_vec(),
            log_exit: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    pub terminate_siblings: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            terminate_siblings: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            workshop: WorkshopConfig::default(),
            shutdown: ShutdownConfig::default(),
            lifecycle: LifecycleConfig::default(),
            source: None,
            skipped: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// Runs before logging is set up, so the outcome is recorded on the
    /// returned config and reported later by [`Config::log_source`].
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let mut skipped = Vec::new();

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let primary_config = config_dir.join(PROJECT_NAME).join(format!("{}.yml", PROJECT_NAME));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => skipped.push(format!("{}: {}", primary_config.display(), e)),
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let fallback_config = PathBuf::from(format!("{}.yml", PROJECT_NAME));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(mut config) => {
                    config.skipped = skipped;
                    return Ok(config);
                }
                Err(e) => skipped.push(format!("{}: {}", fallback_config.display(), e)),
            }
        }

        // No config file found, use defaults
        Ok(Self {
            skipped,
            ..Self::default()
        })
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let mut config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.source = Some(path.as_ref().to_path_buf());
        Ok(config)
    }

    /// Log where the config came from; call once logging is initialized
    pub fn log_source(&self) {
        for entry in &self.skipped {
            log::warn!("Failed to load config from {}", entry);
        }
        match &self.source {
            Some(path) => log::info!("Loaded config from: {}", path.display()),
            None => log::info!("No config file found, using defaults"),
        }
    }

    /// Effective env_logger filter
    pub fn log_filter(&self, verbose: bool) -> String {
        if verbose {
            return "debug".to_string();
        }
        self.log_level.clone().unwrap_or_else(|| "info".to_string())
    }
}
