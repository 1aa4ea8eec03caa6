//! Configuration loading and validation.
//!
//! One TOML file owns the deployment-specific values: the HR-desk contact
//! details rendered in assistant answers and the storage locations.
//! Analysis thresholds (overload limit, risk tiers) are product constants
//! and deliberately not configurable.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// HR-desk contact details rendered in answers.
    #[serde(default)]
    pub hr_desk: HrDeskConfig,

    /// Storage locations.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// HR-desk contact details.
#[derive(Debug, Clone, Deserialize)]
pub struct HrDeskConfig {
    /// Name of the HR lead.
    #[serde(default = "default_responsable")]
    pub responsable: String,

    /// Contact email.
    #[serde(default = "default_email")]
    pub email: String,

    /// Contact phone number.
    #[serde(default = "default_telephone")]
    pub telephone: String,

    /// Office location.
    #[serde(default = "default_bureau")]
    pub bureau: String,

    /// Opening hours.
    #[serde(default = "default_horaires")]
    pub horaires: String,
}

impl Default for HrDeskConfig {
    fn default() -> Self {
        Self {
            responsable: default_responsable(),
            email: default_email(),
            telephone: default_telephone(),
            bureau: default_bureau(),
            horaires: default_horaires(),
        }
    }
}

/// Storage locations.
#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// Directory receiving rendered report artifacts.
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            reports_dir: default_reports_dir(),
        }
    }
}

// Default value functions for serde

fn default_responsable() -> String {
    "Mme Khadija Benani".to_owned()
}
fn default_email() -> String {
    "KhadijaBenani@entreprise.com".to_owned()
}
fn default_telephone() -> String {
    "+01 23 45 67 89".to_owned()
}
fn default_bureau() -> String {
    "2ème étage, porte 204".to_owned()
}
fn default_horaires() -> String {
    "9h-12h / 14h-17h, du lundi au vendredi".to_owned()
}
fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

/// Load the configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config at {}: {e}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config at {}: {e}", path.display()))?;
    Ok(config)
}

/// Resolve the default config directory (`~/.ariane/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> anyhow::Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".ariane"))
}
