//! `vdk.toml` loading.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use vdk_agents::{Brand, FileNames, PersonaSettings};
use vdk_core::TransitionPolicy;
use vdk_session::SessionConfig;
use vdk_telemetry::LogFormat;

pub const CONFIG_FILE: &str = "vdk.toml";
pub const DATA_DIR_ENV: &str = "VDK_DATA_DIR";
pub const OUTPUT_DIR_ENV: &str = "VDK_OUTPUT_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSection {
    pub reference_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for DataSection {
    fn default() -> Self {
        Self { reference_dir: PathBuf::from("shared-data"), output_dir: PathBuf::from(".") }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    pub policy: TransitionPolicy,
    pub improv_max_rounds: u32,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self { policy: TransitionPolicy::Advisory, improv_max_rounds: 3 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySection {
    pub format: LogFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VdkConfig {
    pub data: DataSection,
    pub files: FileNames,
    pub session: SessionSection,
    pub brand: Brand,
    pub telemetry: TelemetrySection,
}

impl VdkConfig {
    /// Loads configuration.
    ///
    /// An explicit path must exist. Without one, `./vdk.toml` is tried, then
    /// `vdk/vdk.toml` under the user config directory, and finally defaults.
    /// Environment overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_locations().into_iter().find(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("no config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn default_locations() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("vdk").join(CONFIG_FILE));
        }
        paths
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            self.data.reference_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(OUTPUT_DIR_ENV).filter(|v| !v.is_empty()) {
            self.data.output_dir = PathBuf::from(dir);
        }
    }

    pub fn persona_settings(&self) -> PersonaSettings {
        PersonaSettings {
            reference_dir: self.data.reference_dir.clone(),
            output_dir: self.data.output_dir.clone(),
            files: self.files.clone(),
            brand: self.brand.clone(),
            improv_max_rounds: self.session.improv_max_rounds,
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig { policy: self.session.policy, allowed_tools: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(VdkConfig::from_toml("").unwrap(), VdkConfig::default());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = VdkConfig::from_toml(
            r#"
            [session]
            policy = "enforced"

            [brand]
            cafe = "Night Owl"

            [files]
            leads = "crm/leads.json"

            [telemetry]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.session.policy, TransitionPolicy::Enforced);
        assert_eq!(config.session.improv_max_rounds, 3);
        assert_eq!(config.brand.cafe, "Night Owl");
        assert_eq!(config.brand.bank, "Horizon Bank");
        assert_eq!(config.files.leads, "crm/leads.json");
        assert_eq!(config.files.faq, "faq.json");
        assert_eq!(config.telemetry.format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(VdkConfig::from_toml("[session]\npolicy = \"strict\"").is_err());
    }

    #[test]
    fn test_env_overrides_directories() {
        let mut config = VdkConfig::default();
        config.apply_env(|key| match key {
            DATA_DIR_ENV => Some("/srv/vdk/data".to_string()),
            OUTPUT_DIR_ENV => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.data.reference_dir, PathBuf::from("/srv/vdk/data"));
        assert_eq!(config.data.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_persona_settings_carry_everything() {
        let mut config = VdkConfig::default();
        config.session.improv_max_rounds = 5;
        let settings = config.persona_settings();
        assert_eq!(settings.improv_max_rounds, 5);
        assert_eq!(settings.output_path("leads.json"), PathBuf::from("./leads.json"));
    }
}
