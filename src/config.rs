//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `config.toml`, found via the XDG search path
//!    (`./`, `$XDG_CONFIG_HOME/googlecl`, `$XDG_CONFIG_DIRS/*/googlecl`, `~/.googlecl`)
//!    or given explicitly with `--config`
//! 3. Environment variables: `GOOGLECL_*` prefix, `__` between section and key
//!    (`GOOGLECL_GENERAL__REGEX=false`, `GOOGLECL_PICASA__TITLE=Holidays`)
//!
//! Settings are loaded once per process and never mutated afterwards.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Source};
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{ClientFlags, OptionField};
use crate::infrastructure::paths::XdgPaths;

pub const CONFIG_FILENAME: &str = "config.toml";
const GENERAL_SECTION: &str = "general";

/// The `[general]` section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Use the cached username when a task needs a user
    pub use_default_username: bool,
    /// Treat titles as regular expressions
    pub regex: bool,
    /// Confirm each tag change
    pub tags_prompt: bool,
    /// Confirm each deletion
    pub delete_prompt: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            use_default_username: true,
            regex: true,
            tags_prompt: false,
            delete_prompt: true,
        }
    }
}

/// Raw `[general]` for intermediate parsing (`None` = not specified, keep base).
#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(default)]
pub struct RawGeneralConfig {
    pub use_default_username: Option<bool>,
    pub regex: Option<bool>,
    pub tags_prompt: Option<bool>,
    pub delete_prompt: Option<bool>,
}

impl GeneralConfig {
    /// Overlay wins where it specifies a value.
    pub fn merge(&self, overlay: &RawGeneralConfig) -> Self {
        Self {
            use_default_username: overlay
                .use_default_username
                .unwrap_or(self.use_default_username),
            regex: overlay.regex.unwrap_or(self.regex),
            tags_prompt: overlay.tags_prompt.unwrap_or(self.tags_prompt),
            delete_prompt: overlay.delete_prompt.unwrap_or(self.delete_prompt),
        }
    }
}

/// A default option value in a service section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DefaultValue {
    Text(String),
    Flag(bool),
    Number(i64),
}

impl DefaultValue {
    pub fn as_text(&self) -> String {
        match self {
            DefaultValue::Text(s) => s.clone(),
            DefaultValue::Flag(b) => b.to_string(),
            DefaultValue::Number(n) => n.to_string(),
        }
    }
}

/// Named option defaults of one service section.
pub type ServiceDefaults = BTreeMap<String, DefaultValue>;

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub general: RawGeneralConfig,
    #[serde(flatten)]
    pub services: BTreeMap<String, ServiceDefaults>,
}

/// Unified configuration for googlecl.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralConfig,
    /// One table per service section, e.g. `[picasa]`
    #[serde(flatten)]
    pub services: BTreeMap<String, ServiceDefaults>,
}

/// Path of the config file found on the XDG search path, if any.
pub fn config_file_path() -> Option<PathBuf> {
    XdgPaths::config().locate(CONFIG_FILENAME)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Switches the service clients are built with.
    pub fn client_flags(&self) -> ClientFlags {
        ClientFlags {
            regex: self.general.regex,
            tags_prompt: self.general.tags_prompt,
            delete_prompt: self.general.delete_prompt,
        }
    }

    /// Default value of `field` in `section`; empty values count as absent.
    pub fn service_default(&self, section: &str, field: OptionField) -> Option<String> {
        self.services
            .get(section)
            .and_then(|defaults| defaults.get(field.name()))
            .map(DefaultValue::as_text)
            .filter(|v| !v.is_empty())
    }

    /// Merge overlay config onto self (base).
    ///
    /// - `[general]` scalars: overlay wins if specified
    /// - service sections: keys from the overlay replace keys of the same name
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let mut services = self.services.clone();
        for (section, defaults) in &overlay.services {
            let target = services.entry(section.to_lowercase()).or_default();
            for (key, value) in defaults {
                target.insert(key.clone(), value.clone());
            }
        }
        Self {
            general: self.general.merge(&overlay.general),
            services,
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file (`--config`); it must exist.
    ///   When `None`, the XDG search path is used and a missing file is fine.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file
        let path = match config_file {
            Some(path) if !path.exists() => {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                })
            }
            Some(path) => Some(path.to_path_buf()),
            None => config_file_path(),
        };
        if let Some(path) = path {
            tracing::debug!("loading config from {}", path.display());
            let raw = load_raw_settings(&path)?;
            current = current.merge_with(&raw);
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        Ok(current)
    }

    /// Apply GOOGLECL_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let builder = Config::builder().add_source(
            Environment::with_prefix("GOOGLECL")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_bool("general.use_default_username") {
            settings.general.use_default_username = val;
        }
        if let Ok(val) = config.get_bool("general.regex") {
            settings.general.regex = val;
        }
        if let Ok(val) = config.get_bool("general.tags_prompt") {
            settings.general.tags_prompt = val;
        }
        if let Ok(val) = config.get_bool("general.delete_prompt") {
            settings.general.delete_prompt = val;
        }

        // Everything else is a `<section>.<option>` default
        let table = config.collect().map_err(config_err)?;
        for (section, value) in table {
            if section == GENERAL_SECTION {
                continue;
            }
            let Ok(entries) = value.into_table() else {
                continue;
            };
            for (key, value) in entries {
                if let Ok(text) = value.into_string() {
                    settings
                        .services
                        .entry(section.clone())
                        .or_default()
                        .insert(key, DefaultValue::Text(text));
                }
            }
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# googlecl configuration
#
# Locations (first found wins):
#   ./config.toml
#   $XDG_CONFIG_HOME/googlecl/config.toml  (usually ~/.config/googlecl)
#   $XDG_CONFIG_DIRS/googlecl/config.toml  (usually /etc/xdg/googlecl)
#   ~/.googlecl/config.toml
# Environment: GOOGLECL_GENERAL__REGEX=false, GOOGLECL_PICASA__TITLE=...

[general]
# Use the cached username instead of asking for one
# use_default_username = true

# Titles given with --title are regular expressions
# regex = true

# Ask before changing the tags of each item
# tags_prompt = false

# Ask before deleting each item
# delete_prompt = true

# One section per service with default option values, used instead of
# prompting when a task requires an option that was not given.
[picasa]
# title = "Unsorted"

[blogger]
# blog = "My Blog"

[youtube]
# category = "Film"

[docs]
# format = "txt"
# editor = "vim"

[contacts]

[calendar]
# cal = "Work"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
