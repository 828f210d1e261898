use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const CONFIG_FILE: &str = "govuk-semver.toml";

/// The govuk-semver configuration file structure (govuk-semver.toml)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SemverConfig {
    /// Parse versions and ranges loosely unless told otherwise
    pub loose: bool,

    /// Default output format: text or json
    pub format: Option<String>,

    /// Named ranges, referenced on the command line as `@name`
    #[serde(default)]
    pub ranges: HashMap<String, String>,

    /// Registry configuration
    pub registry: RegistryConfig,
}

/// Where `resolve` finds candidate versions when none are given
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry document (JSON array or npm package document)
    pub file: Option<String>,
}

impl SemverConfig {
    /// Load configuration from govuk-semver.toml, searching upward from the given directory
    pub fn load(start_dir: &Path) -> Result<Option<Self>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE);

            if config_path.exists() {
                let content = std::fs::read_to_string(&config_path)
                    .with_context(|| format!("Failed to read {}", config_path.display()))?;
                let mut config: SemverConfig = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", config_path.display()))?;
                config.anchor_registry(&current);
                log::debug!("Loaded configuration from {}", config_path.display());
                return Ok(Some(config));
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Load configuration by searching upward from the current working directory
    pub fn load_from_cwd() -> Result<Option<Self>> {
        let cwd = std::env::current_dir()?;
        Self::load(&cwd)
    }

    /// Look up a named range
    pub fn named_range(&self, name: &str) -> Option<&str> {
        self.ranges.get(name).map(String::as_str)
    }

    // A relative registry path is relative to the file that names it
    fn anchor_registry(&mut self, dir: &Path) {
        let anchored = match &self.registry.file {
            Some(file) if file != "-" && Path::new(file).is_relative() => {
                Some(dir.join(file).to_string_lossy().into_owned())
            }
            _ => None,
        };
        if anchored.is_some() {
            self.registry.file = anchored;
        }
    }
}
