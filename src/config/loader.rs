use crate::config::schema::ScraperConfig;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use validator::Validate;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates a config file, picking the format from its extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ScraperConfig> {
        let config = Self::load_file(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Falls back to the built-in targets when no file is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<ScraperConfig> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(ScraperConfig::default()),
        }
    }

    fn load_file(path: &Path) -> Result<ScraperConfig> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            Some("toml") => Ok(toml::from_str(&content)?),
            _ => Err(Error::Config(format!(
                "Unsupported file extension: {}",
                path.display()
            ))),
        }
    }
}
