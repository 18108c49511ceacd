use crate::constants::{CONFIG_FILENAMES, DEFAULT_TEMPLATE_EXTENSIONS};
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Optional `scaffold.{json,yaml,yml}` file at the template root.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extensions stripped from template names, first match wins.
    #[serde(default)]
    pub template_extensions: Option<Vec<String>>,
    /// Glob patterns, relative to the template root, that are never generated.
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Config {
    fn from_file(path: &Path) -> Result<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Io(e)),
        };

        let extension = path.extension().and_then(|ext| ext.to_str());
        let parsed: std::result::Result<Config, String> = match extension {
            Some("json") => serde_json::from_str(&contents).map_err(|e| e.to_string()),
            _ => serde_yaml::from_str(&contents).map_err(|e| e.to_string()),
        };

        parsed.map(Some).map_err(|e| Error::ConfigParseError {
            path: path.display().to_string(),
            e,
        })
    }

    /// Loads the first config file found in `template_root`, or the defaults
    /// when there is none.
    pub fn load_config<P: AsRef<Path>>(template_root: P) -> Result<Config> {
        let template_root = template_root.as_ref();
        for config_file in CONFIG_FILENAMES {
            let path = template_root.join(config_file);
            if let Some(config) = Config::from_file(&path)? {
                debug!("Loaded config from '{}'", path.display());
                return Ok(config);
            }
        }
        debug!("No config file found in '{}', using defaults", template_root.display());
        Ok(Config::default())
    }

    /// `overrides` if non-empty, then the configured list, then the defaults.
    pub fn template_extensions(&self, overrides: &[String]) -> Vec<String> {
        if !overrides.is_empty() {
            return overrides.to_vec();
        }
        self.template_extensions.clone().unwrap_or_else(|| {
            DEFAULT_TEMPLATE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
        })
    }
}
