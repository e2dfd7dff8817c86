use serde::Deserialize;
use std::collections::HashMap;

fn default_field_delimiter() -> String {
    ",".to_string()
}

fn default_row_delimiter() -> String {
    "\n".to_string()
}

fn default_reference_open() -> String {
    "<".to_string()
}

fn default_reference_close() -> String {
    ">".to_string()
}

/// One dialect entry as it appears in `dialects.toml`.
///
/// Delimiters are stored as strings in TOML; `Dialect::from_config`
/// validates that each is exactly one character.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DialectConfig {
    #[serde(default = "default_field_delimiter")]
    pub field_delimiter: String,
    #[serde(default = "default_row_delimiter")]
    pub row_delimiter: String,
    #[serde(default = "default_reference_open")]
    pub reference_open: String,
    #[serde(default = "default_reference_close")]
    pub reference_close: String,
}

#[derive(Debug, Deserialize)]
pub struct DialectRegistry {
    pub dialects: HashMap<String, DialectConfig>,
}

impl DialectRegistry {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        let content = include_str!("../dialects.toml");
        Ok(Self::from_toml(content)?)
    }

    /// Load configuration from custom file path
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Load configuration with user overrides from standard locations
    /// 1. Start with built-in dialects
    /// 2. Override with ~/.config/keyed-csv/dialects.toml if it exists
    /// 3. Override with ./dialects.toml if it exists in current directory
    pub fn load_with_overrides() -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_config_path = config_dir.join("keyed-csv").join("dialects.toml");
            if user_config_path.exists() {
                match Self::load_from_file(&user_config_path) {
                    Ok(user_config) => {
                        config.merge(user_config);
                    }
                    Err(e) => {
                        eprintln!(
                            "Warning: Failed to load user config from {:?}: {}",
                            user_config_path, e
                        );
                    }
                }
            }
        }

        let local_config_path = std::path::Path::new("dialects.toml");
        if local_config_path.exists() {
            match Self::load_from_file(local_config_path) {
                Ok(local_config) => {
                    config.merge(local_config);
                }
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to load local config from {:?}: {}",
                        local_config_path, e
                    );
                }
            }
        }

        Ok(config)
    }

    /// Merge another registry into this one, overriding existing dialects
    pub fn merge(&mut self, other: DialectRegistry) {
        for (name, dialect) in other.dialects {
            self.dialects.insert(name, dialect);
        }
    }

    pub fn get_dialect(&self, name: &str) -> Option<&DialectConfig> {
        self.dialects.get(name)
    }
}
