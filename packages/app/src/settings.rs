use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct Data {
    /// Override for the persistence directory. Empty means the platform
    /// data dir.
    pub dir: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    pub data: Data,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("data.dir", "")?
            .add_source(
                File::with_name("huddle.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::default().separator("_"))
            .build()?;

        config.try_deserialize()
    }

    /// Directory the selection store persists under.
    pub fn data_dir(&self) -> PathBuf {
        if self.data.dir.is_empty() {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("huddle")
        } else {
            PathBuf::from(&self.data.dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::set_var;

    #[test]
    fn test_settings_env_override() {
        set_var("DATA_DIR", "/tmp/huddle-test-data");
        let settings = Settings::new().unwrap_or_default();
        assert_eq!(settings.data.dir, "/tmp/huddle-test-data");
        assert_eq!(settings.data_dir(), PathBuf::from("/tmp/huddle-test-data"));
    }
}
