use serde::{Deserialize, Serialize};

fn default_max_lifetime_hours() -> u32 {
    24
}

fn default_min_click_limit() -> u32 {
    5
}

fn default_domain() -> String {
    "test.ru/".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Link policy tunables consumed at service construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Ceiling on the requested link lifetime, in hours
    #[serde(default = "default_max_lifetime_hours")]
    pub max_lifetime_hours: u32,
    /// Floor on the requested click limit
    #[serde(default = "default_min_click_limit")]
    pub min_click_limit: u32,
    /// Domain prefix prepended to every generated code
    #[serde(default = "default_domain")]
    pub domain: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            max_lifetime_hours: default_max_lifetime_hours(),
            min_click_limit: default_min_click_limit(),
            domain: default_domain(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Application configuration loaded at startup
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub links: LinkConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from an optional `config.toml` and environment
    /// variables.
    ///
    /// Priority: ENV > config.toml > defaults.
    /// ENV prefix: SHORTENER, separator: __
    /// Example: SHORTENER__LINKS__MAX_LIFETIME_HOURS=48
    ///
    /// Missing or malformed configuration falls back to defaults; startup
    /// never aborts because of it.
    pub fn load() -> Self {
        use config::{Config, Environment, File};

        let path = "config.toml";

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("SHORTENER")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<AppConfig>() {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("[WARN] Failed to deserialize config, using defaults: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[WARN] Failed to read config, using defaults: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.links.max_lifetime_hours, 24);
        assert_eq!(config.links.min_click_limit, 5);
        assert_eq!(config.links.domain, "test.ru/");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_falls_back_per_field() {
        let toml = r#"
            [links]
            max_lifetime_hours = 48
        "#;
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap();
        let config: AppConfig = settings.try_deserialize().unwrap();
        assert_eq!(config.links.max_lifetime_hours, 48);
        assert_eq!(config.links.min_click_limit, 5);
        assert_eq!(config.links.domain, "test.ru/");
    }

    #[test]
    fn test_full_toml() {
        let toml = r#"
            [links]
            max_lifetime_hours = 12
            min_click_limit = 3
            domain = "sho.rt/"

            [logging]
            level = "debug"
        "#;
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap();
        let config: AppConfig = settings.try_deserialize().unwrap();
        assert_eq!(config.links.max_lifetime_hours, 12);
        assert_eq!(config.links.min_click_limit, 3);
        assert_eq!(config.links.domain, "sho.rt/");
        assert_eq!(config.logging.level, "debug");
    }
}
