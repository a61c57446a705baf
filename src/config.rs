use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub venue: VenueConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://gateway.db".to_string(),
        }
    }
}

/// Remote trading venue the gateway proxies.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VenueConfig {
    pub base_url: String,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            base_url: "https://testnet.bitmex.com".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        serde_yaml::from_str(&content).expect("Failed to parse config yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let yaml = r#"
log_level: "info"
log_dir: "logs"
log_file: "gateway.log"
use_json: false
rotation: "daily"
gateway:
  host: "127.0.0.1"
  port: 8000
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.gateway.port, 8000);
        assert_eq!(config.database.url, "sqlite://gateway.db");
        assert_eq!(config.venue.base_url, "https://testnet.bitmex.com");
    }
}
