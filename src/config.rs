use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

const ENV_PREFIX: &str = "CATALOG";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: String,
    pub static_dir: String,
}

impl AppConfig {
    /// Loads `config/default.toml` if present, then `CATALOG_*` environment variables
    /// (call `dotenv` first to pick up a `.env` file).
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(Environment::with_prefix(ENV_PREFIX).separator("__"))
    }

    fn build(environment: Environment) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .set_default("database_url", "sqlite://catalog.db")?
            .set_default("listen_addr", "0.0.0.0:3000")?
            .set_default("static_dir", "public")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(environment)
            .build()?
            .try_deserialize::<AppConfig>()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: "sqlite::memory:".to_string(),
            listen_addr: "127.0.0.1:3000".to_string(),
            static_dir: "public".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let vars: ::config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .source(Some(vars))
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = AppConfig::build(environment(&[])).unwrap();
        assert_eq!(config.database_url, "sqlite://catalog.db");
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.static_dir, "public");
    }

    #[test]
    fn prefixed_variables_override_defaults() {
        let config = AppConfig::build(environment(&[
            ("CATALOG_LISTEN_ADDR", "127.0.0.1:8080"),
            ("CATALOG_DATABASE_URL", "sqlite://other.db"),
            ("STATIC_DIR", "ignored"),
        ]))
        .unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.database_url, "sqlite://other.db");
        assert_eq!(config.static_dir, "public");
    }
}
