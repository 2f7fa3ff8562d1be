//! Configuration module for Contact Desk.
//!
//! Loads configuration from YAML files and environment variables. Keys are
//! flat so the deployment environment names (`JWT_SECRET`, `ADMIN_EMAIL`,
//! `PORT`, ...) map onto them directly.

use config::{Config as ConfigLoader, ConfigError, Environment, File, Map};
use serde::Deserialize;

/// Development signing secret used when `JWT_SECRET` is not set.
pub const DEFAULT_JWT_SECRET: &str = "dev_jwt_secret_change_me";
/// Demo administrator email used when `ADMIN_EMAIL` is not set.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@webapp.com";
/// Demo administrator password used when `ADMIN_PASSWORD` is not set.
pub const DEFAULT_ADMIN_PASSWORD: &str = "123456";

/// Root configuration structure.
///
/// Built once at startup and passed by reference; nothing below `main`
/// reads the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HMAC secret for signing bearer tokens.
    pub jwt_secret: String,
    /// Issuer claim stamped into and required on every token.
    pub jwt_issuer: String,
    /// The single administrator identity.
    pub admin_email: String,
    pub admin_password: String,
    /// Interface to bind the listener to.
    pub bind_host: String,
    pub port: u16,
    /// Directory holding the prebuilt client bundle.
    pub frontend_dist_path: String,
    /// Run the one-time contacts table bootstrap before serving.
    pub enable_db_init: bool,
    pub database_url: String,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT_SECRET, ADMIN_EMAIL, PORT, ...)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml (if exists)
    /// 4. Built-in development defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(None)
    }

    /// Same as [`Config::load`], reading variables from `env` instead of the
    /// process environment when given.
    pub fn load_with_env(env: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .set_default("jwt_secret", DEFAULT_JWT_SECRET)?
            .set_default("jwt_issuer", "contact-desk")?
            .set_default("admin_email", DEFAULT_ADMIN_EMAIL)?
            .set_default("admin_password", DEFAULT_ADMIN_PASSWORD)?
            .set_default("bind_host", "0.0.0.0")?
            .set_default("port", 5000)?
            .set_default("frontend_dist_path", "../frontend/dist")?
            .set_default("enable_db_init", false)?
            .set_default("database_url", "sqlite://webapp_db.sqlite")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::default().source(env))
            .build()?;

        config.try_deserialize()
    }

    /// Whether the signing secret or admin password are still the
    /// development placeholders.
    pub fn uses_insecure_defaults(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET || self.admin_password == DEFAULT_ADMIN_PASSWORD
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = Config::load_with_env(Some(Map::new())).unwrap();
        assert_eq!(config.jwt_secret, DEFAULT_JWT_SECRET);
        assert_eq!(config.admin_email, "admin@webapp.com");
        assert_eq!(config.admin_password, "123456");
        assert_eq!(config.port, 5000);
        assert!(!config.enable_db_init);
        assert!(config.uses_insecure_defaults());
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_environment_overrides() {
        let config = Config::load_with_env(Some(env(&[
            ("JWT_SECRET", "prod-secret"),
            ("ADMIN_EMAIL", "owner@example.com"),
            ("ADMIN_PASSWORD", "hunter22"),
            ("PORT", "8081"),
            ("ENABLE_DB_INIT", "true"),
        ])))
        .unwrap();

        assert_eq!(config.jwt_secret, "prod-secret");
        assert_eq!(config.admin_email, "owner@example.com");
        assert_eq!(config.admin_password, "hunter22");
        assert_eq!(config.port, 8081);
        assert!(config.enable_db_init);
        assert!(!config.uses_insecure_defaults());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = Config::load_with_env(Some(env(&[("PORT", "not-a-port")])));
        assert!(result.is_err());
    }
}
