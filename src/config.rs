//! Process configuration, layered with figment.
//!
//! Defaults come from [`Config::default`] and are overridden by environment
//! variables: `LIVROS_USERNAME`, `LIVROS_PASSWORD`, `LIVROS_LISTEN_ADDR`,
//! `LIVROS_LOGLEVEL`, `LIVROS_STORAGE` and `DATABASE_URL`
//! (or `LIVROS_DATABASE_URL`).

use figment::{
    Figment,
    providers::{Env, Serialized},
    value::{Uncased, UncasedStr},
};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub basic: BasicConfig,
    pub storage: StorageConfig,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub loglevel: String,
    pub username: String,
    pub password: String,
}

// Keep the password out of `Debug` output and therefore out of logs.
impl std::fmt::Debug for BasicConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicConfig")
            .field("listen_addr", &self.listen_addr)
            .field("loglevel", &self.loglevel)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Actor-owned map; ids are supplied by the client.
    Memory,
    /// SQLite table; ids are assigned by the database.
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            basic: BasicConfig {
                listen_addr: "0.0.0.0:8000".to_string(),
                loglevel: "info".to_string(),
                username: String::new(),
                password: String::new(),
            },
            storage: StorageConfig {
                backend: StorageBackend::Sqlite,
                database_url: "sqlite:livros.db".to_string(),
            },
        }
    }
}

impl Config {
    /// Load the configuration from defaults and the process environment.
    pub fn from_env() -> Result<Self, CatalogError> {
        let cfg: Config = Self::figment().extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(
                Env::raw()
                    .only(&["database_url"])
                    .map(|_| "storage.database_url".into()),
            )
            .merge(Env::prefixed("LIVROS_").map(env_key))
    }

    /// Reject configurations the service cannot run with.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.basic.username.is_empty() || self.basic.password.is_empty() {
            return Err(CatalogError::InvalidConfig(
                "LIVROS_USERNAME and LIVROS_PASSWORD must both be set".to_string(),
            ));
        }
        if self.storage.backend == StorageBackend::Sqlite && self.storage.database_url.is_empty() {
            return Err(CatalogError::InvalidConfig(
                "DATABASE_URL must be set for the sqlite backend".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_key(key: &UncasedStr) -> Uncased<'_> {
    let lower = key.as_str().to_ascii_lowercase();
    match lower.as_str() {
        "username" | "password" | "listen_addr" | "loglevel" => format!("basic.{lower}").into(),
        "storage" => "storage.backend".into(),
        "database_url" => "storage.database_url".into(),
        _ => key.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_require_credentials() {
        let cfg = Config::default();
        assert!(matches!(
            cfg.validate(),
            Err(CatalogError::InvalidConfig(_))
        ));
    }

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("LIVROS_USERNAME", "admin");
            jail.set_env("LIVROS_PASSWORD", "segredo");
            jail.set_env("LIVROS_STORAGE", "memory");
            jail.set_env("DATABASE_URL", "sqlite::memory:");

            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.basic.username, "admin");
            assert_eq!(cfg.basic.password, "segredo");
            assert_eq!(cfg.basic.listen_addr, "0.0.0.0:8000");
            assert_eq!(cfg.storage.backend, StorageBackend::Memory);
            assert_eq!(cfg.storage.database_url, "sqlite::memory:");
            assert!(cfg.validate().is_ok());
            Ok(())
        });
    }

    #[test]
    fn debug_output_redacts_password() {
        let mut cfg = Config::default();
        cfg.basic.password = "segredo".to_string();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("segredo"));
        assert!(rendered.contains("<redacted>"));
    }
}
