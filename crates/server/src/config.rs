//! Server configuration from the environment.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use registry_spi::ServingSlot;

use crate::error::ServingError;

/// Bind address, serving slot and prediction budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub slot: ServingSlot,
    pub predict_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4999,
            slot: ServingSlot::default(),
            predict_timeout: Duration::from_millis(2000),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `MODEL_PATH`, `SCALER_PATH` and
    /// `PREDICT_TIMEOUT_MS`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ServingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] over an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ServingError::Config(format!("PORT '{}' is not a valid port", port)))?;
        }
        if let Some(path) = lookup("MODEL_PATH") {
            config.slot.model_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SCALER_PATH") {
            config.slot.scaler_path = PathBuf::from(path);
        }
        if let Some(ms) = lookup("PREDICT_TIMEOUT_MS") {
            let ms: u64 = ms.trim().parse().map_err(|_| {
                ServingError::Config(format!("PREDICT_TIMEOUT_MS '{}' is not a number", ms))
            })?;
            config.predict_timeout = Duration::from_millis(ms);
        }
        Ok(config)
    }

    pub fn slot(mut self, slot: ServingSlot) -> Self {
        self.slot = slot;
        self
    }

    pub fn predict_timeout(mut self, timeout: Duration) -> Self {
        self.predict_timeout = timeout;
        self
    }

    pub fn addr(&self) -> Result<SocketAddr, ServingError> {
        format!("{}:{}", self.host, self.port).parse().map_err(|_| {
            ServingError::Config(format!(
                "invalid bind address {}:{}",
                self.host, self.port
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr().unwrap().port(), 4999);
        assert_eq!(config.slot.model_path, PathBuf::from("models/model.json"));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("MODEL_PATH", "/srv/model.json"),
            ("SCALER_PATH", "/srv/scaler.json"),
            ("PREDICT_TIMEOUT_MS", "250"),
        ]))
        .unwrap();
        assert_eq!(config.addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.slot.scaler_path, PathBuf::from("/srv/scaler.json"));
        assert_eq!(config.predict_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_bad_port() {
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&[("PORT", "http")])),
            Err(ServingError::Config(_))
        ));
    }
}
