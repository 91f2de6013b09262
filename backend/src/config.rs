use std::path::PathBuf;

use log::warn;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MODEL_PATH: &str = "model/coefficients.json";

/// Paramètres du serveur lus dans l'environnement.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub allowed_origins: Vec<String>,
    pub model_path: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("Invalid PORT {raw:?}, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let workers = lookup("WORKERS")
            .and_then(|w| w.trim().parse().ok())
            .filter(|w: &usize| *w > 0)
            .unwrap_or_else(num_cpus::get);

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        let model_path = lookup("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));

        ServerConfig {
            host,
            port,
            workers,
            allowed_origins,
            model_path,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Liste d'origines séparées par des virgules ; les entrées vides sont ignorées.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| origin.trim_end_matches('/').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert!(config.workers >= 1);
        assert!(config.allowed_origins.is_empty());
        assert_eq!(config.model_path, PathBuf::from("model/coefficients.json"));
        assert_eq!(config.bind_address(), "127.0.0.1:8000");
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9090"),
            ("WORKERS", "3"),
            ("MODEL_PATH", "/srv/model.json"),
        ]);
        assert_eq!(config.bind_address(), "0.0.0.0:9090");
        assert_eq!(config.workers, 3);
        assert_eq!(config.model_path, PathBuf::from("/srv/model.json"));
    }

    #[test]
    fn bad_port_falls_back() {
        let config = config_from(&[("PORT", "http")]);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        assert_eq!(
            parse_origins("http://localhost:5173/, ,https://rent.example.com"),
            vec!["http://localhost:5173", "https://rent.example.com"]
        );
        assert!(parse_origins("").is_empty());
    }
}
