use std::{env, net::SocketAddr, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/state.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub quotes_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let port = var("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_path = var("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let quotes_path = var("APP_QUOTES_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Self {
            port,
            data_path,
            quotes_path,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config(&[]);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.data_path, PathBuf::from("data/state.json"));
        assert!(cfg.quotes_path.is_none());
    }

    #[test]
    fn reads_overrides_and_ignores_bad_port() {
        let cfg = config(&[
            ("PORT", "not-a-port"),
            ("APP_DATA_PATH", "/tmp/zen.json"),
            ("APP_QUOTES_PATH", "/tmp/quotes.json"),
        ]);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.data_path, PathBuf::from("/tmp/zen.json"));
        assert_eq!(cfg.quotes_path, Some(PathBuf::from("/tmp/quotes.json")));
        assert_eq!(config(&[("PORT", "9000")]).addr().port(), 9000);
    }
}
