use std::env;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_DATA_PATH: &str = "data/stock_prices.csv";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8050;

/// Server configuration derived from environment variables (and `.env`,
/// once the binary has loaded it).
///
/// | variable          | default                 |
/// |-------------------|-------------------------|
/// | `STOCKPAIR_DATA`  | `data/stock_prices.csv` |
/// | `STOCKPAIR_HOST`  | `127.0.0.1`             |
/// | `STOCKPAIR_PORT`  | `8050`                  |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub data_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    let Ok(value) = env::var(name) else {
        return default;
    };
    match value.trim().parse() {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("{name}={value:?} is not a valid port ({e}); using {default}");
            default
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            data_path: PathBuf::from(env_str("STOCKPAIR_DATA", DEFAULT_DATA_PATH)),
            host: env_str("STOCKPAIR_HOST", DEFAULT_HOST),
            port: env_u16("STOCKPAIR_PORT", DEFAULT_PORT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        assert_eq!(
            env_str("STOCKPAIR_TEST_SURELY_UNSET", "fallback"),
            "fallback"
        );
        assert_eq!(env_u16("STOCKPAIR_TEST_SURELY_UNSET", 9), 9);
    }

    #[test]
    fn invalid_port_falls_back_to_default() {
        env::set_var("STOCKPAIR_TEST_BAD_PORT", "eighty");
        assert_eq!(env_u16("STOCKPAIR_TEST_BAD_PORT", 8050), 8050);

        env::set_var("STOCKPAIR_TEST_GOOD_PORT", " 9000 ");
        assert_eq!(env_u16("STOCKPAIR_TEST_GOOD_PORT", 8050), 9000);
    }

    #[test]
    fn default_points_at_the_bundled_dataset() {
        let config = ServerConfig::default();
        assert_eq!(config.data_path, PathBuf::from("data/stock_prices.csv"));
        assert_eq!((config.host.as_str(), config.port), ("127.0.0.1", 8050));
    }
}
