//! Server configuration for Quill.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `QUILL_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Directory holding the document files.
    pub data_dir: PathBuf,
    /// Path to the flat credential file.
    pub users_file: PathBuf,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `QUILL_ENV`: `test` selects `./test/data` and `./test/users.yml`;
    ///   anything else selects `./data` and `./users.yml`
    /// - `QUILL_DATA_DIR`: explicit document directory (overrides `QUILL_ENV`)
    /// - `QUILL_USERS_FILE`: explicit credential file (overrides `QUILL_ENV`)
    /// - `PORT`: port to bind on (binds to `0.0.0.0`)
    /// - `QUILL_BIND_ADDR`: full bind address (overrides `PORT`, default: `127.0.0.1:8300`)
    /// - `QUILL_LOG_LEVEL`: log filter (default: `info`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::resolve(|name| std::env::var(name).ok())
    }

    /// Resolve configuration through a variable lookup.
    ///
    /// Kept separate from [`Self::from_env`] so tests can supply
    /// variables without mutating the process environment.
    fn resolve(var: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr = if let Some(addr) = var("QUILL_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8300)))
        } else if let Some(port_str) = var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(8300);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], 8300))
        };

        let test_env = var("QUILL_ENV").is_some_and(|v| v == "test");

        let data_dir = var("QUILL_DATA_DIR").map_or_else(
            || {
                if test_env {
                    PathBuf::from("./test/data")
                } else {
                    PathBuf::from("./data")
                }
            },
            PathBuf::from,
        );

        let users_file = var("QUILL_USERS_FILE").map_or_else(
            || {
                if test_env {
                    PathBuf::from("./test/users.yml")
                } else {
                    PathBuf::from("./users.yml")
                }
            },
            PathBuf::from,
        );

        let log_level = var("QUILL_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        Self {
            bind_addr,
            data_dir,
            users_file,
            log_level,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        ServerConfig::resolve(|name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned())
        })
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 8300)));
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.users_file, PathBuf::from("./users.yml"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_env_flips_storage_locations() {
        let config = config_from(&[("QUILL_ENV", "test")]);
        assert_eq!(config.data_dir, PathBuf::from("./test/data"));
        assert_eq!(config.users_file, PathBuf::from("./test/users.yml"));
    }

    #[test]
    fn non_test_env_value_keeps_production_locations() {
        let config = config_from(&[("QUILL_ENV", "production")]);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.users_file, PathBuf::from("./users.yml"));
    }

    #[test]
    fn explicit_paths_override_test_env() {
        let config = config_from(&[
            ("QUILL_ENV", "test"),
            ("QUILL_DATA_DIR", "/srv/quill/docs"),
            ("QUILL_USERS_FILE", "/srv/quill/users.yml"),
        ]);
        assert_eq!(config.data_dir, PathBuf::from("/srv/quill/docs"));
        assert_eq!(config.users_file, PathBuf::from("/srv/quill/users.yml"));
    }

    #[test]
    fn port_binds_all_interfaces() {
        let config = config_from(&[("PORT", "9000")]);
        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 9000)));
    }

    #[test]
    fn bind_addr_wins_over_port() {
        let config = config_from(&[
            ("QUILL_BIND_ADDR", "192.168.1.5:8080"),
            ("PORT", "9000"),
        ]);
        assert_eq!(config.bind_addr, "192.168.1.5:8080".parse().unwrap());
    }

    #[test]
    fn unparseable_values_fall_back_to_defaults() {
        let config = config_from(&[("QUILL_BIND_ADDR", "not-an-addr")]);
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 8300)));

        let config = config_from(&[("PORT", "not-a-port")]);
        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8300)));
    }

    #[test]
    fn log_level_is_configurable() {
        let config = config_from(&[("QUILL_LOG_LEVEL", "debug")]);
        assert_eq!(config.log_level, "debug");
    }
}
