//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `RETREATS_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence.

use std::net::{AddrParseError, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
/// Unprefixed variable honoured when `RETREATS_DATABASE_URL` is unset.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Configuration values controlling how the server starts.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RETREATS")]
pub struct AppSettings {
    /// PostgreSQL connection string. Without one the server keeps its data
    /// in memory.
    pub database_url: Option<String>,
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations before serving. Defaults to `true`.
    pub run_migrations: Option<bool>,
}

impl AppSettings {
    /// Return the configured database URL, falling back to `DATABASE_URL`.
    pub fn database_url(&self) -> Option<String> {
        let non_blank = |url: &String| !url.trim().is_empty();
        self.database_url
            .clone()
            .filter(non_blank)
            .or_else(|| std::env::var(DATABASE_URL_ENV).ok().filter(non_blank))
    }

    /// Parse the bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`AddrParseError`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Return the configured pool size, falling back to the default.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Report whether migrations run at start-up, defaulting to `true`.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for application settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("retreat-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("RETREATS_DATABASE_URL", None::<String>),
            ("RETREATS_BIND_ADDR", None::<String>),
            ("RETREATS_POOL_MAX_SIZE", None::<String>),
            ("RETREATS_RUN_MIGRATIONS", None::<String>),
            (DATABASE_URL_ENV, None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.run_migrations());
        assert!(settings.database_url().is_none());
        assert_eq!(
            settings.bind_addr().expect("default address parses"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "RETREATS_DATABASE_URL",
                Some("postgres://app@db/retreats".to_owned()),
            ),
            ("RETREATS_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("RETREATS_POOL_MAX_SIZE", Some("4".to_owned())),
            ("RETREATS_RUN_MIGRATIONS", Some("false".to_owned())),
            (DATABASE_URL_ENV, Some("postgres://ignored".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.run_migrations());
        assert_eq!(
            settings.database_url().as_deref(),
            Some("postgres://app@db/retreats")
        );
        assert_eq!(
            settings.bind_addr().expect("override parses"),
            SocketAddr::from(([127, 0, 0, 1], 9000))
        );
        assert_eq!(settings.pool_max_size(), 4);
    }

    #[rstest]
    fn plain_database_url_is_used_as_fallback() {
        let _guard = lock_env([
            ("RETREATS_DATABASE_URL", None::<String>),
            (DATABASE_URL_ENV, Some("postgres://fallback/retreats".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.database_url().as_deref(),
            Some("postgres://fallback/retreats")
        );
    }

    #[rstest]
    #[case::no_fallback(None, None)]
    #[case::fallback_used(
        Some("postgres://fallback/retreats"),
        Some("postgres://fallback/retreats")
    )]
    #[case::fallback_blank(Some("  "), None)]
    fn blank_database_url_is_skipped(
        #[case] fallback: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let _guard = lock_env([
            ("RETREATS_DATABASE_URL", Some("  ".to_owned())),
            (DATABASE_URL_ENV, fallback.map(str::to_owned)),
        ]);

        assert_eq!(load_from_empty_args().database_url().as_deref(), expected);
    }

    #[rstest]
    fn malformed_bind_address_is_rejected() {
        let _guard = lock_env([("RETREATS_BIND_ADDR", Some("not-an-address".to_owned()))]);

        assert!(load_from_empty_args().bind_addr().is_err());
    }
}
