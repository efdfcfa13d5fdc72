//! Centralized server configuration.
//!
//! Loaded once at start-up via the `config` crate from environment
//! variables, using `__` to separate nested keys (`DATABASE__ELEVATED_URL`
//! becomes `database.elevated_url`). The loaded value is handed to whatever
//! needs it; nothing reads the environment after start-up.

use league_portal_authz::StaffWritePolicy;
use serde::Deserialize;

/// Server configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Data store connections.
    pub database: DatabaseConfig,

    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,

    /// League display constants and policy switches.
    #[serde(default)]
    pub league: LeagueConfig,

    /// Legacy admin gate.
    #[serde(default)]
    pub admin: AdminConfig,
}

/// Data store connection settings.
///
/// Both URLs are required. The restricted connection is subject to the
/// row-level policies; the elevated one bypasses them and is only handed to
/// writes the authorization policy has allowed.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `DATABASE__RESTRICTED_URL`.
    ///
    /// Row-level policies grant no table privileges. When this URL logs in
    /// as a role other than the table owner, that role needs
    /// `GRANT SELECT ON players, seasons, staff TO <role>` or every public
    /// read fails with "permission denied".
    pub restricted_url: String,
    /// `DATABASE__ELEVATED_URL`. Owns the tables and runs the migrations.
    pub elevated_url: String,
    /// Pool size, per connection.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Session-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Lifetime of sessions recorded at sign-in, in hours.
    #[serde(default = "default_session_duration_hours")]
    pub duration_hours: i64,

    /// Interval between session cleanup runs, in seconds.
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: u64,
}

/// League-wide display constants.
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    /// League name shown by `GET /league`.
    #[serde(default = "default_league_name")]
    pub name: String,

    /// Who may create and delete staff assignments.
    #[serde(default)]
    pub staff_writes: StaffWritePolicy,
}

/// Legacy shared-password admin gate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    /// When unset every legacy login attempt is rejected.
    #[serde(default)]
    pub password: Option<String>,
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_session_duration_hours() -> i64 {
    24 * 7
}

fn default_cleanup_interval_seconds() -> u64 {
    300
}

fn default_league_name() -> String {
    "League".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_hours: default_session_duration_hours(),
            cleanup_interval_seconds: default_cleanup_interval_seconds(),
        }
    }
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            name: default_league_name(),
            staff_writes: StaffWritePolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(
            config::Environment::default()
                .separator("__")
                .try_parsing(true),
        )
    }

    /// Loads configuration from a single source and checks it.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn load<S>(source: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config: Self = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), config::ConfigError> {
        if self.database.restricted_url.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "database.restricted_url must not be empty".to_string(),
            ));
        }
        if self.database.elevated_url.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "database.elevated_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
