//! MySQL pool configuration.

use std::time::Duration;

// =============================================================================
// MySqlPoolConfig
// =============================================================================

/// Settings for the MySQL connection pool.
///
/// # Examples
///
/// ```
/// use robomart_infrastructure::adapters::mysql::MySqlPoolConfig;
/// use std::time::Duration;
///
/// let config = MySqlPoolConfig::with_url("mysql://localhost:3306/robomart")
///     .with_max_connections(20)
///     .with_connect_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MySqlPoolConfig {
    /// Connection URL: `mysql://[user[:password]@]host[:port]/database`.
    pub url: String,

    /// Maximum number of pooled connections.
    pub max_connections: u32,

    /// Minimum number of pooled connections kept open.
    pub min_connections: u32,

    /// Maximum time to wait for a connection to be established.
    pub connect_timeout: Duration,

    /// Idle time after which a connection is closed; `None` disables
    /// idle reaping.
    pub idle_timeout: Option<Duration>,
}

impl Default for MySqlPoolConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
        }
    }
}

impl MySqlPoolConfig {
    /// Creates a configuration with the given URL and default settings.
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    #[must_use]
    pub const fn with_min_connections(mut self, min_connections: u32) -> Self {
        self.min_connections = min_connections;
        self
    }

    #[must_use]
    pub const fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    #[must_use]
    pub const fn with_idle_timeout(mut self, idle_timeout: Option<Duration>) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
