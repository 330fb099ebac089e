//! Store access for Scriptsync
//!
//! Every command connects its own single-connection pool and drops it when
//! the operation finishes, so a connection never outlives the command that
//! opened it and concurrent commands never share a handle.

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::config::Config;
use crate::error::Result;

/// The two databases artifact kinds live in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Store {
    /// Application store: macros, search scripts, reference lookups
    App,
    /// Security store: table event scripts, library units, companies
    Sec,
}

impl Store {
    /// Database name for this store from the configuration
    pub fn database<'c>(&self, config: &'c Config) -> &'c str {
        match self {
            Store::App => &config.app.database,
            Store::Sec => &config.sec.database,
        }
    }
}

impl std::fmt::Display for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Store::App => write!(f, "app"),
            Store::Sec => write!(f, "sec"),
        }
    }
}

/// Connection options for a store, derived from the configuration
pub fn connect_options(config: &Config, store: Store) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.server.host)
        .port(config.server.port)
        .username(&config.server.user)
        .password(&config.server.password)
        .database(store.database(config))
}

/// Open the operation-scoped connection to a store.
///
/// The returned pool holds exactly one connection; the caller owns it for
/// the duration of the operation and releases it by dropping the pool.
pub async fn connect(config: &Config, store: Store) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options(config, store))
        .await?;
    Ok(pool)
}
