//! The static configuration surface for access tables.
//!
//! The permission catalog and route tables are declarative data. The
//! compiled-in defaults serve development; a production deployment
//! overrides them from `config/access.*` files or environment variables
//! without recompiling.

use serde::Deserialize;

use crate::access::catalog::RolePermissionTable;
use crate::access::routes::RouteTable;

/// The full set of access-control tables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccessTables {
    /// Role -> module -> permission level.
    pub catalog: RolePermissionTable,
    /// Route rules: module prefixes, explicit allow-lists, employee policy.
    pub routes: RouteTable,
}

impl AccessTables {
    /// Loads access tables from configuration files and environment.
    ///
    /// Sources, later ones overriding earlier: `config/access.default`,
    /// `config/access.{RUN_MODE}` (both optional; absence yields the
    /// compiled-in tables), then `KESTREL_ACCESS__`-prefixed environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source is malformed, or if the loaded
    /// catalog carries explicit admin rows.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/access.default").required(false))
            .add_source(config::File::with_name(&format!("config/access.{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KESTREL_ACCESS").separator("__"))
            .build()?;

        let tables: Self = config.try_deserialize()?;
        tables
            .catalog
            .validate()
            .map_err(config::ConfigError::Message)?;
        Ok(tables)
    }
}
