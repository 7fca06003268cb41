//! Database manager - opens the configured database and caches lookups

use crate::config::AppConfig;
use crate::database::{Database, Ip2RegionDatabase, RegionRecord};
use crate::error::{RegionError, Result};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Arc, RwLock};

/// Database manager handles opening, loading and result caching
///
/// The manager is the single entry point the CLI and the query server use.
/// With `eager_load` the image is read before the manager is returned, so
/// no request ever pays for (or races on) the first load.
///
/// # Thread Safety
///
/// DatabaseManager is thread-safe and can be shared across threads using Arc.
pub struct DatabaseManager {
    database: Arc<dyn Database + Send + Sync>,
    /// Query result cache (address -> record)
    query_cache: RwLock<HashMap<String, RegionRecord>>,
    cache_capacity: usize,
}

impl DatabaseManager {
    /// Open the database named by the configuration
    pub fn open(config: &AppConfig) -> Result<Self> {
        let db_path = config.get_database_path()?;

        if !db_path.exists() {
            return Err(RegionError::DatabaseNotFound(format!(
                "{:?}\nHint: set database.path in the config file or IP2REGION_DB",
                db_path
            )));
        }

        let db = Ip2RegionDatabase::open_with_mode(&db_path, config.database.load_mode)?;

        if config.database.eager_load {
            db.load()?;
        }

        Ok(Self::with_database(
            Arc::new(db),
            config.database.cache_capacity,
        ))
    }

    /// Wrap an already opened database
    pub fn with_database(database: Arc<dyn Database + Send + Sync>, cache_capacity: usize) -> Self {
        Self {
            database,
            query_cache: RwLock::new(HashMap::new()),
            cache_capacity,
        }
    }

    /// Resolve an address string
    ///
    /// # Returns
    ///
    /// * `Ok(RegionRecord)` - The covering range's record
    /// * `Err(RegionError::InvalidAddress)` - Not four dotted components
    /// * `Err(RegionError::NotFound)` - No range covers the address
    /// * `Err(_)` - The database could not be loaded
    ///
    /// # Caching
    ///
    /// Successful results are cached until the cache reaches its capacity.
    pub fn query(&self, address: &str) -> Result<RegionRecord> {
        {
            let cache = self.query_cache.read().map_err(|e| {
                RegionError::Other(format!("Failed to acquire cache read lock: {}", e))
            })?;
            if let Some(record) = cache.get(address) {
                return Ok(record.clone());
            }
        }

        let record = self.database.lookup(address)?;

        if self.cache_capacity > 0 {
            let mut cache = self.query_cache.write().map_err(|e| {
                RegionError::Other(format!("Failed to acquire cache write lock: {}", e))
            })?;
            if cache.len() < self.cache_capacity {
                cache.insert(address.to_string(), record.clone());
            }
        }

        Ok(record)
    }

    /// Resolve a typed IPv4 address
    pub fn query_ip(&self, ip: Ipv4Addr) -> Result<RegionRecord> {
        self.query(&ip.to_string())
    }

    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    pub fn is_loaded(&self) -> bool {
        self.database.is_loaded()
    }

    /// Number of cached results
    pub fn cache_stats(&self) -> usize {
        self.query_cache.read().map(|cache| cache.len()).unwrap_or(0)
    }
}
