//! ip2region-rs: offline IPv4 region lookup
//!
//! Resolves IPv4 addresses to `country|region|province|city|isp` records
//! using a prebuilt ip2region database file, from a library call, the
//! command line, or a small HTTP query server.
//!
//! ```no_run
//! use ip2region_rs::database::{Database, Ip2RegionDatabase};
//!
//! let db = Ip2RegionDatabase::open("ip2region.db")?;
//! let record = db.lookup("202.102.9.110")?;
//! println!("{} {} {}", record.country, record.province, record.isp);
//! # Ok::<(), ip2region_rs::RegionError>(())
//! ```

pub mod cli;
pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod prelude;
pub mod regex;
pub mod server;

// Re-export common types
pub use error::{RegionError, Result};

pub use database::{
    Database, DatabaseImage, DatabaseManager, Ip2RegionDatabase, LoadMode, RegionRecord,
};
