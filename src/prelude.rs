//! Core types and error handling
//!
//! This module re-exports commonly used types and traits for the ip2region-rs crate.

pub use crate::config::AppConfig;
pub use crate::database::{Database, DatabaseManager, Ip2RegionDatabase, LoadMode, RegionRecord};
pub use crate::error::{RegionError, Result};
pub use std::net::Ipv4Addr;
