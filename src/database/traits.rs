//! Trait definitions for the database module
//!
//! This module defines the interface the CLI and the query server look up through.

use crate::error::Result;
use std::net::Ipv4Addr;

use super::types::RegionRecord;

/// Common trait for region databases
pub trait Database {
    fn name(&self) -> &str;

    /// Check if the database image is in memory
    fn is_loaded(&self) -> bool;

    /// Materialise the database image; later calls are no-ops
    fn load(&self) -> Result<()>;

    /// Look up a dotted-quad address string
    fn lookup(&self, address: &str) -> Result<RegionRecord>;

    /// Look up a typed IPv4 address
    fn lookup_ip(&self, ip: Ipv4Addr) -> Result<RegionRecord>;
}
