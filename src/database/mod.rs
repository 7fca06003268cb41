//! Database module for ip2region-rs
//!
//! This module provides the ip2region database and the manager that front
//! ends query through.
//!
//! # Module Organization
//!
//! - `types`: Common type definitions (RegionRecord, LoadMode)
//! - `traits`: Trait definitions (Database trait)
//! - `manager`: Database manager for opening, loading and caching
//! - `ip2region`: The ip2region binary format implementation

// Core modules
pub mod types;
pub mod traits;
pub mod manager;

// Database implementation modules
pub mod ip2region;

// Re-export core types and traits for convenience
pub use types::{LoadMode, RegionRecord};
pub use traits::Database;
pub use manager::DatabaseManager;

// Re-export database implementations
pub use ip2region::{DatabaseImage, Ip2RegionDatabase};
