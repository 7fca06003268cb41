//! Type definitions for the database module
//!
//! This module contains common types shared by the database implementation
//! and its front ends.

use serde::{Deserialize, Serialize};

/// Region information resolved for an IPv4 address
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegionRecord {
    #[serde(rename = "cityid")]
    pub city_id: u32,
    pub country: String,
    pub region: String,
    pub province: String,
    pub city: String,
    pub isp: String,
}

impl RegionRecord {
    /// Non-empty location fields in output order, skipping the `0` placeholder
    pub fn parts(&self) -> Vec<&str> {
        [
            self.country.as_str(),
            self.region.as_str(),
            self.province.as_str(),
            self.city.as_str(),
            self.isp.as_str(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty() && *s != "0")
        .collect()
    }
}

/// How the database image is materialised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// Read the whole file onto the heap
    #[default]
    Memory,
    /// Map the file read-only
    Mmap,
}
