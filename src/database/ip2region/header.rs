//! ip2region database header structure

use super::utils::read_u32_le;
use crate::error::{RegionError, Result};

/// Size of the header holding the two index offsets
pub const HEADER_LENGTH: usize = 8;

/// Size of one index block: start ip, end ip, packed data pointer
pub const INDEX_BLOCK_LENGTH: i64 = 12;

/// ip2region database header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ip2RegionHeader {
    pub first_index_ptr: u32,
    pub last_index_ptr: u32,
}

impl Ip2RegionHeader {
    /// Parse header from raw data
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LENGTH {
            return Err(RegionError::corrupted(format!(
                "file too small: {} bytes",
                data.len()
            )));
        }

        let first_index_ptr = read_u32_le(data, 0)?;
        let last_index_ptr = read_u32_le(data, 4)?;

        if first_index_ptr > last_index_ptr {
            return Err(RegionError::corrupted(format!(
                "index start {} is past index end {}",
                first_index_ptr, last_index_ptr
            )));
        }
        if (last_index_ptr as u64 + INDEX_BLOCK_LENGTH as u64) > data.len() as u64 {
            return Err(RegionError::corrupted(format!(
                "last index block at {} runs past end of file ({} bytes)",
                last_index_ptr,
                data.len()
            )));
        }

        Ok(Self {
            first_index_ptr,
            last_index_ptr,
        })
    }

    /// Calculate index block count
    pub fn total_blocks(&self) -> i64 {
        (self.last_index_ptr as i64 - self.first_index_ptr as i64) / INDEX_BLOCK_LENGTH + 1
    }
}
