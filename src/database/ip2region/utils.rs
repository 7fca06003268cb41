//! Utility functions for ip2region database

use crate::error::{RegionError, Result};

/// Read a little-endian u32 at `offset`, failing instead of panicking past the end
pub fn read_u32_le(data: &[u8], offset: usize) -> Result<u32> {
    let end = offset
        .checked_add(4)
        .ok_or(RegionError::IndexOutOfBounds(offset, data.len()))?;
    if end > data.len() {
        return Err(RegionError::IndexOutOfBounds(offset, data.len()));
    }
    Ok(u32::from_le_bytes(data[offset..end].try_into()?))
}
