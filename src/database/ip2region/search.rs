//! Binary search over the fixed-size index blocks

use super::header::{INDEX_BLOCK_LENGTH, Ip2RegionHeader};
use super::utils::read_u32_le;
use crate::error::{RegionError, Result};

/// One 12-byte index block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBlock {
    pub start_ip: u32,
    pub end_ip: u32,
    pub data_ptr: u32,
}

impl IndexBlock {
    /// Parse the block at `offset`, or `None` when it does not fit in `data`
    pub fn parse(data: &[u8], offset: usize) -> Option<Self> {
        Some(Self {
            start_ip: read_u32_le(data, offset).ok()?,
            end_ip: read_u32_le(data, offset + 4).ok()?,
            data_ptr: read_u32_le(data, offset + 8).ok()?,
        })
    }
}

/// Location of a data record, unpacked from an index block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataPointer {
    pub offset: u32,
    pub length: u8,
}

impl DataPointer {
    /// Split a packed pointer: high byte is the length, low 24 bits the offset
    pub fn unpack(packed: u32) -> Self {
        Self {
            offset: packed & 0x00FF_FFFF,
            length: ((packed >> 24) & 0xFF) as u8,
        }
    }
}

/// Find the data pointer of the block covering `ip`
///
/// `high` starts at the block count rather than the last index, so an
/// address above every block probes one block past the index. That probe
/// lands outside the file and ends the search as a miss.
pub fn search_index(data: &[u8], header: &Ip2RegionHeader, ip: i64) -> Result<DataPointer> {
    let first = header.first_index_ptr as i64;
    let mut low: i64 = 0;
    let mut high: i64 = header.total_blocks();
    let mut data_ptr: u32 = 0;

    while low <= high {
        let mid = (low + high) >> 1;
        let p = first + mid * INDEX_BLOCK_LENGTH;

        let Some(block) = IndexBlock::parse(data, p as usize) else {
            log::debug!("Index probe at {} is outside the database", p);
            break;
        };

        if ip < block.start_ip as i64 {
            high = mid - 1;
        } else if ip > block.end_ip as i64 {
            low = mid + 1;
        } else {
            data_ptr = block.data_ptr;
            break;
        }
    }

    // A zero pointer never addresses a record, matched or not.
    if data_ptr == 0 {
        return Err(RegionError::NotFound(format!("no index block covers {}", ip)));
    }

    Ok(DataPointer::unpack(data_ptr))
}
