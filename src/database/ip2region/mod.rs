//! ip2region database implementation
//!
//! This module implements lookups against the ip2region binary format:
//! an 8-byte header holding the first and last index block offsets, the
//! data records, and a sorted run of 12-byte index blocks.
//!
//! # Module Organization
//!
//! - `database`: The `Ip2RegionDatabase` handle with lazy one-time loading
//! - `image`: The immutable in-memory database image
//! - `header`: Header parsing and index geometry
//! - `address`: Lenient dotted-quad parsing
//! - `search`: Index block binary search and packed pointers
//! - `record`: Data record decoding
//! - `utils`: Bounds-checked byte readers

mod address;
mod database;
mod header;
mod image;
mod record;
mod search;
mod utils;

#[cfg(test)]
pub(crate) mod testdb;

pub use address::{ipv4_to_long, parse_address};
pub use database::Ip2RegionDatabase;
pub use header::{HEADER_LENGTH, INDEX_BLOCK_LENGTH, Ip2RegionHeader};
pub use image::DatabaseImage;
pub use record::{FIELD_COUNT, decode_record, parse_fields};
pub use search::{DataPointer, IndexBlock, search_index};
