//! In-memory database image
//!
//! The image is the complete file contents plus the parsed header. It is
//! built once and only ever read afterwards, so one `Arc<DatabaseImage>` can
//! serve any number of concurrent lookups.

use crate::database::{LoadMode, RegionRecord};
use crate::error::Result;
use memmap2::Mmap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::net::Ipv4Addr;

use super::address::{ipv4_to_long, parse_address};
use super::header::Ip2RegionHeader;
use super::record::decode_record;
use super::search::search_index;

enum Backing {
    Memory(Vec<u8>),
    Mapped(Mmap),
}

/// Immutable copy of an ip2region database file
pub struct DatabaseImage {
    backing: Backing,
    header: Ip2RegionHeader,
}

impl DatabaseImage {
    /// Build an image from bytes already in memory
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let header = Ip2RegionHeader::parse(&data)?;
        Ok(Self {
            backing: Backing::Memory(data),
            header,
        })
    }

    /// Materialise the whole file behind `file`
    pub fn read_from(file: &File, mode: LoadMode) -> Result<Self> {
        match mode {
            LoadMode::Memory => {
                let mut reader = file;
                reader.seek(SeekFrom::Start(0))?;
                let mut data = Vec::with_capacity(file.metadata()?.len() as usize);
                reader.read_to_end(&mut data)?;
                Self::from_bytes(data)
            }
            LoadMode::Mmap => {
                // The file is treated as immutable for the life of the process.
                let mmap = unsafe { Mmap::map(file) }?;
                let header = Ip2RegionHeader::parse(&mmap)?;
                Ok(Self {
                    backing: Backing::Mapped(mmap),
                    header,
                })
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match &self.backing {
            Backing::Memory(data) => data,
            Backing::Mapped(mmap) => mmap,
        }
    }

    pub fn total_blocks(&self) -> i64 {
        self.header.total_blocks()
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn load_mode(&self) -> LoadMode {
        match self.backing {
            Backing::Memory(_) => LoadMode::Memory,
            Backing::Mapped(_) => LoadMode::Mmap,
        }
    }

    /// Resolve a dotted-quad address string
    pub fn resolve(&self, address: &str) -> Result<RegionRecord> {
        let ip = parse_address(address)?;
        self.resolve_long(ip)
    }

    /// Resolve a typed IPv4 address
    pub fn resolve_ip(&self, ip: Ipv4Addr) -> Result<RegionRecord> {
        self.resolve_long(ipv4_to_long(ip))
    }

    fn resolve_long(&self, ip: i64) -> Result<RegionRecord> {
        let data = self.as_bytes();
        let ptr = search_index(data, &self.header, ip)?;
        decode_record(data, ptr)
    }
}

impl std::fmt::Debug for DatabaseImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseImage")
            .field("mode", &self.load_mode())
            .field("len", &self.len())
            .field("header", &self.header)
            .finish()
    }
}
