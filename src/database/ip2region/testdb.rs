//! Synthetic ip2region files for tests
//!
//! Layout: header, data records, then the index blocks.

use std::net::Ipv4Addr;

pub struct TestDbBuilder {
    ranges: Vec<(u32, u32, u32, String)>,
}

impl TestDbBuilder {
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Add a range; ranges must be added in ascending order
    pub fn range(mut self, start: &str, end: &str, city_id: u32, text: &str) -> Self {
        let start: Ipv4Addr = start.parse().unwrap();
        let end: Ipv4Addr = end.parse().unwrap();
        self.ranges
            .push((u32::from(start), u32::from(end), city_id, text.to_string()));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut data = vec![0u8; 8];
        let mut pointers = Vec::with_capacity(self.ranges.len());

        for (_, _, city_id, text) in &self.ranges {
            let offset = data.len() as u32;
            let length = 4 + text.len() as u32;
            assert!(length <= 0xFF, "record too long for a packed pointer");
            data.extend_from_slice(&city_id.to_le_bytes());
            data.extend_from_slice(text.as_bytes());
            pointers.push((length << 24) | offset);
        }

        let first = data.len() as u32;
        for ((start, end, _, _), ptr) in self.ranges.iter().zip(pointers) {
            data.extend_from_slice(&start.to_le_bytes());
            data.extend_from_slice(&end.to_le_bytes());
            data.extend_from_slice(&ptr.to_le_bytes());
        }
        let last = data.len() as u32 - 12;

        data[0..4].copy_from_slice(&first.to_le_bytes());
        data[4..8].copy_from_slice(&last.to_le_bytes());
        data
    }

    /// Write the database to a temporary file
    pub fn write_temp(&self) -> tempfile::NamedTempFile {
        use std::io::Write;

        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(&self.build()).unwrap();
        tmp.flush().unwrap();
        tmp
    }
}
