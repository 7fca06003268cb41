//! ip2region data record decoding

use super::search::DataPointer;
use super::utils::read_u32_le;
use crate::database::RegionRecord;
use crate::error::{RegionError, Result};

/// Number of `|`-separated fields in a record payload
pub const FIELD_COUNT: usize = 5;

/// Length of the city id prefix counted in every record length
const CITY_ID_LENGTH: usize = 4;

/// Decode the record a data pointer refers to
///
/// The record starts with a little-endian city id. The remaining
/// `length - 4` bytes are the `country|region|province|city|isp` text.
pub fn decode_record(data: &[u8], ptr: DataPointer) -> Result<RegionRecord> {
    let offset = ptr.offset as usize;
    let length = ptr.length as usize;

    if length < CITY_ID_LENGTH {
        return Err(RegionError::corrupted(format!(
            "record at {} is {} bytes, shorter than its city id",
            offset, length
        )));
    }
    if offset + length > data.len() {
        return Err(RegionError::IndexOutOfBounds(offset + length, data.len()));
    }

    let city_id = read_u32_le(data, offset)?;
    let text = String::from_utf8_lossy(&data[offset + CITY_ID_LENGTH..offset + length]);

    Ok(parse_fields(city_id, &text))
}

/// Split a record payload into its region fields, padding missing ones with ""
pub fn parse_fields(city_id: u32, text: &str) -> RegionRecord {
    let mut fields: Vec<&str> = text.split('|').collect();
    if fields.len() < FIELD_COUNT {
        fields.resize(FIELD_COUNT, "");
    }

    RegionRecord {
        city_id,
        country: fields[0].to_string(),
        region: fields[1].to_string(),
        province: fields[2].to_string(),
        city: fields[3].to_string(),
        isp: fields[4].to_string(),
    }
}
