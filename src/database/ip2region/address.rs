//! Dotted-quad address parsing
//!
//! Parsing is deliberately lenient: only the component count is validated.
//! A component that is not a decimal integer counts as `0`, and components
//! outside `0..=255` are shifted into the sum as-is. Such addresses simply
//! fall outside every index block and resolve to "not found".

use crate::error::{RegionError, Result};
use std::net::Ipv4Addr;
use std::num::IntErrorKind;

/// Convert a dotted-quad string into the integer searched in the index
pub fn parse_address(address: &str) -> Result<i64> {
    let parts: Vec<&str> = address.split('.').collect();
    if parts.len() != 4 {
        return Err(RegionError::InvalidAddress(address.to_string()));
    }

    let mut sum: i64 = 0;
    for (i, part) in parts.iter().enumerate() {
        let bit = parse_component(part);
        sum = sum.wrapping_add(bit.wrapping_shl(24 - 8 * i as u32));
    }

    Ok(sum)
}

/// Integer value of a typed IPv4 address, same scale as `parse_address`
pub fn ipv4_to_long(ip: Ipv4Addr) -> i64 {
    u32::from(ip) as i64
}

// Saturates on overflow, zero on anything else unparsable.
fn parse_component(part: &str) -> i64 {
    match part.parse::<i64>() {
        Ok(v) => v,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 0,
        },
    }
}
