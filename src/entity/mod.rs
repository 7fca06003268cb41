//! Entity parsing and processing module
//!
//! This module extracts IPv4 addresses from text and annotates them with
//! region information.

pub mod parser;
pub mod types;
pub mod formatter;

pub use types::*;
