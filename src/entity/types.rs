//! Entity types and structures

use crate::database::RegionRecord;
use std::net::Ipv4Addr;

/// Entity type classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityType {
    /// IPv4 address
    IPv4,
    /// Plain text (not an entity)
    Plain,
}

/// A span of text extracted from a line
#[derive(Debug, Clone)]
pub struct Entity {
    /// Position in original text (start, end)
    pub location: (usize, usize),

    /// Entity type
    pub entity_type: EntityType,

    /// Original text
    pub text: String,

    /// Region information (for IP entities)
    pub region: Option<RegionRecord>,
}

impl Entity {
    /// Create a new plain text entity
    pub fn plain(start: usize, end: usize, text: String) -> Self {
        Entity {
            location: (start, end),
            entity_type: EntityType::Plain,
            text,
            region: None,
        }
    }

    /// Create a new IPv4 entity
    pub fn ipv4(start: usize, end: usize, text: String) -> Self {
        Entity {
            location: (start, end),
            entity_type: EntityType::IPv4,
            text,
            region: None,
        }
    }

    /// Check if this entity is an IP address
    pub fn is_ip(&self) -> bool {
        matches!(self.entity_type, EntityType::IPv4)
    }

    /// Get parsed IP address if this is an IP entity
    pub fn as_ip(&self) -> Option<Ipv4Addr> {
        if self.is_ip() {
            self.text.parse().ok()
        } else {
            None
        }
    }
}

/// Collection of entities extracted from text
#[derive(Debug, Clone, Default)]
pub struct Entities {
    pub entities: Vec<Entity>,
}

impl Entities {
    /// Create an empty collection
    pub fn new() -> Self {
        Entities {
            entities: Vec::new(),
        }
    }

    /// Add an entity to the collection
    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Sort entities by their position in text
    pub fn sort_by_position(&mut self) {
        self.entities.sort_by_key(|e| e.location.0);
    }

    /// Check if collection is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
