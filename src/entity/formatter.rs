//! Entity formatter - formats entities for output

use crate::database::RegionRecord;
use crate::entity::types::{Entities, EntityType};

#[cfg(feature = "colored-output")]
use colored::Colorize;

/// Format entities as text with inline region information
pub fn format_text(entities: &Entities, use_color: bool) -> String {
    let mut result = String::new();

    for entity in &entities.entities {
        result.push_str(&entity.text);

        if let Some(ref region) = entity.region {
            let info = format_region_compact(region);
            if use_color {
                #[cfg(feature = "colored-output")]
                {
                    result.push_str(&format!(" [{}] ", info.green()));
                }
                #[cfg(not(feature = "colored-output"))]
                {
                    result.push_str(&format!(" [{}] ", info));
                }
            } else {
                result.push_str(&format!(" [{}] ", info));
            }
        }
    }

    result
}

/// Format region information as a compact string
pub fn format_region_compact(region: &RegionRecord) -> String {
    let parts = region.parts();
    let mut deduped: Vec<&str> = Vec::with_capacity(parts.len());

    // "北京|北京市" style repeats collapse to one part
    for part in parts {
        if deduped.last() != Some(&part) {
            deduped.push(part);
        }
    }

    deduped.join(" ")
}

/// Format entities as JSON
pub fn format_json(entities: &Entities) -> Result<String, serde_json::Error> {
    use serde_json::json;

    let items: Vec<_> = entities
        .entities
        .iter()
        .filter(|e| e.entity_type != EntityType::Plain)
        .map(|e| {
            json!({
                "text": e.text,
                "type": format!("{:?}", e.entity_type),
                "position": {
                    "start": e.location.0,
                    "end": e.location.1,
                },
                "region": e.region,
            })
        })
        .collect();

    serde_json::to_string_pretty(&json!({
        "entities": items
    }))
}
