//! Entity parser - extracts IPv4 addresses from text

use crate::entity::types::{Entities, Entity};
use crate::regex::find_ipv4;

/// Parse a line of text and extract all IPv4 addresses
///
/// Regex matches never overlap, so the result is already sorted by position.
///
/// # Example
///
/// ```
/// use ip2region_rs::entity::parser::parse_line;
///
/// let entities = parse_line("Server IP: 192.168.1.1");
/// assert_eq!(entities.entities.len(), 1);
/// ```
pub fn parse_line(text: &str) -> Entities {
    let mut entities = Entities::new();

    for (start, end, ipv4_text) in find_ipv4(text) {
        entities.push(Entity::ipv4(start, end, ipv4_text));
    }

    entities
}

/// Build a complete entity list with plain text segments
///
/// This fills in the gaps between extracted entities with plain text segments,
/// so that the original text can be reconstructed with region annotations.
pub fn build_complete_entities(text: &str, mut entities: Entities) -> Entities {
    if entities.is_empty() {
        let mut result = Entities::new();
        result.push(Entity::plain(0, text.len(), text.to_string()));
        return result;
    }

    entities.sort_by_position();

    let mut complete = Entities::new();
    let mut last_pos = 0;

    for entity in entities.entities {
        let (start, end) = entity.location;

        if start > last_pos {
            complete.push(Entity::plain(last_pos, start, text[last_pos..start].to_string()));
        }

        complete.push(entity);
        last_pos = end;
    }

    if last_pos < text.len() {
        complete.push(Entity::plain(
            last_pos,
            text.len(),
            text[last_pos..].to_string(),
        ));
    }

    complete
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::types::EntityType;

    #[test]
    fn test_parse_line_ipv4() {
        let entities = parse_line("Server IP: 192.168.1.1");

        assert_eq!(entities.entities.len(), 1);
        assert_eq!(entities.entities[0].entity_type, EntityType::IPv4);
        assert_eq!(entities.entities[0].text, "192.168.1.1");
    }

    #[test]
    fn test_parse_line_multiple() {
        let entities = parse_line("from 1.1.1.1 to 8.8.8.8 via 10.0.0.1");
        assert_eq!(entities.entities.len(), 3);
        assert!(entities.entities.iter().all(|e| e.is_ip()));
    }

    #[test]
    fn test_build_complete_entities() {
        let text = "Server: 1.2.3.4 ok";
        let complete = build_complete_entities(text, parse_line(text));

        // plain + ip + plain
        assert_eq!(complete.entities.len(), 3);
        assert_eq!(complete.entities[0].text, "Server: ");
        assert_eq!(complete.entities[1].text, "1.2.3.4");
        assert_eq!(complete.entities[2].text, " ok");
    }

    #[test]
    fn test_no_entities() {
        let text = "No addresses here";
        let complete = build_complete_entities(text, parse_line(text));

        assert_eq!(complete.entities.len(), 1);
        assert_eq!(complete.entities[0].entity_type, EntityType::Plain);
        assert_eq!(complete.entities[0].text, text);
    }
}
