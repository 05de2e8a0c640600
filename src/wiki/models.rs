// src/wiki/models.rs
use indexmap::IndexMap;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// Field name -> value, in the order the page lists them.
pub type FieldMap = IndexMap<String, String>;

/// Section heading -> move headings, as listed on a character page.
pub type PageOutline = IndexMap<String, Vec<String>>;

/// One piece of a move's prose, in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RichTextSegment {
    Text(String),
    /// Coloured notation span or a link to another move.
    Move(String),
    Tooltip { display: String, explanation: String },
}

// Serialized as `["text", s]`, `["move", s]`, `["tooltip", display, explanation]`
impl Serialize for RichTextSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RichTextSegment::Text(text) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element("text")?;
                seq.serialize_element(text)?;
                seq.end()
            }
            RichTextSegment::Move(text) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element("move")?;
                seq.serialize_element(text)?;
                seq.end()
            }
            RichTextSegment::Tooltip { display, explanation } => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element("tooltip")?;
                seq.serialize_element(display)?;
                seq.serialize_element(explanation)?;
                seq.end()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    Paragraph,
    ListItem,
}

impl UsageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UsageKind::Paragraph => "paragraph",
            UsageKind::ListItem => "list",
        }
    }
}

/// A usage paragraph or bullet, serialized as `["paragraph", [...]]` / `["list", [...]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEntry {
    pub kind: UsageKind,
    pub segments: Vec<RichTextSegment>,
}

impl Serialize for UsageEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(self.kind.as_str())?;
        seq.serialize_element(&self.segments)?;
        seq.end()
    }
}

/// Standard and hitbox image URLs of one move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveImages {
    pub standard: Option<String>,
    pub hitbox: Option<String>,
}

/// Everything scraped for one move.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MoveRecord {
    pub frame_data: FieldMap,
    pub frame_chart: FieldMap,
    pub additional_data: FieldMap,
    pub overview: Vec<Vec<RichTextSegment>>,
    pub usage: Vec<UsageEntry>,
    pub image_url: Option<String>,
    pub hitbox_url: Option<String>,
}

impl MoveRecord {
    /// True when none of the primary fields (frame data, overview, usage) carry anything.
    pub fn has_no_primary_data(&self) -> bool {
        self.frame_data.is_empty() && self.overview.is_empty() && self.usage.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_map_keeps_order_and_replaces_in_place() {
        let mut map = FieldMap::new();
        map.insert("Damage".to_string(), "120".to_string());
        map.insert("Guard".to_string(), "All".to_string());
        map.insert("Damage".to_string(), "150".to_string());

        assert_eq!(map.keys().map(String::as_str).collect::<Vec<_>>(), vec!["Damage", "Guard"]);
        assert_eq!(map.get("Damage").map(String::as_str), Some("150"));
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"Damage":"150","Guard":"All"}"#
        );
    }

    #[test]
    fn test_record_wire_shape() {
        let record = MoveRecord {
            overview: vec![vec![
                RichTextSegment::Text("Hits".to_string()),
                RichTextSegment::Move("5L".to_string()),
                RichTextSegment::Tooltip {
                    display: "RC".to_string(),
                    explanation: "Rapid Cancel".to_string(),
                },
            ]],
            usage: vec![UsageEntry {
                kind: UsageKind::ListItem,
                segments: vec![RichTextSegment::Text("Good poke".to_string())],
            }],
            image_url: Some("https://www.dustloop.com/images/a.png".to_string()),
            ..MoveRecord::default()
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "frame_data": {},
                "frame_chart": {},
                "additional_data": {},
                "overview": [[["text", "Hits"], ["move", "5L"], ["tooltip", "RC", "Rapid Cancel"]]],
                "usage": [["list", [["text", "Good poke"]]]],
                "image_url": "https://www.dustloop.com/images/a.png",
                "hitbox_url": null
            })
        );
        assert!(!record.has_no_primary_data());
        assert!(MoveRecord::default().has_no_primary_data());
    }
}
