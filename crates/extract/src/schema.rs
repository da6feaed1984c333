use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityType {
    Person,
    Location,
    Organization,
}

impl EntityType {
    pub const ALL: [EntityType; 3] = [
        EntityType::Person,
        EntityType::Location,
        EntityType::Organization,
    ];
}

/// A labeled span as reported by the recognition engine.
/// Offsets are character indices, half-open `[start_char, end_char)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSpan {
    pub label: String,
    pub text: String,
    pub start_char: usize,
    pub end_char: usize,
}

impl RawSpan {
    pub fn new(label: &str, text: &str, start_char: usize, end_char: usize) -> Self {
        Self {
            label: label.to_string(),
            text: text.to_string(),
            start_char,
            end_char,
        }
    }
}

/// One entity occurrence mapped into the three-class schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    pub text: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub source_label: String,
    pub start_char: usize,
    pub end_char: usize,
    pub position: usize,
    pub normalized_text: String,
    pub context: String,
}

impl Mention {
    pub fn dedup_key(&self) -> (EntityType, &str, usize) {
        (self.entity_type, self.normalized_text.as_str(), self.position)
    }
}

/// Per-type tally. Always carries all three types, zero when unobserved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    #[serde(rename = "PERSON")]
    pub person: usize,
    #[serde(rename = "LOCATION")]
    pub location: usize,
    #[serde(rename = "ORGANIZATION")]
    pub organization: usize,
}

impl TypeCounts {
    pub fn from_mentions(mentions: &[Mention]) -> Self {
        let mut counts = Self::default();
        for mention in mentions {
            counts.increment(mention.entity_type);
        }
        counts
    }

    pub fn get(&self, entity_type: EntityType) -> usize {
        match entity_type {
            EntityType::Person => self.person,
            EntityType::Location => self.location,
            EntityType::Organization => self.organization,
        }
    }

    pub fn increment(&mut self, entity_type: EntityType) {
        *self.slot(entity_type) += 1;
    }

    pub fn add(&mut self, other: &TypeCounts) {
        for t in EntityType::ALL {
            *self.slot(t) += other.get(t);
        }
    }

    pub fn total(&self) -> usize {
        self.person + self.location + self.organization
    }

    fn slot(&mut self, entity_type: EntityType) -> &mut usize {
        match entity_type {
            EntityType::Person => &mut self.person,
            EntityType::Location => &mut self.location,
            EntityType::Organization => &mut self.organization,
        }
    }
}

/// Extraction output for a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMentions {
    pub mentions: Vec<Mention>,
    pub counts_by_type: TypeCounts,
    pub raw_count: usize,
}

impl DocumentMentions {
    pub fn deduped_count(&self) -> usize {
        self.mentions.len()
    }
}
