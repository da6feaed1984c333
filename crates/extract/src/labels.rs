use std::collections::HashMap;

use crate::schema::EntityType;

/// spaCy label -> schema type. Anything not listed is dropped.
pub const SPACY_LABELS: &[(&str, EntityType)] = &[
    ("PERSON", EntityType::Person),
    ("ORG", EntityType::Organization),
    ("GPE", EntityType::Location),
    ("LOC", EntityType::Location),
    ("FAC", EntityType::Location),
];

/// Lookup table from engine label to entity type. Labels match exactly.
#[derive(Debug, Clone)]
pub struct LabelMap {
    table: HashMap<String, EntityType>,
}

impl LabelMap {
    pub fn from_pairs(pairs: &[(&str, EntityType)]) -> Self {
        Self {
            table: pairs
                .iter()
                .map(|(label, t)| (label.to_string(), *t))
                .collect(),
        }
    }

    pub fn spacy() -> Self {
        Self::from_pairs(SPACY_LABELS)
    }

    pub fn with_label(mut self, label: &str, entity_type: EntityType) -> Self {
        self.table.insert(label.to_string(), entity_type);
        self
    }

    pub fn map(&self, label: &str) -> Option<EntityType> {
        self.table.get(label).copied()
    }
}

impl Default for LabelMap {
    fn default() -> Self {
        Self::spacy()
    }
}
