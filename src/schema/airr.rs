use std::collections::HashSet;

use lazy_static::lazy_static;

/// The MiAIRR rearrangement field list shipped with the crate. One field
/// name per line, in canonical column order.
const AIRR_FIELDS_RAW: &str = include_str!("airr_fields.txt");

lazy_static! {
    /// Reference schema, loaded once per process. All schema sizes are taken
    /// from this list, never hardcoded.
    pub static ref AIRR_SCHEMA: AirrSchema = AirrSchema::load();
}

/// The canonical MiAIRR rearrangement schema: an ordered list of field names
/// plus a membership index.
pub struct AirrSchema {
    fields: Vec<String>,
    index: HashSet<String>,
}

impl AirrSchema {
    pub fn load() -> AirrSchema {
        let fields: Vec<String> = AIRR_FIELDS_RAW
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        let index = fields.iter().cloned().collect();
        AirrSchema { fields, index }
    }

    /// Canonical field names in canonical column order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    /// True when the given column names already cover the entire canonical
    /// schema. This is the fast-path predicate of the normalizer.
    pub fn is_complete<S: AsRef<str>>(&self, columns: &[S]) -> bool {
        let present: HashSet<&str> = columns.iter().map(|c| c.as_ref()).collect();
        self.fields.iter().all(|f| present.contains(f.as_str()))
    }
}
