use chrono::Utc;

use shared::Shed;

use crate::domain::record_list::{
    CollectionRecord, CollectionSpec, Draft, IdStrategy, InsertPosition, ValidationError,
};
use crate::domain::records::{parse_number, parse_status};

/// Raw shed form input. Numeric fields arrive as strings and are parsed
/// before storage.
#[derive(Debug, Clone, Default)]
pub struct ShedDraft {
    pub name: String,
    pub capacity: String,
    pub status: String,
}

impl Draft for ShedDraft {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "capacity" => Some(&self.capacity),
            "status" => Some(&self.status),
            _ => None,
        }
    }
}

impl CollectionRecord for Shed {
    type Draft = ShedDraft;

    const SPEC: CollectionSpec = CollectionSpec {
        store_key: "sheds",
        id_strategy: IdStrategy::Sequential,
        insert: InsertPosition::Front,
        required: &["name", "capacity", "status"],
    };

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: &Self::Draft) -> Result<Self, ValidationError> {
        Ok(Shed {
            id,
            name: draft.name.trim().to_string(),
            capacity: parse_number("capacity", &draft.capacity)?,
            status: parse_status("status", &draft.status)?,
            created_date: Utc::now().date_naive(),
        })
    }

    fn carry_forward(&mut self, previous: &Self) {
        self.created_date = previous.created_date;
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.name]
    }

    fn category(&self) -> Option<String> {
        Some(self.status.to_string())
    }
}
