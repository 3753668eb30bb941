use chrono::Utc;

use shared::Vaccine;

use crate::domain::record_list::{
    CollectionRecord, CollectionSpec, Draft, IdStrategy, InsertPosition, ValidationError,
};
use crate::domain::records::{parse_date, parse_optional_date};

/// Raw vaccination form input.
#[derive(Debug, Clone, Default)]
pub struct VaccineDraft {
    pub name: String,
    pub animal_tag: String,
    pub date_administered: String,
    pub next_due_date: String,
    pub veterinarian: String,
    pub notes: String,
}

impl Draft for VaccineDraft {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "animalTag" => Some(&self.animal_tag),
            "dateAdministered" => Some(&self.date_administered),
            "nextDueDate" => Some(&self.next_due_date),
            "veterinarian" => Some(&self.veterinarian),
            "notes" => Some(&self.notes),
            _ => None,
        }
    }
}

impl CollectionRecord for Vaccine {
    type Draft = VaccineDraft;

    const SPEC: CollectionSpec = CollectionSpec {
        store_key: "vaccines",
        id_strategy: IdStrategy::Sequential,
        insert: InsertPosition::Front,
        required: &["name", "animalTag", "dateAdministered"],
    };

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: &Self::Draft) -> Result<Self, ValidationError> {
        Ok(Vaccine {
            id,
            name: draft.name.trim().to_string(),
            animal_tag: draft.animal_tag.trim().to_string(),
            date_administered: parse_date("dateAdministered", &draft.date_administered)?,
            next_due_date: parse_optional_date("nextDueDate", &draft.next_due_date)?,
            veterinarian: draft.veterinarian.trim().to_string(),
            notes: draft.notes.trim().to_string(),
            created_date: Utc::now().date_naive(),
        })
    }

    fn carry_forward(&mut self, previous: &Self) {
        self.created_date = previous.created_date;
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.name, &self.animal_tag, &self.notes]
    }
}
