use chrono::{NaiveDate, Utc};

use shared::DryOffRecord;

use crate::domain::record_list::{
    CollectionRecord, CollectionSpec, Draft, IdStrategy, InsertPosition, ValidationError,
};
use crate::domain::records::{parse_date, parse_number, parse_optional_date};

/// Raw dry-off form input.
#[derive(Debug, Clone, Default)]
pub struct DryOffDraft {
    pub animal_tag: String,
    pub start_date: String,
    pub expected_calving_date: String,
    pub rotation_count: String,
    pub notes: String,
}

impl Draft for DryOffDraft {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "animalTag" => Some(&self.animal_tag),
            "startDate" => Some(&self.start_date),
            "expectedCalvingDate" => Some(&self.expected_calving_date),
            "rotationCount" => Some(&self.rotation_count),
            "notes" => Some(&self.notes),
            _ => None,
        }
    }
}

impl CollectionRecord for DryOffRecord {
    type Draft = DryOffDraft;

    const SPEC: CollectionSpec = CollectionSpec {
        store_key: "dry_off",
        id_strategy: IdStrategy::Sequential,
        insert: InsertPosition::Back,
        required: &["animalTag", "startDate"],
    };

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: &Self::Draft) -> Result<Self, ValidationError> {
        let rotation_count = if draft.rotation_count.trim().is_empty() {
            1
        } else {
            parse_number("rotationCount", &draft.rotation_count)?
        };

        Ok(DryOffRecord {
            id,
            animal_tag: draft.animal_tag.trim().to_string(),
            start_date: parse_date("startDate", &draft.start_date)?,
            expected_calving_date: parse_optional_date(
                "expectedCalvingDate",
                &draft.expected_calving_date,
            )?,
            rotation_count,
            notes: draft.notes.trim().to_string(),
            created_date: Utc::now().date_naive(),
        })
    }

    fn carry_forward(&mut self, previous: &Self) {
        self.created_date = previous.created_date;
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.animal_tag, &self.notes]
    }

    fn category(&self) -> Option<String> {
        Some(self.rotation_count.to_string())
    }

    fn seed() -> Vec<Self> {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid seed date");
        vec![DryOffRecord {
            id: 1,
            animal_tag: "C-014".to_string(),
            start_date: date,
            expected_calving_date: None,
            rotation_count: 1,
            notes: "Example dry-off record".to_string(),
            created_date: date,
        }]
    }
}
