use chrono::Utc;

use shared::{Pregnancy, PregnancyStatus};

use crate::domain::record_list::{
    CollectionRecord, CollectionSpec, Draft, IdStrategy, InsertPosition, ValidationError,
};
use crate::domain::records::{parse_optional_date, parse_status};

/// Raw pregnancy form input. The milestone checklist is never part of the
/// form; it is fixed at creation and only toggled afterwards.
#[derive(Debug, Clone, Default)]
pub struct PregnancyDraft {
    pub animal_tag: String,
    pub breeding_date: String,
    pub due_date: String,
    pub status: String,
    pub notes: String,
}

impl Draft for PregnancyDraft {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "animalTag" => Some(&self.animal_tag),
            "breedingDate" => Some(&self.breeding_date),
            "dueDate" => Some(&self.due_date),
            "status" => Some(&self.status),
            "notes" => Some(&self.notes),
            _ => None,
        }
    }
}

impl CollectionRecord for Pregnancy {
    type Draft = PregnancyDraft;

    const SPEC: CollectionSpec = CollectionSpec {
        store_key: "pregnancies",
        id_strategy: IdStrategy::Sequential,
        insert: InsertPosition::Back,
        required: &["animalTag"],
    };

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: &Self::Draft) -> Result<Self, ValidationError> {
        let status = if draft.status.trim().is_empty() {
            PregnancyStatus::Healthy
        } else {
            parse_status("status", &draft.status)?
        };

        Ok(Pregnancy {
            id,
            animal_tag: draft.animal_tag.trim().to_string(),
            breeding_date: parse_optional_date("breedingDate", &draft.breeding_date)?,
            due_date: parse_optional_date("dueDate", &draft.due_date)?,
            status,
            milestones: Pregnancy::default_milestones(),
            notes: draft.notes.trim().to_string(),
            created_date: Utc::now().date_naive(),
        })
    }

    /// Editing a pregnancy must not reset checklist progress.
    fn carry_forward(&mut self, previous: &Self) {
        self.milestones = previous.milestones.clone();
        self.created_date = previous.created_date;
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.animal_tag, &self.notes]
    }

    fn category(&self) -> Option<String> {
        Some(self.status.to_string())
    }
}
