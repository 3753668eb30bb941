use chrono::Utc;

use shared::{BreedingRecord, BreedingStatus};

use crate::domain::record_list::{
    CollectionRecord, CollectionSpec, Draft, IdStrategy, InsertPosition, ValidationError,
};
use crate::domain::records::{parse_date, parse_status};

/// Raw breeding-event form input.
#[derive(Debug, Clone, Default)]
pub struct BreedingDraft {
    pub dam_tag: String,
    pub sire_tag: String,
    pub breeding_date: String,
    pub status: String,
    pub notes: String,
}

impl Draft for BreedingDraft {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "damTag" => Some(&self.dam_tag),
            "sireTag" => Some(&self.sire_tag),
            "breedingDate" => Some(&self.breeding_date),
            "status" => Some(&self.status),
            "notes" => Some(&self.notes),
            _ => None,
        }
    }
}

impl CollectionRecord for BreedingRecord {
    type Draft = BreedingDraft;

    const SPEC: CollectionSpec = CollectionSpec {
        store_key: "breeding",
        id_strategy: IdStrategy::Sequential,
        insert: InsertPosition::Back,
        required: &["damTag", "sireTag", "breedingDate"],
    };

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: &Self::Draft) -> Result<Self, ValidationError> {
        // A fresh breeding event has no confirmed outcome yet
        let status = if draft.status.trim().is_empty() {
            BreedingStatus::Pending
        } else {
            parse_status("status", &draft.status)?
        };

        Ok(BreedingRecord {
            id,
            dam_tag: draft.dam_tag.trim().to_string(),
            sire_tag: draft.sire_tag.trim().to_string(),
            breeding_date: parse_date("breedingDate", &draft.breeding_date)?,
            status,
            notes: draft.notes.trim().to_string(),
            created_date: Utc::now().date_naive(),
        })
    }

    fn carry_forward(&mut self, previous: &Self) {
        self.created_date = previous.created_date;
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.dam_tag, &self.sire_tag, &self.notes]
    }

    fn category(&self) -> Option<String> {
        Some(self.status.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_status_defaults_to_pending() {
        let draft = BreedingDraft {
            dam_tag: "D-204".to_string(),
            sire_tag: "S-007".to_string(),
            breeding_date: "2025-03-12".to_string(),
            ..Default::default()
        };

        let record = BreedingRecord::from_draft(1, &draft).unwrap();
        assert_eq!(record.status, BreedingStatus::Pending);
        assert_eq!(record.category().unwrap(), "pending");
    }
}
