use anyhow::Result;
use log::info;
use std::sync::Arc;

use shared::{PageRequest, PaginationInfo, RecordFilter, Vaccine};

use crate::domain::record_list::{paginate, RecordList};
use crate::domain::records::vaccines::VaccineDraft;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, PartialEq)]
pub struct VaccineListResult {
    pub vaccines: Vec<Vaccine>,
    pub pagination: PaginationInfo,
}

/// Service for managing vaccination records.
pub struct VaccineService<S: KeyValueStore> {
    vaccines: RecordList<Vaccine, S>,
}

impl<S: KeyValueStore> VaccineService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            vaccines: RecordList::new(store),
        }
    }

    pub fn record_vaccination(&mut self, draft: VaccineDraft) -> Result<Vaccine> {
        info!("Recording vaccination: {} for animal {}", draft.name, draft.animal_tag);
        self.vaccines.create(&draft)
    }

    pub fn update_vaccination(&mut self, id: u64, draft: VaccineDraft) -> Result<Option<Vaccine>> {
        info!("Updating vaccination: {}", id);
        self.vaccines.update(id, &draft)
    }

    pub fn delete_vaccination(&mut self, id: u64) -> Result<bool> {
        info!("Deleting vaccination: {}", id);
        self.vaccines.remove(id)
    }

    pub fn vaccines(&self) -> &[Vaccine] {
        self.vaccines.records()
    }

    /// The search query matches vaccine name, animal tag, and notes.
    pub fn list_vaccinations(&self, filter: &RecordFilter, page: &PageRequest) -> VaccineListResult {
        let matching = self.vaccines.filtered(filter);
        let (slice, pagination) = paginate(&matching, page);
        VaccineListResult {
            vaccines: slice.iter().map(|v| (*v).clone()).collect(),
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn setup_test() -> VaccineService<MemoryStore> {
        VaccineService::new(Arc::new(MemoryStore::new()))
    }

    fn draft(name: &str, tag: &str) -> VaccineDraft {
        VaccineDraft {
            name: name.to_string(),
            animal_tag: tag.to_string(),
            date_administered: "2025-02-10".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_newest_vaccination_listed_first() {
        let mut service = setup_test();
        service.record_vaccination(draft("Clostridial 8-way", "C-101")).unwrap();
        service.record_vaccination(draft("IBR booster", "C-102")).unwrap();

        assert_eq!(service.vaccines()[0].name, "IBR booster");
        assert_eq!(service.vaccines()[0].id, 2);
    }

    #[test]
    fn test_missing_required_fields_rejected() {
        let mut service = setup_test();
        let result = service.record_vaccination(VaccineDraft {
            name: "Clostridial 8-way".to_string(),
            ..Default::default()
        });
        assert!(result.is_err());
        assert!(service.vaccines().is_empty());
    }

    #[test]
    fn test_search_matches_animal_tag() {
        let mut service = setup_test();
        service.record_vaccination(draft("Clostridial 8-way", "C-101")).unwrap();
        service.record_vaccination(draft("IBR booster", "C-102")).unwrap();

        let result = service.list_vaccinations(
            &RecordFilter::with_query("c-102"),
            &PageRequest::default(),
        );
        assert_eq!(result.vaccines.len(), 1);
        assert_eq!(result.vaccines[0].animal_tag, "C-102");
    }

    #[test]
    fn test_update_unknown_vaccination_is_noop() {
        let mut service = setup_test();
        let result = service.update_vaccination(42, draft("IBR booster", "C-102")).unwrap();
        assert!(result.is_none());
    }
}
