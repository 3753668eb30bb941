use anyhow::Result;
use log::info;
use std::sync::Arc;

use shared::{BreedingRecord, PageRequest, PaginationInfo, RecordFilter};

use crate::domain::record_list::{paginate, RecordList};
use crate::domain::records::breeding::BreedingDraft;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, PartialEq)]
pub struct BreedingListResult {
    pub records: Vec<BreedingRecord>,
    pub pagination: PaginationInfo,
}

/// Service for managing breeding events.
pub struct BreedingService<S: KeyValueStore> {
    records: RecordList<BreedingRecord, S>,
}

impl<S: KeyValueStore> BreedingService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            records: RecordList::new(store),
        }
    }

    /// Record a breeding event. Events keep creation order.
    pub fn record_breeding(&mut self, draft: BreedingDraft) -> Result<BreedingRecord> {
        info!("Recording breeding: dam={} sire={}", draft.dam_tag, draft.sire_tag);
        self.records.create(&draft)
    }

    pub fn update_breeding(&mut self, id: u64, draft: BreedingDraft) -> Result<Option<BreedingRecord>> {
        info!("Updating breeding record: {}", id);
        self.records.update(id, &draft)
    }

    pub fn delete_breeding(&mut self, id: u64) -> Result<bool> {
        info!("Deleting breeding record: {}", id);
        self.records.remove(id)
    }

    pub fn records(&self) -> &[BreedingRecord] {
        self.records.records()
    }

    pub fn list_breedings(&self, filter: &RecordFilter, page: &PageRequest) -> BreedingListResult {
        let matching = self.records.filtered(filter);
        let (slice, pagination) = paginate(&matching, page);
        BreedingListResult {
            records: slice.iter().map(|r| (*r).clone()).collect(),
            pagination,
        }
    }
}
