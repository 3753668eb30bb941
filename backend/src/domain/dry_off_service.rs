use anyhow::Result;
use log::info;
use std::sync::Arc;

use shared::{DryOffRecord, PageRequest, PaginationInfo, RecordFilter};

use crate::domain::record_list::{paginate, RecordList};
use crate::domain::records::dry_off::DryOffDraft;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, PartialEq)]
pub struct DryOffListResult {
    pub records: Vec<DryOffRecord>,
    pub pagination: PaginationInfo,
}

/// Service for managing dry-off periods.
///
/// This collection seeds one example record on first run so the page is
/// never completely blank for a new installation.
pub struct DryOffService<S: KeyValueStore> {
    records: RecordList<DryOffRecord, S>,
}

impl<S: KeyValueStore> DryOffService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            records: RecordList::new(store),
        }
    }

    pub fn record_dry_off(&mut self, draft: DryOffDraft) -> Result<DryOffRecord> {
        info!("Recording dry-off for animal {}", draft.animal_tag);
        self.records.create(&draft)
    }

    pub fn update_dry_off(&mut self, id: u64, draft: DryOffDraft) -> Result<Option<DryOffRecord>> {
        info!("Updating dry-off record: {}", id);
        self.records.update(id, &draft)
    }

    pub fn delete_dry_off(&mut self, id: u64) -> Result<bool> {
        info!("Deleting dry-off record: {}", id);
        self.records.remove(id)
    }

    pub fn records(&self) -> &[DryOffRecord] {
        self.records.records()
    }

    /// The categorical dimension here is the rotation count, filtered by its
    /// decimal string (with the usual `"all"` wildcard).
    pub fn list_dry_offs(&self, filter: &RecordFilter, page: &PageRequest) -> DryOffListResult {
        let matching = self.records.filtered(filter);
        let (slice, pagination) = paginate(&matching, page);
        DryOffListResult {
            records: slice.iter().map(|r| (*r).clone()).collect(),
            pagination,
        }
    }
}
