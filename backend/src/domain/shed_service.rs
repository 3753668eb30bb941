use anyhow::Result;
use log::info;
use std::sync::Arc;

use shared::{PageRequest, PaginationInfo, RecordFilter, Shed};

use crate::domain::record_list::{paginate, RecordList};
use crate::domain::records::sheds::ShedDraft;
use crate::storage::KeyValueStore;

/// One page of sheds plus pagination metadata, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ShedListResult {
    pub sheds: Vec<Shed>,
    pub pagination: PaginationInfo,
}

/// Service for managing housing sheds.
pub struct ShedService<S: KeyValueStore> {
    sheds: RecordList<Shed, S>,
}

impl<S: KeyValueStore> ShedService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            sheds: RecordList::new(store),
        }
    }

    /// Create a new shed. Newest sheds list first.
    pub fn create_shed(&mut self, draft: ShedDraft) -> Result<Shed> {
        info!("Creating shed: name={}", draft.name);
        let shed = self.sheds.create(&draft)?;
        info!("Created shed '{}' with ID {}", shed.name, shed.id);
        Ok(shed)
    }

    pub fn update_shed(&mut self, id: u64, draft: ShedDraft) -> Result<Option<Shed>> {
        info!("Updating shed: {}", id);
        self.sheds.update(id, &draft)
    }

    /// Delete a shed. The caller is responsible for having confirmed the
    /// deletion with the user first.
    pub fn delete_shed(&mut self, id: u64) -> Result<bool> {
        info!("Deleting shed: {}", id);
        self.sheds.remove(id)
    }

    pub fn get_shed(&self, id: u64) -> Option<&Shed> {
        self.sheds.get(id)
    }

    pub fn sheds(&self) -> &[Shed] {
        self.sheds.records()
    }

    /// Derived view: filter, then paginate. Never touches the store.
    pub fn list_sheds(&self, filter: &RecordFilter, page: &PageRequest) -> ShedListResult {
        let matching = self.sheds.filtered(filter);
        let (slice, pagination) = paginate(&matching, page);
        ShedListResult {
            sheds: slice.iter().map(|shed| (*shed).clone()).collect(),
            pagination,
        }
    }
}
