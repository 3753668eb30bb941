use anyhow::Result;
use chrono::{DateTime, Utc};
use log::info;
use std::sync::Arc;

use shared::{GestationProgress, PageRequest, PaginationInfo, Pregnancy, RecordFilter};

use crate::domain::record_list::{paginate, RecordList};
use crate::domain::records::pregnancies::PregnancyDraft;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, PartialEq)]
pub struct PregnancyListResult {
    pub pregnancies: Vec<Pregnancy>,
    pub pagination: PaginationInfo,
}

/// Service for tracking pregnancies and their milestone checklists.
pub struct PregnancyService<S: KeyValueStore> {
    pregnancies: RecordList<Pregnancy, S>,
}

impl<S: KeyValueStore> PregnancyService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            pregnancies: RecordList::new(store),
        }
    }

    pub fn start_tracking(&mut self, draft: PregnancyDraft) -> Result<Pregnancy> {
        info!("Tracking pregnancy for animal {}", draft.animal_tag);
        self.pregnancies.create(&draft)
    }

    /// Edit a pregnancy's fields. Milestone progress carries over untouched.
    pub fn update_pregnancy(&mut self, id: u64, draft: PregnancyDraft) -> Result<Option<Pregnancy>> {
        info!("Updating pregnancy: {}", id);
        self.pregnancies.update(id, &draft)
    }

    pub fn delete_pregnancy(&mut self, id: u64) -> Result<bool> {
        info!("Deleting pregnancy: {}", id);
        self.pregnancies.remove(id)
    }

    /// Flip one milestone's completed flag. Out-of-range indexes and unknown
    /// ids leave everything untouched and return `false`.
    pub fn toggle_milestone(&mut self, id: u64, milestone_index: usize) -> Result<bool> {
        self.pregnancies.modify(id, |pregnancy| {
            match pregnancy.milestones.get_mut(milestone_index) {
                Some(milestone) => {
                    milestone.completed = !milestone.completed;
                    true
                }
                None => false,
            }
        })
    }

    pub fn get_pregnancy(&self, id: u64) -> Option<&Pregnancy> {
        self.pregnancies.get(id)
    }

    pub fn pregnancies(&self) -> &[Pregnancy] {
        self.pregnancies.records()
    }

    /// Derived gestation figures for display; `now` is caller-supplied so
    /// views stay deterministic.
    pub fn gestation(&self, id: u64, now: DateTime<Utc>) -> Option<GestationProgress> {
        self.pregnancies.get(id).map(|p| p.gestation_progress(now))
    }

    pub fn list_pregnancies(&self, filter: &RecordFilter, page: &PageRequest) -> PregnancyListResult {
        let matching = self.pregnancies.filtered(filter);
        let (slice, pagination) = paginate(&matching, page);
        PregnancyListResult {
            pregnancies: slice.iter().map(|p| (*p).clone()).collect(),
            pagination,
        }
    }
}
