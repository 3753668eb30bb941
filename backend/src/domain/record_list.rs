//! # Record List Controller
//!
//! The generic collection controller every record domain is built on. One
//! `RecordList` owns the in-memory collection for a single store key and
//! mediates between the UI layer and a [`KeyValueStore`]: load-with-fallback
//! on construction, write-through persistence after every mutation, and pure
//! derived views (filter, pagination) that never touch the store.

use anyhow::Result;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use shared::{PageRequest, PaginationInfo, RecordFilter};

use crate::storage::KeyValueStore;

/// How new record ids are assigned within a collection.
///
/// Both strategies are unique so long as creations are serialized, which
/// holds because the caller is single-threaded per installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStrategy {
    /// `max(existing ids) + 1`, starting at 1 on an empty collection
    Sequential,
    /// Current epoch milliseconds, falling back to `max + 1` on a tie
    TimestampMillis,
}

/// Where newly created records land in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Newest first
    Front,
    /// Creation order
    Back,
}

/// Declarative per-domain configuration for a record collection.
#[derive(Debug, Clone, Copy)]
pub struct CollectionSpec {
    /// Store key the collection persists under
    pub store_key: &'static str,
    pub id_strategy: IdStrategy,
    pub insert: InsertPosition,
    /// Draft fields that must be non-empty for create/update to be accepted
    pub required: &'static [&'static str],
}

/// Raw form input for one record, prior to type coercion.
///
/// Every field is exposed as the plain string the user typed; numeric and
/// date fields are parsed later by [`CollectionRecord::from_draft`].
pub trait Draft {
    fn field(&self, name: &str) -> Option<&str>;
}

/// A domain record that can live in a [`RecordList`].
pub trait CollectionRecord: Clone + Serialize + DeserializeOwned {
    type Draft: Draft;

    const SPEC: CollectionSpec;

    /// Unique id within the collection, assigned by the controller.
    fn id(&self) -> u64;

    /// Build a record from validated form input. Called only after the
    /// required-field check has passed; still rejects unparseable values.
    fn from_draft(id: u64, draft: &Self::Draft) -> Result<Self, ValidationError>;

    /// Copy forward whatever an update must not reset (creation date,
    /// embedded milestone progress). Default keeps nothing.
    fn carry_forward(&mut self, _previous: &Self) {}

    /// Text fields the substring filter searches over.
    fn search_text(&self) -> Vec<&str>;

    /// Value of the categorical filter dimension, if the domain has one.
    fn category(&self) -> Option<String> {
        None
    }

    /// Collection used when nothing is stored yet (or the stored data is
    /// unreadable). Empty for most domains.
    fn seed() -> Vec<Self> {
        Vec::new()
    }
}

/// Rejected form input. The only error kind that is surfaced to the user;
/// the mutation it blocks leaves no state change behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Required field '{0}' cannot be empty")]
    MissingField(&'static str),
    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl ValidationError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Controller for one named collection of records.
pub struct RecordList<T: CollectionRecord, S: KeyValueStore> {
    store: Arc<S>,
    records: Vec<T>,
}

impl<T: CollectionRecord, S: KeyValueStore> RecordList<T, S> {
    /// Load the collection from the store. A missing key or unreadable
    /// content falls back to the domain's seed; construction never fails.
    pub fn new(store: Arc<S>) -> Self {
        let records = Self::load(store.as_ref());
        Self { store, records }
    }

    fn load(store: &S) -> Vec<T> {
        let key = T::SPEC.store_key;

        let raw = match store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored data under '{}', starting from seed", key);
                return T::seed();
            }
            Err(e) => {
                warn!("Failed to read collection '{}': {}. Starting from seed", key, e);
                return T::seed();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!("Stored data under '{}' is not a valid collection: {}. Starting from seed", key, e);
                T::seed()
            }
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Serialize the whole collection and write it to the store,
    /// overwriting prior content. Called after every successful mutation.
    pub fn persist(&self) -> Result<()> {
        let serialized = serde_json::to_string(&self.records)?;
        self.store.set(T::SPEC.store_key, &serialized)
    }

    fn next_id(&self) -> u64 {
        let max_id = self.records.iter().map(|r| r.id()).max();
        match T::SPEC.id_strategy {
            IdStrategy::Sequential => max_id.map_or(1, |max| max + 1),
            IdStrategy::TimestampMillis => {
                let now = chrono::Utc::now().timestamp_millis() as u64;
                match max_id {
                    // Two creations within the same millisecond must not
                    // collide
                    Some(max) if max >= now => max + 1,
                    _ => now,
                }
            }
        }
    }

    fn validate_required(draft: &T::Draft) -> Result<(), ValidationError> {
        for name in T::SPEC.required {
            match draft.field(name) {
                Some(value) if !value.trim().is_empty() => {}
                _ => return Err(ValidationError::MissingField(name)),
            }
        }
        Ok(())
    }

    /// Validate, assign an id, insert per the domain's position, and
    /// persist. Returns the stored record.
    pub fn create(&mut self, draft: &T::Draft) -> Result<T> {
        Self::validate_required(draft)?;

        let record = T::from_draft(self.next_id(), draft)?;
        match T::SPEC.insert {
            InsertPosition::Front => self.records.insert(0, record.clone()),
            InsertPosition::Back => self.records.push(record.clone()),
        }

        self.persist()?;
        Ok(record)
    }

    /// Replace the fields of the record with the matching id, keeping the id
    /// and whatever `carry_forward` preserves. Unknown ids are a silent
    /// no-op (`Ok(None)`); they should not occur since ids are
    /// controller-assigned.
    pub fn update(&mut self, id: u64, draft: &T::Draft) -> Result<Option<T>> {
        Self::validate_required(draft)?;

        let Some(position) = self.records.iter().position(|r| r.id() == id) else {
            warn!("Attempted to update a record that does not exist: {} ('{}')", id, T::SPEC.store_key);
            return Ok(None);
        };

        let mut updated = T::from_draft(id, draft)?;
        updated.carry_forward(&self.records[position]);
        self.records[position] = updated.clone();

        self.persist()?;
        Ok(Some(updated))
    }

    /// Remove the record with the matching id. Returns whether anything was
    /// removed; unknown ids are a silent no-op.
    pub fn remove(&mut self, id: u64) -> Result<bool> {
        let count_before = self.records.len();
        self.records.retain(|r| r.id() != id);

        if self.records.len() == count_before {
            warn!("Attempted to remove a record that does not exist: {} ('{}')", id, T::SPEC.store_key);
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    /// Mutate one record in place. `apply` returns whether it changed the
    /// record; the collection is only persisted when it did.
    pub fn modify<F>(&mut self, id: u64, apply: F) -> Result<bool>
    where
        F: FnOnce(&mut T) -> bool,
    {
        let Some(record) = self.records.iter_mut().find(|r| r.id() == id) else {
            warn!("Attempted to modify a record that does not exist: {} ('{}')", id, T::SPEC.store_key);
            return Ok(false);
        };

        if !apply(record) {
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    /// Derived view: records matching the filter, in collection order.
    /// Recomputed on every call; never persisted.
    pub fn filtered(&self, filter: &RecordFilter) -> Vec<&T> {
        self.records.iter().filter(|r| matches(*r, filter)).collect()
    }
}

fn matches<T: CollectionRecord>(record: &T, filter: &RecordFilter) -> bool {
    let query_ok = match filter.query.as_deref() {
        None => true,
        Some(q) if q.trim().is_empty() => true,
        Some(q) => {
            let needle = q.to_lowercase();
            record
                .search_text()
                .iter()
                .any(|text| text.to_lowercase().contains(&needle))
        }
    };

    let category_ok = match filter.category.as_deref() {
        None | Some("all") => true,
        Some(category) => record.category().as_deref() == Some(category),
    };

    query_ok && category_ok
}

/// Slice one page out of `items`.
///
/// The page number is clamped into `[1, total_pages]`, so an in-range page
/// over a non-empty list is never an empty slice.
pub fn paginate<'a, T>(items: &'a [T], request: &PageRequest) -> (&'a [T], PaginationInfo) {
    let total_count = items.len() as u32;
    let page_size = request.page_size.max(1);
    let total_pages = total_count.div_ceil(page_size);
    let page = request.page.clamp(1, total_pages.max(1));

    let start = ((page - 1) * page_size) as usize;
    let end = (start + page_size as usize).min(items.len());
    let slice = if start < items.len() {
        &items[start..end]
    } else {
        &items[0..0]
    };

    let info = PaginationInfo {
        page,
        page_size,
        total_pages,
        total_count,
    };
    (slice, info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Task {
        id: u64,
        title: String,
        label: String,
    }

    #[derive(Default)]
    struct TaskDraft {
        title: String,
        label: String,
    }

    impl TaskDraft {
        fn titled(title: &str) -> Self {
            Self {
                title: title.to_string(),
                label: "chore".to_string(),
            }
        }
    }

    impl Draft for TaskDraft {
        fn field(&self, name: &str) -> Option<&str> {
            match name {
                "title" => Some(&self.title),
                "label" => Some(&self.label),
                _ => None,
            }
        }
    }

    impl CollectionRecord for Task {
        type Draft = TaskDraft;

        const SPEC: CollectionSpec = CollectionSpec {
            store_key: "tasks",
            id_strategy: IdStrategy::Sequential,
            insert: InsertPosition::Back,
            required: &["title"],
        };

        fn id(&self) -> u64 {
            self.id
        }

        fn from_draft(id: u64, draft: &Self::Draft) -> Result<Self, ValidationError> {
            Ok(Task {
                id,
                title: draft.title.trim().to_string(),
                label: draft.label.trim().to_string(),
            })
        }

        fn search_text(&self) -> Vec<&str> {
            vec![&self.title]
        }

        fn category(&self) -> Option<String> {
            Some(self.label.clone())
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Stamped {
        id: u64,
        title: String,
    }

    impl CollectionRecord for Stamped {
        type Draft = TaskDraft;

        const SPEC: CollectionSpec = CollectionSpec {
            store_key: "stamped",
            id_strategy: IdStrategy::TimestampMillis,
            insert: InsertPosition::Back,
            required: &["title"],
        };

        fn id(&self) -> u64 {
            self.id
        }

        fn from_draft(id: u64, draft: &Self::Draft) -> Result<Self, ValidationError> {
            Ok(Stamped {
                id,
                title: draft.title.clone(),
            })
        }

        fn search_text(&self) -> Vec<&str> {
            vec![&self.title]
        }
    }

    fn setup_test() -> RecordList<Task, MemoryStore> {
        RecordList::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_sequential_ids_start_at_one() {
        let mut list = setup_test();
        for expected in 1..=4 {
            let record = list.create(&TaskDraft::titled("feed cattle")).unwrap();
            assert_eq!(record.id, expected);
        }
    }

    #[test]
    fn test_id_is_max_plus_one_not_first_gap() {
        let mut list = setup_test();
        for title in ["a", "b", "c"] {
            list.create(&TaskDraft::titled(title)).unwrap();
        }
        assert!(list.remove(2).unwrap());

        let record = list.create(&TaskDraft::titled("d")).unwrap();
        assert_eq!(record.id, 4);
    }

    #[test]
    fn test_timestamp_ids_are_unique() {
        let mut list: RecordList<Stamped, MemoryStore> = RecordList::new(Arc::new(MemoryStore::new()));
        let first = list.create(&TaskDraft::titled("a")).unwrap();
        let second = list.create(&TaskDraft::titled("b")).unwrap();
        assert!(first.id > 0);
        assert!(second.id > first.id);
    }

    #[test]
    fn test_create_rejects_missing_required_field() {
        let mut list = setup_test();
        let result = list.create(&TaskDraft {
            title: "   ".to_string(),
            label: "chore".to_string(),
        });

        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::MissingField("title"))
        );
        assert!(list.is_empty());
    }

    #[test]
    fn test_update_replaces_fields_and_keeps_count() {
        let mut list = setup_test();
        list.create(&TaskDraft::titled("muck out")).unwrap();
        list.create(&TaskDraft::titled("fix fence")).unwrap();

        let updated = list.update(1, &TaskDraft::titled("muck out west barn")).unwrap();
        assert_eq!(updated.unwrap().title, "muck out west barn");
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).unwrap().title, "muck out west barn");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut list = setup_test();
        list.create(&TaskDraft::titled("muck out")).unwrap();

        let result = list.update(99, &TaskDraft::titled("ghost")).unwrap();
        assert!(result.is_none());
        assert_eq!(list.records()[0].title, "muck out");
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut list = setup_test();
        list.create(&TaskDraft::titled("muck out")).unwrap();
        assert!(!list.remove(99).unwrap());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_create_then_remove_restores_original() {
        let mut list = setup_test();
        list.create(&TaskDraft::titled("keep me")).unwrap();
        let before: Vec<Task> = list.records().to_vec();

        let created = list.create(&TaskDraft::titled("transient")).unwrap();
        assert!(list.remove(created.id).unwrap());
        assert_eq!(list.records(), before.as_slice());
    }

    #[test]
    fn test_write_through_and_reload() {
        let store = Arc::new(MemoryStore::new());
        let mut list: RecordList<Task, MemoryStore> = RecordList::new(store.clone());
        list.create(&TaskDraft::titled("persisted")).unwrap();

        let reloaded: RecordList<Task, MemoryStore> = RecordList::new(store);
        assert_eq!(reloaded.records(), list.records());
    }

    #[test]
    fn test_persist_after_load_is_byte_identical() {
        let store = Arc::new(MemoryStore::new());
        let mut list: RecordList<Task, MemoryStore> = RecordList::new(store.clone());
        list.create(&TaskDraft::titled("alpha")).unwrap();
        list.create(&TaskDraft::titled("beta")).unwrap();
        let stored_before = store.get("tasks").unwrap().unwrap();

        let reloaded: RecordList<Task, MemoryStore> = RecordList::new(store.clone());
        reloaded.persist().unwrap();
        let stored_after = store.get("tasks").unwrap().unwrap();

        assert_eq!(stored_before, stored_after);
    }

    #[test]
    fn test_load_invalid_json_falls_back_to_seed() {
        let store = Arc::new(MemoryStore::new());
        store.set("tasks", "{not json").unwrap();

        let list: RecordList<Task, MemoryStore> = RecordList::new(store);
        assert!(list.is_empty());
    }

    #[test]
    fn test_modify_persists_only_on_change() {
        let store = Arc::new(MemoryStore::new());
        let mut list: RecordList<Task, MemoryStore> = RecordList::new(store.clone());
        list.create(&TaskDraft::titled("toggle me")).unwrap();

        let changed = list
            .modify(1, |task| {
                task.title.push('!');
                true
            })
            .unwrap();
        assert!(changed);
        assert!(store.get("tasks").unwrap().unwrap().contains("toggle me!"));

        let changed = list.modify(1, |_| false).unwrap();
        assert!(!changed);
        assert!(!list.modify(99, |_| true).unwrap());
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let mut list = setup_test();
        list.create(&TaskDraft::titled("Feed North herd")).unwrap();
        list.create(&TaskDraft::titled("Clean milking shed")).unwrap();

        let hits = list.filtered(&RecordFilter::with_query("NORTH"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Feed North herd");
    }

    #[test]
    fn test_filter_category_with_all_wildcard() {
        let mut list = setup_test();
        list.create(&TaskDraft::titled("one")).unwrap();
        list.create(&TaskDraft {
            title: "two".to_string(),
            label: "urgent".to_string(),
        })
        .unwrap();

        assert_eq!(list.filtered(&RecordFilter::with_category("urgent")).len(), 1);
        assert_eq!(list.filtered(&RecordFilter::with_category("all")).len(), 2);
        assert_eq!(list.filtered(&RecordFilter::default()).len(), 2);
    }

    #[test]
    fn test_filter_dimensions_combine_with_and() {
        let mut list = setup_test();
        list.create(&TaskDraft::titled("feed herd")).unwrap();
        list.create(&TaskDraft {
            title: "feed calves".to_string(),
            label: "urgent".to_string(),
        })
        .unwrap();
        list.create(&TaskDraft {
            title: "vet visit".to_string(),
            label: "urgent".to_string(),
        })
        .unwrap();

        let combined = RecordFilter {
            query: Some("feed".to_string()),
            category: Some("urgent".to_string()),
        };
        let hits = list.filtered(&combined);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "feed calves");

        // Same result regardless of which dimension narrows first
        let text_first: Vec<&Task> = list
            .filtered(&RecordFilter::with_query("feed"))
            .into_iter()
            .filter(|t| t.category().as_deref() == Some("urgent"))
            .collect();
        assert_eq!(hits, text_first);
    }

    #[test]
    fn test_paginate_slices_and_clamps() {
        let items: Vec<u32> = (1..=25).collect();

        let (slice, info) = paginate(&items, &PageRequest::new(2, 10));
        assert_eq!(slice, &items[10..20]);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.total_count, 25);

        // Last page is the partial remainder
        let (slice, info) = paginate(&items, &PageRequest::new(3, 10));
        assert_eq!(slice, &items[20..25]);
        assert_eq!(info.page, 3);

        // Out-of-range pages clamp instead of returning empty slices
        let (slice, info) = paginate(&items, &PageRequest::new(99, 10));
        assert_eq!(info.page, 3);
        assert_eq!(slice, &items[20..25]);

        let (slice, info) = paginate(&items, &PageRequest::new(0, 10));
        assert_eq!(info.page, 1);
        assert_eq!(slice, &items[0..10]);
    }

    #[test]
    fn test_paginate_never_empty_for_in_range_pages() {
        let items: Vec<u32> = (1..=21).collect();
        let (_, info) = paginate(&items, &PageRequest::new(1, 5));
        for page in 1..=info.total_pages {
            let (slice, _) = paginate(&items, &PageRequest::new(page, 5));
            assert!(!slice.is_empty(), "page {} was empty", page);
        }
    }

    #[test]
    fn test_paginate_empty_collection() {
        let items: Vec<u32> = Vec::new();
        let (slice, info) = paginate(&items, &PageRequest::new(1, 10));
        assert!(slice.is_empty());
        assert_eq!(info.page, 1);
        assert_eq!(info.total_pages, 0);
        assert_eq!(info.total_count, 0);
    }
}
