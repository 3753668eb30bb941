//! Herdbook backend: domain and storage layers for a single-user livestock
//! record-keeping application.
//!
//! The UI layer is a separate crate; everything here is synchronous and
//! local. Each record domain (sheds, vaccines, breeding, pregnancies,
//! dry-off, milk sales) is one instance of the generic record-list
//! controller in [`domain::record_list`], persisted as a JSON collection
//! under its own key in a [`storage::KeyValueStore`].

pub mod domain;
pub mod storage;
