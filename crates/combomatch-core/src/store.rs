//! Store — an ordered collection of records with a filtered view.
//!
//! The store owns the records; the engine only lends it a predicate. When a
//! predicate fails for a record, the store logs the error and treats that
//! record as not matching, so a broken custom matcher never takes down the
//! list that is being rendered.

use crate::error::MatchResult;
use crate::types::Record;

/// What the filter engine needs from a record collection.
pub trait RecordStore {
    type Record: Record;

    /// Replace the current view with the records accepted by `predicate`.
    fn apply_filter<F>(&mut self, predicate: F)
    where
        F: FnMut(&Self::Record) -> MatchResult<bool>;

    /// Make every record visible again.
    fn clear_filter(&mut self);

    /// Number of records in the current view.
    fn count(&self) -> usize;

    /// True if the view is narrower than "all records".
    fn is_filtered(&self) -> bool;

    /// The records in the current view, in insertion order.
    fn visible(&self) -> Box<dyn Iterator<Item = &Self::Record> + '_>;
}

/// [`RecordStore`] backed by a `Vec`, keeping the view as a list of indices.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore<R> {
    records: Vec<R>,
    view: Option<Vec<usize>>,
}

impl<R: Record> MemoryStore<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            view: None,
        }
    }

    /// Every record, filtered or not, in insertion order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record. While a filter is active it stays hidden until the
    /// filter runs again.
    pub fn push(&mut self, record: R) {
        self.records.push(record);
    }
}

impl<R: Record> RecordStore for MemoryStore<R> {
    type Record = R;

    fn apply_filter<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&R) -> MatchResult<bool>,
    {
        let mut view = Vec::with_capacity(self.records.len());
        let mut failures = 0usize;
        for (i, record) in self.records.iter().enumerate() {
            match predicate(record) {
                Ok(true) => view.push(i),
                Ok(false) => {}
                Err(err) => {
                    failures += 1;
                    tracing::warn!(
                        index = i,
                        error = %err,
                        "store: predicate failed, treating record as non-matching"
                    );
                }
            }
        }
        tracing::debug!(
            total = self.records.len(),
            accepted = view.len(),
            failures,
            "store: filter applied"
        );
        self.view = Some(view);
    }

    fn clear_filter(&mut self) {
        self.view = None;
        tracing::debug!(total = self.records.len(), "store: filter cleared");
    }

    fn count(&self) -> usize {
        self.view.as_ref().map_or(self.records.len(), Vec::len)
    }

    fn is_filtered(&self) -> bool {
        self.view.is_some()
    }

    fn visible(&self) -> Box<dyn Iterator<Item = &R> + '_> {
        match &self.view {
            None => Box::new(self.records.iter()),
            Some(indices) => Box::new(indices.iter().map(move |&i| &self.records[i])),
        }
    }
}

impl<R: Record> FromIterator<R> for MemoryStore<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatchError;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn store() -> MemoryStore<Value> {
        MemoryStore::new(vec![
            json!({ "name": "Aberdeen, SD" }),
            json!({ "name": "Abilene, TX" }),
            json!({ "name": "Adak Island, AK" }),
        ])
    }

    fn names<S: RecordStore<Record = Value>>(store: &S) -> Vec<&str> {
        store.visible().map(|r| r["name"].as_str().unwrap()).collect()
    }

    #[test]
    fn unfiltered_store_shows_everything() {
        let s = store();
        assert!(!s.is_filtered());
        assert_eq!(s.count(), 3);
        assert_eq!(names(&s).len(), 3);
    }

    #[test]
    fn filter_keeps_order_and_clear_restores() {
        let mut s = store();
        s.apply_filter(|r| Ok(r["name"].as_str().unwrap().contains(", ")));
        assert_eq!(s.count(), 3);

        s.apply_filter(|r| Ok(!r["name"].as_str().unwrap().starts_with("Abi")));
        assert_eq!(names(&s), vec!["Aberdeen, SD", "Adak Island, AK"]);

        s.clear_filter();
        assert_eq!(s.count(), 3);
    }

    #[test]
    fn predicate_errors_degrade_to_non_matching() {
        let mut s = store();
        s.apply_filter(|r| {
            if r["name"] == "Abilene, TX" {
                Err(MatchError::matcher("boom"))
            } else {
                Ok(true)
            }
        });
        assert_eq!(names(&s), vec!["Aberdeen, SD", "Adak Island, AK"]);
    }

    /// The view is reachable through the trait alone, and agrees with `count`.
    #[test]
    fn visible_through_trait_matches_count() {
        fn view_len<S: RecordStore>(store: &S) -> usize {
            store.visible().count()
        }
        let mut s = store();
        s.apply_filter(|r| Ok(r["name"].as_str().unwrap().ends_with("AK")));
        assert_eq!(view_len(&s), s.count());
        assert_eq!(names(&s), vec!["Adak Island, AK"]);
        s.clear_filter();
        assert_eq!(view_len(&s), 3);
    }

    #[test]
    fn pushed_records_wait_for_next_filter() {
        let mut s = store();
        s.apply_filter(|_| Ok(false));
        s.push(json!({ "name": "Akiak, AK" }));
        assert_eq!(s.count(), 0);
        s.apply_filter(|_| Ok(true));
        assert_eq!(s.count(), 4);
    }
}
