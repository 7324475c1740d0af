//! Record storage for harvested suppliers
//!
//! Records are keyed by supplier name. The store is an unordered map; sorting
//! happens once, when the records are read back for export.

mod record;

pub use record::Record;

use std::collections::HashMap;

/// Name-keyed collection of supplier records
///
/// Not synchronized: the crawl writes to it from a single sequential flow.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: HashMap<String, Record>,
}

impl RecordStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record under `name`, replacing any previous record wholesale
    ///
    /// Returns the replaced record, if there was one.
    pub fn upsert(&mut self, name: impl Into<String>, record: Record) -> Option<Record> {
        self.records.insert(name.into(), record)
    }

    /// Looks up a record by name
    pub fn get(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    /// All records, sorted ascending by name
    pub fn all(&self) -> Vec<&Record> {
        let mut entries: Vec<(&String, &Record)> = self.records.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(_, record)| record).collect()
    }

    /// Consumes the store, returning owned records sorted ascending by name
    pub fn into_sorted(self) -> Vec<Record> {
        let mut entries: Vec<(String, Record)> = self.records.into_iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries.into_iter().map(|(_, record)| record).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> Record {
        Record::new(name)
    }

    #[test]
    fn test_upsert_identical_twice_stores_one() {
        let mut store = RecordStore::new();
        let acme = record("Acme Ltd").with_telephone("020 1234 5678");

        store.upsert("Acme Ltd", acme.clone());
        store.upsert("Acme Ltd", acme.clone());

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("Acme Ltd"), Some(&acme));
    }

    #[test]
    fn test_later_upsert_replaces_without_merge() {
        let mut store = RecordStore::new();
        let first = record("Acme Ltd").with_email("sales@acme.example");
        let second = record("Acme Ltd").with_telephone("020 1234 5678");

        store.upsert("Acme Ltd", first.clone());
        let replaced = store.upsert("Acme Ltd", second.clone());

        assert_eq!(replaced, Some(first));
        let stored = store.get("Acme Ltd").unwrap();
        assert_eq!(stored, &second);
        // The email from the first record must not survive
        assert_eq!(stored.contact_email, None);
    }

    #[test]
    fn test_all_is_sorted_for_any_insertion_order() {
        let names = ["Zenith Co", "acme", "Acme Ltd", "Beta", "Acme", "Ωmega"];
        let mut store = RecordStore::new();
        for name in names {
            store.upsert(name, record(name));
        }

        let sorted: Vec<&str> = store.all().iter().map(|r| r.name.as_str()).collect();
        let mut expected: Vec<&str> = names.to_vec();
        expected.sort();

        assert_eq!(sorted, expected);
        assert_eq!(sorted[0], "Acme");
    }

    #[test]
    fn test_into_sorted_matches_all() {
        let mut store = RecordStore::new();
        store.upsert("Zenith Co", record("Zenith Co"));
        store.upsert("Acme Ltd", record("Acme Ltd"));

        let borrowed: Vec<String> = store.all().iter().map(|r| r.name.clone()).collect();
        let owned: Vec<String> = store.into_sorted().into_iter().map(|r| r.name).collect();

        assert_eq!(borrowed, owned);
        assert_eq!(owned, vec!["Acme Ltd", "Zenith Co"]);
    }

    #[test]
    fn test_empty_store() {
        let store = RecordStore::new();
        assert!(store.is_empty());
        assert!(store.all().is_empty());
    }
}
