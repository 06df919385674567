//! The live registry: one table per entity kind, keyed by id.

use fxhash::FxHashMap;
use hbnb_domain::models::{EntityKind, Model, Record};
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Default)]
pub(crate) struct Registry {
    tables: FxHashMap<EntityKind, FxHashMap<String, Record>>,
}

impl Registry {
    /// Builds a registry from snapshot entries. Keys are rebuilt from the records themselves.
    pub(crate) fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut registry = Self::default();
        for record in records {
            registry.insert(record);
        }
        registry
    }

    /// Inserts or replaces the record with the same `(kind, id)`.
    pub(crate) fn insert(&mut self, record: Record) -> Option<Record> {
        self.tables.entry(record.kind()).or_default().insert(record.id().to_owned(), record)
    }

    pub(crate) fn get(&self, kind: EntityKind, id: &str) -> Option<&Record> {
        self.tables.get(&kind)?.get(id)
    }

    pub(crate) fn remove(&mut self, kind: EntityKind, id: &str) -> Option<Record> {
        self.tables.get_mut(&kind)?.remove(id)
    }

    pub(crate) fn find<T: Model>(&self, id: &str) -> Option<&T> {
        self.get(T::KIND, id).and_then(T::from_record)
    }

    pub(crate) fn find_mut<T: Model>(&mut self, id: &str) -> Option<&mut T> {
        self.tables.get_mut(&T::KIND)?.get_mut(id).and_then(T::from_record_mut)
    }

    pub(crate) fn records(&self, kind: EntityKind) -> impl Iterator<Item = &Record> {
        self.tables.get(&kind).into_iter().flat_map(|table| table.values())
    }

    pub(crate) fn models<T: Model>(&self) -> impl Iterator<Item = &T> {
        self.records(T::KIND).filter_map(T::from_record)
    }

    pub(crate) fn models_mut<T: Model>(&mut self) -> impl Iterator<Item = &mut T> {
        self.tables
            .get_mut(&T::KIND)
            .into_iter()
            .flat_map(|table| table.values_mut())
            .filter_map(T::from_record_mut)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Record> {
        self.tables.values().flat_map(|table| table.values())
    }

    pub(crate) fn len(&self, kind: Option<EntityKind>) -> usize {
        match kind {
            Some(kind) => self.tables.get(&kind).map_or(0, FxHashMap::len),
            None => self.tables.values().map(FxHashMap::len).sum(),
        }
    }

    /// Removes every record that transitively references `(kind, id)`; returns how many went.
    pub(crate) fn remove_dependents(&mut self, kind: EntityKind, id: &str) -> usize {
        let mut pending = vec![(kind, id.to_owned())];
        let mut removed = 0;

        while let Some((owner_kind, owner_id)) = pending.pop() {
            let dependents: Vec<(EntityKind, String)> = self
                .iter()
                .filter(|record| record.owners().contains(&(owner_kind, owner_id.as_str())))
                .map(|record| (record.kind(), record.id().to_owned()))
                .collect();

            for (kind, id) in dependents {
                if self.remove(kind, &id).is_some() {
                    removed += 1;
                    pending.push((kind, id));
                }
            }
        }

        removed
    }
}

/// Serializes as the snapshot document: `{"<Class>.<id>": {..record..}}`, keys sorted.
impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<(String, &Record)> =
            self.iter().map(|record| (record.storage_key(), record)).collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, record) in entries {
            map.serialize_entry(&key, record)?;
        }
        map.end()
    }
}
