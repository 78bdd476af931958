use std::collections::hash_map::Entry;
use std::fmt::Debug;
use std::hash::Hash;

use fxhash::FxHashMap;
use log::debug;

/// Arena of values derived from scene materials (e.g. per-pass variants of
/// a material), indexed by a stable object id.
///
/// A record gets re-derived when its source material's version changes or
/// when it's explicitly marked as dirty.
#[derive(Debug)]
pub struct DerivedMaterials<K, T> {
    records: FxHashMap<K, DerivedMaterial<T>>,
}

#[derive(Debug)]
struct DerivedMaterial<T> {
    value: T,
    source_version: u64,
    dirty: bool,
}

impl<K, T> DerivedMaterials<K, T>
where
    K: Copy + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self {
            records: Default::default(),
        }
    }

    /// Returns the value derived for given object, deriving it first if
    /// there's none yet, if the source material has changed since, or if
    /// the record has been marked as dirty.
    pub fn get_or_derive(
        &mut self,
        id: K,
        source_version: u64,
        derive: impl FnOnce() -> T,
    ) -> &T {
        match self.records.entry(id) {
            Entry::Occupied(entry) => {
                let record = entry.into_mut();

                if record.dirty || record.source_version != source_version {
                    debug!(
                        "Re-deriving material {id:?}; version={} -> {}",
                        record.source_version, source_version
                    );

                    record.value = derive();
                    record.source_version = source_version;
                    record.dirty = false;
                }

                &record.value
            }

            Entry::Vacant(entry) => {
                debug!("Deriving material {id:?}; version={source_version}");

                &entry
                    .insert(DerivedMaterial {
                        value: derive(),
                        source_version,
                        dirty: false,
                    })
                    .value
            }
        }
    }

    pub fn get(&self, id: K) -> Option<&T> {
        self.records.get(&id).map(|record| &record.value)
    }

    /// Forces given record to be re-derived on its next access; returns
    /// whether there was such record.
    pub fn mark_dirty(&mut self, id: K) -> bool {
        let Some(record) = self.records.get_mut(&id) else {
            return false;
        };

        record.dirty = true;
        true
    }

    pub fn is_dirty(&self, id: K) -> bool {
        self.records.get(&id).map_or(false, |record| record.dirty)
    }

    pub fn remove(&mut self, id: K) -> Option<T> {
        self.records.remove(&id).map(|record| record.value)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<K, T> Default for DerivedMaterials<K, T>
where
    K: Copy + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
