use crate::domain::value_objects::{EntityId, SameEntityPolicy};
use crate::shared::error::AppError;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, PartialEq)]
pub struct ViewEntry<V> {
    pub value: V,
    /// Mutations started on this entry that have not settled yet.
    pub in_flight: u32,
    /// Bumped on every write to `value`.
    pub revision: u64,
}

impl<V> ViewEntry<V> {
    pub fn is_pending(&self) -> bool {
        self.in_flight > 0
    }
}

/// In-memory view state: the values currently rendered, keyed by entity.
///
/// The lock is only ever held for synchronous sections.
pub struct ViewStore<V> {
    entries: Arc<RwLock<HashMap<EntityId, ViewEntry<V>>>>,
}

impl<V> Clone for ViewStore<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<V> Default for ViewStore<V> {
    fn default() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<V: Clone> ViewStore<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load freshly fetched values. In-flight counters on existing entries are kept.
    pub fn hydrate<I>(&self, values: I)
    where
        I: IntoIterator<Item = (EntityId, V)>,
    {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        for (entity_id, value) in values {
            match entries.get_mut(&entity_id) {
                Some(entry) => {
                    entry.value = value;
                    entry.revision += 1;
                }
                None => {
                    entries.insert(
                        entity_id,
                        ViewEntry {
                            value,
                            in_flight: 0,
                            revision: 0,
                        },
                    );
                }
            }
        }
    }

    pub fn get(&self, entity_id: &EntityId) -> Option<V> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(entity_id).map(|entry| entry.value.clone())
    }

    pub fn entry(&self, entity_id: &EntityId) -> Option<ViewEntry<V>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(entity_id).cloned()
    }

    pub fn is_pending(&self, entity_id: &EntityId) -> bool {
        self.entry(entity_id)
            .map(|entry| entry.is_pending())
            .unwrap_or(false)
    }

    pub fn values(&self) -> HashMap<EntityId, V> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .map(|(id, entry)| (id.clone(), entry.value.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Optimistic write. Under one write lock: read the rendered value, let `build` derive the
    /// next value (plus anything else computed from the same read), store it and mark the entry
    /// pending. Returns `(snapshot, next, extra)`.
    ///
    /// Nothing is written when the entity is missing, when `policy` refuses an overlapping
    /// mutation, or when `build` fails.
    pub fn begin_write<F, R>(
        &self,
        entity_id: &EntityId,
        policy: SameEntityPolicy,
        build: F,
    ) -> Result<(V, V, R), AppError>
    where
        F: FnOnce(&V) -> Result<(V, R), AppError>,
    {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries
            .get_mut(entity_id)
            .ok_or_else(|| AppError::not_found(entity_id))?;

        if entry.is_pending() && policy == SameEntityPolicy::Reject {
            return Err(AppError::in_flight(entity_id));
        }

        let (next_value, extra) = build(&entry.value)?;
        let snapshot = std::mem::replace(&mut entry.value, next_value.clone());
        entry.in_flight += 1;
        entry.revision += 1;
        Ok((snapshot, next_value, extra))
    }

    /// Settlement write. Clears one in-flight mark and, when `restore` is given, writes it back.
    pub fn finish_write(&self, entity_id: &EntityId, restore: Option<V>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let Some(entry) = entries.get_mut(entity_id) else {
            return;
        };
        entry.in_flight = entry.in_flight.saturating_sub(1);
        if let Some(value) = restore {
            entry.value = value;
            entry.revision += 1;
        }
    }
}
