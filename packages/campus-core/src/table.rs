//! Insertion-ordered record table with auto-assigned identifiers.

use crate::error::StoreError;
use crate::model::Record;

/// In-memory table holding records of one resource in insertion order.
///
/// Identifiers start at 1, increment by one per insert, and are never
/// reused after a delete.
#[derive(Debug)]
pub struct Table<R: Record> {
    rows: Vec<R>,
    next_id: u64,
}

impl<R: Record> Table<R> {
    /// Creates an empty table with the given initial capacity.
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(initial_capacity),
            next_id: 1,
        }
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Inserts a new record built from the next identifier.
    ///
    /// The constructor receives the assigned id, so the id is fixed at
    /// creation and the table never exposes a way to change it.
    pub fn insert(&mut self, make: impl FnOnce(u64) -> R) -> &R {
        let id = self.next_id;
        self.next_id += 1;
        let index = self.rows.len();
        self.rows.push(make(id));
        &self.rows[index]
    }

    /// Looks up a record by id.
    pub fn get(&self, id: u64) -> Result<&R, StoreError> {
        self.rows
            .iter()
            .find(|row| row.id() == id)
            .ok_or(StoreError::RecordNotFound {
                resource: R::RESOURCE,
                id,
            })
    }

    /// Looks up a record by id for mutation.
    pub fn get_mut(&mut self, id: u64) -> Result<&mut R, StoreError> {
        self.rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or(StoreError::RecordNotFound {
                resource: R::RESOURCE,
                id,
            })
    }

    /// Removes a record by id, returning it.
    pub fn remove(&mut self, id: u64) -> Result<R, StoreError> {
        let index = self
            .rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or(StoreError::RecordNotFound {
                resource: R::RESOURCE,
                id,
            })?;
        Ok(self.rows.remove(index))
    }

    /// Records matching the predicate, cloned, in insertion order.
    pub fn select(&self, mut predicate: impl FnMut(&R) -> bool) -> Vec<R>
    where
        R: Clone,
    {
        self.rows
            .iter()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }
}
