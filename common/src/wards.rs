//! Ward list reducer.
//!
//! Holds the variable-length list of dependents edited by the form. Every row
//! carries a stable [`WardId`] so that UI state and validation errors follow
//! the row, not its position, when earlier rows are removed.

use std::fmt;

use log::debug;
use uuid::Uuid;

use crate::model::registration::WardField;

/// Stable identity of a ward row for the lifetime of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WardId(Uuid);

impl WardId {
    fn new() -> Self {
        WardId(Uuid::new_v4())
    }
}

impl fmt::Display for WardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raw values of one ward row. `relationship` is `""` until selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WardDraft {
    pub name: String,
    pub relationship: String,
}

impl WardDraft {
    pub fn field(&self, field: WardField) -> &str {
        match field {
            WardField::Name => &self.name,
            WardField::Relationship => &self.relationship,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WardRow {
    pub id: WardId,
    pub entry: WardDraft,
}

/// Refused list operations. None of them modifies the list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WardListError {
    #[error("no ward at index {index}, the list has {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("no ward with id {0}")]
    UnknownId(WardId),
    #[error("at least {min} ward must remain")]
    LastEntryGuarded { min: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WardList {
    rows: Vec<WardRow>,
}

impl WardList {
    /// Rows that can never be removed through [`WardList::remove`].
    pub const MIN_ENTRIES: usize = 1;

    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// A list holding one blank ward.
    pub fn seeded() -> Self {
        let mut list = Self::new();
        list.append(WardDraft::default());
        list
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WardRow> {
        self.rows.iter()
    }

    pub fn get(&self, index: usize) -> Option<&WardRow> {
        self.rows.get(index)
    }

    pub fn position(&self, id: WardId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    /// Whether the remove control of a row should be enabled.
    pub fn can_remove(&self) -> bool {
        self.rows.len() > Self::MIN_ENTRIES
    }

    /// Adds `entry` at the end and returns its id.
    pub fn append(&mut self, entry: WardDraft) -> WardId {
        let id = WardId::new();
        self.rows.push(WardRow { id, entry });
        id
    }

    /// Removes the row at `index`; later rows shift down by one.
    pub fn remove(&mut self, index: usize) -> Result<WardDraft, WardListError> {
        if index >= self.rows.len() {
            return Err(WardListError::OutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        if !self.can_remove() {
            debug!("refusing to remove ward {index}, it is the last one");
            return Err(WardListError::LastEntryGuarded {
                min: Self::MIN_ENTRIES,
            });
        }
        Ok(self.rows.remove(index).entry)
    }

    pub fn remove_by_id(&mut self, id: WardId) -> Result<WardDraft, WardListError> {
        let index = self.position(id).ok_or(WardListError::UnknownId(id))?;
        self.remove(index)
    }

    /// Replaces one field of a row and reports whether the value changed.
    pub fn update(
        &mut self,
        id: WardId,
        field: WardField,
        value: String,
    ) -> Result<bool, WardListError> {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(WardListError::UnknownId(id))?;
        let slot = match field {
            WardField::Name => &mut row.entry.name,
            WardField::Relationship => &mut row.entry.relationship,
        };
        if *slot == value {
            return Ok(false);
        }
        *slot = value;
        Ok(true)
    }
}
