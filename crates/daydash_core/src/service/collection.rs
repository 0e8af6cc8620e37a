//! Generic collection manager.
//!
//! # Responsibility
//! - Own one ordered record collection and its store key.
//! - Apply add/update/remove by stable record id and persist every mutation.
//!
//! # Invariants
//! - Insertion order is preserved; `add` always appends.
//! - A mutation is visible in memory only after the full collection has been
//!   written to the store. A failed write leaves both sides unchanged.
//! - Absent or malformed stored data loads as an empty collection.

use crate::model::record::{CollectionRecord, RecordId};
use crate::model::validation::ValidationError;
use crate::repo::kv_store::{KvStore, StoreError};
use log::{debug, info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ManagerResult<T> = Result<T, ManagerError>;

/// Errors returned by collection mutations.
#[derive(Debug)]
pub enum ManagerError {
    /// Draft or patch rejected; nothing was changed.
    Validation(ValidationError),
    /// No record with this id in the collection.
    NotFound(RecordId),
    /// No record id starts with the given prefix.
    UnknownId(String),
    /// More than one record id starts with the given prefix.
    AmbiguousId(String),
    /// Store write failed; nothing was changed.
    Store(StoreError),
    /// Collection could not be serialized.
    Encode(serde_json::Error),
}

impl ManagerError {
    /// Returns the validation failure, if that is what this error is.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for ManagerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::UnknownId(prefix) => write!(f, "no record id starts with `{prefix}`"),
            Self::AmbiguousId(prefix) => {
                write!(f, "more than one record id starts with `{prefix}`")
            }
            Self::Store(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
        }
    }
}

impl Error for ManagerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::NotFound(_) | Self::UnknownId(_) | Self::AmbiguousId(_) => None,
        }
    }
}

impl From<ValidationError> for ManagerError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ManagerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for ManagerError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Owner of one persisted record collection.
pub struct CollectionManager<R: CollectionRecord, S: KvStore> {
    store: S,
    items: Vec<R>,
}

impl<R: CollectionRecord, S: KvStore> CollectionManager<R, S> {
    /// Loads the collection from `store`, or starts empty.
    pub fn load(store: S) -> Self {
        let items = load_items::<R>(&store);
        Self { store, items }
    }

    /// Discards in-memory state and reads the store again.
    pub fn reload(&mut self) {
        self.items = load_items::<R>(&self.store);
    }

    /// Full collection in insertion order, archived/hidden records included.
    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.items.iter().find(|record| record.id() == id)
    }

    /// Lazily filtered view in insertion order.
    pub fn list<'a, F>(&'a self, filter: F) -> impl Iterator<Item = &'a R> + 'a
    where
        F: Fn(&R) -> bool + 'a,
    {
        self.items.iter().filter(move |record| filter(record))
    }

    /// Validates `draft` and appends the new record.
    pub fn add(&mut self, draft: R::Draft) -> ManagerResult<RecordId> {
        let record = R::from_draft(draft).map_err(|err| {
            info!(
                "event=collection_add module=collection status=rejected kind={} field={}",
                R::KIND,
                err.field()
            );
            err
        })?;
        let id = record.id();

        let mut next = self.items.clone();
        next.push(record);
        self.commit(next, "add")?;
        Ok(id)
    }

    /// Applies `patch` to the record with `id` in place.
    ///
    /// The patch must not change the record id.
    pub fn update<F>(&mut self, id: RecordId, patch: F) -> ManagerResult<()>
    where
        F: FnOnce(&mut R),
    {
        self.try_update(id, |record| {
            patch(record);
            Ok(())
        })
    }

    /// Like `update`, but the patch may reject the change.
    pub fn try_update<F>(&mut self, id: RecordId, patch: F) -> ManagerResult<()>
    where
        F: FnOnce(&mut R) -> Result<(), ValidationError>,
    {
        let position = self.position(id)?;
        let mut next = self.items.clone();
        patch(&mut next[position])?;
        self.commit(next, "update")
    }

    /// Hard-removes the record with `id` and returns it.
    pub fn remove(&mut self, id: RecordId) -> ManagerResult<R> {
        let position = self.position(id)?;
        let mut next = self.items.clone();
        let removed = next.remove(position);
        self.commit(next, "remove")?;
        Ok(removed)
    }

    /// Writes the current collection to the store, overwriting the key.
    pub fn persist(&self) -> ManagerResult<()> {
        write_items(&self.store, &self.items)
    }

    /// Finds the single record whose id starts with `prefix`.
    ///
    /// Matching ignores case and the hyphens of the canonical UUID form.
    pub fn resolve_id(&self, prefix: &str) -> ManagerResult<RecordId> {
        let needle = normalize_id_text(prefix);
        if needle.is_empty() {
            return Err(ManagerError::UnknownId(prefix.to_string()));
        }

        let mut matches = self
            .items
            .iter()
            .map(|record| record.id())
            .filter(|id| id.simple().to_string().starts_with(needle.as_str()));

        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(id),
            (Some(_), Some(_)) => Err(ManagerError::AmbiguousId(prefix.to_string())),
            (None, _) => Err(ManagerError::UnknownId(prefix.to_string())),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn position(&self, id: RecordId) -> ManagerResult<usize> {
        self.items
            .iter()
            .position(|record| record.id() == id)
            .ok_or(ManagerError::NotFound(id))
    }

    fn commit(&mut self, next: Vec<R>, operation: &str) -> ManagerResult<()> {
        if let Err(err) = write_items(&self.store, &next) {
            warn!(
                "event=collection_{operation} module=collection status=error kind={} key={} error={err}",
                R::KIND,
                R::STORAGE_KEY
            );
            return Err(err);
        }
        self.items = next;
        info!(
            "event=collection_{operation} module=collection status=ok kind={} items={}",
            R::KIND,
            self.items.len()
        );
        Ok(())
    }
}

fn normalize_id_text(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn write_items<R: CollectionRecord>(store: &impl KvStore, items: &[R]) -> ManagerResult<()> {
    let encoded = serde_json::to_string(items)?;
    store.set(R::STORAGE_KEY, &encoded)?;
    Ok(())
}

fn load_items<R: CollectionRecord>(store: &impl KvStore) -> Vec<R> {
    let raw = match store.get(R::STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(
                "event=collection_load module=collection status=degraded kind={} error_code=store_unavailable error={err}",
                R::KIND
            );
            return Vec::new();
        }
    };

    let (items, assigned_ids) = match decode_items::<R>(&raw) {
        Ok(decoded) => decoded,
        Err(err) => {
            // Only position metadata; serde messages can echo record text.
            warn!(
                "event=collection_load module=collection status=degraded kind={} error_code=malformed_data line={} column={}",
                R::KIND,
                err.line(),
                err.column()
            );
            return Vec::new();
        }
    };

    if assigned_ids {
        if let Err(err) = write_items(store, &items) {
            warn!(
                "event=collection_backfill_ids module=collection status=error kind={} error={err}",
                R::KIND
            );
        }
    }

    debug!(
        "event=collection_load module=collection status=ok kind={} items={} assigned_ids={assigned_ids}",
        R::KIND,
        items.len()
    );
    items
}

/// Decodes a stored collection, reporting whether any record lacked an id.
///
/// A `null` id counts as missing.
fn decode_items<R: CollectionRecord>(raw: &str) -> Result<(Vec<R>, bool), serde_json::Error> {
    let mut values: Vec<Value> = serde_json::from_str(raw)?;
    let mut assigned_ids = false;
    for value in &mut values {
        let Some(fields) = value.as_object_mut() else {
            continue;
        };
        match fields.get("id") {
            None => assigned_ids = true,
            Some(Value::Null) => {
                fields.remove("id");
                assigned_ids = true;
            }
            Some(_) => {}
        }
    }
    let items = values
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<R>, _>>()?;
    Ok((items, assigned_ids))
}
