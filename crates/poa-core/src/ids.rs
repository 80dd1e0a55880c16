//! Record identity.
//!
//! The backend is MongoDB-shaped: records come back keyed by `_id`, while
//! request payloads built on the client historically used `id`. Every record
//! flattens a [`RecordKey`] holding both, and [`normalize_id`] makes them
//! agree so callers can read either one.

use serde::{Deserialize, Serialize};

use crate::reference::{Identify, first_non_empty};

/// The `id` / `_id` pair carried by every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<String>,
}

impl RecordKey {
    /// Key with both fields set to `id`.
    #[must_use]
    pub fn both(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            id: Some(id.clone()),
            mongo_id: Some(id),
        }
    }

    /// Canonical id: `_id`, else `id`, else empty.
    #[must_use]
    pub fn resolve(&self) -> &str {
        self.mongo_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.id.as_deref().filter(|id| !id.is_empty()))
            .unwrap_or("")
    }

    #[must_use]
    pub fn normalized(&self) -> Self {
        let resolved = first_non_empty(self.mongo_id.clone(), self.id.clone()).unwrap_or_default();
        Self::both(resolved)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolve().is_empty()
    }
}

impl Identify for RecordKey {
    fn identity(&self) -> &str {
        self.resolve()
    }
}

/// A record fetched from the API.
pub trait Record {
    fn key(&self) -> &RecordKey;
    fn key_mut(&mut self) -> &mut RecordKey;

    /// Normalize keys of embedded records (e.g. a plan's activities).
    fn normalize_nested(&mut self) {}

    /// Canonical id of this record.
    fn record_id(&self) -> &str {
        self.key().resolve()
    }
}

/// Copy of `record` with `id` and `_id` populated and equal.
///
/// Idempotent: normalizing twice yields the same record.
#[must_use]
pub fn normalize_id<R: Record>(mut record: R) -> R {
    let key = record.key().normalized();
    *record.key_mut() = key;
    record.normalize_nested();
    record
}

#[must_use]
pub fn normalize_all<R: Record>(records: Vec<R>) -> Vec<R> {
    records.into_iter().map(normalize_id).collect()
}

/// Implements [`Record`] and [`Identify`] for a struct with a `key` field.
#[macro_export]
macro_rules! impl_record {
    ($ty:ty) => {
        impl $crate::ids::Record for $ty {
            fn key(&self) -> &$crate::ids::RecordKey {
                &self.key
            }

            fn key_mut(&mut self) -> &mut $crate::ids::RecordKey {
                &mut self.key
            }
        }

        impl $crate::reference::Identify for $ty {
            fn identity(&self) -> &str {
                self.key.resolve()
            }
        }
    };
}
