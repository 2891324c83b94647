//! In-memory draft properties
//!
//! New listings land here with a locally assigned id. Nothing in this
//! store touches PostgreSQL, so drafts never appear in search results
//! until published through some other path.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::NewProperty;

/// A draft listing with its locally assigned id.
#[derive(Debug, Clone, Serialize)]
pub struct DraftProperty {
    pub id: i64,
    #[serde(flatten)]
    pub property: NewProperty,
}

/// Draft store keyed by assigned id.
///
/// Ids are sequential from 1 in insertion order, independent of the
/// relational store's own sequences. Mutation goes through `&mut self`,
/// so sharing is decided by the embedding application.
#[derive(Debug, Default)]
pub struct DraftPropertyStore {
    drafts: HashMap<i64, DraftProperty>,
}

impl DraftPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a draft under the next sequential id and return it.
    pub fn add(&mut self, property: NewProperty) -> DraftProperty {
        let id = self.drafts.len() as i64 + 1;
        let draft = DraftProperty { id, property };
        self.drafts.insert(id, draft.clone());
        draft
    }

    pub fn get(&self, id: i64) -> Option<&DraftProperty> {
        self.drafts.get(&id)
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}
