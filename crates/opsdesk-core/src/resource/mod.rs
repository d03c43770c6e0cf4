//! The resource model.
//!
//! A [`Resource`] ties together a record type, the draft its forms edit,
//! and a static [`ResourceDescriptor`]. Controllers and clients are generic
//! over it, so every admin page runs the same list and form logic.

mod descriptor;
mod page;
mod query;

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, InvalidInputError, ValidationErrors};

pub use descriptor::{
    CreateSpec, DeleteSpec, HttpVerb, IdPlacement, InsertPosition, ListShape, OnFetchError,
    Operation, ResourceDescriptor, StatusRoute, StatusSpec, UpdateSpec,
};
pub use page::{ListPage, ListSnapshot};
pub use query::{FilterKind, FilterScope, FilterSpec, FilterValue, QueryState};

/// Identifier types records are keyed by.
pub trait ResourceId:
    Clone
    + PartialEq
    + fmt::Debug
    + fmt::Display
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Parse an identifier typed by the user.
    fn parse(s: &str) -> Result<Self, Error>;
}

impl ResourceId for i64 {
    fn parse(s: &str) -> Result<Self, Error> {
        s.trim().parse().map_err(|_| {
            InvalidInputError::Other {
                message: format!("invalid id '{}': expected an integer", s),
            }
            .into()
        })
    }
}

impl ResourceId for String {
    fn parse(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        if s.is_empty() {
            return Err(InvalidInputError::Other {
                message: "id must not be empty".to_string(),
            }
            .into());
        }
        Ok(s.to_string())
    }
}

/// Whether a form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// One backend entity type.
pub trait Resource: fmt::Debug + Send + Sync + 'static {
    type Id: ResourceId;
    /// A record as listed by the server.
    type Record: Clone
        + fmt::Debug
        + PartialEq
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;
    /// The editable fields of a record; also the create/update payload.
    type Draft: Clone
        + fmt::Debug
        + PartialEq
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;
    /// The value a status toggle sets. `()` for resources without one.
    type Status: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

    const DESCRIPTOR: ResourceDescriptor;

    fn id(record: &Self::Record) -> Self::Id;

    /// Draft a create form starts from.
    fn default_draft() -> Self::Draft;

    /// Draft an edit form starts from.
    fn draft_from(record: &Self::Record) -> Self::Draft;

    /// Field-level validation run before any network call.
    fn validate(draft: &Self::Draft, mode: FormMode) -> Result<(), ValidationErrors>;

    /// Copy the draft's fields onto a record, field for field.
    ///
    /// Server-computed fields are left untouched. Applying
    /// `draft_from(r)` to `r` must leave it unchanged.
    fn apply_draft(record: &mut Self::Record, draft: &Self::Draft);

    /// Write a new status onto a record.
    fn set_status(record: &mut Self::Record, status: &Self::Status) {
        let _ = (record, status);
    }
}

/// A committed write, as reported by a successful mutation.
#[derive(Debug)]
pub enum Mutation<R: Resource> {
    Created(R::Record),
    Updated {
        id: R::Id,
        /// The payload that was sent.
        draft: R::Draft,
        /// The record echoed by the server, when it sends one.
        record: Option<R::Record>,
    },
    Deleted(R::Id),
    StatusChanged { id: R::Id, status: R::Status },
}

impl<R: Resource> Mutation<R> {
    pub fn operation(&self) -> Operation {
        match self {
            Mutation::Created(_) => Operation::Create,
            Mutation::Updated { .. } => Operation::Update,
            Mutation::Deleted(_) => Operation::Delete,
            Mutation::StatusChanged { .. } => Operation::SetStatus,
        }
    }
}

impl<R: Resource> Clone for Mutation<R> {
    fn clone(&self) -> Self {
        match self {
            Mutation::Created(r) => Mutation::Created(r.clone()),
            Mutation::Updated { id, draft, record } => Mutation::Updated {
                id: id.clone(),
                draft: draft.clone(),
                record: record.clone(),
            },
            Mutation::Deleted(id) => Mutation::Deleted(id.clone()),
            Mutation::StatusChanged { id, status } => Mutation::StatusChanged {
                id: id.clone(),
                status: status.clone(),
            },
        }
    }
}
