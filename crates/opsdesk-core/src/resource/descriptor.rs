//! Static per-resource metadata.

use crate::error::{Error, InvalidInputError};

use super::query::FilterSpec;

/// HTTP verbs used by the backend's resource endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Delete => "DELETE",
        }
    }
}

/// Where a request carries the record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPlacement {
    /// `?<id_field>=<id>`
    Query,
    /// Inside the JSON body under `<id_field>`.
    Body,
}

/// Shape of the `data` member of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    /// Server-paginated object; records live under `items_key`.
    Paged { items_key: &'static str },
    /// Bare array of every record; paginated in memory.
    Unpaged,
    /// Object holding every record under `items_key`; paginated in memory.
    Wrapped { items_key: &'static str },
}

impl ListShape {
    /// Whether a response holds every record rather than one page.
    pub fn is_whole_set(&self) -> bool {
        !matches!(self, ListShape::Paged { .. })
    }
}

/// Where an optimistically created record is placed on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Prepend,
    Append,
}

/// What the list keeps after a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFetchError {
    KeepLast,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateSpec {
    /// Endpoint when it differs from the resource path.
    pub path: Option<&'static str>,
    /// Envelope codes that count as success. Always includes 200.
    pub codes: &'static [i64],
    pub position: InsertPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateSpec {
    pub verb: HttpVerb,
    pub id: IdPlacement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteSpec {
    pub verb: HttpVerb,
    /// Endpoint when it differs from the resource path.
    pub path: Option<&'static str>,
    pub id: IdPlacement,
}

/// Route of a status-toggle call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusRoute {
    /// A dedicated path, e.g. `/activity-status`.
    Path(&'static str),
    /// The resource path with `?<flag>=true`.
    Flag(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSpec {
    pub route: StatusRoute,
    pub verb: HttpVerb,
    pub id: IdPlacement,
    /// Body member carrying the new status.
    pub field: &'static str,
}

/// Operations a resource may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
    SetStatus,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::SetStatus => "status toggle",
        }
    }
}

/// Static metadata for one entity type, defined once per resource.
#[derive(Debug, Clone, Copy)]
pub struct ResourceDescriptor {
    /// Short name used in logs and on the command line.
    pub name: &'static str,
    /// Endpoint path below the `/api` prefix.
    pub path: &'static str,
    /// Name of the identifier member in records and request bodies.
    pub id_field: &'static str,
    pub list: ListShape,
    /// Query parameter carrying the page size (`pageSize` or `limit`).
    pub page_size_param: &'static str,
    pub default_page_size: u32,
    /// Detail endpoint path; the id goes in the query string.
    pub get: Option<&'static str>,
    pub create: Option<CreateSpec>,
    pub update: Option<UpdateSpec>,
    pub delete: Option<DeleteSpec>,
    pub status: Option<StatusSpec>,
    /// Recognized filter keys. Anything else is rejected.
    pub filters: &'static [FilterSpec],
    /// A 403 from this resource means "insufficient permission" and is
    /// presented as such rather than as a generic failure.
    pub permission_gated: bool,
    pub on_fetch_error: OnFetchError,
}

impl ResourceDescriptor {
    pub fn supports(&self, op: Operation) -> bool {
        match op {
            Operation::List => true,
            Operation::Get => self.get.is_some(),
            Operation::Create => self.create.is_some(),
            Operation::Update => self.update.is_some(),
            Operation::Delete => self.delete.is_some(),
            Operation::SetStatus => self.status.is_some(),
        }
    }

    /// `Ok(())` if `op` is supported, otherwise an `Unsupported` error.
    pub fn require(&self, op: Operation) -> Result<(), Error> {
        if self.supports(op) {
            Ok(())
        } else {
            Err(InvalidInputError::Unsupported {
                resource: self.name,
                operation: op.as_str(),
            }
            .into())
        }
    }

    pub fn filter(&self, key: &str) -> Option<&'static FilterSpec> {
        self.filters.iter().find(|f| f.key == key)
    }

    /// Envelope codes accepted as success for a create call.
    pub fn create_codes(&self) -> &'static [i64] {
        self.create.map(|c| c.codes).unwrap_or(&[200])
    }

    /// Endpoint of a create call.
    pub fn create_path(&self) -> &'static str {
        self.create.and_then(|c| c.path).unwrap_or(self.path)
    }

    /// Endpoint of a delete call.
    pub fn delete_path(&self) -> &'static str {
        self.delete.and_then(|d| d.path).unwrap_or(self.path)
    }
}
