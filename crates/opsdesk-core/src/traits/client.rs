//! Resource client trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::resource::{ListPage, QueryState, Resource};

/// Typed access to one backend resource.
///
/// Every call is a single request: no retry and no coalescing. Failures
/// come back as [`Error`](crate::Error) carrying the server's message.
#[async_trait]
pub trait ResourceClient<R: Resource>: Send + Sync {
    /// Fetch one page matching the query's server-side filters.
    async fn list(&self, query: &QueryState) -> Result<ListPage<R::Record>>;

    /// Fetch a single record.
    async fn get(&self, id: &R::Id) -> Result<R::Record>;

    /// Create a record from a draft, returning the stored record.
    async fn create(&self, draft: &R::Draft) -> Result<R::Record>;

    /// Update a record. Some resources echo the updated record, some don't.
    async fn update(&self, id: &R::Id, draft: &R::Draft) -> Result<Option<R::Record>>;

    /// Delete a record.
    async fn delete(&self, id: &R::Id) -> Result<()>;

    /// Set a record's status.
    async fn set_status(&self, id: &R::Id, status: &R::Status) -> Result<()>;
}

#[async_trait]
impl<R, C> ResourceClient<R> for Arc<C>
where
    R: Resource,
    C: ResourceClient<R> + ?Sized,
{
    async fn list(&self, query: &QueryState) -> Result<ListPage<R::Record>> {
        (**self).list(query).await
    }

    async fn get(&self, id: &R::Id) -> Result<R::Record> {
        (**self).get(id).await
    }

    async fn create(&self, draft: &R::Draft) -> Result<R::Record> {
        (**self).create(draft).await
    }

    async fn update(&self, id: &R::Id, draft: &R::Draft) -> Result<Option<R::Record>> {
        (**self).update(id, draft).await
    }

    async fn delete(&self, id: &R::Id) -> Result<()> {
        (**self).delete(id).await
    }

    async fn set_status(&self, id: &R::Id, status: &R::Status) -> Result<()> {
        (**self).set_status(id, status).await
    }
}
