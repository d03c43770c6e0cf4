//! [`ResourceClient`] for every resource, driven by its descriptor.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use opsdesk_core::error::{Error, InvalidInputError};
use opsdesk_core::resource::{
    HttpVerb, IdPlacement, ListPage, Operation, QueryState, Resource, StatusRoute,
};
use opsdesk_core::{ResourceClient, Result};

use crate::client::ApiClient;
use crate::envelope::{self, SUCCESS, decode_error};

/// A request under construction: query parameters plus a JSON object body.
#[derive(Debug, Default)]
struct Request {
    query: Vec<(String, String)>,
    body: Map<String, Value>,
}

impl Request {
    /// Start from a serialized draft. Non-object drafts contribute nothing.
    fn with_body<T: Serialize>(payload: &T) -> Result<Self> {
        let body = match serde_json::to_value(payload).map_err(decode_error)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Ok(Self {
            query: Vec::new(),
            body,
        })
    }

    fn place_id<R: Resource>(&mut self, placement: IdPlacement, id: &R::Id) -> Result<()> {
        let field = R::DESCRIPTOR.id_field;
        match placement {
            IdPlacement::Query => self.query.push((field.to_string(), id.to_string())),
            IdPlacement::Body => {
                let id = serde_json::to_value(id).map_err(decode_error)?;
                self.body.insert(field.to_string(), id);
            }
        }
        Ok(())
    }

    fn body(&self) -> Option<Value> {
        if self.body.is_empty() {
            None
        } else {
            Some(Value::Object(self.body.clone()))
        }
    }
}

/// Decode an update echo, or `None` when it is not a whole record.
fn echoed_record<R: Resource>(data: Value) -> Option<R::Record> {
    match serde_json::from_value(data) {
        Ok(record) => Some(record),
        Err(err) => {
            debug!(
                resource = R::DESCRIPTOR.name,
                error = %err,
                "Update echo is not a full record; merging the sent draft"
            );
            None
        }
    }
}

fn unsupported<R: Resource>(op: Operation) -> Error {
    InvalidInputError::Unsupported {
        resource: R::DESCRIPTOR.name,
        operation: op.as_str(),
    }
    .into()
}

#[async_trait]
impl<R: Resource> ResourceClient<R> for ApiClient {
    #[instrument(skip(self, query), fields(resource = R::DESCRIPTOR.name, page = query.page()))]
    async fn list(&self, query: &QueryState) -> Result<ListPage<R::Record>> {
        let descriptor = R::DESCRIPTOR;
        let params = query.server_params(&descriptor);
        let data = self.get_json(descriptor.path, &params).await?;
        let page = envelope::list_page(&descriptor, query, data)?;
        debug!(items = page.items.len(), total = page.total, "Listed records");
        Ok(page)
    }

    #[instrument(skip(self), fields(resource = R::DESCRIPTOR.name))]
    async fn get(&self, id: &R::Id) -> Result<R::Record> {
        let path = R::DESCRIPTOR.get.ok_or_else(|| unsupported::<R>(Operation::Get))?;
        let mut request = Request::default();
        request.place_id::<R>(IdPlacement::Query, id)?;

        let data = self.get_json(path, &request.query).await?;
        envelope::required(data)
    }

    #[instrument(skip(self, draft), fields(resource = R::DESCRIPTOR.name))]
    async fn create(&self, draft: &R::Draft) -> Result<R::Record> {
        let descriptor = R::DESCRIPTOR;
        descriptor.require(Operation::Create)?;

        let data = self
            .call(
                HttpVerb::Post,
                descriptor.create_path(),
                &[],
                Some(draft),
                descriptor.create_codes(),
            )
            .await?;
        envelope::required(data)
    }

    #[instrument(skip(self, draft), fields(resource = R::DESCRIPTOR.name))]
    async fn update(&self, id: &R::Id, draft: &R::Draft) -> Result<Option<R::Record>> {
        let descriptor = R::DESCRIPTOR;
        let spec = descriptor
            .update
            .ok_or_else(|| unsupported::<R>(Operation::Update))?;

        let mut request = Request::with_body(draft)?;
        request.place_id::<R>(spec.id, id)?;

        let data = self
            .call(
                spec.verb,
                descriptor.path,
                &request.query,
                request.body().as_ref(),
                &[SUCCESS],
            )
            .await?;

        // Some endpoints echo the record, some echo a partial or nothing.
        Ok(data.and_then(|d| echoed_record::<R>(d)))
    }

    #[instrument(skip(self), fields(resource = R::DESCRIPTOR.name))]
    async fn delete(&self, id: &R::Id) -> Result<()> {
        let descriptor = R::DESCRIPTOR;
        let spec = descriptor
            .delete
            .ok_or_else(|| unsupported::<R>(Operation::Delete))?;

        let mut request = Request::default();
        request.place_id::<R>(spec.id, id)?;

        self.call(
            spec.verb,
            descriptor.delete_path(),
            &request.query,
            request.body().as_ref(),
            &[SUCCESS],
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self, status), fields(resource = R::DESCRIPTOR.name))]
    async fn set_status(&self, id: &R::Id, status: &R::Status) -> Result<()> {
        let descriptor = R::DESCRIPTOR;
        let spec = descriptor
            .status
            .ok_or_else(|| unsupported::<R>(Operation::SetStatus))?;

        let mut request = Request::default();
        let path = match spec.route {
            StatusRoute::Path(path) => path,
            StatusRoute::Flag(flag) => {
                request.query.push((flag.to_string(), "true".to_string()));
                descriptor.path
            }
        };
        request.place_id::<R>(spec.id, id)?;
        request.body.insert(
            spec.field.to_string(),
            serde_json::to_value(status).map_err(decode_error)?,
        );

        self.call(
            spec.verb,
            path,
            &request.query,
            request.body().as_ref(),
            &[SUCCESS],
        )
        .await?;
        Ok(())
    }
}
