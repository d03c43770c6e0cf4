//! In-memory `ResourceClient` double for controller tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::Result;
use crate::error::{Error, InvalidInputError};
use crate::resource::{ListPage, Operation, QueryState, Resource};
use crate::traits::ResourceClient;

/// One recorded call: the operation and the query or payload it carried.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
    pub op: Operation,
    pub query: Option<QueryState>,
    pub body: Option<serde_json::Value>,
}

/// Answers from queues and records every call it receives.
///
/// Writes succeed unless a failure was queued with [`fail_next`].
pub(crate) struct RecordingClient<R: Resource> {
    calls: Mutex<Vec<Call>>,
    lists: Mutex<VecDeque<Result<ListPage<R::Record>>>>,
    created: Mutex<VecDeque<R::Record>>,
    failures: Mutex<VecDeque<Error>>,
}

impl<R: Resource> RecordingClient<R> {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            lists: Mutex::new(VecDeque::new()),
            created: Mutex::new(VecDeque::new()),
            failures: Mutex::new(VecDeque::new()),
        }
    }

    pub fn push_list(&self, page: Result<ListPage<R::Record>>) {
        self.lists.lock().unwrap().push_back(page);
    }

    pub fn push_created(&self, record: R::Record) {
        self.created.lock().unwrap().push_back(record);
    }

    /// The next write fails with `err`.
    pub fn fail_next(&self, err: impl Into<Error>) {
        self.failures.lock().unwrap().push_back(err.into());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, op: Operation) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.op == op).count()
    }

    fn record(&self, op: Operation, query: Option<&QueryState>, body: Option<serde_json::Value>) {
        self.calls.lock().unwrap().push(Call {
            op,
            query: query.cloned(),
            body,
        });
    }

    fn write_result(&self) -> Result<()> {
        match self.failures.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// A page of `items` as the server would report it.
pub(crate) fn page_of<T>(items: Vec<T>, total: u64, page: u32, page_size: u32) -> ListPage<T> {
    ListPage {
        items,
        total,
        page,
        page_size,
        total_pages: None,
    }
}

#[async_trait]
impl<R: Resource> ResourceClient<R> for RecordingClient<R> {
    async fn list(&self, query: &QueryState) -> Result<ListPage<R::Record>> {
        self.record(Operation::List, Some(query), None);
        self.lists.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(page_of(Vec::new(), 0, query.page(), query.page_size()))
        })
    }

    async fn get(&self, _id: &R::Id) -> Result<R::Record> {
        self.record(Operation::Get, None, None);
        Err(InvalidInputError::Unsupported {
            resource: R::DESCRIPTOR.name,
            operation: "get",
        }
        .into())
    }

    async fn create(&self, draft: &R::Draft) -> Result<R::Record> {
        self.record(Operation::Create, None, serde_json::to_value(draft).ok());
        self.write_result()?;
        self.created.lock().unwrap().pop_front().ok_or_else(|| {
            InvalidInputError::Other {
                message: "no created record queued".to_string(),
            }
            .into()
        })
    }

    async fn update(&self, _id: &R::Id, draft: &R::Draft) -> Result<Option<R::Record>> {
        self.record(Operation::Update, None, serde_json::to_value(draft).ok());
        self.write_result().map(|()| None)
    }

    async fn delete(&self, _id: &R::Id) -> Result<()> {
        self.record(Operation::Delete, None, None);
        self.write_result()
    }

    async fn set_status(&self, _id: &R::Id, status: &R::Status) -> Result<()> {
        self.record(Operation::SetStatus, None, serde_json::to_value(status).ok());
        self.write_result()
    }
}

pub(crate) fn admin(id: i64) -> crate::resources::Admin {
    use crate::resources::{AccountStatus, Admin};

    Admin {
        id,
        username: format!("admin{:02}", id),
        name: format!("Admin {}", id),
        role_id: Some(2),
        is_super_admin: false,
        status: AccountStatus::Active,
        created_at: "2025-06-01T00:00:00Z".to_string(),
        last_login_at: None,
        role: None,
    }
}

/// `count` admins with ids starting at `first`.
pub(crate) fn admins(first: i64, count: i64) -> Vec<crate::resources::Admin> {
    (first..first + count).map(admin).collect()
}
