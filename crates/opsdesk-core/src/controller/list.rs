//! Paginated, filtered collection state for one resource.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, instrument};

use crate::Result;
use crate::error::{Error, InvalidInputError};
use crate::resource::{
    FilterValue, ListPage, ListSnapshot, Mutation, OnFetchError, QueryState, Resource,
};
use crate::traits::ResourceClient;

use super::feedback::Feedback;
use super::merge;

static NEXT_CONTROLLER: AtomicU64 = AtomicU64::new(1);

/// `Idle -> Loading -> {Loaded, Failed}`; any query change or refresh goes
/// back to `Loading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Idle,
    Loading,
    Loaded,
    Failed(Feedback),
}

/// Tags one in-flight fetch with the query it was issued for.
///
/// Only the latest ticket of the controller that issued it is applied.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    owner: u64,
    generation: u64,
    query: QueryState,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The snapshot was replaced.
    Applied,
    /// The fetch failed; the snapshot was kept or cleared per resource.
    Failed(Feedback),
    /// A newer fetch or query change superseded this response.
    Stale,
}

pub struct ListController<R: Resource, C> {
    id: u64,
    client: C,
    query: QueryState,
    snapshot: ListSnapshot<R::Record>,
    state: ListState,
    generation: u64,
    loaded: bool,
    _resource: PhantomData<R>,
}

impl<R, C> ListController<R, C>
where
    R: Resource,
    C: ResourceClient<R>,
{
    pub fn new(client: C) -> Self {
        let query = QueryState::new(&R::DESCRIPTOR);
        Self {
            id: NEXT_CONTROLLER.fetch_add(1, Ordering::Relaxed),
            client,
            snapshot: ListSnapshot::empty(&query),
            query,
            state: ListState::Idle,
            generation: 0,
            loaded: false,
            _resource: PhantomData,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn snapshot(&self) -> &ListSnapshot<R::Record> {
        &self.snapshot
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ListState::Loading
    }

    /// Merge a filter into the query without fetching.
    ///
    /// `raw` is parsed per the filter's declared kind; an empty value
    /// removes the filter whatever its kind. Returns whether the query
    /// changed.
    pub fn set_filter(&mut self, key: &str, raw: &str) -> Result<bool> {
        let spec = R::DESCRIPTOR
            .filter(key)
            .ok_or_else(|| InvalidInputError::UnknownFilter {
                resource: R::DESCRIPTOR.name,
                key: key.to_string(),
            })?;
        if raw.trim().is_empty() {
            return Ok(self.query.remove_filter(spec.key));
        }
        let value = FilterValue::parse(spec, raw)?;
        self.query.set_filter(&R::DESCRIPTOR, key, value)
    }

    /// Reset page, page size and filters to the resource defaults.
    ///
    /// Does not fetch.
    pub fn clear_filters(&mut self) {
        self.query.clear(&R::DESCRIPTOR);
    }

    /// Move to another page and fetch it.
    pub async fn set_page(&mut self, page: u32, page_size: u32) -> FetchOutcome {
        self.query.set_page(page, page_size);
        self.refresh().await
    }

    /// Re-issue the list call for the current query.
    #[instrument(skip(self), fields(resource = R::DESCRIPTOR.name))]
    pub async fn refresh(&mut self) -> FetchOutcome {
        let ticket = self.begin_fetch();
        let result = self.client.list(ticket.query()).await;
        self.finish_fetch(ticket, result)
    }

    /// Start a fetch for the current query.
    ///
    /// Use with [`finish_fetch`](Self::finish_fetch) when the list call runs
    /// outside the controller.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = ListState::Loading;
        debug!(
            resource = R::DESCRIPTOR.name,
            generation = self.generation,
            page = self.query.page(),
            "Fetching list"
        );
        FetchTicket {
            owner: self.id,
            generation: self.generation,
            query: self.query.clone(),
        }
    }

    /// Apply the result of the fetch `ticket` was issued for.
    ///
    /// Responses for superseded tickets are discarded.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<ListPage<R::Record>>,
    ) -> FetchOutcome {
        if ticket.owner != self.id || ticket.generation != self.generation {
            debug!(
                resource = R::DESCRIPTOR.name,
                generation = ticket.generation,
                latest = self.generation,
                "Discarding stale list response"
            );
            return FetchOutcome::Stale;
        }

        if ticket.query != self.query {
            debug!(
                resource = R::DESCRIPTOR.name,
                "Query changed while fetching; discarding response"
            );
            self.state = if self.loaded {
                ListState::Loaded
            } else {
                ListState::Idle
            };
            return FetchOutcome::Stale;
        }

        match result {
            Ok(page) => {
                self.snapshot = ListSnapshot::from_page(&R::DESCRIPTOR, &self.query, page);
                self.state = ListState::Loaded;
                self.loaded = true;
                debug!(
                    resource = R::DESCRIPTOR.name,
                    items = self.snapshot.len(),
                    total = self.snapshot.total,
                    "List loaded"
                );
                FetchOutcome::Applied
            }
            Err(err) => self.fail(&err),
        }
    }

    fn fail(&mut self, err: &Error) -> FetchOutcome {
        let feedback = Feedback::from_error(err, &R::DESCRIPTOR);
        if R::DESCRIPTOR.on_fetch_error == OnFetchError::Clear {
            self.snapshot = ListSnapshot::empty(&self.query);
        }
        debug!(resource = R::DESCRIPTOR.name, error = %err, "List fetch failed");
        self.state = ListState::Failed(feedback.clone());
        FetchOutcome::Failed(feedback)
    }

    /// Patch the snapshot with a committed mutation instead of refetching.
    pub fn apply(&mut self, mutation: &Mutation<R>) {
        let position = R::DESCRIPTOR
            .create
            .map(|c| c.position)
            .unwrap_or(crate::resource::InsertPosition::Prepend);
        merge::apply(&mut self.snapshot, position, mutation);
    }

    /// Find a displayed record by id.
    pub fn find(&self, id: &R::Id) -> Option<&R::Record> {
        self.snapshot.items.iter().find(|r| R::id(r) == *id)
    }
}

impl<R: Resource, C> std::fmt::Debug for ListController<R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("resource", &R::DESCRIPTOR.name)
            .field("query", &self.query)
            .field("state", &self.state)
            .field("items", &self.snapshot.len())
            .field("total", &self.snapshot.total)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{HttpError, TransportError};
    use crate::resource::Operation;
    use crate::resources::{Activities, Admins, RechargeOrders, Roles};
    use crate::testing::{RecordingClient, admins, page_of};
    use std::sync::Arc;

    type Controller<R> = ListController<R, Arc<RecordingClient<R>>>;

    fn controller() -> (Arc<RecordingClient<Admins>>, Controller<Admins>) {
        let client = Arc::new(RecordingClient::<Admins>::new());
        let list = ListController::new(client.clone());
        (client, list)
    }

    #[tokio::test]
    async fn loads_first_page() {
        let (client, mut list) = controller();
        client.push_list(Ok(page_of(admins(1, 10), 23, 1, 10)));

        assert_eq!(list.state(), &ListState::Idle);
        assert_eq!(list.refresh().await, FetchOutcome::Applied);
        assert_eq!(list.state(), &ListState::Loaded);
        assert_eq!(list.snapshot().len(), 10);
        assert_eq!(list.snapshot().total, 23);
        assert_eq!(list.snapshot().total_pages, 3);
        assert_eq!(client.count(Operation::List), 1);
    }

    #[tokio::test]
    async fn set_filter_does_not_fetch_but_set_page_does() {
        let (client, mut list) = controller();

        assert!(list.set_filter("search", "lee").unwrap());
        assert!(!list.set_filter("search", "lee").unwrap());
        assert_eq!(client.count(Operation::List), 0);

        list.set_page(2, 20).await;
        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        let query = calls[0].query.as_ref().unwrap();
        assert_eq!(query.page(), 2);
        assert_eq!(query.page_size(), 20);
        assert!(query.filter("search").is_some());
    }

    #[tokio::test]
    async fn unknown_filter_rejected() {
        let (_client, mut list) = controller();
        let err = list.set_filter("nickname", "x").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::UnknownFilter { .. })
        ));
    }

    #[tokio::test]
    async fn empty_value_drops_a_typed_filter_alone() {
        let client = Arc::new(RecordingClient::<RechargeOrders>::new());
        let mut list: Controller<RechargeOrders> = ListController::new(client);

        list.set_filter("uid", "7").unwrap();
        list.set_filter("status", "SUCCESS").unwrap();
        list.set_page(3, 10).await;

        assert!(list.set_filter("uid", " ").unwrap());
        assert!(list.query().filter("uid").is_none());
        assert!(list.query().filter("status").is_some());
        assert_eq!(list.query().page(), 1);

        assert!(!list.set_filter("uid", "").unwrap());
        assert!(list.set_filter("uid", "abc").is_err());
    }

    #[tokio::test]
    async fn stale_response_is_discarded() {
        let (_client, mut list) = controller();

        let first = list.begin_fetch();
        list.set_filter("search", "lee").unwrap();
        let second = list.begin_fetch();

        let newer = page_of(admins(40, 2), 2, 1, 10);
        assert_eq!(list.finish_fetch(second, Ok(newer)), FetchOutcome::Applied);

        let older = page_of(admins(1, 10), 23, 1, 10);
        assert_eq!(list.finish_fetch(first, Ok(older)), FetchOutcome::Stale);

        assert_eq!(list.snapshot().total, 2);
        assert_eq!(list.snapshot().items[0].id, 40);
        assert_eq!(list.state(), &ListState::Loaded);
    }

    #[tokio::test]
    async fn response_for_changed_query_is_discarded() {
        let (_client, mut list) = controller();

        let ticket = list.begin_fetch();
        list.set_filter("search", "lee").unwrap();
        let outcome = list.finish_fetch(ticket, Ok(page_of(admins(1, 10), 23, 1, 10)));

        assert_eq!(outcome, FetchOutcome::Stale);
        assert!(list.snapshot().is_empty());
        assert_eq!(list.state(), &ListState::Idle);
    }

    #[tokio::test]
    async fn ticket_from_another_controller_is_stale() {
        let (_c1, mut one) = controller();
        let (_c2, mut two) = controller();

        let foreign = one.begin_fetch();
        two.begin_fetch();
        let outcome = two.finish_fetch(foreign, Ok(page_of(admins(1, 1), 1, 1, 10)));
        assert_eq!(outcome, FetchOutcome::Stale);
    }

    #[tokio::test]
    async fn failure_keeps_last_snapshot() {
        let (client, mut list) = controller();
        client.push_list(Ok(page_of(admins(1, 10), 23, 1, 10)));
        client.push_list(Err(TransportError::Timeout.into()));

        list.refresh().await;
        let outcome = list.refresh().await;

        assert_eq!(outcome, FetchOutcome::Failed(Feedback::NetworkError));
        assert_eq!(list.state(), &ListState::Failed(Feedback::NetworkError));
        assert_eq!(list.snapshot().len(), 10);
        assert_eq!(client.count(Operation::List), 2);
    }

    #[tokio::test]
    async fn failure_clears_when_resource_says_so() {
        let client = Arc::new(RecordingClient::<Activities>::new());
        let mut list = ListController::new(client.clone());
        client.push_list(Err(HttpError::new(500, None).into()));

        list.refresh().await;
        assert!(list.snapshot().is_empty());
        assert_eq!(list.snapshot().total, 0);
    }

    #[tokio::test]
    async fn gated_forbidden_surfaces_permission_denied() {
        let client = Arc::new(RecordingClient::<Roles>::new());
        let mut list = ListController::new(client.clone());
        client.push_list(Err(HttpError::new(403, Some("no role access".into())).into()));

        let outcome = list.refresh().await;
        assert_eq!(
            outcome,
            FetchOutcome::Failed(Feedback::PermissionDenied("no role access".into()))
        );
    }

    #[tokio::test]
    async fn clear_filters_restores_defaults() {
        let (client, mut list) = controller();
        list.set_filter("search", "x").unwrap();
        list.set_page(3, 50).await;

        list.clear_filters();
        assert_eq!(list.query(), &QueryState::new(&Admins::DESCRIPTOR));
        assert_eq!(client.count(Operation::List), 1);
    }
}
