//! One list and one form composed into a resource page.

use tracing::{debug, instrument};

use crate::resource::{Mutation, Operation, Resource};
use crate::traits::ResourceClient;

use super::feedback::Feedback;
use super::form::FormController;
use super::list::{FetchOutcome, ListController};

/// How the list catches up with a committed write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reconcile {
    /// Refetch the current page.
    #[default]
    Refresh,
    /// Patch the snapshot in place. A snapshot that already carries a
    /// patch is refetched instead.
    Optimistic,
}

#[derive(Debug)]
pub struct ResourcePage<R: Resource, C> {
    list: ListController<R, C>,
    form: FormController<R>,
    reconcile: Reconcile,
}

impl<R, C> ResourcePage<R, C>
where
    R: Resource,
    C: ResourceClient<R>,
{
    pub fn new(client: C, reconcile: Reconcile) -> Self {
        Self {
            list: ListController::new(client),
            form: FormController::new(),
            reconcile,
        }
    }

    pub fn list(&self) -> &ListController<R, C> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListController<R, C> {
        &mut self.list
    }

    pub fn form(&self) -> &FormController<R> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormController<R> {
        &mut self.form
    }

    pub fn reconcile(&self) -> Reconcile {
        self.reconcile
    }

    /// Fetch the current page.
    pub async fn load(&mut self) -> FetchOutcome {
        self.list.refresh().await
    }

    /// Open the form on a displayed record.
    pub fn open_edit(&mut self, id: &R::Id) -> Result<(), Feedback> {
        let record = self.list.find(id).ok_or_else(|| {
            Feedback::Notice(format!("{} {} is not on this page", R::DESCRIPTOR.name, id))
        })?;
        self.form.open_edit(record);
        Ok(())
    }

    /// Submit the open form and reconcile the list on success.
    pub async fn submit_form(&mut self) -> Result<Mutation<R>, Feedback> {
        let mutation = self.form.submit(self.list.client()).await?;
        self.settle(&mutation).await;
        Ok(mutation)
    }

    #[instrument(skip(self), fields(resource = R::DESCRIPTOR.name))]
    pub async fn delete(&mut self, id: &R::Id) -> Result<Mutation<R>, Feedback> {
        self.require(Operation::Delete)?;
        self.list
            .client()
            .delete(id)
            .await
            .map_err(|e| Feedback::from_error(&e, &R::DESCRIPTOR))?;

        let mutation = Mutation::Deleted(id.clone());
        self.settle(&mutation).await;
        Ok(mutation)
    }

    #[instrument(skip(self, status), fields(resource = R::DESCRIPTOR.name))]
    pub async fn set_status(
        &mut self,
        id: &R::Id,
        status: R::Status,
    ) -> Result<Mutation<R>, Feedback> {
        self.require(Operation::SetStatus)?;
        self.list
            .client()
            .set_status(id, &status)
            .await
            .map_err(|e| Feedback::from_error(&e, &R::DESCRIPTOR))?;

        let mutation = Mutation::StatusChanged {
            id: id.clone(),
            status,
        };
        self.settle(&mutation).await;
        Ok(mutation)
    }

    fn require(&self, op: Operation) -> Result<(), Feedback> {
        R::DESCRIPTOR
            .require(op)
            .map_err(|e| Feedback::from_error(&e, &R::DESCRIPTOR))
    }

    /// Bring the list in line with a committed write.
    ///
    /// A failed refetch leaves the list `Failed`; the write itself stands.
    async fn settle(&mut self, mutation: &Mutation<R>) {
        match self.reconcile {
            Reconcile::Optimistic if !self.list.snapshot().patched => {
                self.list.apply(mutation);
            }
            Reconcile::Optimistic => {
                debug!(
                    resource = R::DESCRIPTOR.name,
                    "Snapshot already patched; refreshing"
                );
                self.list.refresh().await;
            }
            Reconcile::Refresh => {
                self.list.refresh().await;
            }
        }
    }
}
