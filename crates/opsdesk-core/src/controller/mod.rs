//! Controllers shared by every resource page.
//!
//! [`ListController`] owns the query and the displayed snapshot,
//! [`FormController`] owns one create/edit form, and [`ResourcePage`]
//! composes the two and reconciles the list after each committed write.

mod feedback;
mod form;
mod list;
pub mod merge;
mod page;

pub use feedback::Feedback;
pub use form::{FormController, FormPhase, FormTarget};
pub use list::{FetchOutcome, FetchTicket, ListController, ListState};
pub use page::{Reconcile, ResourcePage};
