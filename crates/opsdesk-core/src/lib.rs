//! opsdesk-core - list and form logic for the game-operations admin backend
//!
//! Every admin page is the same pattern: fetch a filtered page of records,
//! show it, and mutate records through a form. This crate implements that
//! pattern once, generic over a [`Resource`], with no network code of its
//! own. Transports implement [`ResourceClient`].
//!
//! # Example
//!
//! ```no_run
//! use opsdesk_core::controller::{Reconcile, ResourcePage};
//! use opsdesk_core::resources::Admins;
//! use opsdesk_core::ResourceClient;
//!
//! # async fn example<C: ResourceClient<Admins>>(client: C) {
//! let mut page = ResourcePage::<Admins, _>::new(client, Reconcile::Optimistic);
//! page.list_mut().set_filter("search", "lee").unwrap();
//! page.load().await;
//!
//! for admin in &page.list().snapshot().items {
//!     println!("{}: {}", admin.id, admin.username);
//! }
//!
//! if page.delete(&5).await.is_ok() {
//!     println!("{} left", page.list().snapshot().total);
//! }
//! # }
//! ```

pub mod auth;
pub mod controller;
pub mod error;
pub mod resource;
pub mod resources;
pub mod traits;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{
    AccessToken, Credentials, MemorySession, PasswordChange, SessionProvider, SessionStore,
};
pub use controller::{Feedback, FormController, ListController, Reconcile, ResourcePage};
pub use error::Error;
pub use resource::{
    FormMode, ListPage, ListSnapshot, Mutation, QueryState, Resource, ResourceDescriptor,
};
pub use traits::ResourceClient;
pub use types::{ApiUrl, Timestamp};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
