//! opsdesk-http - REST client for the game-operations backend
//!
//! [`ApiClient`] implements [`ResourceClient`](opsdesk_core::ResourceClient)
//! for every resource in [`opsdesk_core::resources`], plus login, logout and
//! the operations that sit outside the list/form pattern.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use opsdesk_core::resources::Admins;
//! use opsdesk_core::{ApiUrl, Credentials, ListController, MemorySession};
//! use opsdesk_http::ApiClient;
//!
//! # async fn example() -> Result<(), opsdesk_core::Error> {
//! let session = Arc::new(MemorySession::new());
//! let client = ApiClient::new(ApiUrl::new("https://ops.example.com")?, session.clone())?;
//! client.login(&*session, &Credentials::new("operator", "hunter22")).await?;
//!
//! let mut admins = ListController::<Admins, _>::new(client);
//! admins.refresh().await;
//! println!("{} admins", admins.snapshot().total);
//! # Ok(())
//! # }
//! ```

pub mod auth;
mod client;
pub mod envelope;
pub mod ops;
mod rest;

pub use auth::{AdminProfile, Login};
pub use client::ApiClient;
pub use ops::SyncReceipt;
