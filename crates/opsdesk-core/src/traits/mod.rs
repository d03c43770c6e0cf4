//! Core traits.

mod client;

pub use client::ResourceClient;
