//! Core value types.
//!
//! These types enforce their invariants at construction time.

mod api_url;
mod timestamp;

pub use api_url::ApiUrl;
pub use timestamp::Timestamp;
