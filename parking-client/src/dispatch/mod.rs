//! User actions that mutate server state.
//!
//! Each action validates locally, sends one request, reports the result on
//! its surface and then asks the page's poller for a fresh snapshot.

pub mod admin;
pub mod booking;

pub use admin::{ActionOutcome, AdminDispatcher};
pub use booking::{BookingDispatcher, BookingOutcome, SubmitState};

use async_trait::async_trait;

/// Explicit yes/no from the user before a destructive action.
#[async_trait]
pub trait Confirm: Send {
    async fn confirm(&mut self, prompt: &str) -> bool;
}
