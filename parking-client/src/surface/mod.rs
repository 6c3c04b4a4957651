//! Presentation adapters.
//!
//! Pollers and dispatchers only ever talk to these traits, so the terminal
//! binding in [`terminal`] can be swapped for any other substrate.

pub mod terminal;

pub use terminal::TerminalSurface;

use crate::render::{BookingView, DashboardView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// A short status line shown next to a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }
}

/// State of the booking form's submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: &'static str,
}

impl SubmitControl {
    pub const READY: SubmitControl = SubmitControl {
        enabled: true,
        label: "Reserve & Proceed to Payment",
    };
    pub const BUSY: SubmitControl = SubmitControl {
        enabled: false,
        label: "Initiating Payment...",
    };
}

pub trait BookingSurface: Send + Sync {
    /// Replace the slot grid.
    fn show_slots(&self, view: &BookingView);
    /// Replace the slot grid with a connectivity notice.
    fn show_grid_error(&self, message: &str);
    /// Set or clear (`None`) the booking message.
    fn show_booking_notice(&self, notice: Option<&Notice>);
    fn set_submit_control(&self, control: SubmitControl);
    /// Leave the page for `url`.
    fn navigate(&self, url: &str);
}

pub trait AdminSurface: Send + Sync {
    /// Replace metrics, slot list and transaction table.
    fn show_dashboard(&self, view: &DashboardView);
    /// Replace the slot list with a connectivity notice.
    fn show_dashboard_error(&self, message: &str);
    /// Set or clear (`None`) the slot form message.
    fn show_form_notice(&self, notice: Option<&Notice>);
    /// Modal message after a remove/release.
    fn alert(&self, text: &str);
    fn reset_slot_form(&self);
}
