//! Pure view models built from fetched snapshots.
//!
//! Nothing here touches a terminal or the network; a surface adapter decides
//! how a view is shown. Every call builds the whole view from scratch.

pub mod admin;
pub mod booking;

pub use admin::{render_dashboard, ActionControl, AdminSnapshot, DashboardView, MetricsView, SlotRow, TransactionRow};
pub use booking::{render_slots, BookingView, SlotCard};

/// Shown in place of the content region when a poll cycle fails.
pub const CONNECTIVITY_ERROR: &str = "Cannot connect to parking backend. Is the server running?";

/// Occupancy of a slot as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    Available,
    Booked,
}

impl Occupancy {
    pub fn of(occupied: bool) -> Self {
        if occupied { Occupancy::Booked } else { Occupancy::Available }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Occupancy::Available => "available",
            Occupancy::Booked => "booked",
        }
    }
}

pub(crate) fn plate_or_na(plate: Option<&str>) -> &str {
    match plate {
        Some(p) if !p.is_empty() => p,
        _ => "N/A",
    }
}
