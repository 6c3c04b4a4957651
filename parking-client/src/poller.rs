//! Status pollers - fetch a snapshot, render it, repeat on a timer
//!
//! A cycle either renders a complete snapshot or replaces the content region
//! with the connectivity notice. Cycles are never serialized against each
//! other: a timer tick and a post-action refresh may run at the same time, and
//! whichever finishes last is what stays on screen (unless `latest_wins` is on).
use async_trait::async_trait;
use futures::future::join3;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::ParkingApi;
use crate::render::{render_dashboard, render_slots, AdminSnapshot, CONNECTIVITY_ERROR};
use crate::surface::{AdminSurface, BookingSurface, Notice};

/// How a single poll cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Rendered,
    Failed,
    /// A newer cycle had already rendered; this result was dropped
    Superseded,
}

#[async_trait]
pub trait StatusPoller: Send + Sync {
    fn name(&self) -> &'static str;

    /// Run one full poll cycle.
    async fn refresh(&self) -> CycleOutcome;
}

/// Optional "latest request wins" ordering between overlapping cycles.
///
/// Tickets are handed out when a cycle starts; a finished cycle may only
/// touch the screen if no later ticket has already done so.
struct CycleGuard {
    enabled: bool,
    issued: AtomicU64,
    shown: AtomicU64,
}

impl CycleGuard {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            issued: AtomicU64::new(0),
            shown: AtomicU64::new(0),
        }
    }

    fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn admit(&self, ticket: u64) -> bool {
        if !self.enabled {
            return true;
        }
        self.shown.fetch_max(ticket, Ordering::SeqCst) < ticket
    }
}

/// Public booking page: one read of `/status` per cycle.
pub struct BookingPoller {
    api: Arc<dyn ParkingApi>,
    surface: Arc<dyn BookingSurface>,
    guard: CycleGuard,
}

impl BookingPoller {
    pub fn new(api: Arc<dyn ParkingApi>, surface: Arc<dyn BookingSurface>, latest_wins: bool) -> Self {
        Self {
            api,
            surface,
            guard: CycleGuard::new(latest_wins),
        }
    }
}

#[async_trait]
impl StatusPoller for BookingPoller {
    fn name(&self) -> &'static str {
        "booking"
    }

    async fn refresh(&self) -> CycleOutcome {
        let ticket = self.guard.begin();
        let result = self.api.fetch_status().await;

        if !self.guard.admit(ticket) {
            tracing::debug!("Booking poll cycle {} superseded", ticket);
            return CycleOutcome::Superseded;
        }

        match result {
            Ok(slots) => {
                let view = render_slots(&slots);
                tracing::debug!("Rendered {} slots ({} available)", view.total, view.available);
                self.surface.show_slots(&view);
                CycleOutcome::Rendered
            }
            Err(e) => {
                tracing::error!("Error fetching parking status: {}", e);
                self.surface.show_grid_error(CONNECTIVITY_ERROR);
                CycleOutcome::Failed
            }
        }
    }
}

/// Admin dashboard: status, report and transactions fetched together.
pub struct AdminPoller {
    api: Arc<dyn ParkingApi>,
    surface: Arc<dyn AdminSurface>,
    guard: CycleGuard,
}

impl AdminPoller {
    pub const LOAD_FAILED: &'static str = "Failed to load admin data.";

    pub fn new(api: Arc<dyn ParkingApi>, surface: Arc<dyn AdminSurface>, latest_wins: bool) -> Self {
        Self {
            api,
            surface,
            guard: CycleGuard::new(latest_wins),
        }
    }
}

#[async_trait]
impl StatusPoller for AdminPoller {
    fn name(&self) -> &'static str {
        "admin"
    }

    async fn refresh(&self) -> CycleOutcome {
        let ticket = self.guard.begin();
        let (slots, report, transactions) = join3(
            self.api.fetch_status(),
            self.api.fetch_report(),
            self.api.fetch_transactions(),
        )
        .await;

        if !self.guard.admit(ticket) {
            tracing::debug!("Admin poll cycle {} superseded", ticket);
            return CycleOutcome::Superseded;
        }

        match (slots, report, transactions) {
            (Ok(slots), Ok(report), Ok(transactions)) => {
                let snapshot = AdminSnapshot { slots, report, transactions };
                let view = render_dashboard(&snapshot);
                if view.metrics.has_drift() {
                    tracing::warn!(
                        "Report says {} slots available, slot list has {}",
                        view.metrics.reported_available,
                        view.metrics.available_slots
                    );
                }
                self.surface.show_dashboard(&view);
                CycleOutcome::Rendered
            }
            (slots, report, transactions) => {
                for err in [slots.err(), report.err(), transactions.err()].into_iter().flatten() {
                    tracing::error!("Error fetching admin data: {}", err);
                }
                self.surface.show_dashboard_error(CONNECTIVITY_ERROR);
                self.surface.show_form_notice(Some(&Notice::error(Self::LOAD_FAILED)));
                CycleOutcome::Failed
            }
        }
    }
}

/// A poller driven by a fixed interval: one cycle right away, then one per tick.
///
/// Each tick's cycle runs as its own task, so a slow response never delays
/// the next tick. `stop` cancels the timer; cycles already in flight finish.
pub struct PollingTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl PollingTask {
    pub fn start(poller: Arc<dyn StatusPoller>, period: Duration) -> Self {
        let name = poller.name();
        tracing::info!("Starting {} poller (interval: {:?})", name, period);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let poller = poller.clone();
                tokio::spawn(async move {
                    let outcome = poller.refresh().await;
                    tracing::trace!("{} poll cycle: {:?}", poller.name(), outcome);
                });
            }
        });

        Self { name, handle }
    }

    pub fn stop(self) {
        tracing::info!("Stopping {} poller", self.name);
        self.handle.abort();
    }
}
