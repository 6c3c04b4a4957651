use std::io::{self, Write};
use std::sync::Mutex;

use super::{AdminSurface, BookingSurface, Notice, NoticeKind, SubmitControl};
use crate::render::{BookingView, DashboardView, Occupancy, SlotRow};

/// Plain-text surface. Every view is written out in full; nothing is patched
/// in place.
pub struct TerminalSurface<W: Write + Send> {
    out: Mutex<W>,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn emit(&self, text: &str) {
        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

fn notice_line(notice: &Notice) -> String {
    let tag = match notice.kind {
        NoticeKind::Info => "info",
        NoticeKind::Success => "ok",
        NoticeKind::Error => "error",
    };
    format!("[{}] {}\n", tag, notice.text)
}

fn format_booking(view: &BookingView) -> String {
    let mut text = format!("==== Parking slots ({}) ====\n", view.availability_label());
    for card in &view.cards {
        text.push_str(&format!(
            "  {:<8} {:<20} {:<10} {}\n",
            card.slot_id,
            card.price_label,
            card.occupancy.as_str(),
            card.hint
        ));
    }
    text
}

fn format_row(row: &SlotRow) -> String {
    let marker = match row.occupancy {
        Occupancy::Booked => '*',
        Occupancy::Available => ' ',
    };
    let mut actions = format!(
        "[{}{}]",
        row.remove.label,
        if row.remove.enabled { "" } else { ": disabled" }
    );
    if let Some(release) = &row.release {
        actions.push_str(&format!(" [{}]", release.label));
    }
    format!(
        " {}ID: {} | Price: {} | Status: {}   {}\n",
        marker, row.slot_id, row.price_label, row.status_label, actions
    )
}

fn format_dashboard(view: &DashboardView) -> String {
    let m = &view.metrics;
    let mut text = String::from("==== System overview ====\n");
    text.push_str(&format!(
        "Total: {}  Available: {}  Occupied: {}  Revenue: {}\n",
        m.total_slots,
        m.available_slots,
        m.occupied_slots,
        m.revenue_label()
    ));

    text.push_str("---- Slot management ----\n");
    for row in &view.rows {
        text.push_str(&format_row(row));
    }

    text.push_str("---- Transactions ----\n");
    if view.transactions.is_empty() {
        text.push_str(&format!("  {}\n", DashboardView::NO_TRANSACTIONS));
    } else {
        text.push_str(&format!(
            "  {:<12} {:<8} {:<12} {:<20} {:<10} {}\n",
            "ID", "Slot", "Plate", "Booked at", "Amount", "Status"
        ));
        for tx in &view.transactions {
            text.push_str(&format!(
                "  {:<12} {:<8} {:<12} {:<20} {:<10} {}\n",
                tx.transaction_id, tx.slot_id, tx.vehicle_plate, tx.booking_time, tx.amount, tx.status
            ));
        }
    }
    text
}

impl<W: Write + Send> BookingSurface for TerminalSurface<W> {
    fn show_slots(&self, view: &BookingView) {
        self.emit(&format_booking(view));
    }

    fn show_grid_error(&self, message: &str) {
        self.emit(&format!("==== Parking slots ====\n[error] {}\n", message));
    }

    fn show_booking_notice(&self, notice: Option<&Notice>) {
        if let Some(notice) = notice {
            self.emit(&notice_line(notice));
        }
    }

    fn set_submit_control(&self, control: SubmitControl) {
        tracing::debug!("Submit control: {} (enabled: {})", control.label, control.enabled);
        if !control.enabled {
            self.emit(&format!("{}\n", control.label));
        }
    }

    fn navigate(&self, url: &str) {
        self.emit(&format!("Continue to payment: {}\n", url));
    }
}

impl<W: Write + Send> AdminSurface for TerminalSurface<W> {
    fn show_dashboard(&self, view: &DashboardView) {
        self.emit(&format_dashboard(view));
    }

    fn show_dashboard_error(&self, message: &str) {
        self.emit(&format!("==== Slot management ====\n[error] {}\n", message));
    }

    fn show_form_notice(&self, notice: Option<&Notice>) {
        if let Some(notice) = notice {
            self.emit(&notice_line(notice));
        }
    }

    fn alert(&self, text: &str) {
        self.emit(&format!("!! {}\n", text));
    }

    fn reset_slot_form(&self) {
        tracing::trace!("Slot form reset");
    }
}
