use parking_common::{Report, Slot, Transaction};

use super::{plate_or_na, Occupancy};

/// Everything one admin poll cycle fetched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdminSnapshot {
    pub slots: Vec<Slot>,
    pub report: Report,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsView {
    pub total_slots: u64,
    pub available_slots: usize,
    pub occupied_slots: usize,
    /// What the report claimed; kept only to detect drift
    pub reported_available: u64,
    pub revenue: f64,
}

impl MetricsView {
    pub fn revenue_label(&self) -> String {
        format!("₹{:.2}", self.revenue)
    }

    /// The report's availability disagrees with the slot list.
    pub fn has_drift(&self) -> bool {
        self.reported_available != self.available_slots as u64
    }
}

/// A button on a slot row.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionControl {
    pub label: &'static str,
    pub title: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotRow {
    pub slot_id: String,
    pub price_label: String,
    pub status_label: String,
    pub occupancy: Occupancy,
    pub remove: ActionControl,
    /// Present only while the slot is occupied
    pub release: Option<ActionControl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub transaction_id: String,
    pub slot_id: String,
    pub vehicle_plate: String,
    pub booking_time: String,
    pub amount: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub metrics: MetricsView,
    pub rows: Vec<SlotRow>,
    pub transactions: Vec<TransactionRow>,
}

impl DashboardView {
    pub const NO_TRANSACTIONS: &'static str = "No transactions recorded yet.";
}

fn render_metrics(report: &Report, slots: &[Slot]) -> MetricsView {
    let occupied_slots = slots.iter().filter(|s| s.occupied).count();

    MetricsView {
        total_slots: report.total_slots,
        available_slots: slots.len() - occupied_slots,
        occupied_slots,
        reported_available: report.available_slots,
        revenue: report.real_revenue,
    }
}

fn render_row(slot: &Slot) -> SlotRow {
    let status_label = if slot.occupied {
        format!("Booked (Plate: {})", plate_or_na(slot.vehicle_plate.as_deref()))
    } else {
        "Available".to_string()
    };

    let remove = ActionControl {
        label: "Remove",
        title: if slot.occupied { "Cannot remove occupied slot" } else { "Remove this slot" },
        enabled: !slot.occupied,
    };
    let release = slot.occupied.then_some(ActionControl {
        label: "Release",
        title: "Manually release this occupied slot",
        enabled: true,
    });

    SlotRow {
        slot_id: slot.slot_id.clone(),
        price_label: format!("₹{}", slot.current_price()),
        status_label,
        occupancy: Occupancy::of(slot.occupied),
        remove,
        release,
    }
}

fn non_empty_or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "N/A".to_string(),
    }
}

fn render_transaction(tx: &Transaction) -> TransactionRow {
    let transaction_id = match tx.transaction_id.as_deref() {
        Some(id) if !id.is_empty() => format!("{}...", id.chars().take(8).collect::<String>()),
        _ => "N/A".to_string(),
    };

    TransactionRow {
        transaction_id,
        slot_id: non_empty_or_na(tx.slot_id.as_deref()),
        vehicle_plate: non_empty_or_na(tx.vehicle_plate.as_deref()),
        booking_time: tx
            .booking_time
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        amount: format!("₹{:.2}", tx.amount_paid.unwrap_or_default()),
        status: tx
            .payment_status
            .as_ref()
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("UNKNOWN")
            .to_string(),
    }
}

/// Build the admin dashboard. Slot rows are sorted by identifier on every call;
/// availability and occupancy counts come from the slot list, not the report.
pub fn render_dashboard(snapshot: &AdminSnapshot) -> DashboardView {
    let mut slots: Vec<&Slot> = snapshot.slots.iter().collect();
    slots.sort_by(|a, b| a.slot_id.cmp(&b.slot_id));

    DashboardView {
        metrics: render_metrics(&snapshot.report, &snapshot.slots),
        rows: slots.into_iter().map(render_row).collect(),
        transactions: snapshot.transactions.iter().map(render_transaction).collect(),
    }
}
