use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single parking space as returned by `GET /status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub slot_id: String,
    #[serde(default)]
    pub occupied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_hourly_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_plate: Option<String>,
}

impl Slot {
    pub fn new(slot_id: impl Into<String>, base_hourly_price: f64) -> Self {
        Self {
            slot_id: slot_id.into(),
            occupied: false,
            base_hourly_price: Some(base_hourly_price),
            current_price: None,
            vehicle_plate: None,
        }
    }

    /// Mark the slot as held by `plate`.
    pub fn occupied_by(mut self, plate: impl Into<String>) -> Self {
        self.occupied = true;
        self.vehicle_plate = Some(plate.into());
        self
    }

    /// Base hourly rate, falling back to the current price when the backend only sends that.
    pub fn base_price(&self) -> f64 {
        self.base_hourly_price
            .or(self.current_price)
            .unwrap_or_default()
    }

    /// Current price, falling back to the base hourly rate.
    pub fn current_price(&self) -> f64 {
        self.current_price
            .or(self.base_hourly_price)
            .unwrap_or_default()
    }
}

/// Aggregate metrics from `GET /admin/report`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default)]
    pub total_slots: u64,
    #[serde(default)]
    pub available_slots: u64,
    #[serde(default)]
    pub real_revenue: f64,
    #[serde(default)]
    pub occupied_slots: Vec<Slot>,
}

/// Payment state of a transaction. The backend owns the set of values, so
/// anything unrecognised is carried through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
    InitiationFailed,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Success => "SUCCESS",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::InitiationFailed => "INITIATION_FAILED",
            PaymentStatus::Other(s) => s,
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PENDING" => PaymentStatus::Pending,
            "SUCCESS" => PaymentStatus::Success,
            "FAILED" => PaymentStatus::Failed,
            "INITIATION_FAILED" => PaymentStatus::InitiationFailed,
            _ => PaymentStatus::Other(s),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Historical booking/payment record from `GET /admin/transactions`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub slot_id: Option<String>,
    #[serde(default)]
    pub vehicle_plate: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub booking_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub amount_paid: Option<f64>,
    #[serde(default)]
    pub duration_hours: Option<u32>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
}

/// Body of `POST /book/{slotId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub vehicle_plate: String,
    pub mobile_number: String,
    pub duration_hours: u32,
}

/// Body of `POST /admin/slots`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSlot {
    pub slot_id: String,
    pub current_price: f64,
}
