//! In-memory fakes shared by the unit tests.
use std::sync::Mutex;

use async_trait::async_trait;
use parking_common::{BookingRequest, NewSlot, Report, Slot, Transaction};
use reqwest::StatusCode;

use crate::api::{ApiError, ParkingApi};
use crate::dispatch::Confirm;
use crate::render::{BookingView, DashboardView};
use crate::surface::{AdminSurface, BookingSurface, Notice, SubmitControl};

#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Status(u16, &'static str),
    Network,
}

impl<T: Clone> Reply<T> {
    fn to_result(&self, endpoint: &str) -> Result<T, ApiError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Status(code, body) => Err(ApiError::Application {
                endpoint: endpoint.to_string(),
                status: StatusCode::from_u16(*code).unwrap(),
                body: body.to_string(),
            }),
            Reply::Network => Err(network_error(endpoint)),
        }
    }
}

/// A real `reqwest::Error`, produced without touching the network.
pub fn network_error(endpoint: &str) -> ApiError {
    let source = reqwest::Client::new()
        .get("not a url")
        .build()
        .unwrap_err();
    ApiError::Transport {
        endpoint: endpoint.to_string(),
        source,
    }
}

pub struct FakeApi {
    pub status: Mutex<Reply<Vec<Slot>>>,
    pub report: Mutex<Reply<Report>>,
    pub transactions: Mutex<Reply<Vec<Transaction>>>,
    pub mutation: Mutex<Reply<String>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new(slots: Vec<Slot>) -> Self {
        let report = Report {
            total_slots: slots.len() as u64,
            available_slots: slots.iter().filter(|s| !s.occupied).count() as u64,
            real_revenue: 0.0,
            occupied_slots: Vec::new(),
        };
        Self {
            status: Mutex::new(Reply::Ok(slots)),
            report: Mutex::new(Reply::Ok(report)),
            transactions: Mutex::new(Reply::Ok(Vec::new())),
            mutation: Mutex::new(Reply::Ok(String::new())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_status(&self, reply: Reply<Vec<Slot>>) {
        *self.status.lock().unwrap() = reply;
    }

    pub fn set_report(&self, reply: Reply<Report>) {
        *self.report.lock().unwrap() = reply;
    }

    pub fn set_transactions(&self, reply: Reply<Vec<Transaction>>) {
        *self.transactions.lock().unwrap() = reply;
    }

    pub fn set_mutation(&self, reply: Reply<String>) {
        *self.mutation.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ParkingApi for FakeApi {
    async fn fetch_status(&self) -> Result<Vec<Slot>, ApiError> {
        self.record("GET status".to_string());
        self.status.lock().unwrap().to_result("status")
    }

    async fn fetch_report(&self) -> Result<Report, ApiError> {
        self.record("GET admin/report".to_string());
        self.report.lock().unwrap().to_result("admin/report")
    }

    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.record("GET admin/transactions".to_string());
        self.transactions.lock().unwrap().to_result("admin/transactions")
    }

    async fn create_slot(&self, slot: &NewSlot) -> Result<String, ApiError> {
        self.record(format!("POST admin/slots {} {}", slot.slot_id, slot.current_price));
        self.mutation.lock().unwrap().to_result("admin/slots")
    }

    async fn remove_slot(&self, slot_id: &str) -> Result<String, ApiError> {
        self.record(format!("DELETE admin/slots/{}", slot_id));
        self.mutation.lock().unwrap().to_result("admin/slots")
    }

    async fn release_slot(&self, slot_id: &str) -> Result<String, ApiError> {
        self.record(format!("PUT admin/release/{}", slot_id));
        self.mutation.lock().unwrap().to_result("admin/release")
    }

    async fn book_slot(&self, slot_id: &str, request: &BookingRequest) -> Result<String, ApiError> {
        self.record(format!(
            "POST book/{} {} {} {}",
            slot_id, request.vehicle_plate, request.mobile_number, request.duration_hours
        ));
        self.mutation.lock().unwrap().to_result("book")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Slots(BookingView),
    GridError(String),
    BookingNotice(Option<Notice>),
    Submit(SubmitControl),
    Navigate(String),
    Dashboard(DashboardView),
    DashboardError(String),
    FormNotice(Option<Notice>),
    Alert(String),
    ResetForm,
}

#[derive(Default)]
pub struct RecordingSurface {
    pub events: Mutex<Vec<Event>>,
}

impl RecordingSurface {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl BookingSurface for RecordingSurface {
    fn show_slots(&self, view: &BookingView) {
        self.push(Event::Slots(view.clone()));
    }

    fn show_grid_error(&self, message: &str) {
        self.push(Event::GridError(message.to_string()));
    }

    fn show_booking_notice(&self, notice: Option<&Notice>) {
        self.push(Event::BookingNotice(notice.cloned()));
    }

    fn set_submit_control(&self, control: SubmitControl) {
        self.push(Event::Submit(control));
    }

    fn navigate(&self, url: &str) {
        self.push(Event::Navigate(url.to_string()));
    }
}

impl AdminSurface for RecordingSurface {
    fn show_dashboard(&self, view: &DashboardView) {
        self.push(Event::Dashboard(view.clone()));
    }

    fn show_dashboard_error(&self, message: &str) {
        self.push(Event::DashboardError(message.to_string()));
    }

    fn show_form_notice(&self, notice: Option<&Notice>) {
        self.push(Event::FormNotice(notice.cloned()));
    }

    fn alert(&self, text: &str) {
        self.push(Event::Alert(text.to_string()));
    }

    fn reset_slot_form(&self) {
        self.push(Event::ResetForm);
    }
}

/// Answers every confirmation the same way and remembers the prompts.
pub struct Answer {
    pub yes: bool,
    pub prompts: Vec<String>,
}

impl Answer {
    pub fn yes() -> Self {
        Self { yes: true, prompts: Vec::new() }
    }

    pub fn no() -> Self {
        Self { yes: false, prompts: Vec::new() }
    }
}

#[async_trait]
impl Confirm for Answer {
    async fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.yes
    }
}
