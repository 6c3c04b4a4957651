use std::sync::{Arc, Mutex, MutexGuard};

use parking_common::{BookingForm, FormError};

use crate::api::ParkingApi;
use crate::poller::StatusPoller;
use crate::surface::{BookingSurface, Notice, SubmitControl};

/// Lifecycle of the booking form's submit control.
///
/// `Idle → Submitting → Navigating` on success; `Submitting → Idle` on any
/// failure. `Navigating` is terminal for this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Navigating,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// Control was not idle; nothing sent
    Ignored(SubmitState),
    Invalid(FormError),
    /// Payment redirect URL
    Navigating(String),
    Failed(String),
}

pub struct BookingDispatcher {
    api: Arc<dyn ParkingApi>,
    surface: Arc<dyn BookingSurface>,
    poller: Arc<dyn StatusPoller>,
    state: Mutex<SubmitState>,
}

impl BookingDispatcher {
    pub const REQUESTING: &'static str = "Requesting payment URL from server...";
    pub const REDIRECTING: &'static str = "Redirecting to payment gateway...";
    pub const NETWORK_ERROR: &'static str = "Network error: Could not reach the server.";

    pub fn new(api: Arc<dyn ParkingApi>, surface: Arc<dyn BookingSurface>, poller: Arc<dyn StatusPoller>) -> Self {
        Self {
            api,
            surface,
            poller,
            state: Mutex::new(SubmitState::Idle),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SubmitState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn state(&self) -> SubmitState {
        *self.lock_state()
    }

    fn set_state(&self, next: SubmitState) {
        *self.lock_state() = next;
    }

    /// Reserve a slot and hand the payment URL to the surface.
    pub async fn submit(&self, form: &BookingForm) -> BookingOutcome {
        let (slot_id, request) = {
            let mut state = self.lock_state();
            if *state != SubmitState::Idle {
                tracing::debug!("Booking submit ignored while {:?}", *state);
                return BookingOutcome::Ignored(*state);
            }

            self.surface.show_booking_notice(None);
            match form.validate() {
                Ok(valid) => {
                    *state = SubmitState::Submitting;
                    valid
                }
                Err(e) => {
                    self.surface.show_booking_notice(Some(&Notice::error(e.to_string())));
                    return BookingOutcome::Invalid(e);
                }
            }
        };

        self.surface.set_submit_control(SubmitControl::BUSY);
        self.surface.show_booking_notice(Some(&Notice::info(Self::REQUESTING)));
        tracing::info!(
            "Booking slot {} for {} ({}h)",
            slot_id,
            request.vehicle_plate,
            request.duration_hours
        );

        match self.api.book_slot(&slot_id, &request).await {
            Ok(payment_url) => {
                tracing::info!("Slot {} reserved, redirecting to {}", slot_id, payment_url);
                self.surface.show_booking_notice(Some(&Notice::success(Self::REDIRECTING)));
                self.set_state(SubmitState::Navigating);
                self.surface.navigate(&payment_url);
                BookingOutcome::Navigating(payment_url)
            }
            Err(e) => {
                tracing::warn!("Booking slot {} failed: {}", slot_id, e);
                let message = match e.server_text() {
                    Some(text) => format!("Reservation Failed: {}", text),
                    None => Self::NETWORK_ERROR.to_string(),
                };
                self.surface.show_booking_notice(Some(&Notice::error(message.clone())));
                self.set_state(SubmitState::Idle);
                self.surface.set_submit_control(SubmitControl::READY);
                self.poller.refresh().await;
                BookingOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller::BookingPoller;
    use crate::testing::{Event, FakeApi, RecordingSurface, Reply};
    use parking_common::Slot;

    fn setup() -> (Arc<FakeApi>, Arc<RecordingSurface>, BookingDispatcher) {
        let api = Arc::new(FakeApi::new(vec![Slot::new("A1", 20.0), Slot::new("A2", 20.0)]));
        let surface = Arc::new(RecordingSurface::default());
        let poller = Arc::new(BookingPoller::new(api.clone(), surface.clone(), false));
        let dispatcher = BookingDispatcher::new(api.clone(), surface.clone(), poller);
        (api, surface, dispatcher)
    }

    fn valid_form() -> BookingForm {
        BookingForm {
            slot_id: "a1".to_string(),
            vehicle_plate: "KA01AB1234".to_string(),
            mobile_number: "1234567890".to_string(),
            duration_hours: "2".to_string(),
        }
    }

    #[tokio::test]
    async fn test_success_navigates_without_rearming() {
        let (api, surface, dispatcher) = setup();
        api.set_mutation(Reply::Ok("https://pay.example/abc".to_string()));

        let outcome = dispatcher.submit(&valid_form()).await;
        assert_eq!(outcome, BookingOutcome::Navigating("https://pay.example/abc".to_string()));
        assert_eq!(dispatcher.state(), SubmitState::Navigating);
        assert_eq!(api.calls(), vec!["POST book/A1 KA01AB1234 1234567890 2"]);

        let events = surface.events();
        assert_eq!(
            events,
            vec![
                Event::BookingNotice(None),
                Event::Submit(SubmitControl::BUSY),
                Event::BookingNotice(Some(Notice::info(BookingDispatcher::REQUESTING))),
                Event::BookingNotice(Some(Notice::success(BookingDispatcher::REDIRECTING))),
                Event::Navigate("https://pay.example/abc".to_string()),
            ]
        );
        assert!(!events.contains(&Event::Submit(SubmitControl::READY)));
    }

    #[tokio::test]
    async fn test_navigating_is_terminal() {
        let (api, _surface, dispatcher) = setup();
        api.set_mutation(Reply::Ok("https://pay.example/abc".to_string()));
        dispatcher.submit(&valid_form()).await;

        let outcome = dispatcher.submit(&valid_form()).await;
        assert_eq!(outcome, BookingOutcome::Ignored(SubmitState::Navigating));
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_conflict_rearms_and_refreshes() {
        let (api, surface, dispatcher) = setup();
        api.set_mutation(Reply::Status(409, "Slot already booked"));

        let outcome = dispatcher.submit(&valid_form()).await;
        assert_eq!(outcome, BookingOutcome::Failed("Reservation Failed: Slot already booked".to_string()));
        assert_eq!(dispatcher.state(), SubmitState::Idle);
        assert_eq!(api.calls().last().map(String::as_str), Some("GET status"));

        let events = surface.events();
        let error = Event::BookingNotice(Some(Notice::error("Reservation Failed: Slot already booked")));
        let error_at = events.iter().position(|e| *e == error).unwrap();
        let ready_at = events.iter().position(|e| *e == Event::Submit(SubmitControl::READY)).unwrap();
        let grid_at = events.iter().position(|e| matches!(e, Event::Slots(_))).unwrap();
        assert!(error_at < ready_at);
        assert!(ready_at < grid_at);
        assert!(!events.iter().any(|e| matches!(e, Event::Navigate(_))));
    }

    #[tokio::test]
    async fn test_network_failure_rearms() {
        let (api, surface, dispatcher) = setup();
        api.set_mutation(Reply::Network);

        let outcome = dispatcher.submit(&valid_form()).await;
        assert_eq!(outcome, BookingOutcome::Failed(BookingDispatcher::NETWORK_ERROR.to_string()));
        assert_eq!(dispatcher.state(), SubmitState::Idle);
        assert!(surface.events().contains(&Event::Submit(SubmitControl::READY)));
    }

    #[tokio::test]
    async fn test_invalid_mobile_is_not_sent() {
        let (api, surface, dispatcher) = setup();
        let form = BookingForm { mobile_number: "12345".to_string(), ..valid_form() };

        let outcome = dispatcher.submit(&form).await;
        assert_eq!(outcome, BookingOutcome::Invalid(FormError::InvalidMobileNumber));
        assert_eq!(dispatcher.state(), SubmitState::Idle);
        assert!(api.calls().is_empty());
        assert_eq!(
            surface.events(),
            vec![
                Event::BookingNotice(None),
                Event::BookingNotice(Some(Notice::error("Please enter a valid 10-digit mobile number."))),
            ]
        );
    }
}
