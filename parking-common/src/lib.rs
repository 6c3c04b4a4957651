pub mod types;
pub mod validate;

pub use types::{BookingRequest, NewSlot, PaymentStatus, Report, Slot, Transaction};
pub use validate::{BookingForm, FormError, SlotForm};
