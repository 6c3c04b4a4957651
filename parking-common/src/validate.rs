use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::{BookingRequest, NewSlot};

static MOBILE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{10}$").expect("mobile number pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please select a slot, duration, and fill in all details.")]
    MissingBookingDetails,
    #[error("Please enter a valid 10-digit mobile number.")]
    InvalidMobileNumber,
    #[error("Please enter a duration of at most {} hours.", u32::MAX)]
    DurationTooLong,
    #[error("Please enter a valid Slot ID and a positive price.")]
    InvalidSlot,
}

/// Exactly ten ASCII digits, nothing else.
pub fn is_valid_mobile_number(mobile: &str) -> bool {
    MOBILE_NUMBER.is_match(mobile)
}

/// Slot identifiers are compared upper-case by the backend.
pub fn normalize_slot_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Integer prefix of `raw`, the way a browser number field is read:
/// `"3"` and `"3h"` give 3, `""` and `"h3"` give nothing.
///
/// `Some(Err(..))` when the digits do not fit the hour counter.
fn leading_integer(raw: &str) -> Option<Result<u32, FormError>> {
    let trimmed = raw.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    match &digits[..end] {
        "" => None,
        number => Some(number.parse().map_err(|_| FormError::DurationTooLong)),
    }
}

/// Raw booking form input, as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingForm {
    pub slot_id: String,
    pub vehicle_plate: String,
    pub mobile_number: String,
    pub duration_hours: String,
}

impl BookingForm {
    /// Check the form and build the outbound request.
    ///
    /// Returns the normalized slot id alongside the body for `POST /book/{slotId}`.
    /// Plate and mobile number are checked and sent exactly as typed.
    pub fn validate(&self) -> Result<(String, BookingRequest), FormError> {
        let slot_id = normalize_slot_id(&self.slot_id);
        let duration = leading_integer(&self.duration_hours);

        let duration_hours = match duration {
            Some(hours) if !slot_id.is_empty() && !self.vehicle_plate.is_empty() && !self.mobile_number.is_empty() => {
                hours?
            }
            _ => return Err(FormError::MissingBookingDetails),
        };

        if !is_valid_mobile_number(&self.mobile_number) {
            return Err(FormError::InvalidMobileNumber);
        }

        Ok((
            slot_id,
            BookingRequest {
                vehicle_plate: self.vehicle_plate.clone(),
                mobile_number: self.mobile_number.clone(),
                duration_hours,
            },
        ))
    }
}

/// Raw "add slot" form input from the admin console.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotForm {
    pub slot_id: String,
    pub price: String,
}

impl SlotForm {
    pub fn validate(&self) -> Result<NewSlot, FormError> {
        let slot_id = normalize_slot_id(&self.slot_id);
        let price = self.price.trim().parse::<f64>().ok();

        match price {
            Some(current_price) if !slot_id.is_empty() && current_price.is_finite() && current_price > 0.0 => {
                Ok(NewSlot { slot_id, current_price })
            }
            _ => Err(FormError::InvalidSlot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(slot: &str, plate: &str, mobile: &str, hours: &str) -> BookingForm {
        BookingForm {
            slot_id: slot.to_string(),
            vehicle_plate: plate.to_string(),
            mobile_number: mobile.to_string(),
            duration_hours: hours.to_string(),
        }
    }

    #[test]
    fn test_mobile_number_pattern() {
        assert!(is_valid_mobile_number("1234567890"));
        assert!(!is_valid_mobile_number("12345"));
        assert!(!is_valid_mobile_number("12345abcde"));
        assert!(!is_valid_mobile_number(""));
        assert!(!is_valid_mobile_number("12345678901"));
        // Non-ASCII digits are rejected.
        assert!(!is_valid_mobile_number("١٢٣٤٥٦٧٨٩٠"));
    }

    #[test]
    fn test_valid_booking_form() {
        let (slot_id, request) = form("a1", "KA01AB1234", "1234567890", "2").validate().unwrap();
        assert_eq!(slot_id, "A1");
        assert_eq!(request.vehicle_plate, "KA01AB1234");
        assert_eq!(request.mobile_number, "1234567890");
        assert_eq!(request.duration_hours, 2);
    }

    #[test]
    fn test_booking_form_missing_fields() {
        assert_eq!(form("", "KA01", "1234567890", "2").validate(), Err(FormError::MissingBookingDetails));
        assert_eq!(form("A1", "", "1234567890", "2").validate(), Err(FormError::MissingBookingDetails));
        assert_eq!(form("A1", "KA01", "", "2").validate(), Err(FormError::MissingBookingDetails));
        assert_eq!(form("A1", "KA01", "1234567890", "").validate(), Err(FormError::MissingBookingDetails));
        assert_eq!(form("A1", "KA01", "1234567890", "two").validate(), Err(FormError::MissingBookingDetails));
    }

    #[test]
    fn test_booking_form_bad_mobile() {
        assert_eq!(form("A1", "KA01", "12345", "2").validate(), Err(FormError::InvalidMobileNumber));
        assert_eq!(form("A1", "KA01", "12345abcde", "2").validate(), Err(FormError::InvalidMobileNumber));
        assert_eq!(form("A1", "KA01", " 1234567890", "2").validate(), Err(FormError::InvalidMobileNumber));
        assert_eq!(form("A1", "KA01", "1234567890 ", "2").validate(), Err(FormError::InvalidMobileNumber));
    }

    #[test]
    fn test_plate_is_sent_as_typed() {
        let (_, request) = form("A1", " ", "1234567890", "2").validate().unwrap();
        assert_eq!(request.vehicle_plate, " ");
    }

    #[test]
    fn test_duration_too_long() {
        assert_eq!(form("A1", "KA01", "1234567890", "99999999999").validate(), Err(FormError::DurationTooLong));
        assert_eq!(
            FormError::DurationTooLong.to_string(),
            "Please enter a duration of at most 4294967295 hours."
        );

        let (_, request) = form("A1", "KA01", "1234567890", "4294967295").validate().unwrap();
        assert_eq!(request.duration_hours, u32::MAX);
    }

    #[test]
    fn test_duration_reads_leading_digits() {
        assert_eq!(leading_integer("3"), Some(Ok(3)));
        assert_eq!(leading_integer(" 4 hours"), Some(Ok(4)));
        assert_eq!(leading_integer("+5"), Some(Ok(5)));
        assert_eq!(leading_integer("99999999999h"), Some(Err(FormError::DurationTooLong)));
        assert_eq!(leading_integer("h3"), None);
        assert_eq!(leading_integer("-2"), None);
    }

    #[test]
    fn test_slot_form() {
        let slot = SlotForm { slot_id: "c9".to_string(), price: "35.5".to_string() }.validate().unwrap();
        assert_eq!(slot.slot_id, "C9");
        assert_eq!(slot.current_price, 35.5);

        for (id, price) in [("", "20"), ("C9", "0"), ("C9", "-4"), ("C9", "abc"), ("C9", "NaN"), ("C9", "inf")] {
            let result = SlotForm { slot_id: id.to_string(), price: price.to_string() }.validate();
            assert_eq!(result, Err(FormError::InvalidSlot), "{id:?} / {price:?}");
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FormError::MissingBookingDetails.to_string(),
            "Please select a slot, duration, and fill in all details."
        );
        assert_eq!(FormError::InvalidMobileNumber.to_string(), "Please enter a valid 10-digit mobile number.");
    }
}
