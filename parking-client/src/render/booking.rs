use parking_common::Slot;

use super::{plate_or_na, Occupancy};

/// One card in the public slot grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotCard {
    pub slot_id: String,
    pub price_label: String,
    pub occupancy: Occupancy,
    /// Tooltip-style hint for the card
    pub hint: String,
    /// Only available slots can be picked for a booking
    pub selectable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingView {
    pub cards: Vec<SlotCard>,
    pub available: usize,
    pub total: usize,
}

impl BookingView {
    pub fn availability_label(&self) -> String {
        format!("Available: {} / {} spots", self.available, self.total)
    }
}

fn render_card(slot: &Slot) -> SlotCard {
    let price = slot.base_price();
    let hint = if slot.occupied {
        format!("Booked by {}", plate_or_na(slot.vehicle_plate.as_deref()))
    } else {
        format!("Available! Select to book. Base Price: ₹{:.2}/hr", price)
    };

    SlotCard {
        slot_id: slot.slot_id.clone(),
        price_label: format!("Base ₹{:.2}/hr", price),
        occupancy: Occupancy::of(slot.occupied),
        hint,
        selectable: !slot.occupied,
    }
}

/// Build the public slot grid. Cards keep the server's order; the available
/// count is always taken from the slots themselves.
pub fn render_slots(slots: &[Slot]) -> BookingView {
    let cards: Vec<SlotCard> = slots.iter().map(render_card).collect();
    let available = slots.iter().filter(|s| !s.occupied).count();

    BookingView {
        cards,
        available,
        total: slots.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_count_matches_free_slots() {
        let slots = vec![
            Slot::new("A1", 20.0),
            Slot::new("A2", 20.0).occupied_by("KA01AB1234"),
            Slot::new("A3", 30.0),
        ];
        let view = render_slots(&slots);
        assert_eq!(view.available, 2);
        assert_eq!(view.total, 3);
        assert_eq!(view.availability_label(), "Available: 2 / 3 spots");
    }

    #[test]
    fn test_cards_keep_server_order() {
        let slots = vec![Slot::new("B1", 20.0), Slot::new("A1", 20.0)];
        let ids: Vec<_> = render_slots(&slots).cards.into_iter().map(|c| c.slot_id).collect();
        assert_eq!(ids, vec!["B1", "A1"]);
    }

    #[test]
    fn test_card_labels() {
        let slots = vec![
            Slot::new("A1", 20.0),
            Slot::new("A2", 25.5).occupied_by("KA01AB1234"),
            Slot { vehicle_plate: None, ..Slot::new("A3", 20.0).occupied_by("") },
        ];
        let view = render_slots(&slots);

        let free = &view.cards[0];
        assert_eq!(free.price_label, "Base ₹20.00/hr");
        assert_eq!(free.occupancy, Occupancy::Available);
        assert!(free.selectable);
        assert_eq!(free.hint, "Available! Select to book. Base Price: ₹20.00/hr");

        let booked = &view.cards[1];
        assert_eq!(booked.price_label, "Base ₹25.50/hr");
        assert_eq!(booked.occupancy, Occupancy::Booked);
        assert!(!booked.selectable);
        assert_eq!(booked.hint, "Booked by KA01AB1234");

        assert_eq!(view.cards[2].hint, "Booked by N/A");
    }

    #[test]
    fn test_empty_lot() {
        let view = render_slots(&[]);
        assert!(view.cards.is_empty());
        assert_eq!(view.availability_label(), "Available: 0 / 0 spots");
    }
}
