//! Bookings confirmed through the mock payment flow in this session.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::payment::Receipt;

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub receipt: Receipt,
    pub booked_at: DateTime<Utc>,
}

impl Booking {
    #[must_use]
    pub fn property_id(&self) -> &str {
        &self.receipt.property_id
    }
}

/// Session-only list of bookings, newest first.
#[derive(Debug, Clone, Default)]
pub struct BookingStore {
    bookings: Vec<Booking>,
}

impl BookingStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a booking for a receipt. Confirming the same transaction twice
    /// returns the existing booking.
    pub fn confirm(&mut self, receipt: Receipt) -> Booking {
        if let Some(existing) = self
            .bookings
            .iter()
            .find(|b| b.receipt.transaction_id == receipt.transaction_id)
        {
            return existing.clone();
        }
        let booking = Booking {
            id: Uuid::new_v4(),
            receipt,
            booked_at: Utc::now(),
        };
        tracing::debug!(
            booking_id = %booking.id,
            property_id = %booking.property_id(),
            "booking confirmed"
        );
        self.bookings.insert(0, booking.clone());
        booking
    }

    #[must_use]
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    #[must_use]
    pub fn for_property(&self, property_id: &str) -> Vec<&Booking> {
        self.bookings
            .iter()
            .filter(|b| b.property_id() == property_id)
            .collect()
    }

    pub fn clear(&mut self) {
        self.bookings.clear();
    }
}
