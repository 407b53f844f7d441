//! Booking lifecycle controller
//!
//! Orchestrates create/confirm/complete/cancel over the booking ledger and
//! the equipment availability state. Guards run here against a fresh read;
//! the repository re-checks each guard at write time so concurrent callers
//! cannot slip through between read and write.

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{BookingDetails, CancelBooking, CreateBooking},
        enums::{AvailabilityStatus, BookingStatus},
    },
    repository::{bookings::NewBooking, Repository},
};

use super::pricing;

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a booking: renter books available equipment for an interval.
    ///
    /// Equipment goes `available -> booked` with the new booking as its
    /// current reference and an incremented total, in one transaction with
    /// the booking insert. Exactly one of two concurrent creates for the
    /// same equipment succeeds.
    pub async fn create(&self, renter_id: Uuid, data: CreateBooking) -> AppResult<BookingDetails> {
        data.validate()?;

        let equipment = self.repository.equipment.get_by_id(data.equipment_id).await?;

        if equipment.availability_status != AvailabilityStatus::Available {
            return Err(AppError::equipment_unavailable());
        }
        if equipment.owner_id == renter_id {
            return Err(AppError::self_booking());
        }

        let quote = pricing::quote(
            data.start_date,
            data.end_date,
            equipment.price_per_hour,
            equipment.price_per_day,
        )?;

        let (delivery_longitude, delivery_latitude, delivery_address) = match &data.delivery_location
        {
            Some(loc) => (
                Some(loc.point.longitude),
                Some(loc.point.latitude),
                loc.address.clone(),
            ),
            None => (None, None, None),
        };

        let booking = self
            .repository
            .bookings
            .create(&NewBooking {
                equipment_id: equipment.id,
                renter_id,
                owner_id: equipment.owner_id,
                start_date: data.start_date,
                end_date: data.end_date,
                duration_hours: quote.hours,
                duration_days: quote.days,
                price_per_unit: equipment.price_per_hour,
                total_price: quote.total_price,
                delivery_type: data.delivery_type.unwrap_or_default(),
                delivery_longitude,
                delivery_latitude,
                delivery_address,
                notes: data.notes.clone(),
            })
            .await?;

        tracing::info!(
            booking_id = %booking.id,
            equipment_id = %equipment.id,
            renter_id = %renter_id,
            total_price = %booking.total_price,
            "Booking created"
        );

        self.repository.bookings.get_details(booking.id).await
    }

    /// Owner confirms a pending booking
    pub async fn confirm(&self, actor_id: Uuid, booking_id: Uuid) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;

        if booking.owner_id != actor_id {
            return Err(AppError::Authorization(
                "Only the owner can confirm a booking".to_string(),
            ));
        }
        if !booking.status.can_confirm() {
            return Err(AppError::invalid_transition("Booking cannot be confirmed"));
        }

        self.repository.bookings.confirm(booking_id).await?;
        self.repository.bookings.get_details(booking_id).await
    }

    /// Either party completes a booking; the equipment is released
    pub async fn complete(&self, actor_id: Uuid, booking_id: Uuid) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;

        self.require_party(&booking, actor_id)?;
        if !booking.status.can_close() {
            return Err(AppError::invalid_transition("Booking is already closed"));
        }

        let completed = self.repository.bookings.complete(booking_id).await?;

        tracing::info!(booking_id = %completed.id, "Booking completed");
        self.repository.bookings.get_details(booking_id).await
    }

    /// Either party cancels a booking; the equipment is released
    pub async fn cancel(
        &self,
        actor_id: Uuid,
        booking_id: Uuid,
        data: CancelBooking,
    ) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;

        self.require_party(&booking, actor_id)?;
        if !booking.status.can_close() {
            return Err(AppError::invalid_transition("Booking is already closed"));
        }

        let cancelled = self
            .repository
            .bookings
            .cancel(booking_id, actor_id, data.reason.as_deref())
            .await?;

        tracing::info!(booking_id = %cancelled.id, cancelled_by = %actor_id, "Booking cancelled");
        self.repository.bookings.get_details(booking_id).await
    }

    /// Bookings where the farmer is the renter
    pub async fn my_rentals(
        &self,
        renter_id: Uuid,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<BookingDetails>> {
        self.repository.bookings.list_by_renter(renter_id, status).await
    }

    /// Bookings against the farmer's own equipment
    pub async fn my_bookings(
        &self,
        owner_id: Uuid,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<BookingDetails>> {
        self.repository.bookings.list_by_owner(owner_id, status).await
    }

    /// A single booking, visible to its parties only
    pub async fn get(&self, actor_id: Uuid, booking_id: Uuid) -> AppResult<BookingDetails> {
        let details = self.repository.bookings.get_details(booking_id).await?;
        self.require_party(&details.booking, actor_id)?;
        Ok(details)
    }

    fn require_party(
        &self,
        booking: &crate::models::booking::Booking,
        actor_id: Uuid,
    ) -> AppResult<()> {
        if booking.owner_id != actor_id && booking.renter_id != actor_id {
            return Err(AppError::Authorization("Not authorized".to_string()));
        }
        Ok(())
    }
}
