use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, warn};
use uuid::Uuid;

use shared_models::Weekday;

use crate::models::{MatchingError, SlotAvailability};
use crate::services::doctor::DoctorStore;

pub const MSG_NO_SLOT: &str = "Le docteur n'a pas de créneau disponible pour ce jour et cette heure";
pub const MSG_ALREADY_BOOKED: &str = "Ce créneau est déjà réservé";
pub const MSG_SLOT_AVAILABLE: &str = "Créneau disponible";
pub const MSG_NO_SLOT_THAT_DAY: &str = "Le docteur n'a pas de créneau disponible ce jour";
pub const MSG_DAY_AVAILABLE: &str = "Le docteur a au moins un créneau disponible ce jour";

pub struct AvailabilityChecker {
    store: Arc<dyn DoctorStore>,
}

impl AvailabilityChecker {
    pub fn new(store: Arc<dyn DoctorStore>) -> Self {
        Self { store }
    }

    /// Day-level check used for ranking: does the doctor have any open
    /// weekly slot on the weekday of `date`?
    ///
    /// Store failures are logged and reported as "not available" so that a
    /// single doctor cannot fail a whole ranking request.
    pub async fn has_slot_on(&self, doctor_id: Uuid, date: NaiveDate) -> bool {
        let day = Weekday::from(date);

        match self.store.find_available_slots(doctor_id, day).await {
            Ok(slots) => {
                let available = slots.iter().any(|slot| slot.is_open() && slot.day == day);
                debug!("Doctor {} on {} ({}): available={}", doctor_id, date, day, available);
                available
            }
            Err(e) => {
                warn!(
                    "Availability lookup failed for doctor {} on {}: {}; treating as unavailable",
                    doctor_id, date, e
                );
                false
            }
        }
    }

    /// Booking-grade check: the doctor must exist, a slot must cover `time`
    /// on that weekday, and no active appointment may already hold it.
    pub async fn check_slot(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<SlotAvailability, MatchingError> {
        self.ensure_doctor_exists(doctor_id).await?;

        let day = Weekday::from(date);
        let slots = self.store.find_available_slots(doctor_id, day).await?;
        let has_slot = slots
            .iter()
            .any(|slot| slot.is_open() && slot.day == day && slot.covers(time));

        let (available, message) = if !has_slot {
            (false, MSG_NO_SLOT)
        } else if self.store.has_active_appointment_at(doctor_id, date, time).await? {
            (false, MSG_ALREADY_BOOKED)
        } else {
            (true, MSG_SLOT_AVAILABLE)
        };

        debug!("Slot check for doctor {} at {} {}: {}", doctor_id, date, time, message);

        Ok(SlotAvailability {
            doctor_id,
            date,
            time: Some(time),
            available,
            message: message.to_string(),
        })
    }

    /// Day-level check for callers: unlike [`Self::has_slot_on`], an unknown
    /// doctor is an error rather than "unavailable".
    pub async fn check_day(&self, doctor_id: Uuid, date: NaiveDate) -> Result<SlotAvailability, MatchingError> {
        self.ensure_doctor_exists(doctor_id).await?;

        let available = self.has_slot_on(doctor_id, date).await;

        Ok(SlotAvailability {
            doctor_id,
            date,
            time: None,
            available,
            message: if available { MSG_DAY_AVAILABLE } else { MSG_NO_SLOT_THAT_DAY }.to_string(),
        })
    }

    async fn ensure_doctor_exists(&self, doctor_id: Uuid) -> Result<(), MatchingError> {
        match self.store.get_doctor(doctor_id).await? {
            Some(_) => Ok(()),
            None => Err(MatchingError::DoctorNotFound(doctor_id)),
        }
    }
}
