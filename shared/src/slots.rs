//! In-memory appointment slot registry.
//!
//! Reservations live for the lifetime of the process. Nothing is persisted, so a
//! cold start (or a second Lambda instance) begins with an empty registry.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Identifies one appointment slot.
///
/// The fields are kept apart instead of being joined into a single string, so
/// values that contain the display delimiter cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    pub date: String,
    pub time: String,
    pub location: String,
}

impl SlotKey {
    pub fn new(date: impl Into<String>, time: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            location: location.into(),
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.date, self.time, self.location)
    }
}

/// An occupied appointment slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub booking_id: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub reserved_at: DateTime<Utc>,
}

impl Reservation {
    fn new(key: &SlotKey, booking_id: &str) -> Self {
        Self {
            booking_id: booking_id.to_string(),
            date: key.date.clone(),
            time: key.time.clone(),
            location: key.location.clone(),
            reserved_at: Utc::now(),
        }
    }
}

/// Tracks which (date, time, location) slots are taken.
///
/// Holds at most one reservation per slot key. Lookups by booking id scan every
/// entry in insertion order; replacing a slot's reservation keeps its position.
#[derive(Debug, Default)]
pub struct SlotRegistry {
    slots: RwLock<IndexMap<SlotKey, Reservation>>,
}

impl SlotRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no reservation exists for the slot.
    pub fn is_available(&self, date: &str, time: &str, location: &str) -> bool {
        !self.read().contains_key(&SlotKey::new(date, time, location))
    }

    /// Reserve a slot, replacing any reservation already holding it.
    ///
    /// Callers that need to refuse taken slots must use [`SlotRegistry::try_reserve`];
    /// checking [`SlotRegistry::is_available`] first leaves a window for a
    /// concurrent request to claim the same slot.
    pub fn reserve(&self, date: &str, time: &str, location: &str, booking_id: &str) {
        let key = SlotKey::new(date, time, location);
        let reservation = Reservation::new(&key, booking_id);
        self.write().insert(key, reservation);
    }

    /// Reserve a slot only if it is free. Returns false when it is already taken.
    pub fn try_reserve(&self, date: &str, time: &str, location: &str, booking_id: &str) -> bool {
        let key = SlotKey::new(date, time, location);
        let mut slots = self.write();
        if slots.contains_key(&key) {
            return false;
        }
        let reservation = Reservation::new(&key, booking_id);
        slots.insert(key, reservation);
        true
    }

    /// Find the first reservation carrying the given booking id.
    pub fn find_by_booking_id(&self, booking_id: &str) -> Option<Reservation> {
        self.read()
            .values()
            .find(|reservation| reservation.booking_id == booking_id)
            .cloned()
    }

    /// Remove the first reservation carrying the given booking id.
    ///
    /// Returns whether a reservation was removed.
    pub fn remove(&self, booking_id: &str) -> bool {
        let mut slots = self.write();
        let index = slots
            .values()
            .position(|reservation| reservation.booking_id == booking_id);

        match index {
            Some(index) => slots.shift_remove_index(index).is_some(),
            None => false,
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, IndexMap<SlotKey, Reservation>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<SlotKey, Reservation>> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }
}
