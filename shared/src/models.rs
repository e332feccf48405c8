//! Shared data models.

use serde::Serialize;
use serde_json::Value;

use crate::slots::Reservation;
use crate::validation::{field_flag, field_text, CUSTOM_LOCATION_SENTINELS};

/// A booking form submission that has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSubmission {
    pub service: String,
    pub business_park: String,
    pub custom_business_park: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: String,
    pub vehicle_color: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub notes: Option<String>,
    pub agreed_to_terms: bool,
}

impl BookingSubmission {
    /// Read a submission out of a validated form body.
    ///
    /// Absent fields become empty strings; run the booking rules first.
    pub fn from_form(body: &Value) -> Self {
        let text = |field: &str| field_text(body, field).unwrap_or_default();

        Self {
            service: text("service"),
            business_park: text("businessPark"),
            custom_business_park: field_text(body, "customBusinessPark"),
            first_name: text("firstName"),
            last_name: text("lastName"),
            email: text("email"),
            phone: text("phone"),
            vehicle_make: text("vehicleMake"),
            vehicle_model: text("vehicleModel"),
            vehicle_year: text("vehicleYear"),
            vehicle_color: text("vehicleColor"),
            preferred_date: text("preferredDate"),
            preferred_time: text("preferredTime"),
            notes: field_text(body, "notes"),
            agreed_to_terms: field_flag(body, "agreedToTerms"),
        }
    }

    pub fn full_name(&self) -> String {
        join_present(&[&self.first_name, &self.last_name])
    }

    /// Location shown to staff and used for the slot.
    ///
    /// Sentinel parks ("other", "private") resolve to the free-text location,
    /// or to the capitalised sentinel when none was given.
    pub fn location_display(&self) -> String {
        let park = self.business_park.trim();
        let sentinel = CUSTOM_LOCATION_SENTINELS
            .iter()
            .find(|s| park.eq_ignore_ascii_case(s));

        match sentinel {
            Some(sentinel) => self
                .custom_business_park
                .clone()
                .unwrap_or_else(|| capitalise(sentinel)),
            None => park.to_string(),
        }
    }

    /// Vehicle summary as "year make model".
    pub fn vehicle(&self) -> String {
        join_present(&[&self.vehicle_year, &self.vehicle_make, &self.vehicle_model])
    }
}

fn join_present(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Successful booking response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub ok: bool,
    pub booking_id: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub message: String,
}

/// Response when the requested slot is already taken.
#[derive(Debug, Serialize)]
pub struct SlotConflict {
    pub error: String,
    pub message: String,
    pub date: String,
    pub time: String,
    pub location: String,
}

/// Response listing the fields a submission is missing.
#[derive(Debug, Serialize)]
pub struct MissingFields {
    pub error: String,
    pub missing: Vec<String>,
}

impl MissingFields {
    pub fn new(missing: Vec<String>) -> Self {
        Self {
            error: "Missing required fields".to_string(),
            missing,
        }
    }
}

/// Availability query response. The slot fields echo the query as received.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
    pub date: Value,
    pub time: Value,
    pub location: Value,
    pub message: String,
}

/// Booking lookup response.
#[derive(Debug, Serialize)]
pub struct BookingLookup {
    pub ok: bool,
    pub booking: Reservation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form() -> Value {
        json!({
            "service": "Interior Detail",
            "businessPark": "Riverside Park",
            "firstName": " Sam ",
            "lastName": "Lee",
            "email": "sam@example.com",
            "phone": "555-0100",
            "vehicleMake": "Honda",
            "vehicleModel": "Civic",
            "vehicleYear": 2019,
            "vehicleColor": "Blue",
            "preferredDate": "2024-06-01",
            "preferredTime": "10:00",
            "agreedToTerms": true
        })
    }

    #[test]
    fn test_from_form() {
        let submission = BookingSubmission::from_form(&form());
        assert_eq!(submission.first_name, "Sam");
        assert_eq!(submission.vehicle_year, "2019");
        assert!(submission.agreed_to_terms);
        assert!(submission.notes.is_none());
        assert_eq!(submission.full_name(), "Sam Lee");
        assert_eq!(submission.vehicle(), "2019 Honda Civic");
    }

    #[test]
    fn test_location_display_uses_park() {
        let submission = BookingSubmission::from_form(&form());
        assert_eq!(submission.location_display(), "Riverside Park");
    }

    #[test]
    fn test_location_display_uses_custom_value() {
        let mut body = form();
        body["businessPark"] = json!("OTHER");
        body["customBusinessPark"] = json!("Harbor Plaza");
        let submission = BookingSubmission::from_form(&body);
        assert_eq!(submission.location_display(), "Harbor Plaza");
    }

    #[test]
    fn test_location_display_falls_back_to_sentinel() {
        let mut body = form();
        body["businessPark"] = json!("private");
        let submission = BookingSubmission::from_form(&body);
        assert_eq!(submission.location_display(), "Private");
    }

    #[test]
    fn test_missing_fields_shape() {
        let json = serde_json::to_value(MissingFields::new(vec!["email".into()])).unwrap();
        assert_eq!(json, json!({"error": "Missing required fields", "missing": ["email"]}));
    }
}
