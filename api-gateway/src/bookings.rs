//! Booking submission, lookup and cancellation.

use lambda_http::http::Method;
use lambda_http::{Body, Error, Request, Response};
use serde_json::json;
use shared::{
    parse_json_body, BookingConfirmation, BookingLookup, BookingSubmission, MissingFields,
    Notification, SlotConflict, SlotKey, BOOKING_RULES,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::AppState;

/// Handle `POST /bookings`.
///
/// Validates the form, claims the slot, emails staff, and returns the booking id.
/// The reservation is released again when the email cannot be sent.
pub async fn create(state: &AppState, event: &Request) -> Result<Response<Body>, Error> {
    let cors = &state.cors;

    match *event.method() {
        Method::OPTIONS => return cors.empty_response(200),
        Method::POST => {}
        _ => return cors.error_response(405, "Method not allowed"),
    }

    let body = match parse_json_body(event.body()) {
        Ok(body) => body,
        Err(e) => {
            warn!("Rejected booking with invalid JSON body: {}", e);
            return cors.error_response(400, "Invalid JSON body");
        }
    };

    let validation = BOOKING_RULES.validate(&body);
    if !validation.is_ok() {
        warn!("Rejected booking, missing fields: {:?}", validation.missing);
        return cors.json_response(400, &MissingFields::new(validation.missing));
    }

    let submission = BookingSubmission::from_form(&body);
    let slot = SlotKey::new(
        submission.preferred_date.clone(),
        submission.preferred_time.clone(),
        submission.location_display(),
    );
    let booking_id = Uuid::new_v4().to_string();

    let reserved = if state.slot_check_enabled {
        state
            .registry
            .try_reserve(&slot.date, &slot.time, &slot.location, &booking_id)
    } else {
        state
            .registry
            .reserve(&slot.date, &slot.time, &slot.location, &booking_id);
        true
    };

    if !reserved {
        warn!("Slot {} already booked", slot);
        return cors.json_response(
            409,
            &SlotConflict {
                error: "Time slot unavailable".to_string(),
                message: "This time slot has already been booked. Please choose another time."
                    .to_string(),
                date: slot.date,
                time: slot.time,
                location: slot.location,
            },
        );
    }

    info!(
        "Reserved slot {} for booking {} ({} slots held)",
        slot,
        booking_id,
        state.registry.len()
    );

    let notification = Notification::for_booking(&submission, &booking_id);
    if let Err(e) = state.mailer.send(&notification).await {
        error!("Email error for booking {}: {}", booking_id, e);
        state.registry.remove(&booking_id);
        return cors.json_response(500, &json!({ "ok": false, "error": "Failed to send email" }));
    }

    cors.json_response(
        200,
        &BookingConfirmation {
            ok: true,
            booking_id,
            date: slot.date,
            time: slot.time,
            location: slot.location,
            message: "Booking confirmed. A notification email has been sent.".to_string(),
        },
    )
}

/// Handle `GET /bookings/{id}`.
pub fn lookup(state: &AppState, booking_id: &str) -> Result<Response<Body>, Error> {
    match state.registry.find_by_booking_id(booking_id) {
        Some(booking) => state
            .cors
            .json_response(200, &BookingLookup { ok: true, booking }),
        None => not_found(state),
    }
}

/// Handle `POST /bookings/{id}/cancel`.
pub fn cancel(state: &AppState, booking_id: &str) -> Result<Response<Body>, Error> {
    if !state.registry.remove(booking_id) {
        return not_found(state);
    }

    info!("Cancelled booking {}", booking_id);
    state.cors.json_response(
        200,
        &json!({
            "ok": true,
            "bookingId": booking_id,
            "message": "Booking cancelled",
        }),
    )
}

fn not_found(state: &AppState) -> Result<Response<Body>, Error> {
    state
        .cors
        .json_response(404, &json!({ "ok": false, "error": "Booking not found" }))
}
