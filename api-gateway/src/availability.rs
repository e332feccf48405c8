//! Slot availability check.

use lambda_http::http::Method;
use lambda_http::{Body, Error, Request, Response};
use serde_json::{json, Value};
use shared::{parse_json_body, AvailabilityResponse, MissingFields, AVAILABILITY_RULES};
use tracing::{error, info};

use crate::AppState;

/// Handle `POST /check-availability`.
pub fn check(state: &AppState, event: &Request) -> Result<Response<Body>, Error> {
    let cors = &state.cors;

    match *event.method() {
        Method::OPTIONS => return cors.empty_response(200),
        Method::POST => {}
        _ => return cors.error_response(405, "Method not allowed"),
    }

    let body = match parse_json_body(event.body()) {
        Ok(body) => body,
        Err(e) => {
            error!("Availability check error: {}", e);
            return cors.json_response(
                500,
                &json!({ "error": "Failed to check availability", "available": false }),
            );
        }
    };

    let validation = AVAILABILITY_RULES.validate(&body);
    if !validation.is_ok() {
        return cors.json_response(400, &MissingFields::new(validation.missing));
    }

    let raw = |field: &str| body.get(field).cloned().unwrap_or(Value::Null);
    let (date, time, location) = (raw("date"), raw("time"), raw("location"));

    let available = state.registry.is_available(
        &slot_text(&date),
        &slot_text(&time),
        &slot_text(&location),
    );
    info!(
        "Availability for {} {} at {}: {}",
        date, time, location, available
    );

    let message = if available {
        "Time slot is available"
    } else {
        "Time slot is already booked"
    };

    cors.json_response(
        200,
        &AvailabilityResponse {
            available,
            date,
            time,
            location,
            message: message.to_string(),
        },
    )
}

/// Slot key text for a query value: strings as sent, anything else as JSON.
fn slot_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
