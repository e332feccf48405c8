//! Path routing for the combined booking Lambda.

use lambda_http::http::Method;
use lambda_http::{Body, Error, Request, Response};
use tracing::info;

use crate::{availability, bookings, health, AppState};

/// Dispatch a request to its handler.
pub async fn route(state: &AppState, event: Request) -> Result<Response<Body>, Error> {
    let method = event.method().clone();
    let path = event.uri().path().to_string();

    info!("Booking API request: {} {}", method, path);

    let segments = path_segments(&path);
    match (&method, segments.as_slice()) {
        (_, ["health"]) => health::check(&state.cors, &event),
        (_, ["check-availability"]) => availability::check(state, &event),
        (_, ["bookings"]) => bookings::create(state, &event).await,
        (&Method::OPTIONS, ["bookings", _]) | (&Method::OPTIONS, ["bookings", _, "cancel"]) => {
            state.cors.empty_response(200)
        }
        (&Method::GET, ["bookings", id]) => bookings::lookup(state, id),
        (&Method::POST, ["bookings", id, "cancel"]) => bookings::cancel(state, id),
        (_, ["bookings", _]) | (_, ["bookings", _, "cancel"]) => {
            state.cors.error_response(405, "Method not allowed")
        }
        _ => state.cors.error_response(404, "Not found"),
    }
}

/// Split a request path into segments, dropping empty ones and an `/api` prefix.
fn path_segments(path: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.first() == Some(&"api") {
        segments.remove(0);
    }
    segments
}
