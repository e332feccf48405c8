//! API Gateway Lambda handlers for bookings and slot availability.
//!
//! Endpoints:
//! - POST /bookings - Submit a booking and notify staff
//! - GET /bookings/{id} - Look up a reservation
//! - POST /bookings/{id}/cancel - Release a reservation
//! - POST /check-availability - Check whether a slot is free
//! - GET /health - Liveness check
//!
//! Every path is also served under an `/api` prefix.

pub mod availability;
pub mod bookings;
pub mod health;
pub mod router;
pub mod state;

pub use router::route;
pub use state::AppState;

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use lambda_http::{Body, Request, Response};
    use serde_json::Value;
    use shared::{Config, MailError, Mailer, Notification};
    use std::sync::{Arc, Mutex};

    use crate::AppState;

    /// Mailer that records notifications instead of sending them.
    #[derive(Default)]
    pub struct RecordingMailer {
        pub sent: Mutex<Vec<Notification>>,
        pub fail: bool,
    }

    impl RecordingMailer {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn sent(&self) -> Vec<Notification> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, notification: &Notification) -> Result<(), MailError> {
            if self.fail {
                return Err(MailError::Smtp("connection refused".to_string()));
            }
            self.sent.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    pub fn state_with(config: &Config, mailer: Arc<RecordingMailer>) -> AppState {
        AppState::new(config, mailer)
    }

    pub fn state(mailer: Arc<RecordingMailer>) -> AppState {
        state_with(&Config::default(), mailer)
    }

    pub fn request(method: &str, path: &str, body: Option<&str>) -> Request {
        let body = match body {
            Some(text) => Body::from(text.to_string()),
            None => Body::Empty,
        };
        lambda_http::http::Request::builder()
            .method(method)
            .uri(path)
            .body(body)
            .unwrap()
    }

    pub fn json_request(method: &str, path: &str, body: &Value) -> Request {
        request(method, path, Some(&body.to_string()))
    }

    pub fn body_json(response: &Response<Body>) -> Value {
        serde_json::from_slice(response.body().as_ref()).unwrap()
    }

    pub fn booking_form() -> Value {
        serde_json::json!({
            "service": "Full Detail",
            "businessPark": "Riverside Park",
            "firstName": "Sam",
            "lastName": "Lee",
            "email": "sam@example.com",
            "phone": "555-0100",
            "vehicleMake": "Honda",
            "vehicleModel": "Civic",
            "vehicleYear": "2019",
            "vehicleColor": "Blue",
            "preferredDate": "2024-06-01",
            "preferredTime": "10:00",
            "notes": "Dog hair in the back",
            "agreedToTerms": true
        })
    }
}
