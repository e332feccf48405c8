//! Shared library for the car-detailing booking Lambda functions.
//!
//! This crate provides the slot registry, form validation, notification email and
//! HTTP helpers used by every Lambda in the workspace.

pub mod config;
pub mod error;
pub mod http;
pub mod mailer;
pub mod models;
pub mod slots;
pub mod validation;

pub use config::Config;
pub use error::{Error, MailError, Result};
pub use http::{parse_json_body, Cors};
pub use mailer::{Mailer, MailerConfig, Notification, SmtpMailer};
pub use models::{
    AvailabilityResponse, BookingConfirmation, BookingLookup, BookingSubmission, MissingFields,
    SlotConflict,
};
pub use slots::{Reservation, SlotKey, SlotRegistry};
pub use validation::{FieldRules, Presence, Validation, AVAILABILITY_RULES, BOOKING_RULES};
