//! Booking notification email.
//!
//! [`Notification::for_booking`] renders the message staff receive for each
//! booking; a [`Mailer`] delivers it. [`SmtpMailer`] talks to an SMTP relay
//! using the `EMAIL_*` settings from [`Config`].

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::error::MailError;
use crate::models::BookingSubmission;
use crate::Config;

const SENDER_NAME: &str = "The Car Bath Website";

/// A rendered notification, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub html: String,
    /// Customer address replies should go to
    pub reply_to: String,
}

impl Notification {
    /// Render the staff notification for a booking.
    ///
    /// Field values are inserted as submitted.
    pub fn for_booking(submission: &BookingSubmission, booking_id: &str) -> Self {
        let full_name = submission.full_name();
        let or_dash = |value: &str| {
            if value.trim().is_empty() {
                "-".to_string()
            } else {
                value.to_string()
            }
        };

        let html = format!(
            r#"
    <h2>New Booking Request</h2>
    <p><strong>Booking ID:</strong> {booking_id}</p>
    <p><strong>Name:</strong> {name}</p>
    <p><strong>Email:</strong> {email}</p>
    <p><strong>Phone:</strong> {phone}</p>
    <p><strong>Service:</strong> {service}</p>
    <p><strong>Business Park:</strong> {park}</p>
    <p><strong>Date:</strong> {date}</p>
    <p><strong>Time:</strong> {time}</p>
    <hr />
    <p><strong>Vehicle:</strong> {vehicle}</p>
    <p><strong>Color:</strong> {color}</p>
    <p><strong>Notes:</strong> {notes}</p>
    <p><strong>Agreed To Terms:</strong> {terms}</p>
"#,
            booking_id = booking_id,
            name = full_name,
            email = submission.email,
            phone = submission.phone,
            service = submission.service,
            park = submission.location_display(),
            date = submission.preferred_date,
            time = submission.preferred_time,
            vehicle = submission.vehicle(),
            color = or_dash(&submission.vehicle_color),
            notes = or_dash(submission.notes.as_deref().unwrap_or_default()),
            terms = if submission.agreed_to_terms { "Yes" } else { "No" },
        );

        Self {
            subject: format!("New Booking – {} – {}", submission.service, full_name),
            html,
            reply_to: submission.email.clone(),
        }
    }
}

/// Delivers notifications.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), MailError>;
}

/// Settings needed to reach the SMTP relay.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub recipient: Option<String>,
}

impl From<&Config> for MailerConfig {
    fn from(config: &Config) -> Self {
        Self {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            user: config.smtp_user.clone(),
            password: config.smtp_password.clone(),
            recipient: config.notification_recipient().map(str::to_string),
        }
    }
}

impl MailerConfig {
    fn sender(&self) -> Result<Mailbox, MailError> {
        let user = self
            .user
            .as_deref()
            .ok_or_else(|| MailError::MissingConfig("EMAIL_USER".to_string()))?;
        let address = user
            .parse()
            .map_err(|_| MailError::InvalidAddress(user.to_string()))?;
        Ok(Mailbox::new(Some(SENDER_NAME.to_string()), address))
    }

    fn recipient(&self) -> Result<Mailbox, MailError> {
        let to = self
            .recipient
            .as_deref()
            .ok_or_else(|| MailError::MissingConfig("NOTIFY_TO".to_string()))?;
        to.parse()
            .map_err(|_| MailError::InvalidAddress(to.to_string()))
    }

    /// Build the message for a notification without sending it.
    pub fn build_message(&self, notification: &Notification) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(self.sender()?)
            .to(self.recipient()?)
            .subject(notification.subject.as_str())
            .header(ContentType::TEXT_HTML);

        // An unparseable customer address only loses the Reply-To header.
        if let Ok(reply_to) = notification.reply_to.parse::<Mailbox>() {
            builder = builder.reply_to(reply_to);
        }

        builder
            .body(notification.html.clone())
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

/// SMTP delivery using opportunistic STARTTLS.
pub struct SmtpMailer {
    config: MailerConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: MailerConfig) -> Result<Self, MailError> {
        let tls = TlsParameters::new(config.host.clone())
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.host.as_str())
            .port(config.port)
            .tls(Tls::Opportunistic(tls));

        if let (Some(user), Some(password)) = (&config.user, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, MailError> {
        Self::new(MailerConfig::from(config))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, notification: &Notification) -> Result<(), MailError> {
        let message = self.config.build_message(notification)?;
        debug!("Sending notification via {}:{}", self.config.host, self.config.port);
        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission() -> BookingSubmission {
        BookingSubmission::from_form(&json!({
            "service": "Full Detail",
            "businessPark": "other",
            "customBusinessPark": "Harbor Plaza",
            "firstName": "Sam",
            "lastName": "Lee",
            "email": "sam@example.com",
            "phone": "555-0100",
            "vehicleMake": "Honda",
            "vehicleModel": "Civic",
            "vehicleYear": "2019",
            "vehicleColor": "Blue",
            "preferredDate": "2024-06-01",
            "preferredTime": "10:00"
        }))
    }

    fn mailer_config() -> MailerConfig {
        MailerConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            user: Some("bookings@thecarbath.example".to_string()),
            password: Some("secret".to_string()),
            recipient: Some("owner@thecarbath.example".to_string()),
        }
    }

    #[test]
    fn test_notification_content() {
        let notification = Notification::for_booking(&submission(), "bk-1");

        assert_eq!(notification.subject, "New Booking – Full Detail – Sam Lee");
        assert_eq!(notification.reply_to, "sam@example.com");
        assert!(notification.html.contains("<strong>Booking ID:</strong> bk-1"));
        assert!(notification.html.contains("<strong>Business Park:</strong> Harbor Plaza"));
        assert!(notification.html.contains("<strong>Vehicle:</strong> 2019 Honda Civic"));
        assert!(notification.html.contains("<strong>Notes:</strong> -"));
        assert!(notification.html.contains("<strong>Agreed To Terms:</strong> No"));
    }

    #[test]
    fn test_build_message_headers() {
        let notification = Notification::for_booking(&submission(), "bk-1");
        let message = mailer_config().build_message(&notification).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("The Car Bath Website"));
        assert!(raw.contains("<bookings@thecarbath.example>"));
        assert!(raw.contains("owner@thecarbath.example"));
        assert!(raw.contains("Reply-To:"));
        assert!(raw.contains("sam@example.com"));
    }

    #[test]
    fn test_build_message_without_sender() {
        let config = MailerConfig {
            user: None,
            ..mailer_config()
        };
        let notification = Notification::for_booking(&submission(), "bk-1");
        let err = config.build_message(&notification).unwrap_err();
        assert!(matches!(err, MailError::MissingConfig(_)));
    }

    #[test]
    fn test_mailer_config_from_config() {
        let config = Config {
            smtp_user: Some("bookings@thecarbath.example".to_string()),
            ..Config::default()
        };
        let mailer_config = MailerConfig::from(&config);
        assert_eq!(mailer_config.host, "smtp.gmail.com");
        assert_eq!(
            mailer_config.recipient.as_deref(),
            Some("bookings@thecarbath.example")
        );
    }
}
