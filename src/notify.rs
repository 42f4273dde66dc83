// src/notify.rs
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};
use log::info;

use crate::{
    config::options::EmailSettings,
    detect::ChangeEvent,
    error::{Result, TrackerError},
};

/// A recorded price event, ready to be told to the user.
#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub name: String,
    pub url: String,
    pub price: f64,
    pub event: ChangeEvent,
    pub timestamp: String,
}

impl Alert {
    pub fn subject(&self) -> String {
        let (icon, what) = match self.event {
            ChangeEvent::New => ("🆕", "New Product Tracked"),
            ChangeEvent::Dropped { .. } => ("📉", "Price Drop"),
            ChangeEvent::Increased { .. } => ("📈", "Price Increase"),
            ChangeEvent::Unchanged => ("⏸", "No Change"),
        };
        format!("{icon} {what}: {} - ${:.2}", self.name, self.price)
    }

    pub fn change_text(&self) -> String {
        match self.event {
            ChangeEvent::New => s!("Now tracking this product!"),
            ChangeEvent::Dropped { previous, delta } => {
                format!("Price dropped by ${delta:.2} (was ${previous:.2})")
            }
            ChangeEvent::Increased { previous, delta } => {
                format!("Price increased by ${delta:.2} (was ${previous:.2})")
            }
            ChangeEvent::Unchanged => format!("No change (still ${:.2})", self.price),
        }
    }

    pub fn body(&self) -> String {
        join!(
            &format!("Product: {}\n", self.name),
            &format!("Current Price: ${:.2}\n", self.price),
            &self.change_text(),
            "\n",
            &format!("URL: {}\n", self.url),
            &format!("Checked at: {}", self.timestamp),
        )
    }
}

/// Outbound alert channel.
pub trait Notifier {
    fn notify(&self, alert: &Alert) -> Result<()>;
}

/// Plain-text mail over SMTP + STARTTLS.
pub struct EmailNotifier {
    settings: EmailSettings,
}

impl EmailNotifier {
    pub fn new(settings: EmailSettings) -> Self {
        Self { settings }
    }

    fn mailbox(addr: &str) -> Result<Mailbox> {
        addr.trim()
            .parse::<Mailbox>()
            .map_err(|e| TrackerError::Notify(format!("bad address '{addr}': {e}")))
    }

    pub fn build_message(&self, alert: &Alert) -> Result<Message> {
        Message::builder()
            .from(Self::mailbox(&self.settings.username)?)
            .to(Self::mailbox(&self.settings.recipient)?)
            .subject(alert.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(alert.body())
            .map_err(|e| TrackerError::Notify(e.to_string()))
    }
}

impl Notifier for EmailNotifier {
    fn notify(&self, alert: &Alert) -> Result<()> {
        let email = self.build_message(alert)?;
        let s = &self.settings;

        let mailer = SmtpTransport::starttls_relay(&s.smtp_server)
            .map_err(|e| TrackerError::Notify(e.to_string()))?
            .port(s.smtp_port)
            .credentials(Credentials::new(s.username.clone(), s.password.clone()))
            .build();

        mailer
            .send(&email)
            .map_err(|e| TrackerError::Notify(e.to_string()))?;
        info!("Email: sent '{}' to {}", alert.subject(), s.recipient);
        Ok(())
    }
}
