//! Notification mail composition.
//!
//! Renders the plain-text message a form submission produces. Delivery
//! is an external concern; this module only composes.

use crate::validate::{LeadForm, QuoteForm};

/// A composed, ready-to-send message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Destination inbox.
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Compose the notification for a validated lead submission.
#[must_use]
pub fn lead_notification(inbox: &str, form: &LeadForm) -> MailMessage {
    let mut body = format!(
        "New brochure request\n\nName: {}\nPhone: {}\nEmail: {}\n",
        form.name, form.phone, form.email
    );
    append_message(&mut body, form.message.as_deref());

    MailMessage {
        to: inbox.to_owned(),
        subject: format!("Brochure request from {}", form.name),
        body,
    }
}

/// Compose the notification for a validated quote request.
#[must_use]
pub fn quote_notification(inbox: &str, form: &QuoteForm) -> MailMessage {
    let mut body = format!(
        "New quote request\n\nName: {}\nPhone: {}\nEmail: {}\nProduct: {}\n",
        form.name, form.phone, form.email, form.product
    );
    append_message(&mut body, form.message.as_deref());

    MailMessage {
        to: inbox.to_owned(),
        subject: format!("Quote request: {}", form.product),
        body,
    }
}

fn append_message(body: &mut String, message: Option<&str>) {
    if let Some(message) = message {
        body.push_str("\nMessage:\n");
        body.push_str(message);
        body.push('\n');
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn lead_notification_includes_contact_details() {
        let form = LeadForm {
            name: "A Customer".to_owned(),
            phone: "1234567890".to_owned(),
            email: "customer@example.com".to_owned(),
            message: Some("Please send the catalogue.".to_owned()),
        };
        let mail = lead_notification("sales@example.com", &form);
        assert_eq!(mail.to, "sales@example.com");
        assert!(mail.subject.contains("A Customer"));
        assert!(mail.body.contains("customer@example.com"));
        assert!(mail.body.contains("Please send the catalogue."));
    }

    #[test]
    fn quote_notification_names_the_product() {
        let form = QuoteForm {
            name: "A Customer".to_owned(),
            phone: "1234567890".to_owned(),
            email: "customer@example.com".to_owned(),
            product: "Industrial Valve X100".to_owned(),
            message: None,
        };
        let mail = quote_notification("sales@example.com", &form);
        assert_eq!(mail.subject, "Quote request: Industrial Valve X100");
        assert!(mail.body.contains("Industrial Valve X100"));
        assert!(!mail.body.contains("Message:"));
    }
}
