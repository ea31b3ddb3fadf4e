//! Request validation for the lead and quote capture forms.
//!
//! Sanity checks, not full RFC validation: bound every length, require
//! an `@` in emails, require enough digits in phone numbers. The forms
//! carry unrelated user input; validation here gates grant issuance but
//! is otherwise independent of the grant mechanism.

use serde::Deserialize;

use crate::error::ValidationError;

const MAX_NAME_LEN: usize = 120;
const MAX_EMAIL_LEN: usize = 320;
const MAX_PHONE_LEN: usize = 24;
const MIN_PHONE_DIGITS: usize = 7;
const MAX_PRODUCT_LEN: usize = 200;
const MAX_MESSAGE_LEN: usize = 4000;

/// Brochure-request lead form.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl LeadForm {
    /// Check all fields, reporting the first violation.
    ///
    /// # Errors
    ///
    /// Returns the offending field's [`ValidationError`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_phone(&self.phone)?;
        validate_email(&self.email)?;
        validate_message(self.message.as_deref())
    }
}

/// Quote-request form.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Product or service the quote is for.
    pub product: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl QuoteForm {
    /// Check all fields, reporting the first violation.
    ///
    /// # Errors
    ///
    /// Returns the offending field's [`ValidationError`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_phone(&self.phone)?;
        validate_email(&self.email)?;
        if self.product.trim().is_empty() {
            return Err(ValidationError::Missing { field: "product" });
        }
        if self.product.len() > MAX_PRODUCT_LEN {
            return Err(ValidationError::TooLong {
                field: "product",
                max: MAX_PRODUCT_LEN,
            });
        }
        validate_message(self.message.as_deref())
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Missing { field: "name" });
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name",
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::Missing { field: "email" });
    }
    if email.len() > MAX_EMAIL_LEN || !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().is_empty() {
        return Err(ValidationError::Missing { field: "phone" });
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if phone.len() > MAX_PHONE_LEN || digits < MIN_PHONE_DIGITS {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

fn validate_message(message: Option<&str>) -> Result<(), ValidationError> {
    if message.is_some_and(|m| m.len() > MAX_MESSAGE_LEN) {
        return Err(ValidationError::TooLong {
            field: "message",
            max: MAX_MESSAGE_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lead() -> LeadForm {
        LeadForm {
            name: "A Customer".to_owned(),
            phone: "+91 98765 43210".to_owned(),
            email: "customer@example.com".to_owned(),
            message: None,
        }
    }

    #[test]
    fn valid_lead_passes() {
        assert!(lead().validate().is_ok());
    }

    #[test]
    fn blank_name_is_missing() {
        let mut form = lead();
        form.name = "   ".to_owned();
        assert_eq!(
            form.validate(),
            Err(ValidationError::Missing { field: "name" })
        );
    }

    #[test]
    fn email_requires_at_sign() {
        let mut form = lead();
        form.email = "not-an-email".to_owned();
        assert_eq!(form.validate(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn phone_requires_enough_digits() {
        let mut form = lead();
        form.phone = "12345".to_owned();
        assert_eq!(form.validate(), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn oversized_message_is_rejected() {
        let mut form = lead();
        form.message = Some("x".repeat(MAX_MESSAGE_LEN + 1));
        assert!(matches!(
            form.validate(),
            Err(ValidationError::TooLong {
                field: "message",
                ..
            })
        ));
    }

    #[test]
    fn quote_requires_product() {
        let form = QuoteForm {
            name: "A Customer".to_owned(),
            phone: "+91 98765 43210".to_owned(),
            email: "customer@example.com".to_owned(),
            product: String::new(),
            message: None,
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::Missing { field: "product" })
        );
    }

    #[test]
    fn forms_deserialize_from_json() {
        let form: LeadForm = serde_json::from_str(
            r#"{"name":"A","phone":"1234567890","email":"a@b.c","message":"hi"}"#,
        )
        .unwrap();
        assert_eq!(form.message.as_deref(), Some("hi"));
    }
}
