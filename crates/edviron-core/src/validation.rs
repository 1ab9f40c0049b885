//! Input checks run before any backend request is issued

use once_cell::sync::OnceCell;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::error::{CoreError, CoreResult};
use super::models::{Credentials, PaymentRequest, Registration};

pub const MSG_INVALID_COLLECT_ID: &str = "Invalid Collect ID: expected a 24-character hexadecimal string.";
pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields.";
pub const MSG_PASSWORD_LENGTH: &str = "Password must be between 6 and 20 characters long.";
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const MSG_MISSING_CREDENTIALS: &str = "Please enter your email and password.";
pub const MSG_SELECT_SCHOOL: &str = "Please select a school.";
pub const MSG_INVALID_ORDER_ID: &str = "Please enter a valid Custom Order ID.";
pub const MSG_SCHOOL_ID_REQUIRED: &str = "School ID is required.";
pub const MSG_INVALID_AMOUNT: &str = "Amount must be a positive number.";
pub const MSG_INVALID_CALLBACK: &str = "Callback URL must start with http:// or https://";

pub const PASSWORD_MIN: usize = 6;
pub const PASSWORD_MAX: usize = 20;

fn collect_id_pattern() -> CoreResult<&'static Regex> {
    static COLLECT_ID: OnceCell<Regex> = OnceCell::new();
    COLLECT_ID
        .get_or_try_init(|| Regex::new(r"^[0-9a-fA-F]{24}$"))
        .map_err(|e| CoreError::Internal { message: e.to_string() })
}

/// An empty collect id means "no filter"; anything else must be well formed
pub fn validate_collect_id(id: Option<&str>) -> CoreResult<()> {
    match id.map(str::trim) {
        None | Some("") => Ok(()),
        Some(id) => {
            if collect_id_pattern()?.is_match(id) {
                Ok(())
            } else {
                Err(CoreError::validation(MSG_INVALID_COLLECT_ID))
            }
        }
    }
}

pub fn validate_credentials(credentials: &Credentials) -> CoreResult<()> {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Err(CoreError::validation(MSG_MISSING_CREDENTIALS));
    }
    Ok(())
}

pub fn validate_registration(registration: &Registration) -> CoreResult<()> {
    if registration.name.trim().is_empty()
        || registration.email.trim().is_empty()
        || registration.password.is_empty()
    {
        return Err(CoreError::validation(MSG_FILL_ALL_FIELDS));
    }

    let len = registration.password.chars().count();
    if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&len) {
        return Err(CoreError::validation(MSG_PASSWORD_LENGTH));
    }

    if !registration.email.contains('@') {
        return Err(CoreError::validation(MSG_INVALID_EMAIL));
    }

    Ok(())
}

/// Trimmed school id, or the "select a school" message
pub fn validate_school_id(school_id: Option<&str>) -> CoreResult<String> {
    match school_id.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(CoreError::validation(MSG_SELECT_SCHOOL)),
    }
}

pub fn validate_custom_order_id(order_id: Option<&str>) -> CoreResult<String> {
    match order_id.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(CoreError::validation(MSG_INVALID_ORDER_ID)),
    }
}

/// Build a payment request from raw form input
pub fn validate_payment(school_id: &str, amount: &str, callback_url: &str) -> CoreResult<PaymentRequest> {
    let school_id = school_id.trim();
    if school_id.is_empty() {
        return Err(CoreError::validation(MSG_SCHOOL_ID_REQUIRED));
    }

    let amount = Decimal::from_str(amount.trim())
        .ok()
        .filter(|a| *a > Decimal::ZERO)
        .ok_or_else(|| CoreError::validation(MSG_INVALID_AMOUNT))?;

    let callback_url = callback_url.trim();
    let has_host = callback_url
        .strip_prefix("https://")
        .or_else(|| callback_url.strip_prefix("http://"))
        .map_or(false, |rest| !rest.is_empty());
    if !has_host {
        return Err(CoreError::validation(MSG_INVALID_CALLBACK));
    }

    Ok(PaymentRequest {
        school_id: school_id.to_string(),
        amount,
        callback_url: callback_url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_id() {
        assert!(validate_collect_id(Some("65F1A2B3C4D5E6F7A8B9C0D1")).is_ok());
        assert!(validate_collect_id(Some("65f1a2b3c4d5e6f7a8b9c0d")).is_err());
        assert!(validate_collect_id(Some("65f1a2b3c4d5e6f7a8b9c0d1f")).is_err());
        assert!(validate_collect_id(Some("zzf1a2b3c4d5e6f7a8b9c0d1")).is_err());

        assert!(validate_collect_id(None).is_ok());
        assert!(validate_collect_id(Some("  ")).is_ok());
        assert!(validate_collect_id(Some("65f1a2b3c4d5e6f7a8b9c0d1")).is_ok());
        let err = validate_collect_id(Some("not-an-id")).unwrap_err();
        assert_eq!(err.user_message(), Some(MSG_INVALID_COLLECT_ID));
    }

    #[test]
    fn test_registration() {
        let mut reg = Registration {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(validate_registration(&reg).is_ok());

        reg.password = "12345".to_string();
        assert_eq!(validate_registration(&reg).unwrap_err().user_message(), Some(MSG_PASSWORD_LENGTH));

        reg.password = "a".repeat(21);
        assert_eq!(validate_registration(&reg).unwrap_err().user_message(), Some(MSG_PASSWORD_LENGTH));

        reg.password = "a".repeat(20);
        assert!(validate_registration(&reg).is_ok());

        reg.email = "asha.example.com".to_string();
        assert_eq!(validate_registration(&reg).unwrap_err().user_message(), Some(MSG_INVALID_EMAIL));

        reg.name = " ".to_string();
        assert_eq!(validate_registration(&reg).unwrap_err().user_message(), Some(MSG_FILL_ALL_FIELDS));
    }

    #[test]
    fn test_credentials() {
        let creds = Credentials { email: "a@b.c".to_string(), password: String::new() };
        assert!(validate_credentials(&creds).is_err());
        let creds = Credentials { email: "a@b.c".to_string(), password: "pw".to_string() };
        assert!(validate_credentials(&creds).is_ok());
    }

    #[test]
    fn test_school_and_order_ids() {
        assert_eq!(validate_school_id(Some(" s1 ")).unwrap(), "s1");
        assert_eq!(validate_school_id(None).unwrap_err().user_message(), Some(MSG_SELECT_SCHOOL));
        assert_eq!(validate_custom_order_id(Some("ORD-9")).unwrap(), "ORD-9");
        assert_eq!(validate_custom_order_id(Some("")).unwrap_err().user_message(), Some(MSG_INVALID_ORDER_ID));
    }

    #[test]
    fn test_payment() {
        let request = validate_payment(" school-1 ", "250.75", "https://merchant.example/callback").unwrap();
        assert_eq!(request.school_id, "school-1");
        assert_eq!(request.amount, Decimal::from_str("250.75").unwrap());

        assert_eq!(
            validate_payment("", "10", "https://x.y").unwrap_err().user_message(),
            Some(MSG_SCHOOL_ID_REQUIRED)
        );
        assert_eq!(
            validate_payment("s", "0", "https://x.y").unwrap_err().user_message(),
            Some(MSG_INVALID_AMOUNT)
        );
        assert_eq!(
            validate_payment("s", "ten", "https://x.y").unwrap_err().user_message(),
            Some(MSG_INVALID_AMOUNT)
        );
        assert_eq!(
            validate_payment("s", "10", "ftp://x.y").unwrap_err().user_message(),
            Some(MSG_INVALID_CALLBACK)
        );
        assert!(validate_payment("s", "10", "https://").is_err());
    }
}
