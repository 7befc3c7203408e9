//! Phone, PIN and one-time-code format validation.
//!
//! The marketplace targets a single national numbering plan, so the accepted
//! phone format is fixed: `+996` followed by exactly nine digits.  Invalid
//! input is rejected with a format-specific error, never silently coerced.

use crate::error::ValidationError;

/// Country calling code prefix accepted by the backend.
pub const PHONE_PREFIX: &str = "+996";

/// Number of subscriber digits after the country prefix.
pub const SUBSCRIBER_DIGITS: usize = 9;

/// Length of PIN codes and one-time codes.
pub const CODE_DIGITS: usize = 4;

/// Trim surrounding whitespace.  Run on every phone input before validation
/// or any network call.
pub fn normalize_phone(raw: &str) -> &str {
    raw.trim()
}

/// Validate a normalized phone number against the canonical
/// `+996XXXXXXXXX` format.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        return Err(ValidationError::PhoneEmpty);
    }
    let Some(subscriber) = phone.strip_prefix(PHONE_PREFIX) else {
        return Err(ValidationError::PhoneFormat);
    };
    if subscriber.len() != SUBSCRIBER_DIGITS
        || !subscriber.chars().all(|c| c.is_ascii_digit())
    {
        return Err(ValidationError::PhoneFormat);
    }
    Ok(())
}

/// Validate a 4-digit PIN.
pub fn validate_pin(pin: &str) -> Result<(), ValidationError> {
    if pin.len() != CODE_DIGITS || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PinFormat);
    }
    Ok(())
}

/// Validate a 4-digit one-time code.
pub fn validate_otp_code(code: &str) -> Result<(), ValidationError> {
    if code.len() != CODE_DIGITS || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::OtpFormat);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_canonical_number() {
        assert!(validate_phone("+996555123456").is_ok());
        assert!(validate_phone("+996700112233").is_ok());
    }

    #[test]
    fn rejects_short_number() {
        assert_eq!(
            validate_phone("+996555123"),
            Err(ValidationError::PhoneFormat)
        );
    }

    #[test]
    fn rejects_missing_plus() {
        assert_eq!(
            validate_phone("996555123456"),
            Err(ValidationError::PhoneFormat)
        );
    }

    #[test]
    fn rejects_long_number_and_letters() {
        assert_eq!(
            validate_phone("+9965551234567"),
            Err(ValidationError::PhoneFormat)
        );
        assert_eq!(
            validate_phone("+99655512345a"),
            Err(ValidationError::PhoneFormat)
        );
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(validate_phone(""), Err(ValidationError::PhoneEmpty));
    }

    #[test]
    fn normalize_trims_whitespace() {
        assert_eq!(normalize_phone("  +996555123456\n"), "+996555123456");
    }

    #[test]
    fn pin_must_be_four_digits() {
        assert!(validate_pin("1234").is_ok());
        assert_eq!(validate_pin("123"), Err(ValidationError::PinFormat));
        assert_eq!(validate_pin("12345"), Err(ValidationError::PinFormat));
        assert_eq!(validate_pin("12a4"), Err(ValidationError::PinFormat));
    }

    #[test]
    fn otp_must_be_four_digits() {
        assert!(validate_otp_code("0042").is_ok());
        assert_eq!(validate_otp_code("42"), Err(ValidationError::OtpFormat));
    }
}
