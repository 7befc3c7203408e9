use thiserror::Error;

/// Client-side input validation failures.
///
/// These are caught before any network call and surfaced inline on the
/// originating field; they are never sent to the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Phone number is required")]
    PhoneEmpty,

    #[error("Phone number must look like +996XXXXXXXXX")]
    PhoneFormat,

    #[error("PIN must be exactly 4 digits")]
    PinFormat,

    #[error("PIN codes do not match")]
    PinMismatch,

    #[error("Verification code must be exactly 4 digits")]
    OtpFormat,
}
