//! Authentication endpoints: OTP dispatch and verification, PIN login,
//! token refresh.
//!
//! The token response shape varies between backend versions
//! (`access`/`access_token`/`token`, `refresh`/`refresh_token`); everything
//! is normalized into [`AuthTokens`] here so the session layer sees one
//! format.

use joldosh_shared::{Role, User};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::session::AuthTokens;

#[derive(Serialize)]
struct SendOtpRequest<'a> {
    phone_number: &'a str,
}

/// Request a one-time code dispatch to `phone`.
pub async fn send_otp(api: &ApiClient, phone: &str) -> Result<(), ApiError> {
    api.post_unit("/users/send-otp/", &SendOtpRequest { phone_number: phone })
        .await
}

/// Payload for OTP verification.  The optional fields cover the two extra
/// uses of the same endpoint: first-time registration (name + role) and PIN
/// reset (`pin_code` + `reset_pin`).
#[derive(Debug, Default, Serialize)]
pub struct VerifyOtpRequest<'a> {
    pub phone_number: &'a str,
    pub otp_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_pin: Option<bool>,
}

/// Confirm a one-time code and obtain tokens.
pub async fn verify_otp(
    api: &ApiClient,
    request: &VerifyOtpRequest<'_>,
) -> Result<AuthTokens, ApiError> {
    let raw: RawTokenResponse = api.post_json("/users/verify-otp/", request).await?;
    normalize_tokens(raw)
}

#[derive(Serialize)]
struct PinLoginRequest<'a> {
    phone_number: &'a str,
    pin_code: &'a str,
}

/// Direct login with phone + PIN.
pub async fn login_pin(api: &ApiClient, phone: &str, pin: &str) -> Result<AuthTokens, ApiError> {
    let raw: RawTokenResponse = api
        .post_json(
            "/users/login-pin/",
            &PinLoginRequest {
                phone_number: phone,
                pin_code: pin,
            },
        )
        .await?;
    normalize_tokens(raw)
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

/// Exchange a refresh token for a new access token.  The refresh endpoint
/// usually returns only the access token; the caller's refresh token is
/// carried over so it is not lost.
pub async fn refresh_token(api: &ApiClient, refresh: &str) -> Result<AuthTokens, ApiError> {
    let raw: RawTokenResponse = api
        .post_json("/users/token/refresh/", &RefreshRequest { refresh })
        .await?;
    let mut tokens = normalize_tokens(raw)?;
    if tokens.refresh.is_none() {
        tokens.refresh = Some(refresh.to_string());
    }
    Ok(tokens)
}

/// Token response as the wire actually sends it, aliases and all.
#[derive(Debug, Deserialize)]
struct RawTokenResponse {
    access: Option<String>,
    access_token: Option<String>,
    token: Option<String>,
    refresh: Option<String>,
    refresh_token: Option<String>,
    user: Option<User>,
}

fn usable(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty() && t != "undefined" && t != "null")
}

/// Collapse the field aliases into one shape; a response with no usable
/// access token is malformed, not a silent anonymous login.
fn normalize_tokens(raw: RawTokenResponse) -> Result<AuthTokens, ApiError> {
    let access = usable(raw.access)
        .or_else(|| usable(raw.access_token))
        .or_else(|| usable(raw.token))
        .ok_or_else(|| {
            ApiError::Malformed("auth response does not contain an access token".to_string())
        })?;

    let refresh = usable(raw.refresh).or_else(|| usable(raw.refresh_token));

    Ok(AuthTokens {
        access,
        refresh,
        user: raw.user,
    })
}
