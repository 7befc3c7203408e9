//! Auth flow controllers.
//!
//! The two login flows are explicit state machines, independent of any UI
//! framework: a view layer renders the current state and calls the
//! transition methods.  All validation runs before any network call, backend
//! rejections surface verbatim, and the state is preserved on every error so
//! the user can correct and retry.  Duplicate submissions are refused
//! uniformly here ([`FlowError::Busy`]) rather than by per-view button
//! disabling.

use joldosh_shared::{phone, Role, User, ValidationError};

use crate::api::{auth as auth_api, users as users_api};
use crate::error::FlowError;
use crate::http::ApiClient;
use crate::session::AuthTokens;

/// Finish a login: store the tokens, then make sure a user record is cached.
/// When the token response carried no user (registration responses often
/// don't), the profile is fetched with the fresh token.
async fn complete_login(api: &ApiClient, tokens: AuthTokens) -> Result<User, FlowError> {
    let cached = tokens.user.clone();
    api.session().login(tokens)?;
    match cached {
        Some(user) => Ok(user),
        None => Ok(users_api::refresh_user(api).await?),
    }
}

// ---------------------------------------------------------------------------
// OTP flow
// ---------------------------------------------------------------------------

/// Steps of the one-time-code login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpState {
    /// Waiting for a phone number.
    CollectingPhone,
    /// A code was dispatched to `phone`; waiting for it to be entered.
    CodeSent { phone: String },
    /// Login finished; the flow is done.
    Authenticated,
}

/// Phone → code → token login (also used for registration, which submits a
/// name and role together with the code).
pub struct OtpFlow {
    state: OtpState,
    in_flight: bool,
}

impl Default for OtpFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl OtpFlow {
    pub fn new() -> Self {
        Self {
            state: OtpState::CollectingPhone,
            in_flight: false,
        }
    }

    pub fn state(&self) -> &OtpState {
        &self.state
    }

    /// Whether a submission is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    fn guard_idle(&self) -> Result<(), FlowError> {
        if self.in_flight {
            Err(FlowError::Busy)
        } else {
            Ok(())
        }
    }

    /// `CollectingPhone -> CodeSent`: validate the phone and request a code
    /// dispatch.  On failure the flow stays in `CollectingPhone` and the
    /// backend's message is surfaced.
    pub async fn submit_phone(&mut self, api: &ApiClient, raw_phone: &str) -> Result<(), FlowError> {
        self.guard_idle()?;
        let phone_number = phone::normalize_phone(raw_phone).to_string();
        phone::validate_phone(&phone_number)?;

        self.in_flight = true;
        let result = auth_api::send_otp(api, &phone_number).await;
        self.in_flight = false;
        result?;

        tracing::debug!("otp dispatched, awaiting code");
        self.state = OtpState::CodeSent {
            phone: phone_number,
        };
        Ok(())
    }

    /// `CodeSent -> Authenticated`: verify the code for the captured phone.
    /// On failure the flow remains in `CodeSent` with the error surfaced.
    pub async fn submit_code(&mut self, api: &ApiClient, code: &str) -> Result<User, FlowError> {
        self.confirm(api, code, None).await
    }

    /// Registration variant: the name and role ride along with the code.
    pub async fn submit_code_with_registration(
        &mut self,
        api: &ApiClient,
        code: &str,
        full_name: &str,
        role: Role,
    ) -> Result<User, FlowError> {
        self.confirm(api, code, Some((full_name, role))).await
    }

    async fn confirm(
        &mut self,
        api: &ApiClient,
        code: &str,
        registration: Option<(&str, Role)>,
    ) -> Result<User, FlowError> {
        self.guard_idle()?;
        let OtpState::CodeSent { phone: phone_number } = &self.state else {
            return Err(FlowError::WrongStep);
        };
        let phone_number = phone_number.clone();

        let code = code.trim();
        phone::validate_otp_code(code)?;

        let request = auth_api::VerifyOtpRequest {
            phone_number: &phone_number,
            otp_code: code,
            full_name: registration.map(|(name, _)| name),
            role: registration.map(|(_, role)| role),
            ..Default::default()
        };

        self.in_flight = true;
        let result = auth_api::verify_otp(api, &request).await;
        self.in_flight = false;
        let tokens = result?;

        let user = complete_login(api, tokens).await?;
        self.state = OtpState::Authenticated;
        Ok(user)
    }

    /// `CodeSent -> CollectingPhone`: discard the entered code and any
    /// result of an in-flight request.
    pub fn back(&mut self) {
        if matches!(self.state, OtpState::CodeSent { .. }) {
            self.state = OtpState::CollectingPhone;
            self.in_flight = false;
        }
    }
}

// ---------------------------------------------------------------------------
// PIN flow
// ---------------------------------------------------------------------------

/// Steps of the PIN login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinState {
    /// Waiting for phone + PIN.
    PinEntry,
    /// A reset code was dispatched to `phone`; waiting for the code and a
    /// new PIN.
    OtpReset { phone: String },
    /// Login finished; the flow is done.
    Authenticated,
}

/// Phone + PIN login, with an OTP-backed escape hatch for forgotten PINs.
pub struct PinFlow {
    state: PinState,
    in_flight: bool,
}

impl Default for PinFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl PinFlow {
    pub fn new() -> Self {
        Self {
            state: PinState::PinEntry,
            in_flight: false,
        }
    }

    pub fn state(&self) -> &PinState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    fn guard_idle(&self) -> Result<(), FlowError> {
        if self.in_flight {
            Err(FlowError::Busy)
        } else {
            Ok(())
        }
    }

    /// `PinEntry -> Authenticated`: direct login.  On failure the flow stays
    /// in `PinEntry` with the backend's message surfaced verbatim.
    pub async fn login(
        &mut self,
        api: &ApiClient,
        raw_phone: &str,
        pin: &str,
    ) -> Result<User, FlowError> {
        self.guard_idle()?;
        if self.state != PinState::PinEntry {
            return Err(FlowError::WrongStep);
        }
        let phone_number = phone::normalize_phone(raw_phone).to_string();
        phone::validate_phone(&phone_number)?;
        phone::validate_pin(pin)?;

        self.in_flight = true;
        let result = auth_api::login_pin(api, &phone_number, pin).await;
        self.in_flight = false;
        let tokens = result?;

        let user = complete_login(api, tokens).await?;
        self.state = PinState::Authenticated;
        Ok(user)
    }

    /// `PinEntry -> OtpReset`: request a one-time code to reset a forgotten
    /// PIN.  Requires a valid phone.
    pub async fn request_reset(&mut self, api: &ApiClient, raw_phone: &str) -> Result<(), FlowError> {
        self.guard_idle()?;
        if self.state != PinState::PinEntry {
            return Err(FlowError::WrongStep);
        }
        let phone_number = phone::normalize_phone(raw_phone).to_string();
        phone::validate_phone(&phone_number)?;

        self.in_flight = true;
        let result = auth_api::send_otp(api, &phone_number).await;
        self.in_flight = false;
        result?;

        self.state = PinState::OtpReset {
            phone: phone_number,
        };
        Ok(())
    }

    /// `OtpReset -> Authenticated`: one-time code + new PIN + confirmation.
    ///
    /// New/confirmation equality is checked client-side before any network
    /// call; a mismatch never leaves the device.
    pub async fn submit_reset(
        &mut self,
        api: &ApiClient,
        code: &str,
        new_pin: &str,
        confirm_pin: &str,
    ) -> Result<User, FlowError> {
        self.guard_idle()?;
        let PinState::OtpReset { phone: phone_number } = &self.state else {
            return Err(FlowError::WrongStep);
        };
        let phone_number = phone_number.clone();

        let code = code.trim();
        phone::validate_otp_code(code)?;
        phone::validate_pin(new_pin)?;
        if new_pin != confirm_pin {
            return Err(FlowError::Validation(ValidationError::PinMismatch));
        }

        let request = auth_api::VerifyOtpRequest {
            phone_number: &phone_number,
            otp_code: code,
            pin_code: Some(new_pin),
            reset_pin: Some(true),
            ..Default::default()
        };

        self.in_flight = true;
        let result = auth_api::verify_otp(api, &request).await;
        self.in_flight = false;
        let tokens = result?;

        let user = complete_login(api, tokens).await?;
        self.state = PinState::Authenticated;
        Ok(user)
    }

    /// `OtpReset -> PinEntry`: abandon the reset.
    pub fn back(&mut self) {
        if matches!(self.state, PinState::OtpReset { .. }) {
            self.state = PinState::PinEntry;
            self.in_flight = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use crate::session::SessionResolution;
    use crate::testing;

    #[tokio::test]
    async fn otp_scenario_wrong_code_then_right_code() {
        let backend = testing::spawn_backend().await;
        let dir = tempfile::tempdir().unwrap();
        let session = testing::test_session(&dir);
        session.initialize().unwrap();
        let api = testing::test_client(&backend, session.clone());

        let mut flow = OtpFlow::new();
        assert_eq!(*flow.state(), OtpState::CollectingPhone);

        flow.submit_phone(&api, "+996700112233").await.unwrap();
        assert_eq!(
            *flow.state(),
            OtpState::CodeSent {
                phone: "+996700112233".to_string()
            }
        );

        // wrong code: error surfaced, still waiting on the code
        let err = flow.submit_code(&api, "0000").await.unwrap_err();
        assert!(matches!(err, FlowError::Business(ref m) if m == "Invalid code"));
        assert!(matches!(*flow.state(), OtpState::CodeSent { .. }));
        assert!(!session.is_authenticated());

        // right code: authenticated with the returned user cached
        let user = flow.submit_code(&api, "1234").await.unwrap();
        assert_eq!(user.phone_number, "+996700112233");
        assert_eq!(*flow.state(), OtpState::Authenticated);
        assert_eq!(session.resolution(), SessionResolution::Authenticated);
        assert_eq!(session.user().unwrap().id, user.id);
    }

    #[tokio::test]
    async fn invalid_phone_is_rejected_without_network() {
        let backend = testing::spawn_backend().await;
        let dir = tempfile::tempdir().unwrap();
        let session = testing::test_session(&dir);
        session.initialize().unwrap();
        let api = testing::test_client(&backend, session);

        let mut flow = OtpFlow::new();
        for bad in ["996555123456", "+996555123", ""] {
            let err = flow.submit_phone(&api, bad).await.unwrap_err();
            assert!(matches!(err, FlowError::Validation(_)), "{bad:?}");
            assert_eq!(*flow.state(), OtpState::CollectingPhone);
        }
        assert_eq!(backend.hits.send_otp.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn phone_is_trimmed_before_submission() {
        let backend = testing::spawn_backend().await;
        let dir = tempfile::tempdir().unwrap();
        let session = testing::test_session(&dir);
        session.initialize().unwrap();
        let api = testing::test_client(&backend, session);

        let mut flow = OtpFlow::new();
        flow.submit_phone(&api, "  +996700112233 ").await.unwrap();
        assert_eq!(
            *flow.state(),
            OtpState::CodeSent {
                phone: "+996700112233".to_string()
            }
        );
    }

    #[tokio::test]
    async fn send_otp_failure_keeps_collecting_phone_with_backend_message() {
        let backend = testing::spawn_backend().await;
        let dir = tempfile::tempdir().unwrap();
        let session = testing::test_session(&dir);
        session.initialize().unwrap();
        let api = testing::test_client(&backend, session);

        let mut flow = OtpFlow::new();
        // the fixture rate-limits this number
        let err = flow.submit_phone(&api, "+996999999999").await.unwrap_err();
        assert!(matches!(err, FlowError::Business(ref m) if m == "Too many requests"));
        assert_eq!(*flow.state(), OtpState::CollectingPhone);
    }

    #[tokio::test]
    async fn back_discards_entered_code() {
        let backend = testing::spawn_backend().await;
        let dir = tempfile::tempdir().unwrap();
        let session = testing::test_session(&dir);
        session.initialize().unwrap();
        let api = testing::test_client(&backend, session);

        let mut flow = OtpFlow::new();
        flow.submit_phone(&api, "+996700112233").await.unwrap();
        flow.back();
        assert_eq!(*flow.state(), OtpState::CollectingPhone);

        // submitting a code now is a step error, not a network call
        let err = flow.submit_code(&api, "1234").await.unwrap_err();
        assert!(matches!(err, FlowError::WrongStep));
        assert_eq!(backend.hits.verify_otp.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn pin_login_success_and_failure() {
        let backend = testing::spawn_backend().await;
        let dir = tempfile::tempdir().unwrap();
        let session = testing::test_session(&dir);
        session.initialize().unwrap();
        let api = testing::test_client(&backend, session.clone());

        let mut flow = PinFlow::new();

        // wrong PIN: verbatim backend message, state preserved
        let err = flow.login(&api, "+996700112233", "0000").await.unwrap_err();
        assert!(matches!(err, FlowError::Business(ref m) if m == "Invalid PIN"));
        assert_eq!(*flow.state(), PinState::PinEntry);
        assert!(!session.is_authenticated());

        // right PIN
        flow.login(&api, "+996700112233", "4321").await.unwrap();
        assert_eq!(*flow.state(), PinState::Authenticated);
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn pin_format_is_checked_before_network() {
        let backend = testing::spawn_backend().await;
        let dir = tempfile::tempdir().unwrap();
        let session = testing::test_session(&dir);
        session.initialize().unwrap();
        let api = testing::test_client(&backend, session);

        let mut flow = PinFlow::new();
        let err = flow.login(&api, "+996700112233", "12").await.unwrap_err();
        assert!(matches!(
            err,
            FlowError::Validation(ValidationError::PinFormat)
        ));
        assert_eq!(backend.hits.login_pin.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn pin_reset_mismatch_never_reaches_the_network() {
        let backend = testing::spawn_backend().await;
        let dir = tempfile::tempdir().unwrap();
        let session = testing::test_session(&dir);
        session.initialize().unwrap();
        let api = testing::test_client(&backend, session);

        let mut flow = PinFlow::new();
        flow.request_reset(&api, "+996700112233").await.unwrap();
        assert!(matches!(*flow.state(), PinState::OtpReset { .. }));
        assert_eq!(backend.hits.send_otp.load(Ordering::SeqCst), 1);

        let err = flow
            .submit_reset(&api, "1234", "1111", "2222")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FlowError::Validation(ValidationError::PinMismatch)
        ));
        // no verification request was issued for a client-detectable mismatch
        assert_eq!(backend.hits.verify_otp.load(Ordering::SeqCst), 0);
        assert!(matches!(*flow.state(), PinState::OtpReset { .. }));
    }

    #[tokio::test]
    async fn pin_reset_happy_path() {
        let backend = testing::spawn_backend().await;
        let dir = tempfile::tempdir().unwrap();
        let session = testing::test_session(&dir);
        session.initialize().unwrap();
        let api = testing::test_client(&backend, session.clone());

        let mut flow = PinFlow::new();
        flow.request_reset(&api, "+996700112233").await.unwrap();
        let user = flow
            .submit_reset(&api, "1234", "7777", "7777")
            .await
            .unwrap();
        assert_eq!(user.phone_number, "+996700112233");
        assert_eq!(*flow.state(), PinState::Authenticated);
        assert!(session.is_authenticated());
        // the reset payload actually reached the backend
        assert_eq!(backend.hits.verify_otp.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn registration_sends_name_and_role() {
        let backend = testing::spawn_backend().await;
        let dir = tempfile::tempdir().unwrap();
        let session = testing::test_session(&dir);
        session.initialize().unwrap();
        let api = testing::test_client(&backend, session.clone());

        let mut flow = OtpFlow::new();
        flow.submit_phone(&api, "+996700112233").await.unwrap();
        let user = flow
            .submit_code_with_registration(&api, "1234", "Aidana", Role::Driver)
            .await
            .unwrap();
        assert_eq!(user.phone_number, "+996700112233");
        assert!(session.is_authenticated());
    }
}
