use std::fmt;

use crate::egui_app::screens::Dialog;
use crate::egui_app::session::SessionManager;
use crate::egui_app::validation::{require_filled, validate_email, validate_password};
use crate::shared::{Credentials, StoreError};

pub const TITLE_LOGIN_FAILED: &str = "Erro no login";

/// Login screen state
#[derive(Default)]
pub struct LoginController {
    pub email: String,
    pub password: String,
    pub show_password: bool,
    in_flight: bool,
    dialog: Option<Dialog>,
}

impl fmt::Debug for LoginController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginController")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("in_flight", &self.in_flight)
            .field("dialog", &self.dialog)
            .finish_non_exhaustive()
    }
}

impl LoginController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    fn validate(&self) -> Result<Credentials, StoreError> {
        require_filled(&[self.email.as_str(), self.password.as_str()], "Preencha o e-mail e a senha.")?;
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        Ok(Credentials::new(self.email.clone(), self.password.clone()))
    }

    /// Validate and mark the login in flight.
    ///
    /// `None` when already in flight or the input is rejected (the
    /// rejection is left in `dialog`).
    pub fn submit(&mut self) -> Option<Credentials> {
        if self.in_flight {
            return None;
        }
        match self.validate() {
            Ok(credentials) => {
                self.in_flight = true;
                Some(credentials)
            }
            Err(e) => {
                self.dialog = Some(Dialog::for_error(&e, TITLE_LOGIN_FAILED));
                None
            }
        }
    }

    /// Apply the sign-in result. Navigation follows from the session signal.
    pub fn finish(&mut self, result: Result<(), StoreError>) {
        self.in_flight = false;
        match result {
            Ok(()) => self.password.clear(),
            Err(e) => self.dialog = Some(Dialog::for_error(&e, TITLE_LOGIN_FAILED)),
        }
    }

    /// Submit and await the sign-in. Returns whether a remote call was made.
    pub async fn login(&mut self, sessions: &SessionManager) -> bool {
        let Some(credentials) = self.submit() else {
            return false;
        };
        let result = sessions.sign_in(&credentials).await;
        self.finish(result);
        true
    }
}
