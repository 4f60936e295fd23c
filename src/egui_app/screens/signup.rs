use std::fmt;

use crate::egui_app::screens::Dialog;
use crate::egui_app::session::SessionManager;
use crate::egui_app::validation::{
    require_filled, validate_email, validate_password, validate_password_confirmation,
};
use crate::shared::{Credentials, StoreError};

pub const TITLE_SIGNUP_FAILED: &str = "Erro no cadastro";

/// Sign-up screen state
#[derive(Default)]
pub struct SignUpController {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub show_password: bool,
    pub show_confirm_password: bool,
    in_flight: bool,
    dialog: Option<Dialog>,
}

impl fmt::Debug for SignUpController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpController")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .field("in_flight", &self.in_flight)
            .field("dialog", &self.dialog)
            .finish_non_exhaustive()
    }
}

impl SignUpController {
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
        require_filled(
            &[self.email.as_str(), self.password.as_str(), self.confirm_password.as_str()],
            "Preencha todos os campos.",
        )?;
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        validate_password_confirmation(&self.password, &self.confirm_password)?;
        Ok(Credentials::new(self.email.clone(), self.password.clone()))
    }

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
                self.dialog = Some(Dialog::for_error(&e, TITLE_SIGNUP_FAILED));
                None
            }
        }
    }

    pub fn finish(&mut self, result: Result<(), StoreError>) {
        self.in_flight = false;
        match result {
            Ok(()) => {
                self.password.clear();
                self.confirm_password.clear();
            }
            Err(e) => self.dialog = Some(Dialog::for_error(&e, TITLE_SIGNUP_FAILED)),
        }
    }

    /// Submit and await the sign-up. Returns whether a remote call was made.
    pub async fn sign_up(&mut self, sessions: &SessionManager) -> bool {
        let Some(credentials) = self.submit() else {
            return false;
        };
        let result = sessions.sign_up(&credentials).await;
        self.finish(result);
        true
    }
}
