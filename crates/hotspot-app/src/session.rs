//! Signed-in user context and the login / sign-up forms
//!
//! Screens receive a [`Session`] instead of reaching for a global current
//! user. Form validation happens here before any backend call is made.

use hotspot_core::config::AppSettings;
use hotspot_core::error::{HotspotError, Result};
use hotspot_core::models::User;
use hotspot_store::ports::{AuthProvider, Subscription};
use std::sync::Arc;

/// Which auth flow produced an error; picks the alert title and fallback text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    Login,
    Signup,
}

impl AuthFlow {
    pub fn title(&self) -> &'static str {
        match self {
            AuthFlow::Login => "Login Failed",
            AuthFlow::Signup => "Signup Error",
        }
    }

    pub fn fallback(&self) -> &'static str {
        match self {
            AuthFlow::Login => "Login failed. Please try again.",
            AuthFlow::Signup => "Signup failed. Please try again.",
        }
    }

    /// Message shown to the user for `err` in this flow
    pub fn message(&self, err: &HotspotError) -> String {
        match err {
            HotspotError::Auth(failure) => failure.user_message(self.fallback()).to_string(),
            HotspotError::Validation { reason, .. } => reason.clone(),
            _ => self.fallback().to_string(),
        }
    }
}

/// An alert ready to show: title plus message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthAlert {
    pub title: &'static str,
    pub message: String,
}

impl AuthAlert {
    pub fn from_error(flow: AuthFlow, err: &HotspotError) -> Self {
        Self {
            title: flow.title(),
            message: flow.message(err),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(HotspotError::validation(
                "login",
                "Please enter both email and password.",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub display_name: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn new(
        display_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// All fields required, and the email must belong to `domain`
    pub fn validate(&self, domain: &str) -> Result<()> {
        if self.display_name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.trim().is_empty()
        {
            return Err(HotspotError::validation("signup", "All fields are required."));
        }

        let suffix = format!("@{}", domain.trim_start_matches('@'));
        if !self.email.trim().to_lowercase().ends_with(&suffix.to_lowercase()) {
            return Err(HotspotError::validation(
                "email",
                format!("Please use your {} email.", suffix),
            ));
        }
        Ok(())
    }
}

/// The signed-in user context shared by screens
#[derive(Clone)]
pub struct Session {
    auth: Arc<dyn AuthProvider>,
    settings: AppSettings,
}

impl Session {
    pub fn new(auth: Arc<dyn AuthProvider>, settings: AppSettings) -> Self {
        Self { auth, settings }
    }

    pub fn current_user(&self) -> Option<User> {
        self.auth.current_user()
    }

    pub fn require_user(&self) -> Result<User> {
        self.current_user().ok_or(HotspotError::NotSignedIn)
    }

    /// Sign-in state changes, starting with the current state.
    /// Dropping the stream unsubscribes.
    pub fn subscribe(&self) -> Subscription<Option<User>> {
        self.auth.watch_auth()
    }

    pub async fn sign_in(&self, form: &LoginForm) -> Result<User> {
        form.validate()?;
        self.auth.sign_in(form.email.trim(), &form.password).await
    }

    pub async fn sign_up(&self, form: &SignupForm) -> Result<User> {
        form.validate(&self.settings.email_domain)?;
        self.auth
            .sign_up(form.email.trim(), &form.password, form.display_name.trim())
            .await
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.auth.sign_out().await
    }
}
