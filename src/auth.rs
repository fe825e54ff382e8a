//! Sign-in and registration form checks.
//!
//! There is no account backend: a login with the demo admin credentials
//! grants admin rights, every other login or successful registration signs
//! in a regular user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ADMIN_LOGIN: &str = "admin";
pub const ADMIN_PASSWORD: &str = "123";

/// Forms submitted faster than this (in ms) after opening count as bots
pub const MIN_FILL_MILLIS: i64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The hidden field was filled in
    #[error("submission rejected")]
    Honeypot,
    #[error("Bitte füllen Sie das Formular langsamer aus (Spam-Schutz).")]
    TooFast,
    #[error("Passwörter stimmen nicht überein.")]
    PasswordMismatch,
    #[error("Bitte akzeptieren Sie die AGB und Datenschutzbestimmungen.")]
    TermsNotAccepted,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub name: String,
    pub surname: String,
    /// Invisible to people; only bots fill it
    pub honeypot: String,
    pub terms_accepted: bool,
    pub opened_at: DateTime<Utc>,
}

impl AuthForm {
    pub fn new(mode: AuthMode, opened_at: DateTime<Utc>) -> Self {
        Self {
            mode,
            email: String::new(),
            password: String::new(),
            password_confirm: String::new(),
            name: String::new(),
            surname: String::new(),
            honeypot: String::new(),
            terms_accepted: false,
            opened_at,
        }
    }

    pub fn login(email: impl Into<String>, password: impl Into<String>, opened_at: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Self::new(AuthMode::Login, opened_at)
        }
    }

    /// Check the form as submitted at `now` and decide the role
    pub fn submit(&self, now: DateTime<Utc>) -> Result<Role, AuthError> {
        if !self.honeypot.is_empty() {
            return Err(AuthError::Honeypot);
        }
        if (now - self.opened_at).num_milliseconds() < MIN_FILL_MILLIS {
            return Err(AuthError::TooFast);
        }

        match self.mode {
            AuthMode::Login => {
                if self.email.to_lowercase() == ADMIN_LOGIN && self.password == ADMIN_PASSWORD {
                    Ok(Role::Admin)
                } else {
                    Ok(Role::User)
                }
            }
            AuthMode::Register => {
                if self.password != self.password_confirm {
                    return Err(AuthError::PasswordMismatch);
                }
                if !self.terms_accepted {
                    return Err(AuthError::TermsNotAccepted);
                }
                Ok(Role::User)
            }
        }
    }
}

/// Strength meter shown while registering, 0 to 4
pub fn password_strength(password: &str) -> u8 {
    let len = password.chars().count();
    [
        len > 5,
        len > 8,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
    ]
    .iter()
    .filter(|hit| **hit)
    .count() as u8
}
