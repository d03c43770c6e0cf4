//! Password change and reset forms.

use std::fmt;

use crate::error::ValidationErrors;

/// Shortest password the backend accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// The signed-in admin changing their own password.
///
/// The confirmation never leaves the client.
#[derive(Clone)]
pub struct PasswordChange {
    current: String,
    new: String,
    confirm: String,
}

impl PasswordChange {
    pub fn new(
        current: impl Into<String>,
        new: impl Into<String>,
        confirm: impl Into<String>,
    ) -> Self {
        Self {
            current: current.into(),
            new: new.into(),
            confirm: confirm.into(),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn new_password(&self) -> &str {
        &self.new
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.current.is_empty() {
            errors.add("currentPassword", "is required");
        }
        check_new_password(&mut errors, "newPassword", &self.new);
        if self.new != self.confirm {
            errors.add("confirmPassword", "does not match the new password");
        }
        if !self.current.is_empty() && self.new == self.current {
            errors.add("newPassword", "must differ from the current password");
        }
        errors.into_result()
    }
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChange")
            .field("current", &"[REDACTED]")
            .field("new", &"[REDACTED]")
            .field("confirm", &"[REDACTED]")
            .finish()
    }
}

/// Length rule shared by every form that sets a password.
pub fn check_new_password(errors: &mut ValidationErrors, field: &'static str, password: &str) {
    if password.is_empty() {
        errors.add(field, "is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            field,
            format!("must be at least {} characters", MIN_PASSWORD_LEN),
        );
    }
}
