//! Form checks that run before anything is sent to the remote API.

use thiserror::Error;
use ums_model::{Credentials, NewUser, UserPatch};
use validator::ValidateEmail;

use crate::session::RegistrationForm;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

fn require(value: &str, label: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError(format!("{label} is required")));
    }
    Ok(())
}

/// Validate email format using the validator crate
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    require(email, "Email")?;

    if !email.validate_email() {
        return Err(ValidationError::new("Invalid email format"));
    }

    Ok(())
}

/// First name, last name and email are required; the avatar is optional
pub fn validate_new_user(draft: &NewUser) -> Result<(), ValidationError> {
    require(&draft.first_name, "First name")?;
    require(&draft.last_name, "Last name")?;
    validate_email(&draft.email)
}

/// Every supplied field must be non-empty, and at least one must be supplied
pub fn validate_patch(patch: &UserPatch) -> Result<(), ValidationError> {
    if patch.is_empty() {
        return Err(ValidationError::new("Nothing to update"));
    }
    if let Some(first_name) = &patch.first_name {
        require(first_name, "First name")?;
    }
    if let Some(last_name) = &patch.last_name {
        require(last_name, "Last name")?;
    }
    if let Some(email) = &patch.email {
        validate_email(email)?;
    }
    Ok(())
}

pub fn validate_credentials(credentials: &Credentials) -> Result<(), ValidationError> {
    require(&credentials.email, "Email")?;
    require(&credentials.password, "Password")
}

pub fn validate_registration(form: &RegistrationForm) -> Result<(), ValidationError> {
    require(&form.email, "Email")?;
    require(&form.password, "Password")?;

    if form.password != form.confirm_password {
        return Err(ValidationError::new("Passwords don't match"));
    }

    Ok(())
}
