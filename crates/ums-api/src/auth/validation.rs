use ums_model::Credentials;

use crate::error::ApiError;

/// Reject credentials with an empty email or password
pub fn require_credentials(credentials: &Credentials) -> Result<(), ApiError> {
    if credentials.email.is_empty() || credentials.password.is_empty() {
        return Err(ApiError::Validation(
            "Missing email or username".to_string(),
        ));
    }

    Ok(())
}
