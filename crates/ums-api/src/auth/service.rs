//! Canned authentication: a single recognized test account, no password check.

use ums_model::{Credentials, LoginResponse, RegisterResponse, UserId};

use crate::error::ApiError;

/// The only account the mock recognizes
pub const TEST_ACCOUNT_EMAIL: &str = "eve.holt@reqres.in";
/// Token handed out for [`TEST_ACCOUNT_EMAIL`]
pub const TEST_ACCOUNT_TOKEN: &str = "QpwL5tke4Pnpja7X4";
/// Id reported when registering [`TEST_ACCOUNT_EMAIL`]
pub const TEST_ACCOUNT_ID: UserId = 4;

/// Exact match, the way reqres compares emails
fn is_test_account(credentials: &Credentials) -> bool {
    credentials.email == TEST_ACCOUNT_EMAIL
}

pub fn login(credentials: &Credentials) -> Result<LoginResponse, ApiError> {
    if !is_test_account(credentials) {
        tracing::debug!(email = %credentials.email, "Login for unknown account");
        return Err(ApiError::BadRequest("user not found".to_string()));
    }

    Ok(LoginResponse {
        token: TEST_ACCOUNT_TOKEN.to_string(),
    })
}

pub fn register(credentials: &Credentials) -> Result<RegisterResponse, ApiError> {
    if !is_test_account(credentials) {
        return Err(ApiError::BadRequest(
            format!("Note: Only defined \"{TEST_ACCOUNT_EMAIL}\" succeeds in this mock"),
        ));
    }

    Ok(RegisterResponse {
        id: TEST_ACCOUNT_ID,
        token: TEST_ACCOUNT_TOKEN.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_known_account() {
        let response = login(&Credentials::new("eve.holt@reqres.in", "cityslicka")).unwrap();
        assert_eq!(response.token, TEST_ACCOUNT_TOKEN);

        assert!(login(&Credentials::new(" eve.holt@reqres.in", "x")).is_err());
        assert!(login(&Credentials::new("Eve.Holt@reqres.in", "x")).is_err());
    }

    #[test]
    fn test_login_unknown_account() {
        let err = login(&Credentials::new("peter@klaven", "cityslicka")).unwrap_err();
        assert_eq!(err.to_string(), "user not found");
    }

    #[test]
    fn test_register() {
        let response = register(&Credentials::new("eve.holt@reqres.in", "pistol")).unwrap();
        assert_eq!(response.id, 4);
        assert_eq!(response.token, TEST_ACCOUNT_TOKEN);

        let err = register(&Credentials::new("sydney@fife", "pistol")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Note: Only defined \"eve.holt@reqres.in\" succeeds in this mock"
        );
    }
}
