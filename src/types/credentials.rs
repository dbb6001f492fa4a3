use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Credentials for signing in. Sent form-encoded, never as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginParams {
    /// The user's login name.
    pub username: String,

    /// The user's password.
    pub password: String,
}

impl LoginParams {
    /// Creates login parameters.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Request body for creating an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterParams {
    /// The desired login name.
    pub username: String,

    /// The user's email address.
    pub email: String,

    /// The user's password.
    pub password: String,
}

/// An unvalidated registration form.
///
/// Validation happens entirely client-side and blocks submission: a form
/// that fails [`RegisterForm::validate`] never reaches the network.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    /// The desired login name.
    pub username: String,

    /// The user's email address.
    pub email: String,

    /// The user's password.
    pub password: String,

    /// Password confirmation. Must match `password` exactly.
    pub confirm_password: String,

    /// Whether the user accepted the terms and conditions.
    pub accepted_terms: bool,
}

impl RegisterForm {
    /// Validates the form and produces the request parameters.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the terms are not accepted or the
    /// passwords do not match.
    pub fn validate(self) -> Result<RegisterParams> {
        if !self.accepted_terms {
            return Err(Error::validation(
                "Please agree to the Terms and Conditions to continue.",
                Some("terms".to_string()),
            ));
        }
        if self.password != self.confirm_password {
            return Err(Error::validation(
                "Passwords do not match",
                Some("password".to_string()),
            ));
        }
        Ok(RegisterParams {
            username: self.username,
            email: self.email,
            password: self.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegisterForm {
        RegisterForm {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
            confirm_password: "hunter2".to_string(),
            accepted_terms: true,
        }
    }

    #[test]
    fn valid_form_produces_params() {
        let params = form().validate().unwrap();
        assert_eq!(params.username, "ada");
        assert_eq!(params.email, "ada@example.com");
        assert_eq!(params.password, "hunter2");
    }

    #[test]
    fn mismatched_passwords_rejected() {
        let mut f = form();
        f.confirm_password = "hunter3".to_string();
        let err = f.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Passwords do not match"));
    }

    #[test]
    fn unaccepted_terms_rejected() {
        let mut f = form();
        f.accepted_terms = false;
        let err = f.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Terms and Conditions"));
    }

    #[test]
    fn terms_checked_before_passwords() {
        let mut f = form();
        f.accepted_terms = false;
        f.confirm_password = "different".to_string();
        let err = f.validate().unwrap_err();
        assert!(err.to_string().contains("Terms and Conditions"));
    }

    #[test]
    fn register_params_serialize() {
        let params = form().validate().unwrap();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "username": "ada",
                "email": "ada@example.com",
                "password": "hunter2"
            })
        );
    }
}
