//! Request payloads and their field-level validation.
//!
//! Validation here is the caller-facing policy layer: required fields and the
//! password length rule. The authenticator assumes its inputs already passed.

use crate::models::ClientStatus;
use serde::Deserialize;
use thiserror::Error;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0}")]
    MissingFields(&'static str),

    #[error("Password must be at least {MIN_PASSWORD_LEN} characters long")]
    PasswordTooShort,
}

impl ValidationError {
    /// Short label used as the `error` field of the response body.
    pub fn label(&self) -> &'static str {
        match self {
            ValidationError::MissingFields(_) => "Missing required fields",
            ValidationError::PasswordTooShort => "Invalid password",
        }
    }
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegistrationRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            &self.username,
            &self.email,
            &self.password,
            &self.first_name,
            &self.last_name,
        ];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(ValidationError::MissingFields(
                "username, email, password, first_name, and last_name are required",
            ));
        }

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }

        Ok(())
    }
}

/// Body of `POST /api/auth/login`. `login` is an email or a username.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.login.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingFields(
                "login and password are required",
            ));
        }
        Ok(())
    }
}

/// Body of `POST /api/clients/add`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub address: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub status: Option<ClientStatus>,
}

impl NewClient {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.first_name.is_empty() || self.last_name.is_empty() || self.email.is_empty() {
            return Err(ValidationError::MissingFields(
                "first_name, last_name, and email are required",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegistrationRequest {
        RegistrationRequest {
            username: "bob".into(),
            email: "bob@x.com".into(),
            password: "password123".into(),
            first_name: "Bob".into(),
            last_name: "Builder".into(),
        }
    }

    #[test]
    fn test_complete_registration_passes() {
        assert_eq!(registration().validate(), Ok(()));
    }

    #[test]
    fn test_registration_missing_field() {
        let req = RegistrationRequest {
            last_name: String::new(),
            ..registration()
        };
        let err = req.validate().unwrap_err();
        assert_eq!(err.label(), "Missing required fields");
        assert_eq!(
            err.to_string(),
            "username, email, password, first_name, and last_name are required"
        );
    }

    #[test]
    fn test_short_password_rejected() {
        let req = RegistrationRequest {
            password: "seven77".into(),
            ..registration()
        };
        assert_eq!(req.validate(), Err(ValidationError::PasswordTooShort));
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Password must be at least 8 characters long"
        );
    }

    #[test]
    fn test_missing_fields_checked_before_password_length() {
        let req = RegistrationRequest {
            username: String::new(),
            password: "short".into(),
            ..registration()
        };
        assert!(matches!(req.validate(), Err(ValidationError::MissingFields(_))));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let req = LoginRequest {
            login: "bob".into(),
            password: String::new(),
        };
        assert_eq!(
            req.validate().unwrap_err().to_string(),
            "login and password are required"
        );
    }

    #[test]
    fn test_new_client_requires_name_and_email() {
        let ok: NewClient = serde_json::from_str(
            r#"{"first_name":"Ada","last_name":"Lovelace","email":"ada@example.com"}"#,
        )
        .unwrap();
        assert!(ok.validate().is_ok());
        assert_eq!(ok.status, None);

        let missing: NewClient = serde_json::from_str(r#"{"first_name":"Ada"}"#).unwrap();
        assert_eq!(
            missing.validate().unwrap_err().to_string(),
            "first_name, last_name, and email are required"
        );
    }
}
