//! Record models for the `clients` and `users` tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a client record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Active => "active",
            ClientStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A client record.
///
/// Contact fields other than name and email are optional and stored as empty
/// strings when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub emergency_contact_name: String,
    #[serde(default)]
    pub emergency_contact_phone: String,
    #[serde(default)]
    pub status: ClientStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Coarse role tag carried in tokens. No enforcement is attached to it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Non-privileged tag assigned at registration.
    #[default]
    User,
    Admin,
    Counsellor,
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Counsellor => "counsellor",
            Role::Staff => "staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public view of a stored credential.
///
/// The password verifier is not part of this type; it only exists on the
/// stored record handled by the authenticator and the credential repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_status_defaults_to_active() {
        let now = Utc::now();
        let value = json!({
            "id": "c-1",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "created_at": now,
            "updated_at": now,
        });

        let client: Client = serde_json::from_value(value).unwrap();
        assert_eq!(client.status, ClientStatus::Active);
        assert_eq!(client.phone, "");
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_value(Role::Counsellor).unwrap(), json!("counsellor"));
        assert_eq!(Role::default(), Role::User);
        let parsed: Role = serde_json::from_value(json!("staff")).unwrap();
        assert_eq!(parsed, Role::Staff);
    }

    #[test]
    fn test_credential_json_has_no_verifier_field() {
        let now = Utc::now();
        let cred = Credential {
            id: "u-1".into(),
            username: "bob".into(),
            email: "bob@x.com".into(),
            first_name: "Bob".into(),
            last_name: "Builder".into(),
            role: Role::User,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&cred).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("password_hash"));
        assert_eq!(obj["role"], json!("user"));
    }
}
