// models/src/session.rs
//! Authenticated identity carried by the client for the lifetime of a login.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::HospitalError;

/// Closed set of roles issued by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Patient, Role::Doctor, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = HospitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            "admin" => Ok(Role::Admin),
            other => Err(HospitalError::InvalidData(format!("unknown role '{}'", other))),
        }
    }
}

/// Profile returned by `POST /auth/login`, without the token.
///
/// Fields the client does not model are kept in `extra` so the persisted
/// copy round-trips whatever the backend sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        UserProfile {
            id: id.into(),
            name: name.into(),
            email: None,
            role,
            extra: Map::new(),
        }
    }

    /// First word of the display name, used for greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// Body of a successful login: `{ token, ...profile }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(flatten)]
    pub profile: UserProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A live session. Only ever exists with a role from [`Role`].
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub display_name: String,
    pub role: Role,
    pub token: String,
    pub profile: UserProfile,
}

impl Session {
    pub fn new(token: impl Into<String>, profile: UserProfile) -> Self {
        Session {
            user_id: profile.id.clone(),
            display_name: profile.name.clone(),
            role: profile.role,
            token: token.into(),
            profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_response_splits_token_from_profile() {
        let body = json!({
            "_id": "65f0c1",
            "name": "Gregory House",
            "email": "house@ppth.org",
            "role": "doctor",
            "token": "jwt.abc.def",
            "specialization": "Diagnostics"
        });
        let parsed: LoginResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.token, "jwt.abc.def");
        assert_eq!(parsed.profile.role, Role::Doctor);
        assert_eq!(parsed.profile.extra.get("specialization"), Some(&json!("Diagnostics")));
        assert!(!parsed.profile.extra.contains_key("token"));
    }

    #[test]
    fn profile_with_unknown_role_is_rejected() {
        let body = json!({ "_id": "1", "name": "Eve", "role": "nurse" });
        assert!(serde_json::from_value::<UserProfile>(body).is_err());
    }

    #[test]
    fn profile_round_trips_extra_fields() {
        let mut profile = UserProfile::new("42", "Lisa Cuddy", Role::Admin);
        profile.extra.insert("phone".into(), json!("555-0101"));
        let text = serde_json::to_string(&profile).unwrap();
        let back: UserProfile = serde_json::from_str(&text).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn session_copies_identity_from_profile() {
        let session = Session::new("tok", UserProfile::new("7", "James Wilson", Role::Doctor));
        assert_eq!(session.user_id, "7");
        assert_eq!(session.display_name, "James Wilson");
        assert_eq!(session.profile.first_name(), "James");
    }

    #[test]
    fn role_parsing_is_exact() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("Admin".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }
}
