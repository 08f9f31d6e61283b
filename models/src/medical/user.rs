// models/src/medical/user.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ApiError;

/// Account role. Drives which profile is provisioned at registration and
/// which claims end up in issued tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Patient,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Doctor => write!(f, "doctor"),
            Role::Patient => write!(f, "patient"),
        }
    }
}

impl FromStr for Role {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "doctor" => Ok(Role::Doctor),
            "patient" => Ok(Role::Patient),
            other => Err(ApiError::validation(format!("unknown role: {other}"))),
        }
    }
}

/// Stored account row. Holds the argon2 hash, never the plaintext; the
/// outward projection is [`UserDto`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub hashed_password: String,
    pub role: Role,
}

/// Transport-safe projection of [`User`] with the password hash dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        UserDto {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for (s, role) in [("admin", Role::Admin), ("doctor", Role::Doctor), ("patient", Role::Patient)] {
            assert_eq!(Role::from_str(s).unwrap(), role);
            assert_eq!(role.to_string(), s);
        }
    }

    #[test]
    fn unknown_role_is_a_validation_error() {
        assert!(matches!(Role::from_str("nurse"), Err(ApiError::Validation(_))));
    }

    #[test]
    fn dto_drops_the_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            hashed_password: "$argon2id$...".into(),
            role: Role::Patient,
        };
        let json = serde_json::to_value(UserDto::from(&user)).unwrap();
        assert!(json.get("hashed_password").is_none());
        assert_eq!(json["username"], "alice");
    }
}
