use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Administrative status of an account. Blocked users cannot log in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[serde(alias = "active")]
    Unblocked,
    Blocked,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unblocked => "unblocked",
            Self::Blocked => "blocked",
        }
    }

    pub fn is_blocked(self) -> bool {
        self == Self::Blocked
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown user status {0:?}")]
pub struct UnknownStatus(pub String);

impl std::str::FromStr for UserStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unblocked" | "active" => Ok(Self::Unblocked),
            "blocked" => Ok(Self::Blocked),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for UserStatus {
    type Error = UnknownStatus;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    #[sqlx(try_from = "String")]
    pub status: UserStatus,
    pub password: String, // bcrypt hash
    #[serde(with = "time::serde::rfc3339")]
    pub last_seen: OffsetDateTime,
}

/// Fields supplied at registration; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub role: String,
    pub status: UserStatus,
    pub password_hash: String,
    pub last_seen: OffsetDateTime,
}
