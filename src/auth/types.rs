use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::db::entities::user;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub email: String,
    pub iat: u64, // issued at (unix)
    pub exp: u64, // expiry (unix)
}

/// The principal attached to a request once its bearer token checks out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
        }
    }
}

/// Public view of a user row. Never carries the password hash.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
}

impl From<user::Model> for UserProfile {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: UserProfile,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{Claims, UserProfile};
    use crate::db::entities::user;

    #[test]
    fn claims_use_camel_case_user_id_on_the_wire() {
        let claims = Claims {
            user_id: 12,
            email: "a@b.com".to_string(),
            iat: 1,
            exp: 2,
        };

        let json = serde_json::to_value(&claims).expect("claims should serialize");

        assert_eq!(json["userId"], 12);
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn profile_serialization_has_no_password_field() {
        let profile = UserProfile::from(user::Model {
            id: 1,
            email: "a@b.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            name: "A".to_string(),
            created_at: Utc::now().fixed_offset(),
        });

        let json = serde_json::to_string(&profile).expect("profile should serialize");

        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
    }
}
