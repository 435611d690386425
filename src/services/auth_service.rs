use std::sync::Arc;

use crate::{
    auth::{
        AuthSession, Claims, UserProfile,
        jwt::{JwtKeys, decode_token, encode_token, make_claims},
        password::{PasswordHasher, validate_password},
    },
    config::AuthConfig,
    db::{
        dao::{DaoLayerError, NewUser, UserStore},
        entities::user,
    },
};

use super::{ServiceError, ServiceResult, UserId};

const EMAIL_TAKEN: &str = "Email already registered";

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt: JwtKeys,
    hasher: PasswordHasher,
    token_ttl_secs: u64,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, cfg: &AuthConfig) -> ServiceResult<Self> {
        Ok(Self {
            users,
            jwt: JwtKeys::from_secret(cfg.jwt_secret.as_bytes()),
            hasher: PasswordHasher::new(cfg.password_hash_memory_kib, cfg.password_hash_iterations)?,
            token_ttl_secs: cfg.token_ttl_secs,
        })
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> ServiceResult<AuthSession> {
        let email = normalize_email(email);
        if email.is_empty() || !email.contains('@') {
            return Err(ServiceError::validation("Valid email is required"));
        }
        validate_password(password)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("Name is required"));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::conflict(EMAIL_TAKEN));
        }

        let password_hash = self.hash_password(password).await?;
        let user = self
            .users
            .create_user(NewUser {
                email,
                password_hash,
                name: name.to_string(),
            })
            .await
            .map_err(|err| match err {
                // lost a race with a concurrent registration
                DaoLayerError::UniqueViolation(_) => ServiceError::conflict(EMAIL_TAKEN),
                other => ServiceError::Store(other),
            })?;

        tracing::info!(user_id = user.id, "registered user");
        self.issue_session(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<AuthSession> {
        if email.is_empty() || password.is_empty() {
            return Err(ServiceError::validation("Email and password are required"));
        }
        let email = normalize_email(email);

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash).await? {
            return Err(ServiceError::InvalidCredentials);
        }

        self.issue_session(user)
    }

    pub fn verify_token(&self, token: &str) -> ServiceResult<Claims> {
        decode_token(&self.jwt, token)
    }

    pub async fn user_from_token(&self, token: &str) -> ServiceResult<UserProfile> {
        let claims = self.verify_token(token)?;
        self.user_profile(claims.user_id).await
    }

    pub async fn user_profile(&self, user_id: i32) -> ServiceResult<UserProfile> {
        let user_id = UserId::new(user_id)?;
        self.users
            .find_by_id(user_id.get())
            .await?
            .map(UserProfile::from)
            .ok_or(ServiceError::NotFound("User not found"))
    }

    fn issue_session(&self, user: user::Model) -> ServiceResult<AuthSession> {
        let claims = make_claims(user.id, &user.email, self.token_ttl_secs);
        let token = encode_token(&self.jwt, &claims)?;
        Ok(AuthSession {
            user: UserProfile::from(user),
            token,
        })
    }

    async fn hash_password(&self, password: &str) -> ServiceResult<String> {
        let hasher = self.hasher.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| ServiceError::internal(format!("Password hashing task failed: {err}")))?
    }

    async fn verify_password(&self, password: &str, hash: &str) -> ServiceResult<bool> {
        let hasher = self.hasher.clone();
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|err| ServiceError::internal(format!("Password check task failed: {err}")))?
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
