// security/src/auth.rs

use std::sync::Arc;

use serde::Deserialize;
use tokio::task;
use uuid::Uuid;

use models::errors::{ApiError, ApiResult};
use models::medical::{
    DoctorProfile, PatientProfile, Registration, Role, RoleProfile, User, UserDto,
};
use store::Datastore;

use crate::password;
use crate::tokens::{TokenResponse, TokenService, AUTH_CODE_SCOPE};

/// The one confidential client allowed to exchange authorization codes.
#[derive(Debug, Clone)]
pub struct RegisteredClient {
    pub client_id: String,
    pub client_secret: String,
}

/// OAuth2-style token request form. `grant_type` selects which of the
/// remaining fields matter; the rest stay optional so either grant parses.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrantForm {
    pub grant_type: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub code: Option<String>,
    pub redirect_uri: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// Registration, credential verification and the two token grants. Holds
/// the datastore and token service by injection so tests can stand up an
/// isolated instance.
pub struct AuthService {
    store: Datastore,
    tokens: Arc<TokenService>,
    client: Arc<RegisteredClient>,
}

impl AuthService {
    pub fn new(store: Datastore, tokens: Arc<TokenService>, client: RegisteredClient) -> Self {
        AuthService {
            store,
            tokens,
            client: Arc::new(client),
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Creates the user row plus its role-specific profile. Password
    /// hashing runs on the blocking pool; the insert itself happens in one
    /// store critical section so a conflict leaves nothing behind.
    pub async fn register(&self, input: Registration) -> ApiResult<UserDto> {
        if input.username.trim().is_empty() {
            return Err(ApiError::validation("username must not be empty"));
        }
        if input.password.is_empty() {
            return Err(ApiError::validation("password must not be empty"));
        }
        let password_input = input.password.clone();
        let hashed = task::spawn_blocking(move || password::hash_password(&password_input))
            .await
            .map_err(|e| ApiError::internal(format!("hashing task failed: {e}")))??;

        let user = User {
            id: Uuid::new_v4(),
            username: input.username.clone(),
            hashed_password: hashed,
            role: input.role,
        };
        let profile = self.build_profile(&input, user.id).await?;
        let created = self.store.create_user_with_profile(user, profile).await?;
        self.store.persist().await?;
        Ok(UserDto::from(&created))
    }

    async fn build_profile(&self, input: &Registration, user_id: Uuid) -> ApiResult<RoleProfile> {
        match input.role {
            Role::Patient => Ok(RoleProfile::Patient(PatientProfile {
                id: Uuid::new_v4(),
                user_id,
                full_name: input.full_name_or_default(),
                gender: input.gender_or_default(),
                dob: input.dob_or_default(),
                phone: input.phone_or_default(),
                address: input.address_or_default(),
            })),
            Role::Doctor => {
                let department_id = match input.department_id {
                    Some(id) => id,
                    None => self
                        .store
                        .first_department_id()
                        .await
                        .ok_or_else(|| {
                            ApiError::Precondition("no departments available".to_string())
                        })?,
                };
                Ok(RoleProfile::Doctor(DoctorProfile {
                    id: Uuid::new_v4(),
                    user_id,
                    full_name: input.full_name_or_default(),
                    gender: input.gender_or_default(),
                    dob: input.dob_or_default(),
                    phone: input.phone_or_default(),
                    address: input.address_or_default(),
                    department_id,
                }))
            }
            Role::Admin => Ok(RoleProfile::Admin),
        }
    }

    /// Looks up the user and checks the password on the blocking pool.
    /// Unknown username and wrong password report the same error.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> ApiResult<User> {
        let user = self
            .store
            .find_user_by_username(username)
            .await
            .ok_or(ApiError::InvalidCredentials)?;
        let hashed = user.hashed_password.clone();
        let attempt = password.to_string();
        task::spawn_blocking(move || password::verify_password(&attempt, &hashed))
            .await
            .map_err(|e| ApiError::internal(format!("verification task failed: {e}")))??;
        Ok(user)
    }

    /// Dispatches the token endpoint by `grant_type`.
    pub async fn token_grant(&self, form: TokenGrantForm) -> ApiResult<TokenResponse> {
        match form.grant_type.as_str() {
            "password" => self.password_grant(form).await,
            "authorization_code" => self.authorization_code_grant(form).await,
            other => Err(ApiError::UnsupportedGrantType(other.to_string())),
        }
    }

    async fn password_grant(&self, form: TokenGrantForm) -> ApiResult<TokenResponse> {
        let username = form
            .username
            .ok_or_else(|| ApiError::validation("username is required"))?;
        let password = form
            .password
            .ok_or_else(|| ApiError::validation("password is required"))?;
        let user = self.verify_credentials(&username, &password).await?;
        let token = self.tokens.issue_access_token(&user)?;
        Ok(TokenResponse::bearer(token))
    }

    /// Exchanges a one-minute authorization code for a full access token.
    /// Client credentials gate the exchange; the code is consumed so it
    /// cannot be replayed.
    async fn authorization_code_grant(&self, form: TokenGrantForm) -> ApiResult<TokenResponse> {
        let client_id = form.client_id.as_deref().unwrap_or_default();
        let client_secret = form.client_secret.as_deref().unwrap_or_default();
        if client_id != self.client.client_id || client_secret != self.client.client_secret {
            return Err(ApiError::InvalidClient);
        }
        let code = form
            .code
            .ok_or_else(|| ApiError::validation("code is required"))?;
        let claims = self
            .tokens
            .decode_and_verify(&code)
            .map_err(|_| ApiError::InvalidOrExpiredCode)?;
        if claims.scope.as_deref() != Some(AUTH_CODE_SCOPE) {
            return Err(ApiError::InvalidScope);
        }
        if claims.sub.trim().is_empty() {
            return Err(ApiError::InvalidCodePayload);
        }
        self.tokens.consume_code(&claims)?;
        let user = self
            .store
            .find_user_by_id(claims.user_id)
            .await
            .ok_or_else(|| ApiError::not_found("user"))?;
        let token = self.tokens.issue_access_token(&user)?;
        Ok(TokenResponse::bearer(token))
    }

    /// Interactive login step of the redirect flow: checks credentials and
    /// hands back a short-lived code for the client to exchange.
    pub async fn issue_login_code(&self, username: &str, password: &str) -> ApiResult<String> {
        let user = self.verify_credentials(username, password).await?;
        self.tokens.issue_authorization_code(&user)
    }

    /// Resolves a bearer access token to its user. Authorization codes are
    /// rejected here; they only work at the token endpoint.
    pub async fn current_user(&self, token: &str) -> ApiResult<User> {
        let claims = self.tokens.decode_and_verify(token)?;
        if claims.scope.is_some() {
            return Err(ApiError::InvalidToken);
        }
        self.store
            .find_user_by_id(claims.user_id)
            .await
            .ok_or(ApiError::InvalidToken)
    }
}
