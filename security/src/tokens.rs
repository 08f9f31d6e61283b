// security/src/tokens.rs

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::errors::{ApiError, ApiResult};
use models::medical::{Role, User};

/// Scope claim carried only by authorization codes.
pub const AUTH_CODE_SCOPE: &str = "auth_code";

/// Authorization codes live for one minute.
pub const AUTH_CODE_TTL_SECS: i64 = 60;

/// JWT claim set shared by access tokens and authorization codes. Access
/// tokens always carry `role` (both grant paths issue the same claim set);
/// codes additionally carry `scope` and a `jti` for single-use tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub user_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<Uuid>,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Signs and verifies HS256 tokens. Constructed once from configuration
/// and injected wherever tokens are needed; also tracks consumed
/// authorization-code `jti`s so a captured code cannot be replayed within
/// its one-minute lifetime.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    consumed_codes: Mutex<HashMap<Uuid, i64>>,
}

impl TokenService {
    pub fn new(secret: &str, access_ttl_minutes: i64) -> Self {
        TokenService {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::minutes(access_ttl_minutes),
            consumed_codes: Mutex::new(HashMap::new()),
        }
    }

    fn issue(&self, claims: &Claims) -> ApiResult<String> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| ApiError::internal(format!("failed to encode token: {e}")))
    }

    /// Access token embedding username, user id and role.
    pub fn issue_access_token(&self, user: &User) -> ApiResult<String> {
        let now = Utc::now();
        self.issue(&Claims {
            sub: user.username.clone(),
            user_id: user.id,
            role: Some(user.role),
            scope: None,
            jti: None,
            exp: (now + self.access_ttl).timestamp(),
            iat: now.timestamp(),
        })
    }

    /// Short-lived authorization code for the redirect-based handoff.
    pub fn issue_authorization_code(&self, user: &User) -> ApiResult<String> {
        self.issue_authorization_code_with_ttl(user, AUTH_CODE_TTL_SECS)
    }

    fn issue_authorization_code_with_ttl(&self, user: &User, ttl_secs: i64) -> ApiResult<String> {
        let now = Utc::now();
        self.issue(&Claims {
            sub: user.username.clone(),
            user_id: user.id,
            role: None,
            scope: Some(AUTH_CODE_SCOPE.to_string()),
            jti: Some(Uuid::new_v4()),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
            iat: now.timestamp(),
        })
    }

    /// Checks signature and expiry; the caller inspects `scope` to tell a
    /// code from an access token. Zero leeway, so an expired token is
    /// rejected the second it lapses.
    pub fn decode_and_verify(&self, token: &str) -> ApiResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| ApiError::InvalidToken)
    }

    /// Marks an authorization code as used. A second call with the same
    /// `jti` fails, which is what gives codes single-use semantics. Expired
    /// entries are pruned on the way in so the set stays bounded.
    pub fn consume_code(&self, claims: &Claims) -> ApiResult<()> {
        let jti = claims.jti.ok_or(ApiError::InvalidOrExpiredCode)?;
        let mut consumed = self
            .consumed_codes
            .lock()
            .map_err(|_| ApiError::internal("consumed-code set poisoned"))?;
        let now = Utc::now().timestamp();
        consumed.retain(|_, exp| *exp > now);
        if consumed.insert(jti, claims.exp).is_some() {
            return Err(ApiError::InvalidOrExpiredCode);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            hashed_password: "hash".into(),
            role: Role::Patient,
        }
    }

    fn service() -> TokenService {
        TokenService::new("test-secret-key-at-least-32-bytes!!", 30)
    }

    #[test]
    fn access_token_round_trips_with_role() {
        let svc = service();
        let u = user();
        let token = svc.issue_access_token(&u).unwrap();
        let claims = svc.decode_and_verify(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.user_id, u.id);
        assert_eq!(claims.role, Some(Role::Patient));
        assert_eq!(claims.scope, None);
    }

    #[test]
    fn authorization_code_carries_scope_and_jti() {
        let svc = service();
        let code = svc.issue_authorization_code(&user()).unwrap();
        let claims = svc.decode_and_verify(&code).unwrap();
        assert_eq!(claims.scope.as_deref(), Some(AUTH_CODE_SCOPE));
        assert!(claims.jti.is_some());
        assert!(claims.exp - claims.iat <= AUTH_CODE_TTL_SECS);
    }

    #[test]
    fn expired_code_fails_verification() {
        let svc = service();
        let code = svc
            .issue_authorization_code_with_ttl(&user(), -60)
            .unwrap();
        assert_eq!(svc.decode_and_verify(&code).unwrap_err(), ApiError::InvalidToken);
    }

    #[test]
    fn tampered_token_fails_verification() {
        let svc = service();
        let other = TokenService::new("a-completely-different-secret-key!!!", 30);
        let token = other.issue_access_token(&user()).unwrap();
        assert_eq!(svc.decode_and_verify(&token).unwrap_err(), ApiError::InvalidToken);
    }

    #[test]
    fn codes_are_single_use() {
        let svc = service();
        let code = svc.issue_authorization_code(&user()).unwrap();
        let claims = svc.decode_and_verify(&code).unwrap();
        svc.consume_code(&claims).unwrap();
        assert_eq!(
            svc.consume_code(&claims).unwrap_err(),
            ApiError::InvalidOrExpiredCode
        );
    }
}
