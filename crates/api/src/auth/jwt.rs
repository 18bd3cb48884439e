//! Bearer tokens for the studio API.
//!
//! HS256 JWTs signed with the configured secret. Tokens are stateless:
//! logout is a client-side discard and there is no refresh flow, so a token
//! stays valid until `exp`.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use studio_core::types::DbId;
use uuid::Uuid;

/// Default token lifetime: one week.
pub const DEFAULT_EXPIRY_HOURS: i64 = 168;

const SECONDS_PER_HOUR: i64 = 3600;

/// Token payload.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's id.
    pub sub: DbId,
    /// Email at issue time. Informational; lookups go through `sub`.
    pub email: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    /// Claims for `user_id` issued now and expiring after `ttl_hours`.
    fn issue(user_id: DbId, email: &str, ttl_hours: i64) -> Self {
        let iat = chrono::Utc::now().timestamp();
        Claims {
            sub: user_id,
            email: email.to_owned(),
            exp: iat + ttl_hours * SECONDS_PER_HOUR,
            iat,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret shared by signing and verification.
    pub secret: String,
    pub expiry_hours: i64,
}

impl JwtConfig {
    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.as_bytes())
    }

    /// HS256 only; `exp`, `iat` and `sub` must all be present.
    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);
        validation
    }
}

/// Sign a token for a freshly authenticated user.
pub fn generate_access_token(
    user_id: DbId,
    email: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::issue(user_id, email, config.expiry_hours);
    encode(&Header::new(Algorithm::HS256), &claims, &config.encoding_key())
}

/// Verify signature and expiry and return the claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(token, &config.decoding_key(), &JwtConfig::validation())
        .map(|data| data.claims)
}
