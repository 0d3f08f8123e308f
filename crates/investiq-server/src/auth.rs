//! Bearer token verification
//!
//! Tokens are HS256 JWTs issued by the identity provider and signed with a
//! shared secret. The `sub` claim is the user id that scopes every query.

use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Environment variable holding the shared signing secret
pub const JWT_SECRET_ENV: &str = "INVESTIQ_JWT_SECRET";

/// Environment variable overriding the expected `aud` claim
pub const JWT_AUDIENCE_ENV: &str = "INVESTIQ_JWT_AUDIENCE";

/// Audience stamped on tokens by the identity provider unless configured otherwise
pub const DEFAULT_AUDIENCE: &str = "authenticated";

/// User id attached to every request when authentication is disabled
pub const LOCAL_DEV_USER: &str = "local-dev";

/// JWT verification settings
#[derive(Clone)]
pub struct JwtConfig {
    /// HS256 secret; `None` means no token can be verified
    pub secret: Option<String>,
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            audience: DEFAULT_AUDIENCE.to_string(),
        }
    }
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: std::env::var(JWT_SECRET_ENV).ok().filter(|s| !s.is_empty()),
            audience: std::env::var(JWT_AUDIENCE_ENV)
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_AUDIENCE.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub aud: String,
    pub exp: u64,
    pub iat: u64,
}

/// How the current request was authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    Jwt,
    None,
}

/// The caller, as resolved by the auth middleware
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub user_id: String,
    pub email: Option<String>,
    pub auth_method: AuthMethod,
}

impl AuthUser {
    pub fn local_dev() -> Self {
        Self {
            user_id: LOCAL_DEV_USER.to_string(),
            email: None,
            auth_method: AuthMethod::None,
        }
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header value
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let mut parts = header_value.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") => Some(token),
        _ => None,
    }
}

/// Verify signature, expiry and audience, returning the authenticated user
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<AuthUser> {
    let secret = config
        .secret
        .as_deref()
        .with_context(|| format!("{} not configured", JWT_SECRET_ENV))?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.audience.as_str()]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .context("JWT validation failed")?;

    if data.claims.sub.trim().is_empty() {
        anyhow::bail!("JWT has empty subject");
    }

    Ok(AuthUser {
        user_id: data.claims.sub,
        email: data.claims.email,
        auth_method: AuthMethod::Jwt,
    })
}

/// Sign a token for `user_id` valid for `ttl_secs` (local development and tests)
pub fn issue_token(
    user_id: &str,
    email: Option<&str>,
    ttl_secs: u64,
    config: &JwtConfig,
) -> Result<String> {
    let secret = config
        .secret
        .as_deref()
        .with_context(|| format!("{} not configured", JWT_SECRET_ENV))?;

    let now = chrono::Utc::now().timestamp().max(0) as u64;
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.map(str::to_string),
        aud: config.audience.clone(),
        iat: now,
        exp: now + ttl_secs,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to sign token")
}
