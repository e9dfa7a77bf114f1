//! JWT service for session token issuance and verification
//!
//! Tokens are signed with HS256 using a server-held secret and carry the
//! identity claims presented at login plus a fixed 30-day expiry. The server
//! keeps no record of issued tokens: natural expiry and the logout cookie
//! clear are the only invalidation paths.

use anyhow::Result;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Default token lifetime in seconds (30 days)
const DEFAULT_TOKEN_EXPIRY: u64 = 30 * 24 * 60 * 60;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing and verifying tokens
    pub secret: String,
    /// Token expiration time in seconds (default: 30 days)
    pub token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Secret key for signing tokens
    /// - `JWT_TOKEN_EXPIRY`: Token expiry in seconds (default: 2592000)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let token_expiry = std::env::var("JWT_TOKEN_EXPIRY")
            .unwrap_or_else(|_| DEFAULT_TOKEN_EXPIRY.to_string())
            .parse()
            .unwrap_or(DEFAULT_TOKEN_EXPIRY);

        Ok(JwtConfig {
            secret,
            token_expiry,
        })
    }
}

/// Identity claims presented at login
///
/// Only the email is interpreted by the server; any further claims in
/// the login body are carried through into the token untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Claims encoded into a session token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User email, the identity checked by ownership guards
    pub email: String,
    /// Passthrough identity claims from login
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Token verification failure
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_expiry: u64,
}

impl JwtService {
    /// Initialize a new JWT service from the given configuration
    pub fn new(config: &JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            token_expiry: config.token_expiry,
        }
    }

    /// Issue a session token for the given identity claims
    ///
    /// Pure computation: no side effects beyond reading the clock.
    pub fn issue(&self, identity: &IdentityClaims) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        // Reserved claim names must not be forged through the passthrough map
        let mut extra = identity.extra.clone();
        extra.remove("email");
        extra.remove("iat");
        extra.remove("exp");

        let claims = Claims {
            email: identity.email.clone(),
            extra,
            iat: now,
            exp: now + self.token_expiry,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify a token and return its claims
    ///
    /// Checks signature validity and expiry only; never fails for
    /// business-logic reasons.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> JwtService {
        JwtService::new(&JwtConfig {
            secret: secret.to_string(),
            token_expiry: 3600,
        })
    }

    fn identity(email: &str) -> IdentityClaims {
        IdentityClaims {
            email: email.to_string(),
            extra: Map::new(),
        }
    }

    #[test]
    fn issue_and_verify_round_trip() {
        let svc = service("test-secret");
        let token = svc.issue(&identity("chef@tastr.app")).unwrap();

        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.email, "chef@tastr.app");
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn extra_claims_are_carried_through() {
        let svc = service("test-secret");
        let mut id = identity("chef@tastr.app");
        id.extra
            .insert("displayName".to_string(), Value::from("Chef"));

        let token = svc.issue(&id).unwrap();
        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.extra.get("displayName"), Some(&Value::from("Chef")));
    }

    #[test]
    fn forged_reserved_claims_are_dropped() {
        let svc = service("test-secret");
        let mut id = identity("chef@tastr.app");
        id.extra.insert("exp".to_string(), Value::from(0u64));
        id.extra
            .insert("email".to_string(), Value::from("other@tastr.app"));

        let token = svc.issue(&id).unwrap();
        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.email, "chef@tastr.app");
        assert!(claims.exp > 0);
    }

    #[test]
    fn tampered_token_is_invalid() {
        let svc = service("test-secret");
        let token = svc.issue(&identity("chef@tastr.app")).unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        tampered.push('x');
        assert_eq!(svc.verify(&tampered).unwrap_err(), TokenError::Invalid);
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = service("secret-a")
            .issue(&identity("chef@tastr.app"))
            .unwrap();
        assert_eq!(
            service("secret-b").verify(&token).unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let svc = service("test-secret");
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        let claims = Claims {
            email: "chef@tastr.app".to_string(),
            extra: Map::new(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(svc.verify(&token).unwrap_err(), TokenError::Expired);
    }
}
