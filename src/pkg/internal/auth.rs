use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::prelude::{ApiError, Result};

/// Identity resolved from a request's bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: String,
    pub name: String,
    pub exp: i64,
}

/// Signs and verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl std::fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl TokenAuthority {
    pub fn new(secret: &str, lifetime_hours: i64) -> Self {
        TokenAuthority {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime: Duration::hours(lifetime_hours),
        }
    }

    pub fn issue(&self, caller: &Caller) -> Result<String> {
        let exp = Utc::now()
            .checked_add_signed(self.lifetime)
            .ok_or_else(|| ApiError::Unhandled("failed to calculate token expiration".into()))?
            .timestamp();
        let claims = Claims {
            user_id: caller.user_id.clone(),
            name: caller.name.clone(),
            exp,
        };
        self.sign(&Header::default(), &claims)
    }

    fn sign(&self, header: &Header, claims: &Claims) -> Result<String> {
        encode(header, claims, &self.encoding)
            .map_err(|e| ApiError::Unhandled(format!("failed to sign token: {e}")))
    }

    pub fn verify(&self, token: &str) -> Result<Caller> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::default())?.claims;
        if claims.user_id.is_empty() {
            return Err(ApiError::Unauthenticated("Authentication invalid".into()));
        }
        Ok(Caller {
            user_id: claims.user_id,
            name: claims.name,
        })
    }
}
