use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Bearer token claims: user id, role, and the standard time fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    #[must_use]
    pub fn new(user_id: i32, role: &str, expires_in: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        }
    }
}

/// Issues and verifies HMAC-signed bearer tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &[u8], ttl_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, user_id: i32, role: &str) -> Result<String> {
        let claims = Claims::new(user_id, role, self.ttl);
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {e}"))
    }

    /// Decode and verify a token. Fails on bad signature or expiry.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| anyhow::anyhow!("Invalid token: {e}"))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_claims() {
        let tokens = TokenService::new(b"test-secret", 24);
        let token = tokens.issue(42, "superadmin").unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "superadmin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_wrong_secret() {
        let tokens = TokenService::new(b"secret-a", 24);
        let other = TokenService::new(b"secret-b", 24);

        let token = tokens.issue(1, "user").unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let tokens = TokenService::new(b"test-secret", 24);
        let claims = Claims::new(1, "user", Duration::hours(-2));
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(tokens.verify(&token).is_err());
    }
}
