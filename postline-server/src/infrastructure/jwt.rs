use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum JwtError {
    #[error("token encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token decode/validation failed")]
    Decode(#[source] jsonwebtoken::errors::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Claims {
    pub(crate) sub: String,
    pub(crate) exp: i64,
}

pub(crate) struct JwtService {
    secret: String,
    ttl_seconds: i64,
}

impl JwtService {
    const DEFAULT_TTL_SECONDS: i64 = 24 * 60 * 60;

    pub(crate) fn new(secret: &str, ttl_seconds: i64) -> Self {
        let ttl_seconds = if ttl_seconds > 0 {
            ttl_seconds
        } else {
            Self::DEFAULT_TTL_SECONDS
        };

        JwtService {
            secret: secret.into(),
            ttl_seconds,
        }
    }

    pub(crate) fn issue_token(&self, subject: &str) -> Result<String, JwtError> {
        let exp = (Utc::now() + Duration::seconds(self.ttl_seconds)).timestamp();

        let claims = Claims {
            sub: subject.into(),
            exp,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(JwtError::Encode)
    }

    /// Returns the token subject; signature, structure and expiry failures
    /// all collapse into `JwtError::Decode`.
    pub(crate) fn verify_token(&self, token: &str) -> Result<String, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 10;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(JwtError::Decode)?;

        Ok(token_data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

    use super::{Claims, JwtService};

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn issued_token_round_trips_to_its_subject() {
        let service = JwtService::new(SECRET, 3600);
        let token = service.issue_token("valid_user").expect("must issue");
        let subject = service.verify_token(&token).expect("must verify");
        assert_eq!(subject, "valid_user");
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = JwtService::new(SECRET, 3600);
        let claims = Claims {
            sub: "valid_user".to_string(),
            exp: Utc::now().timestamp() - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("must encode");

        assert!(service.verify_token(&token).is_err());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let issuer = JwtService::new("another-secret-another-secret-00", 3600);
        let verifier = JwtService::new(SECRET, 3600);

        let token = issuer.issue_token("valid_user").expect("must issue");
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        let service = JwtService::new(SECRET, 3600);
        assert!(service.verify_token("not-a-token").is_err());
    }

    #[test]
    fn non_positive_ttl_falls_back_to_a_day() {
        let service = JwtService::new(SECRET, 0);
        let token = service.issue_token("valid_user").expect("must issue");
        assert!(service.verify_token(&token).is_ok());
    }
}
