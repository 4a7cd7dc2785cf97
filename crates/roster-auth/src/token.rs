//! Bearer token signing and verification (JWT, HS256 only).

use crate::claims::{Claims, ISSUER};
use crate::error::AuthError;
use crate::secret::SigningSecret;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use roster_core::Credential;

/// Lifetime of an issued token.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Signs and verifies tokens with one symmetric secret.
///
/// Built once at startup; verification takes `&self` and never blocks.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // Expiry is compared in `verify_at` as `exp <= now`, with no leeway.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.set_issuer(&[ISSUER]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a token for `credential` valid for [`TOKEN_TTL_SECS`] from now.
    pub fn issue(&self, credential: &Credential) -> Result<String, AuthError> {
        self.issue_at(credential, Utc::now().timestamp())
    }

    pub fn issue_at(&self, credential: &Credential, now: i64) -> Result<String, AuthError> {
        let claims = Claims::for_credential(credential, now, now + TOKEN_TTL_SECS);
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::Issue(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify against an explicit clock (seconds since the epoch).
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, AuthError> {
        let header =
            jsonwebtoken::decode_header(token).map_err(|e| AuthError::Malformed(e.to_string()))?;
        if header.alg != Algorithm::HS256 {
            tracing::debug!(alg = ?header.alg, "rejecting token with foreign algorithm");
            return Err(AuthError::BadSignature);
        }

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(classify)?;

        if data.claims.exp <= now {
            return Err(AuthError::Expired);
        }
        Ok(data.claims)
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::BadSignature,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::Malformed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::Role;

    fn codec(secret: &str) -> TokenCodec {
        TokenCodec::new(&SigningSecret::new(secret).unwrap())
    }

    fn credential() -> Credential {
        let now = Utc::now();
        Credential {
            id: "3f0c2a6e-0000-4000-8000-000000000001".into(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            first_name: "Alice".into(),
            last_name: "Liddell".into(),
            role: Role::Counsellor,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_issue_then_verify_returns_identity() {
        let codec = codec("test-secret");
        let cred = credential();
        let token = codec.issue(&cred).unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.sub, cred.id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, Role::Counsellor);
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn test_expiry_boundary_has_no_leeway() {
        let codec = codec("test-secret");
        let issued = 1_700_000_000;
        let token = codec.issue_at(&credential(), issued).unwrap();

        assert!(codec.verify_at(&token, issued + TOKEN_TTL_SECS - 1).is_ok());
        assert!(matches!(
            codec.verify_at(&token, issued + TOKEN_TTL_SECS),
            Err(AuthError::Expired)
        ));
        assert!(matches!(
            codec.verify(&token),
            Err(AuthError::Expired)
        ));
    }

    #[test]
    fn test_other_secret_is_bad_signature() {
        let token = codec("secret-one").issue(&credential()).unwrap();
        assert!(matches!(
            codec("secret-two").verify(&token),
            Err(AuthError::BadSignature)
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = codec("test-secret");
        for token in ["", "not-a-token", "a.b.c", "Bearer xyz"] {
            assert!(
                matches!(codec.verify(token), Err(AuthError::Malformed(_))),
                "expected malformed for {token:?}"
            );
        }
    }

    #[test]
    fn test_foreign_algorithm_rejected() {
        let secret = SigningSecret::new("test-secret").unwrap();
        let now = Utc::now().timestamp();
        let claims = Claims::for_credential(&credential(), now, now + 60);
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            TokenCodec::new(&secret).verify(&token),
            Err(AuthError::BadSignature)
        ));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let codec = codec("test-secret");
        let token = codec.issue(&credential()).unwrap();
        let other = codec
            .issue(&Credential {
                role: Role::Admin,
                ..credential()
            })
            .unwrap();

        // Admin payload spliced onto the counsellor token's signature.
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert!(matches!(codec.verify(&forged), Err(AuthError::BadSignature)));
    }

    #[test]
    fn test_foreign_issuer_rejected() {
        let secret = SigningSecret::new("test-secret").unwrap();
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: "someone-else".into(),
            ..Claims::for_credential(&credential(), now, now + 60)
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert!(TokenCodec::new(&secret).verify(&token).is_err());
    }
}
