use super::*;

/// Default session lifetime.
const SESSION_TTL: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);
/// Extended "remember me" lifetime.
const EXTENDED_TTL: std::time::Duration = std::time::Duration::from_secs(15 * 24 * 60 * 60);

/// JWT signing and verification against a process-wide secret.
///
/// Tokens are valid only while the secret is unchanged; rotating it
/// invalidates every outstanding session.
pub struct Crypto {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
    validation: jsonwebtoken::Validation,
}

impl Crypto {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = jsonwebtoken::Validation::default();
        validation.leeway = 0;
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
            validation,
        }
    }
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| String::default())
                .as_bytes(),
        )
    }
    pub fn encode(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), claims, &self.encoding)
    }
    /// Any structural, cryptographic, or expiry failure is uniformly an Err;
    /// callers learn nothing beyond "invalid". A token expiring exactly at
    /// the verification instant is rejected here, not just by the extractors.
    pub fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .and_then(|claims| match claims.expired() {
                true => Err(jsonwebtoken::errors::ErrorKind::ExpiredSignature.into()),
                false => Ok(claims),
            })
    }
    /// Session lifetime selected by the login form's remember-me flag.
    pub const fn ttl(remember: bool) -> std::time::Duration {
        if remember { EXTENDED_TTL } else { SESSION_TTL }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gp_core::ID;

    #[test]
    fn round_trip_preserves_identity() {
        let crypto = Crypto::new(b"top-secret");
        let id = ID::default();
        let claims = Claims::new(id, "grace".into(), Crypto::ttl(false));
        let token = crypto.encode(&claims).unwrap();
        let decoded = crypto.decode(&token).unwrap();
        assert_eq!(decoded.user(), id);
        assert_eq!(decoded.username(), "grace");
    }

    #[test]
    fn round_trip_preserves_identity_with_remember_me() {
        let crypto = Crypto::new(b"top-secret");
        let id = ID::default();
        let claims = Claims::new(id, "grace".into(), Crypto::ttl(true));
        let decoded = crypto.decode(&crypto.encode(&claims).unwrap()).unwrap();
        assert_eq!(decoded.user(), id);
        assert_eq!(decoded.exp, claims.exp);
    }

    #[test]
    fn tampered_signature_is_invalid() {
        let crypto = Crypto::new(b"top-secret");
        let claims = Claims::new(ID::default(), "grace".into(), Crypto::ttl(false));
        let token = crypto.encode(&claims).unwrap();
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert!(crypto.decode(&token).is_ok());
        assert!(crypto.decode(&tampered).is_err());
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let signer = Crypto::new(b"top-secret");
        let claims = Claims::new(ID::default(), "grace".into(), Crypto::ttl(false));
        let token = signer.encode(&claims).unwrap();
        assert!(Crypto::new(b"other-secret").decode(&token).is_err());
    }

    #[test]
    fn expired_token_is_invalid() {
        let crypto = Crypto::new(b"top-secret");
        let mut claims = Claims::new(ID::default(), "grace".into(), Crypto::ttl(false));
        claims.iat -= 2 * 24 * 60 * 60;
        claims.exp -= 2 * 24 * 60 * 60;
        let token = crypto.encode(&claims).unwrap();
        assert!(crypto.decode(&token).is_err());
    }

    #[test]
    fn boundary_instant_is_invalid() {
        let crypto = Crypto::new(b"top-secret");
        let mut claims = Claims::new(ID::default(), "grace".into(), Crypto::ttl(false));
        claims.exp = claims.iat;
        let token = crypto.encode(&claims).unwrap();
        assert!(crypto.decode(&token).is_err());
    }

    #[test]
    fn garbage_token_is_invalid() {
        let crypto = Crypto::new(b"top-secret");
        assert!(crypto.decode("not.a.jwt").is_err());
        assert!(crypto.decode("").is_err());
    }
}
