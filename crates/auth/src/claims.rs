use super::*;
use gp_core::ID;

fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time")
        .as_secs() as i64
}

/// JWT payload carried in the session cookie.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid,
    pub usr: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user: ID<Member>, username: String, ttl: std::time::Duration) -> Self {
        let now = now();
        Self {
            sub: user.inner(),
            usr: username,
            iat: now,
            exp: now + ttl.as_secs() as i64,
        }
    }
    /// A token expiring exactly at the verification instant is already expired.
    pub fn expired(&self) -> bool {
        self.exp <= now()
    }
    pub fn user(&self) -> ID<Member> {
        ID::from(self.sub)
    }
    pub fn username(&self) -> &str {
        &self.usr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_boundary_is_exclusive() {
        let mut claims = Claims::new(ID::default(), "ada".into(), Crypto::ttl(false));
        claims.exp = now();
        assert!(claims.expired());
        claims.exp = now() + 1;
        assert!(!claims.expired());
    }

    #[test]
    fn remember_me_extends_expiry() {
        let short = Claims::new(ID::default(), "ada".into(), Crypto::ttl(false));
        let long = Claims::new(ID::default(), "ada".into(), Crypto::ttl(true));
        assert_eq!(short.exp - short.iat, 24 * 60 * 60);
        assert_eq!(long.exp - long.iat, 15 * 24 * 60 * 60);
    }
}
