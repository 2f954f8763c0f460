use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::Version;
use argon2::password_hash::SaltString;

/// Default Argon2id iteration count when `HASH_COST` is unset.
const DEFAULT_COST: u32 = 2;

fn salt() -> SaltString {
    use rand::Rng;
    let ref mut bytes = [0u8; 16];
    rand::rng().fill(bytes);
    SaltString::encode_b64(bytes).expect("salt")
}

/// Argon2id hasher with a configurable work factor (iteration count).
///
/// Verification reads the parameters embedded in the PHC string, so hashes
/// produced under an old cost keep verifying after the knob changes.
pub struct Hasher {
    argon2: Argon2<'static>,
}

impl Hasher {
    pub fn new(cost: u32) -> Self {
        let params = Params::new(Params::DEFAULT_M_COST, cost, Params::DEFAULT_P_COST, None)
            .expect("argon2 params");
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("HASH_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_COST),
        )
    }
    /// Fresh random salt per call, so the same plaintext never hashes twice
    /// to the same credential.
    pub fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        self.argon2
            .hash_password(password.as_bytes(), &salt())
            .map(|h| h.to_string())
    }
}

/// Verifies a plaintext candidate against a stored PHC-format credential.
/// A malformed credential is simply a failed verification.
pub fn verify(password: &str, hashword: &str) -> bool {
    PasswordHash::new(hashword)
        .ok()
        .as_ref()
        .map(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), hash)
                .is_ok()
        })
        .unwrap_or(false)
}
