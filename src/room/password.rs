//! One-way salted hashing of room passwords.
use argon2::{Algorithm, Argon2, Params, Version};
use password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
};

/// Argon2id hasher producing PHC-format tokens
///
/// Every call to [`PasswordHasher::hash`] draws a fresh salt, so hashing the same
/// password twice yields different tokens that both verify. The cost parameters
/// are fixed at construction; verification reads them back out of the token.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

impl PasswordHasher {
    pub fn new(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Builds a hasher from explicit cost factors
    pub fn from_cost(
        memory_kib: u32,
        time_cost: u32,
        parallelism: u32,
    ) -> Result<Self, argon2::Error> {
        let params = Params::new(memory_kib, time_cost, parallelism, None)?;
        Ok(Self::new(params))
    }

    pub fn hash(&self, password: &str) -> Result<String, password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Returns false for a wrong password and for any token that is not a
    /// well-formed Argon2 PHC string.
    pub fn verify(&self, password: &str, hash_token: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash_token) {
            Ok(h) => h,
            Err(_) => return false,
        };
        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::from_cost(8, 1, 1).unwrap()
    }

    #[rstest]
    #[case("secret")]
    #[case("correct horse battery staple")]
    #[case("pässwörd-with-ünïcode")]
    #[case(" ")]
    fn test_hash_then_verify(#[case] password: &str) {
        let hasher = cheap_hasher();
        let token = hasher.hash(password).unwrap();

        assert!(token.starts_with("$argon2id$"));
        assert!(hasher.verify(password, &token));
    }

    #[test]
    fn test_same_password_produces_distinct_tokens() {
        let hasher = cheap_hasher();
        let first = hasher.hash("secret").unwrap();
        let second = hasher.hash("secret").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("secret", &first));
        assert!(hasher.verify("secret", &second));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hasher = cheap_hasher();
        let token = hasher.hash("secret").unwrap();

        assert!(!hasher.verify("wrong", &token));
        assert!(!hasher.verify("", &token));
        assert!(!hasher.verify("Secret", &token));
    }

    #[rstest]
    #[case("")]
    #[case("not-a-hash")]
    #[case("$argon2id$v=19$garbage")]
    #[case("$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW")]
    fn test_malformed_or_foreign_token_rejected(#[case] token: &str) {
        let hasher = cheap_hasher();

        assert!(!hasher.verify("secret", token));
    }

    #[test]
    fn test_token_verifies_under_different_cost_settings() {
        let token = cheap_hasher().hash("secret").unwrap();
        let other = PasswordHasher::from_cost(16, 2, 1).unwrap();

        assert!(other.verify("secret", &token));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        assert!(PasswordHasher::from_cost(0, 0, 0).is_err());
    }
}
