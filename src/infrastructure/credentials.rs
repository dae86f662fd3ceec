use crate::domain::ports::CredentialHasher;
use crate::error::{Result, ShopError};
use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

/// Hashes passwords with Argon2id and a fresh random salt per call.
///
/// The output is a PHC string, so the parameters and salt travel with it.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ShopError::storage(std::io::Error::other(e.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    #[test]
    fn test_hash_is_not_plaintext_and_verifies() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("abcde").unwrap();

        assert_ne!(hash, "abcde");
        assert!(hash.starts_with("$argon2id$"));

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(Argon2::default().verify_password(b"abcde", &parsed).is_ok());
        assert!(Argon2::default().verify_password(b"abcdf", &parsed).is_err());
    }

    #[test]
    fn test_salts_differ() {
        let hasher = Argon2Hasher::new();
        assert_ne!(hasher.hash("abcde").unwrap(), hasher.hash("abcde").unwrap());
    }
}
