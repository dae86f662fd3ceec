use super::ids::{AccountId, CartId};
use serde::{Deserialize, Serialize};

/// Minimum number of characters accepted for a new password.
pub const MIN_PASSWORD_LENGTH: usize = 5;

/// A registered user identity.
///
/// Every account owns exactly one cart, created together with the account.
/// The credential is stored only as an opaque hash produced by a
/// [`CredentialHasher`](super::ports::CredentialHasher).
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub password_hash: String,
    pub cart_id: CartId,
}

impl Account {
    pub fn new(
        id: AccountId,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        cart_id: CartId,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            password_hash: password_hash.into(),
            cart_id,
        }
    }
}

/// Registration input as submitted by a client.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl NewAccount {
    /// Checks the username and the password rules.
    pub fn validate(&self) -> Result<(), String> {
        if self.username.trim().is_empty() {
            return Err("Username must not be blank".to_string());
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            ));
        }
        if self.password != self.confirm_password {
            return Err("Password and confirmation do not match".to_string());
        }
        Ok(())
    }
}
