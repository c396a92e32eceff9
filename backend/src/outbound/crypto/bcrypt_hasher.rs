//! bcrypt-backed `PasswordHasher` adapter.
//!
//! Hashing and verification are CPU bound, so both run on Tokio's blocking
//! pool. Password copies moved onto that thread are zeroized on drop.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHash, PasswordHashError, PasswordHasher};

/// Work factor for stored hashes.
pub const BCRYPT_COST: u32 = 12;

/// `PasswordHasher` using bcrypt at a fixed cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self { cost: BCRYPT_COST }
    }
}

impl BcryptPasswordHasher {
    /// Hasher at [`BCRYPT_COST`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher at a custom cost; tests use the bcrypt minimum to stay fast.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password.as_bytes(), cost))
            .await
            .map_err(|err| PasswordHashError::hash(format!("hashing task failed: {err}")))?
            .map(PasswordHash::new)
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password.as_bytes(), &encoded))
            .await
            .map_err(|err| PasswordHashError::verify(format!("verification task failed: {err}")))?
            .map_err(|err| PasswordHashError::verify(err.to_string()))
    }
}
