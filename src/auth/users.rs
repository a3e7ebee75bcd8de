//! User Store - credentials and saved UI context
//!
//! Passwords are stored as `SHA-256(salt ‖ password)` with a random 16-byte
//! salt per user. The salt is also handed to the client, which derives its
//! own key from it to encrypt the UI context; the server only ever sees the
//! resulting base64 ciphertext.

use crate::auth::error::{AuthError, AuthResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use parking_lot::RwLock;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

const SALT_LEN: usize = 16;

#[derive(Debug, Clone)]
struct UserRecord {
    salt: [u8; SALT_LEN],
    pass_hash: [u8; 32],
    /// Opaque client-encrypted UI context (base64)
    enc_context: Option<String>,
}

/// Registered users, keyed by username
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user with a fresh salt
    pub fn register(&self, username: &str, password: &str) -> AuthResult<()> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let mut users = self.users.write();
        if users.contains_key(username) {
            return Err(AuthError::UsernameTaken);
        }

        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        users.insert(
            username.to_string(),
            UserRecord {
                salt,
                pass_hash: hash_password(&salt, password),
                enc_context: None,
            },
        );

        tracing::info!(user = %username, "Registered user");
        Ok(())
    }

    /// Check a username/password pair
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let users = self.users.read();
        match users.get(username) {
            Some(record) => hash_password(&record.salt, password) == record.pass_hash,
            None => false,
        }
    }

    pub fn exists(&self, username: &str) -> bool {
        self.users.read().contains_key(username)
    }

    /// Base64 salt for the client-side key derivation
    pub fn salt_b64(&self, username: &str) -> Option<String> {
        self.users
            .read()
            .get(username)
            .map(|record| BASE64.encode(record.salt))
    }

    /// Saved encrypted context, if any
    pub fn context(&self, username: &str) -> Option<String> {
        self.users
            .read()
            .get(username)
            .and_then(|record| record.enc_context.clone())
    }

    /// Replace the saved encrypted context
    pub fn save_context(&self, username: &str, enc: String) -> AuthResult<()> {
        let mut users = self.users.write();
        let record = users
            .get_mut(username)
            .ok_or_else(|| AuthError::UnknownUser(username.to_string()))?;

        tracing::debug!(user = %username, bytes = enc.len(), "Saved UI context");
        record.enc_context = Some(enc);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

fn hash_password(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}
