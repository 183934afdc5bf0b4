use std::sync::Arc;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use log::{debug, info, warn};
use rand_core::OsRng;

use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::user::{NewUser, User};

pub fn hash_password(password: &str) -> Result<String, DomainError> {
    if password.is_empty() {
        return Err(DomainError::InvalidInput("password cannot be empty".into()));
    }
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::Internal(format!("password hashing failed: {e}")))
}

/// Emails are stored and looked up trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Returns `Ok(false)` on a mismatch; errors only for an unparsable hash.
pub fn verify_password(hash: &str, password: &str) -> Result<bool, DomainError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| DomainError::Internal(format!("stored password hash is invalid: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(DomainError::Internal(e.to_string())),
    }
}

pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<User, DomainError> {
        self.repo
            .find_by_email(&normalize_email(email))?
            .ok_or(DomainError::NotFound("User"))
    }

    /// Checks the credentials and returns the user id.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<i32, DomainError> {
        let Some(user) = self.repo.find_by_email(&normalize_email(email))? else {
            debug!("Authentication attempt for unknown email");
            return Err(DomainError::InvalidCredentials);
        };
        if !verify_password(&user.password, password)? {
            warn!("Incorrect password for user {}", user.id);
            return Err(DomainError::InvalidCredentials);
        }
        Ok(user.id)
    }

    pub fn create_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<i32, DomainError> {
        let email = normalize_email(email);
        if !email.contains('@') {
            return Err(DomainError::InvalidInput(format!("invalid email {email:?}")));
        }
        let id = self.repo.insert_user(NewUser {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email,
            password: hash_password(password)?,
        })?;
        info!("Created user {}", id);
        Ok(id)
    }

    /// Creates the account unless one with this email exists. The stored
    /// password of an existing account is left alone.
    pub fn ensure_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<i32, DomainError> {
        match self.repo.find_by_email(&normalize_email(email))? {
            Some(user) => Ok(user.id),
            None => self.create_user(first_name, last_name, email, password),
        }
    }

    pub fn update_password_for_user(&self, user: &User, password: &str) -> Result<(), DomainError> {
        let hash = hash_password(password)?;
        self.repo.update_password(user.id, &hash)
    }
}
