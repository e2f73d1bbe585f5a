//! This file defines the signed-in user and the registration request.

use crate::Error;

/// The signed-in user as known to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    /// The user's email address.
    pub email: String,
}

/// The details needed to register a new user.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterRequest {
    /// The user's given name.
    pub first_name: String,
    /// The user's family name.
    pub last_name: String,
    /// The user's email address.
    pub email: String,
    /// The plain-text password, forwarded to the backend for hashing.
    pub password: String,
}

impl RegisterRequest {
    /// Check the request has everything the backend requires.
    pub fn validate(&self) -> Result<(), Error> {
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(Error::Validation("a valid email address is required".to_owned()));
        }

        if self.password.is_empty() {
            return Err(Error::Validation("a password is required".to_owned()));
        }

        Ok(())
    }
}
