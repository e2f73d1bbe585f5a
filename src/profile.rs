//! The signed-in user's profile: fetching it and updating its fields.
//!
//! The profile endpoints are scoped to the authenticated user by the bearer
//! token the transport attaches, so none of the operations here take a user
//! id. Update responses are plain acknowledgement messages; callers refetch
//! with [ProfileService::fetch] when they need the updated fields.

use serde_json::json;

use crate::{
    Error,
    transport::{Transport, TransportError, endpoints},
};

/// The profile fields the backend exposes for the signed-in user.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// The user's given name.
    pub first_name: String,
    /// The user's family name.
    pub last_name: String,
    /// The user's email address.
    pub email: String,
}

/// Reads and updates the signed-in user's profile.
#[derive(Debug, Clone)]
pub struct ProfileService<C> {
    client: C,
}

impl<C: Transport> ProfileService<C> {
    /// Create a facade that dispatches through `client`.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Fetch the signed-in user's profile.
    pub async fn fetch(&self) -> Result<Profile, Error> {
        let response = self.client.get(endpoints::PROFILE).await?;

        let email = response
            .get("email")
            .and_then(|email| email.as_str())
            .ok_or_else(|| {
                Error::UnexpectedResponse("the profile response carried no email".to_owned())
            })?
            .to_owned();

        Ok(Profile {
            first_name: string_field(&response, "firstName"),
            last_name: string_field(&response, "lastName"),
            email,
        })
    }

    /// Replace the user's first and last name.
    pub async fn update_name(&self, first_name: &str, last_name: &str) -> Result<(), Error> {
        if first_name.trim().is_empty() || last_name.trim().is_empty() {
            return Err(Error::Validation(
                "a first and last name are required".to_owned(),
            ));
        }

        self.client
            .put(
                endpoints::PROFILE_NAME,
                json!({
                    "firstName": first_name.trim(),
                    "lastName": last_name.trim(),
                }),
            )
            .await
            .map_err(validation_on_rejection)?;

        Ok(())
    }

    /// Replace the user's email address.
    pub async fn update_email(&self, email: &str) -> Result<(), Error> {
        if email.trim().is_empty() || !email.contains('@') {
            return Err(Error::Validation("a valid email address is required".to_owned()));
        }

        self.client
            .put(endpoints::PROFILE_EMAIL, json!({"email": email.trim()}))
            .await
            .map_err(validation_on_rejection)?;

        tracing::debug!("updated the account email");

        Ok(())
    }

    /// Replace the user's password, verifying the current one server-side.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), Error> {
        if current_password.is_empty() || new_password.is_empty() {
            return Err(Error::Validation(
                "the current and new passwords are required".to_owned(),
            ));
        }

        self.client
            .put(
                endpoints::PROFILE_PASSWORD,
                json!({
                    "currentPassword": current_password,
                    "newPassword": new_password,
                }),
            )
            .await
            .map_err(validation_on_rejection)?;

        Ok(())
    }
}

/// A string field of the response, empty when absent.
fn string_field(response: &serde_json::Value, key: &str) -> String {
    response
        .get(key)
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_owned()
}

/// The backend answers profile updates it rejects with a 400 whose body
/// explains the problem; that reads as a validation failure here. Anything
/// else propagates as a transport failure.
fn validation_on_rejection(error: TransportError) -> Error {
    match error.status {
        Some(400) => Error::Validation(error.message),
        _ => Error::Transport(error),
    }
}
