//! The HTTP transport collaborator the REST-backed facades dispatch through.
//!
//! The core performs no HTTP itself: authentication, token attachment,
//! retries and base-URL resolution all live behind [Transport].
//! Implementations hand back the response body as loosely-typed JSON; the
//! [crate::wire] module is responsible for making sense of it.

use serde_json::Value;

/// The REST paths the facades talk to.
pub mod endpoints {
    /// The accounts collection.
    pub const ACCOUNTS: &str = "/api/accounts";
    /// The transactions collection.
    pub const TRANSACTIONS: &str = "/api/transactions";
    /// The registration endpoint.
    pub const REGISTER: &str = "/api/auth/register";
    /// The login endpoint.
    pub const LOG_IN: &str = "/api/auth/login";
    /// The logout endpoint.
    pub const LOG_OUT: &str = "/api/auth/logout";
    /// The signed-in user's profile.
    pub const PROFILE: &str = "/api/profile";
    /// The profile's name fields.
    pub const PROFILE_NAME: &str = "/api/profile/name";
    /// The profile's email field.
    pub const PROFILE_EMAIL: &str = "/api/profile/email";
    /// The profile's password.
    pub const PROFILE_PASSWORD: &str = "/api/profile/password";

    /// The path for a single item in `collection`.
    ///
    /// Ids are opaque strings chosen by the backend, so they are
    /// percent-encoded before being spliced into the path.
    pub fn item(collection: &str, id: &str) -> String {
        format!("{collection}/{}", urlencoding::encode(id))
    }
}

/// An error reported by the transport collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("request failed: {message}")]
pub struct TransportError {
    /// The HTTP status code, when the failure came from a response.
    pub status: Option<u16>,
    /// A human-readable description of the failure.
    pub message: String,
}

impl TransportError {
    /// Whether the server answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

/// A minimal REST client: the four verbs the facades need.
///
/// Futures returned by implementations are not required to be `Send`; the
/// core assumes a single-threaded, cooperative caller that awaits each
/// operation before issuing the next.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Fetch the resource at `path`.
    async fn get(&self, path: &str) -> Result<Value, TransportError>;

    /// Send `body` to `path`, creating a resource.
    async fn post(&self, path: &str, body: Value) -> Result<Value, TransportError>;

    /// Send `body` to `path`, updating a resource.
    async fn put(&self, path: &str, body: Value) -> Result<Value, TransportError>;

    /// Delete the resource at `path`.
    async fn delete(&self, path: &str) -> Result<Value, TransportError>;
}
