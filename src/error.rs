//! Defines the crate level error type and the conversions from collaborator
//! errors.

use crate::{storage::StorageError, transport::TransportError};

/// The errors that may occur in the application core.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A draft or patch was rejected before being dispatched.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The user provided an invalid combination of email and password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The login response did not include an authentication token.
    #[error("no authentication token was returned by the server")]
    MissingToken,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the store")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the store")]
    DeleteMissingTransaction,

    /// Tried to update an account that does not exist
    #[error("tried to update an account that is not in the store")]
    UpdateMissingAccount,

    /// Tried to delete an account that does not exist
    #[error("tried to delete an account that is not in the store")]
    DeleteMissingAccount,

    /// A write response could not be mapped back to a canonical record.
    #[error("the server response could not be interpreted: {0}")]
    UnexpectedResponse(String),

    /// The transport collaborator reported a failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The record store collaborator reported a failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
