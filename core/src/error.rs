//! Error types for the todo API client and the list state.
//!
//! # Design
//! `ApiError` keeps enough detail for logs, but the list state treats every
//! variant the same way: the remote call failed. `StoreError` is what the user
//! sees; its `Display` text is the banner message.

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods and by hosts executing
/// requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404; the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-success status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),
}

/// User-facing failures shown in the error banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Title should not be empty")]
    EmptyTitle,
    #[error("Unable to load todos")]
    Load,
    #[error("Unable to add a todo")]
    Add,
    #[error("Unable to delete a todo")]
    Delete,
    #[error("Unable to update a todo")]
    Update,
    /// A create is already in flight. Never shown in the banner.
    #[error("A todo is already being added")]
    AddInFlight,
}
