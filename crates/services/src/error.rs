//! Shared error types for the services crate.

use thiserror::Error;

use edutrack_core::model::ActivityError;
use storage::StorageError;
use storage::sqlite::SqliteInitError;

/// Failure of a single backend exchange.
///
/// Each gateway operation surfaces exactly one kind, so callers can tell
/// "communication failed" apart from "the backend said no".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("backend unreachable: {0}")]
    Network(String),
    #[error("dashboard fetch failed: {0}")]
    Fetch(String),
    #[error("activity submission failed: {0}")]
    Submit(String),
    #[error("mentor insights unavailable: {0}")]
    Insights(String),
}

/// Errors raised while configuring the HTTP gateway.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayConfigError {
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    #[error(transparent)]
    Client(#[from] reqwest::Error),
}

/// User-facing login failures. The message text is shown inline on the login screen.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailure {
    #[error("Invalid credentials or student record not found.")]
    InvalidCredentials,
    #[error("Could not connect to the EduTrack server.")]
    ServerUnreachable,
}

/// Errors emitted by the session controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no authenticated user")]
    NotAuthenticated,
    #[error(transparent)]
    Activity(#[from] ActivityError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Gateway(#[from] GatewayConfigError),
}
