/*!
 * Error types for the mdzh application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when talking to a translation provider API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when sending an API request fails before a response arrives
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Whether the retry policy is allowed to retry this error.
    ///
    /// Connection failures, rate limiting and server-side (5xx) responses are
    /// transient; everything else is treated as a programming or client error
    /// and propagates without a retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RequestFailed(_) | Self::ConnectionError(_) | Self::RateLimitExceeded(_) => true,
            Self::ApiError { status_code, .. } => *status_code == 429 || *status_code >= 500,
            Self::ParseError(_) | Self::AuthenticationError(_) => false,
        }
    }
}

/// Errors that can occur while translating a section of a document
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Non-transient error from the provider API, propagated without retry
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The retry policy gave up; carries the error from the final attempt
    #[error("Maximum number of retries ({max_retries}) exceeded: {last_error}")]
    RetriesExhausted {
        /// The configured retry cap that was hit
        max_retries: u32,
        /// Provider error from the last attempt
        last_error: ProviderError,
    },

    /// The provider answered but returned no usable translation
    #[error("Provider returned an empty translation result")]
    EmptyResult,

    /// A prose span exceeds the maximum translatable size.
    ///
    /// Recursive re-splitting of oversized spans is an unimplemented
    /// extension point, so this aborts the whole document.
    #[error("Text chunk of {length} characters exceeds the {max_chars} character translation limit")]
    ChunkTooLarge {
        /// Character count of the offending span
        length: usize,
        /// Configured maximum
        max_chars: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Input document does not exist
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Output destination could not be written
    #[error("Failed to write output to {path}: {source}")]
    OutputWrite {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration, reported before any work starts
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Translation failure with the section it happened in
    #[error("Failed to translate section {index} ({label}): {source}")]
    Section {
        /// Zero-based section index
        index: usize,
        /// Section heading, or "preamble"
        label: String,
        /// Underlying translation error
        #[source]
        source: TranslationError,
    },

    /// Error from a provider outside the per-section path
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation outside the per-section path
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
