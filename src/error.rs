//! Error types for the gateway.
//!
//! Failures are contained close to where they happen: a refresh failure
//! never touches the installed range set, a bad CIDR entry never aborts the
//! surrounding batch, and a relay failure is reported to the caller of the
//! single affected request.

use thiserror::Error;

/// Failure to refresh the trusted-range directory.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP call to the directory failed or returned an error status.
    #[error("range directory request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The directory body was not the expected JSON structure.
    #[error("range directory payload did not decode: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A single malformed CIDR entry or address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid CIDR range '{0}'")]
    InvalidCidr(String),

    #[error("invalid IPv4 address '{0}'")]
    InvalidAddress(String),
}

/// Failure relaying an accepted webhook downstream. Not retried.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The downstream call itself failed (connect, timeout, ...).
    #[error("downstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The downstream answered with a non-success status.
    #[error("downstream returned status {0}")]
    Status(reqwest::StatusCode),
}
