//! HookGate - trusted-range webhook gateway.
//!
//! This library provides the modules behind the `hookgate` binary:
//! - `filter`: CIDR parsing and the atomic membership guard
//! - `ranges`: trusted-range directory client and refresh schedule
//! - `relay`: downstream forwarding client
//! - `web`: routes and handlers for the gatekeeping endpoint
//!
//! ## Architecture
//!
//! ```text
//! Directory --(periodic refresh)--> RangeGuard
//! Webhook --> is_member? --> Relay --> Downstream
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod ranges;
pub mod relay;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::{FetchError, ParseError, RelayError};
pub use filter::{Ipv4Range, RangeGuard, RangeSet};
pub use ranges::RangeSource;
pub use relay::RelayClient;
pub use web::AppState;
