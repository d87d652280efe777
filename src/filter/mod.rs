//! Trusted-range membership engine.
//!
//! This module answers one question on the hot path: is the caller's
//! address covered by any currently trusted CIDR range?
//!
//! - `range`: CIDR parsing and masked-prefix matching
//! - `guard`: the atomically swappable holder of the active range set

pub mod guard;
pub mod range;

pub use guard::RangeGuard;
pub use range::{Ipv4Range, RangeSet};
