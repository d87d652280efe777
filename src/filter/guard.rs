//! Atomic holder of the active trusted-range set.
//!
//! `install` swaps in a wholly new [`RangeSet`] with a single pointer store;
//! `is_member` loads the current snapshot without locking. The request path
//! therefore never waits on an in-progress refresh, and no reader can ever
//! observe a partially replaced set.

use std::net::IpAddr;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::debug;

use super::range::RangeSet;

/// Process-wide guard over the current trusted ranges.
///
/// Starts out holding the empty set, which denies every caller until the
/// first successful refresh installs real ranges.
#[derive(Debug)]
pub struct RangeGuard {
    current: ArcSwap<RangeSet>,
}

impl RangeGuard {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(RangeSet::empty()),
        }
    }

    /// Replace the active set wholesale.
    ///
    /// Safe under any number of concurrent membership checks: a check that
    /// already loaded the old snapshot finishes against it, later checks see
    /// the new one.
    pub fn install(&self, set: RangeSet) {
        self.current.store(Arc::new(set));
    }

    /// Snapshot of the active set.
    pub fn snapshot(&self) -> Arc<RangeSet> {
        self.current.load_full()
    }

    /// Whether `addr` is covered by any trusted range.
    ///
    /// IPv6 callers are denied; the matcher is IPv4-only.
    pub fn is_member(&self, addr: IpAddr) -> bool {
        match addr {
            IpAddr::V4(v4) => self.current.load().contains(v4),
            IpAddr::V6(_) => {
                debug!(address = %addr, "ipv6_caller_denied");
                false
            }
        }
    }

    /// Membership check for an address still in text form.
    ///
    /// Anything that does not parse as an address is a deny, never an error.
    pub fn is_member_str(&self, addr: &str) -> bool {
        match addr.trim().parse::<IpAddr>() {
            Ok(addr) => self.is_member(addr),
            Err(_) => false,
        }
    }
}

impl Default for RangeGuard {
    fn default() -> Self {
        Self::new()
    }
}
