//! Trusted-range directory client and refresh schedule.
//!
//! The directory is an HTTP endpoint returning `{"items": [...]}` where each
//! item may expose a `cidr` string; everything else in an item is ignored.
//! A refresh that fails, for transport or decode reasons, leaves the
//! previously installed set in force.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};

use crate::error::FetchError;
use crate::filter::{Ipv4Range, RangeGuard, RangeSet};

/// Directory document shape. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct Directory {
    items: Vec<DirectoryItem>,
}

/// One directory entry; only the optional CIDR string matters here.
#[derive(Debug, Deserialize)]
struct DirectoryItem {
    #[serde(default)]
    cidr: Option<String>,
}

/// Client for the trusted-range directory.
#[derive(Debug, Clone)]
pub struct RangeSource {
    client: Client,
    url: String,
}

impl RangeSource {
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }

    /// Fetch the directory and parse it into a fresh [`RangeSet`].
    ///
    /// Entries without a `cidr` field are skipped. A malformed CIDR entry is
    /// logged and dropped without failing the whole refresh.
    pub async fn fetch(&self) -> Result<RangeSet, FetchError> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_directory(&body)
    }
}

/// Decode a directory body into a [`RangeSet`].
fn parse_directory(body: &str) -> Result<RangeSet, FetchError> {
    let directory: Directory = serde_json::from_str(body)?;

    let mut ranges = Vec::with_capacity(directory.items.len());
    for item in directory.items {
        let Some(cidr) = item.cidr else { continue };
        match Ipv4Range::parse(&cidr) {
            Ok(range) => ranges.push(range),
            Err(e) => warn!(cidr = %cidr, error = %e, "range_entry_skipped"),
        }
    }

    Ok(RangeSet::new(ranges))
}

/// One refresh cycle: fetch, then install on success.
///
/// A failed fetch only logs; the currently installed set stays untouched.
pub async fn refresh_once(source: &RangeSource, guard: &RangeGuard) {
    match source.fetch().await {
        Ok(set) => {
            info!(ranges = set.len(), "trusted_ranges_updated");
            guard.install(set);
        }
        Err(e) => {
            warn!(error = %e, "trusted_ranges_refresh_failed");
        }
    }
}

/// Run the refresh schedule forever, one fetch per `period`.
///
/// Call after an initial [`refresh_once`]; the interval's immediate first
/// tick is consumed here so the next fetch lands one full period out.
/// Fetches run to completion inside this single task, so a slow refresh
/// collapses the next tick instead of overlapping it.
pub async fn run_refresh_loop(source: RangeSource, guard: Arc<RangeGuard>, period: Duration) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    loop {
        ticker.tick().await;
        refresh_once(&source, &guard).await;
    }
}
