//! Downstream relay client.
//!
//! Accepted webhooks are forwarded verbatim: original query string appended
//! to the downstream URL, original body bytes, original content type. There
//! are no retries; a failure is reported back to the caller of the single
//! affected request.

use axum::body::Bytes;
use reqwest::{header, Client, StatusCode};
use tracing::info;
use url::Url;

use crate::error::RelayError;

/// Outcome of a successful downstream call.
#[derive(Debug)]
pub struct RelayOutcome {
    pub status: StatusCode,
    pub body: String,
}

/// Client for the downstream automation endpoint.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    downstream_url: Url,
}

impl RelayClient {
    pub fn new(client: Client, downstream_url: Url) -> Self {
        Self {
            client,
            downstream_url,
        }
    }

    /// Forward a webhook body downstream with `query` appended.
    ///
    /// A non-success downstream status is an error: the caller gets an
    /// explicit relay failure rather than a silent success.
    pub async fn forward(
        &self,
        query: Option<&str>,
        content_type: &str,
        body: Bytes,
    ) -> Result<RelayOutcome, RelayError> {
        let mut url = self.downstream_url.clone();
        url.set_query(query);

        let response = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Status(status));
        }

        let body = response.text().await?;

        info!(
            status = status.as_u16(),
            body_length = body.len(),
            "relay_complete"
        );

        Ok(RelayOutcome { status, body })
    }
}
