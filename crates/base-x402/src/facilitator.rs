//! HTTP client for the remote facilitator's `/verify` endpoint.

use std::time::Duration;

use crate::error::X402Error;
use crate::payment::{VerifyRequest, VerifyResponse};

/// Upper bound on a verification round-trip. A hung facilitator must not be
/// able to stall the host's serving capacity; expiry surfaces as
/// [`X402Error::FacilitatorUnreachable`].
pub const VERIFY_TIMEOUT: Duration = Duration::from_secs(15);

/// Performs the single outbound call that asks the facilitator to validate a
/// payment proof. One POST per invocation, no retries; retry policy, if any,
/// belongs to the caller. No verification outcome is ever cached.
#[derive(Debug, Clone)]
pub struct FacilitatorClient {
    http: reqwest::Client,
    base_url: String,
}

impl FacilitatorClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Use a caller-supplied client (shared connection pool).
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the proof to `{base_url}/verify` and parse the facilitator's
    /// answer. Transport failure, timeout, or a non-parseable body all fail
    /// with [`X402Error::FacilitatorUnreachable`]: an infrastructure fault,
    /// never to be conflated with a negative verification result.
    pub async fn verify(&self, request: &VerifyRequest) -> Result<VerifyResponse, X402Error> {
        let url = format!("{}/verify", self.base_url);

        let response = self
            .http
            .post(&url)
            .timeout(VERIFY_TIMEOUT)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                X402Error::FacilitatorUnreachable(format!("verify request failed: {e}"))
            })?;

        response.json::<VerifyResponse>().await.map_err(|e| {
            X402Error::FacilitatorUnreachable(format!("verify response parse failed: {e}"))
        })
    }
}
