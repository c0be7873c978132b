use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Per-route payment configuration, loaded once at startup. The set of
/// registered paths defines exactly which routes are gated.
#[derive(Debug, Clone)]
pub struct RouteConfig {
    /// Human-readable USDC price as a decimal string, e.g. "0.01".
    pub price: String,
    pub description: String,
}

/// The 402 descriptor shown to an unpaid caller. Serialized verbatim into
/// both the response body and the `X-Payment-Requirements` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequirements {
    pub x402_version: u32,
    pub accepts: Vec<String>,
    pub usdc_address: Address,
    pub pay_to: Address,
    /// Required amount in token base units.
    pub max_amount_required: String,
    pub chain_id: u64,
    /// Full URL of the protected resource, so a proof cannot be replayed
    /// against a different endpoint.
    pub resource: String,
    pub facilitator_url: String,
    pub description: String,
    pub mime_type: String,
}

/// Body of the POST to the facilitator's `/verify` endpoint.
///
/// The amount here and the one quoted in [`PaymentRequirements`] for the same
/// route derive from the same stored conversion, so the two never diverge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    /// Opaque payment proof, passed through from the `X-PAYMENT` header.
    pub payment: String,
    pub pay_to: Address,
    pub max_amount_required: String,
    pub chain_id: u64,
    pub usdc_address: Address,
    pub resource: String,
}

/// The facilitator's answer. A well-formed response that omits `valid`
/// deserializes to `valid = false`: the gate never admits on ambiguous
/// facilitator output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    #[serde(default)]
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
