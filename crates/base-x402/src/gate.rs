//! The interception decision engine.
//!
//! Every inbound request is put to [`PaymentGate::decide`], which yields a
//! framework-neutral [`GateDecision`] the host server's routing layer
//! interprets: proceed to the handler, or send a fully formed 402/502
//! response without invoking it.

use std::collections::HashMap;

use alloy::primitives::Address;

use crate::amount::to_base_units;
use crate::constants::TOKEN_DECIMALS;
use crate::error::X402Error;
use crate::facilitator::FacilitatorClient;
use crate::payment::{PaymentRequirements, RouteConfig, VerifyRequest};
use crate::requirement::RequirementBuilder;

/// A gated route: its configuration plus the price converted to base units
/// once at registration. The 402 descriptor and the verify request both read
/// this string, so the two amounts are byte-identical by construction.
#[derive(Debug, Clone)]
struct PaidRoute {
    config: RouteConfig,
    amount: String,
}

/// Terminal outcome of gating a single request. No state is retained across
/// requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Path is not gated; the handler executes untouched.
    PassThrough,
    /// Gated path, no proof presented: respond 402 with the descriptor.
    Unpaid(PaymentRequirements),
    /// Facilitator confirmed the proof; the handler executes.
    Admitted,
    /// Facilitator explicitly rejected the proof: respond 402 with the reason.
    Rejected { reason: String },
    /// Facilitator could not be consulted: respond 502. An infrastructure
    /// fault, distinct from an invalid payment.
    Unreachable { detail: String },
}

/// Registers priced routes and produces an immutable [`PaymentGate`].
///
/// Prices are converted at registration so a malformed entry fails startup
/// instead of request handling.
pub struct PaymentGateBuilder {
    builder: RequirementBuilder,
    facilitator: FacilitatorClient,
    routes: HashMap<String, PaidRoute>,
}

impl PaymentGateBuilder {
    pub fn new(pay_to: Address, facilitator_url: &str) -> Self {
        Self {
            builder: RequirementBuilder::new(pay_to, facilitator_url),
            facilitator: FacilitatorClient::new(facilitator_url),
            routes: HashMap::new(),
        }
    }

    /// Register a priced route, e.g. `route("/api/data", "0.01", "Premium
    /// data endpoint")`. Matching is exact on the path component only.
    pub fn route(
        mut self,
        path: &str,
        price: &str,
        description: &str,
    ) -> Result<Self, X402Error> {
        let amount = to_base_units(price, TOKEN_DECIMALS)?;
        self.routes.insert(
            path.to_string(),
            PaidRoute {
                config: RouteConfig {
                    price: price.to_string(),
                    description: description.to_string(),
                },
                amount,
            },
        );
        Ok(self)
    }

    pub fn build(self) -> PaymentGate {
        PaymentGate {
            builder: self.builder,
            facilitator: self.facilitator,
            routes: self.routes,
        }
    }
}

/// Read-only after construction; safe to share across concurrent requests
/// without synchronization.
pub struct PaymentGate {
    builder: RequirementBuilder,
    facilitator: FacilitatorClient,
    routes: HashMap<String, PaidRoute>,
}

impl PaymentGate {
    /// Decide the outcome for one request.
    ///
    /// `path` is the request path component (no query string); `resource` is
    /// the full URL quoted in the descriptor and bound into the verify
    /// request; `proof` is the raw `X-PAYMENT` header value, if any.
    ///
    /// An absent or empty proof on a gated path yields [`GateDecision::Unpaid`]
    /// without any network call. A present proof triggers exactly one
    /// facilitator call. A "0" price is not special-cased: the proof is still
    /// required; exclude the path from registration to make a route free.
    pub async fn decide(&self, path: &str, resource: &str, proof: Option<&str>) -> GateDecision {
        let Some(route) = self.routes.get(path) else {
            return GateDecision::PassThrough;
        };

        let Some(proof) = proof.filter(|p| !p.is_empty()) else {
            tracing::info!(path, price = %route.config.price, "payment required");
            return GateDecision::Unpaid(self.builder.build(
                &route.amount,
                &route.config.description,
                resource,
            ));
        };

        let request = VerifyRequest {
            payment: proof.to_string(),
            pay_to: self.builder.pay_to(),
            max_amount_required: route.amount.clone(),
            chain_id: self.builder.chain_id(),
            usdc_address: self.builder.usdc_address(),
            resource: resource.to_string(),
        };

        match self.facilitator.verify(&request).await {
            Ok(response) if response.valid => {
                tracing::info!(path, "payment verified");
                GateDecision::Admitted
            }
            Ok(response) => {
                let reason = response.reason.unwrap_or_else(|| "Unknown".to_string());
                tracing::warn!(path, reason = %reason, "payment rejected");
                GateDecision::Rejected { reason }
            }
            Err(X402Error::FacilitatorUnreachable(detail)) => {
                tracing::error!(path, detail = %detail, "facilitator unreachable");
                GateDecision::Unreachable { detail }
            }
            Err(e) => {
                tracing::error!(path, error = %e, "payment verification failed");
                GateDecision::Unreachable {
                    detail: e.to_string(),
                }
            }
        }
    }

    /// The route table, for the discovery document. Read-only projection.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &RouteConfig)> {
        self.routes
            .iter()
            .map(|(path, route)| (path.as_str(), &route.config))
    }

    pub fn recipient(&self) -> Address {
        self.builder.pay_to()
    }

    pub fn facilitator_url(&self) -> &str {
        self.builder.facilitator_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESOURCE: &str = "https://api.example.com/api/data";

    fn gate_with_facilitator(facilitator_url: &str) -> PaymentGate {
        PaymentGateBuilder::new(Address::ZERO, facilitator_url)
            .route("/api/data", "0.01", "Premium data endpoint")
            .unwrap()
            .build()
    }

    #[tokio::test]
    async fn test_unknown_path_passes_through() {
        let gate = gate_with_facilitator("http://127.0.0.1:1");

        let decision = gate.decide("/health", RESOURCE, None).await;
        assert_eq!(decision, GateDecision::PassThrough);

        // Headers present on an ungated path change nothing
        let decision = gate.decide("/health", RESOURCE, Some("proof")).await;
        assert_eq!(decision, GateDecision::PassThrough);
    }

    #[tokio::test]
    async fn test_no_prefix_matching() {
        let gate = gate_with_facilitator("http://127.0.0.1:1");

        let decision = gate.decide("/api/data/extra", RESOURCE, None).await;
        assert_eq!(decision, GateDecision::PassThrough);
    }

    #[tokio::test]
    async fn test_missing_proof_yields_requirements() {
        let gate = gate_with_facilitator("https://x402.org/facilitator");

        let decision = gate.decide("/api/data", RESOURCE, None).await;
        let GateDecision::Unpaid(requirements) = decision else {
            panic!("expected Unpaid, got {decision:?}");
        };

        assert_eq!(
            requirements.max_amount_required,
            to_base_units("0.01", TOKEN_DECIMALS).unwrap()
        );
        assert_eq!(requirements.resource, RESOURCE);
        assert_eq!(requirements.description, "Premium data endpoint");
    }

    #[tokio::test]
    async fn test_empty_proof_is_missing_proof() {
        let gate = gate_with_facilitator("https://x402.org/facilitator");

        let decision = gate.decide("/api/data", RESOURCE, Some("")).await;
        assert!(matches!(decision, GateDecision::Unpaid(_)));
    }

    #[tokio::test]
    async fn test_zero_price_still_requires_proof() {
        let gate = PaymentGateBuilder::new(Address::ZERO, "https://x402.org/facilitator")
            .route("/api/free-ish", "0", "Zero-priced but still gated")
            .unwrap()
            .build();

        let decision = gate.decide("/api/free-ish", RESOURCE, None).await;
        let GateDecision::Unpaid(requirements) = decision else {
            panic!("expected Unpaid");
        };
        assert_eq!(requirements.max_amount_required, "0");
    }

    #[tokio::test]
    async fn test_valid_proof_is_admitted_with_one_verify_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/verify")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"valid": true}"#)
            .expect(1)
            .create_async()
            .await;

        let gate = gate_with_facilitator(&server.url());
        let decision = gate.decide("/api/data", RESOURCE, Some("proof-token")).await;

        assert_eq!(decision, GateDecision::Admitted);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_proof_carries_reason() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/verify")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"valid": false, "reason": "expired"}"#)
            .create_async()
            .await;

        let gate = gate_with_facilitator(&server.url());
        let decision = gate.decide("/api/data", RESOURCE, Some("proof-token")).await;

        assert_eq!(
            decision,
            GateDecision::Rejected {
                reason: "expired".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_ambiguous_response_rejected_as_unknown() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/verify")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let gate = gate_with_facilitator(&server.url());
        let decision = gate.decide("/api/data", RESOURCE, Some("proof-token")).await;

        assert_eq!(
            decision,
            GateDecision::Rejected {
                reason: "Unknown".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_facilitator_is_not_rejection() {
        let gate = gate_with_facilitator("http://127.0.0.1:1");
        let decision = gate.decide("/api/data", RESOURCE, Some("proof-token")).await;

        assert!(matches!(decision, GateDecision::Unreachable { .. }));
    }

    #[tokio::test]
    async fn test_verify_amount_matches_quoted_amount() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/verify")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "maxAmountRequired": "10000",
                "resource": RESOURCE,
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"valid": true}"#)
            .create_async()
            .await;

        let gate = gate_with_facilitator(&server.url());

        // The quoted requirement and the verify request read the same amount
        let GateDecision::Unpaid(requirements) = gate.decide("/api/data", RESOURCE, None).await
        else {
            panic!("expected Unpaid");
        };
        assert_eq!(requirements.max_amount_required, "10000");

        gate.decide("/api/data", RESOURCE, Some("proof-token")).await;
        mock.assert_async().await;
    }

    #[test]
    fn test_malformed_price_fails_registration() {
        let result = PaymentGateBuilder::new(Address::ZERO, "https://x402.org/facilitator")
            .route("/api/data", "$0.01", "dollar signs are not decimals");

        assert!(matches!(result, Err(X402Error::MalformedAmount(_))));
    }
}
