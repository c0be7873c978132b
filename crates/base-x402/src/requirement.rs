use alloy::primitives::Address;

use crate::constants::{CHAIN_ID, SCHEME_EXACT, USDC_ADDRESS, X402_VERSION};
use crate::payment::PaymentRequirements;

/// Assembles [`PaymentRequirements`] descriptors from deployment constants.
///
/// The recipient, facilitator, token contract, and chain are fixed for the
/// process lifetime; only the amount, description, and resource vary per
/// route and request.
#[derive(Debug, Clone)]
pub struct RequirementBuilder {
    pay_to: Address,
    facilitator_url: String,
    usdc_address: Address,
    chain_id: u64,
}

impl RequirementBuilder {
    /// Uses the USDC-on-Base deployment constants. Any trailing `/` on
    /// `facilitator_url` is stripped so downstream concatenation never
    /// produces a doubled separator.
    pub fn new(pay_to: Address, facilitator_url: &str) -> Self {
        Self {
            pay_to,
            facilitator_url: facilitator_url.trim_end_matches('/').to_string(),
            usdc_address: USDC_ADDRESS,
            chain_id: CHAIN_ID,
        }
    }

    pub fn pay_to(&self) -> Address {
        self.pay_to
    }

    pub fn facilitator_url(&self) -> &str {
        &self.facilitator_url
    }

    pub fn usdc_address(&self) -> Address {
        self.usdc_address
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Build the descriptor for one gated route and request. `amount` is the
    /// route's price already converted to base units via
    /// [`to_base_units`](crate::amount::to_base_units) at registration.
    pub fn build(&self, amount: &str, description: &str, resource: &str) -> PaymentRequirements {
        PaymentRequirements {
            x402_version: X402_VERSION,
            accepts: vec![SCHEME_EXACT.to_string()],
            usdc_address: self.usdc_address,
            pay_to: self.pay_to,
            max_amount_required: amount.to_string(),
            chain_id: self.chain_id,
            resource: resource.to_string(),
            facilitator_url: self.facilitator_url.clone(),
            description: description.to_string(),
            mime_type: "application/json".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_recipient() -> Address {
        "0x5C78C7E37f3cCB01059167BaE3b4622b44f97D0F"
            .parse()
            .unwrap()
    }

    #[test]
    fn test_build_populates_protocol_constants() {
        let builder = RequirementBuilder::new(test_recipient(), "https://x402.org/facilitator");
        let req = builder.build("10000", "Premium data endpoint", "https://api.example.com/api/data");

        assert_eq!(req.x402_version, 1);
        assert_eq!(req.accepts, vec!["exact".to_string()]);
        assert_eq!(req.usdc_address, USDC_ADDRESS);
        assert_eq!(req.pay_to, test_recipient());
        assert_eq!(req.max_amount_required, "10000");
        assert_eq!(req.chain_id, 8453);
        assert_eq!(req.resource, "https://api.example.com/api/data");
        assert_eq!(req.mime_type, "application/json");
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let builder = RequirementBuilder::new(test_recipient(), "https://x402.org/facilitator/");
        assert_eq!(builder.facilitator_url(), "https://x402.org/facilitator");

        let req = builder.build("10000", "d", "https://api.example.com/x");
        assert_eq!(req.facilitator_url, "https://x402.org/facilitator");
    }

    #[test]
    fn test_build_is_idempotent() {
        let builder = RequirementBuilder::new(test_recipient(), "https://x402.org/facilitator");
        let a = builder.build("10000", "Premium data endpoint", "https://api.example.com/api/data");
        let b = builder.build("10000", "Premium data endpoint", "https://api.example.com/api/data");

        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
