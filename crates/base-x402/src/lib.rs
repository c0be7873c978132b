//! x402 pay-per-request gating for USDC on Base.
//!
//! Routes registered with the gate return HTTP 402 with machine-readable
//! [`PaymentRequirements`] until the caller presents a payment proof in the
//! `X-PAYMENT` header; the proof is validated by a remote facilitator before
//! the protected handler runs.
//!
//! # Three-party model
//!
//! - **Client** — pays on-chain and retries the request with a proof header
//! - **Server** ([`PaymentGate`]) — gates endpoints, returns 402 with pricing
//! - **Facilitator** ([`FacilitatorClient`]) — verifies proofs against the chain
//!
//! # Quick example (server)
//!
//! ```no_run
//! use x402::{GateDecision, PaymentGateBuilder};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), x402::X402Error> {
//! let gate = PaymentGateBuilder::new(
//!     "0x5C78C7E37f3cCB01059167BaE3b4622b44f97D0F".parse().unwrap(),
//!     "https://x402.org/facilitator",
//! )
//! .route("/api/data", "0.01", "Premium data endpoint")?
//! .build();
//!
//! let decision = gate
//!     .decide("/api/data", "https://api.example.com/api/data", None)
//!     .await;
//! assert!(matches!(decision, GateDecision::Unpaid(_)));
//! # Ok(())
//! # }
//! ```

pub mod amount;
pub mod constants;
pub mod error;
pub mod facilitator;
pub mod gate;
pub mod payment;
pub mod requirement;

pub use constants::*;
pub use error::X402Error;
pub use facilitator::FacilitatorClient;
pub use gate::{GateDecision, PaymentGate, PaymentGateBuilder};
pub use payment::{PaymentRequirements, RouteConfig, VerifyRequest, VerifyResponse};
pub use requirement::RequirementBuilder;
