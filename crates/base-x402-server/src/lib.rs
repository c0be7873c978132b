//! x402 resource server: demo API endpoints gated behind 402 payments.
//!
//! Requests to registered paid routes are intercepted by the payment gate:
//! unpaid callers receive HTTP 402 with
//! [`PaymentRequirements`](x402::payment::PaymentRequirements), and supplied
//! proofs are verified with the facilitator before the handler runs.
//!
//! # Modules
//!
//! - [`config`] — environment configuration ([`ServerConfig`](config::ServerConfig))
//! - [`middleware`] — gate decision to HTTP translation ([`require_payment`](middleware::require_payment))
//! - [`routes`] — free, discovery, and demo paid endpoints
//! - [`metrics`] — Prometheus counters for request and payment tracking

pub mod config;
pub mod metrics;
pub mod middleware;
pub mod routes;

pub use config::{ConfigError, ServerConfig};
pub use middleware::{payment_required_response, require_payment};
