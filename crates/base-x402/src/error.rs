use thiserror::Error;

/// Errors returned by x402 operations.
///
/// A malformed price is a configuration fault: it surfaces when a route is
/// registered, never during request handling. Facilitator failures are
/// transport-level and map to a 502 at the HTTP boundary; an invalid payment
/// is not an error but a [`GateDecision`](crate::gate::GateDecision) outcome.
#[derive(Debug, Error)]
pub enum X402Error {
    #[error("malformed amount: {0}")]
    MalformedAmount(String),

    #[error("facilitator unreachable: {0}")]
    FacilitatorUnreachable(String),
}
