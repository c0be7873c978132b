//! Translates [`GateDecision`] outcomes into actix responses.
//!
//! Handlers behind the gate call [`require_payment`] first; an `Err` carries
//! the fully formed response the host must send verbatim without invoking
//! the protected handler.

use actix_web::{HttpRequest, HttpResponse};
use x402::{
    GateDecision, PaymentGate, PaymentRequirements, PAYMENT_HEADER, PAYMENT_REQUIREMENTS_HEADER,
};

use crate::metrics::{PAYMENT_ATTEMPTS, REQUESTS};

/// Full URL of the request, quoted as the protected resource in the
/// descriptor and bound into the verification request.
fn resource_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}{}", info.scheme(), info.host(), req.uri())
}

/// Build the 402 response for an unpaid request. The body and the
/// `X-Payment-Requirements` header carry the same descriptor, serialized
/// once so the two are byte-identical.
pub fn payment_required_response(requirements: &PaymentRequirements) -> HttpResponse {
    match serde_json::to_string(requirements) {
        Ok(body) => HttpResponse::PaymentRequired()
            .content_type("application/json")
            .insert_header((PAYMENT_REQUIREMENTS_HEADER, body.clone()))
            .body(body),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize payment requirements");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Run the payment gate for this request. `Ok(())` means the protected
/// handler may execute; `Err` is the response to send instead.
pub async fn require_payment(
    req: &HttpRequest,
    gate: &PaymentGate,
) -> Result<(), HttpResponse> {
    let proof = req
        .headers()
        .get(PAYMENT_HEADER)
        .and_then(|v| v.to_str().ok());
    let resource = resource_url(req);

    // Label metrics by route pattern, not raw path, to bound cardinality
    let endpoint = req
        .match_pattern()
        .unwrap_or_else(|| "unknown".to_string());

    match gate.decide(req.path(), &resource, proof).await {
        GateDecision::PassThrough => Ok(()),
        GateDecision::Admitted => {
            PAYMENT_ATTEMPTS.with_label_values(&["admitted"]).inc();
            REQUESTS
                .with_label_values(&[endpoint.as_str(), "200"])
                .inc();
            Ok(())
        }
        GateDecision::Unpaid(requirements) => {
            REQUESTS
                .with_label_values(&[endpoint.as_str(), "402"])
                .inc();
            Err(payment_required_response(&requirements))
        }
        GateDecision::Rejected { reason } => {
            PAYMENT_ATTEMPTS.with_label_values(&["rejected"]).inc();
            REQUESTS
                .with_label_values(&[endpoint.as_str(), "402"])
                .inc();
            Err(HttpResponse::PaymentRequired().json(serde_json::json!({
                "error": "Payment verification failed",
                "reason": reason,
            })))
        }
        GateDecision::Unreachable { detail } => {
            PAYMENT_ATTEMPTS.with_label_values(&["unreachable"]).inc();
            REQUESTS
                .with_label_values(&[endpoint.as_str(), "502"])
                .inc();
            Err(HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Facilitator unreachable",
                "detail": detail,
            })))
        }
    }
}
