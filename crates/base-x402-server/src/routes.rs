use actix_web::{get, web, HttpRequest, HttpResponse};
use chrono::Utc;
use subtle::ConstantTimeEq;
use x402::PaymentGate;

use crate::config::ServerConfig;
use crate::middleware::require_payment;

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    bool::from(a.ct_eq(b))
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "x402-server",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Discovery metadata: a read-only projection of the route table for the
/// x402 ecosystem.
#[get("/.well-known/x402")]
pub async fn discovery(
    gate: web::Data<PaymentGate>,
    config: web::Data<ServerConfig>,
) -> HttpResponse {
    let mut routes: Vec<_> = gate.routes().collect();
    routes.sort_by_key(|(path, _)| *path);

    let endpoints: Vec<_> = routes
        .into_iter()
        .map(|(path, route)| {
            serde_json::json!({
                "path": path,
                "method": "GET",
                "price": route.price,
                "currency": "USDC",
                "network": "base",
                "description": route.description,
            })
        })
        .collect();

    HttpResponse::Ok()
        .insert_header(("Cache-Control", "public, max-age=3600"))
        .json(serde_json::json!({
            "name": "x402 resource server",
            "description": "A payment-gated API powered by x402 and USDC on Base",
            "url": config.base_url,
            "endpoints": endpoints,
            "facilitator": gate.facilitator_url(),
            "recipient": gate.recipient(),
        }))
}

#[get("/metrics")]
pub async fn metrics_endpoint(
    req: HttpRequest,
    config: web::Data<ServerConfig>,
) -> HttpResponse {
    if let Some(expected) = &config.metrics_token {
        let authorized = req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|token| constant_time_eq(token.as_bytes(), expected.as_bytes()))
            .unwrap_or(false);

        if !authorized {
            return HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "unauthorized",
                "message": "Valid Bearer token required for /metrics"
            }));
        }
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(crate::metrics::metrics_output())
}

#[get("/api/data")]
pub async fn data(req: HttpRequest, gate: web::Data<PaymentGate>) -> HttpResponse {
    if let Err(response) = require_payment(&req, &gate).await {
        return response;
    }

    HttpResponse::Ok().json(serde_json::json!({
        "data": "Here is your premium data",
        "timestamp": Utc::now().to_rfc3339(),
        "paid": true,
    }))
}

#[get("/api/premium")]
pub async fn premium(req: HttpRequest, gate: web::Data<PaymentGate>) -> HttpResponse {
    if let Err(response) = require_payment(&req, &gate).await {
        return response;
    }

    HttpResponse::Ok().json(serde_json::json!({
        "analytics": { "visitors": 1234, "conversions": 56 },
        "timestamp": Utc::now().to_rfc3339(),
        "paid": true,
    }))
}
