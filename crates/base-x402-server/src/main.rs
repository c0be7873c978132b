use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{web, App, HttpServer};

use x402::PaymentGateBuilder;
use x402_server::config::ServerConfig;
use x402_server::routes;

fn build_cors(origins: &[String]) -> Cors {
    // No configured origins: allow localhost (any port) for development
    if origins.is_empty() {
        return Cors::default()
            .allowed_origin_fn(|origin, _| {
                origin
                    .to_str()
                    .map(|o| o == "http://localhost" || o.starts_with("http://localhost:"))
                    .unwrap_or(false)
            })
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);
    }

    let mut cors = Cors::default();
    for origin in origins {
        cors = cors.allowed_origin(origin);
    }
    cors.allow_any_method().allow_any_header().max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    // A malformed price must never reach request handling
    let gate = PaymentGateBuilder::new(config.recipient, &config.facilitator_url)
        .route("/api/data", "0.01", "Premium data endpoint")
        .and_then(|b| b.route("/api/premium", "0.05", "Premium analytics"));
    let gate = match gate {
        Ok(builder) => builder.build(),
        Err(e) => {
            tracing::error!(error = %e, "invalid route price");
            std::process::exit(1);
        }
    };

    let port = config.port;
    let cors_origins = config.allowed_origins.clone();

    tracing::info!("x402 resource server listening at http://localhost:{port}");
    tracing::info!(
        facilitator = %gate.facilitator_url(),
        recipient = %gate.recipient(),
        "payment gate configured"
    );
    tracing::info!("Free endpoints: GET /health, GET /.well-known/x402, GET /metrics");
    tracing::info!("Paid endpoints: GET /api/data ($0.01), GET /api/premium ($0.05)");
    tracing::info!("Rate limit: {} req/min per IP", config.rate_limit_rpm);

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_minute(config.rate_limit_rpm)
        .finish()
        .expect("failed to build rate limiter config");

    let gate = web::Data::new(gate);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&cors_origins))
            .wrap(Governor::new(&governor_conf))
            .app_data(web::JsonConfig::default().limit(65_536))
            .app_data(gate.clone())
            .app_data(config.clone())
            .service(routes::health)
            .service(routes::discovery)
            .service(routes::metrics_endpoint)
            .service(routes::data)
            .service(routes::premium)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
