//! Backend entry-point: wires REST endpoints and health probes.

use actix_web::{App, HttpServer, web};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::Trace;
use backend::inbound::http;
use backend::inbound::http::health::HealthState;
use backend::server::{self, config::ServerConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env();
    let state = web::Data::new(server::build_state());
    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays shared.
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .configure(http::configure)
    })
    .bind(config.bind_addr.as_str())?;

    health_state.mark_ready();
    server.run().await
}
