//! Health Lambda - Handles /health endpoint.

use lambda_http::{run, service_fn, Error, Request};
use shared::{Config, Cors};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    // Only the CORS origin matters here; mail settings are not validated.
    let cors = Cors::new(Config::cors_origin_from_env());

    run(service_fn(move |event: Request| {
        let cors = cors.clone();
        async move { api_gateway::health::check(&cors, &event) }
    }))
    .await
}
