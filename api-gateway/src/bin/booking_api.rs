//! Booking API Lambda - Serves bookings, availability and health from one process.
//!
//! Routing every endpoint through one function keeps a single slot registry per
//! execution environment, so availability checks see the bookings made here.

use api_gateway::{route, AppState};
use lambda_http::{run, service_fn, Error, Request};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::from_env()?);

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { route(&state, event).await }
    }))
    .await
}
