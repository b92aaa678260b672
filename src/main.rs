use std::sync::Arc;

use lambda_http::{run, service_fn, Error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod bal;
pub mod config;
pub mod dal;
pub mod http_handler;

#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::Config::from_env().await?;
    let http_client = reqwest::Client::new();
    let app = Arc::new(http_handler::App::from_config(&config, http_client)?);

    run(service_fn(move |event| {
        http_handler::function_handler(event, app.clone())
    }))
    .await
}
