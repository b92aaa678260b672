use std::sync::Arc;

use anyhow::Result;
use lambda_http::{http::Method, Body, Error, Request, Response};
use serde_json::json;
use tracing;

use crate::{
    bal::{
        auth::verify::SignatureVerifier,
        discord::role_manager::RoleManager,
        route::{
            component_router::ComponentRouter,
            interaction_router::{InteractionRouter, RouteOutcome},
        },
    },
    config::Config,
    dal::{dao::statsfm_dao::StatsfmDao, model::interaction_request::InteractionRequest},
};

const INTERACTION_PATH: &str = "/interaction";
const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Everything an invocation needs, built once per cold start.
pub struct App {
    verifier: SignatureVerifier,
    router: InteractionRouter,
    redirect_url: String,
}

impl App {
    pub fn new(
        verifier: SignatureVerifier,
        router: InteractionRouter,
        redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            verifier,
            router,
            redirect_url: redirect_url.into(),
        }
    }

    pub fn from_config(config: &Config, http_client: reqwest::Client) -> Result<Self> {
        let verifier = SignatureVerifier::new(&config.discord_public_key)?;

        let statsfm = StatsfmDao::new(http_client.clone(), config.statsfm_api_base.as_str());
        let role_manager = RoleManager::new(
            http_client,
            config.discord_token.as_str(),
            config.discord_api_base.as_str(),
        );

        let router = InteractionRouter::new(ComponentRouter::new(
            Arc::new(statsfm),
            Arc::new(role_manager),
        ));

        Ok(Self::new(verifier, router, config.redirect_url.as_str()))
    }
}

pub(crate) async fn function_handler(event: Request, app: Arc<App>) -> Result<Response<Body>, Error> {
    tracing::info!("Lambda invoked: {} {}", event.method(), event.uri().path());

    if event.method() != Method::POST || !event.uri().path().ends_with(INTERACTION_PATH) {
        return redirect_response(&app.redirect_url);
    }

    let headers = event.headers();
    let signature = headers
        .get("x-signature-ed25519")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let timestamp = headers
        .get("x-signature-timestamp")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    // Verified and parsed from the same buffer.
    let body_bytes = event.body().as_ref();

    if !app.verifier.is_valid(signature, timestamp, body_bytes) {
        return Ok(Response::builder().status(401).body(Body::Empty)?);
    }

    let interaction: InteractionRequest = match serde_json::from_slice(body_bytes) {
        Ok(i) => i,
        Err(e) => {
            tracing::warn!("Failed to parse interaction request: {:?}", e);
            return json_response(400, &json!({ "error": "Invalid JSON" }));
        }
    };

    match app.router.route(&interaction).await {
        RouteOutcome::Reply(response) => json_response(200, &response),
        RouteOutcome::UnknownType(kind) => {
            tracing::error!("Unknown Type: {:?}", kind);
            json_response(400, &json!({ "error": "Unknown Type" }))
        }
    }
}

fn json_response<T: serde::Serialize>(status: u16, body: &T) -> Result<Response<Body>, Error> {
    let body_str = serde_json::to_string(body)?;

    Ok(Response::builder()
        .status(status)
        .header("content-type", JSON_CONTENT_TYPE)
        .body(body_str.into())?)
}

fn redirect_response(location: &str) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(302)
        .header("location", location)
        .body(Body::Empty)?)
}
