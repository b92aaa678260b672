use anyhow::{bail, Context, Result};
use tracing::info;

use crate::dal::reader::secrets_reader::SecretsReader;

const DEFAULT_STATSFM_API_BASE: &str = "https://beta-api.stats.fm/api/v1";
const DEFAULT_DISCORD_API_BASE: &str = "https://discord.com/api/v10";
const DEFAULT_REDIRECT_URL: &str = "https://stats.fm";

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_public_key: String,
    pub discord_token: String,
    pub statsfm_api_base: String,
    pub discord_api_base: String,
    pub redirect_url: String,
}

impl Config {
    pub async fn from_env() -> Result<Self> {
        Self::load(&|name: &str| std::env::var(name).ok()).await
    }

    async fn load(var: &(dyn Fn(&str) -> Option<String> + Sync)) -> Result<Self> {
        let mut secrets = None;

        let discord_public_key = resolve_secret(
            var,
            "DISCORD_PUBLIC_KEY",
            "DISCORD_PUBLIC_KEY_SECRET_ARN",
            "key",
            &mut secrets,
        )
        .await?;

        let discord_token = resolve_secret(
            var,
            "DISCORD_TOKEN",
            "DISCORD_TOKEN_SECRET_ARN",
            "token",
            &mut secrets,
        )
        .await?;

        let or_default = |name: &str, default: &str| {
            var(name)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            discord_public_key,
            discord_token,
            statsfm_api_base: or_default("STATSFM_API_BASE", DEFAULT_STATSFM_API_BASE),
            discord_api_base: or_default("DISCORD_API_BASE", DEFAULT_DISCORD_API_BASE),
            redirect_url: or_default("REDIRECT_URL", DEFAULT_REDIRECT_URL),
        })
    }
}

/// A plain environment variable wins over a Secrets Manager ARN.
async fn resolve_secret(
    var: &(dyn Fn(&str) -> Option<String> + Sync),
    name: &str,
    arn_name: &str,
    key: &str,
    secrets: &mut Option<SecretsReader>,
) -> Result<String> {
    if let Some(value) = var(name).filter(|v| !v.is_empty()) {
        return Ok(value);
    }

    let Some(arn) = var(arn_name).filter(|v| !v.is_empty()) else {
        bail!("Missing {} (or {})", name, arn_name);
    };

    if secrets.is_none() {
        *secrets = Some(SecretsReader::from_env().await);
    }
    let reader = secrets
        .as_ref()
        .context("Secrets Manager client unavailable")?;

    info!("Loading {} from Secrets Manager", name);
    reader
        .get_secret_value(&arn, key)
        .await
        .with_context(|| format!("Failed to load {} from {}", name, arn_name))
}
