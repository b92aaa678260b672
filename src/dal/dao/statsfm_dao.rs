use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::info;

use crate::dal::model::statsfm::{DiscordConnection, StatsfmUser, UserEnvelope};

/// Read access to the Stats.fm accounts linked to Discord members.
///
/// Both lookups return `Ok(None)` for any non-200 answer. Transport and decode
/// failures come back as `Err`.
#[async_trait]
pub trait StatsfmApi: Send + Sync {
    async fn get_user_id_by_discord_id(&self, discord_id: &str) -> Result<Option<String>>;

    async fn get_user_profile(&self, user_id: &str) -> Result<Option<StatsfmUser>>;
}

pub struct StatsfmDao {
    client: Client,
    base_url: String,
}

impl StatsfmDao {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl StatsfmApi for StatsfmDao {
    async fn get_user_id_by_discord_id(&self, discord_id: &str) -> Result<Option<String>> {
        let url = format!("{}/private/get-user-by-discord-id", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(&[("id", discord_id)])
            .send()
            .await
            .context("Failed to send get_user_id_by_discord_id request")?;

        if resp.status() != StatusCode::OK {
            info!(
                "No Stats.fm account linked to Discord user {} (status {})",
                discord_id,
                resp.status()
            );
            return Ok(None);
        }

        let connection: DiscordConnection = resp
            .json()
            .await
            .context("Failed to deserialize DiscordConnection")?;

        if connection.user_id.is_empty() {
            info!("Discord user {} has an empty Stats.fm link", discord_id);
            return Ok(None);
        }

        Ok(Some(connection.user_id))
    }

    async fn get_user_profile(&self, user_id: &str) -> Result<Option<StatsfmUser>> {
        let url = format!("{}/users/{}", self.base_url, user_id);

        // The timestamp keeps intermediaries from serving a stale profile.
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();

        let resp = self
            .client
            .get(&url)
            .query(&[("time", now.to_string())])
            .send()
            .await
            .context("Failed to send get_user_profile request")?;

        if resp.status() != StatusCode::OK {
            info!(
                "Stats.fm profile {} is not accessible (status {})",
                user_id,
                resp.status()
            );
            return Ok(None);
        }

        let envelope: UserEnvelope = resp
            .json()
            .await
            .context("Failed to deserialize Stats.fm user")?;

        Ok(Some(envelope.item))
    }
}
