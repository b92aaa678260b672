use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{error, info, warn};

/// Write access to guild member roles.
#[async_trait]
pub trait GuildMemberApi: Send + Sync {
    /// Replace the member's entire role list with `roles`.
    async fn replace_member_roles(
        &self,
        guild_id: &str,
        user_id: &str,
        roles: &[String],
    ) -> Result<()>;
}

#[derive(Debug, Serialize)]
struct ModifyGuildMember<'a> {
    roles: &'a [String],
}

pub struct RoleManager {
    client: Client,
    bot_token: String,
    api_base: String,
}

impl RoleManager {
    pub fn new(client: Client, bot_token: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client,
            bot_token: bot_token.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl GuildMemberApi for RoleManager {
    async fn replace_member_roles(
        &self,
        guild_id: &str,
        user_id: &str,
        roles: &[String],
    ) -> Result<()> {
        let url = format!("{}/guilds/{}/members/{}", self.api_base, guild_id, user_id);

        let resp = self
            .client
            .patch(&url)
            .header("Authorization", format!("Bot {}", self.bot_token))
            .json(&ModifyGuildMember { roles })
            .send()
            .await
            .context("Failed to send replace_member_roles request")?;

        match resp.status() {
            status if status.is_success() => {
                info!("Updated roles of user {} in guild {}", user_id, guild_id);
                Ok(())
            }

            StatusCode::FORBIDDEN => {
                error!(
                    "Permission error while updating roles of user {} in guild {}",
                    user_id, guild_id
                );
                bail!("Bot lacks permission to modify roles (check role hierarchy)")
            }

            StatusCode::NOT_FOUND => {
                error!("Guild {} or user {} not found", guild_id, user_id);
                bail!("Guild or member not found")
            }

            StatusCode::TOO_MANY_REQUESTS => {
                let body = resp.text().await.unwrap_or_default();
                warn!(
                    "Rate limited while updating roles of user {}: {}",
                    user_id, body
                );
                bail!("Rate limited by Discord API")
            }

            other => {
                let body = resp.text().await.unwrap_or_default();
                error!(
                    "Failed to update roles of user {}: status {}, body: {}",
                    user_id, other, body
                );
                bail!("Discord API error: {}", other);
            }
        }
    }
}
