use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    bal::{
        discord::role_manager::GuildMemberApi,
        pronouns::reconciler::{reconcile, Reconciliation},
    },
    dal::{
        dao::statsfm_dao::StatsfmApi,
        model::{
            interaction_request::{ComponentType, InteractionRequest},
            interaction_response::{InteractionResponse, LinkButton},
        },
    },
};

pub const PRONOUN_ROLES_BUTTON: &str = "get_pronoun_roles";

const LINK_ACCOUNT_URL: &str = "https://stats.fm/account/connections";
const SET_PRONOUNS_URL: &str = "https://stats.fm/account";

const NOT_LINKED: &str = "It looks like you haven't linked your Stats.fm account to Discord yet. Please do so by clicking the link below.";
const PRIVACY_RESTRICTED: &str = "Your privacy settings are prohibiting us from accessing your pronouns. Please update your privacy settings to allow us to access your pronouns and profile.";
const PRONOUNS_UNSET: &str =
    "It looks like you haven't set your pronouns yet. Please do so by clicking the link below.";
const UPDATE_FAILED: &str =
    "We couldn't update your roles right now. Please try again later or message ModMail.";
pub const UNHANDLED_COMPONENT: &str =
    "Something might have gone wrong here, message ModMail and we'll look into it!";

pub struct ComponentRouter {
    statsfm: Arc<dyn StatsfmApi>,
    members: Arc<dyn GuildMemberApi>,
}

impl ComponentRouter {
    pub fn new(statsfm: Arc<dyn StatsfmApi>, members: Arc<dyn GuildMemberApi>) -> Self {
        Self { statsfm, members }
    }

    pub async fn handle_component(&self, interaction: &InteractionRequest) -> InteractionResponse {
        if interaction.is_component(PRONOUN_ROLES_BUTTON, ComponentType::Button) {
            return self.handle_pronoun_roles(interaction).await;
        }

        info!("Unhandled component interaction: {:?}", interaction.data);
        InteractionResponse::ephemeral(UNHANDLED_COMPONENT)
    }

    async fn handle_pronoun_roles(&self, interaction: &InteractionRequest) -> InteractionResponse {
        let (Some(member), Some(guild_id)) =
            (interaction.member.as_ref(), interaction.guild_id.as_deref())
        else {
            warn!("Pronoun button pressed outside of a guild");
            return InteractionResponse::ephemeral(UNHANDLED_COMPONENT);
        };

        let user_id = member.user.id.as_str();

        let statsfm_user_id = self
            .statsfm
            .get_user_id_by_discord_id(user_id)
            .await
            .unwrap_or_else(|e| {
                warn!("Stats.fm lookup for Discord user {} failed: {:?}", user_id, e);
                None
            });

        let Some(statsfm_user_id) = statsfm_user_id else {
            return InteractionResponse::ephemeral_with_link(
                NOT_LINKED,
                LinkButton::new("Link Stats.fm Account to Discord", LINK_ACCOUNT_URL),
            );
        };

        let user = self
            .statsfm
            .get_user_profile(&statsfm_user_id)
            .await
            .unwrap_or_else(|e| {
                warn!("Stats.fm profile fetch for {} failed: {:?}", statsfm_user_id, e);
                None
            });

        match reconcile(&member.roles, user.as_ref()) {
            Reconciliation::PrivacyRestricted => InteractionResponse::ephemeral(PRIVACY_RESTRICTED),

            Reconciliation::PronounsUnset => InteractionResponse::ephemeral_with_link(
                PRONOUNS_UNSET,
                LinkButton::new("Set pronouns", SET_PRONOUNS_URL),
            ),

            Reconciliation::AlreadyAssigned(role) => {
                InteractionResponse::ephemeral(format!("You already have the **{}** role.", role))
            }

            Reconciliation::Assign { role, roles } => {
                match self
                    .members
                    .replace_member_roles(guild_id, user_id, &roles)
                    .await
                {
                    Ok(()) => InteractionResponse::ephemeral(format!(
                        "You have been given the **{}** role.",
                        role
                    )),
                    Err(e) => {
                        error!("Failed to give {} the {} role: {:?}", user_id, role, e);
                        InteractionResponse::ephemeral(UPDATE_FAILED)
                    }
                }
            }
        }
    }
}
