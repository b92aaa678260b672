use serde::Deserialize;

/// Body of `GET /private/get-user-by-discord-id`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordConnection {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub verified: bool,

    pub user_id: String,
}

/// Envelope of `GET /users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
    pub item: StatsfmUser,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct StatsfmUser {
    /// Absent when the user's privacy settings hide their profile.
    #[serde(default)]
    pub profile: Option<StatsfmProfile>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct StatsfmProfile {
    #[serde(default)]
    pub pronouns: Option<String>,
}

#[cfg(test)]
impl StatsfmUser {
    pub fn with_pronouns(pronouns: Option<&str>) -> Self {
        Self {
            profile: Some(StatsfmProfile {
                pronouns: pronouns.map(str::to_owned),
            }),
        }
    }
}
