use serde::Deserialize;
use serde_repr::Deserialize_repr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr)]
#[repr(u8)]
pub enum InteractionType {
    Ping = 1,
    ApplicationCommand = 2,
    MessageComponent = 3,
    ApplicationCommandAutocomplete = 4,
    ModalSubmit = 5,

    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr)]
#[repr(u8)]
pub enum ComponentType {
    ActionRow = 1,
    Button = 2,
    StringSelect = 3,
    TextInput = 4,

    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
pub struct InteractionRequest {
    #[serde(rename = "type")]
    pub interaction_type: InteractionType,

    #[serde(default)]
    pub data: Option<ComponentData>,

    #[serde(default)]
    pub guild_id: Option<String>,

    #[serde(default)]
    pub member: Option<Member>,
}

/// Payload of a message component interaction. Other interaction kinds carry a
/// differently shaped `data`, which deserializes here with both fields absent.
#[derive(Debug, Default, Deserialize)]
pub struct ComponentData {
    #[serde(default)]
    pub custom_id: Option<String>,

    #[serde(default)]
    pub component_type: Option<ComponentType>,
}

#[derive(Debug, Deserialize)]
pub struct Member {
    pub user: User,

    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: String,
}

impl InteractionRequest {
    pub fn is_component(&self, custom_id: &str, component_type: ComponentType) -> bool {
        self.data.as_ref().is_some_and(|data| {
            data.custom_id.as_deref() == Some(custom_id)
                && data.component_type == Some(component_type)
        })
    }
}
