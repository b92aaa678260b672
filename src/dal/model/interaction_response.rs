use serde::Serialize;
use serde_repr::Serialize_repr;

bitflags::bitflags! {
    pub struct MessageFlags: u64 {
        const EPHEMERAL = 1 << 6;
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize_repr)]
#[repr(u8)]
pub enum InteractionCallbackType {
    Pong = 1,
    ChannelMessageWithSource = 4,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize_repr)]
#[repr(u8)]
pub enum MessageComponentType {
    ActionRow = 1,
    Button = 2,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize_repr)]
#[repr(u8)]
pub enum ButtonStyle {
    Link = 5,
}

#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: InteractionCallbackType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionCallbackData>,
}

#[derive(Debug, Serialize)]
pub struct InteractionCallbackData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ActionRow>>,
}

#[derive(Debug, Serialize)]
pub struct ActionRow {
    #[serde(rename = "type")]
    pub kind: MessageComponentType,

    pub components: Vec<LinkButton>,
}

#[derive(Debug, Serialize)]
pub struct LinkButton {
    #[serde(rename = "type")]
    pub kind: MessageComponentType,

    pub style: ButtonStyle,
    pub label: String,
    pub url: String,
}

impl LinkButton {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: MessageComponentType::Button,
            style: ButtonStyle::Link,
            label: label.into(),
            url: url.into(),
        }
    }
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: InteractionCallbackType::Pong,
            data: None,
        }
    }

    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            kind: InteractionCallbackType::ChannelMessageWithSource,
            data: Some(InteractionCallbackData {
                content: Some(content.into()),
                flags: Some(MessageFlags::EPHEMERAL.bits()),
                components: None,
            }),
        }
    }

    /// Ephemeral message with a single action row holding one link button.
    pub fn ephemeral_with_link(content: impl Into<String>, button: LinkButton) -> Self {
        Self {
            kind: InteractionCallbackType::ChannelMessageWithSource,
            data: Some(InteractionCallbackData {
                content: Some(content.into()),
                flags: Some(MessageFlags::EPHEMERAL.bits()),
                components: Some(vec![ActionRow {
                    kind: MessageComponentType::ActionRow,
                    components: vec![button],
                }]),
            }),
        }
    }

    #[cfg(test)]
    pub fn content(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.content.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pong_has_no_data() {
        let value = serde_json::to_value(InteractionResponse::pong()).unwrap();
        assert_eq!(value, json!({ "type": 1 }));
    }

    #[test]
    fn link_reply_shape() {
        let resp = InteractionResponse::ephemeral_with_link(
            "hi",
            LinkButton::new("Set pronouns", "https://stats.fm/account"),
        );

        let value = serde_json::to_value(resp).unwrap();
        assert_eq!(
            value,
            json!({
                "type": 4,
                "data": {
                    "content": "hi",
                    "flags": 64,
                    "components": [{
                        "type": 1,
                        "components": [{
                            "type": 2,
                            "style": 5,
                            "label": "Set pronouns",
                            "url": "https://stats.fm/account"
                        }]
                    }]
                }
            })
        );
    }
}
