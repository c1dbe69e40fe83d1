use bson::DateTime;
use serde::{Deserialize, Serialize};

use super::message::Message;

/// Authoritative chat document, owner of its messages.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    #[serde(rename = "_id")]
    pub id: String,
    pub chat_name: String,
    pub chat_users: Vec<String>,
    pub created_at: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Chat metadata without messages.
///
/// Copies of this are pushed into every member's user document when the chat
/// is created and are never refreshed afterwards, so `updated_at` on a copy
/// stays whatever it was at creation. The read path returns summaries built
/// from the chat documents themselves.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub chat_name: String,
    pub chat_users: Vec<String>,
    pub created_at: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl From<&Chat> for ChatSummary {
    fn from(value: &Chat) -> Self {
        ChatSummary {
            id: value.id.clone(),
            chat_name: value.chat_name.clone(),
            chat_users: value.chat_users.clone(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
