use bson::DateTime;
use serde::{Deserialize, Serialize};

use super::chat::ChatSummary;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_name: String,
    pub created_at: DateTime,
    /// One summary per chat the user belongs to, in the order they were added.
    #[serde(default)]
    pub chats: Vec<ChatSummary>,
}
