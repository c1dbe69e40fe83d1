use bson::DateTime;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message_id: String,
    pub chat_id: String,
    pub author_id: String,
    pub text: String,
    pub created_at: DateTime,
}
