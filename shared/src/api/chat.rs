use serde::{Deserialize, Serialize};

use crate::models::chat::ChatSummary;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub chat_name: String,
    pub users: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GetRequest {
    pub user_id: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct GetResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chats: Option<Vec<ChatSummary>>,
}
