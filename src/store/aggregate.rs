use std::collections::HashMap;

use shared::models::{chat::ChatSummary, message::Message, user::User};

pub fn chat_ids(user: &User) -> Vec<String> {
    user.chats.iter().map(|chat| chat.id.clone()).collect()
}

/// Reorders `chats` to follow `ids`, dropping ids with no chat document.
pub fn in_id_order(ids: &[String], chats: Vec<ChatSummary>) -> Vec<ChatSummary> {
    let mut by_id: HashMap<String, ChatSummary> = chats
        .into_iter()
        .map(|chat| (chat.id.clone(), chat))
        .collect();

    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

/// Sorts by `updated_at` descending; chats without it go last. Stable.
pub fn by_activity(mut chats: Vec<ChatSummary>) -> Vec<ChatSummary> {
    // None < Some(_), so a reversed comparison leaves missing timestamps at the end
    chats.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    chats
}

/// Sorts by `created_at` descending. Stable.
pub fn newest_first(mut messages: Vec<Message>) -> Vec<Message> {
    messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    messages
}
