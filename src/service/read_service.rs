use shared::{
    api::Reply,
    models::{chat::ChatSummary, message::Message, CollectionName},
};

use crate::{store::StoreResult, telemetry::Logger};

use super::{Deps, ServiceError};

#[derive(Clone)]
pub struct ReadService {
    deps: Deps,
    logger: Logger,
}

impl ReadService {
    pub fn new(deps: Deps, logger: Logger) -> Self {
        ReadService { deps, logger }
    }

    /// The user's chats, most recently active first.
    pub async fn chats_for_user(
        &self,
        user_id: &str,
    ) -> Result<Reply<Vec<ChatSummary>>, ServiceError> {
        self.try_chats_for_user(user_id)
            .await
            .map_err(ServiceError::GetChats)
    }

    /// The chat's messages, newest first.
    pub async fn messages_for_chat(
        &self,
        chat_id: &str,
    ) -> Result<Reply<Vec<Message>>, ServiceError> {
        self.try_messages_for_chat(chat_id)
            .await
            .map_err(ServiceError::GetMessages)
    }

    async fn exists(&self, collection: CollectionName, id: &str) -> StoreResult<bool> {
        let existence = self
            .deps
            .store
            .find_documents_existence(collection, &[id.to_string()])
            .await?;

        Ok(existence.first().copied().unwrap_or(false))
    }

    async fn try_chats_for_user(&self, user_id: &str) -> StoreResult<Reply<Vec<ChatSummary>>> {
        if !self.exists(CollectionName::Users, user_id).await? {
            return Ok(Reply::not_found(format!("User with ID - {user_id} not found")));
        }

        let chats = self.deps.store.sorted_chats_for_user(user_id).await?;

        self.logger
            .info(format!("Fetched {} chats for user {user_id}", chats.len()));

        Ok(Reply::ok("Chats successfully retrieved", chats))
    }

    async fn try_messages_for_chat(&self, chat_id: &str) -> StoreResult<Reply<Vec<Message>>> {
        if !self.exists(CollectionName::Chats, chat_id).await? {
            return Ok(Reply::not_found(format!("Chat with ID - {chat_id} not found")));
        }

        let messages = self.deps.store.messages_for_chat(chat_id).await?;

        self.logger.info(format!(
            "Fetched {} messages for chat {chat_id}",
            messages.len()
        ));

        Ok(Reply::ok("Messages successfully retrieved", messages))
    }
}
