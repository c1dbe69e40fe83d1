use async_trait::async_trait;
use mongodb::bson::DateTime;
use shared::models::{
    chat::{Chat, ChatSummary},
    message::Message,
    user::User,
    CollectionName,
};
use tokio::sync::RwLock;

use crate::telemetry::Logger;

use super::{
    check_message, check_summary, DocumentStore, IdScope, StoreError, StoreResult, UserFilter,
};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    chats: Vec<Chat>,
}

impl Collections {
    fn contains(&self, collection: CollectionName, id: &str) -> bool {
        match collection {
            CollectionName::Users => self.users.iter().any(|user| user.id == id),
            CollectionName::Chats => self.chats.iter().any(|chat| chat.id == id),
        }
    }
}

/// In-process store keeping documents in insertion order.
pub struct MemoryStore {
    collections: RwLock<Collections>,
    logger: Logger,
}

impl MemoryStore {
    pub fn new(logger: Logger) -> Self {
        MemoryStore {
            collections: RwLock::new(Collections::default()),
            logger,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::new(Logger::new("MemoryStore"))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        let mut collections = self.collections.write().await;

        if collections.contains(CollectionName::Users, &user.id) {
            return Err(StoreError::DuplicateKey {
                collection: CollectionName::Users.as_str(),
                id: user.id.clone(),
            });
        }

        collections.users.push(user.clone());
        self.logger.info("Document inserted into collection Users");

        Ok(())
    }

    async fn insert_chat(&self, chat: &Chat) -> StoreResult<()> {
        let mut collections = self.collections.write().await;

        if collections.contains(CollectionName::Chats, &chat.id) {
            return Err(StoreError::DuplicateKey {
                collection: CollectionName::Chats.as_str(),
                id: chat.id.clone(),
            });
        }

        collections.chats.push(chat.clone());
        self.logger.info("Document inserted into collection Chats");

        Ok(())
    }

    async fn find_user(&self, filter: UserFilter) -> StoreResult<Option<User>> {
        let collections = self.collections.read().await;

        let user = collections.users.iter().find(|user| match &filter {
            UserFilter::Id(id) => &user.id == id,
            UserFilter::UserName(name) => &user.user_name == name,
        });

        Ok(user.cloned())
    }

    async fn find_chat(&self, chat_id: &str) -> StoreResult<Option<Chat>> {
        let collections = self.collections.read().await;

        Ok(collections.chats.iter().find(|chat| chat.id == chat_id).cloned())
    }

    async fn id_in_use(&self, scope: IdScope, id: &str) -> StoreResult<bool> {
        let collections = self.collections.read().await;

        let in_use = match scope {
            IdScope::Document(collection) => collections.contains(collection, id),
            IdScope::EmbeddedMessage(CollectionName::Chats) => collections
                .chats
                .iter()
                .any(|chat| chat.messages.iter().any(|message| message.message_id == id)),
            // user documents embed no messages
            IdScope::EmbeddedMessage(CollectionName::Users) => false,
        };

        Ok(in_use)
    }

    async fn find_documents_existence(
        &self,
        collection: CollectionName,
        ids: &[String],
    ) -> StoreResult<Vec<bool>> {
        let collections = self.collections.read().await;

        Ok(ids
            .iter()
            .map(|id| collections.contains(collection, id))
            .collect())
    }

    async fn set_chat_updated_at(&self, chat_id: &str, updated_at: DateTime) -> StoreResult<()> {
        let mut collections = self.collections.write().await;

        // no upsert: a chat document cannot be built from an id and a timestamp
        match collections.chats.iter_mut().find(|chat| chat.id == chat_id) {
            Some(chat) => chat.updated_at = Some(updated_at),
            None => self
                .logger
                .info(format!("No chat with ID {chat_id} to update, nothing written")),
        }

        Ok(())
    }

    async fn add_chat_summary_to_users(&self, summary: &ChatSummary) -> StoreResult<()> {
        check_summary(summary)?;

        let mut collections = self.collections.write().await;

        let mut modified = 0;
        for user in collections
            .users
            .iter_mut()
            .filter(|user| summary.chat_users.contains(&user.id))
        {
            user.chats.push(summary.clone());
            modified += 1;
        }

        if modified == 0 {
            self.logger.error("Error occurred while adding chat to users");
            return Err(StoreError::NothingModified {
                operation: "add chat to users",
            });
        }

        self.logger
            .info(format!("Chat {} added to {modified} users", summary.id));

        Ok(())
    }

    async fn append_message_to_chat(&self, message: &Message) -> StoreResult<()> {
        check_message(message)?;

        let mut collections = self.collections.write().await;

        let Some(chat) = collections
            .chats
            .iter_mut()
            .find(|chat| chat.id == message.chat_id)
        else {
            self.logger.error("Error occurred while adding message to chat");
            return Err(StoreError::NothingModified {
                operation: "add message to chat",
            });
        };

        chat.messages.push(message.clone());

        Ok(())
    }

    async fn find_chat_summaries(&self, chat_ids: &[String]) -> StoreResult<Vec<ChatSummary>> {
        let collections = self.collections.read().await;

        Ok(collections
            .chats
            .iter()
            .filter(|chat| chat_ids.contains(&chat.id))
            .map(ChatSummary::from)
            .collect())
    }
}
