//! Document store capability used by every service.
//!
//! Backends map their native documents onto the typed records in
//! `shared::models` at this boundary, and every backend failure is reported
//! as a [`StoreError`].

use async_trait::async_trait;
use mongodb::bson::DateTime;
use shared::models::{
    chat::{Chat, ChatSummary},
    message::Message,
    user::User,
    CollectionName,
};

pub mod aggregate;
pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("failed to encode document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    #[error("duplicate _id {id} in collection {collection}")]
    DuplicateKey {
        collection: &'static str,
        id: String,
    },

    #[error("{operation} modified no documents")]
    NothingModified { operation: &'static str },

    #[error("invalid document: {0}")]
    InvalidDocument(&'static str),
}

/// Where an identifier must be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdScope {
    /// The `_id` of a document in the collection.
    Document(CollectionName),
    /// The `messageId` of any message embedded in any document of the collection.
    EmbeddedMessage(CollectionName),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    Id(String),
    UserName(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_user(&self, user: &User) -> StoreResult<()>;

    async fn insert_chat(&self, chat: &Chat) -> StoreResult<()>;

    async fn find_user(&self, filter: UserFilter) -> StoreResult<Option<User>>;

    async fn find_chat(&self, chat_id: &str) -> StoreResult<Option<Chat>>;

    async fn id_in_use(&self, scope: IdScope, id: &str) -> StoreResult<bool>;

    /// One flag per requested id, in request order.
    async fn find_documents_existence(
        &self,
        collection: CollectionName,
        ids: &[String],
    ) -> StoreResult<Vec<bool>>;

    /// Sets `updatedAt` on the chat, upserting when the backend supports it.
    async fn set_chat_updated_at(&self, chat_id: &str, updated_at: DateTime) -> StoreResult<()>;

    /// Pushes the summary onto `chats` of every user listed in `summary.chat_users`.
    ///
    /// Fails with [`StoreError::NothingModified`] when no user document changed.
    async fn add_chat_summary_to_users(&self, summary: &ChatSummary) -> StoreResult<()>;

    /// Pushes the message onto `messages` of the chat named by `message.chat_id`.
    ///
    /// Fails with [`StoreError::NothingModified`] when the chat did not change.
    async fn append_message_to_chat(&self, message: &Message) -> StoreResult<()>;

    /// Chat metadata for the given ids, without loading any messages.
    /// Result order is backend-defined.
    async fn find_chat_summaries(&self, chat_ids: &[String]) -> StoreResult<Vec<ChatSummary>>;

    /// The user's chats, most recently active first.
    ///
    /// Chat ids come from the user's summaries, but ordering and metadata come
    /// from the chat documents since the summaries are never refreshed.
    async fn sorted_chats_for_user(&self, user_id: &str) -> StoreResult<Vec<ChatSummary>> {
        let Some(user) = self.find_user(UserFilter::Id(user_id.to_string())).await? else {
            return Ok(Vec::new());
        };

        let chat_ids = aggregate::chat_ids(&user);
        let chats = self.find_chat_summaries(&chat_ids).await?;

        Ok(aggregate::by_activity(aggregate::in_id_order(&chat_ids, chats)))
    }

    /// The chat's messages, newest first.
    async fn messages_for_chat(&self, chat_id: &str) -> StoreResult<Vec<Message>> {
        match self.find_chat(chat_id).await? {
            Some(chat) => Ok(aggregate::newest_first(chat.messages)),
            None => Ok(Vec::new()),
        }
    }
}

pub(crate) fn check_summary(summary: &ChatSummary) -> StoreResult<()> {
    if summary.chat_name.is_empty() {
        return Err(StoreError::InvalidDocument("chat summary has no chat name"));
    }

    if summary.chat_users.is_empty() {
        return Err(StoreError::InvalidDocument("chat summary has no chat users"));
    }

    Ok(())
}

pub(crate) fn check_message(message: &Message) -> StoreResult<()> {
    if message.chat_id.is_empty() || message.author_id.is_empty() || message.text.is_empty() {
        return Err(StoreError::InvalidDocument(
            "message needs a chat id, an author id and text",
        ));
    }

    Ok(())
}
