//! Core operations behind the HTTP routes.
//!
//! Conflict and not-found outcomes come back as a [`Reply`]; only storage
//! failures are errors. Nothing here is transactional: multi-document writes
//! run one after another and a failure leaves earlier writes in place.

use std::sync::Arc;

use mongodb::bson::DateTime;
use shared::{
    api::{chat, message, user, Reply},
    models::{chat::ChatSummary, message::Message},
};

use crate::{
    ids::IdGenerator,
    store::{DocumentStore, StoreError},
    telemetry::Logger,
};

pub mod chat_service;
pub mod message_service;
pub mod read_service;
pub mod user_service;

pub use chat_service::ChatService;
pub use message_service::MessageService;
pub use read_service::ReadService;
pub use user_service::UserService;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime {
        DateTime::now()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("failed to register user: {0}")]
    RegisterUser(#[source] StoreError),

    #[error("failed to create chat: {0}")]
    CreateChat(#[source] StoreError),

    #[error("failed to get chats: {0}")]
    GetChats(#[source] StoreError),

    #[error("failed to create message: {0}")]
    CreateMessage(#[source] StoreError),

    #[error("failed to get messages: {0}")]
    GetMessages(#[source] StoreError),
}

/// Store handle, id generator and clock shared by the services.
#[derive(Clone)]
pub struct Deps {
    pub store: Arc<dyn DocumentStore>,
    pub ids: IdGenerator,
    pub clock: Arc<dyn Clock>,
}

impl Deps {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Deps {
            store,
            ids: IdGenerator::object_ids(Logger::new("IdGenerator")),
            clock: Arc::new(SystemClock),
        }
    }
}

/// Entry point used by the transport. Holds no logic of its own.
#[derive(Clone)]
pub struct Messenger {
    users: UserService,
    chats: ChatService,
    messages: MessageService,
    reads: ReadService,
}

impl Messenger {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Messenger::with_deps(Deps::new(store))
    }

    pub fn with_deps(deps: Deps) -> Self {
        Messenger {
            users: UserService::new(deps.clone(), Logger::new("UserService")),
            chats: ChatService::new(deps.clone(), Logger::new("ChatService")),
            messages: MessageService::new(deps.clone(), Logger::new("MessageService")),
            reads: ReadService::new(deps, Logger::new("ReadService")),
        }
    }

    pub async fn register_user(
        &self,
        request: user::RegisterRequest,
    ) -> Result<Reply<String>, ServiceError> {
        self.users.register(request).await
    }

    pub async fn create_chat(
        &self,
        request: chat::CreateRequest,
    ) -> Result<Reply<String>, ServiceError> {
        self.chats.create(request).await
    }

    pub async fn get_chats(
        &self,
        request: chat::GetRequest,
    ) -> Result<Reply<Vec<ChatSummary>>, ServiceError> {
        self.reads.chats_for_user(&request.user_id).await
    }

    pub async fn create_message(
        &self,
        request: message::CreateRequest,
    ) -> Result<Reply<String>, ServiceError> {
        self.messages.create(request).await
    }

    pub async fn get_messages(
        &self,
        request: message::GetRequest,
    ) -> Result<Reply<Vec<Message>>, ServiceError> {
        self.reads.messages_for_chat(&request.chat_id).await
    }
}
