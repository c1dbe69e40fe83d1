use shared::{
    api::{chat::CreateRequest, Reply},
    models::{
        chat::{Chat, ChatSummary},
        CollectionName,
    },
};

use crate::{ids::EntityKind, store::StoreResult, telemetry::Logger};

use super::{Deps, ServiceError};

#[derive(Clone)]
pub struct ChatService {
    deps: Deps,
    logger: Logger,
}

impl ChatService {
    pub fn new(deps: Deps, logger: Logger) -> Self {
        ChatService { deps, logger }
    }

    /// Creates a chat and copies its summary into every member's user document.
    ///
    /// The chat document is written first. If the copy to the users then
    /// fails, the chat stays in place without being listed for any member.
    pub async fn create(&self, request: CreateRequest) -> Result<Reply<String>, ServiceError> {
        self.try_create(request).await.map_err(ServiceError::CreateChat)
    }

    async fn try_create(&self, request: CreateRequest) -> StoreResult<Reply<String>> {
        let store = self.deps.store.as_ref();

        let existence = store
            .find_documents_existence(CollectionName::Users, &request.users)
            .await?;

        if let Some(missing) = existence.iter().position(|exists| !exists) {
            return Ok(Reply::not_found(format!(
                "User with ID - {} not found",
                request.users[missing]
            )));
        }

        let chat = Chat {
            id: self.deps.ids.generate(store, EntityKind::Chat).await?,
            chat_name: request.chat_name,
            chat_users: request.users,
            created_at: self.deps.clock.now(),
            updated_at: None,
            messages: Vec::new(),
        };

        store.insert_chat(&chat).await?;

        if let Err(err) = store.add_chat_summary_to_users(&ChatSummary::from(&chat)).await {
            self.logger.error(format!(
                "Chat {} was stored but could not be added to its users",
                chat.id
            ));
            return Err(err);
        }

        self.logger.info(format!(
            "Chat {} created for {} users",
            chat.id,
            chat.chat_users.len()
        ));

        Ok(Reply::created("Chat created successfully", chat.id))
    }
}
