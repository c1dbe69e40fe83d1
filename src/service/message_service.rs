use shared::{
    api::{message::CreateRequest, Reply},
    models::message::Message,
};

use crate::{ids::EntityKind, store::StoreResult, telemetry::Logger};

use super::{Deps, ServiceError};

#[derive(Clone)]
pub struct MessageService {
    deps: Deps,
    logger: Logger,
}

impl MessageService {
    pub fn new(deps: Deps, logger: Logger) -> Self {
        MessageService { deps, logger }
    }

    /// Appends a message to its chat and moves the chat's `updatedAt` to it.
    ///
    /// The summaries held by the members' user documents are left as they were.
    pub async fn create(&self, request: CreateRequest) -> Result<Reply<String>, ServiceError> {
        self.try_create(request)
            .await
            .map_err(ServiceError::CreateMessage)
    }

    async fn try_create(&self, request: CreateRequest) -> StoreResult<Reply<String>> {
        let store = self.deps.store.as_ref();

        let Some(chat) = store.find_chat(&request.chat_id).await? else {
            return Ok(Reply::not_found(format!(
                "Chat with ID - {} not found",
                request.chat_id
            )));
        };

        if !chat.chat_users.contains(&request.author_id) {
            return Ok(Reply::not_found(format!(
                "Author with ID - {} in chat with ID - {} not found",
                request.author_id, request.chat_id
            )));
        }

        let message = Message {
            message_id: self.deps.ids.generate(store, EntityKind::Message).await?,
            chat_id: request.chat_id,
            author_id: request.author_id,
            text: request.text,
            created_at: self.deps.clock.now(),
        };

        store.append_message_to_chat(&message).await?;
        store
            .set_chat_updated_at(&message.chat_id, message.created_at)
            .await?;

        self.logger.info(format!(
            "Message {} added to chat {}",
            message.message_id, message.chat_id
        ));

        Ok(Reply::created("Message created successfully", message.message_id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mongodb::bson::DateTime;
    use pretty_assertions::assert_eq;
    use shared::{
        api::Status,
        models::{chat::Chat, user::User},
    };

    use super::*;
    use crate::{
        service::testing::deps,
        store::{DocumentStore, MemoryStore, MockDocumentStore, StoreError, UserFilter},
    };

    async fn store_with_chat() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::default());

        store
            .insert_user(&User {
                id: "u1".to_string(),
                user_name: "alice".to_string(),
                created_at: DateTime::from_millis(0),
                chats: Vec::new(),
            })
            .await
            .unwrap();

        let chat = Chat {
            id: "c1".to_string(),
            chat_name: "general".to_string(),
            chat_users: vec!["u1".to_string()],
            created_at: DateTime::from_millis(0),
            updated_at: None,
            messages: Vec::new(),
        };
        store.insert_chat(&chat).await.unwrap();
        store
            .add_chat_summary_to_users(&(&chat).into())
            .await
            .unwrap();

        store
    }

    fn request(chat_id: &str, author_id: &str, text: &str) -> CreateRequest {
        CreateRequest {
            chat_id: chat_id.to_string(),
            author_id: author_id.to_string(),
            text: text.to_string(),
        }
    }

    #[actix_web::test]
    async fn unknown_chat_is_not_found() {
        let store = store_with_chat().await;
        let service = MessageService::new(deps(store, &["m1"]), Logger::new("test"));

        let reply = service.create(request("c9", "u1", "hi")).await.unwrap();

        assert_eq!(reply.status, Status::NotFound);
        assert_eq!(reply.message, "Chat with ID - c9 not found");
    }

    #[actix_web::test]
    async fn non_member_author_is_not_found_and_nothing_is_written() {
        let store = store_with_chat().await;
        let service = MessageService::new(deps(store.clone(), &["m1"]), Logger::new("test"));

        let reply = service.create(request("c1", "u2", "hi")).await.unwrap();

        assert_eq!(reply.status, Status::NotFound);
        assert_eq!(reply.message, "Author with ID - u2 in chat with ID - c1 not found");

        let chat = store.find_chat("c1").await.unwrap().unwrap();
        assert!(chat.messages.is_empty());
        assert_eq!(chat.updated_at, None);
    }

    #[actix_web::test]
    async fn appends_message_and_bumps_chat_only() {
        let store = store_with_chat().await;
        let service = MessageService::new(deps(store.clone(), &["m1"]), Logger::new("test"));

        let reply = service.create(request("c1", "u1", "hi")).await.unwrap();
        assert_eq!(reply.status, Status::Created);
        assert_eq!(reply.payload.as_deref(), Some("m1"));

        let chat = store.find_chat("c1").await.unwrap().unwrap();
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].text, "hi");
        assert_eq!(chat.messages[0].author_id, "u1");
        assert_eq!(chat.updated_at, Some(chat.messages[0].created_at));

        let alice = store.find_user(UserFilter::Id("u1".into())).await.unwrap().unwrap();
        assert_eq!(alice.chats[0].updated_at, None);
    }

    #[actix_web::test]
    async fn failed_append_skips_timestamp_update() {
        let mut store = MockDocumentStore::new();
        store.expect_find_chat().returning(|id| {
            Ok(Some(Chat {
                id: id.to_string(),
                chat_name: "general".to_string(),
                chat_users: vec!["u1".to_string()],
                created_at: DateTime::from_millis(0),
                updated_at: None,
                messages: Vec::new(),
            }))
        });
        store.expect_id_in_use().returning(|_, _| Ok(false));
        store.expect_append_message_to_chat().times(1).returning(|_| {
            Err(StoreError::NothingModified {
                operation: "add message to chat",
            })
        });
        store.expect_set_chat_updated_at().never();

        let service = MessageService::new(deps(Arc::new(store), &["m1"]), Logger::new("test"));
        let err = service.create(request("c1", "u1", "hi")).await.unwrap_err();

        assert!(matches!(
            err,
            ServiceError::CreateMessage(StoreError::NothingModified { .. })
        ));
    }
}
