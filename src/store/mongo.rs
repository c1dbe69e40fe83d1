use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, DateTime, Document},
    options::ClientOptions,
    Client, Collection, Database,
};
use shared::models::{
    chat::{Chat, ChatSummary},
    message::Message,
    user::User,
    CollectionName,
};

use crate::telemetry::Logger;

use super::{
    check_message, check_summary, DocumentStore, IdScope, StoreError, StoreResult, UserFilter,
};

/// MongoDB-backed store. The client is built once and shared by all requests.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
    logger: Logger,
}

impl MongoStore {
    pub async fn connect(url: &str, database: &str, logger: Logger) -> anyhow::Result<Self> {
        let client_options = ClientOptions::parse(url).await?;
        let client = Client::with_options(client_options)?;

        let database = client.database(database);
        database.run_command(doc! { "ping": 1 }).await?;

        logger.info("Connected to MongoDB");

        Ok(MongoStore { database, logger })
    }

    fn users(&self) -> Collection<User> {
        self.database.collection(CollectionName::Users.as_str())
    }

    fn chats(&self) -> Collection<Chat> {
        self.database.collection(CollectionName::Chats.as_str())
    }

    fn raw(&self, collection: CollectionName) -> Collection<Document> {
        self.database.collection(collection.as_str())
    }

    fn logged<T>(&self, context: &str, result: StoreResult<T>) -> StoreResult<T> {
        if let Err(err) = &result {
            self.logger.error(format!("{context}: {err}"));
        }

        result
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        let result = self.users().insert_one(user).await.map_err(StoreError::from);
        self.logged("Error inserting document into collection Users", result)?;

        self.logger
            .info("Document inserted successfully into collection Users");

        Ok(())
    }

    async fn insert_chat(&self, chat: &Chat) -> StoreResult<()> {
        let result = self.chats().insert_one(chat).await.map_err(StoreError::from);
        self.logged("Error inserting document into collection Chats", result)?;

        self.logger
            .info("Document inserted successfully into collection Chats");

        Ok(())
    }

    async fn find_user(&self, filter: UserFilter) -> StoreResult<Option<User>> {
        let filter = match filter {
            UserFilter::Id(id) => doc! { "_id": id },
            UserFilter::UserName(name) => doc! { "userName": name },
        };

        let result = self.users().find_one(filter).await.map_err(StoreError::from);
        self.logged("Error finding user", result)
    }

    async fn find_chat(&self, chat_id: &str) -> StoreResult<Option<Chat>> {
        let result = self
            .chats()
            .find_one(doc! { "_id": chat_id })
            .await
            .map_err(StoreError::from);

        self.logged("Error finding chat", result)
    }

    async fn id_in_use(&self, scope: IdScope, id: &str) -> StoreResult<bool> {
        let (collection, filter) = match scope {
            IdScope::Document(collection) => (collection, doc! { "_id": id }),
            IdScope::EmbeddedMessage(collection) => (
                collection,
                doc! { "messages": { "$elemMatch": { "messageId": id } } },
            ),
        };

        let result = self
            .raw(collection)
            .find_one(filter)
            .projection(doc! { "_id": 1 })
            .await
            .map_err(StoreError::from);

        Ok(self.logged("Error checking id", result)?.is_some())
    }

    async fn find_documents_existence(
        &self,
        collection: CollectionName,
        ids: &[String],
    ) -> StoreResult<Vec<bool>> {
        let found = async {
            self.raw(collection)
                .find(doc! { "_id": { "$in": ids.to_vec() } })
                .projection(doc! { "_id": 1 })
                .await?
                .try_collect::<Vec<_>>()
                .await
        }
        .await
        .map_err(StoreError::from);

        let found = self.logged("Error finding documents", found)?;
        let found: Vec<&str> = found
            .iter()
            .filter_map(|document| document.get_str("_id").ok())
            .collect();

        Ok(ids.iter().map(|id| found.contains(&id.as_str())).collect())
    }

    async fn set_chat_updated_at(&self, chat_id: &str, updated_at: DateTime) -> StoreResult<()> {
        let result = self
            .chats()
            .update_one(
                doc! { "_id": chat_id },
                doc! { "$set": { "updatedAt": updated_at } },
            )
            .upsert(true)
            .await
            .map_err(StoreError::from);

        let result = self.logged("Error updating document", result)?;

        if result.upserted_id.is_some() {
            self.logger
                .info(format!("No chat with ID {chat_id} matched, a new document was inserted"));
        }

        Ok(())
    }

    async fn add_chat_summary_to_users(&self, summary: &ChatSummary) -> StoreResult<()> {
        check_summary(summary)?;

        let result = async {
            let summary_doc = to_bson(summary)?;

            let result = self
                .users()
                .update_many(
                    doc! { "_id": { "$in": summary.chat_users.clone() } },
                    doc! { "$push": { "chats": summary_doc } },
                )
                .await?;

            Ok::<_, StoreError>(result)
        }
        .await;

        let result = self.logged("Error adding chat to collection Users", result)?;

        if result.modified_count == 0 {
            self.logger.error("Error occurred while adding chat to users");
            return Err(StoreError::NothingModified {
                operation: "add chat to users",
            });
        }

        self.logger.info(format!(
            "Chat {} added to {} users",
            summary.id, result.modified_count
        ));

        Ok(())
    }

    async fn append_message_to_chat(&self, message: &Message) -> StoreResult<()> {
        check_message(message)?;

        let result = async {
            let message_doc = to_bson(message)?;

            let result = self
                .chats()
                .update_one(
                    doc! { "_id": &message.chat_id },
                    doc! { "$push": { "messages": message_doc } },
                )
                .await?;

            Ok::<_, StoreError>(result)
        }
        .await;

        let result = self.logged("Error adding message to collection Chats", result)?;

        if result.modified_count == 0 {
            self.logger.error("Error occurred while adding message to chat");
            return Err(StoreError::NothingModified {
                operation: "add message to chat",
            });
        }

        Ok(())
    }

    async fn find_chat_summaries(&self, chat_ids: &[String]) -> StoreResult<Vec<ChatSummary>> {
        let result = async {
            self.database
                .collection::<ChatSummary>(CollectionName::Chats.as_str())
                .find(doc! { "_id": { "$in": chat_ids.to_vec() } })
                .projection(doc! { "messages": 0 })
                .await?
                .try_collect::<Vec<_>>()
                .await
        }
        .await
        .map_err(StoreError::from);

        self.logged("Error fetching chat summaries", result)
    }
}
