use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use shared::models::CollectionName;

use crate::{
    store::{DocumentStore, IdScope, StoreResult},
    telemetry::Logger,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Chat,
    Message,
}

impl EntityKind {
    /// Messages must not reuse an id found in any chat, not only their own.
    pub fn scope(&self) -> IdScope {
        match self {
            EntityKind::User => IdScope::Document(CollectionName::Users),
            EntityKind::Chat => IdScope::Document(CollectionName::Chats),
            EntityKind::Message => IdScope::EmbeddedMessage(CollectionName::Chats),
        }
    }
}

pub trait CandidateSource: Send + Sync {
    fn candidate(&self) -> String;
}

/// 24 hex characters from a fresh ObjectId.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectIdSource;

impl CandidateSource for ObjectIdSource {
    fn candidate(&self) -> String {
        ObjectId::new().to_hex()
    }
}

/// Hands out identifiers that are not yet used within their entity's scope.
///
/// There is no cap on attempts: a candidate is drawn again after every
/// collision until the store reports it unused. Store errors end the loop.
#[derive(Clone)]
pub struct IdGenerator {
    source: Arc<dyn CandidateSource>,
    logger: Logger,
}

impl IdGenerator {
    pub fn new(source: Arc<dyn CandidateSource>, logger: Logger) -> Self {
        IdGenerator { source, logger }
    }

    pub fn object_ids(logger: Logger) -> Self {
        IdGenerator::new(Arc::new(ObjectIdSource), logger)
    }

    pub async fn generate(&self, store: &dyn DocumentStore, kind: EntityKind) -> StoreResult<String> {
        let scope = kind.scope();

        loop {
            let candidate = self.source.candidate();

            let unique = match store.id_in_use(scope, &candidate).await {
                Ok(in_use) => !in_use,
                Err(err) => {
                    self.logger.error(format!("Error generating ID: {err}"));
                    return Err(err);
                }
            };

            if unique {
                return Ok(candidate);
            }

            self.logger
                .info(format!("Generated {kind:?} id {candidate} is taken, retrying"));
        }
    }
}
