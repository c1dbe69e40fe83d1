use shared::{
    api::{user::RegisterRequest, Reply},
    models::user::User,
};

use crate::{
    ids::EntityKind,
    store::{StoreResult, UserFilter},
    telemetry::Logger,
};

use super::{Deps, ServiceError};

#[derive(Clone)]
pub struct UserService {
    deps: Deps,
    logger: Logger,
}

impl UserService {
    pub fn new(deps: Deps, logger: Logger) -> Self {
        UserService { deps, logger }
    }

    /// Registers a new user name.
    ///
    /// The name check and the insert are separate round trips, so two
    /// concurrent registrations of the same name can both succeed.
    pub async fn register(&self, request: RegisterRequest) -> Result<Reply<String>, ServiceError> {
        self.try_register(request)
            .await
            .map_err(ServiceError::RegisterUser)
    }

    async fn try_register(&self, request: RegisterRequest) -> StoreResult<Reply<String>> {
        let store = self.deps.store.as_ref();

        let existing = store
            .find_user(UserFilter::UserName(request.user_name.clone()))
            .await?;

        if existing.is_some() {
            self.logger
                .info(format!("User name {} is already taken", request.user_name));
            return Ok(Reply::conflict("User with this username already exists"));
        }

        let user = User {
            id: self.deps.ids.generate(store, EntityKind::User).await?,
            user_name: request.user_name,
            created_at: self.deps.clock.now(),
            chats: Vec::new(),
        };

        store.insert_user(&user).await?;

        self.logger.info(format!("User {} registered", user.id));

        Ok(Reply::created("User created successfully", user.id))
    }
}
