use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http, web, App, HttpServer};
use messenger_server::{
    api,
    config::{Settings, StoreBackend},
    service::Messenger,
    store::{DocumentStore, MemoryStore, MongoStore},
    telemetry::{self, Logger},
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    telemetry::init_tracing();

    let logger = Logger::new("Server");

    let store: Arc<dyn DocumentStore> = match settings.store_backend {
        StoreBackend::MongoDb => Arc::new(
            MongoStore::connect(
                &settings.mongo_url,
                &settings.mongo_database,
                Logger::new("MongoDB"),
            )
            .await
            .inspect_err(|err| logger.error(format!("Failed to connect to MongoDB: {err}")))?,
        ),
        StoreBackend::Memory => {
            logger.info("Using in-memory store, data is lost on exit");
            Arc::new(MemoryStore::new(Logger::new("MemoryStore")))
        }
    };

    let messenger = web::Data::new(Messenger::new(store));

    let addr = settings.bind_address();

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .send_wildcard()
            .allowed_methods(["POST"])
            .allowed_headers([http::header::ACCEPT, http::header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(messenger.clone())
            .configure(api::config)
    })
    .bind(&addr)
    .inspect_err(|err| logger.error(format!("Server failed to bind {addr}: {err}")))?
    .run();

    logger.info(format!("Server is running on {addr}"));

    server.await?;

    Ok(())
}
