use actix_web::{web, HttpResponse, Responder};
use shared::api::message::{CreateRequest, CreateResponse, GetRequest, GetResponse};

use crate::{service::Messenger, telemetry::Logger};

use super::{json_config, route_failed, route_not_found, status_code};

async fn create(
    messenger: web::Data<Messenger>,
    logger: web::Data<Logger>,
    request: web::Json<CreateRequest>,
) -> actix_web::Result<impl Responder> {
    let reply = messenger
        .create_message(request.into_inner())
        .await
        .map_err(|err| route_failed(&logger, "/messages/add", err))?;

    Ok(HttpResponse::build(status_code(reply.status)).json(CreateResponse {
        message: reply.message,
        message_id: reply.payload,
    }))
}

async fn get_messages(
    messenger: web::Data<Messenger>,
    logger: web::Data<Logger>,
    request: web::Json<GetRequest>,
) -> actix_web::Result<impl Responder> {
    let reply = messenger
        .get_messages(request.into_inner())
        .await
        .map_err(|err| route_failed(&logger, "/messages/get", err))?;

    Ok(HttpResponse::build(status_code(reply.status)).json(GetResponse {
        message: reply.message,
        messages: reply.payload,
    }))
}

pub fn config_wrapper(logger: Logger) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.service(
            web::resource("/add")
                .app_data(json_config("Invalid message data format", logger.clone()))
                .app_data(web::Data::new(logger.clone()))
                .route(web::post().to(create))
                .default_service(web::to(route_not_found)),
        )
        .service(
            web::resource("/get")
                .app_data(json_config("Invalid data format for chat ID", logger.clone()))
                .app_data(web::Data::new(logger))
                .route(web::post().to(get_messages))
                .default_service(web::to(route_not_found)),
        );
    }
}
