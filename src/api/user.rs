use actix_web::{web, HttpResponse, Responder};
use shared::api::user::{RegisterRequest, RegisterResponse};

use crate::{service::Messenger, telemetry::Logger};

use super::{json_config, route_failed, route_not_found, status_code};

async fn register(
    messenger: web::Data<Messenger>,
    logger: web::Data<Logger>,
    request: web::Json<RegisterRequest>,
) -> actix_web::Result<impl Responder> {
    let reply = messenger
        .register_user(request.into_inner())
        .await
        .map_err(|err| route_failed(&logger, "/users/add", err))?;

    Ok(HttpResponse::build(status_code(reply.status)).json(RegisterResponse {
        message: reply.message,
        user_id: reply.payload,
    }))
}

pub fn config_wrapper(logger: Logger) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.service(
            web::resource("/add")
                .app_data(json_config("Invalid user data format", logger.clone()))
                .app_data(web::Data::new(logger))
                .route(web::post().to(register))
                .default_service(web::to(route_not_found)),
        );
    }
}
