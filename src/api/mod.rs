use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    web, HttpMessage, HttpRequest, HttpResponse, ResponseError,
};
use serde::Serialize;
use serde_json::error::Category;
use shared::api::Status;

use crate::{service::ServiceError, telemetry::Logger};

pub mod chat;
pub mod message;
pub mod user;

const ROUTE_NOT_FOUND: &str = "Route not found";
const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
const INVALID_JSON_FORMAT: &str = "Invalid JSON format";
const INVALID_CONTENT_TYPE: &str = "Invalid Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Serialize)]
struct MessageBody {
    message: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::InternalServerError().json(ErrorBody {
            error: INTERNAL_SERVER_ERROR,
        })
    }
}

pub(crate) fn status_code(status: Status) -> StatusCode {
    match status {
        Status::Ok => StatusCode::OK,
        Status::Created => StatusCode::CREATED,
        Status::Conflict => StatusCode::CONFLICT,
        Status::NotFound => StatusCode::NOT_FOUND,
    }
}

/// Body extraction for one route.
///
/// Bodies that parse but have the wrong shape get a 422 with the route's
/// message; anything that is not JSON at all gets a 400.
pub(crate) fn json_config(invalid_shape: &'static str, logger: Logger) -> web::JsonConfig {
    web::JsonConfig::default().error_handler(move |err, _req| {
        let response = match &err {
            JsonPayloadError::ContentType => {
                logger.error(INVALID_CONTENT_TYPE);
                HttpResponse::BadRequest().json(ErrorBody {
                    error: INVALID_CONTENT_TYPE,
                })
            }
            JsonPayloadError::Deserialize(json_err) if json_err.classify() == Category::Data => {
                HttpResponse::UnprocessableEntity().json(MessageBody {
                    message: invalid_shape,
                })
            }
            _ => {
                logger.error(INVALID_JSON_FORMAT);
                HttpResponse::BadRequest().json(ErrorBody {
                    error: INVALID_JSON_FORMAT,
                })
            }
        };

        InternalError::from_response(err, response).into()
    })
}

/// Logs a failed operation under the route's component and hands it to actix.
pub(crate) fn route_failed(logger: &Logger, route: &str, err: ServiceError) -> actix_web::Error {
    logger.error(format!("Error occurred while processing {route}: {err}"));
    err.into()
}

/// Fallback for unmatched paths and for unmatched methods on known paths.
///
/// The body is checked the same way real routes check it, so a request that
/// is not JSON is rejected for that before the missing route is reported.
pub(crate) async fn route_not_found(
    req: HttpRequest,
    body: web::Bytes,
    logger: web::Data<Logger>,
) -> HttpResponse {
    if req.content_type() != JSON_CONTENT_TYPE {
        logger.error(INVALID_CONTENT_TYPE);
        return HttpResponse::BadRequest().json(ErrorBody {
            error: INVALID_CONTENT_TYPE,
        });
    }

    if serde_json::from_slice::<serde_json::Value>(&body).is_err() {
        logger.error(INVALID_JSON_FORMAT);
        return HttpResponse::BadRequest().json(ErrorBody {
            error: INVALID_JSON_FORMAT,
        });
    }

    logger.error(ROUTE_NOT_FOUND);

    HttpResponse::UnprocessableEntity().body(ROUTE_NOT_FOUND)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::Data::new(Logger::new("Server")))
        .service(web::scope("/users").configure(user::config_wrapper(Logger::new("usersRoutes"))))
        .service(web::scope("/chats").configure(chat::config_wrapper(Logger::new("chatsRoutes"))))
        .service(
            web::scope("/messages")
                .configure(message::config_wrapper(Logger::new("messagesRoutes"))),
        )
        .default_service(web::to(route_not_found));
}
