use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    test, web, App,
};
use messenger_server::{api, service::Messenger, store::MemoryStore};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(Messenger::new(Arc::new(MemoryStore::default()))))
                .configure(api::config),
        )
        .await
    };
}

async fn call<S, R, B>(app: &S, request: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request).await;
    let status = response.status();
    let body: Value = test::read_body_json(response).await;

    (status, body)
}

fn post(path: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post().uri(path).set_json(body)
}

#[actix_web::test]
async fn full_conversation_over_http() {
    let app = app!();

    let (status, body) = call(
        &app,
        post("/users/add", json!({ "userName": "alice" })).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");
    let alice = body["userId"].as_str().unwrap().to_string();

    let (_, body) = call(&app, post("/users/add", json!({ "userName": "bob" })).to_request()).await;
    let bob = body["userId"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        post("/chats/add", json!({ "chatName": "A/B", "users": [alice, bob] })).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let chat_id = body["chatId"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        post("/messages/add", json!({ "chatId": chat_id, "authorId": alice, "text": "hi" })).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Message created successfully");
    assert_eq!(body["messageId"].as_str().map(str::len), Some(24));

    let (status, body) = call(
        &app,
        post("/messages/get", json!({ "chatId": chat_id })).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["messages"][0]["text"], "hi");
    assert_eq!(body["messages"][0]["authorId"], alice.as_str());

    let (status, body) = call(
        &app,
        post("/chats/get", json!({ "userId": bob })).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Chats successfully retrieved");
    assert_eq!(body["chats"][0]["_id"], chat_id.as_str());
    assert_eq!(body["chats"][0]["chatName"], "A/B");
    assert!(body["chats"][0].get("messages").is_none());
}

#[actix_web::test]
async fn duplicate_user_is_a_conflict_without_id() {
    let app = app!();

    call(&app, post("/users/add", json!({ "userName": "alice" })).to_request()).await;
    let (status, body) = call(
        &app,
        post("/users/add", json!({ "userName": "alice" })).to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body,
        json!({ "message": "User with this username already exists" })
    );
}

#[actix_web::test]
async fn unknown_references_are_not_found() {
    let app = app!();

    let (status, body) = call(
        &app,
        post("/chats/add", json!({ "chatName": "x", "users": ["nope"] })).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User with ID - nope not found");

    let (status, body) = call(
        &app,
        post("/chats/get", json!({ "userId": "nope" })).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.get("chats").is_none());

    let (status, body) = call(
        &app,
        post("/messages/get", json!({ "chatId": "nope" })).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Chat with ID - nope not found");
}

#[actix_web::test]
async fn wrong_shapes_get_route_specific_messages() {
    let app = app!();

    let cases = [
        ("/users/add", json!({ "userName": 7 }), "Invalid user data format"),
        ("/chats/add", json!({ "chatName": "x", "users": [1] }), "Invalid chat data format"),
        ("/chats/get", json!({}), "Invalid data format for user ID"),
        ("/messages/add", json!({ "chatId": "c", "authorId": "a" }), "Invalid message data format"),
        ("/messages/get", json!({ "chatId": null }), "Invalid data format for chat ID"),
    ];

    for (path, body, message) in cases {
        let (status, body) = call(&app, post(path, body).to_request()).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{path}");
        assert_eq!(body, json!({ "message": message }), "{path}");
    }
}

#[actix_web::test]
async fn malformed_json_and_content_type_are_bad_requests() {
    let app = app!();

    let request = test::TestRequest::post()
        .uri("/users/add")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{ not json")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({ "error": "Invalid JSON format" }));

    let request = test::TestRequest::post()
        .uri("/users/add")
        .insert_header((header::CONTENT_TYPE, "text/plain"))
        .set_payload(r#"{"userName":"alice"}"#)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({ "error": "Invalid Content-Type" }));
}

#[actix_web::test]
async fn unknown_route_is_unprocessable() {
    let app = app!();

    let requests = [
        post("/nowhere", json!({})),
        post("/users/nope", json!({ "userName": "alice" })),
        test::TestRequest::get().uri("/users/add").set_json(json!({ "userName": "alice" })),
        test::TestRequest::get().uri("/chats/get").set_json(json!({ "userId": "u1" })),
    ];

    for request in requests {
        let response = test::call_service(&app, request.to_request()).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(test::read_body(response).await, "Route not found");
    }
}

#[actix_web::test]
async fn unmatched_requests_still_need_a_json_body() {
    let app = app!();

    let request = test::TestRequest::post().uri("/nowhere").to_request();
    let (status, body) = call(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid Content-Type" }));

    let request = test::TestRequest::get().uri("/users/add").to_request();
    let (status, body) = call(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid Content-Type" }));

    let request = test::TestRequest::post()
        .uri("/nowhere")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{ not json")
        .to_request();
    let (status, body) = call(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid JSON format" }));
}
