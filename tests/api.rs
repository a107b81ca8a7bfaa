use actix_web::{App, http::StatusCode, test, web};

use client_directory::dto::api::{ClientsResponse, ErrorResponse};
use client_directory::routes::configure;

mod common;

#[actix_web::test]
async fn test_lists_clients_page_by_page() {
    let test_db = common::TestDb::new("test_api_list.db");
    let repo = test_db.repo();
    common::insert_clients(&repo, &["Acme Corp", "Acme Industries", "Zenith LLC"]);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(repo))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/clients?page_size=2")
        .to_request();
    let first: ClientsResponse = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = first.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Zenith LLC", "Acme Industries"]);
    assert!(!first.is_done);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/clients?page_size=2&cursor={}",
            first.continuation_cursor
        ))
        .to_request();
    let second: ClientsResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].name, "Acme Corp");
    assert!(second.is_done);
}

#[actix_web::test]
async fn test_response_uses_camel_case_fields() {
    let test_db = common::TestDb::new("test_api_shape.db");
    let repo = test_db.repo();
    common::insert_clients(&repo, &["Zenith LLC"]);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(repo))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/clients?search=zen")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["isDone"], serde_json::Value::Bool(true));
    assert!(body["continuationCursor"].is_string());
    assert_eq!(body["items"][0]["name"], "Zenith LLC");
    assert!(body["items"][0]["createdAt"].is_string());
}

#[actix_web::test]
async fn test_rejects_invalid_requests() {
    let test_db = common::TestDb::new("test_api_invalid.db");
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_db.repo()))
            .configure(configure),
    )
    .await;

    for uri in [
        "/api/v1/clients?page_size=0",
        "/api/v1/clients?page_size=-4",
        "/api/v1/clients?cursor=%21%21",
        // Search cursor whose offset does not fit a SQL integer.
        "/api/v1/clients?search=Acme&cursor=eyJ2IjoxLCJtIjoic2VhcmNoIiwicSI6IkFjbWUiLCJvIjoxODQ0Njc0NDA3MzcwOTU1MTYxNX0",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(!body.error.is_empty());
    }
}

#[actix_web::test]
async fn test_health_check() {
    let test_db = common::TestDb::new("test_api_health.db");
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_db.repo()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
