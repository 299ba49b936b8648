//! # Registration Service Module
//!
//! Receives the records produced by the registration form and stores them.
//! The backend never trusts the client: every posted record goes through the
//! same `common` rule table the form uses before it is written.
//!
//! ## Sub-modules:
//! - `create`: validates and stores a posted `RegistrationRecord`.
//! - `get`: returns a stored record.
//! - `store`: SQLite persistence shared by both handlers.

mod create;
mod get;
pub mod store;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all registration endpoints.
const API_PATH: &str = "/api/registrations";

/// Configures and returns the Actix `Scope` for the registration routes.
///
/// # Registered Routes:
///
/// *   **`POST /`**:
///     - **Handler**: `create::process`
///     - **Description**: Validates the JSON `RegistrationRecord`, stores it and answers
///       `201 Created` with `{"id": "<uuid>"}`. Rule violations answer `422` with the
///       field error map; an already registered `staff_id` answers `409`.
///
/// *   **`GET /{registration_id}`**:
///     - **Handler**: `get::process`
///     - **Description**: Returns the stored record as JSON, or `404`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("/{registration_id}", get().to(get::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::model::api::{ApiErrorBody, RegistrationCreated};
    use common::model::registration::RegistrationRecord;
    use serde_json::json;

    fn config(dir: &tempfile::TempDir) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            database_path: dir.path().join("registrations.sqlite"),
            upload_dir: dir.path().join("uploads"),
            open_browser: false,
            max_upload_bytes: 1024,
        }
    }

    fn payload() -> serde_json::Value {
        json!({
            "staff_id": "sp/1234",
            "first_name": "John",
            "last_name": "Doe",
            "phone_number": "08031234567",
            "staff_category": "academic",
            "staff_address": "123 staff road",
            "department": "law",
            "relationship_status": "married",
            "email": "john@uni.edu.ng",
            "wards": [{ "name": "Amy", "relationship": "Daughter" }]
        })
    }

    #[actix_web::test]
    async fn created_registration_can_be_fetched() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config(&dir)))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/registrations")
            .set_json(payload())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: RegistrationCreated = test::read_body_json(resp).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/registrations/{}", created.id))
            .to_request();
        let record: RegistrationRecord = test::call_and_read_body_json(&app, req).await;
        assert_eq!(record.staff_id, "sp/1234");
        assert_eq!(record.wards.len(), 1);
        assert_eq!(record.wards[0].name, "Amy");
    }

    #[actix_web::test]
    async fn rule_violations_are_reported_per_field() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config(&dir)))
                .service(configure_routes()),
        )
        .await;

        let mut body = payload();
        body["first_name"] = json!("Jo");
        body["wards"] = json!([{ "name": "", "relationship": "Son" }]);
        let req = test::TestRequest::post()
            .uri("/api/registrations")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let error: ApiErrorBody = test::read_body_json(resp).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.fields.contains_key("first_name"));
        assert!(error.fields.contains_key("wards.0.name"));
        assert!(!error.fields.contains_key("last_name"));
    }

    #[actix_web::test]
    async fn empty_ward_list_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config(&dir)))
                .service(configure_routes()),
        )
        .await;

        let mut body = payload();
        body["wards"] = json!([]);
        let req = test::TestRequest::post()
            .uri("/api/registrations")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let error: ApiErrorBody = test::read_body_json(resp).await;
        assert_eq!(
            error.fields.get("wards").map(String::as_str),
            Some("At least one ward is required.")
        );
        assert_eq!(error.fields.len(), 1);
    }

    #[actix_web::test]
    async fn staff_cannot_register_twice() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config(&dir)))
                .service(configure_routes()),
        )
        .await;

        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let req = test::TestRequest::post()
                .uri("/api/registrations")
                .set_json(payload())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected);
        }
    }

    #[actix_web::test]
    async fn unknown_registration_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config(&dir)))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/registrations/missing")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
