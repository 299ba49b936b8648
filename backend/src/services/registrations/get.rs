//! Backend logic for `GET /api/registrations/{registration_id}`.

use actix_web::{web, HttpResponse};

use super::store;
use crate::config::ServerConfig;
use crate::error::{ApiError, ApiResult};

/// Actix web handler returning one stored registration as JSON.
pub async fn process(
    config: web::Data<ServerConfig>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let database_path = config.database_path.clone();

    let record = web::block(move || {
        let conn = store::open(&database_path)?;
        store::fetch(&conn, &id)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(record))
}
