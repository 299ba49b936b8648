//! # Registration Creation Service
//!
//! Backend logic for `POST /api/registrations`.
//!
//! The posted `RegistrationRecord` is turned back into a draft and run through
//! the shared `RegistrationSchema`, so a client that skipped the form rules
//! gets the same messages the form would have shown, keyed `wards.<index>.<field>`
//! for ward rows. Accepted records are written under a fresh UUID.

use actix_web::{web, HttpResponse};
use common::model::api::RegistrationCreated;
use common::model::registration::{RegistrationDraft, RegistrationRecord};
use common::validation::RegistrationSchema;
use log::{info, warn};
use uuid::Uuid;

use super::store;
use crate::config::ServerConfig;
use crate::error::{ApiError, ApiResult};

/// Actix web handler for the `POST /api/registrations` endpoint.
pub async fn process(
    config: web::Data<ServerConfig>,
    payload: web::Json<RegistrationRecord>,
) -> ApiResult<HttpResponse> {
    let record = revalidate(&payload.into_inner())?;
    let id = Uuid::new_v4().to_string();

    let database_path = config.database_path.clone();
    let stored_id = id.clone();
    let staff_id = record.staff_id.clone();
    web::block(move || {
        let conn = store::open(&database_path)?;
        store::insert(&conn, &stored_id, &record)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    info!("registered staff {} as {}", staff_id, id);
    Ok(HttpResponse::Created().json(RegistrationCreated { id }))
}

/// Applies the form rules to a record received over the wire.
fn revalidate(record: &RegistrationRecord) -> ApiResult<RegistrationRecord> {
    let draft = RegistrationDraft::from(record);
    RegistrationSchema::new().parse(&draft).map_err(|errors| {
        warn!("rejected registration for {:?}: {} rule(s) failed", record.staff_id, errors.len());
        ApiError::Validation(errors.by_index(&draft.wards))
    })
}
