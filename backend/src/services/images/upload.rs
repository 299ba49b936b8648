use std::path::Path;

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use common::model::api::ImageUploadResponse;
use futures_util::StreamExt;
use log::info;
use md5::Context;

use super::UPLOADS_PATH;
use crate::config::ServerConfig;
use crate::error::{ApiError, ApiResult};

/// Actix web handler for `POST /api/images`.
pub async fn process(
    config: web::Data<ServerConfig>,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let image_url = upload_image(payload, &config.upload_dir, config.max_upload_bytes).await?;
    Ok(HttpResponse::Ok().json(ImageUploadResponse { image_url }))
}

/// Reads the `file` part of `payload`, checks it is an image no larger than
/// `limit` bytes and writes it to `upload_dir`. Returns the public URL.
pub async fn upload_image(
    mut payload: Multipart,
    upload_dir: &Path,
    limit: usize,
) -> ApiResult<String> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ApiError::BadRequest(e.to_string()))?;
        let (name, filename) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().map(str::to_string),
                cd.get_filename().map(str::to_string),
            ),
            None => (None, None),
        };

        if name.as_deref() != Some("file") {
            continue;
        }

        let extension = image_extension(filename.as_deref().unwrap_or_default())?;

        let mut bytes = Vec::new();
        let mut md5_hasher = Context::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ApiError::BadRequest(e.to_string()))?;
            if bytes.len() + chunk.len() > limit {
                return Err(ApiError::PayloadTooLarge { limit });
            }
            md5_hasher.consume(&chunk);
            bytes.extend_from_slice(&chunk);
        }

        if bytes.is_empty() {
            return Err(ApiError::BadRequest("The photo is empty".into()));
        }

        let file_name = format!("{:x}.{}", md5_hasher.compute(), extension);
        let target = upload_dir.join(&file_name);
        let dir = upload_dir.to_path_buf();
        web::block(move || {
            std::fs::create_dir_all(&dir)?;
            std::fs::write(&target, bytes)
        })
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

        info!("stored photo {}", file_name);
        return Ok(format!("{}/{}", UPLOADS_PATH, file_name));
    }

    Err(ApiError::BadRequest("Missing 'file' part".into()))
}

/// Extension to store a photo under, taken from the client's file name. Only
/// image types are accepted.
fn image_extension(filename: &str) -> ApiResult<String> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| ApiError::BadRequest("The photo needs a file extension".into()))?;

    let mime = mime_guess::from_ext(&extension).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(ApiError::BadRequest(format!(
            "Please select an image file, got {}",
            mime
        )));
    }

    Ok(extension)
}
