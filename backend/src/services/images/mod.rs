//! # Image Service Module
//!
//! Stores staff photos picked in the registration form. The form uploads the
//! photo right before it posts the record and puts the returned URL in the
//! record's `image_url`.
//!
//! Files are named after the MD5 of their content, so uploading the same
//! photo twice yields the same URL. They are served back by the
//! `actix_files` mount on `/uploads`.

mod upload;

use actix_web::web::{post, scope};
use actix_web::Scope;

/// The base path for all image endpoints.
const API_PATH: &str = "/api/images";

/// URL prefix uploaded files are served under.
pub const UPLOADS_PATH: &str = "/uploads";

/// Configures and returns the Actix `Scope` for the image routes.
///
/// # Registered Routes:
///
/// *   **`POST /`**:
///     - **Handler**: `upload::process`
///     - **Description**: Accepts a `multipart/form-data` body with one `file` part
///       holding an image. Answers `{"image_url": "/uploads/<md5>.<ext>"}`.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(upload::process))
}
