mod config;
mod error;
mod services;

use crate::config::ServerConfig;
use crate::error::ApiError;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{info, warn};
use mime_guess::from_path;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Largest JSON body accepted for a registration record.
const JSON_LIMIT: usize = 64 * 1024;

async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = ServerConfig::from_env();
    let url = config.url();

    std::fs::create_dir_all(&config.upload_dir)?;
    services::registrations::store::open(&config.database_path)
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    if config.open_browser {
        let browser_url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            if let Err(e) = webbrowser::open(&browser_url) {
                warn!("could not open a browser: {}", e);
            }
        });
    }

    info!(
        "Server running at {} (database: {}, uploads: {})",
        url,
        config.database_path.display(),
        config.upload_dir.display()
    );

    let bind = (config.host.clone(), config.port);
    let upload_dir = config.upload_dir.clone();
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(
                web::JsonConfig::default()
                    .limit(JSON_LIMIT)
                    .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
            )
            .app_data(config.clone())
            .service(services::registrations::configure_routes())
            .service(services::images::configure_routes())
            .service(actix_files::Files::new(
                services::images::UPLOADS_PATH,
                upload_dir.clone(),
            ))
            .default_service(web::route().to(serve_embedded))
    })
    .bind(bind)?
    .run()
    .await
}
