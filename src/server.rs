//! HTTP surface.
//!
//! | Route                   | Handler                                      |
//! |-------------------------|----------------------------------------------|
//! | `GET /health`           | liveness JSON                                |
//! | `{upload.route}`        | [`upload`](crate::upload) relay               |
//! | any other `GET`/`HEAD`  | the document for that path                   |
//!
//! Documents carry `Cache-Control: no-cache` and a strong `ETag` (SHA-256 of
//! the body), so clients revalidate every time and get `304 Not Modified`
//! while the metadata for the path is unchanged.

use crate::config::SiteConfig;
use crate::engine::MetadataEngine;
use crate::upload::{self, UploadRelay};
use actix_web::http::header::{CACHE_CONTROL, ETAG, HeaderValue, IF_NONE_MATCH};
use actix_web::middleware::Logger;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use log::{error, info};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::io;
use std::sync::Arc;

/// Register every route on an app. Expects `web::Data<MetadataEngine>` and
/// `web::Data<UploadRelay>` to be registered.
pub fn configure(cfg: &mut web::ServiceConfig, upload_route: &str) {
    cfg.route("/health", web::get().to(health))
        .service(
            web::resource(upload_route)
                .route(web::post().to(upload::proxy_upload))
                .route(web::method(actix_web::http::Method::OPTIONS).to(upload::preflight))
                .default_service(web::to(upload::method_not_allowed)),
        )
        .service(
            web::resource("/{tail:.*}")
                .route(web::get().to(document))
                .route(web::head().to(document)),
        );
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
    }))
}

async fn document(req: HttpRequest, engine: web::Data<MetadataEngine>) -> HttpResponse {
    // Still percent-encoded; classification decodes per segment.
    let path = req.path().to_string();
    let engine = engine.into_inner();
    let rendered = web::block(move || engine.render_path(&path)).await;
    match rendered {
        Ok(body) => document_response(&req, body),
        Err(e) => {
            error!("Document render task failed: {e}");
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("Internal Server Error")
        }
    }
}

/// Quoted SHA-256 hex of the body.
pub fn etag_for(body: &str) -> String {
    format!("\"{:x}\"", Sha256::digest(body.as_bytes()))
}

fn document_response(req: &HttpRequest, body: String) -> HttpResponse {
    let etag = etag_for(&body);
    let etag_header =
        HeaderValue::from_str(&etag).unwrap_or_else(|_| HeaderValue::from_static("\"invalid-etag\""));

    if let Some(candidate) = req.headers().get(IF_NONE_MATCH)
        && let Ok(tags) = candidate.to_str()
        && tags
            .split(',')
            .any(|tag| tag.trim() == etag || tag.trim() == "*")
    {
        return HttpResponse::NotModified()
            .insert_header((ETAG, etag_header))
            .insert_header((CACHE_CONTROL, "no-cache"))
            .finish();
    }

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .insert_header((ETAG, etag_header))
        .insert_header((CACHE_CONTROL, "no-cache"))
        .body(body)
}

/// Warm the cache, bind, and serve until shutdown.
pub async fn run(config: SiteConfig, engine: Arc<MetadataEngine>) -> io::Result<()> {
    let warm_engine = Arc::clone(&engine);
    match web::block(move || warm_engine.warm()).await {
        Ok(entries) => info!("Metadata cache ready with {entries} entries"),
        Err(e) => error!("Failed to warm metadata cache: {e}"),
    }

    let engine = web::Data::from(engine);
    let relay = web::Data::new(UploadRelay::new(config.upload.clone()));
    let upload_route = config.upload.route.clone();
    let address = (config.server.bind.clone(), config.server.port);

    let mut server = HttpServer::new(move || {
        let upload_route = upload_route.clone();
        App::new()
            .wrap(Logger::default())
            .app_data(engine.clone())
            .app_data(relay.clone())
            .configure(move |cfg| configure(cfg, &upload_route))
    });
    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }
    let server = server.bind(&address)?;
    info!("Listening on http://{}:{}", address.0, address.1);
    server.run().await
}
