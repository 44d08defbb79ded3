//! HTTP boundary for the weather lookup widget backend: route handlers and
//! the CORS layer, kept in a library so integration tests can assemble the
//! same app the binary serves.

use actix_cors::Cors;
use actix_web::http::header;

use widget_core::Config;

pub mod routes;

/// CORS restricted to the configured frontend origin.
pub fn cors_layer(config: &Config) -> Cors {
    Cors::default()
        .allowed_origin(&config.allowed_origin)
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers(vec![header::CONTENT_LENGTH])
        .max_age(600)
        .supports_credentials()
}
