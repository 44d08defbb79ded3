//! HTTP handlers for the lookup API.

use actix_web::{HttpRequest, HttpResponse, get, web};
use serde::Deserialize;
use serde_json::json;

use widget_core::{COUNTRY_CODES, LookupError, RateLimiter, WeatherService, client_identity};

/// Query parameters shared by the weather endpoints.
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    city: Option<String>,
    country: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(current_weather)
        .service(daily_weather)
        .service(country_codes);
}

#[get("/api/weather")]
async fn current_weather(
    req: HttpRequest,
    query: web::Query<WeatherQuery>,
    service: web::Data<WeatherService>,
    limiter: web::Data<RateLimiter>,
) -> HttpResponse {
    if rate_limited(&req, &limiter) {
        return too_many_requests();
    }

    let city = query.city.as_deref().unwrap_or("");
    match service.current(city, query.country.as_deref()).await {
        Ok(conditions) => HttpResponse::Ok().json(conditions),
        Err(err) => lookup_failure("current", &err),
    }
}

#[get("/daily-weather")]
async fn daily_weather(
    req: HttpRequest,
    query: web::Query<WeatherQuery>,
    service: web::Data<WeatherService>,
    limiter: web::Data<RateLimiter>,
) -> HttpResponse {
    if rate_limited(&req, &limiter) {
        return too_many_requests();
    }

    let city = query.city.as_deref().unwrap_or("");
    match service.daily(city, query.country.as_deref()).await {
        Ok(forecast) => HttpResponse::Ok().json(forecast),
        Err(err) => lookup_failure("daily", &err),
    }
}

#[get("/country-codes")]
async fn country_codes() -> HttpResponse {
    HttpResponse::Ok().json(COUNTRY_CODES)
}

fn rate_limited(req: &HttpRequest, limiter: &RateLimiter) -> bool {
    let forwarded_for = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok());
    let peer = req.peer_addr().map(|addr| addr.ip().to_string());

    let identity = client_identity(forwarded_for, peer.as_deref());
    !limiter.allow(&identity)
}

fn too_many_requests() -> HttpResponse {
    HttpResponse::TooManyRequests()
        .content_type("text/plain; charset=utf-8")
        .body("Too many requests. Please try again later.")
}

/// One response per error kind; upstream detail goes to the log, never to
/// the client.
fn lookup_failure(kind: &str, err: &LookupError) -> HttpResponse {
    match err {
        LookupError::InvalidInput => {
            tracing::debug!(kind, "rejected lookup with empty city");
            HttpResponse::BadRequest().json(json!({"error": "City name cannot be empty!"}))
        }
        LookupError::CityNotFound => {
            tracing::debug!(kind, "no geocoding candidates");
            HttpResponse::NotFound()
                .json(json!({"error": "City not found. Please check the city name."}))
        }
        LookupError::Upstream(source) => {
            tracing::error!(kind, source = %format!("{source:#}"), "upstream lookup failed");
            HttpResponse::InternalServerError()
                .json(json!({"error": "Failed to fetch weather data."}))
        }
        LookupError::Internal(source) => {
            tracing::error!(kind, source = %format!("{source:#}"), "internal lookup error");
            HttpResponse::InternalServerError().json(json!({"error": "Internal server error."}))
        }
    }
}
