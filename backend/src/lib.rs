pub mod config;
pub mod error;
pub mod inference;
pub mod mappings;
pub mod models;
pub mod routes;

use actix_cors::Cors;
use actix_web::http::header;

/// Politique CORS construite depuis `ALLOWED_ORIGINS`. `*` ouvre l'API à toute origine.
pub fn cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .max_age(3600);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_any_origin();
    }

    allowed_origins
        .iter()
        .fold(cors.supports_credentials(), |cors, origin| cors.allowed_origin(origin))
}
