pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

use crate::errors::AppError;

pub use health_handler::{health_check, health_check_live};
pub use quiz_handler::generate_quiz;

/// Registers the API routes, then the static frontend under `/` so that the
/// API always takes precedence.
pub fn configure_routes(cfg: &mut web::ServiceConfig, static_dir: &str) {
    cfg.app_data(json_config())
        .service(generate_quiz)
        .service(health_check)
        .service(health_check_live)
        .service(actix_files::Files::new("/", static_dir).index_file("index.html"));
}

/// Renders malformed request bodies as the usual JSON error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}
