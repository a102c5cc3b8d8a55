// Route exports
pub mod explore;
pub mod locations;

use actix_web::{http::StatusCode, web, HttpResponse};
use crate::models::ErrorResponse;

pub use explore::AppState;
pub use locations::LocationState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(explore::configure)
            .configure(locations::configure),
    );
}

/// JSON error body with a matching status code
pub(crate) fn error_response(status: StatusCode, error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
    })
}
