use std::sync::Arc;

use actix_web::{post, routes, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState, errors::AppError, middleware::get_request_id,
    models::dto::request::GenerateQuizRequestDto,
};

#[routes]
#[post("/api/")]
#[post("/api")]
pub async fn generate_quiz(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    request: web::Json<GenerateQuizRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();

    log::debug!(
        "Quiz request {} received",
        get_request_id(&req).unwrap_or_else(|| "-".to_string())
    );

    let response = state.quiz_service.generate_quiz(request).await?;
    Ok(HttpResponse::Ok().json(response))
}
