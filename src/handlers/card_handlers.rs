use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use crate::errors::AppError;
use crate::handlers::client_meta;
use crate::handlers::response_handlers::Created;
use crate::models::ResponseStore;
use crate::models::answer::AnswerChoice;
use crate::models::card::NewCardResponse;

#[derive(Deserialize)]
pub struct CardVotePayload {
    pub answer: AnswerChoice,
}

/// POST /api/card/responses
pub async fn create(
    req: HttpRequest,
    store: web::Data<dyn ResponseStore>,
    body: web::Json<CardVotePayload>,
) -> Result<HttpResponse, AppError> {
    let (ip_address, user_agent) = client_meta(&req);
    let created = store
        .create_card_response(&NewCardResponse { answer: body.answer, ip_address, user_agent })
        .await?;

    Ok(HttpResponse::Created().json(Created { id: created.id, answer: created.answer }))
}

/// GET /api/card/responses
pub async fn stats(store: web::Data<dyn ResponseStore>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(store.card_tally().await?))
}
