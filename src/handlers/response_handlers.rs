use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::auth::validate::{
    validate_asked_by, validate_email, validate_length, validate_name, validate_selfie,
};
use crate::errors::AppError;
use crate::handlers::client_meta;
use crate::models::ResponseStore;
use crate::models::answer::{AnswerChoice, Tally};
use crate::models::interaction::{AnswerSummary, NewAnswer};

pub const RECENT_LIMIT: usize = 20;

/// Body of `POST /api/responses`. The selfie is accepted as `selfieData`
/// or the shorter `selfie`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub asked_by: String,
    #[serde(default)]
    pub question_key: String,
    #[serde(default)]
    pub question_text: String,
    pub answer: AnswerChoice,
    #[serde(default, alias = "selfie")]
    pub selfie_data: Option<String>,
}

impl ResponsePayload {
    /// First failing rule wins.
    fn validate(&self) -> Option<String> {
        validate_name(&self.name)
            .or_else(|| validate_email(&self.email))
            .or_else(|| validate_asked_by(&self.asked_by))
            .or_else(|| validate_length(&self.question_key, "Question key", 1, 80))
            .or_else(|| validate_length(&self.question_text, "Question text", 1, 300))
            .or_else(|| validate_selfie(self.selfie_data.as_deref()))
    }

    fn into_new_answer(self, ip_address: Option<String>, user_agent: Option<String>) -> NewAnswer {
        NewAnswer {
            answer: self.answer,
            question_key: self.question_key.trim().to_string(),
            question_text: self.question_text.trim().to_string(),
            asked_by: self.asked_by.trim().to_string(),
            selfie_data: self.selfie_data,
            respondent_email: self.email.trim().to_lowercase(),
            respondent_name: self.name.trim().to_string(),
            ip_address,
            user_agent,
        }
    }
}

#[derive(Serialize)]
pub struct Created {
    pub id: i64,
    pub answer: AnswerChoice,
}

#[derive(Serialize)]
pub struct ResponseStats {
    #[serde(flatten)]
    pub tally: Tally,
    pub recent: Vec<AnswerSummary>,
}

/// POST /api/responses
pub async fn create(
    req: HttpRequest,
    store: web::Data<dyn ResponseStore>,
    body: web::Json<ResponsePayload>,
) -> Result<HttpResponse, AppError> {
    let payload = body.into_inner();
    if let Some(msg) = payload.validate() {
        return Err(AppError::Validation(msg));
    }

    let (ip_address, user_agent) = client_meta(&req);
    let answer = store
        .record_answer(&payload.into_new_answer(ip_address, user_agent))
        .await?;

    Ok(HttpResponse::Created().json(Created { id: answer.id, answer: answer.answer }))
}

/// GET /api/responses
pub async fn stats(store: web::Data<dyn ResponseStore>) -> Result<HttpResponse, AppError> {
    let tally = store.answer_tally().await?;
    let recent = store
        .recent_answers(RECENT_LIMIT)
        .await?
        .iter()
        .map(AnswerSummary::from)
        .collect();

    Ok(HttpResponse::Ok().json(ResponseStats { tally, recent }))
}
