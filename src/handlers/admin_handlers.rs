use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::ResponseStore;
use crate::models::respondent::{RespondentKey, RespondentSummary};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondentList {
    pub total_respondents: usize,
    pub total_submissions: i64,
    pub respondents: Vec<RespondentSummary>,
}

#[derive(Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// GET /api/admin/responses
pub async fn list(store: web::Data<dyn ResponseStore>) -> Result<HttpResponse, AppError> {
    let respondents = store.list_respondents().await?;
    let total_submissions = store.count_answers(None).await?;

    Ok(HttpResponse::Ok().json(RespondentList {
        total_respondents: respondents.len(),
        total_submissions,
        respondents,
    }))
}

/// DELETE /api/admin/responses. Answers go with the respondent.
pub async fn delete(
    store: web::Data<dyn ResponseStore>,
    body: web::Json<DeleteRequest>,
) -> Result<HttpResponse, AppError> {
    let key = RespondentKey::normalized(&body.email, &body.name)
        .ok_or_else(|| AppError::Validation("Missing respondent identity.".to_string()))?;

    if !store.delete_respondent(&key).await? {
        return Err(AppError::NotFound("Respondent not found".to_string()));
    }

    log::info!("Deleted respondent {} <{}>", key.name, key.email);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "ok": true })))
}
