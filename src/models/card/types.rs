use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::answer::AnswerChoice;

/// An anonymous vote from the single-question card. Kept apart from the
/// interactive answers: no identity, no question, its own table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    pub id: i64,
    pub answer: AnswerChoice,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCardResponse {
    pub answer: AnswerChoice,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
