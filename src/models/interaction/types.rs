use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::answer::AnswerChoice;

/// One stored answer to one question. Never updated after insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: i64,
    pub answer: AnswerChoice,
    pub question_key: String,
    pub question_text: String,
    pub asked_by: Option<String>,
    pub selfie_data: Option<String>,
    pub respondent_email: String,
    pub respondent_name: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated submission from the interactive flow.
#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub answer: AnswerChoice,
    pub question_key: String,
    pub question_text: String,
    pub asked_by: String,
    pub selfie_data: Option<String>,
    pub respondent_email: String,
    pub respondent_name: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Public view of a recent answer, without identity or client details.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSummary {
    pub id: i64,
    pub answer: AnswerChoice,
    pub question_key: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Answer> for AnswerSummary {
    fn from(a: &Answer) -> Self {
        Self {
            id: a.id,
            answer: a.answer,
            question_key: a.question_key.clone(),
            created_at: a.created_at,
        }
    }
}
