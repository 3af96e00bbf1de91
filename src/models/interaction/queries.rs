use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};

use crate::errors::AppError;
use crate::models::answer::AnswerChoice;
use crate::models::respondent::{self, RespondentUpsert};
use super::types::*;

const ANSWER_COLUMNS: &str = "id, answer, question_key, question_text, asked_by, selfie_data, \
     respondent_email, respondent_name, ip_address, user_agent, created_at";

#[derive(sqlx::FromRow)]
struct AnswerRow {
    id: i64,
    answer: String,
    question_key: String,
    question_text: String,
    asked_by: Option<String>,
    selfie_data: Option<String>,
    respondent_email: String,
    respondent_name: String,
    ip_address: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AnswerRow> for Answer {
    type Error = AppError;

    fn try_from(row: AnswerRow) -> Result<Self, Self::Error> {
        Ok(Answer {
            id: row.id,
            answer: row.answer.parse().map_err(AppError::Internal)?,
            question_key: row.question_key,
            question_text: row.question_text,
            asked_by: row.asked_by,
            selfie_data: row.selfie_data,
            respondent_email: row.respondent_email,
            respondent_name: row.respondent_name,
            ip_address: row.ip_address,
            user_agent: row.user_agent,
            created_at: row.created_at,
        })
    }
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, input: &NewAnswer) -> Result<Answer, AppError> {
    let sql = format!(
        "INSERT INTO interaction_responses \
             (answer, question_key, question_text, asked_by, selfie_data, \
              respondent_email, respondent_name, ip_address, user_agent) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING {ANSWER_COLUMNS}"
    );
    let row = sqlx::query_as::<_, AnswerRow>(&sql)
        .bind(input.answer.as_str())
        .bind(&input.question_key)
        .bind(&input.question_text)
        .bind(&input.asked_by)
        .bind(&input.selfie_data)
        .bind(&input.respondent_email)
        .bind(&input.respondent_name)
        .bind(&input.ip_address)
        .bind(&input.user_agent)
        .fetch_one(executor)
        .await?;
    row.try_into()
}

/// Upsert the respondent and insert the answer in one transaction.
pub async fn record(pool: &PgPool, input: &NewAnswer) -> Result<Answer, AppError> {
    let mut tx = pool.begin().await?;

    respondent::queries::upsert(
        &mut *tx,
        &RespondentUpsert {
            email: input.respondent_email.clone(),
            name: input.respondent_name.clone(),
            asked_by: input.asked_by.clone(),
            selfie_data: input.selfie_data.clone(),
        },
    )
    .await?;
    let answer = create(&mut *tx, input).await?;

    tx.commit().await?;
    Ok(answer)
}

/// Count answers, optionally restricted to one choice.
pub async fn count(pool: &PgPool, filter: Option<AnswerChoice>) -> Result<i64, AppError> {
    let (n,): (i64,) = match filter {
        Some(choice) => {
            sqlx::query_as("SELECT COUNT(*) FROM interaction_responses WHERE answer = $1")
                .bind(choice.as_str())
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_as("SELECT COUNT(*) FROM interaction_responses")
                .fetch_one(pool)
                .await?
        }
    };
    Ok(n)
}

pub async fn find_recent(pool: &PgPool, limit: i64) -> Result<Vec<Answer>, AppError> {
    let sql = format!(
        "SELECT {ANSWER_COLUMNS} FROM interaction_responses \
         ORDER BY created_at DESC, id DESC LIMIT $1"
    );
    let rows = sqlx::query_as::<_, AnswerRow>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(Answer::try_from).collect()
}
