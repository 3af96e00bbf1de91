use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::answer::AnswerChoice;
use super::types::*;

pub async fn create(pool: &PgPool, input: &NewCardResponse) -> Result<CardResponse, AppError> {
    let (id, answer, ip_address, user_agent, created_at): (
        i64,
        String,
        Option<String>,
        Option<String>,
        DateTime<Utc>,
    ) = sqlx::query_as(
        "INSERT INTO card_responses (answer, ip_address, user_agent) \
         VALUES ($1, $2, $3) \
         RETURNING id, answer, ip_address, user_agent, created_at",
    )
    .bind(input.answer.as_str())
    .bind(&input.ip_address)
    .bind(&input.user_agent)
    .fetch_one(pool)
    .await?;

    Ok(CardResponse {
        id,
        answer: answer.parse().map_err(AppError::Internal)?,
        ip_address,
        user_agent,
        created_at,
    })
}

pub async fn count(pool: &PgPool, filter: Option<AnswerChoice>) -> Result<i64, AppError> {
    let (n,): (i64,) = match filter {
        Some(choice) => {
            sqlx::query_as("SELECT COUNT(*) FROM card_responses WHERE answer = $1")
                .bind(choice.as_str())
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_as("SELECT COUNT(*) FROM card_responses")
                .fetch_one(pool)
                .await?
        }
    };
    Ok(n)
}
