//! Persistence seam for every handler.
//!
//! `PgStore` is the production implementation on top of the query modules;
//! `MemoryStore` backs development runs without `DATABASE_URL` and the test
//! suite. Both must agree on: unique (email, name) respondents, cascade of
//! answers on respondent delete, and recency ordering by `updated_at`.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::answer::{AnswerChoice, Tally};
use crate::models::card::{self, CardResponse, NewCardResponse};
use crate::models::interaction::{self, Answer, NewAnswer};
use crate::models::respondent::{
    self, Respondent, RespondentKey, RespondentSummary, RespondentUpsert,
};

#[async_trait]
pub trait ResponseStore: Send + Sync {
    async fn upsert_respondent(&self, input: &RespondentUpsert) -> Result<Respondent, AppError>;

    /// Insert an answer for an already existing respondent.
    async fn create_answer(&self, input: &NewAnswer) -> Result<Answer, AppError>;

    /// Upsert the owning respondent, then insert the answer, atomically.
    async fn record_answer(&self, input: &NewAnswer) -> Result<Answer, AppError>;

    async fn list_respondents(&self) -> Result<Vec<RespondentSummary>, AppError>;

    /// Returns false when no respondent had that key.
    async fn delete_respondent(&self, key: &RespondentKey) -> Result<bool, AppError>;

    async fn count_answers(&self, filter: Option<AnswerChoice>) -> Result<i64, AppError>;

    async fn recent_answers(&self, limit: usize) -> Result<Vec<Answer>, AppError>;

    async fn create_card_response(&self, input: &NewCardResponse) -> Result<CardResponse, AppError>;

    async fn count_card_responses(&self, filter: Option<AnswerChoice>) -> Result<i64, AppError>;

    async fn answer_tally(&self) -> Result<Tally, AppError> {
        Ok(Tally {
            total: self.count_answers(None).await?,
            yes_count: self.count_answers(Some(AnswerChoice::Yes)).await?,
            no_count: self.count_answers(Some(AnswerChoice::No)).await?,
        })
    }

    async fn card_tally(&self) -> Result<Tally, AppError> {
        Ok(Tally {
            total: self.count_card_responses(None).await?,
            yes_count: self.count_card_responses(Some(AnswerChoice::Yes)).await?,
            no_count: self.count_card_responses(Some(AnswerChoice::No)).await?,
        })
    }
}

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResponseStore for PgStore {
    async fn upsert_respondent(&self, input: &RespondentUpsert) -> Result<Respondent, AppError> {
        respondent::queries::upsert(&self.pool, input).await
    }

    async fn create_answer(&self, input: &NewAnswer) -> Result<Answer, AppError> {
        interaction::queries::create(&self.pool, input).await
    }

    async fn record_answer(&self, input: &NewAnswer) -> Result<Answer, AppError> {
        interaction::queries::record(&self.pool, input).await
    }

    async fn list_respondents(&self) -> Result<Vec<RespondentSummary>, AppError> {
        respondent::queries::find_all_with_counts(&self.pool).await
    }

    async fn delete_respondent(&self, key: &RespondentKey) -> Result<bool, AppError> {
        respondent::queries::delete(&self.pool, key).await
    }

    async fn count_answers(&self, filter: Option<AnswerChoice>) -> Result<i64, AppError> {
        interaction::queries::count(&self.pool, filter).await
    }

    async fn recent_answers(&self, limit: usize) -> Result<Vec<Answer>, AppError> {
        interaction::queries::find_recent(&self.pool, limit as i64).await
    }

    async fn create_card_response(&self, input: &NewCardResponse) -> Result<CardResponse, AppError> {
        card::queries::create(&self.pool, input).await
    }

    async fn count_card_responses(&self, filter: Option<AnswerChoice>) -> Result<i64, AppError> {
        card::queries::count(&self.pool, filter).await
    }
}
