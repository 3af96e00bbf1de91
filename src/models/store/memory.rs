use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::AppError;
use crate::models::answer::AnswerChoice;
use crate::models::card::{CardResponse, NewCardResponse};
use crate::models::interaction::{Answer, NewAnswer};
use crate::models::respondent::{Respondent, RespondentKey, RespondentSummary, RespondentUpsert};
use super::ResponseStore;

/// Process-local store. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    respondents: Vec<StoredRespondent>,
    answers: Vec<Answer>,
    cards: Vec<CardResponse>,
    last_answer_id: i64,
    last_card_id: i64,
    // Monotonic write counter; breaks `updated_at` ties when ordering.
    clock: u64,
}

struct StoredRespondent {
    respondent: Respondent,
    touched: u64,
}

impl Tables {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn upsert(&mut self, input: &RespondentUpsert) -> Respondent {
        let now = Utc::now();
        let touched = self.tick();
        if let Some(stored) = self
            .respondents
            .iter_mut()
            .find(|s| s.respondent.email == input.email && s.respondent.name == input.name)
        {
            stored.respondent.asked_by = Some(input.asked_by.clone());
            if input.selfie_data.is_some() {
                stored.respondent.selfie_data = input.selfie_data.clone();
            }
            stored.respondent.updated_at = now;
            stored.touched = touched;
            return stored.respondent.clone();
        }

        let respondent = Respondent {
            email: input.email.clone(),
            name: input.name.clone(),
            asked_by: Some(input.asked_by.clone()),
            selfie_data: input.selfie_data.clone(),
            created_at: now,
            updated_at: now,
        };
        self.respondents.push(StoredRespondent { respondent: respondent.clone(), touched });
        respondent
    }

    fn insert_answer(&mut self, input: &NewAnswer) -> Result<Answer, AppError> {
        let owner_exists = self.respondents.iter().any(|s| {
            s.respondent.email == input.respondent_email && s.respondent.name == input.respondent_name
        });
        if !owner_exists {
            return Err(AppError::NotFound("Respondent not found".to_string()));
        }

        self.last_answer_id += 1;
        let answer = Answer {
            id: self.last_answer_id,
            answer: input.answer,
            question_key: input.question_key.clone(),
            question_text: input.question_text.clone(),
            asked_by: Some(input.asked_by.clone()),
            selfie_data: input.selfie_data.clone(),
            respondent_email: input.respondent_email.clone(),
            respondent_name: input.respondent_name.clone(),
            ip_address: input.ip_address.clone(),
            user_agent: input.user_agent.clone(),
            created_at: Utc::now(),
        };
        self.answers.push(answer.clone());
        Ok(answer)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ResponseStore for MemoryStore {
    async fn upsert_respondent(&self, input: &RespondentUpsert) -> Result<Respondent, AppError> {
        Ok(self.lock().upsert(input))
    }

    async fn create_answer(&self, input: &NewAnswer) -> Result<Answer, AppError> {
        self.lock().insert_answer(input)
    }

    async fn record_answer(&self, input: &NewAnswer) -> Result<Answer, AppError> {
        let mut tables = self.lock();
        tables.upsert(&RespondentUpsert {
            email: input.respondent_email.clone(),
            name: input.respondent_name.clone(),
            asked_by: input.asked_by.clone(),
            selfie_data: input.selfie_data.clone(),
        });
        tables.insert_answer(input)
    }

    async fn list_respondents(&self) -> Result<Vec<RespondentSummary>, AppError> {
        let tables = self.lock();
        let mut stored: Vec<&StoredRespondent> = tables.respondents.iter().collect();
        stored.sort_by(|a, b| {
            b.respondent
                .updated_at
                .cmp(&a.respondent.updated_at)
                .then(b.touched.cmp(&a.touched))
        });

        let summaries = stored
            .into_iter()
            .map(|s| {
                let r = &s.respondent;
                let response_count = tables
                    .answers
                    .iter()
                    .filter(|a| a.respondent_email == r.email && a.respondent_name == r.name)
                    .count() as i64;
                RespondentSummary {
                    email: r.email.clone(),
                    name: r.name.clone(),
                    asked_by: r.asked_by.clone(),
                    selfie_data: r.selfie_data.clone(),
                    created_at: r.created_at,
                    updated_at: r.updated_at,
                    response_count,
                }
            })
            .collect();
        Ok(summaries)
    }

    async fn delete_respondent(&self, key: &RespondentKey) -> Result<bool, AppError> {
        let mut tables = self.lock();
        let before = tables.respondents.len();
        tables
            .respondents
            .retain(|s| !(s.respondent.email == key.email && s.respondent.name == key.name));
        if tables.respondents.len() == before {
            return Ok(false);
        }
        tables
            .answers
            .retain(|a| !(a.respondent_email == key.email && a.respondent_name == key.name));
        Ok(true)
    }

    async fn count_answers(&self, filter: Option<AnswerChoice>) -> Result<i64, AppError> {
        let tables = self.lock();
        let n = tables
            .answers
            .iter()
            .filter(|a| filter.is_none_or(|choice| a.answer == choice))
            .count();
        Ok(n as i64)
    }

    async fn recent_answers(&self, limit: usize) -> Result<Vec<Answer>, AppError> {
        let tables = self.lock();
        Ok(tables.answers.iter().rev().take(limit).cloned().collect())
    }

    async fn create_card_response(&self, input: &NewCardResponse) -> Result<CardResponse, AppError> {
        let mut tables = self.lock();
        tables.last_card_id += 1;
        let response = CardResponse {
            id: tables.last_card_id,
            answer: input.answer,
            ip_address: input.ip_address.clone(),
            user_agent: input.user_agent.clone(),
            created_at: Utc::now(),
        };
        tables.cards.push(response.clone());
        Ok(response)
    }

    async fn count_card_responses(&self, filter: Option<AnswerChoice>) -> Result<i64, AppError> {
        let tables = self.lock();
        let n = tables
            .cards
            .iter()
            .filter(|c| filter.is_none_or(|choice| c.answer == choice))
            .count();
        Ok(n as i64)
    }
}
