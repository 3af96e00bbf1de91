//! In-memory store tests: the shared store contract plus a few checks
//! specific to `MemoryStore`.

mod common;

use common::store_contract::{self, new_answer, upsert_input};
use valentine::errors::AppError;
use valentine::models::answer::AnswerChoice;
use valentine::models::card::NewCardResponse;
use valentine::models::respondent::RespondentKey;
use valentine::models::{MemoryStore, ResponseStore};

#[tokio::test]
async fn test_upsert_updates_in_place() {
    store_contract::upsert_updates_in_place(&MemoryStore::new(), "mem").await;
}

#[tokio::test]
async fn test_upsert_keeps_selfie() {
    store_contract::upsert_keeps_selfie(&MemoryStore::new(), "mem").await;
}

#[tokio::test]
async fn test_delete_cascades() {
    store_contract::delete_cascades(&MemoryStore::new(), "mem").await;
}

#[tokio::test]
async fn test_list_orders_by_recency() {
    store_contract::list_orders_by_recency(&MemoryStore::new(), "mem").await;
}

#[tokio::test]
async fn test_counts_by_answer() {
    store_contract::counts_by_answer(&MemoryStore::new(), "mem").await;
}

#[tokio::test]
async fn test_create_answer_needs_existing_respondent() {
    let store = MemoryStore::new();

    let orphan = store
        .create_answer(&new_answer("ghost@x.com", "Ghost", "q1", AnswerChoice::Yes))
        .await;
    assert!(matches!(orphan, Err(AppError::NotFound(_))));

    store
        .upsert_respondent(&upsert_input("ghost@x.com", "Ghost", "Sam", None))
        .await
        .expect("upsert");
    let created = store
        .create_answer(&new_answer("ghost@x.com", "Ghost", "q1", AnswerChoice::Yes))
        .await
        .expect("create");
    assert_eq!(created.id, 1);
    assert_eq!(created.asked_by.as_deref(), Some("Sam"));
}

#[tokio::test]
async fn test_answer_ids_increase() {
    let store = MemoryStore::new();
    let a = store.record_answer(&new_answer("a@x.com", "Ann", "q1", AnswerChoice::Yes)).await.unwrap();
    let b = store.record_answer(&new_answer("a@x.com", "Ann", "q2", AnswerChoice::No)).await.unwrap();
    assert!(b.id > a.id);

    let key = RespondentKey::normalized("a@x.com", "Ann").unwrap();
    let keys: Vec<_> = common::stored_answers(&store, &key)
        .await
        .into_iter()
        .map(|a| a.question_key)
        .collect();
    assert_eq!(keys, vec!["q1", "q2"]);

    let recent = store.recent_answers(1).await.unwrap();
    assert_eq!(recent[0].id, b.id);
}

#[tokio::test]
async fn test_card_responses_tally() {
    let store = MemoryStore::new();
    for answer in [AnswerChoice::Yes, AnswerChoice::No, AnswerChoice::Yes, AnswerChoice::Yes] {
        store
            .create_card_response(&NewCardResponse { answer, ip_address: None, user_agent: None })
            .await
            .unwrap();
    }
    let tally = store.card_tally().await.unwrap();
    assert_eq!((tally.total, tally.yes_count, tally.no_count), (4, 3, 1));
    assert_eq!(store.answer_tally().await.unwrap().total, 0);
}
