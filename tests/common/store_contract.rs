//! Checks run against both store implementations.
//!
//! Every function takes a `tag` that is mixed into the emails it uses, so
//! runs against a shared database do not see each other's rows.

use valentine::models::ResponseStore;
use valentine::models::answer::AnswerChoice;
use valentine::models::interaction::NewAnswer;
use valentine::models::respondent::{RespondentKey, RespondentUpsert};

pub fn upsert_input(email: &str, name: &str, asked_by: &str, selfie: Option<&str>) -> RespondentUpsert {
    RespondentUpsert {
        email: email.to_string(),
        name: name.to_string(),
        asked_by: asked_by.to_string(),
        selfie_data: selfie.map(str::to_string),
    }
}

pub fn new_answer(email: &str, name: &str, key: &str, answer: AnswerChoice) -> NewAnswer {
    NewAnswer {
        answer,
        question_key: key.to_string(),
        question_text: format!("Question {key}?"),
        asked_by: "Sam".to_string(),
        selfie_data: None,
        respondent_email: email.to_string(),
        respondent_name: name.to_string(),
        ip_address: Some("127.0.0.1".to_string()),
        user_agent: None,
    }
}

async fn respondents_with_key(store: &dyn ResponseStore, email: &str, name: &str) -> Vec<(Option<String>, Option<String>, i64)> {
    store
        .list_respondents()
        .await
        .expect("list respondents")
        .into_iter()
        .filter(|r| r.email == email && r.name == name)
        .map(|r| (r.asked_by, r.selfie_data, r.response_count))
        .collect()
}

/// Same (email, name) twice: one row, latest `asked_by`.
pub async fn upsert_updates_in_place(store: &dyn ResponseStore, tag: &str) {
    let email = format!("upsert-{tag}@x.com");

    let first = store
        .upsert_respondent(&upsert_input(&email, "Ava", "Sam", None))
        .await
        .expect("first upsert");
    let second = store
        .upsert_respondent(&upsert_input(&email, "Ava", "Jo", None))
        .await
        .expect("second upsert");

    assert_eq!(second.asked_by.as_deref(), Some("Jo"));
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);

    let rows = respondents_with_key(store, &email, "Ava").await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0.as_deref(), Some("Jo"));

    // Same email, different name is somebody else
    store
        .upsert_respondent(&upsert_input(&email, "Ava B", "Sam", None))
        .await
        .expect("third upsert");
    assert_eq!(respondents_with_key(store, &email, "Ava B").await.len(), 1);
    assert_eq!(respondents_with_key(store, &email, "Ava").await.len(), 1);
}

/// A later submission without a photo keeps the stored one; a new photo replaces it.
pub async fn upsert_keeps_selfie(store: &dyn ResponseStore, tag: &str) {
    let email = format!("selfie-{tag}@x.com");

    store
        .upsert_respondent(&upsert_input(&email, "Ava", "Sam", Some("data:image/jpeg;base64,AAA")))
        .await
        .expect("upsert with selfie");
    let kept = store
        .upsert_respondent(&upsert_input(&email, "Ava", "Sam", None))
        .await
        .expect("upsert without selfie");
    assert_eq!(kept.selfie_data.as_deref(), Some("data:image/jpeg;base64,AAA"));

    let replaced = store
        .upsert_respondent(&upsert_input(&email, "Ava", "Sam", Some("data:image/jpeg;base64,BBB")))
        .await
        .expect("upsert with new selfie");
    assert_eq!(replaced.selfie_data.as_deref(), Some("data:image/jpeg;base64,BBB"));
}

/// Deleting a respondent takes their answers along; a second delete is a no-op.
pub async fn delete_cascades(store: &dyn ResponseStore, tag: &str) {
    let email = format!("cascade-{tag}@x.com");
    let other = format!("keep-{tag}@x.com");

    let before = store.count_answers(None).await.expect("count");
    store.record_answer(&new_answer(&email, "Ava", "q1", AnswerChoice::No)).await.expect("q1");
    store.record_answer(&new_answer(&email, "Ava", "q2", AnswerChoice::Yes)).await.expect("q2");
    store.record_answer(&new_answer(&other, "Ben", "q1", AnswerChoice::Yes)).await.expect("other");
    assert_eq!(store.count_answers(None).await.expect("count"), before + 3);

    let rows = respondents_with_key(store, &email, "Ava").await;
    assert_eq!(rows[0].2, 2);

    let key = RespondentKey::normalized(&email, "Ava").expect("key");
    assert!(store.delete_respondent(&key).await.expect("delete"));
    assert_eq!(store.count_answers(None).await.expect("count"), before + 1);
    assert!(respondents_with_key(store, &email, "Ava").await.is_empty());
    assert_eq!(respondents_with_key(store, &other, "Ben").await.len(), 1);

    assert!(!store.delete_respondent(&key).await.expect("second delete"));
}

/// Most recently touched respondent first.
pub async fn list_orders_by_recency(store: &dyn ResponseStore, tag: &str) {
    let older = format!("older-{tag}@x.com");
    let newer = format!("newer-{tag}@x.com");

    store.record_answer(&new_answer(&older, "Old", "q1", AnswerChoice::Yes)).await.expect("older");
    store.record_answer(&new_answer(&newer, "New", "q1", AnswerChoice::Yes)).await.expect("newer");

    let position = |list: &[valentine::models::respondent::RespondentSummary], email: &str| {
        list.iter().position(|r| r.email == email).expect("listed")
    };
    let list = store.list_respondents().await.expect("list");
    assert!(position(&list, &newer) < position(&list, &older));

    // Answering again moves the older respondent to the front
    store.record_answer(&new_answer(&older, "Old", "q2", AnswerChoice::No)).await.expect("again");
    let list = store.list_respondents().await.expect("list");
    assert!(position(&list, &older) < position(&list, &newer));
}

/// Filtered counts add up to the total.
pub async fn counts_by_answer(store: &dyn ResponseStore, tag: &str) {
    let email = format!("count-{tag}@x.com");
    let yes_before = store.count_answers(Some(AnswerChoice::Yes)).await.expect("yes");
    let no_before = store.count_answers(Some(AnswerChoice::No)).await.expect("no");

    for (key, answer) in [("q1", AnswerChoice::Yes), ("q2", AnswerChoice::No), ("q3", AnswerChoice::Yes)] {
        store.record_answer(&new_answer(&email, "Cy", key, answer)).await.expect("record");
    }

    assert_eq!(store.count_answers(Some(AnswerChoice::Yes)).await.expect("yes"), yes_before + 2);
    assert_eq!(store.count_answers(Some(AnswerChoice::No)).await.expect("no"), no_before + 1);

    let tally = store.answer_tally().await.expect("tally");
    assert_eq!(tally.total, tally.yes_count + tally.no_count);
}
