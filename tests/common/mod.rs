//! Shared test infrastructure.
//!
//! - `build_app()` - the full route table on top of a given store
//! - `test_config()` - fixed admin credentials and slug
//! - `session_cookie()` - pull the admin cookie out of a login response
//! - `stored_answers()` - what a store holds for one respondent
//! - `store_contract` - behaviour every `ResponseStore` must share

#![allow(dead_code)]

pub mod store_contract;

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use valentine::auth::session::{AdminAuth, COOKIE_NAME};
use valentine::config::AppConfig;
use valentine::handlers;
use valentine::models::ResponseStore;
use valentine::models::interaction::Answer;
use valentine::models::respondent::RespondentKey;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "correct-horse";
pub const ADMIN_SLUG: &str = "secret-otter-den";

// ============================================================================
// APP SETUP
// ============================================================================

pub fn test_config() -> AppConfig {
    AppConfig {
        admin_username: ADMIN_USER.to_string(),
        admin_password: ADMIN_PASS.to_string(),
        admin_route_slug: ADMIN_SLUG.to_string(),
        ..AppConfig::default()
    }
}

/// The application as `main` builds it, minus the request logger.
pub fn build_app(
    store: Arc<dyn ResponseStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let config = test_config();
    App::new()
        .app_data(web::Data::from(store))
        .app_data(web::Data::new(AdminAuth::from_config(&config)))
        .app_data(web::Data::new(config))
        .configure(handlers::configure)
        .default_service(web::to(handlers::not_found))
}

// ============================================================================
// REQUEST HELPERS
// ============================================================================

pub fn login_request(username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "username": username, "password": password }))
}

/// The admin cookie set by a login response.
pub fn session_cookie(resp: &ServiceResponse) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|c| c.name() == COOKIE_NAME)
        .map(|c| c.into_owned())
        .expect("login response carries the session cookie")
}

pub fn answer_payload(name: &str, email: &str, key: &str, answer: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "askedBy": "Sam",
        "questionKey": key,
        "questionText": format!("Question {key}?"),
        "answer": answer,
    })
}

// ============================================================================
// STORE HELPERS
// ============================================================================

/// Every answer stored for one respondent, oldest first.
pub async fn stored_answers(store: &dyn ResponseStore, key: &RespondentKey) -> Vec<Answer> {
    let mut answers: Vec<Answer> = store
        .recent_answers(10_000)
        .await
        .expect("read answers")
        .into_iter()
        .filter(|a| a.respondent_email == key.email && a.respondent_name == key.name)
        .collect();
    answers.reverse();
    answers
}
