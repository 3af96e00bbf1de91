use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::auth::session::AdminAuth;
use crate::errors::AppError;

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/admin/login
pub async fn login(
    auth: web::Data<AdminAuth>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let username = body.username.trim();
    let password = body.password.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::Validation("Invalid credentials format".to_string()));
    }

    if !auth.validate_credentials(username, password) {
        log::warn!("Failed admin login for '{username}'");
        return Err(AppError::Unauthorized);
    }

    log::info!("Admin '{username}' logged in");
    Ok(HttpResponse::Ok()
        .cookie(auth.session_cookie())
        .json(serde_json::json!({ "ok": true })))
}

/// POST /api/admin/logout. Always succeeds, logged in or not.
pub async fn logout(auth: web::Data<AdminAuth>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(auth.cleared_cookie())
        .json(serde_json::json!({ "ok": true }))
}
