pub mod admin_handlers;
pub mod auth_handlers;
pub mod card_handlers;
pub mod page_handlers;
pub mod response_handlers;

use actix_web::{
    Error, HttpRequest, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::Method,
    middleware::{Next, from_fn},
    web,
};

use crate::auth::middleware::require_admin;
use crate::errors::AppError;

/// Request bodies may carry a selfie data URL of up to 2.5 MB.
pub const JSON_LIMIT: usize = 3 * 1024 * 1024;

/// CSRF protection for API mutation endpoints.
///
/// Rejects POST/PUT/DELETE requests that don't have Content-Type: application/json.
/// Browsers cannot send cross-origin JSON with cookies via a simple form POST,
/// so the admin cookie cannot be ridden without it.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == Method::POST || method == Method::PUT || method == Method::DELETE {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let body = serde_json::json!({
                "error": "Content-Type must be application/json for mutation requests"
            });
            let response = HttpResponse::BadRequest().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// JSON extractor settings: bigger body limit, and malformed bodies come
/// back as the same 400 shape as every other validation failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| {
            log::debug!("rejected JSON body: {err}");
            AppError::Validation("Invalid payload".to_string()).into()
        })
}

/// Client address and user agent, as recorded next to every vote.
///
/// The first `X-Forwarded-For` hop wins, then `X-Real-IP`, then the socket
/// peer.
pub fn client_meta(req: &HttpRequest) -> (Option<String>, Option<String>) {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let ip = header("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| header("x-real-ip").map(str::to_string))
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()));

    let user_agent = header("user-agent").map(str::to_string);
    (ip, user_agent)
}

/// Full route table. Fixed paths are registered before the `{slug}`
/// catch-alls.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());
    cfg.service(
        web::scope("/api")
            .wrap(from_fn(require_json_content_type))
            .service(
                web::scope("/admin")
                    .route("/login", web::post().to(auth_handlers::login))
                    .route("/logout", web::post().to(auth_handlers::logout))
                    .service(
                        web::resource("/responses")
                            .wrap(from_fn(require_admin))
                            .route(web::get().to(admin_handlers::list))
                            .route(web::delete().to(admin_handlers::delete)),
                    ),
            )
            .route("/responses", web::get().to(response_handlers::stats))
            .route("/responses", web::post().to(response_handlers::create))
            .route("/card/responses", web::get().to(card_handlers::stats))
            .route("/card/responses", web::post().to(card_handlers::create)),
    );
    cfg.service(actix_files::Files::new("/static", "./static"));
    cfg.route("/", web::get().to(page_handlers::card));
    cfg.route("/ask", web::get().to(page_handlers::experience));
    cfg.route("/{slug}", web::get().to(page_handlers::admin_login));
    cfg.route("/{slug}/dashboard", web::get().to(page_handlers::dashboard));
}

/// Fallback for every unmatched path.
pub async fn not_found() -> HttpResponse {
    crate::errors::not_found_page()
}
