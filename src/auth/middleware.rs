use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};

use super::session::{AdminAuth, COOKIE_NAME};

/// Middleware function that checks for a valid admin session cookie.
/// API callers get a JSON 401; the dashboard script redirects on it.
pub async fn require_admin(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let authenticated = match req.app_data::<web::Data<AdminAuth>>() {
        Some(auth) => req
            .cookie(COOKIE_NAME)
            .is_some_and(|cookie| auth.verify(cookie.value())),
        None => {
            log::error!("AdminAuth missing from app data, refusing admin request");
            false
        }
    };

    if !authenticated {
        let response = HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Unauthorized" }));
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}
