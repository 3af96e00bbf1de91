use actix_web::{HttpRequest, HttpResponse, web};

use crate::auth::session::AdminAuth;
use crate::config::AppConfig;
use crate::errors::{AppError, not_found_page, render};
use crate::experience::card::{BUTTON_HEIGHT, BUTTON_WIDTH, yes_percent};
use crate::experience::copy::{PICKUP_LINES, QUESTIONS};
use crate::experience::flow::pick_letter_lines;
use crate::experience::settings::{CardSettings, ExperienceSettings, script_json};
use crate::models::ResponseStore;
use crate::templates_structs::{
    AdminLoginTemplate, CardTemplate, DashboardTemplate, ExperienceTemplate,
};

fn settings_json<T: serde::Serialize>(settings: &T) -> Result<String, AppError> {
    script_json(settings).map_err(|e| AppError::Internal(format!("page settings: {e}")))
}

fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

/// GET /
pub async fn card(store: web::Data<dyn ResponseStore>) -> Result<HttpResponse, AppError> {
    let tally = store.card_tally().await?;
    render(CardTemplate {
        total: tally.total,
        yes_percent: yes_percent(&tally),
        button_width: BUTTON_WIDTH,
        button_height: BUTTON_HEIGHT,
        settings_json: settings_json(&CardSettings::default())?,
    })
}

/// GET /ask
pub async fn experience() -> Result<HttpResponse, AppError> {
    render(ExperienceTemplate {
        questions: &QUESTIONS,
        pickup_lines: &PICKUP_LINES,
        letter_lines: pick_letter_lines(&mut rand::rng()),
        settings_json: settings_json(&ExperienceSettings::default())?,
    })
}

/// GET /{slug}. Anything but the configured slug is an ordinary 404.
pub async fn admin_login(
    req: HttpRequest,
    path: web::Path<String>,
    config: web::Data<AppConfig>,
    auth: web::Data<AdminAuth>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    if slug != config.admin_route_slug {
        return Ok(not_found_page());
    }
    if auth.is_authenticated(&req) {
        return Ok(see_other(format!("/{slug}/dashboard")));
    }
    render(AdminLoginTemplate { slug })
}

/// GET /{slug}/dashboard
pub async fn dashboard(
    req: HttpRequest,
    path: web::Path<String>,
    config: web::Data<AppConfig>,
    auth: web::Data<AdminAuth>,
    store: web::Data<dyn ResponseStore>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    if slug != config.admin_route_slug {
        return Ok(not_found_page());
    }
    if !auth.is_authenticated(&req) {
        return Ok(see_other(format!("/{slug}")));
    }

    let respondents = store.list_respondents().await?;
    let total_submissions = store.count_answers(None).await?;
    render(DashboardTemplate {
        slug,
        total_respondents: respondents.len(),
        total_submissions,
        respondents,
    })
}
