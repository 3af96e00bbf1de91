// Template context structures for the askama pages.

use askama::Template;

use crate::experience::copy::Question;
use crate::models::respondent::RespondentSummary;

/// Public landing page: one question, two buttons.
#[derive(Template)]
#[template(path = "card.html")]
pub struct CardTemplate {
    pub total: i64,
    pub yes_percent: u8,
    pub button_width: f64,
    pub button_height: f64,
    /// `CardSettings` as script-safe JSON.
    pub settings_json: String,
}

/// The multi-question flow.
#[derive(Template)]
#[template(path = "experience.html")]
pub struct ExperienceTemplate {
    pub questions: &'static [Question],
    pub pickup_lines: &'static [&'static str],
    /// Drawn once per page view; shown under "Dear {name}," at the end.
    pub letter_lines: Vec<&'static str>,
    /// `ExperienceSettings` as script-safe JSON.
    pub settings_json: String,
}

#[derive(Template)]
#[template(path = "admin_login.html")]
pub struct AdminLoginTemplate {
    pub slug: String,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub slug: String,
    pub total_respondents: usize,
    pub total_submissions: i64,
    pub respondents: Vec<RespondentSummary>,
}
