use chrono::{DateTime, Utc};
use serde::Serialize;

/// A unique (email, name) identity that has answered at least once.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Respondent {
    pub email: String,
    pub name: String,
    pub asked_by: Option<String>,
    pub selfie_data: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for create-or-update on the (email, name) key. `email` is expected
/// to be normalized already.
#[derive(Debug, Clone)]
pub struct RespondentUpsert {
    pub email: String,
    pub name: String,
    pub asked_by: String,
    pub selfie_data: Option<String>,
}

/// Dashboard row: the respondent plus how many answers they submitted.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RespondentSummary {
    pub email: String,
    pub name: String,
    pub asked_by: Option<String>,
    pub selfie_data: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub response_count: i64,
}

/// Identity of a respondent, as sent by the dashboard's delete call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondentKey {
    pub email: String,
    pub name: String,
}

impl RespondentKey {
    /// Trim both parts and lowercase the email. Returns `None` when either
    /// part ends up empty.
    pub fn normalized(email: &str, name: &str) -> Option<Self> {
        let email = email.trim().to_lowercase();
        let name = name.trim().to_string();
        if email.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self { email, name })
    }
}
