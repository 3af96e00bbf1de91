use sqlx::{PgExecutor, PgPool};

use crate::errors::AppError;
use super::types::*;

/// Create the respondent or refresh `asked_by` on the existing (email, name)
/// row. A submitted selfie replaces the stored one; a missing one keeps it.
pub async fn upsert<'e>(
    executor: impl PgExecutor<'e>,
    input: &RespondentUpsert,
) -> Result<Respondent, AppError> {
    let respondent = sqlx::query_as::<_, Respondent>(
        "INSERT INTO respondents (email, name, asked_by, selfie_data) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (email, name) DO UPDATE SET \
             asked_by = EXCLUDED.asked_by, \
             selfie_data = COALESCE(EXCLUDED.selfie_data, respondents.selfie_data), \
             updated_at = now() \
         RETURNING email, name, asked_by, selfie_data, created_at, updated_at",
    )
    .bind(&input.email)
    .bind(&input.name)
    .bind(&input.asked_by)
    .bind(&input.selfie_data)
    .fetch_one(executor)
    .await?;
    Ok(respondent)
}

/// All respondents, most recently updated first, with their answer counts.
pub async fn find_all_with_counts(pool: &PgPool) -> Result<Vec<RespondentSummary>, AppError> {
    let rows = sqlx::query_as::<_, RespondentSummary>(
        "SELECT r.email, r.name, r.asked_by, r.selfie_data, r.created_at, r.updated_at, \
                COUNT(i.id) AS response_count \
         FROM respondents r \
         LEFT JOIN interaction_responses i \
             ON i.respondent_email = r.email AND i.respondent_name = r.name \
         GROUP BY r.email, r.name \
         ORDER BY r.updated_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Delete the respondent; answers go with it through the cascading foreign
/// key. Returns false when nothing matched.
pub async fn delete(pool: &PgPool, key: &RespondentKey) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM respondents WHERE email = $1 AND name = $2")
        .bind(&key.email)
        .bind(&key.name)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
