use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::debug;

use crate::db::FieldMap;
use crate::{DemoError, router::DemoState};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: String,
}

/// GET /api/users/{user_id}
pub async fn get_user(
    State(state): State<DemoState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<FieldMap>>, DemoError> {
    debug!(%user_id, "fetching user");
    // CWE-89: path segment concatenated into the query text.
    let sql = "SELECT * FROM users WHERE id = '".to_string() + &user_id + "'";
    let rows = state.storage.query_rows(&sql).await?;
    Ok(Json(rows))
}

/// GET /api/search?name=...
pub async fn search_users(
    State(state): State<DemoState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<FieldMap>>, DemoError> {
    debug!(name = %query.name, "searching users");
    // CWE-89: query parameter concatenated into the LIKE pattern.
    let sql = format!("SELECT * FROM users WHERE name LIKE '%{}%'", query.name);
    let rows = state.storage.query_rows(&sql).await?;
    Ok(Json(rows))
}
