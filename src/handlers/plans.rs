use axum::extract::State;

use crate::db::{queries, AppState};
use crate::error::Result;
use crate::extractors::Json;
use crate::models::Plan;

/// List the active plan catalog.
pub async fn list_plans(State(state): State<AppState>) -> Result<Json<Vec<Plan>>> {
    let conn = state.db.get()?;
    let plans = queries::list_active_plans(&conn)?;
    Ok(Json(plans))
}
