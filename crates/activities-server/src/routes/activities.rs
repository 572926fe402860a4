use activities_core::{Activity, Confirmation, Listing};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

/// Raw query pairs, kept in request order.
type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// The last `email` value in the query string. Only presence is checked; a
/// repeated `email` is not an error.
fn email_param(query: QueryPairs) -> Result<String, AppError> {
    let Query(pairs) = query.map_err(|e| AppError::unprocessable(e.body_text()))?;
    pairs
        .into_iter()
        .rev()
        .find(|(key, _)| key == "email")
        .map(|(_, value)| value)
        .ok_or_else(|| AppError::unprocessable("query parameter 'email' is required"))
}

/// GET /activities: every activity keyed by name, in seed order.
pub async fn list_activities(State(app): State<AppState>) -> Json<Listing> {
    Json(app.directory.list())
}

/// GET /activities/{name}: a single activity record.
pub async fn get_activity(
    State(app): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Activity>, AppError> {
    let activity = app.directory.get(&name)?;
    Ok(Json(activity))
}

/// POST /activities/{name}/signup?email=: add a participant.
pub async fn sign_up(
    State(app): State<AppState>,
    Path(name): Path<String>,
    query: QueryPairs,
) -> Result<Json<Confirmation>, AppError> {
    let email = email_param(query)?;
    match app.directory.sign_up(&name, &email) {
        Ok(confirmation) => {
            tracing::info!(activity = %name, email = %email, "participant signed up");
            Ok(Json(confirmation))
        }
        Err(e) => {
            tracing::debug!(activity = %name, email = %email, "signup rejected: {e}");
            Err(e.into())
        }
    }
}

/// POST /activities/{name}/unregister?email=: remove a participant.
pub async fn unregister(
    State(app): State<AppState>,
    Path(name): Path<String>,
    query: QueryPairs,
) -> Result<Json<Confirmation>, AppError> {
    let email = email_param(query)?;
    match app.directory.unregister(&name, &email) {
        Ok(confirmation) => {
            tracing::info!(activity = %name, email = %email, "participant unregistered");
            Ok(Json(confirmation))
        }
        Err(e) => {
            tracing::debug!(activity = %name, email = %email, "unregister rejected: {e}");
            Err(e.into())
        }
    }
}
