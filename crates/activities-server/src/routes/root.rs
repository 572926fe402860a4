use axum::response::Redirect;

pub const STATIC_INDEX: &str = "/static/index.html";

/// GET /: temporary redirect to the static UI.
pub async fn index() -> Redirect {
    Redirect::temporary(STATIC_INDEX)
}
