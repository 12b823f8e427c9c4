use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;

use crate::auth;
use crate::error::AppError;
use crate::state::AppState;
use crate::template;

pub async fn index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let user = auth::current_user(&state, &headers)?;
    let guides = match &user {
        Some(user) => state.store().guides_for_user(user.id)?,
        None => Vec::new(),
    };
    Ok(template::render_index(user.as_ref(), &guides))
}
