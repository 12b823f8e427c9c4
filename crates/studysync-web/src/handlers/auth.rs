//! Registration, login, and logout.

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use studysync_store::StoreError;

use crate::auth::{clear_session_cookie, session_cookie, session_token};
use crate::error::AppError;
use crate::state::AppState;
use crate::template;

#[derive(Deserialize)]
pub struct RegisterForm {
    pub display_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub async fn register_page() -> Html<String> {
    template::render_register(None)
}

pub async fn login_page() -> Html<String> {
    template::render_login(None)
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let email = form.email.trim().to_lowercase();
    let display_name = form.display_name.trim();

    if email.is_empty() || display_name.is_empty() || form.password.is_empty() {
        return Ok(template::render_register(Some("All fields are required.")).into_response());
    }

    let store = state.store();
    match store.create_user(&email, &form.password, display_name) {
        Ok(user) => {
            let token = store.create_session(user.id)?;
            Ok(logged_in_response(&token))
        }
        Err(StoreError::EmailTaken) => Ok(template::render_register(Some(
            "That email is already registered.",
        ))
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let email = form.email.trim().to_lowercase();

    let store = state.store();
    match store.verify_login(&email, &form.password)? {
        Some(user) => {
            let token = store.create_session(user.id)?;
            tracing::info!(user_id = user.id, "logged in");
            Ok(logged_in_response(&token))
        }
        None => Ok(template::render_login(Some("Unknown email or wrong password.")).into_response()),
    }
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if let Some(token) = session_token(&headers) {
        state.store().delete_session(&token)?;
    }
    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        Redirect::to("/"),
    )
        .into_response())
}

fn logged_in_response(token: &str) -> Response {
    (
        [(header::SET_COOKIE, session_cookie(token))],
        Redirect::to("/"),
    )
        .into_response()
}
