//! Syllabus upload, topic curation, and question generation.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use studysync_extract::extract_topics_from_text;
use studysync_store::{StudyGuide, User};

use crate::auth::require_user;
use crate::error::AppError;
use crate::questions::generate_questions;
use crate::state::AppState;
use crate::template;
use crate::upload::{self, storage_filename};

/// Default number of questions when the query string doesn't say.
const DEFAULT_QUESTION_COUNT: usize = 5;
/// Upper bound on a single request's question count.
const MAX_QUESTION_COUNT: usize = 50;

pub async fn upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let user = match require_user(&state, &headers) {
        Ok(user) => user,
        Err(rejection) => return rejection.into_response(),
    };

    match handle_upload(&state, &user, multipart).await {
        Ok(guide_id) => Redirect::to(&format!("/guides/{guide_id}")).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn handle_upload(
    state: &AppState,
    user: &User,
    multipart: Multipart,
) -> Result<i64, AppError> {
    let form = upload::parse_multipart(multipart)
        .await
        .map_err(AppError::BadRequest)?;

    // Persist the raw upload first so the guide row always points at a file
    let stored_name = storage_filename(now_epoch(), &form.file.filename);
    let stored_path = state.uploads_dir.join(&stored_name);
    std::fs::write(&stored_path, &form.file.data)?;

    let text = studysync_extract::read_document_text_from_bytes(&stored_path, &form.file.data)?;
    let topics = extract_topics_from_text(&text, &state.options);
    tracing::info!(
        user_id = user.id,
        file = %form.file.filename,
        kind = ?form.file.kind,
        topics = topics.len(),
        "extracted topics from upload"
    );

    let store = state.store();
    let guide = store.create_guide(
        Some(user.id),
        &stored_path.to_string_lossy(),
        &form.file.filename,
        form.exam_board.as_deref(),
        form.year.as_deref(),
    )?;
    store.add_topics(guide.id, &topics)?;

    Ok(guide.id)
}

pub async fn view_guide(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let user = match require_user(&state, &headers) {
        Ok(user) => user,
        Err(rejection) => return rejection.into_response(),
    };

    match owned_guide(&state, &user, id) {
        Ok(guide) => {
            let topics = match state.store().topics_for_guide(guide.id) {
                Ok(topics) => topics,
                Err(e) => return AppError::from(e).into_response(),
            };
            template::render_guide(&guide, &topics).into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn update_selection(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let user = match require_user(&state, &headers) {
        Ok(user) => user,
        Err(rejection) => return rejection.into_response(),
    };

    let result = owned_guide(&state, &user, id).and_then(|guide| {
        let topic_ids = parse_topic_ids(&body);
        state.store().set_selection(guide.id, &topic_ids)?;
        Ok(guide.id)
    });

    match result {
        Ok(guide_id) => Redirect::to(&format!("/guides/{guide_id}")).into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Deserialize)]
pub struct QuestionParams {
    pub count: Option<usize>,
}

pub async fn questions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<QuestionParams>,
    headers: HeaderMap,
) -> Response {
    let user = match require_user(&state, &headers) {
        Ok(user) => user,
        Err(rejection) => return rejection.into_response(),
    };

    let count = params
        .count
        .unwrap_or(DEFAULT_QUESTION_COUNT)
        .min(MAX_QUESTION_COUNT);

    let result: Result<Html<String>, AppError> = owned_guide(&state, &user, id).and_then(|guide| {
        let titles: Vec<String> = state
            .store()
            .selected_topics(guide.id)?
            .into_iter()
            .map(|t| t.title)
            .collect();
        let questions = generate_questions(&titles, count);
        Ok(template::render_questions(&guide, &questions))
    });

    match result {
        Ok(html) => html.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Fetch a guide and check it belongs to the user; foreign and missing guides
/// are both a 404 so guide ids don't leak.
fn owned_guide(state: &AppState, user: &User, id: i64) -> Result<StudyGuide, AppError> {
    let guide = state.store().guide_by_id(id)?.ok_or(AppError::NotFound)?;
    if guide.user_id != Some(user.id) {
        return Err(AppError::NotFound);
    }
    Ok(guide)
}

/// Parse `topic=<id>` pairs out of a urlencoded checkbox form body.
/// Values are integer ids, so no percent-decoding is needed.
fn parse_topic_ids(body: &str) -> Vec<i64> {
    body.split('&')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            (name == "topic").then(|| value.parse().ok()).flatten()
        })
        .collect()
}

fn now_epoch() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
