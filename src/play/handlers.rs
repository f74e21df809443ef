use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::info;
use uuid::Uuid;

use crate::{
    common::{app_state::AppState, error::ServerError},
    play::models::{PlayError, SelectOptionRequest},
    quiz::db,
};

pub fn play_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/{quiz_id}", post(start_session))
        .route(
            "/session/{session_id}",
            get(get_session).delete(abandon_session),
        )
        .route("/session/{session_id}/select", post(select_option))
        .route("/session/{session_id}/submit", post(submit_answer))
        .route("/session/{session_id}/advance", post(advance))
        .with_state(state)
}

async fn start_session(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
    let quiz = db::get_quiz_by_id(state.get_pool(), &quiz_id)
        .await?
        .ok_or(PlayError::QuizUnavailable(quiz_id))?;

    let view = state.get_sessions().open(quiz)?;
    info!("Started play session {} for quiz {}", view.session_id, quiz_id);

    Ok((StatusCode::CREATED, Json(view)))
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
    let view = state.get_sessions().view(&session_id)?;
    Ok((StatusCode::OK, Json(view)))
}

async fn select_option(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SelectOptionRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let view = state
        .get_sessions()
        .apply(&session_id, |session| session.select_option(request.option_id))?;

    Ok((StatusCode::OK, Json(view)))
}

async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
    let view = state
        .get_sessions()
        .apply(&session_id, |session| session.submit())?;

    Ok((StatusCode::OK, Json(view)))
}

async fn advance(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
    let (moved, view) = state
        .get_sessions()
        .apply_tracked(&session_id, |session| session.advance())?;

    if let (true, Some(result)) = (moved, view.result) {
        info!(
            "Play session {} finished with {} / {}",
            session_id, result.score, result.total
        );
    }

    Ok((StatusCode::OK, Json(view)))
}

async fn abandon_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
    state.get_sessions().close(&session_id)?;
    Ok(StatusCode::NO_CONTENT)
}
