use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::models::Identity,
    common::{app_state::AppState, error::ServerError},
    quiz::{
        db,
        models::{
            AddQuestionRequest, CreateQuizRequest, CreatedResponse, QuestionRequest,
            UpdateQuizRequest,
        },
    },
};

pub fn quiz_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_quiz).get(list_own_quizzes))
        .route(
            "/{quiz_id}",
            get(get_quiz).patch(update_quiz).delete(delete_quiz),
        )
        .with_state(state)
}

pub fn question_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(add_question))
        .route(
            "/{question_id}",
            patch(update_question).delete(delete_question),
        )
        .with_state(state)
}

async fn ensure_quiz_owner(
    state: &AppState,
    identity: &Identity,
    quiz_id: &Uuid,
) -> Result<(), ServerError> {
    let Some(owner_id) = db::get_quiz_owner(state.get_pool(), quiz_id).await? else {
        return Err(ServerError::NotFound(format!(
            "Quiz with id {} does not exist",
            quiz_id
        )));
    };

    if !identity.owns(&owner_id) {
        warn!("User {} tried to modify quiz {}", identity.user_id, quiz_id);
        return Err(ServerError::AccessDenied);
    }

    Ok(())
}

async fn ensure_question_owner(
    state: &AppState,
    identity: &Identity,
    question_id: &Uuid,
) -> Result<(), ServerError> {
    let Some(owner_id) = db::get_question_owner(state.get_pool(), question_id).await? else {
        return Err(ServerError::NotFound(format!(
            "Question with id {} does not exist",
            question_id
        )));
    };

    if !identity.owns(&owner_id) {
        warn!(
            "User {} tried to modify question {}",
            identity.user_id, question_id
        );
        return Err(ServerError::AccessDenied);
    }

    Ok(())
}

/* Quiz handlers */

async fn create_quiz(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, ServerError> {
    request.validate()?;

    let id = db::create_quiz(state.get_pool(), &identity.user_id, &request).await?;
    info!("User {} created quiz {}", identity.user_id, id);

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

async fn list_own_quizzes(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, ServerError> {
    let quizzes = db::list_quizzes_by_owner(state.get_pool(), &identity.user_id).await?;
    Ok((StatusCode::OK, Json(quizzes)))
}

async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(quiz_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
    let quiz = db::get_quiz_by_id(state.get_pool(), &quiz_id)
        .await?
        .ok_or(ServerError::NotFound(format!(
            "Quiz with id {} does not exist",
            quiz_id
        )))?;

    if !identity.can_read(&quiz.owner_id) {
        return Err(ServerError::AccessDenied);
    }

    Ok((StatusCode::OK, Json(quiz)))
}

async fn update_quiz(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(quiz_id): Path<Uuid>,
    Json(request): Json<UpdateQuizRequest>,
) -> Result<impl IntoResponse, ServerError> {
    request.validate()?;
    ensure_quiz_owner(&state, &identity, &quiz_id).await?;

    db::update_quiz(state.get_pool(), &quiz_id, &request).await?;
    Ok(StatusCode::OK)
}

async fn delete_quiz(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(quiz_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
    ensure_quiz_owner(&state, &identity, &quiz_id).await?;

    db::delete_quiz(state.get_pool(), &quiz_id).await?;
    info!("User {} deleted quiz {}", identity.user_id, quiz_id);
    Ok(StatusCode::OK)
}

/* Question handlers */

async fn add_question(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<AddQuestionRequest>,
) -> Result<impl IntoResponse, ServerError> {
    request.question.validate()?;
    ensure_quiz_owner(&state, &identity, &request.quiz_id).await?;

    let id = db::add_question(state.get_pool(), &request.quiz_id, &request.question).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

async fn update_question(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(question_id): Path<Uuid>,
    Json(request): Json<QuestionRequest>,
) -> Result<impl IntoResponse, ServerError> {
    request.validate()?;
    ensure_question_owner(&state, &identity, &question_id).await?;

    db::update_question(state.get_pool(), &question_id, &request).await?;
    Ok(StatusCode::OK)
}

async fn delete_question(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(question_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
    ensure_question_owner(&state, &identity, &question_id).await?;

    db::delete_question(state.get_pool(), &question_id).await?;
    Ok(StatusCode::OK)
}
