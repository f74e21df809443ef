use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::{info, warn};

use crate::{
    admin::models::{AdminQuizSummary, OwnerProfile},
    auth::models::Identity,
    common::{app_state::AppState, error::ServerError, models::PageQuery},
    config::config::CONFIG,
    quiz::db,
};

pub fn admin_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/quizzes", get(list_all_quizzes))
        .with_state(state)
}

async fn list_all_quizzes(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ServerError> {
    if !identity.is_admin {
        warn!("User {} tried to list all quizzes", identity.user_id);
        return Err(ServerError::AccessDenied);
    }

    info!("Admin listing quizzes, page {}", query.page_num);
    let page =
        db::list_all_quizzes(state.get_pool(), query.page_num, CONFIG.server.page_size).await?;

    let mut owner_ids: Vec<String> = page.items().iter().map(|q| q.owner_id.clone()).collect();
    owner_ids.sort();
    owner_ids.dedup();

    let owners = lookup_owners(&state, &owner_ids).await;
    let page = page.map(|quiz| AdminQuizSummary::resolve(quiz, &owners));

    Ok((StatusCode::OK, Json(page)))
}

/// Owner lookup failures degrade to unresolved owners instead of failing the listing.
async fn lookup_owners(state: &AppState, owner_ids: &[String]) -> HashMap<String, OwnerProfile> {
    let Some(directory) = state.get_directory() else {
        return HashMap::new();
    };

    match directory.fetch_users(state.get_client(), owner_ids).await {
        Ok(users) => users
            .into_iter()
            .map(|user| (user.id.clone(), user.into_profile()))
            .collect(),
        Err(e) => {
            warn!("Failed to resolve quiz owners: {}", e);
            HashMap::new()
        }
    }
}
