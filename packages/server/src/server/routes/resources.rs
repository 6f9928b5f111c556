//! Resource routes: partial update, voting, click tracking, fetch.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path};
use axum::Json;
use serde_json::{json, Value};

use crate::common::{ApiError, FieldError, ResourceId};
use crate::domains::resources::models::VoteDirection;
use crate::domains::resources::{actions, UpdateResourceInput};
use crate::server::app::AppState;
use crate::server::middleware::AuthKey;

/// PUT /api/v1/resources/{id}
///
/// Applies a partial update. Validation happens before any side effect; a
/// non-object body or wrong-typed field never reaches the mutation engine.
pub async fn update_resource_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthKey>>,
    Path(id): Path<ResourceId>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    auth.ok_or(ApiError::Unauthorized)?;

    // A missing or syntactically broken body is a validation failure, same
    // as a wrong-typed field
    let Json(body) =
        body.map_err(|rej| ApiError::validation(vec![FieldError::new("body", rej.body_text())]))?;

    let input = UpdateResourceInput::from_value(&body).map_err(ApiError::validation)?;
    let resource = actions::apply_update(id, input, &state.server_deps).await?;

    Ok(Json(json!({ "data": resource })))
}

/// PUT /api/v1/resources/{id}/{direction}
///
/// Casts a vote. The direction segment must be exactly "upvote" or
/// "downvote"; anything else is a 404 before the ledger is touched.
pub async fn vote_resource_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthKey>>,
    Path((id, direction)): Path<(ResourceId, String)>,
) -> Result<Json<Value>, ApiError> {
    let Extension(auth) = auth.ok_or(ApiError::Unauthorized)?;
    let direction: VoteDirection = direction.parse().map_err(|_| ApiError::NotFound)?;

    let resource = actions::cast_vote(id, direction, &auth.apikey, &state.server_deps).await?;

    Ok(Json(json!({ "data": resource })))
}

/// PUT /api/v1/resources/{id}/click
///
/// Counts a click. No credential required.
pub async fn click_resource_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<ResourceId>,
) -> Result<Json<Value>, ApiError> {
    let resource = actions::add_click(id, &state.server_deps).await?;

    Ok(Json(json!({ "data": resource })))
}

/// GET /api/v1/resources/{id}
pub async fn get_resource_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<ResourceId>,
) -> Result<Json<Value>, ApiError> {
    let resource = actions::get_resource(id, &state.db_pool).await?;

    Ok(Json(json!({ "data": resource })))
}
