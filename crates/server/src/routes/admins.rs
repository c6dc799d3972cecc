use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;

use service::admin::domain::{AdminCreate, AdminRead, AdminUpdate};
use service::admin::repo::seaorm::SeaOrmAdminRepository;
use service::admin::service::AdminService;
use service::auth::domain::Role;
use service::pagination::{Page, Pagination};

use crate::errors::ApiError;
use crate::extract::AuthClaims;
use crate::state::ServerState;

fn admin_service(state: &ServerState) -> AdminService<SeaOrmAdminRepository> {
    AdminService::new(Arc::new(SeaOrmAdminRepository { db: state.db.clone() }))
}

pub async fn list(
    State(state): State<ServerState>,
    claims: AuthClaims,
    Query(params): Query<Pagination>,
) -> Result<Json<Page<AdminRead>>, ApiError> {
    claims.require_any(&[Role::Admin])?;
    let page = admin_service(&state).list(params).await?;
    Ok(Json(page))
}

pub async fn get_one(
    State(state): State<ServerState>,
    claims: AuthClaims,
    Path(id): Path<i32>,
) -> Result<Json<AdminRead>, ApiError> {
    claims.require_any(&[Role::Admin])?;
    let found = admin_service(&state).get(id).await?;
    Ok(Json(found))
}

/// Unlike patients and doctors, admin accounts can only be created by an
/// existing admin.
pub async fn register(
    State(state): State<ServerState>,
    claims: AuthClaims,
    Json(input): Json<AdminCreate>,
) -> Result<Json<AdminRead>, ApiError> {
    claims.require_any(&[Role::Admin])?;
    let created = admin_service(&state).register(input).await?;
    Ok(Json(created))
}

pub async fn update(
    State(state): State<ServerState>,
    claims: AuthClaims,
    Path(id): Path<i32>,
    Json(input): Json<AdminUpdate>,
) -> Result<Json<AdminRead>, ApiError> {
    claims.require_any(&[Role::Admin])?;
    let updated = admin_service(&state).update(id, input).await?;
    Ok(Json(updated))
}

pub async fn remove(
    State(state): State<ServerState>,
    claims: AuthClaims,
    Path(id): Path<i32>,
) -> Result<Json<i32>, ApiError> {
    claims.require_any(&[Role::Admin])?;
    let deleted = admin_service(&state).delete(id).await?;
    Ok(Json(deleted))
}
