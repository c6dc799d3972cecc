use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;

use service::auth::domain::Role;
use service::doctor::domain::{DoctorCreate, DoctorRead, DoctorUpdate};
use service::doctor::repo::seaorm::SeaOrmDoctorRepository;
use service::doctor::service::DoctorService;
use service::pagination::{Page, Pagination};
use service::patient::domain::PatientRead;

use super::patients::SearchQuery;
use crate::errors::ApiError;
use crate::extract::AuthClaims;
use crate::state::ServerState;

const STAFF: [Role; 2] = [Role::Doctor, Role::Admin];

fn doctor_service(state: &ServerState) -> DoctorService<SeaOrmDoctorRepository> {
    DoctorService::new(Arc::new(SeaOrmDoctorRepository { db: state.db.clone() }))
}

pub async fn list(
    State(state): State<ServerState>,
    claims: AuthClaims,
    Query(params): Query<Pagination>,
) -> Result<Json<Page<DoctorRead>>, ApiError> {
    claims.require_any(&Role::ANY)?;
    let page = doctor_service(&state).list(params).await?;
    Ok(Json(page))
}

pub async fn search(
    State(state): State<ServerState>,
    claims: AuthClaims,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<DoctorRead>>, ApiError> {
    claims.require_any(&STAFF)?;
    let found = doctor_service(&state).search(&q.query).await?;
    Ok(Json(found))
}

pub async fn get_by_iin(
    State(state): State<ServerState>,
    claims: AuthClaims,
    Path(iin): Path<String>,
) -> Result<Json<DoctorRead>, ApiError> {
    claims.require_any(&STAFF)?;
    let found = doctor_service(&state).get_by_iin(&iin).await?;
    Ok(Json(found))
}

pub async fn get_one(
    State(state): State<ServerState>,
    claims: AuthClaims,
    Path(id): Path<i32>,
) -> Result<Json<DoctorRead>, ApiError> {
    claims.require_any(&Role::ANY)?;
    let found = doctor_service(&state).get(id).await?;
    Ok(Json(found))
}

pub async fn patients_of(
    State(state): State<ServerState>,
    claims: AuthClaims,
    Path(id): Path<i32>,
    Query(params): Query<Pagination>,
) -> Result<Json<Page<PatientRead>>, ApiError> {
    claims.require_any(&STAFF)?;
    let page = doctor_service(&state).patients(id, params).await?;
    Ok(Json(page))
}

/// Open signup; the created record is returned without the password hash.
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<DoctorCreate>,
) -> Result<Json<DoctorRead>, ApiError> {
    let created = doctor_service(&state).register(input).await?;
    Ok(Json(created))
}

pub async fn update(
    State(state): State<ServerState>,
    claims: AuthClaims,
    Path(id): Path<i32>,
    Json(input): Json<DoctorUpdate>,
) -> Result<Json<DoctorRead>, ApiError> {
    claims.require_any(&[Role::Admin])?;
    let updated = doctor_service(&state).update(id, input).await?;
    Ok(Json(updated))
}

pub async fn remove(
    State(state): State<ServerState>,
    claims: AuthClaims,
    Path(id): Path<i32>,
) -> Result<Json<i32>, ApiError> {
    claims.require_any(&[Role::Admin])?;
    let deleted = doctor_service(&state).delete(id).await?;
    Ok(Json(deleted))
}
