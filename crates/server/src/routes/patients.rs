use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use service::auth::domain::Role;
use service::doctor::repo::seaorm::SeaOrmDoctorRepository;
use service::pagination::{Page, Pagination};
use service::patient::domain::{PatientCreate, PatientRead, PatientUpdate};
use service::patient::repo::seaorm::SeaOrmPatientRepository;
use service::patient::service::PatientService;

use crate::errors::ApiError;
use crate::extract::AuthClaims;
use crate::state::ServerState;

const STAFF: [Role; 2] = [Role::Doctor, Role::Admin];

#[derive(Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

fn patient_service(
    state: &ServerState,
) -> PatientService<SeaOrmPatientRepository, SeaOrmDoctorRepository> {
    PatientService::new(
        Arc::new(SeaOrmPatientRepository { db: state.db.clone() }),
        Arc::new(SeaOrmDoctorRepository { db: state.db.clone() }),
    )
}

pub async fn list(
    State(state): State<ServerState>,
    claims: AuthClaims,
    Query(params): Query<Pagination>,
) -> Result<Json<Page<PatientRead>>, ApiError> {
    claims.require_any(&STAFF)?;
    let page = patient_service(&state).list(params).await?;
    Ok(Json(page))
}

pub async fn search(
    State(state): State<ServerState>,
    claims: AuthClaims,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<PatientRead>>, ApiError> {
    claims.require_any(&STAFF)?;
    let found = patient_service(&state).search(&q.query).await?;
    Ok(Json(found))
}

pub async fn get_one(
    State(state): State<ServerState>,
    claims: AuthClaims,
    Path(id): Path<i32>,
) -> Result<Json<PatientRead>, ApiError> {
    claims.require_any(&Role::ANY)?;
    let found = patient_service(&state).get(id).await?;
    Ok(Json(found))
}

/// Open signup; the created record is returned without the password hash.
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<PatientCreate>,
) -> Result<Json<PatientRead>, ApiError> {
    let created = patient_service(&state).register(input).await?;
    Ok(Json(created))
}

pub async fn update(
    State(state): State<ServerState>,
    claims: AuthClaims,
    Path(id): Path<i32>,
    Json(input): Json<PatientUpdate>,
) -> Result<Json<PatientRead>, ApiError> {
    claims.require_any(&STAFF)?;
    let updated = patient_service(&state).update(id, input).await?;
    Ok(Json(updated))
}

pub async fn remove(
    State(state): State<ServerState>,
    claims: AuthClaims,
    Path(id): Path<i32>,
) -> Result<Json<i32>, ApiError> {
    claims.require_any(&STAFF)?;
    let deleted = patient_service(&state).delete(id).await?;
    Ok(Json(deleted))
}
