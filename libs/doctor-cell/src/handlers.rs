use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use shared_database::FixtureStore;
use shared_models::error::AppError;

use crate::models::{DoctorError, DoctorSearchFilters};
use crate::services::DoctorSearchService;

#[derive(Debug, Default, Deserialize)]
pub struct DoctorSearchQuery {
    pub specialty: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
    pub min_rating: Option<f32>,
    pub max_fee: Option<f64>,
}

impl From<DoctorSearchQuery> for DoctorSearchFilters {
    fn from(query: DoctorSearchQuery) -> Self {
        Self {
            specialty: query.specialty,
            location: query.location,
            search: query.search,
            min_rating: query.min_rating,
            max_fee: query.max_fee,
        }
    }
}

impl From<DoctorError> for AppError {
    fn from(e: DoctorError) -> Self {
        match e {
            DoctorError::NotFound => AppError::NotFound(e.to_string()),
            DoctorError::ValidationError(msg) => AppError::ValidationError(msg),
        }
    }
}

#[axum::debug_handler]
pub async fn search_doctors(
    State(fixtures): State<Arc<FixtureStore>>,
    Query(query): Query<DoctorSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let search_service = DoctorSearchService::new(fixtures);

    let doctors = search_service.search(&query.into())?;

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn get_filter_options(
    State(fixtures): State<Arc<FixtureStore>>,
) -> Result<Json<Value>, AppError> {
    let search_service = DoctorSearchService::new(fixtures);

    Ok(Json(json!(search_service.filter_options())))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(fixtures): State<Arc<FixtureStore>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    debug!("Fetching doctor profile: {}", doctor_id);
    let search_service = DoctorSearchService::new(fixtures);

    let doctor = search_service.get_doctor(&doctor_id)?;

    Ok(Json(json!(doctor)))
}
