use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Appointment, AppointmentDraft, AppointmentType};
use crate::state::AppState;

const LIST_LIMIT: i64 = 50;

#[derive(Deserialize)]
pub struct CreateAppointmentRequest {
    pub user_id: i64,
    pub title: String,
    pub appointment_date: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub appointment_type: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct CreateAppointmentResponse {
    pub appointment_id: i64,
    pub appointment: Appointment,
}

fn parse_appointment_date(s: &str) -> Result<NaiveDateTime, AppError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .map_err(|_| AppError::BadRequest(format!("invalid appointment_date: {s}")))
}

// POST /appointments
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<Json<CreateAppointmentResponse>, AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".to_string()));
    }
    let duration_minutes = payload.duration_minutes.unwrap_or(60);
    if duration_minutes <= 0 {
        return Err(AppError::BadRequest(
            "duration_minutes must be positive".to_string(),
        ));
    }

    let draft = AppointmentDraft {
        title: payload.title.trim().to_string(),
        description: payload.description.unwrap_or_default(),
        appointment_type: AppointmentType::parse(
            payload.appointment_type.as_deref().unwrap_or("general"),
        ),
        appointment_date: parse_appointment_date(&payload.appointment_date)?,
        duration_minutes,
        location: payload.location,
        notes: payload.notes,
    };

    let db = state.db.lock().unwrap();
    let id = queries::create_appointment(&db, payload.user_id, &draft)?;
    let appointment = queries::get_appointment_by_id(&db, id)?
        .ok_or_else(|| AppError::NotFound(format!("appointment {id}")))?;

    tracing::info!(appointment = id, user = payload.user_id, "appointment created via API");

    Ok(Json(CreateAppointmentResponse {
        appointment_id: id,
        appointment,
    }))
}

// GET /appointments/:user_id
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let db = state.db.lock().unwrap();
    let appointments = queries::get_appointments_for_user(&db, user_id, LIST_LIMIT)?;
    Ok(Json(appointments))
}
