use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::{
    models::{Appointment, DoctorWithPatients, PatientWithDoctors},
    state::ClinicState,
};

#[derive(Serialize)]
pub struct PatientsResponse {
    pub patients: Vec<PatientWithDoctors>,
}

#[derive(Serialize)]
pub struct PatientResponse {
    pub patient: PatientWithDoctors,
}

#[derive(Serialize)]
pub struct DoctorsResponse {
    pub doctors: Vec<DoctorWithPatients>,
}

#[derive(Serialize)]
pub struct DoctorResponse {
    pub doctor: DoctorWithPatients,
}

#[derive(Serialize)]
pub struct AppointmentsResponse {
    pub appointments: Vec<Appointment>,
}

pub async fn get_patients_handler(
    State(state): State<ClinicState>,
) -> Result<Json<PatientsResponse>, (StatusCode, String)> {
    let patients = state.store.list_patients().await.map_err(|e| {
        tracing::error!("Failed to get patients: {}", e);
        e.to_response()
    })?;

    Ok(Json(PatientsResponse { patients }))
}

pub async fn get_patient_handler(
    State(state): State<ClinicState>,
    Path(patient_id): Path<i32>,
) -> Result<Json<PatientResponse>, (StatusCode, String)> {
    let patient = state.store.get_patient(patient_id).await.map_err(|e| {
        tracing::error!("Error retrieving patient {}: {}", patient_id, e);
        e.to_response()
    })?;

    Ok(Json(PatientResponse { patient }))
}

pub async fn get_doctors_handler(
    State(state): State<ClinicState>,
) -> Result<Json<DoctorsResponse>, (StatusCode, String)> {
    let doctors = state.store.list_doctors().await.map_err(|e| {
        tracing::error!("Failed to get doctors: {}", e);
        e.to_response()
    })?;

    Ok(Json(DoctorsResponse { doctors }))
}

pub async fn get_doctor_handler(
    State(state): State<ClinicState>,
    Path(doctor_id): Path<i32>,
) -> Result<Json<DoctorResponse>, (StatusCode, String)> {
    let doctor = state.store.get_doctor(doctor_id).await.map_err(|e| {
        tracing::error!("Error retrieving doctor {}: {}", doctor_id, e);
        e.to_response()
    })?;

    Ok(Json(DoctorResponse { doctor }))
}

pub async fn get_appointments_handler(
    State(state): State<ClinicState>,
) -> Result<Json<AppointmentsResponse>, (StatusCode, String)> {
    let appointments = state.store.list_appointments().await.map_err(|e| {
        tracing::error!("Failed to get appointments: {}", e);
        e.to_response()
    })?;

    Ok(Json(AppointmentsResponse { appointments }))
}
