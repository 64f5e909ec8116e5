use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i32,
    pub name: String,
    pub specialty: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The doctor columns exposed when listing a patient's doctors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DoctorSummary {
    pub name: String,
    pub specialty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorWithPatients {
    #[serde(flatten)]
    pub doctor: Doctor,
    pub patients: Vec<super::patient::PatientSummary>,
}
