use std::collections::HashMap;

use sqlx::{FromRow, PgPool};

use crate::{
    errors::AppError,
    models::{
        Appointment, Doctor, DoctorSummary, DoctorWithPatients, Patient, PatientSummary,
        PatientWithDoctors,
    },
};

#[derive(FromRow)]
struct PatientDoctorRow {
    patient_id: i32,
    name: String,
    specialty: String,
}

#[derive(FromRow)]
struct DoctorPatientRow {
    doctor_id: i32,
    name: String,
}

pub async fn get_all_patients(postgres: PgPool) -> Result<Vec<PatientWithDoctors>, AppError> {
    let patients = sqlx::query_as::<_, Patient>(
        "SELECT id, name, created_at, updated_at FROM patients ORDER BY id",
    )
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to fetch patients", e))?;

    // Distinct so that two appointments with the same doctor list them once
    let rows = sqlx::query_as::<_, PatientDoctorRow>(
        "SELECT DISTINCT a.patient_id, d.id AS doctor_id, d.name, d.specialty
			FROM appointments a
			JOIN doctors d ON d.id = a.doctor_id
			ORDER BY patient_id, doctor_id",
    )
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to fetch patient doctors", e))?;

    let mut doctors_by_patient: HashMap<i32, Vec<DoctorSummary>> = HashMap::new();
    for row in rows {
        doctors_by_patient
            .entry(row.patient_id)
            .or_default()
            .push(DoctorSummary {
                name: row.name,
                specialty: row.specialty,
            });
    }

    Ok(patients
        .into_iter()
        .map(|patient| PatientWithDoctors {
            doctors: doctors_by_patient.remove(&patient.id).unwrap_or_default(),
            patient,
        })
        .collect())
}

pub async fn get_patient_by_id(
    patient_id: i32,
    postgres: PgPool,
) -> Result<PatientWithDoctors, AppError> {
    let patient = sqlx::query_as::<_, Patient>(
        "SELECT id, name, created_at, updated_at FROM patients WHERE id = $1",
    )
    .bind(patient_id)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to fetch patient", e))?
    .ok_or_else(|| AppError::NotFound(format!("Patient {} not found", patient_id)))?;

    let doctors = sqlx::query_as::<_, DoctorSummary>(
        "SELECT name, specialty
			FROM doctors
			WHERE id IN (SELECT doctor_id FROM appointments WHERE patient_id = $1)
			ORDER BY id",
    )
    .bind(patient_id)
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to fetch patient doctors", e))?;

    Ok(PatientWithDoctors { patient, doctors })
}

pub async fn get_all_doctors(postgres: PgPool) -> Result<Vec<DoctorWithPatients>, AppError> {
    let doctors = sqlx::query_as::<_, Doctor>(
        "SELECT id, name, specialty, created_at, updated_at FROM doctors ORDER BY id",
    )
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to fetch doctors", e))?;

    let rows = sqlx::query_as::<_, DoctorPatientRow>(
        "SELECT DISTINCT a.doctor_id, p.id AS patient_id, p.name
			FROM appointments a
			JOIN patients p ON p.id = a.patient_id
			ORDER BY doctor_id, patient_id",
    )
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to fetch doctor patients", e))?;

    let mut patients_by_doctor: HashMap<i32, Vec<PatientSummary>> = HashMap::new();
    for row in rows {
        patients_by_doctor
            .entry(row.doctor_id)
            .or_default()
            .push(PatientSummary { name: row.name });
    }

    Ok(doctors
        .into_iter()
        .map(|doctor| DoctorWithPatients {
            patients: patients_by_doctor.remove(&doctor.id).unwrap_or_default(),
            doctor,
        })
        .collect())
}

pub async fn get_doctor_by_id(
    doctor_id: i32,
    postgres: PgPool,
) -> Result<DoctorWithPatients, AppError> {
    let doctor = sqlx::query_as::<_, Doctor>(
        "SELECT id, name, specialty, created_at, updated_at FROM doctors WHERE id = $1",
    )
    .bind(doctor_id)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to fetch doctor", e))?
    .ok_or_else(|| AppError::NotFound(format!("Doctor {} not found", doctor_id)))?;

    let patients = sqlx::query_as::<_, PatientSummary>(
        "SELECT name
			FROM patients
			WHERE id IN (SELECT patient_id FROM appointments WHERE doctor_id = $1)
			ORDER BY id",
    )
    .bind(doctor_id)
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to fetch doctor patients", e))?;

    Ok(DoctorWithPatients { doctor, patients })
}

pub async fn get_all_appointments(postgres: PgPool) -> Result<Vec<Appointment>, AppError> {
    sqlx::query_as::<_, Appointment>(
        "SELECT id, reason, doctor_id, patient_id, created_at, updated_at
			FROM appointments
			ORDER BY id",
    )
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to fetch appointments", e))
}
