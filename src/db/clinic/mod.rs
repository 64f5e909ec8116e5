pub mod get;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::store::ClinicStore,
    errors::AppError,
    models::{Appointment, DoctorWithPatients, PatientWithDoctors},
};

#[async_trait]
impl ClinicStore for PgPool {
    async fn list_patients(&self) -> Result<Vec<PatientWithDoctors>, AppError> {
        get::get_all_patients(self.clone()).await
    }

    async fn get_patient(&self, patient_id: i32) -> Result<PatientWithDoctors, AppError> {
        get::get_patient_by_id(patient_id, self.clone()).await
    }

    async fn list_doctors(&self) -> Result<Vec<DoctorWithPatients>, AppError> {
        get::get_all_doctors(self.clone()).await
    }

    async fn get_doctor(&self, doctor_id: i32) -> Result<DoctorWithPatients, AppError> {
        get::get_doctor_by_id(doctor_id, self.clone()).await
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, AppError> {
        get::get_all_appointments(self.clone()).await
    }
}
