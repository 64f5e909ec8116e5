use async_trait::async_trait;

use crate::{
    errors::AppError,
    models::{
        Appointment, DoctorWithPatients, Fruit, FruitChanges, FruitDetail, NewFruit,
        PatientWithDoctors, Season,
    },
};

/// Queries behind the clinic JSON API.
#[async_trait]
pub trait ClinicStore: Send + Sync {
    async fn list_patients(&self) -> Result<Vec<PatientWithDoctors>, AppError>;

    async fn get_patient(&self, patient_id: i32) -> Result<PatientWithDoctors, AppError>;

    async fn list_doctors(&self) -> Result<Vec<DoctorWithPatients>, AppError>;

    async fn get_doctor(&self, doctor_id: i32) -> Result<DoctorWithPatients, AppError>;

    async fn list_appointments(&self) -> Result<Vec<Appointment>, AppError>;
}

/// Queries behind the orchard HTML app.
#[async_trait]
pub trait OrchardStore: Send + Sync {
    async fn list_fruits(&self) -> Result<Vec<Fruit>, AppError>;

    async fn get_fruit(&self, fruit_id: i32) -> Result<FruitDetail, AppError>;

    async fn create_fruit(&self, new_fruit: NewFruit) -> Result<Fruit, AppError>;

    /// Applies `changes` and, when `changes.season_id` is set, associates that
    /// season with the fruit. Either both happen or neither does.
    async fn update_fruit(&self, fruit_id: i32, changes: FruitChanges)
    -> Result<Fruit, AppError>;

    async fn delete_fruit(&self, fruit_id: i32) -> Result<(), AppError>;

    async fn list_seasons(&self) -> Result<Vec<Season>, AppError>;
}
