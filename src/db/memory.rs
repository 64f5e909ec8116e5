use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::{
    db::{
        seed,
        store::{ClinicStore, OrchardStore},
    },
    errors::AppError,
    models::{
        Appointment, Doctor, DoctorSummary, DoctorWithPatients, Fruit, FruitChanges, FruitDetail,
        NewFruit, Patient, PatientSummary, PatientWithDoctors, Season, SeasonFruit, User,
    },
};

#[derive(Debug, Default)]
struct ClinicTables {
    doctors: Vec<Doctor>,
    patients: Vec<Patient>,
    appointments: Vec<Appointment>,
}

#[derive(Debug, Default)]
struct OrchardTables {
    users: Vec<User>,
    fruits: Vec<Fruit>,
    seasons: Vec<Season>,
    season_fruits: Vec<SeasonFruit>,
    next_fruit_id: i32,
    next_season_fruit_id: i32,
}

/// Table-per-`Vec` store with the same contract as the Postgres one.
/// Rows stay ordered by id because ids only grow.
#[derive(Debug, Default)]
pub struct MemoryStore {
    clinic: Mutex<ClinicTables>,
    orchard: Mutex<OrchardTables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the same fixture rows the seeders insert.
    pub fn seeded() -> Self {
        let now = Utc::now();

        let doctors = seed::DOCTORS
            .iter()
            .zip(1..)
            .map(|((name, specialty), id)| Doctor {
                id,
                name: name.to_string(),
                specialty: specialty.to_string(),
                created_at: now,
                updated_at: now,
            })
            .collect();
        let patients = seed::PATIENTS
            .iter()
            .zip(1..)
            .map(|(name, id)| Patient {
                id,
                name: name.to_string(),
                created_at: now,
                updated_at: now,
            })
            .collect();
        let appointments = seed::APPOINTMENTS
            .iter()
            .zip(1..)
            .map(|((reason, doctor, patient), id)| Appointment {
                id,
                reason: reason.to_string(),
                doctor_id: *doctor as i32 + 1,
                patient_id: *patient as i32 + 1,
                created_at: now,
                updated_at: now,
            })
            .collect();

        let users = seed::USERS
            .iter()
            .zip(1..)
            .map(|(name, id)| User {
                id,
                name: name.to_string(),
                created_at: now,
                updated_at: now,
            })
            .collect();
        let fruits: Vec<Fruit> = seed::FRUITS
            .iter()
            .zip(1..)
            .map(|((name, color, ready_to_eat, user), id)| Fruit {
                id,
                name: name.to_string(),
                color: color.to_string(),
                ready_to_eat: *ready_to_eat,
                user_id: Some(*user as i32 + 1),
                created_at: now,
                updated_at: now,
            })
            .collect();
        let seasons = seed::SEASONS
            .iter()
            .zip(1..)
            .map(|(name, id)| Season {
                id,
                name: name.to_string(),
                created_at: now,
                updated_at: now,
            })
            .collect();

        Self {
            clinic: Mutex::new(ClinicTables {
                doctors,
                patients,
                appointments,
            }),
            orchard: Mutex::new(OrchardTables {
                users,
                next_fruit_id: fruits.len() as i32 + 1,
                fruits,
                seasons,
                season_fruits: Vec::new(),
                next_season_fruit_id: 1,
            }),
        }
    }
}

impl ClinicTables {
    fn doctors_of(&self, patient_id: i32) -> Vec<DoctorSummary> {
        self.doctors
            .iter()
            .filter(|d| {
                self.appointments
                    .iter()
                    .any(|a| a.patient_id == patient_id && a.doctor_id == d.id)
            })
            .map(|d| DoctorSummary {
                name: d.name.clone(),
                specialty: d.specialty.clone(),
            })
            .collect()
    }

    fn patients_of(&self, doctor_id: i32) -> Vec<PatientSummary> {
        self.patients
            .iter()
            .filter(|p| {
                self.appointments
                    .iter()
                    .any(|a| a.doctor_id == doctor_id && a.patient_id == p.id)
            })
            .map(|p| PatientSummary {
                name: p.name.clone(),
            })
            .collect()
    }
}

impl OrchardTables {
    fn detail(&self, fruit: &Fruit) -> FruitDetail {
        let owner = fruit.user_id.and_then(|user_id| {
            self.users
                .iter()
                .find(|u| u.id == user_id)
                .map(|u| u.name.clone())
        });

        let seasons = self
            .seasons
            .iter()
            .filter(|s| {
                self.season_fruits
                    .iter()
                    .any(|sf| sf.fruit_id == fruit.id && sf.season_id == s.id)
            })
            .cloned()
            .collect();

        FruitDetail {
            fruit: fruit.clone(),
            owner,
            seasons,
        }
    }
}

#[async_trait]
impl ClinicStore for MemoryStore {
    async fn list_patients(&self) -> Result<Vec<PatientWithDoctors>, AppError> {
        let tables = self.clinic.lock().await;

        Ok(tables
            .patients
            .iter()
            .map(|p| PatientWithDoctors {
                patient: p.clone(),
                doctors: tables.doctors_of(p.id),
            })
            .collect())
    }

    async fn get_patient(&self, patient_id: i32) -> Result<PatientWithDoctors, AppError> {
        let tables = self.clinic.lock().await;

        let patient = tables
            .patients
            .iter()
            .find(|p| p.id == patient_id)
            .ok_or_else(|| AppError::NotFound(format!("Patient {} not found", patient_id)))?;

        Ok(PatientWithDoctors {
            patient: patient.clone(),
            doctors: tables.doctors_of(patient_id),
        })
    }

    async fn list_doctors(&self) -> Result<Vec<DoctorWithPatients>, AppError> {
        let tables = self.clinic.lock().await;

        Ok(tables
            .doctors
            .iter()
            .map(|d| DoctorWithPatients {
                doctor: d.clone(),
                patients: tables.patients_of(d.id),
            })
            .collect())
    }

    async fn get_doctor(&self, doctor_id: i32) -> Result<DoctorWithPatients, AppError> {
        let tables = self.clinic.lock().await;

        let doctor = tables
            .doctors
            .iter()
            .find(|d| d.id == doctor_id)
            .ok_or_else(|| AppError::NotFound(format!("Doctor {} not found", doctor_id)))?;

        Ok(DoctorWithPatients {
            doctor: doctor.clone(),
            patients: tables.patients_of(doctor_id),
        })
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, AppError> {
        Ok(self.clinic.lock().await.appointments.clone())
    }
}

#[async_trait]
impl OrchardStore for MemoryStore {
    async fn list_fruits(&self) -> Result<Vec<Fruit>, AppError> {
        Ok(self.orchard.lock().await.fruits.clone())
    }

    async fn get_fruit(&self, fruit_id: i32) -> Result<FruitDetail, AppError> {
        let tables = self.orchard.lock().await;

        let fruit = tables
            .fruits
            .iter()
            .find(|f| f.id == fruit_id)
            .ok_or_else(|| AppError::NotFound(format!("Fruit {} not found", fruit_id)))?;

        Ok(tables.detail(fruit))
    }

    async fn create_fruit(&self, new_fruit: NewFruit) -> Result<Fruit, AppError> {
        let mut tables = self.orchard.lock().await;

        if let Some(user_id) = new_fruit.user_id {
            if !tables.users.iter().any(|u| u.id == user_id) {
                return Err(AppError::BadRequest(
                    "Failed to create fruit: referenced row does not exist".into(),
                ));
            }
        }

        let now = Utc::now();
        let fruit = Fruit {
            id: tables.next_fruit_id.max(1),
            name: new_fruit.name,
            color: new_fruit.color,
            ready_to_eat: new_fruit.ready_to_eat,
            user_id: new_fruit.user_id,
            created_at: now,
            updated_at: now,
        };
        tables.next_fruit_id = fruit.id + 1;
        tables.fruits.push(fruit.clone());

        tracing::info!("Created new fruit: {} (ID: {})", fruit.name, fruit.id);

        Ok(fruit)
    }

    async fn update_fruit(
        &self,
        fruit_id: i32,
        changes: FruitChanges,
    ) -> Result<Fruit, AppError> {
        let mut tables = self.orchard.lock().await;

        let index = tables
            .fruits
            .iter()
            .position(|f| f.id == fruit_id)
            .ok_or_else(|| AppError::NotFound(format!("Fruit {} not found", fruit_id)))?;

        // Checked before any write so a missing season leaves the fruit untouched
        if let Some(season_id) = changes.season_id {
            if !tables.seasons.iter().any(|s| s.id == season_id) {
                return Err(AppError::NotFound(format!("Season {} not found", season_id)));
            }
        }

        let now = Utc::now();
        let fruit = &mut tables.fruits[index];
        fruit.name = changes.name;
        fruit.color = changes.color;
        fruit.ready_to_eat = changes.ready_to_eat;
        fruit.updated_at = now;
        let fruit = fruit.clone();

        if let Some(season_id) = changes.season_id {
            let linked = tables
                .season_fruits
                .iter()
                .any(|sf| sf.fruit_id == fruit_id && sf.season_id == season_id);

            if !linked {
                let id = tables.next_season_fruit_id.max(1);
                tables.next_season_fruit_id = id + 1;
                tables.season_fruits.push(SeasonFruit {
                    id,
                    fruit_id,
                    season_id,
                    created_at: now,
                    updated_at: now,
                });
            }
        }

        tracing::info!("Updated fruit: {} (ID: {})", fruit.name, fruit.id);

        Ok(fruit)
    }

    async fn delete_fruit(&self, fruit_id: i32) -> Result<(), AppError> {
        let mut tables = self.orchard.lock().await;

        let before = tables.fruits.len();
        tables.fruits.retain(|f| f.id != fruit_id);
        if tables.fruits.len() == before {
            return Err(AppError::NotFound(format!("Fruit {} not found", fruit_id)));
        }
        tables.season_fruits.retain(|sf| sf.fruit_id != fruit_id);

        tracing::info!("Deleted fruit {}", fruit_id);

        Ok(())
    }

    async fn list_seasons(&self) -> Result<Vec<Season>, AppError> {
        Ok(self.orchard.lock().await.seasons.clone())
    }
}
