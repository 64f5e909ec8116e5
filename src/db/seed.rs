use sqlx::PgPool;

use crate::errors::AppError;

/// `(name, specialty)`
pub const DOCTORS: &[(&str, &str)] = &[("John Doe", "Dentist"), ("Schmitty Footman", "Podiatrist")];

pub const PATIENTS: &[&str] = &["Patient 1", "Patient 2"];

/// `(reason, index into DOCTORS, index into PATIENTS)`
pub const APPOINTMENTS: &[(&str, usize, usize)] = &[("Teeth stuff", 0, 0), ("Foot stuff", 1, 1)];

pub const USERS: &[&str] = &["Ada", "Ben", "Cleo"];

/// `(name, color, ready_to_eat, index into USERS)`
pub const FRUITS: &[(&str, &str, bool, usize)] = &[
    ("apple", "red", true, 0),
    ("pear", "green", false, 1),
    ("banana", "yellow", true, 2),
];

pub const SEASONS: &[&str] = &["Summer", "Winter", "Spring", "Autumn"];

async fn table_has_rows(table: &str, postgres: &PgPool) -> Result<bool, AppError> {
    sqlx::query_scalar::<_, bool>(&format!("SELECT EXISTS (SELECT 1 FROM {})", table))
        .fetch_one(postgres)
        .await
        .map_err(|e| AppError::from_db(&format!("Failed to inspect {}", table), e))
}

pub async fn seed_clinic(postgres: PgPool) -> Result<(), AppError> {
    if table_has_rows("doctors", &postgres).await? {
        tracing::info!("Clinic tables already seeded, skipping");
        return Ok(());
    }

    let mut tx = postgres
        .begin()
        .await
        .map_err(|e| AppError::from_db("Failed to begin transaction", e))?;

    let mut doctor_ids = Vec::with_capacity(DOCTORS.len());
    for (name, specialty) in DOCTORS {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO doctors (name, specialty) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(specialty)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_db("Failed to seed doctors", e))?;
        doctor_ids.push(id);
    }

    let mut patient_ids = Vec::with_capacity(PATIENTS.len());
    for name in PATIENTS {
        let id = sqlx::query_scalar::<_, i32>("INSERT INTO patients (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::from_db("Failed to seed patients", e))?;
        patient_ids.push(id);
    }

    for (reason, doctor, patient) in APPOINTMENTS {
        sqlx::query("INSERT INTO appointments (reason, doctor_id, patient_id) VALUES ($1, $2, $3)")
            .bind(reason)
            .bind(doctor_ids[*doctor])
            .bind(patient_ids[*patient])
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_db("Failed to seed appointments", e))?;
    }

    tx.commit()
        .await
        .map_err(|e| AppError::from_db("Failed to commit clinic seed", e))?;

    tracing::info!(
        "Seeded {} doctors, {} patients, {} appointments",
        DOCTORS.len(),
        PATIENTS.len(),
        APPOINTMENTS.len()
    );

    Ok(())
}

pub async fn seed_orchard(postgres: PgPool) -> Result<(), AppError> {
    let seed_fruits = !table_has_rows("fruits", &postgres).await?;
    let seed_seasons = !table_has_rows("seasons", &postgres).await?;

    if !seed_fruits && !seed_seasons {
        tracing::info!("Orchard tables already seeded, skipping");
        return Ok(());
    }

    let mut tx = postgres
        .begin()
        .await
        .map_err(|e| AppError::from_db("Failed to begin transaction", e))?;

    if seed_fruits {
        let mut user_ids = Vec::with_capacity(USERS.len());
        for name in USERS {
            let id =
                sqlx::query_scalar::<_, i32>("INSERT INTO users (name) VALUES ($1) RETURNING id")
                    .bind(name)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| AppError::from_db("Failed to seed users", e))?;
            user_ids.push(id);
        }

        for (name, color, ready_to_eat, user) in FRUITS {
            sqlx::query(
                "INSERT INTO fruits (name, color, ready_to_eat, user_id) VALUES ($1, $2, $3, $4)",
            )
            .bind(name)
            .bind(color)
            .bind(ready_to_eat)
            .bind(user_ids[*user])
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_db("Failed to seed fruits", e))?;
        }
    }

    if seed_seasons {
        for name in SEASONS {
            sqlx::query("INSERT INTO seasons (name) VALUES ($1)")
                .bind(name)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::from_db("Failed to seed seasons", e))?;
        }
    }

    tx.commit()
        .await
        .map_err(|e| AppError::from_db("Failed to commit orchard seed", e))?;

    tracing::info!(
        "Seeded orchard tables (fruits: {}, seasons: {})",
        seed_fruits,
        seed_seasons
    );

    Ok(())
}
