use sqlx::PgPool;

use crate::{
    errors::AppError,
    models::{Fruit, FruitChanges},
};

pub async fn update_fruit(
    fruit_id: i32,
    changes: FruitChanges,
    postgres: PgPool,
) -> Result<Fruit, AppError> {
    let mut tx = postgres
        .begin()
        .await
        .map_err(|e| AppError::from_db("Failed to begin transaction", e))?;

    let fruit = sqlx::query_as::<_, Fruit>(
        "UPDATE fruits
        SET name = $1, color = $2, ready_to_eat = $3, updated_at = now()
        WHERE id = $4
        RETURNING id, name, color, ready_to_eat, user_id, created_at, updated_at",
    )
    .bind(&changes.name)
    .bind(&changes.color)
    .bind(changes.ready_to_eat)
    .bind(fruit_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| AppError::from_db("Failed to update fruit", e))?
    .ok_or_else(|| AppError::NotFound(format!("Fruit {} not found", fruit_id)))?;

    if let Some(season_id) = changes.season_id {
        let season_exists = sqlx::query_scalar::<_, i32>("SELECT id FROM seasons WHERE id = $1")
            .bind(season_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::from_db("Failed to fetch season", e))?;

        if season_exists.is_none() {
            return Err(AppError::NotFound(format!("Season {} not found", season_id)));
        }

        // Re-associating an existing pair is a no-op
        sqlx::query(
            "INSERT INTO season_fruits (fruit_id, season_id)
            VALUES ($1, $2)
            ON CONFLICT (fruit_id, season_id) DO NOTHING",
        )
        .bind(fruit_id)
        .bind(season_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_db("Failed to add season to fruit", e))?;
    }

    tx.commit()
        .await
        .map_err(|e| AppError::from_db("Failed to commit fruit update", e))?;

    tracing::info!("Updated fruit: {} (ID: {})", fruit.name, fruit.id);

    Ok(fruit)
}
