use sqlx::PgPool;

use crate::{
    errors::AppError,
    models::{Fruit, FruitDetail, Season},
};

pub async fn get_all_fruits(postgres: PgPool) -> Result<Vec<Fruit>, AppError> {
    sqlx::query_as::<_, Fruit>(
        "SELECT id, name, color, ready_to_eat, user_id, created_at, updated_at
			FROM fruits
			ORDER BY id",
    )
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to fetch fruits", e))
}

pub async fn get_fruit_by_id(fruit_id: i32, postgres: PgPool) -> Result<FruitDetail, AppError> {
    let fruit = sqlx::query_as::<_, Fruit>(
        "SELECT id, name, color, ready_to_eat, user_id, created_at, updated_at
			FROM fruits
			WHERE id = $1",
    )
    .bind(fruit_id)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to fetch fruit", e))?
    .ok_or_else(|| AppError::NotFound(format!("Fruit {} not found", fruit_id)))?;

    let owner = match fruit.user_id {
        Some(user_id) => sqlx::query_scalar::<_, String>("SELECT name FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&postgres)
            .await
            .map_err(|e| AppError::from_db("Failed to fetch fruit owner", e))?,
        None => None,
    };

    let seasons = sqlx::query_as::<_, Season>(
        "SELECT s.id, s.name, s.created_at, s.updated_at
			FROM seasons s
			JOIN season_fruits sf ON sf.season_id = s.id
			WHERE sf.fruit_id = $1
			ORDER BY s.id",
    )
    .bind(fruit_id)
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to fetch fruit seasons", e))?;

    Ok(FruitDetail {
        fruit,
        owner,
        seasons,
    })
}

pub async fn get_all_seasons(postgres: PgPool) -> Result<Vec<Season>, AppError> {
    sqlx::query_as::<_, Season>("SELECT id, name, created_at, updated_at FROM seasons ORDER BY id")
        .fetch_all(&postgres)
        .await
        .map_err(|e| AppError::from_db("Failed to fetch seasons", e))
}
