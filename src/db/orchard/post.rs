use sqlx::PgPool;

use crate::{
    errors::AppError,
    models::{Fruit, NewFruit},
};

pub async fn create_fruit(new_fruit: NewFruit, postgres: PgPool) -> Result<Fruit, AppError> {
    let fruit = sqlx::query_as::<_, Fruit>(
        "INSERT INTO fruits (name, color, ready_to_eat, user_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, color, ready_to_eat, user_id, created_at, updated_at",
    )
    .bind(&new_fruit.name)
    .bind(&new_fruit.color)
    .bind(new_fruit.ready_to_eat)
    .bind(new_fruit.user_id)
    .fetch_one(&postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to create fruit", e))?;

    tracing::info!("Created new fruit: {} (ID: {})", fruit.name, fruit.id);

    Ok(fruit)
}
