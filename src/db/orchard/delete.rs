use sqlx::PgPool;

use crate::errors::AppError;

pub async fn delete_fruit(fruit_id: i32, postgres: PgPool) -> Result<(), AppError> {
    // season_fruits rows go with the fruit through ON DELETE CASCADE
    let result = sqlx::query("DELETE FROM fruits WHERE id = $1")
        .bind(fruit_id)
        .execute(&postgres)
        .await
        .map_err(|e| AppError::from_db("Failed to delete fruit", e))?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Fruit {} not found", fruit_id)));
    }

    tracing::info!("Deleted fruit {}", fruit_id);

    Ok(())
}
