pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::store::OrchardStore,
    errors::AppError,
    models::{Fruit, FruitChanges, FruitDetail, NewFruit, Season},
};

#[async_trait]
impl OrchardStore for PgPool {
    async fn list_fruits(&self) -> Result<Vec<Fruit>, AppError> {
        get::get_all_fruits(self.clone()).await
    }

    async fn get_fruit(&self, fruit_id: i32) -> Result<FruitDetail, AppError> {
        get::get_fruit_by_id(fruit_id, self.clone()).await
    }

    async fn create_fruit(&self, new_fruit: NewFruit) -> Result<Fruit, AppError> {
        post::create_fruit(new_fruit, self.clone()).await
    }

    async fn update_fruit(
        &self,
        fruit_id: i32,
        changes: FruitChanges,
    ) -> Result<Fruit, AppError> {
        put::update_fruit(fruit_id, changes, self.clone()).await
    }

    async fn delete_fruit(&self, fruit_id: i32) -> Result<(), AppError> {
        delete::delete_fruit(fruit_id, self.clone()).await
    }

    async fn list_seasons(&self) -> Result<Vec<Season>, AppError> {
        get::get_all_seasons(self.clone()).await
    }
}
