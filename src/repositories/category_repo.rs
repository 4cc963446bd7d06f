//! Category repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Category, NewCategory, UpdateCategory};
use crate::schema::categories;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Inserts a category and returns it with its generated id and timestamps.
    async fn create(&self, new_category: NewCategory) -> AppResult<Category>;

    async fn find_by_id(&self, category_id: i32) -> AppResult<Option<Category>>;

    /// All categories ordered by id.
    async fn list_all(&self) -> AppResult<Vec<Category>>;

    /// Applies `changes` and bumps `updated_at`.
    ///
    /// Returns `None` when no row has this id.
    async fn update(&self, category_id: i32, changes: UpdateCategory) -> AppResult<Option<Category>>;

    /// Returns the number of affected rows (0 or 1).
    async fn delete(&self, category_id: i32) -> AppResult<usize>;
}

/// Category repository holding an async connection pool.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: AsyncDbPool,
}

impl DieselCategoryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn create(&self, new_category: NewCategory) -> AppResult<Category> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;

        diesel::insert_into(categories::table)
            .values(&new_category)
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, category_id: i32) -> AppResult<Option<Category>> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;

        categories::table
            .find(category_id)
            .select(Category::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn list_all(&self) -> AppResult<Vec<Category>> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;

        categories::table
            .order(categories::id.asc())
            .select(Category::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, category_id: i32, changes: UpdateCategory) -> AppResult<Option<Category>> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;

        diesel::update(categories::table.find(category_id))
            .set((&changes, categories::updated_at.eq(diesel::dsl::now)))
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn delete(&self, category_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;

        diesel::delete(categories::table.find(category_id))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
