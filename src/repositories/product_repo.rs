//! Product repository for async database operations.
//!
//! Listing queries left-join categories so products whose category has been
//! deleted still come back, with no category attached.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Category, NewProduct, Product, ProductWithCategory, UpdateProduct};
use crate::schema::{categories, products};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, new_product: NewProduct) -> AppResult<Product>;

    async fn find_with_category(&self, product_id: i32) -> AppResult<Option<ProductWithCategory>>;

    /// Every product with its category, ordered by product id.
    async fn list_with_category(&self) -> AppResult<Vec<ProductWithCategory>>;

    /// Products whose `category_id` equals `category_id`, ordered by id.
    async fn list_by_category(&self, category_id: i32) -> AppResult<Vec<Product>>;

    /// Returns `None` when no row has this id.
    async fn update(&self, product_id: i32, changes: UpdateProduct) -> AppResult<Option<Product>>;

    /// Returns the number of affected rows (0 or 1).
    async fn delete(&self, product_id: i32) -> AppResult<usize>;
}

/// Product repository holding an async connection pool.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: AsyncDbPool,
}

impl DieselProductRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

fn into_joined(rows: Vec<(Product, Option<Category>)>) -> Vec<ProductWithCategory> {
    rows.into_iter()
        .map(|(product, category)| ProductWithCategory { product, category })
        .collect()
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn create(&self, new_product: NewProduct) -> AppResult<Product> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;

        diesel::insert_into(products::table)
            .values(&new_product)
            .returning(Product::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_with_category(&self, product_id: i32) -> AppResult<Option<ProductWithCategory>> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;

        let row: Option<(Product, Option<Category>)> = products::table
            .left_join(categories::table)
            .filter(products::id.eq(product_id))
            .select((Product::as_select(), Option::<Category>::as_select()))
            .first(&mut conn)
            .await
            .optional()?;

        Ok(row.map(|(product, category)| ProductWithCategory { product, category }))
    }

    async fn list_with_category(&self) -> AppResult<Vec<ProductWithCategory>> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;

        let rows = products::table
            .left_join(categories::table)
            .order(products::id.asc())
            .select((Product::as_select(), Option::<Category>::as_select()))
            .load::<(Product, Option<Category>)>(&mut conn)
            .await?;

        Ok(into_joined(rows))
    }

    async fn list_by_category(&self, category_id: i32) -> AppResult<Vec<Product>> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;

        products::table
            .filter(products::category_id.eq(category_id))
            .order(products::id.asc())
            .select(Product::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, product_id: i32, changes: UpdateProduct) -> AppResult<Option<Product>> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;

        diesel::update(products::table.find(product_id))
            .set((&changes, products::updated_at.eq(diesel::dsl::now)))
            .returning(Product::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn delete(&self, product_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await.map_err(AppError::connection_pool)?;

        diesel::delete(products::table.find(product_id))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
