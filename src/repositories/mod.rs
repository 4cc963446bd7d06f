//! Repository layer for data access operations.
//!
//! Each entity is reached through a trait so services can run against
//! PostgreSQL in production and an in-memory store in tests.

mod category_repo;
#[cfg(test)]
pub(crate) mod memory;
mod product_repo;

use std::sync::Arc;

pub use category_repo::{CategoryRepository, DieselCategoryRepository};
pub use product_repo::{DieselProductRepository, ProductRepository};

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Cloning only bumps the reference counts.
#[derive(Clone)]
pub struct Repositories {
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
}

impl Repositories {
    /// Creates PostgreSQL-backed repositories sharing one pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
            products: Arc::new(DieselProductRepository::new(pool)),
        }
    }
}
