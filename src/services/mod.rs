//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod category_service;
mod product_service;

pub use category_service::{CategoryService, CategoryWithProducts};
pub use product_service::ProductService;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since repositories sit behind `Arc`.
#[derive(Clone)]
pub struct Services {
    pub categories: CategoryService,
    pub products: ProductService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            categories: CategoryService::new(repos.categories.clone(), repos.products.clone()),
            products: ProductService::new(repos.products, repos.categories),
        }
    }
}
