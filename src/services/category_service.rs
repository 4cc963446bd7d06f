//! Category service for business logic operations.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Category, NewCategory, Product, ProductWithCategory, UpdateCategory};
use crate::repositories::{CategoryRepository, ProductRepository};

/// A category together with every product that references it.
#[derive(Debug, Clone)]
pub struct CategoryWithProducts {
    pub category: Category,
    pub products: Vec<Product>,
}

/// Category service for handling category-related business logic.
///
/// Also reads products, for the nested and flat product listings.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { categories, products }
    }

    /// Lists all categories ordered by id.
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.categories.list_all().await
    }

    /// Gets a category by its ID.
    ///
    /// # Returns
    /// The category if found, or `NotFound` error
    pub async fn get_category(&self, id: i32) -> AppResult<Category> {
        match self.categories.find_by_id(id).await? {
            Some(category) => Ok(category),
            None => {
                tracing::debug!(category_id = id, "Category not found");
                Err(AppError::not_found("category", id))
            }
        }
    }

    pub async fn create_category(&self, new_category: NewCategory) -> AppResult<Category> {
        let category = self.categories.create(new_category).await?;
        tracing::info!(category_id = category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Updates a category's allow-listed fields.
    ///
    /// A changeset with nothing to apply returns the stored record untouched.
    pub async fn update_category(&self, id: i32, changes: UpdateCategory) -> AppResult<Category> {
        if changes.is_empty() {
            return self.get_category(id).await;
        }

        let category = self
            .categories
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("category", id))?;
        tracing::info!(category_id = id, "Category updated");
        Ok(category)
    }

    /// Deletes a category.
    ///
    /// Products referencing it are left in place.
    pub async fn delete_category(&self, id: i32) -> AppResult<()> {
        if self.categories.delete(id).await? == 0 {
            tracing::debug!(category_id = id, "Category not found for delete");
            return Err(AppError::not_found("category", id));
        }
        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }

    pub async fn category_with_products(&self, id: i32) -> AppResult<CategoryWithProducts> {
        let category = self.get_category(id).await?;
        let products = self.products.list_by_category(id).await?;
        Ok(CategoryWithProducts { category, products })
    }

    /// Every product with the name of its category, if it still exists.
    pub async fn products_with_category_name(&self) -> AppResult<Vec<ProductWithCategory>> {
        self.products.list_with_category().await
    }
}
