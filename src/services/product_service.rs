//! Product service for business logic operations.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{NewProduct, Product, ProductWithCategory, UpdateProduct};
use crate::repositories::{CategoryRepository, ProductRepository};

/// Product service for handling product-related business logic.
#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self { products, categories }
    }

    /// Lists all products with their category, ordered by id.
    pub async fn list_products(&self) -> AppResult<Vec<ProductWithCategory>> {
        self.products.list_with_category().await
    }

    /// Gets a product and its category by the product ID.
    ///
    /// # Returns
    /// The product if found, or `NotFound` error
    pub async fn get_product(&self, id: i32) -> AppResult<ProductWithCategory> {
        match self.products.find_with_category(id).await? {
            Some(product) => Ok(product),
            None => {
                tracing::debug!(product_id = id, "Product not found");
                Err(AppError::not_found("product", id))
            }
        }
    }

    /// Creates a product after checking that its category exists.
    ///
    /// The check and the insert are separate statements.
    pub async fn create_product(&self, new_product: NewProduct) -> AppResult<Product> {
        if self.categories.find_by_id(new_product.category_id).await?.is_none() {
            tracing::debug!(category_id = new_product.category_id, "Rejected product with unknown category");
            return Err(AppError::invalid_field(
                "category_id",
                "The selected category id is invalid.",
            ));
        }

        let product = self.products.create(new_product).await?;
        tracing::info!(product_id = product.id, category_id = product.category_id, "Product created");
        Ok(product)
    }

    /// Replaces a product's name, price and quantity.
    ///
    /// A supplied `category_id` is stored as given.
    pub async fn update_product(&self, id: i32, changes: UpdateProduct) -> AppResult<Product> {
        let product = self
            .products
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("product", id))?;
        tracing::info!(product_id = id, "Product updated");
        Ok(product)
    }

    pub async fn delete_product(&self, id: i32) -> AppResult<()> {
        if self.products.delete(id).await? == 0 {
            tracing::debug!(product_id = id, "Product not found for delete");
            return Err(AppError::not_found("product", id));
        }
        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }
}
