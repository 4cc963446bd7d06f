//! Category DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::text::{TextInput, validate_text};
use super::{ProductResponse, format_timestamp};
use crate::error::{AppError, AppResult};
use crate::models::{Category, NewCategory, UpdateCategory};
use crate::services::CategoryWithProducts;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a category.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCategoryRequest {
    #[validate(required, custom(function = "validate_text"))]
    #[schema(value_type = Option<String>, max_length = 255, example = "Books")]
    pub name: Option<TextInput>,
}

impl CreateCategoryRequest {
    pub fn into_new_category(self) -> AppResult<NewCategory> {
        let name = self
            .name
            .as_ref()
            .and_then(TextInput::to_text)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::invalid_field("name", "The name field is required."))?;
        Ok(NewCategory { name })
    }
}

/// Request body for updating a category.
///
/// Only `name` is assignable; `id` and any other field are ignored.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(custom(function = "validate_text"))]
    #[schema(value_type = Option<String>, max_length = 255)]
    pub name: Option<TextInput>,
}

impl UpdateCategoryRequest {
    pub fn into_update_category(self) -> UpdateCategory {
        UpdateCategory {
            name: self.name.as_ref().and_then(TextInput::to_text),
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: format_timestamp(category.created_at),
            updated_at: format_timestamp(category.updated_at),
        }
    }
}

/// A category with its products nested under `products`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryWithProductsResponse {
    #[serde(flatten)]
    pub category: CategoryResponse,
    pub products: Vec<ProductResponse>,
}

impl From<CategoryWithProducts> for CategoryWithProductsResponse {
    fn from(value: CategoryWithProducts) -> Self {
        Self {
            category: CategoryResponse::from(value.category),
            products: value.products.into_iter().map(ProductResponse::from).collect(),
        }
    }
}
