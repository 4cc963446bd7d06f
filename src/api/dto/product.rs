//! Product DTOs for API requests and responses.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::format_timestamp;
use super::numeric::{
    NumericInput, validate_category_reference, validate_integer, validate_price,
    validate_quantity,
};
use super::text::{TextInput, validate_text};
use crate::error::{AppError, AppResult};
use crate::models::{NewProduct, Product, ProductWithCategory, UpdateProduct};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a product.
///
/// `price` and `quantity` accept JSON numbers or numeric strings. A
/// fractional quantity is rounded half-up to a whole number.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateProductRequest {
    #[validate(required, custom(function = "validate_category_reference"))]
    #[schema(value_type = Option<i32>, example = 1)]
    pub category_id: Option<NumericInput>,

    #[validate(required, custom(function = "validate_text"))]
    #[schema(value_type = Option<String>, max_length = 255, example = "Paperback novel")]
    pub name: Option<TextInput>,

    #[validate(required, custom(function = "validate_price"))]
    #[schema(value_type = Option<String>, example = "12.50")]
    pub price: Option<NumericInput>,

    #[validate(required, custom(function = "validate_quantity"))]
    #[schema(value_type = Option<String>, example = "3")]
    pub quantity: Option<NumericInput>,
}

impl CreateProductRequest {
    /// Converts a validated request into an insertable product.
    pub fn into_new_product(self) -> AppResult<NewProduct> {
        Ok(NewProduct {
            category_id: category_reference(self.category_id.as_ref())?,
            name: required_text("name", self.name.as_ref())?,
            price: price(self.price.as_ref())?,
            quantity: quantity(self.quantity.as_ref())?,
        })
    }
}

/// Request body for updating a product.
///
/// `name`, `price` and `quantity` are required; `category_id` is optional
/// and is not checked against existing categories.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateProductRequest {
    #[validate(required, custom(function = "validate_text"))]
    #[schema(value_type = Option<String>, max_length = 255)]
    pub name: Option<TextInput>,

    #[validate(required, custom(function = "validate_price"))]
    #[schema(value_type = Option<String>, example = "12.50")]
    pub price: Option<NumericInput>,

    #[validate(required, custom(function = "validate_quantity"))]
    #[schema(value_type = Option<String>, example = "3")]
    pub quantity: Option<NumericInput>,

    #[validate(custom(function = "validate_integer"))]
    #[schema(value_type = Option<i32>)]
    pub category_id: Option<NumericInput>,
}

impl UpdateProductRequest {
    pub fn into_update_product(self) -> AppResult<UpdateProduct> {
        let category_id = match self.category_id.as_ref() {
            Some(value) => Some(integer("category_id", Some(value))?),
            None => None,
        };

        Ok(UpdateProduct {
            name: required_text("name", self.name.as_ref())?,
            price: price(self.price.as_ref())?,
            quantity: quantity(self.quantity.as_ref())?,
            category_id,
        })
    }
}

fn required_text(field: &str, value: Option<&TextInput>) -> AppResult<String> {
    value
        .and_then(TextInput::to_text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| AppError::invalid_field(field, format!("The {field} field is required.")))
}

fn price(value: Option<&NumericInput>) -> AppResult<BigDecimal> {
    value
        .and_then(NumericInput::to_price)
        .ok_or_else(|| AppError::invalid_field("price", "The price field must be a number."))
}

fn quantity(value: Option<&NumericInput>) -> AppResult<i32> {
    value
        .and_then(NumericInput::to_quantity)
        .ok_or_else(|| AppError::invalid_field("quantity", "The quantity field must be a number."))
}

fn integer(field: &str, value: Option<&NumericInput>) -> AppResult<i32> {
    value.and_then(NumericInput::to_i32).ok_or_else(|| {
        let label = field.replace('_', " ");
        AppError::invalid_field(field, format!("The {label} field must be an integer."))
    })
}

fn category_reference(value: Option<&NumericInput>) -> AppResult<i32> {
    value
        .and_then(NumericInput::to_i32)
        .ok_or_else(|| AppError::invalid_field("category_id", "The selected category id is invalid."))
}

// ============================================================================
// Response DTOs
// ============================================================================

/// A stored product as returned by create and update.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    #[schema(value_type = String, example = "12.50")]
    pub price: BigDecimal,
    pub quantity: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            category_id: product.category_id,
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            created_at: format_timestamp(product.created_at),
            updated_at: format_timestamp(product.updated_at),
        }
    }
}

/// A product with the name of its category; `category_name` is null for a
/// dangling reference.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetailResponse {
    pub id: i32,
    pub name: String,
    #[schema(value_type = String, example = "12.50")]
    pub price: BigDecimal,
    pub quantity: i32,
    pub category_id: i32,
    pub category_name: Option<String>,
}

impl From<ProductWithCategory> for ProductDetailResponse {
    fn from(row: ProductWithCategory) -> Self {
        Self {
            id: row.product.id,
            name: row.product.name,
            price: row.product.price,
            quantity: row.product.quantity,
            category_id: row.product.category_id,
            category_name: row.category.map(|c| c.name),
        }
    }
}

/// One row of the flat product/category listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductCatalogEntry {
    pub product_id: i32,
    pub product_name: String,
    #[schema(value_type = String, example = "12.50")]
    pub product_price: BigDecimal,
    /// Id of the resolved category, null when dangling
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
}

impl From<ProductWithCategory> for ProductCatalogEntry {
    fn from(row: ProductWithCategory) -> Self {
        let (category_id, category_name) = match row.category {
            Some(category) => (Some(category.id), Some(category.name)),
            None => (None, None),
        };

        Self {
            product_id: row.product.id,
            product_name: row.product.name,
            product_price: row.product.price,
            category_id,
            category_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductCatalogResponse {
    pub total: usize,
    pub products: Vec<ProductCatalogEntry>,
}

impl From<Vec<ProductWithCategory>> for ProductCatalogResponse {
    fn from(rows: Vec<ProductWithCategory>) -> Self {
        let products: Vec<ProductCatalogEntry> =
            rows.into_iter().map(ProductCatalogEntry::from).collect();
        Self {
            total: products.len(),
            products,
        }
    }
}
